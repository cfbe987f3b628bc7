use crate::{
	expand_element, expand_iri, expand_literal, filter_top_level_item, term_to_id_string, Action,
	ActiveProperty, Error, Expanded, ExpandedEntry, Options,
};
use iref::IriBuf;
use jsonld_context_processing::{algorithm::process_context, Options as ProcessingOptions,
	ProcessingStack};
use jsonld_core::{
	expanded::{entry, into_graph_object, is_graph_object},
	Container, Context, Id, Loader, ProcessingMode, Term, Type,
};
use jsonld_syntax::{ContainerKind, Keyword, LenientLangTagBuf, Nullable};
use json_syntax::{object::Entry, Object, Value};
use mown::Mown;

/// Appends the given values to the array entry `key` of `object`, creating
/// it if necessary.
fn add_values(object: &mut Object, key: &str, values: impl IntoIterator<Item = Value>) {
	match object.get_unique_mut(key).ok().flatten() {
		Some(Value::Array(array)) => array.extend(values),
		Some(_) => (),
		None => {
			object.insert(key.into(), Value::Array(values.into_iter().collect()));
		}
	}
}

/// Expand a node object.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn expand_node<'a, L>(
	active_context: &'a Context,
	type_scoped_context: &'a Context,
	active_property: ActiveProperty<'a>,
	expanded_entries: Vec<ExpandedEntry<'a>>,
	base_url: Option<&'a IriBuf>,
	loader: &'a L,
	options: Options,
) -> Result<Option<Value>, Error>
where
	L: Loader,
{
	// Initialize two empty maps, `result` and `nests`.
	let (result, has_value_object_entries) = expand_node_entries(
		Object::default(),
		false,
		active_context,
		type_scoped_context,
		active_property,
		expanded_entries,
		base_url,
		loader,
		options,
	)
	.await?;

	// If result contains only value object entries (`@language` or
	// `@direction`) that were dropped, the node is meaningless.
	if has_value_object_entries && result.is_empty() {
		return Ok(None);
	}

	// If active property is null or @graph, drop free-floating
	// values as follows:
	if active_property.is_none() || active_property == Keyword::Graph {
		// If `result` is a map which is empty,
		// or contains only the entries `@value` or `@list`,
		// set `result` to null.
		// Otherwise, if result is a map whose only entry is @id, set result to
		// null (unless frame expansion is enabled).
		if result.is_empty() {
			return Ok(None);
		}

		if !options.processing_mode.is_frame()
			&& result.len() == 1
			&& entry(&result, "@id").is_some()
		{
			return Ok(None);
		}
	}

	Ok(Some(Value::Object(result)))
}

/// Type returned by the `expand_node_entries` function.
///
/// It is a tuple containing both the node being expanded
/// and a boolean flag set to `true` if the node contains
/// value object entries (in practice, if it has a `@language` entry).
type ExpandedNode = (Object, bool);

/// Result of the `expand_node_entries` function.
type NodeEntriesExpansionResult = Result<ExpandedNode, Error>;

#[allow(clippy::too_many_arguments)]
async fn expand_node_entries<'a, L>(
	mut result: Object,
	mut has_value_object_entries: bool,
	active_context: &'a Context,
	type_scoped_context: &'a Context,
	active_property: ActiveProperty<'a>,
	expanded_entries: Vec<ExpandedEntry<'a>>,
	base_url: Option<&'a IriBuf>,
	loader: &'a L,
	options: Options,
) -> NodeEntriesExpansionResult
where
	L: Loader,
{
	// For each `key` and `value` in `element`, ordered lexicographically by key
	// if `ordered` is `true`:
	for ExpandedEntry(key, expanded_key, value) in expanded_entries {
		match expanded_key {
			Term::Null => (),

			// If key is @context, continue to the next key.
			Term::Keyword(Keyword::Context) => (),
			// Initialize `expanded_property` to the result of IRI expanding `key`.

			// If `expanded_property` is `null` or it neither contains a colon (:)
			// nor it is a keyword, drop key by continuing to the next key.
			// (already done)

			// If `expanded_property` is a keyword:
			Term::Keyword(expanded_property) => {
				// If `active_property` equals `@reverse`, an invalid reverse property
				// map error has been detected and processing is aborted.
				if active_property == Keyword::Reverse {
					return Err(Error::InvalidReversePropertyMap);
				}

				// If `result` already has an `expanded_property` entry, other than
				// `@included` or `@type` (unless processing mode is json-ld-1.0), a
				// colliding keywords error has been detected and processing is
				// aborted.
				if (options.processing_mode == ProcessingMode::JsonLd1_0
					|| (expanded_property != Keyword::Included
						&& expanded_property != Keyword::Type))
					&& entry(&result, expanded_property.into_str()).is_some()
				{
					return Err(Error::CollidingKeywords);
				}

				match expanded_property {
					// If `expanded_property` is @id:
					Keyword::Id => {
						// If `value` is not a string, an invalid @id value error has
						// been detected and processing is aborted.
						if let Some(str_value) = value.as_str() {
							// Otherwise, set `expanded_value` to the result of IRI
							// expanding value using true for document relative and
							// false for vocab.
							let id = expand_iri(
								active_context,
								Nullable::Some(str_value),
								true,
								false,
							);

							if let Some(id) = term_to_id_string(id) {
								result.insert("@id".into(), Value::String(id.into()));
							}
						} else {
							return Err(Error::InvalidIdValue);
						}
					}
					// If expanded property is @type:
					Keyword::Type => {
						// If value is neither a string nor an array of strings, an
						// invalid type value error has been detected and processing
						// is aborted.
						let value = Value::force_as_array(value);
						// Set `expanded_value` to the result of IRI expanding each
						// of its values using `type_scoped_context` for active
						// context, and true for document relative.
						let mut types = Vec::with_capacity(value.len());
						for ty in value {
							if let Some(str_ty) = ty.as_str() {
								let expanded_ty = expand_iri(
									type_scoped_context,
									Nullable::Some(str_ty),
									true,
									true,
								);

								match expanded_ty {
									Term::Null | Term::Keyword(_) => {
										return Err(Error::InvalidTypeValue)
									}
									Term::Id(Id::Invalid(id)) => match options.policy.invalid {
										Action::Keep => types.push(Value::String(id.into())),
										Action::Drop => (),
										Action::Reject => return Err(Error::InvalidTypeValue),
									},
									ty => types.push(Value::String(ty.as_str().into())),
								}
							} else {
								return Err(Error::InvalidTypeValue);
							}
						}

						add_values(&mut result, "@type", types);
					}
					// If expanded property is @graph
					Keyword::Graph => {
						// Set `expanded_value` to the result of using this algorithm
						// recursively passing `active_context`, `@graph` for active
						// property, `value` for element, `base_url`, ensuring that
						// `expanded_value` is an array of one or more maps.
						let expanded_value = Box::pin(expand_element(
							active_context,
							ActiveProperty::Some("@graph"),
							value,
							base_url,
							loader,
							options,
							false,
						))
						.await?;

						result.insert(
							"@graph".into(),
							Value::Array(
								expanded_value
									.into_iter()
									.filter(filter_top_level_item)
									.collect(),
							),
						);
					}
					// If expanded property is @included:
					Keyword::Included => {
						// If processing mode is json-ld-1.0, continue with the next
						// key from element.
						if options.processing_mode == ProcessingMode::JsonLd1_0 {
							continue;
						}

						// Set `expanded_value` to the result of using this algorithm
						// recursively passing `active_context`, `active_property`,
						// `value` for element, `base_url`, ensuring that the result
						// is an array.
						let expanded_value = Box::pin(expand_element(
							active_context,
							ActiveProperty::Some("@included"),
							value,
							base_url,
							loader,
							options,
							false,
						))
						.await?;

						let mut expanded_nodes = Vec::new();
						for obj in expanded_value {
							// Every included value must be a node object.
							if obj
								.as_object()
								.map(|o| {
									entry(o, "@value").is_some() || entry(o, "@list").is_some()
								})
								.unwrap_or(true)
							{
								return Err(Error::InvalidIncludedValue);
							}

							expanded_nodes.push(obj);
						}

						add_values(&mut result, "@included", expanded_nodes);
					}
					// If expanded property is @language:
					Keyword::Language => has_value_object_entries = true,
					// If expanded property is @direction:
					Keyword::Direction => has_value_object_entries = true,
					// If expanded property is @index:
					Keyword::Index => {
						if let Some(index) = value.as_str() {
							result.insert("@index".into(), Value::String(index.into()));
						} else {
							// If value is not a string, an invalid @index value
							// error has been detected and processing is aborted.
							return Err(Error::InvalidIndexValue);
						}
					}
					// If expanded property is @reverse:
					Keyword::Reverse => {
						// If value is not a map, an invalid @reverse value error
						// has been detected and processing is aborted.
						if let Some(value) = value.as_object() {
							let mut reverse_entries: Vec<&Entry> = value.iter().collect();

							if options.ordered {
								reverse_entries.sort_by(|a, b| a.key.cmp(&b.key));
							}

							for Entry {
								key: reverse_key,
								value: reverse_value,
							} in reverse_entries
							{
								match expand_iri(
									active_context,
									Nullable::Some(reverse_key.as_str()),
									false,
									true,
								) {
									Term::Keyword(_) => {
										return Err(Error::InvalidReversePropertyMap)
									}
									Term::Id(reverse_prop)
										if reverse_prop.as_str().contains(':') =>
									{
										if !reverse_prop.is_valid() {
											match options.policy.invalid {
												Action::Keep => (),
												Action::Drop => continue,
												Action::Reject => {
													return Err(Error::KeyExpansionFailed(
														reverse_key.to_string(),
													))
												}
											}
										}

										let reverse_expanded_value = Box::pin(expand_element(
											active_context,
											ActiveProperty::Some(reverse_key.as_str()),
											reverse_value,
											base_url,
											loader,
											options,
											false,
										))
										.await?;

										let is_double_reversed =
											if let Some(reverse_key_definition) =
												active_context.get(reverse_key.as_str())
											{
												reverse_key_definition.reverse_property()
											} else {
												false
											};

										if is_double_reversed {
											add_values(
												&mut result,
												reverse_prop.as_str(),
												reverse_expanded_value,
											)
										} else {
											let mut reverse_expanded_nodes = Vec::new();
											for object in reverse_expanded_value {
												if object
													.as_object()
													.map(|o| {
														entry(o, "@value").is_some()
															|| entry(o, "@list").is_some()
													})
													.unwrap_or(true)
												{
													return Err(
														Error::InvalidReversePropertyValue,
													);
												}

												reverse_expanded_nodes.push(object);
											}

											let reverse_map =
												reverse_map_mut(&mut result);
											add_values(
												reverse_map,
												reverse_prop.as_str(),
												reverse_expanded_nodes,
											);
										}
									}
									_ => {
										if options.policy.invalid.is_reject()
											|| !options.policy.allow_undefined
										{
											return Err(Error::KeyExpansionFailed(
												reverse_key.to_string(),
											));
										}

										// otherwise the key is just dropped.
									}
								}
							}
						} else {
							return Err(Error::InvalidReverseValue);
						}
					}
					// If expanded property is @nest
					Keyword::Nest => {
						let nesting_key = key;
						// Recursively repeat steps 3, 8, 13, and 14 using `nesting_key` for active
						// property, and nested value for element.
						let value = Value::force_as_array(value);
						for nested_value in value {
							// Step 3 again.
							let mut property_scoped_base_url = None;
							let property_scoped_context = match active_context.get(nesting_key) {
								Some(definition) => {
									if let Some(base_url) = definition.base_url() {
										property_scoped_base_url = Some(base_url.clone());
									}

									definition.context()
								}
								None => None,
							};

							// Step 8 again.
							let active_context = match property_scoped_context {
								Some(property_scoped_context) => {
									let options: ProcessingOptions = options.into();
									Mown::Owned(
										process_context(
											active_context,
											property_scoped_context,
											ProcessingStack::default(),
											loader,
											property_scoped_base_url,
											options.with_override(),
										)
										.await?,
									)
								}
								None => Mown::Borrowed(active_context),
							};

							// Steps 13 and 14 again.
							if let Some(nested_value) = nested_value.as_object() {
								let mut nested_entries: Vec<&Entry> = nested_value.iter().collect();

								if options.ordered {
									nested_entries.sort_by(|a, b| a.key.cmp(&b.key));
								}

								let nested_expanded_entries = nested_entries
									.into_iter()
									.map(|Entry { key, value }| {
										let expanded_key = expand_iri(
											active_context.as_ref(),
											Nullable::Some(key.as_str()),
											false,
											true,
										);

										ExpandedEntry(key.as_str(), expanded_key, value)
									})
									.collect();

								let (new_result, new_has_value_object_entries) =
									Box::pin(expand_node_entries(
										result,
										has_value_object_entries,
										active_context.as_ref(),
										type_scoped_context,
										active_property,
										nested_expanded_entries,
										base_url,
										loader,
										options,
									))
									.await?;

								result = new_result;
								has_value_object_entries = new_has_value_object_entries;
							} else {
								return Err(Error::InvalidNestValue);
							}
						}
					}
					Keyword::Value => return Err(Error::InvalidNestValue),
					_ => (),
				}
			}

			Term::Id(prop) if prop.as_str().contains(':') => {
				if let Id::Invalid(name) = &prop {
					match options.policy.invalid {
						Action::Keep => (),
						Action::Drop => continue,
						Action::Reject => return Err(Error::KeyExpansionFailed(name.to_owned())),
					}
				}

				let mut container_mapping = Container::new();

				let key_definition = active_context.get(key);
				let mut is_reverse_property = false;
				let mut is_json = false;

				if let Some(key_definition) = key_definition {
					is_reverse_property = key_definition.reverse_property();

					// Initialize container mapping to key's container mapping in active context.
					container_mapping = key_definition.container();

					// If key's term definition in `active_context` has a type mapping of `@json`,
					// set expanded value to a new map,
					// set the entry `@value` to `value`, and set the entry `@type` to `@json`.
					if key_definition.typ() == Some(&Type::Json) {
						is_json = true;
					}
				}

				let expanded_value = if is_json {
					let mut object = Object::default();
					object.insert("@value".into(), value.clone());
					object.insert("@type".into(), Value::String("@json".into()));
					Expanded::Object(Value::Object(object))
				} else {
					match value.as_object() {
						Some(value) if container_mapping.contains(ContainerKind::Language) => {
							// Otherwise, if container mapping includes @language and value is a map then
							// value is expanded from a language map as follows:
							// Initialize expanded value to an empty array.
							let mut expanded_value = Vec::new();

							// Initialize direction to the default base direction from active context.
							let mut direction = active_context.default_base_direction();

							// If key's term definition in active context has a
							// direction mapping, update direction with that value.
							if let Some(key_definition) = key_definition {
								if let Some(key_direction) = key_definition.direction() {
									direction = key_direction.option()
								}
							}

							// For each key-value pair language-language value in
							// value, ordered lexicographically by language if ordered is true:
							let mut language_entries: Vec<&Entry> =
								Vec::with_capacity(value.len());
							for language_entry in value.iter() {
								language_entries.push(language_entry);
							}

							if options.ordered {
								language_entries.sort_by(|a, b| a.key.cmp(&b.key));
							}

							for Entry {
								key: language,
								value: language_value,
							} in language_entries
							{
								// If language value is not an array set language value to
								// an array containing only language value.
								let language_value = Value::force_as_array(language_value);

								// For each item in language value:
								for item in language_value {
									match item {
										// If item is null, continue to the next entry in
										// language value.
										Value::Null => (),
										Value::String(item) => {
											// If language is @none, or expands to
											// @none, remove @language from v.
											let language = if expand_iri(
												active_context,
												Nullable::Some(language.as_str()),
												false,
												true,
											) == Term::Keyword(Keyword::None)
											{
												None
											} else {
												let (language, error) = LenientLangTagBuf::new(
													language.as_str().to_lowercase(),
												);

												if error.is_some() {
													log::warn!(
														"malformed language tag `{language}`"
													);
												}

												Some(language)
											};

											// initialize a new map v consisting of two
											// key-value pairs: (@value-item) and
											// (@language-language).
											let mut v = Object::default();
											v.insert(
												"@value".into(),
												Value::String(item.clone()),
											);

											if let Some(language) = language {
												v.insert(
													"@language".into(),
													Value::String(
														language.into_string().into(),
													),
												);
											}

											if let Some(direction) = direction {
												v.insert(
													"@direction".into(),
													Value::String(direction.as_str().into()),
												);
											}

											// Append v to expanded value.
											expanded_value.push(Value::Object(v))
										}
										_ => {
											// item must be a string, otherwise an
											// invalid language map value error has
											// been detected and processing is aborted.
											return Err(Error::InvalidLanguageMapValue);
										}
									}
								}
							}

							Expanded::Array(expanded_value)
						}
						Some(value)
							if container_mapping.contains(ContainerKind::Index)
								|| container_mapping.contains(ContainerKind::Type)
								|| container_mapping.contains(ContainerKind::Id) =>
						{
							// Otherwise, if container mapping includes @index, @type, or @id and value
							// is a map then value is expanded from a map as follows:

							// Initialize expanded value to an empty array.
							let mut expanded_value: Vec<Value> = Vec::new();

							// Initialize `index_key` to the key's index mapping in
							// `active_context`, or @index, if it does not exist.
							let index_key = key_definition
								.and_then(|d| d.index())
								.unwrap_or("@index");

							// For each key-value pair index-index value in value,
							// ordered lexicographically by index if ordered is true:
							let mut entries: Vec<&Entry> = Vec::with_capacity(value.len());
							for map_entry in value.iter() {
								entries.push(map_entry)
							}

							if options.ordered {
								entries.sort_by(|a, b| a.key.cmp(&b.key));
							}

							for Entry {
								key: index,
								value: index_value,
							} in entries
							{
								// If container mapping includes @id or @type,
								// initialize `map_context` to the `previous_context`
								// from `active_context` if it exists, otherwise, set
								// `map_context` to `active_context`.
								let mut map_context = Mown::Borrowed(active_context);
								if container_mapping.contains(ContainerKind::Type)
									|| container_mapping.contains(ContainerKind::Id)
								{
									if let Some(previous_context) =
										active_context.previous_context()
									{
										map_context = Mown::Borrowed(previous_context)
									}
								}

								// If container mapping includes @type and
								// index's term definition in map context has a
								// local context, update map context to the result of
								// the Context Processing algorithm, passing
								// map context as active context the value of the
								// index's local context as local context and base URL
								// from the term definition for index in map context.
								if container_mapping.contains(ContainerKind::Type) {
									if let Some(index_definition) =
										map_context.get(index.as_str())
									{
										if let Some(local_context) = index_definition.context() {
											let base_url = index_definition.base_url().cloned();
											map_context = Mown::Owned(
												process_context(
													map_context.as_ref(),
													local_context,
													ProcessingStack::default(),
													loader,
													base_url,
													options.into(),
												)
												.await?,
											)
										}
									}
								}

								// Initialize `expanded_index` to the result of IRI
								// expanding index.
								let expanded_index = match expand_iri(
									active_context,
									Nullable::Some(index.as_str()),
									false,
									true,
								) {
									Term::Null | Term::Keyword(Keyword::None) => None,
									key => Some(key),
								};

								// Initialize index value to the result of using this
								// algorithm recursively, passing map context as
								// active context, key as active property,
								// index value as element, base URL, and `true` for
								// `from_map`.
								let expanded_index_value = Box::pin(expand_element(
									map_context.as_ref(),
									ActiveProperty::Some(key),
									index_value,
									base_url,
									loader,
									options,
									true,
								))
								.await?;

								// For each item in index value:
								for mut item in expanded_index_value {
									// If container mapping includes @graph,
									// and item is not a graph object, set item to
									// a new map containing the key-value pair
									// @graph-item, ensuring that the value is
									// represented using an array.
									if container_mapping.contains(ContainerKind::Graph)
										&& !is_graph_object(&item)
									{
										item = into_graph_object(item);
									}

									if let Some(expanded_index) = &expanded_index {
										// If `container_mapping` includes @index,
										// index key is not @index, and expanded index is
										// not @none:
										if container_mapping.contains(ContainerKind::Index)
											&& index_key != "@index"
										{
											// Initialize re-expanded index to the result
											// of calling the Value Expansion algorithm,
											// passing the active context, index key as
											// active property, and index as value.
											let re_expanded_index = expand_literal(
												active_context,
												ActiveProperty::Some(index_key),
												&Value::String(index.as_str().into()),
											);

											// Initialize expanded index key to the result
											// of IRI expanding index key.
											let expanded_index_key = match expand_iri(
												active_context,
												Nullable::Some(index_key),
												false,
												true,
											) {
												Term::Id(prop) => prop,
												_ => continue,
											};

											// Add the key-value pair (expanded index
											// key-index property values) to item.
											match &mut item {
												Value::Object(node)
													if entry(node, "@value").is_none() =>
												{
													add_values(
														node,
														expanded_index_key.as_str(),
														[re_expanded_index],
													);
												}
												_ => {
													// If item is a value object, it MUST NOT
													// contain any extra properties; an invalid
													// value object error has been detected and
													// processing is aborted.
													return Err(Error::InvalidValueObject);
												}
											}
										} else if container_mapping
											.contains(ContainerKind::Index)
											&& item
												.as_object()
												.map(|o| entry(o, "@index").is_none())
												.unwrap_or(false)
										{
											// Otherwise, if container mapping includes
											// @index, item does not have an entry @index,
											// and expanded index is not @none, add the
											// key-value pair (@index-index) to item.
											if let Value::Object(item) = &mut item {
												item.insert(
													"@index".into(),
													Value::String(index.as_str().into()),
												);
											}
										} else if container_mapping.contains(ContainerKind::Id)
											&& item
												.as_object()
												.map(|o| entry(o, "@id").is_none())
												.unwrap_or(false)
										{
											// Otherwise, if container mapping includes
											// @id item does not have the entry @id,
											// and expanded index is not @none, add the
											// key-value pair (@id-expanded index) to
											// item, where expanded index is set to the
											// result of IRI expanding index using true for
											// document relative and false for vocab.
											let expanded_index = expand_iri(
												active_context,
												Nullable::Some(index.as_str()),
												true,
												false,
											);

											if let (Value::Object(item), Some(id)) =
												(&mut item, term_to_id_string(expanded_index))
											{
												item.insert(
													"@id".into(),
													Value::String(id.into()),
												);
											}
										} else if container_mapping
											.contains(ContainerKind::Type)
										{
											// Otherwise, if container mapping includes
											// @type and expanded index is not @none,
											// initialize types to a new array consisting
											// of expanded index followed by any existing
											// values of @type in item. Add the key-value
											// pair (@type-types) to item.
											if expanded_index.is_keyword() {
												return Err(Error::InvalidTypeValue);
											}

											if let Value::Object(item) = &mut item {
												let mut types =
													vec![Value::String(
														expanded_index.as_str().into(),
													)];

												if let Some(removed) = item
													.remove_unique("@type")
													.ok()
													.flatten()
												{
													match removed.value {
														Value::Array(items) => {
															types.extend(items)
														}
														other => types.push(other),
													}
												}

												item.insert(
													"@type".into(),
													Value::Array(types),
												);
											}
										}
									}

									// Append item to expanded value.
									expanded_value.push(item)
								}
							}

							Expanded::Array(expanded_value)
						}
						_ => {
							// Otherwise, initialize expanded value to the result of using this
							// algorithm recursively, passing active context, key for active property,
							// value for element and base URL.
							Box::pin(expand_element(
								active_context,
								ActiveProperty::Some(key),
								value,
								base_url,
								loader,
								options,
								false,
							))
							.await?
						}
					}
				};

				let mut expanded_value = expanded_value;

				// If container mapping includes @list and expanded value is
				// not already a list object, convert expanded value to a list
				// object by first setting it to an array containing only
				// expanded value if it is not already an array, and then by
				// setting it to a map containing the key-value pair
				// @list-expanded value.
				if container_mapping.contains(ContainerKind::List) && !expanded_value.is_list() {
					let mut object = Object::default();
					object.insert(
						"@list".into(),
						Value::Array(expanded_value.into_iter().collect()),
					);
					expanded_value = Expanded::Object(Value::Object(object));
				}

				// If container mapping includes @graph, and includes neither
				// @id nor @index, convert expanded value into an array, if
				// necessary, then convert each value ev in expanded value
				// into a graph object:
				if container_mapping.contains(ContainerKind::Graph)
					&& !container_mapping.contains(ContainerKind::Id)
					&& !container_mapping.contains(ContainerKind::Index)
				{
					expanded_value = Expanded::Array(
						expanded_value.into_iter().map(into_graph_object).collect(),
					);
				}

				if !expanded_value.is_null() {
					// If the term definition associated to key indicates that it
					// is a reverse property:
					if is_reverse_property {
						// We must filter out anything that is not a node object.
						let mut reverse_expanded_nodes = Vec::new();
						for object in expanded_value {
							if object
								.as_object()
								.map(|o| {
									entry(o, "@value").is_some() || entry(o, "@list").is_some()
								})
								.unwrap_or(true)
							{
								return Err(Error::InvalidReversePropertyValue);
							}

							reverse_expanded_nodes.push(object);
						}

						let reverse_map = reverse_map_mut(&mut result);
						add_values(reverse_map, prop.as_str(), reverse_expanded_nodes);
					} else {
						// Otherwise, key is not a reverse property use add value
						// to add expanded value to the expanded property entry in
						// result using true for as array.
						add_values(&mut result, prop.as_str(), expanded_value);
					}
				}
			}

			Term::Id(prop) => {
				// non-keyword properties that do not include a ':' are skipped.
				if let Id::Invalid(name) = &prop {
					if options.policy.invalid.is_reject() {
						return Err(Error::KeyExpansionFailed(name.to_owned()));
					}
				}

				if !options.policy.allow_undefined {
					return Err(Error::KeyExpansionFailed(prop.as_str().to_string()));
				}
			}
		}
	}

	Ok((result, has_value_object_entries))
}

/// Returns a mutable reference to the `@reverse` map of the given node,
/// creating it if necessary.
fn reverse_map_mut(result: &mut Object) -> &mut Object {
	if result.get_unique("@reverse").ok().flatten().is_none() {
		result.insert("@reverse".into(), Value::Object(Object::default()));
	}

	result
		.get_unique_mut("@reverse")
		.ok()
		.flatten()
		.unwrap()
		.as_object_mut()
		.unwrap()
}
