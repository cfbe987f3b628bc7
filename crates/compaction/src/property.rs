use crate::{
	add_value, compact_collection_with, compact_iri, compact_iri_with, compact_key, is_id_entry,
	value_value, CompactFragment, Error, Options,
};
use jsonld_core::{
	expanded::{self, entry, is_graph_object, is_list_object, is_simple_graph_object,
		is_value_object},
	Container, Context, Id, Loader, Term,
};
use jsonld_syntax::{ContainerKind, Keyword};
use json_syntax::{Object, Value};

#[allow(clippy::too_many_arguments)]
async fn compact_property_list<'a, L>(
	list: &'a Value,
	expanded_index: Option<&'a str>,
	nest_result: &mut Object,
	container: Container,
	as_array: bool,
	item_active_property: &str,
	active_context: &'a Context,
	loader: &'a L,
	options: Options,
) -> Result<(), Error>
where
	L: Loader,
{
	// If expanded item is a list object:
	let items = expanded::list_of(list)
		.map(Value::force_as_array)
		.unwrap_or(&[]);

	let mut compacted_item = Box::pin(compact_collection_with(
		items.iter(),
		active_context,
		active_context,
		Some(item_active_property),
		loader,
		options,
	))
	.await?;

	// If compacted item is not an array,
	// then set `compacted_item` to an array containing only `compacted_item`.
	if !compacted_item.is_array() {
		let array = vec![compacted_item];
		compacted_item = Value::Array(array)
	}

	// If container does not include @list:
	if !container.contains(ContainerKind::List) {
		// Convert `compacted_item` to a list object by setting it to
		// a map containing an entry where the key is the result of
		// IRI compacting @list and the value is the original
		// compacted item.
		let key = compact_key(
			active_context,
			&Term::Keyword(Keyword::List),
			true,
			false,
			options,
		)?;
		let mut compacted_item_list_object = Object::default();
		compacted_item_list_object.insert(key.unwrap(), compacted_item);

		// If `expanded_item` contains the entry @index-value,
		// then add an entry to compacted item where the key is
		// the result of IRI compacting @index and value is value.
		if let Some(index) = expanded_index {
			let key = compact_key(
				active_context,
				&Term::Keyword(Keyword::Index),
				true,
				false,
				options,
			)?;

			compacted_item_list_object.insert(key.unwrap(), Value::String(index.into()));
		}

		compacted_item = Value::Object(compacted_item_list_object);

		// Use add value to add `compacted_item` to
		// the `item_active_property` entry in `nest_result` using `as_array`.
		add_value(nest_result, item_active_property, compacted_item, as_array)
	} else {
		// Otherwise, the container includes @list:
		// if `nest_result` already has the entry `item_active_property`,
		// a compaction to list of lists error has been detected and
		// processing is aborted.
		if entry(nest_result, item_active_property).is_some() {
			return Err(Error::CompactionToListOfLists);
		}

		// Otherwise, set the value of the item active property entry in nest result
		// to compacted item.
		nest_result.insert(item_active_property.into(), compacted_item);
	}

	Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn compact_property_graph<'a, L>(
	graph: &'a Value,
	expanded_index: Option<&'a str>,
	nest_result: &mut Object,
	container: Container,
	as_array: bool,
	item_active_property: &str,
	active_context: &'a Context,
	loader: &'a L,
	options: Options,
) -> Result<(), Error>
where
	L: Loader,
{
	// If expanded item is a graph object
	let graph_entry = expanded::graph_of(graph).cloned().unwrap_or(Value::Null);
	let graph_id = expanded::id_of(graph);

	let mut compacted_item = Box::pin(graph_entry.compact_fragment_full(
		active_context,
		active_context,
		Some(item_active_property),
		loader,
		options,
	))
	.await?;

	// If `container` includes @graph and @id:
	if container.contains(ContainerKind::Graph) && container.contains(ContainerKind::Id) {
		// Initialize `map_object` to the value of `item_active_property`
		// in `nest_result`, initializing it to a new empty map,
		// if necessary.
		let map_object = sub_object_mut(nest_result, item_active_property);

		// Initialize `map_key` by IRI compacting the value of @id in
		// `expanded_item` or @none if no such value exists
		// with `vocab` set to false if there is an @id entry in
		// `expanded_item`.
		let (id_value, vocab) = match graph_id {
			Some(id) => (Term::Id(Id::from_string(id.to_string())), false),
			None => (Term::Keyword(Keyword::None), true),
		};

		let map_key = compact_iri(active_context, &id_value, vocab, false, options)?.unwrap();

		// Use `add_value` to add `compacted_item` to
		// the `map_key` entry in `map_object` using `as_array`.
		add_value(map_object, &map_key, compacted_item, as_array)
	} else if container.contains(ContainerKind::Graph)
		&& container.contains(ContainerKind::Index)
		&& is_simple_graph_object(graph)
	{
		// Initialize `map_object` to the value of `item_active_property`
		// in `nest_result`, initializing it to a new empty map,
		// if necessary.
		let map_object = sub_object_mut(nest_result, item_active_property);

		// Initialize `map_key` the value of @index in `expanded_item`
		// or @none, if no such value exists.
		let map_key = expanded_index.unwrap_or("@none");

		// Use `add_value` to add `compacted_item` to
		// the `map_key` entry in `map_object` using `as_array`.
		add_value(map_object, map_key, compacted_item, as_array)
	} else if container.contains(ContainerKind::Graph) && is_simple_graph_object(graph) {
		// Otherwise, if `container` includes @graph and
		// `expanded_item` is a simple graph object
		// the value cannot be represented as a map object.

		// If `compacted_item` is an array with more than one value,
		// it cannot be directly represented,
		// as multiple objects would be interpreted as different named graphs.
		// Set `compacted_item` to a new map,
		// containing the key from IRI compacting @included and
		// the original `compacted_item` as the value.
		compacted_item = match compacted_item {
			Value::Array(items) if items.len() > 1 => {
				let key = compact_key(
					active_context,
					&Term::Keyword(Keyword::Included),
					true,
					false,
					options,
				)?
				.unwrap();
				let mut map = Object::default();
				map.insert(key, Value::Array(items));
				Value::Object(map)
			}
			item => item,
		};

		// Use `add_value` to add `compacted_item` to the
		// `item_active_property` entry in `nest_result` using `as_array`.
		add_value(nest_result, item_active_property, compacted_item, as_array)
	} else {
		// Otherwise, `container` does not include @graph or
		// otherwise does not match one of the previous cases.

		// Set `compacted_item` to a new map containing the key from
		// IRI compacting @graph using the original `compacted_item` as a value.
		let key = compact_key(
			active_context,
			&Term::Keyword(Keyword::Graph),
			true,
			false,
			options,
		)?
		.unwrap();
		let mut map = Object::default();
		map.insert(key, compacted_item);

		// If `expanded_item` contains an @id entry,
		// add an entry in `compacted_item` using the key from
		// IRI compacting @id using the value of
		// IRI compacting the value of @id in `expanded_item` using
		// false for vocab.
		if let Some(id) = graph_id {
			let key = compact_key(
				active_context,
				&Term::Keyword(Keyword::Id),
				false,
				false,
				options,
			)?
			.unwrap();
			let id = Term::Id(Id::from_string(id.to_string()));
			let value = compact_iri(active_context, &id, false, false, options)?;
			map.insert(
				key,
				match value {
					Some(s) => Value::String(s.into()),
					None => Value::Null,
				},
			);
		}

		// If `expanded_item` contains an @index entry,
		// add an entry in `compacted_item` using the key from
		// IRI compacting @index and the value of @index in `expanded_item`.
		if let Some(index) = expanded_index {
			let key = compact_key(
				active_context,
				&Term::Keyword(Keyword::Index),
				true,
				false,
				options,
			)?
			.unwrap();
			map.insert(key, Value::String(index.into()));
		}

		// Use `add_value` to add `compacted_item` to the
		// `item_active_property` entry in `nest_result` using `as_array`.
		let compacted_item = Value::Object(map);
		add_value(nest_result, item_active_property, compacted_item, as_array)
	}

	Ok(())
}

/// Returns a mutable reference to the object stored under `key` in `result`,
/// initializing it to a new empty map if necessary.
fn sub_object_mut<'a>(result: &'a mut Object, key: &str) -> &'a mut Object {
	if result.get_unique(key).ok().flatten().is_none() {
		result.insert(key.into(), Value::Object(Object::default()));
	}

	result
		.get_unique_mut(key)
		.ok()
		.flatten()
		.unwrap()
		.as_object_mut()
		.unwrap()
}

fn select_nest_result<'a>(
	result: &'a mut Object,
	active_context: &Context,
	item_active_property: &str,
	compact_arrays: bool,
) -> Result<(&'a mut Object, Container, bool), Error> {
	let (nest_result, container) = match active_context.get(item_active_property) {
		Some(term_definition) => {
			let nest_result = match term_definition.nest() {
				Some(nest_term) => {
					// If nest term is not @nest,
					// or a term in the active context that expands to @nest,
					// an invalid @nest value error has been detected,
					// and processing is aborted.
					if nest_term != "@nest" {
						match active_context.get(nest_term) {
							Some(term_def)
								if term_def.value() == Some(&Term::Keyword(Keyword::Nest)) => {}
							_ => return Err(Error::InvalidNestValue),
						}
					}

					// If result does not have a nest_term entry,
					// initialize it to an empty map.
					// Initialize `nest_result` to the value of `nest_term` in result.
					sub_object_mut(result, nest_term)
				}
				None => {
					// Otherwise, initialize `nest_result` to result.
					result
				}
			};

			(nest_result, term_definition.container())
		}
		None => (result, Container::None),
	};

	// Initialize container to container mapping for item active property
	// in active context, or to a new empty array,
	// if there is no such container mapping.
	// DONE.

	// Initialize `as_array` to true if `container` includes @set,
	// or if `item_active_property` is @graph or @list,
	// otherwise the negation of `options.compact_arrays`.
	let as_array = if container.contains(ContainerKind::Set)
		|| item_active_property == "@graph"
		|| item_active_property == "@list"
	{
		true
	} else {
		!compact_arrays
	};

	Ok((nest_result, container, as_array))
}

/// Compact the given property into the `result` compacted object.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn compact_property<'a, L>(
	result: &mut Object,
	expanded_property: Term,
	expanded_value: &'a [Value],
	active_context: &'a Context,
	loader: &'a L,
	inside_reverse: bool,
	options: Options,
) -> Result<(), Error>
where
	L: Loader,
{
	let mut is_empty = true;

	// For each item `expanded_item` in `expanded value`
	for expanded_item in expanded_value {
		is_empty = false;
		// Initialize `item_active_property` by IRI compacting `expanded_property`
		// using `expanded_item` for value and `inside_reverse` for `reverse`.
		let item_active_property = compact_iri_with(
			active_context,
			&expanded_property,
			expanded_item,
			true,
			inside_reverse,
			options,
		)?;

		// If the term definition for `item_active_property` in the active context
		// has a nest value entry (nest term)
		if let Some(item_active_property) = item_active_property {
			let (nest_result, container, as_array) = select_nest_result(
				result,
				active_context,
				&item_active_property,
				options.compact_arrays,
			)?;

			// Initialize `compacted_item` to the result of using this algorithm
			// recursively, passing `active_context`, `item_active_property` for
			// `active_property`, `expanded_item` for `element`, along with the
			// `compact_arrays` and `ordered_flags`.
			// If `expanded_item` is a list object or a graph object,
			// use the value of the @list or @graph entries, respectively,
			// for `element` instead of `expanded_item`.
			if is_list_object(expanded_item) {
				compact_property_list(
					expanded_item,
					expanded::index_of(expanded_item),
					nest_result,
					container,
					as_array,
					&item_active_property,
					active_context,
					loader,
					options,
				)
				.await?
			} else if is_graph_object(expanded_item) {
				compact_property_graph(
					expanded_item,
					expanded::index_of(expanded_item),
					nest_result,
					container,
					as_array,
					&item_active_property,
					active_context,
					loader,
					options,
				)
				.await?
			} else {
				let mut compacted_item = Box::pin(expanded_item.compact_fragment_full(
					active_context,
					active_context,
					Some(&item_active_property),
					loader,
					options,
				))
				.await?;

				// if container includes @language, @index, @id,
				// or @type and container does not include @graph:
				if !container.contains(ContainerKind::Graph)
					&& (container.contains(ContainerKind::Language)
						|| container.contains(ContainerKind::Index)
						|| container.contains(ContainerKind::Id)
						|| container.contains(ContainerKind::Type))
				{
					// Initialize `map_object` to the value of
					// `item_active_property` in `nest_result`,
					// initializing it to a new empty map, if necessary.
					let map_object = sub_object_mut(nest_result, &item_active_property);

					// Initialize container key by IRI compacting either
					// @language, @index, @id, or @type based on the contents of container.
					let container_type = if container.contains(ContainerKind::Language) {
						ContainerKind::Language
					} else if container.contains(ContainerKind::Index) {
						ContainerKind::Index
					} else if container.contains(ContainerKind::Id) {
						ContainerKind::Id
					} else {
						ContainerKind::Type
					};

					let mut container_key = compact_iri(
						active_context,
						&Term::Keyword(container_type.into()),
						true,
						false,
						options,
					)?;

					// Initialize `index_key` to the value of index mapping in
					// the term definition associated with `item_active_property`
					// in active context, or @index, if no such value exists.
					let index_key = active_context
						.get(&item_active_property)
						.and_then(|def| def.index());

					// If `container` includes @language and `expanded_item`
					// contains a @value entry, then set `compacted_item` to
					// the value associated with its @value entry.
					// Set `map_key` to the value of @language in `expanded_item`,
					// if any.
					let map_key = if container_type == ContainerKind::Language
						&& is_value_object(expanded_item)
					{
						if let Some(value_object) = expanded_item.as_object() {
							compacted_item = value_value(value_object)
						}

						expanded::language_of(expanded_item).map(ToOwned::to_owned)
					} else if container_type == ContainerKind::Index {
						match index_key {
							Some(index_key) if index_key != "@index" => {
								// Otherwise, if `container` includes @index and
								// `index_key` is not @index:

								// Reinitialize `container_key` by
								// IRI compacting `index_key`.
								container_key = compact_iri(
									active_context,
									&Term::Id(Id::from_string(index_key.to_string())),
									true,
									false,
									options,
								)?;

								// Set `map_key` to the first value of
								// `container_key` in `compacted_item`, if any.
								let (map_key, remaining_values) = extract_first_string(
									&mut compacted_item,
									container_key.as_deref().unwrap(),
								);

								// If there are remaining values in `compacted_item`
								// for container key, use `add_value` to add
								// those remaining values to the `container_key`
								// in `compacted_item`.
								if !remaining_values.is_empty() {
									if let Some(map) = compacted_item.as_object_mut() {
										for value in remaining_values {
											add_value(
												map,
												container_key.as_deref().unwrap(),
												value,
												false,
											)
										}
									}
								}

								map_key
							}
							_ => {
								// Otherwise, if `container` includes @index and
								// `index_key` is @index, set `map_key` to the value of
								// @index in `expanded_item`, if any.
								expanded::index_of(expanded_item).map(ToOwned::to_owned)
							}
						}
					} else if container_type == ContainerKind::Id {
						// Otherwise, if `container` includes @id,
						// set `map_key` to the value of `container_key` in
						// `compacted_item` and remove `container_key` from
						// `compacted_item`.
						compacted_item
							.as_object_mut()
							.and_then(|map| {
								map.remove_unique(container_key.as_deref().unwrap())
									.ok()
									.flatten()
									.and_then(|entry| {
										entry.value.as_str().map(ToOwned::to_owned)
									})
							})
					} else {
						// Otherwise, if container includes @type:

						// Set `map_key` to the first value of `container_key` in
						// `compacted_item`, if any.
						let (map_key, remaining_values) = extract_first_string(
							&mut compacted_item,
							container_key.as_deref().unwrap(),
						);

						// If there are remaining values in `compacted_item` for
						// `container_key`, use `add_value` to add those
						// remaining values to the `container_key` in
						// `compacted_item`.
						if !remaining_values.is_empty() {
							if let Some(map) = compacted_item.as_object_mut() {
								for value in remaining_values {
									add_value(
										map,
										container_key.as_deref().unwrap(),
										value,
										false,
									)
								}
							}
						}

						// If `compacted_item` contains a single entry with a key
						// expanding to @id, set `compacted_item` to the result of
						// using this algorithm recursively,
						// passing `active_context`, `item_active_property` for
						// `active_property`, and a map composed of the single
						// entry for @id from `expanded_item` for `element`.
						let recompact = compacted_item
							.as_object()
							.map(|map| is_id_entry(map, active_context))
							.unwrap_or(false);

						if recompact {
							let mut node_ref = Object::default();
							if let Some(id) = expanded::id_of(expanded_item) {
								node_ref
									.insert("@id".into(), Value::String(id.into()));
							}

							compacted_item = Box::pin(
								Value::Object(node_ref).compact_fragment_full(
									active_context,
									active_context,
									Some(&item_active_property),
									loader,
									options,
								),
							)
							.await?;
						}

						map_key
					};

					// If `map_key` is null, set it to the result of
					// IRI compacting @none.
					let map_key = match map_key {
						Some(key) => key,
						None => {
							let key = compact_iri(
								active_context,
								&Term::Keyword(Keyword::None),
								true,
								false,
								options,
							)?;
							key.unwrap()
						}
					};

					// Use `add_value` to add `compacted_item` to
					// the `map_key` entry in `map_object` using `as_array`.
					add_value(map_object, &map_key, compacted_item, as_array)
				} else {
					// Otherwise, use `add_value` to add `compacted_item` to the
					// `item_active_property` entry in `nest_result` using `as_array`.
					add_value(nest_result, &item_active_property, compacted_item, as_array)
				}
			}
		}
	}

	// If expanded value is an empty array:
	if is_empty {
		// Initialize `item_active_property` by IRI compacting
		// `expanded_property` using `expanded_value` for `value` and
		// `inside_reverse` for `reverse`.
		let item_active_property = compact_iri_with(
			active_context,
			&expanded_property,
			&Value::Object(Object::default()),
			true,
			inside_reverse,
			options,
		)?;

		// If the term definition for `item_active_property` in the active context
		// has a nest value entry (nest term):
		if let Some(item_active_property) = item_active_property {
			let (nest_result, _, _) = select_nest_result(
				result,
				active_context,
				&item_active_property,
				options.compact_arrays,
			)?;

			// Use `add_value` to add an empty array to the `item_active_property` entry in
			// `nest_result` using true for `as_array`.
			add_value(
				nest_result,
				&item_active_property,
				Value::Array(Vec::new()),
				true,
			)
		}
	}

	Ok(())
}

/// Removes the value of the entry `key` of the given compacted item, and
/// splits it into its first string value and the remaining values.
fn extract_first_string(compacted_item: &mut Value, key: &str) -> (Option<String>, Vec<Value>) {
	match compacted_item.as_object_mut() {
		Some(map) => match map.remove_unique(key).ok().flatten() {
			Some(removed) => match removed.value {
				Value::String(s) => (Some(s.to_string()), Vec::new()),
				Value::Array(values) => {
					let mut values = values.into_iter();
					match values.next() {
						Some(first_value) => (
							first_value.as_str().map(ToOwned::to_owned),
							values.collect(),
						),
						None => (None, Vec::new()),
					}
				}
				other => (None, vec![other]),
			},
			None => (None, Vec::new()),
		},
		_ => (None, Vec::new()),
	}
}
