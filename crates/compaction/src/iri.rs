use crate::Options;
use jsonld_core::{
	context::inverse::{LangSelection, Selection, TypeSelection},
	expanded::{self, is_graph_object, is_list_object, is_value_object},
	Container, Context, Id, ProcessingMode, Term, Type,
};
use jsonld_syntax::{utils::cmp_shortest_lex, Direction, LenientLangTag, Nullable};
use json_syntax::Value;
use std::cmp::Ordering;

pub struct IriConfusedWithPrefix;

/// Compact the given term without considering any value.
///
/// Calls [`compact_iri_full`] with `None` for `value`.
pub(crate) fn compact_iri(
	active_context: &Context,
	var: &Term,
	vocab: bool,
	reverse: bool,
	options: Options,
) -> Result<Option<String>, IriConfusedWithPrefix> {
	compact_iri_full(active_context, var, None, vocab, reverse, options)
}

pub(crate) fn compact_key(
	active_context: &Context,
	var: &Term,
	vocab: bool,
	reverse: bool,
	options: Options,
) -> Result<Option<json_syntax::object::Key>, IriConfusedWithPrefix> {
	Ok(compact_iri(active_context, var, vocab, reverse, options)?.map(Into::into))
}

/// Compact the given term considering the given value object.
///
/// Calls [`compact_iri_full`] with `Some(value)`.
pub(crate) fn compact_iri_with(
	active_context: &Context,
	var: &Term,
	value: &Value,
	vocab: bool,
	reverse: bool,
	options: Options,
) -> Result<Option<String>, IriConfusedWithPrefix> {
	compact_iri_full(active_context, var, Some(value), vocab, reverse, options)
}

enum TypeLangValue<'a> {
	Type(TypeSelection),
	Lang(LangSelection<'a>),
}

/// Parses the `@type` entry of an expanded value object.
fn item_type(value: &Value) -> Option<Type> {
	expanded::type_of(value).map(|ty| match ty {
		"@json" => Type::Json,
		ty => match iref::IriBuf::new(ty.to_string()) {
			Ok(iri) => Type::Iri(iri),
			Err(_) => Type::None,
		},
	})
}

/// Parses the `@language` and `@direction` entries of an expanded value
/// object.
fn item_lang_dir(value: &Value) -> (Option<&LenientLangTag>, Option<Direction>) {
	let language = expanded::language_of(value).map(|l| LenientLangTag::new(l).0);
	let direction = expanded::direction_of(value).and_then(|d| Direction::try_from(d).ok());
	(language, direction)
}

/// Compact the given term.
///
/// Default value for `value` is `None` and `false` for `vocab` and `reverse`.
pub(crate) fn compact_iri_full(
	active_context: &Context,
	var: &Term,
	value: Option<&Value>,
	vocab: bool,
	reverse: bool,
	options: Options,
) -> Result<Option<String>, IriConfusedWithPrefix> {
	if var.is_null() {
		return Ok(None);
	}

	if vocab {
		if let Some(entry) = active_context.inverse().get(var) {
			// Initialize containers to an empty array.
			// This array will be used to keep track of an ordered list of preferred container
			// mapping for a term, based on what is compatible with value.
			let mut containers = Vec::new();
			let mut type_lang_value = None;

			let has_index = value.map(|v| expanded::index_of(v).is_some()).unwrap_or(false);

			if let Some(value) = value {
				if expanded::index_of(value).is_some() && !is_graph_object(value) {
					containers.push(Container::Index);
					containers.push(Container::IndexSet);
				}
			}

			let mut is_simple_value = false; // value object with no type, no index, no language and no direction.
			let mut is_empty_list = false;

			if reverse {
				type_lang_value = Some(TypeLangValue::Type(TypeSelection::Reverse));
				containers.push(Container::Set);
			} else {
				match value {
					Some(value) if is_list_object(value) => {
						let list = expanded::list_of(value)
							.map(Value::force_as_array)
							.unwrap_or(&[]);

						if !has_index {
							containers.push(Container::List);
						}

						if list.is_empty() {
							is_empty_list = true;
						}

						let mut common_type = None;
						let mut common_lang_dir = None;

						if list.is_empty() {
							common_lang_dir = Some(Nullable::Some((
								active_context.default_language(),
								active_context.default_base_direction(),
							)))
						} else {
							for item in list {
								let mut item_ty = None;
								let mut item_lang = None;
								let mut is_value = false;

								if is_value_object(item) {
									is_value = true;
									let (language, direction) = item_lang_dir(item);
									if language.is_some() || direction.is_some() {
										item_lang = Some(Nullable::Some((language, direction)))
									} else {
										match item_type(item) {
											Some(ty) => item_ty = Some(ty),
											None => item_lang = Some(Nullable::Null),
										}
									}
								} else {
									item_ty = Some(Type::Id)
								}

								if common_lang_dir.is_none() {
									common_lang_dir = item_lang
								} else if is_value && common_lang_dir != item_lang {
									common_lang_dir = Some(Nullable::Some((None, None)))
								}

								if common_type.is_none() {
									common_type = Some(item_ty)
								} else if *common_type.as_ref().unwrap() != item_ty {
									common_type = Some(None)
								}

								if common_lang_dir == Some(Nullable::Some((None, None)))
									&& common_type == Some(None)
								{
									break;
								}
							}
						}

						if common_lang_dir.is_none() {
							common_lang_dir = Some(Nullable::Some((None, None)))
						}
						let common_lang_dir = common_lang_dir.unwrap();

						if common_type.is_none() {
							common_type = Some(None)
						}
						let common_type = common_type.unwrap();

						if let Some(common_type) = common_type {
							type_lang_value =
								Some(TypeLangValue::Type(TypeSelection::Type(common_type)))
						} else {
							type_lang_value =
								Some(TypeLangValue::Lang(LangSelection::Lang(common_lang_dir)))
						}
					}
					Some(value) if is_graph_object(value) => {
						// Otherwise, if value is a graph object, prefer a mapping most
						// appropriate for the particular value.
						if has_index {
							// If value contains an @index entry, append the values
							// @graph@index and @graph@index@set to containers.
							containers.push(Container::GraphIndex);
							containers.push(Container::GraphIndexSet);
						}

						if expanded::id_of(value).is_some() {
							// If value contains an @id entry, append the values @graph@id and
							// @graph@id@set to containers.
							containers.push(Container::GraphId);
							containers.push(Container::GraphIdSet);
						}

						// Append the values @graph, @graph@set, and @set to containers.
						containers.push(Container::Graph);
						containers.push(Container::GraphSet);
						containers.push(Container::Set);

						if !has_index {
							// If value does not contain an @index entry, append the values
							// @graph@index and @graph@index@set to containers.
							containers.push(Container::GraphIndex);
							containers.push(Container::GraphIndexSet);
						}

						if expanded::id_of(value).is_none() {
							// If the value does not contain an @id entry, append the values
							// @graph@id and @graph@id@set to containers.
							containers.push(Container::GraphId);
							containers.push(Container::GraphIdSet);
						}

						// Append the values @index and @index@set to containers.
						containers.push(Container::Index);
						containers.push(Container::IndexSet);

						type_lang_value = Some(TypeLangValue::Type(TypeSelection::Type(Type::Id)))
					}
					Some(value) if is_value_object(value) => {
						// If value is a value object:
						let (language, direction) = item_lang_dir(value);
						if (language.is_some() || direction.is_some()) && !has_index {
							type_lang_value = Some(TypeLangValue::Lang(LangSelection::Lang(
								Nullable::Some((language, direction)),
							)));
							containers.push(Container::Language);
							containers.push(Container::LanguageSet)
						} else if let Some(ty) = item_type(value) {
							type_lang_value =
								Some(TypeLangValue::Type(TypeSelection::Type(ty)))
						} else {
							is_simple_value =
								language.is_none() && direction.is_none() && !has_index
						}

						containers.push(Container::Set)
					}
					_ => {
						// Otherwise, set type/language to @type and set type/language value
						// to @id, and append @id, @id@set, @type, and @set@type, to containers.
						type_lang_value = Some(TypeLangValue::Type(TypeSelection::Type(Type::Id)));
						containers.push(Container::Id);
						containers.push(Container::IdSet);
						containers.push(Container::Type);
						containers.push(Container::TypeSet);

						containers.push(Container::Set)
					}
				}
			}

			containers.push(Container::None);

			if options.processing_mode != ProcessingMode::JsonLd1_0 && !has_index {
				containers.push(Container::Index);
				containers.push(Container::IndexSet)
			}

			if options.processing_mode != ProcessingMode::JsonLd1_0 && is_simple_value {
				containers.push(Container::Language);
				containers.push(Container::LanguageSet)
			}

			// If type/language value is @reverse, append @reverse to preferred values.
			let selection = if is_empty_list {
				Selection::Any
			} else {
				match type_lang_value {
					Some(TypeLangValue::Type(type_value)) => {
						let mut selection: Vec<TypeSelection> = Vec::new();

						if type_value == TypeSelection::Reverse {
							selection.push(TypeSelection::Reverse);
						}

						let mut has_id_type = false;
						if let Some(value) = value {
							if let Some(id) = expanded::id_of(value) {
								if type_value == TypeSelection::Type(Type::Id)
									|| type_value == TypeSelection::Reverse
								{
									has_id_type = true;

									// Compact the `@id` value and check whether the
									// chosen term round-trips to the same identifier,
									// to decide between `@vocab` and `@id` coercion.
									let term = Term::Id(Id::from_string(id.to_string()));
									let mut prefers_vocab = false;
									let compacted_iri = compact_iri(
										active_context,
										&term,
										true,
										false,
										options,
									)?;

									if let Some(compacted_iri) = compacted_iri {
										if let Some(def) =
											active_context.get_normal(compacted_iri.as_str())
										{
											if let Some(iri_mapping) = &def.value {
												prefers_vocab = iri_mapping.as_str() == id;
											}
										}
									}

									if prefers_vocab {
										selection.push(TypeSelection::Type(Type::Vocab));
										selection.push(TypeSelection::Type(Type::Id));
									} else {
										selection.push(TypeSelection::Type(Type::Id));
										selection.push(TypeSelection::Type(Type::Vocab));
									}

									selection.push(TypeSelection::Type(Type::None));
								}
							}
						}

						if !has_id_type {
							selection.push(type_value);
							selection.push(TypeSelection::Type(Type::None));
						}

						selection.push(TypeSelection::Any);

						Selection::Type(selection)
					}
					Some(TypeLangValue::Lang(lang_value)) => {
						let mut selection = vec![
							lang_value,
							LangSelection::Lang(Nullable::Some((None, None))),
							LangSelection::Any,
						];

						if let LangSelection::Lang(Nullable::Some((Some(_), Some(dir)))) =
							lang_value
						{
							selection.push(LangSelection::Lang(Nullable::Some((None, Some(dir)))));
						}

						Selection::Lang(selection)
					}
					None => Selection::Lang(vec![
						LangSelection::Lang(Nullable::Null),
						LangSelection::Lang(Nullable::Some((None, None))),
						LangSelection::Any,
					]),
				}
			};

			if let Some(term) = entry.select(&containers, &selection) {
				return Ok(Some(term.to_string()));
			}
		}

		// At this point, there is no simple term that var can be compacted to.
		// If vocab is true and active context has a vocabulary mapping:
		if let Some(vocab_mapping) = active_context.vocabulary() {
			// If var begins with the vocabulary mapping's value but is longer, then initialize
			// suffix to the substring of var that does not match. If suffix does not have a term
			// definition in active context, then return suffix.
			if let Some(suffix) = var.as_str().strip_prefix(vocab_mapping.as_str()) {
				if !suffix.is_empty() && active_context.get(suffix).is_none() {
					return Ok(Some(suffix.to_string()));
				}
			}
		}
	}

	// The var could not be compacted using the active context's vocabulary mapping.
	// Try to create a compact IRI, starting by initializing compact IRI to null.
	// This variable will be used to store the created compact IRI, if any.
	let mut compact_iri = String::new();

	// For each term definition definition in active context:
	for (key, definition) in active_context.definitions().iter() {
		// If the IRI mapping of definition is null, its IRI mapping equals var,
		// its IRI mapping is not a substring at the beginning of var,
		// or definition does not have a true prefix flag,
		// definition's key cannot be used as a prefix.
		// Continue with the next definition.
		match definition.value.as_ref() {
			Some(iri_mapping) if definition.prefix => {
				if let Some(suffix) = var.as_str().strip_prefix(iri_mapping.as_str()) {
					if !suffix.is_empty() {
						// Initialize candidate by concatenating definition key,
						// a colon (:),
						// and the substring of var that follows after the value of the definition's IRI mapping.
						let mut candidate = key.to_string();
						candidate.push(':');
						candidate.push_str(suffix);

						// If either compact IRI is null,
						// candidate is shorter or the same length but lexicographically less than
						// compact IRI and candidate does not have a term definition in active
						// context, or if that term definition has an IRI mapping that equals var
						// and value is null, set compact IRI to candidate.
						let candidate_def = active_context.get(candidate.as_str());
						let candidate_usable = match candidate_def {
							None => true,
							Some(def) => {
								value.is_none()
									&& def.value().map(|v| v.as_str() == var.as_str()).unwrap_or(false)
							}
						};

						if (compact_iri.is_empty()
							|| cmp_shortest_lex(&candidate, &compact_iri) == Ordering::Less)
							&& candidate_usable
						{
							compact_iri = candidate
						}
					}
				}
			}
			_ => (),
		}
	}

	// If compact IRI is not null, return compact IRI.
	if !compact_iri.is_empty() {
		return Ok(Some(compact_iri));
	}

	// To ensure that the IRI var is not confused with a compact IRI,
	// if the IRI scheme of var matches any term in active context with prefix flag set to true,
	// and var has no IRI authority (preceded by double-forward-slash (//),
	// an IRI confused with prefix error has been detected, and processing is aborted.
	if let Some(iri) = var.as_iri() {
		if iri.authority().is_none() {
			if let Some(definition) = active_context.get_normal(iri.scheme().as_str()) {
				if definition.prefix {
					return Err(IriConfusedWithPrefix);
				}
			}
		}
	}

	// If vocab is false,
	// transform var to a relative IRI reference using the base IRI from active context,
	// if it exists.
	if !vocab && options.compact_to_relative {
		if let Some(base_iri) = active_context.base_iri() {
			if let Some(iri) = var.as_iri() {
				return Ok(Some(iri.relative_to(base_iri).to_string()));
			}
		}
	}

	// Finally, return var as is.
	Ok(Some(var.as_str().to_string()))
}
