use crate::{
	expand_array, expand_iri, expand_literal, expand_node, expand_value, Error, Expanded, Options,
};
use iref::IriBuf;
use jsonld_context_processing::{algorithm::process_context, Options as ProcessingOptions,
	ProcessingStack};
use jsonld_core::{context::TermDefinitionRef, Context, Loader, Term};
use jsonld_syntax::{Keyword, Nullable};
use json_syntax::{object::Entry, Value};
use mown::Mown;
use std::borrow::Cow;

/// Expanded key-value entry of the object being expanded.
pub(crate) struct ExpandedEntry<'a>(pub &'a str, pub Term, pub &'a Value);

/// Key under which the element being expanded appears, if any.
#[derive(Clone, Copy)]
pub(crate) enum ActiveProperty<'a> {
	Some(&'a str),
	None,
}

impl<'a> ActiveProperty<'a> {
	pub fn is_some(&self) -> bool {
		matches!(self, Self::Some(_))
	}

	pub fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}

	pub fn get_from<'c>(&self, context: &'c Context) -> Option<TermDefinitionRef<'c>> {
		match self {
			Self::Some(s) => context.get(s),
			Self::None => None,
		}
	}
}

impl<'a> PartialEq<Keyword> for ActiveProperty<'a> {
	fn eq(&self, other: &Keyword) -> bool {
		match self {
			Self::Some(s) => *s == other.into_str(),
			_ => false,
		}
	}
}

/// Result of the expansion of a single element in a JSON-LD document.
pub(crate) type ElementExpansionResult = Result<Expanded, Error>;

/// Expand an element.
///
/// See <https://www.w3.org/TR/json-ld11-api/#expansion-algorithm>.
/// The default specified value for `ordered` and `from_map` is `false`.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn expand_element<'a, L>(
	active_context: &'a Context,
	active_property: ActiveProperty<'a>,
	element: &'a Value,
	base_url: Option<&'a IriBuf>,
	loader: &'a L,
	options: Options,
	from_map: bool,
) -> ElementExpansionResult
where
	L: Loader,
{
	// If `element` is null, return null.
	if element.is_null() {
		return Ok(Expanded::Null);
	}

	let active_property_definition = active_property.get_from(active_context);

	// If `active_property` has a term definition in `active_context` with a local context,
	// initialize property-scoped context to that local context.
	let mut property_scoped_base_url = None;
	let property_scoped_context = if let Some(definition) = active_property_definition {
		if let Some(base_url) = definition.base_url() {
			property_scoped_base_url = Some(base_url.clone());
		}

		definition.context()
	} else {
		None
	};

	match element {
		Value::Null => unreachable!(),
		Value::Array(element) => {
			expand_array(
				active_context,
				active_property,
				active_property_definition,
				element,
				base_url,
				loader,
				options,
				from_map,
			)
			.await
		}

		Value::Object(element) => {
			// Preliminary key expansions.
			let mut preliminary_value_entry = false;
			let mut preliminary_id_entry = false;
			for Entry { key, .. } in element.entries() {
				match expand_iri(active_context, Nullable::Some(key.as_str()), false, true) {
					Term::Keyword(Keyword::Value) => preliminary_value_entry = true,
					Term::Keyword(Keyword::Id) => preliminary_id_entry = true,
					_ => (),
				}
			}

			// Otherwise element is a map.
			// If `active_context` has a `previous_context`, the active context is not
			// propagated.
			let mut active_context = Mown::Borrowed(active_context);
			if let Some(previous_context) = active_context.previous_context() {
				// If `from_map` is undefined or false, and `element` does not contain an entry
				// expanding to `@value`, and `element` does not consist of a single entry
				// expanding to `@id` (where entries are IRI expanded), set active context to
				// previous context from active context, as the scope of a term-scoped context
				// does not apply when processing new node objects.
				if !from_map
					&& !preliminary_value_entry
					&& !(element.len() == 1 && preliminary_id_entry)
				{
					active_context = Mown::Owned(previous_context.clone())
				}
			}

			// If `property_scoped_context` is defined, set `active_context` to the result of
			// the Context Processing algorithm, passing `active_context`,
			// `property_scoped_context` as `local_context`, `base_url` from the term
			// definition for `active_property`, in `active_context` and `true` for
			// `override_protected`.
			if let Some(property_scoped_context) = property_scoped_context {
				let options: ProcessingOptions = options.into();
				active_context = Mown::Owned(
					process_context(
						active_context.as_ref(),
						property_scoped_context,
						ProcessingStack::default(),
						loader,
						property_scoped_base_url,
						options.with_override(),
					)
					.await?,
				);
			}

			// If `element` contains the entry `@context`, set `active_context` to the result
			// of the Context Processing algorithm, passing `active_context`, the value of the
			// `@context` entry as `local_context` and `base_url`.
			if let Some(local_context) = element
				.get_unique("@context")
				.map_err(|_| Error::duplicate_key("@context"))?
			{
				active_context = Mown::Owned(
					process_context(
						active_context.as_ref(),
						local_context,
						ProcessingStack::default(),
						loader,
						base_url.cloned(),
						options.into(),
					)
					.await?,
				);
			}

			let entries: Cow<[Entry]> = if options.ordered {
				let mut entries = element.entries().to_vec();
				entries.sort_by(|a, b| a.key.cmp(&b.key));
				Cow::Owned(entries)
			} else {
				Cow::Borrowed(element.entries())
			};

			let mut type_entries: Vec<&Entry> = Vec::new();
			for entry @ Entry { key, .. } in entries.iter() {
				let expanded_key = expand_iri(
					active_context.as_ref(),
					Nullable::Some(key.as_str()),
					false,
					true,
				);

				if let Term::Keyword(Keyword::Type) = expanded_key {
					type_entries.push(entry);
				}
			}

			type_entries.sort_by(|a, b| a.key.cmp(&b.key));

			// Initialize `type_scoped_context` to `active_context`.
			// This is used for expanding values that may be relevant to any previous
			// type-scoped context.
			let type_scoped_context = active_context.as_ref();
			let mut active_context = Mown::Borrowed(active_context.as_ref());

			// For each `key` and `value` in `element` ordered lexicographically by key where
			// key IRI expands to @type:
			for Entry { value, .. } in &type_entries {
				// Convert `value` into an array, if necessary.
				let value = Value::force_as_array(value);

				// For each `term` which is a value of `value` ordered lexicographically,
				let mut sorted_value = Vec::with_capacity(value.len());
				for term in value {
					if let Some(s) = term.as_str() {
						sorted_value.push(s);
					}
				}

				sorted_value.sort_unstable();

				// if `term` is a string, and `term`'s term definition in `type_scoped_context`
				// has a `local_context`,
				for term in sorted_value {
					if let Some(term_definition) = type_scoped_context.get(term) {
						if let Some(local_context) = term_definition.context() {
							// set `active_context` to the result of
							// Context Processing algorithm, passing `active_context`, the value of the
							// `term`'s local context as `local_context`, `base_url` from the term
							// definition for value in `active_context`, and `false` for `propagate`.
							let base_url = term_definition.base_url().cloned();
							let options: ProcessingOptions = options.into();
							active_context = Mown::Owned(
								process_context(
									active_context.as_ref(),
									local_context,
									ProcessingStack::default(),
									loader,
									base_url,
									options.without_propagation(),
								)
								.await?,
							);
						}
					}
				}
			}

			// Initialize `input_type` to expansion of the last value of the first entry in
			// `element` expanding to `@type` (if any), ordering entries lexicographically by
			// key.
			// Both the key and value of the matched entry are IRI expanded.
			let input_type = type_entries.first().and_then(|Entry { value, .. }| {
				let value = Value::force_as_array(value);
				value.last().and_then(|input_type| {
					input_type.as_str().map(|input_type_str| {
						expand_iri(
							active_context.as_ref(),
							Nullable::Some(input_type_str),
							false,
							true,
						)
					})
				})
			});

			let mut expanded_entries: Vec<ExpandedEntry> = Vec::with_capacity(element.len());
			let mut list_entry = None;
			let mut set_entry = None;
			let mut value_entry = None;
			for Entry { key, value } in entries.iter() {
				if key.is_empty() {
					log::warn!("empty term");
				}

				let expanded_key = expand_iri(
					active_context.as_ref(),
					Nullable::Some(key.as_str()),
					false,
					true,
				);

				match &expanded_key {
					Term::Keyword(Keyword::Value) => value_entry = Some(value.clone()),
					Term::Keyword(Keyword::List) => {
						if active_property.is_some() && active_property != Keyword::Graph {
							list_entry = Some(value.clone())
						}
					}
					Term::Keyword(Keyword::Set) => set_entry = Some(value.clone()),
					Term::Id(id) if id.is_blank() => {
						log::warn!("blank node identifier `{id}` used as property");
					}
					_ => (),
				}

				expanded_entries.push(ExpandedEntry(key.as_str(), expanded_key, value))
			}

			if let Some(list_entry) = list_entry {
				// List objects.
				let mut index = None;
				for ExpandedEntry(_, expanded_key, value) in expanded_entries {
					match expanded_key {
						Term::Keyword(Keyword::Index) => match value.as_str() {
							Some(value) => index = Some(value.to_string()),
							None => return Err(Error::InvalidIndexValue),
						},
						Term::Keyword(Keyword::List) => (),
						_ => return Err(Error::InvalidSetOrListObject),
					}
				}

				// Initialize expanded value to the result of using this algorithm
				// recursively passing active context, active property, value for element,
				// base URL, and the ordered flags, ensuring that the
				// result is an array.
				let mut result = Vec::new();
				let list_entry = Value::force_as_array(&list_entry);
				for item in list_entry {
					let e = Box::pin(expand_element(
						active_context.as_ref(),
						active_property,
						item,
						base_url,
						loader,
						options,
						false,
					))
					.await?;

					// A list object may not contain another list object.
					if e.is_list() {
						return Err(Error::ListOfLists);
					}

					result.extend(e)
				}

				let mut object = json_syntax::Object::default();
				object.insert("@list".into(), Value::Array(result));
				if let Some(index) = index {
					object.insert("@index".into(), Value::String(index.into()));
				}

				Ok(Expanded::Object(Value::Object(object)))
			} else if let Some(set_entry) = set_entry {
				// Set objects.
				for ExpandedEntry(_, expanded_key, _) in expanded_entries {
					match expanded_key {
						Term::Keyword(Keyword::Index) => {
							// having an `@index` here is tolerated,
							// but is ignored.
						}
						Term::Keyword(Keyword::Set) => (),
						_ => return Err(Error::InvalidSetOrListObject),
					}
				}

				// set expanded value to the result of using this algorithm recursively,
				// passing active context, active property, value for element, base URL,
				// and ordered flags.
				Box::pin(expand_element(
					active_context.as_ref(),
					active_property,
					&set_entry,
					base_url,
					loader,
					options,
					false,
				))
				.await
			} else if let Some(value_entry) = value_entry {
				// Value objects.
				let expanded_value = expand_value(
					options,
					input_type,
					type_scoped_context,
					expanded_entries,
					&value_entry,
				)?;

				match expanded_value {
					Some(value) => Ok(Expanded::Object(value)),
					None => Ok(Expanded::Null),
				}
			} else {
				// Node objects.
				let e = expand_node(
					active_context.as_ref(),
					type_scoped_context,
					active_property,
					expanded_entries,
					base_url,
					loader,
					options,
				)
				.await?;

				match e {
					Some(result) => Ok(Expanded::Object(result)),
					None => Ok(Expanded::Null),
				}
			}
		}

		_ => {
			// Literals.

			// If element is a scalar (bool, int, string, null),
			// If `active_property` is `null` or `@graph`, drop the free-floating scalar by
			// returning null.
			if active_property.is_none() || active_property == Keyword::Graph {
				return Ok(Expanded::Null);
			}

			// If `property_scoped_context` is defined, set `active_context` to the result of the
			// Context Processing algorithm, passing `active_context`, `property_scoped_context` as
			// local context, and `base_url` from the term definition for `active_property` in
			// `active context`.
			let active_context = if let Some(property_scoped_context) = property_scoped_context {
				let result = process_context(
					active_context,
					property_scoped_context,
					ProcessingStack::default(),
					loader,
					property_scoped_base_url,
					options.into(),
				)
				.await?;
				Mown::Owned(result)
			} else {
				Mown::Borrowed(active_context)
			};

			// Return the result of the Value Expansion algorithm, passing the `active_context`,
			// `active_property`, and `element` as value.
			Ok(Expanded::Object(expand_literal(
				active_context.as_ref(),
				active_property,
				element,
			)))
		}
	}
}
