use crate::{expand_iri, ActiveProperty};
use jsonld_core::{Context, Term, Type};
use jsonld_syntax::Nullable;
use json_syntax::{Object, Value};

/// Expand a scalar value into a value object, using the
/// [Value Expansion algorithm](https://www.w3.org/TR/json-ld11-api/#value-expansion).
pub(crate) fn expand_literal(
	active_context: &Context,
	active_property: ActiveProperty,
	value: &Value,
) -> Value {
	let definition = active_property.get_from(active_context);
	let type_mapping = definition.and_then(|d| d.typ().cloned());

	if let Some(s) = value.as_str() {
		match type_mapping {
			// If the `active_property` has a type mapping in active context that is
			// `@id`, and the value is a string, return a new map containing a single
			// entry where the key is `@id` and the value is the result of IRI
			// expanding value using `true` for document relative and `false` for
			// vocab.
			Some(Type::Id) => {
				let id = expand_iri(active_context, Nullable::Some(s), true, false);
				if !id.is_null() {
					let mut object = Object::default();
					object.insert("@id".into(), Value::String(id.as_str().into()));
					return Value::Object(object);
				}
			}
			// If `active_property` has a type mapping in active context that is
			// `@vocab`, and the value is a string, return a new map containing a
			// single entry where the key is `@id` and the value is the result of IRI
			// expanding value using `true` for document relative.
			Some(Type::Vocab) => {
				let id = expand_iri(active_context, Nullable::Some(s), true, true);
				if !id.is_null() {
					let mut object = Object::default();
					object.insert("@id".into(), Value::String(id.as_str().into()));
					return Value::Object(object);
				}
			}
			_ => (),
		}
	}

	// Otherwise, initialize result to a map with an `@value` entry whose value
	// is set to value.
	let mut result = Object::default();
	result.insert("@value".into(), value.clone());

	match type_mapping {
		// If `active_property` has a type mapping in active context, other than
		// `@id`, `@vocab`, or `@none`, add `@type` to result and set its value to
		// the value associated with the type mapping.
		Some(Type::Iri(iri)) => {
			result.insert("@type".into(), Value::String(iri.as_str().into()));
		}
		Some(Type::Json) => {
			result.insert("@type".into(), Value::String("@json".into()));
		}
		Some(Type::None) | Some(Type::Id) | Some(Type::Vocab) | None => {
			// Otherwise, if value is a string:
			if value.is_string() {
				// Initialize `language` to any language mapping in the term
				// definition, if any, otherwise to the default language of
				// `active_context`, if any.
				let language = match definition.and_then(|d| d.language()) {
					Some(Nullable::Some(language)) => Some(language.as_str().to_string()),
					Some(Nullable::Null) => None,
					None => active_context
						.default_language()
						.map(|l| l.as_str().to_string()),
				};

				// Initialize `direction` to any direction mapping in the term
				// definition, if any, otherwise to the default base direction of
				// `active_context`, if any.
				let direction = match definition.and_then(|d| d.direction()) {
					Some(Nullable::Some(direction)) => Some(direction),
					Some(Nullable::Null) => None,
					None => active_context.default_base_direction(),
				};

				if let Some(language) = language {
					result.insert("@language".into(), Value::String(language.into()));
				}

				if let Some(direction) = direction {
					result.insert("@direction".into(), Value::String(direction.as_str().into()));
				}
			}
		}
	}

	Value::Object(result)
}

/// Renders an expanded term as a node identifier string.
pub(crate) fn term_to_id_string(term: Term) -> Option<String> {
	match term {
		Term::Null => None,
		Term::Id(id) => Some(id.into_string()),
		Term::Keyword(k) => Some(k.into_str().to_string()),
	}
}
