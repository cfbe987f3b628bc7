use crate::{expand_iri, Error, ExpandedEntry, Options};
use jsonld_core::{Context, ProcessingMode, Term};
use jsonld_syntax::{Keyword, LenientLangTagBuf, Nullable};
use json_syntax::{Object, Value};

pub(crate) type ValueExpansionResult = Result<Option<Value>, Error>;

/// Expand a value object.
pub(crate) fn expand_value(
	options: Options,
	input_type: Option<Term>,
	type_scoped_context: &Context,
	expanded_entries: Vec<ExpandedEntry>,
	value_entry: &Value,
) -> ValueExpansionResult {
	let mut is_json = input_type
		.as_ref()
		.map(|t| *t == Term::Keyword(Keyword::Json))
		.unwrap_or(false);
	let mut ty = None;
	let mut index = None;
	let mut language = None;
	let mut direction = None;

	for ExpandedEntry(_, expanded_key, value) in expanded_entries {
		match expanded_key {
			// If expanded property is @language:
			Term::Keyword(Keyword::Language) => {
				// If value is not a string, an invalid language-tagged string
				// error has been detected and processing is aborted.
				if let Some(value) = value.as_str() {
					// Otherwise, set expanded value to value. If value is not
					// well-formed according to section 2.2.9 of [BCP47],
					// processors SHOULD issue a warning.
					if value != "@none" {
						let (tag, error) = LenientLangTagBuf::new(value.to_lowercase());

						if error.is_some() {
							log::warn!("malformed language tag `{tag}`");
						}

						language = Some(tag);
					}
				} else {
					return Err(Error::InvalidLanguageTaggedString);
				}
			}
			// If expanded property is @direction:
			Term::Keyword(Keyword::Direction) => {
				// If processing mode is json-ld-1.0, continue with the next key
				// from element.
				if options.processing_mode == ProcessingMode::JsonLd1_0 {
					continue;
				}

				// If value is neither "ltr" nor "rtl", an invalid base direction
				// error has been detected and processing is aborted.
				match value.as_str() {
					Some(value @ ("ltr" | "rtl")) => direction = Some(value),
					_ => return Err(Error::InvalidBaseDirection),
				}
			}
			// If expanded property is @index:
			Term::Keyword(Keyword::Index) => {
				// If value is not a string, an invalid @index value error has
				// been detected and processing is aborted.
				if let Some(value) = value.as_str() {
					index = Some(value.to_string())
				} else {
					return Err(Error::InvalidIndexValue);
				}
			}
			// If expanded property is @type:
			Term::Keyword(Keyword::Type) => {
				if let Some(ty_value) = value.as_str() {
					let expanded_ty =
						expand_iri(type_scoped_context, Nullable::Some(ty_value), true, true);

					match expanded_ty {
						Term::Keyword(Keyword::Json) => {
							is_json = true;
						}
						Term::Id(id) if id.is_iri() => {
							is_json = false;
							ty = Some(id)
						}
						_ => return Err(Error::InvalidTypedValue),
					}
				} else {
					return Err(Error::InvalidTypedValue);
				}
			}
			Term::Keyword(Keyword::Value) => (),
			_ => {
				return Err(Error::InvalidValueObject);
			}
		}
	}

	// If input type is @json, set expanded value to value.
	if is_json {
		if language.is_some() || direction.is_some() {
			return Err(Error::InvalidValueObject);
		}

		let mut result = Object::default();
		result.insert("@value".into(), value_entry.clone());
		result.insert("@type".into(), Value::String("@json".into()));
		if let Some(index) = index {
			result.insert("@index".into(), Value::String(index.into()));
		}

		return Ok(Some(Value::Object(result)));
	}

	// Otherwise, if value is not a scalar or null, an invalid value object value
	// error has been detected and processing is aborted.
	if value_entry.is_array() || value_entry.is_object() {
		return Err(Error::InvalidValueObjectValue);
	}

	// Otherwise, if the value of result's @value entry is null, or an empty array,
	// return null.
	if value_entry.is_null() {
		return Ok(None);
	}

	// Otherwise, if the value of result's @value entry is not a string and result
	// contains the entry @language, an invalid language-tagged value error has
	// been detected (only strings can be language-tagged) and processing is
	// aborted.
	if language.is_some() || direction.is_some() {
		if ty.is_some() {
			return Err(Error::InvalidValueObject);
		}

		if !value_entry.is_string() {
			return Err(Error::InvalidLanguageTaggedValue);
		}

		let mut result = Object::default();
		result.insert("@value".into(), value_entry.clone());

		if let Some(language) = language {
			result.insert("@language".into(), Value::String(language.to_string().into()));
		}

		if let Some(direction) = direction {
			result.insert("@direction".into(), Value::String(direction.into()));
		}

		if let Some(index) = index {
			result.insert("@index".into(), Value::String(index.into()));
		}

		return Ok(Some(Value::Object(result)));
	}

	let mut result = Object::default();
	result.insert("@value".into(), value_entry.clone());

	if let Some(ty) = ty {
		result.insert("@type".into(), Value::String(ty.as_str().into()));
	}

	if let Some(index) = index {
		result.insert("@index".into(), Value::String(index.into()));
	}

	Ok(Some(Value::Object(result)))
}
