use crate::{compact_iri, compact_key, Error, Options};
use jsonld_context_processing::{algorithm::process_context, Options as ProcessingOptions,
	ProcessingStack};
use jsonld_core::{expanded, Container, Context, Id, Loader, Term, Type};
use jsonld_syntax::{ContainerKind, Keyword, LenientLangTag, Nullable};
use json_syntax::{Object, Value};
use mown::Mown;

/// Compact the given expanded value object.
pub(crate) async fn compact_indexed_value_with<'a, L>(
	value: &'a Object,
	index: Option<&'a str>,
	active_context: &'a Context,
	active_property: Option<&'a str>,
	loader: &'a L,
	options: Options,
) -> Result<Value, Error>
where
	L: Loader,
{
	// If the term definition for active property in active context has a local context:
	let mut active_context = Mown::Borrowed(active_context);
	if let Some(active_property) = active_property {
		if let Some(active_property_definition) = active_context.get(active_property) {
			if let Some(local_context) = active_property_definition.context() {
				let base_url = active_property_definition.base_url().cloned();
				active_context = Mown::Owned(
					process_context(
						active_context.as_ref(),
						local_context,
						ProcessingStack::default(),
						loader,
						base_url,
						ProcessingOptions::from(options).with_override(),
					)
					.await?,
				)
			}
		}
	}

	// Here starts the Value Compaction Algorithm.

	// Initialize result to a copy of value.
	let mut result = Object::default();

	// If the active context has a null inverse context,
	// set inverse context in active context to the result of calling the
	// Inverse Context Creation algorithm using active context.
	// Initialize inverse context to the value of inverse context in active context.
	// Done by `Context::inverse`.

	let active_property_definition =
		active_property.and_then(|property| active_context.get(property));

	// Initialize language to the language mapping for active property in active context,
	// if any, otherwise to the default language of active context.
	let language = match active_property_definition.and_then(|d| d.language()) {
		Some(lang) => lang.option().map(|l| l.as_lenient_lang_tag_ref()),
		None => active_context.default_language(),
	};

	// Initialize direction to the direction mapping for active property in active context,
	// if any, otherwise to the default base direction of active context.
	let direction = match active_property_definition.and_then(|d| d.direction()) {
		Some(dir) => dir.option(),
		None => active_context.default_base_direction(),
	};

	// If value has an @id entry and has no other entries other than @index:
	// NOTE handled by the node compaction algorithm.

	// Otherwise, if value has an @type entry whose value matches the type mapping of
	// active property, set result to the value associated with the @value entry of value.
	let type_mapping: Option<&Type> = active_property_definition.and_then(|d| d.typ());

	let container_mapping = active_property_definition
		.map(|d| d.container())
		.unwrap_or(Container::None);

	let remove_index =
		(index.is_some() && container_mapping.contains(ContainerKind::Index)) || index.is_none();

	let value_entry = expanded::entry(value, "@value").cloned().unwrap_or(Value::Null);
	let type_entry = expanded::entry(value, "@type").and_then(Value::as_str);
	let language_entry = expanded::entry(value, "@language").and_then(Value::as_str);
	let direction_entry = expanded::entry(value, "@direction").and_then(Value::as_str);

	if type_entry == Some("@json") {
		// JSON literals.
		if type_mapping == Some(&Type::Json) && remove_index {
			return Ok(value_entry);
		}

		let compact_key = compact_key(
			active_context.as_ref(),
			&Term::Keyword(Keyword::Value),
			true,
			false,
			options,
		)?;
		result.insert(compact_key.unwrap(), value_entry);

		let compact_ty_key = crate::compact_key(
			active_context.as_ref(),
			&Term::Keyword(Keyword::Type),
			true,
			false,
			options,
		)?;
		let compact_ty = compact_iri(
			active_context.as_ref(),
			&Term::Keyword(Keyword::Json),
			true,
			false,
			options,
		)?;
		result.insert(
			compact_ty_key.unwrap(),
			match compact_ty {
				Some(s) => Value::String(s.into()),
				None => Value::Null,
			},
		);
	} else if language_entry.is_some() || direction_entry.is_some() {
		// Language tagged strings.
		let value_language = language_entry.map(|l| LenientLangTag::new(l).0);
		let value_direction =
			direction_entry.and_then(|d| jsonld_syntax::Direction::try_from(d).ok());

		if remove_index && value_language == language && value_direction == direction {
			return Ok(value_entry);
		}

		let compact_key = compact_key(
			active_context.as_ref(),
			&Term::Keyword(Keyword::Value),
			true,
			false,
			options,
		)?;
		result.insert(compact_key.unwrap(), value_entry);

		if let Some(language) = language_entry {
			let compact_key = crate::compact_key(
				active_context.as_ref(),
				&Term::Keyword(Keyword::Language),
				true,
				false,
				options,
			)?;
			result.insert(compact_key.unwrap(), Value::String(language.into()));
		}

		if let Some(direction) = direction_entry {
			let compact_key = crate::compact_key(
				active_context.as_ref(),
				&Term::Keyword(Keyword::Direction),
				true,
				false,
				options,
			)?;
			result.insert(compact_key.unwrap(), Value::String(direction.into()));
		}
	} else {
		// Typed literals and plain literals.
		let matching_type = match (type_entry, type_mapping) {
			(None, None) => true,
			(Some(ty), Some(Type::Iri(mapping))) => ty == mapping.as_str(),
			_ => false,
		};

		if matching_type && remove_index {
			// A plain string literal can only be compacted to a scalar if no
			// default language or direction applies to the active property.
			if type_entry.is_some()
				|| !value_entry.is_string()
				|| (language.is_none() && direction.is_none())
			{
				return Ok(value_entry);
			}
		}

		let compact_key = compact_key(
			active_context.as_ref(),
			&Term::Keyword(Keyword::Value),
			true,
			false,
			options,
		)?;
		result.insert(compact_key.unwrap(), value_entry);

		if let Some(ty) = type_entry {
			let compact_ty_key = crate::compact_key(
				active_context.as_ref(),
				&Term::Keyword(Keyword::Type),
				true,
				false,
				options,
			)?;
			let compact_ty = compact_iri(
				active_context.as_ref(),
				&Term::Id(Id::from_string(ty.to_string())),
				true,
				false,
				options,
			)?;
			result.insert(
				compact_ty_key.unwrap(),
				match compact_ty {
					Some(s) => Value::String(s.into()),
					None => Value::Null,
				},
			);
		}
	}

	if !remove_index {
		if let Some(index) = index {
			let compact_key = compact_key(
				active_context.as_ref(),
				&Term::Keyword(Keyword::Index),
				true,
				false,
				options,
			)?;
			result.insert(compact_key.unwrap(), Value::String(index.into()));
		}
	}

	Ok(Value::Object(result))
}

/// Checks whether the single entry of the given compacted object expands to
/// `@id`.
pub(crate) fn is_id_entry(object: &Object, active_context: &Context) -> bool {
	object.len() == 1
		&& object.iter().next().map_or(false, |e| {
			matches!(
				jsonld_context_processing::algorithm::expand_iri_simple(
					active_context,
					Nullable::Some(e.key.as_str()),
					false,
					true,
				),
				Term::Keyword(Keyword::Id)
			)
		})
}
