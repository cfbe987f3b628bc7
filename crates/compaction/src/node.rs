use crate::{add_value, compact_iri, compact_property, Error, Options};
use jsonld_context_processing::{algorithm::process_context, Options as ProcessingOptions,
	ProcessingStack};
use jsonld_core::{
	expanded::entry, Container, Context, Id, Loader, ProcessingMode, Term, Type,
};
use jsonld_syntax::{is_keyword, ContainerKind, Keyword};
use json_syntax::{Object, Value};
use mown::Mown;

fn optional_string(s: Option<String>) -> Value {
	s.map(Into::into).unwrap_or(Value::Null)
}

/// Returns the expanded `@type` entry of the given node as a list of
/// identifier strings.
fn node_types(node: &Object) -> Vec<&str> {
	match entry(node, "@type") {
		Some(types) => Value::force_as_array(types)
			.iter()
			.filter_map(Value::as_str)
			.collect(),
		None => Vec::new(),
	}
}

/// Compact the given expanded node object.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn compact_indexed_node_with<'a, L>(
	node: &'a Object,
	index: Option<&'a str>,
	mut active_context: &'a Context,
	type_scoped_context: &'a Context,
	active_property: Option<&'a str>,
	loader: &'a L,
	options: Options,
) -> Result<Value, Error>
where
	L: Loader,
{
	// If active context has a previous context, the active context is not propagated.
	// If element does not contain an @value entry, and element does not consist of
	// a single @id entry, set active context to previous context from active context,
	// as the scope of a term-scoped context does not apply when processing new node objects.
	if !(node.len() == 1 && entry(node, "@id").is_some()) {
		if let Some(previous_context) = active_context.previous_context() {
			active_context = previous_context
		}
	}

	// If the term definition for active property in active context has a local context:
	let mut active_context = Mown::Borrowed(active_context);
	if let Some(active_property) = active_property {
		if let Some(active_property_definition) = type_scoped_context.get(active_property) {
			if let Some(local_context) = active_property_definition.context() {
				active_context = Mown::Owned(
					process_context(
						active_context.as_ref(),
						local_context,
						ProcessingStack::default(),
						loader,
						active_property_definition.base_url().cloned(),
						ProcessingOptions::from(options).with_override(),
					)
					.await?,
				)
			}
		}
	}

	let mut result = Object::default();

	let types = node_types(node);
	if !types.is_empty() {
		// If element has an @type entry, create a new array compacted types initialized by
		// transforming each expanded type of that entry into its compacted form by IRI
		// compacting expanded type. Then, for each term in compacted types ordered
		// lexicographically:
		let mut compacted_types = Vec::new();
		for ty in &types {
			let compacted_ty = compact_iri(
				type_scoped_context,
				&Term::Id(Id::from_string(ty.to_string())),
				true,
				false,
				options,
			)?;
			compacted_types.push(compacted_ty)
		}

		compacted_types.sort_by(|a, b| a.as_ref().unwrap().cmp(b.as_ref().unwrap()));

		for term in &compacted_types {
			if let Some(term_definition) = type_scoped_context.get(term.as_ref().unwrap().as_str())
			{
				if let Some(local_context) = term_definition.context() {
					let processing_options = ProcessingOptions::from(options).without_propagation();
					active_context = Mown::Owned(
						process_context(
							active_context.as_ref(),
							local_context,
							ProcessingStack::default(),
							loader,
							term_definition.base_url().cloned(),
							processing_options,
						)
						.await?,
					)
				}
			}
		}
	}

	// If expanded property is @id:
	if let Some(id_value) = entry(node, "@id") {
		let id_str = id_value.as_str().unwrap_or("");
		let id = Term::Id(Id::from_string(id_str.to_string()));

		if node.len() == 1 {
			// This captures step 7:
			// If element has an @value or @id entry and the result of using the
			// Value Compaction algorithm, passing active context, active property,
			// and element as value is a scalar, or the term definition for active property
			// has a type mapping of @json, return that result.
			//
			// in the Value Compaction Algorithm, step 7:
			// If value has an @id entry and has no other entries other than @index:
			//
			// If the type mapping of active property is set to @id,
			// set result to the result of IRI compacting the value associated with the
			// @id entry using false for vocab.
			let type_mapping = active_property
				.and_then(|prop| active_context.get(prop))
				.and_then(|def| def.typ());

			if type_mapping == Some(&Type::Id) {
				let compacted_value =
					compact_iri(active_context.as_ref(), &id, false, false, options)?;
				return Ok(optional_string(compacted_value));
			}

			// Otherwise, if the type mapping of active property is set to @vocab,
			// set result to the result of IRI compacting the value associated with the @id entry.
			if type_mapping == Some(&Type::Vocab) {
				let compacted_value =
					compact_iri(active_context.as_ref(), &id, true, false, options)?;
				return Ok(optional_string(compacted_value));
			}
		}

		// If expanded value is a string, then initialize compacted value by IRI
		// compacting expanded value with vocab set to false.
		let compacted_value = compact_iri(active_context.as_ref(), &id, false, false, options)?;

		// Initialize alias by IRI compacting expanded property.
		let alias = compact_iri(
			active_context.as_ref(),
			&Term::Keyword(Keyword::Id),
			true,
			false,
			options,
		)?;

		// Add an entry alias to result whose value is set to compacted value and continue
		// to the next expanded property.
		if let Some(key) = alias {
			result.insert(key.into(), optional_string(compacted_value));
		}
	}

	compact_types(
		&mut result,
		&types,
		active_context.as_ref(),
		type_scoped_context,
		options,
	)?;

	// If expanded property is @reverse:
	if let Some(reverse_value) = entry(node, "@reverse") {
		if let Some(reverse_properties) = reverse_value.as_object() {
			if !reverse_properties.is_empty() {
				// Initialize compacted value to the result of using this algorithm recursively,
				// passing active context, @reverse for active property,
				// expanded value for element, and the compactArrays and ordered flags.
				if let Some(active_property_definition) = active_context.get("@reverse") {
					if let Some(local_context) = active_property_definition.context() {
						active_context = Mown::Owned(
							process_context(
								active_context.as_ref(),
								local_context,
								ProcessingStack::default(),
								loader,
								active_property_definition.base_url().cloned(),
								ProcessingOptions::from(options).with_override(),
							)
							.await?,
						)
					}
				}

				let mut reverse_entries: Vec<_> = reverse_properties.iter().collect();
				reverse_entries.sort_by(|a, b| a.key.cmp(&b.key));

				let mut reverse_result = Object::default();
				for reverse_entry in reverse_entries {
					compact_property(
						&mut reverse_result,
						Term::Id(Id::from_string(reverse_entry.key.to_string())),
						Value::force_as_array(&reverse_entry.value),
						active_context.as_ref(),
						loader,
						true,
						options,
					)
					.await?;
				}

				// For each property and value in compacted value:
				let properties: Vec<String> = reverse_result
					.iter()
					.map(|e| e.key.to_string())
					.collect();

				let mut reverse_map = Object::default();
				for property in properties {
					let reverse_entry = reverse_result
						.remove_unique(property.as_str())
						.ok()
						.flatten()
						.unwrap();

					// If the term definition for property in the active context indicates that
					// property is a reverse property
					if let Some(term_definition) = active_context.get(property.as_str()) {
						if term_definition.reverse_property() {
							// Initialize as array to true if the container mapping for property in
							// the active context includes @set, otherwise the negation of
							// compactArrays.
							let as_array = term_definition
								.container()
								.contains(ContainerKind::Set)
								|| !options.compact_arrays;

							// Use add value to add value to the property entry in result using
							// as array.
							add_value(&mut result, &property, reverse_entry.value, as_array);
							continue;
						}
					}

					reverse_map.insert(reverse_entry.key, reverse_entry.value);
				}

				if !reverse_map.is_empty() {
					// Initialize alias by IRI compacting @reverse.
					let alias = compact_iri(
						active_context.as_ref(),
						&Term::Keyword(Keyword::Reverse),
						true,
						false,
						options,
					)?;

					// Set the value of the alias entry of result to compacted value.
					result.insert(alias.unwrap().into(), Value::Object(reverse_map));
				}
			}
		}
	}

	// If expanded property is @index and active property has a container mapping in
	// active context that includes @index,
	if let Some(index_entry) = index {
		let mut index_container = false;
		if let Some(active_property) = active_property {
			if let Some(active_property_definition) = active_context.get(active_property) {
				if active_property_definition
					.container()
					.contains(ContainerKind::Index)
				{
					// then the compacted result will be inside of an @index container,
					// drop the @index entry by continuing to the next expanded property.
					index_container = true;
				}
			}
		}

		if !index_container {
			// Initialize alias by IRI compacting expanded property.
			let alias = compact_iri(
				active_context.as_ref(),
				&Term::Keyword(Keyword::Index),
				true,
				false,
				options,
			)?;

			// Add an entry alias to result whose value is set to expanded value and continue
			// with the next expanded property.
			result.insert(alias.unwrap().into(), Value::String(index_entry.into()));
		}
	}

	if let Some(graph_entry) = entry(node, "@graph") {
		compact_property(
			&mut result,
			Term::Keyword(Keyword::Graph),
			Value::force_as_array(graph_entry),
			active_context.as_ref(),
			loader,
			false,
			options,
		)
		.await?
	}

	// For each key expanded property and value expanded value in element, ordered
	// lexicographically by expanded property:
	let mut expanded_entries: Vec<_> = node
		.iter()
		.filter(|e| !is_keyword(e.key.as_str()))
		.collect();
	expanded_entries.sort_by(|a, b| a.key.cmp(&b.key));

	for expanded_entry in expanded_entries {
		compact_property(
			&mut result,
			Term::Id(Id::from_string(expanded_entry.key.to_string())),
			Value::force_as_array(&expanded_entry.value),
			active_context.as_ref(),
			loader,
			false,
			options,
		)
		.await?
	}

	if let Some(included_entry) = entry(node, "@included") {
		compact_property(
			&mut result,
			Term::Keyword(Keyword::Included),
			Value::force_as_array(included_entry),
			active_context.as_ref(),
			loader,
			false,
			options,
		)
		.await?
	}

	Ok(Value::Object(result))
}

/// Compact the given list of types into the given `result` compacted object.
fn compact_types(
	result: &mut Object,
	types: &[&str],
	active_context: &Context,
	type_scoped_context: &Context,
	options: Options,
) -> Result<(), Error> {
	// If expanded property is @type:
	if !types.is_empty() {
		// If expanded value is a string,
		// then initialize compacted value by IRI compacting expanded value using
		// type-scoped context for active context.
		let compacted_value = if types.len() == 1 {
			optional_string(compact_iri(
				type_scoped_context,
				&Term::Id(Id::from_string(types[0].to_string())),
				true,
				false,
				options,
			)?)
		} else {
			// Otherwise, expanded value must be a @type array:
			// Initialize compacted value to an empty array.
			let mut compacted_value = Vec::with_capacity(types.len());

			// For each item expanded type in expanded value:
			for ty in types {
				// Set term by IRI compacting expanded type using type-scoped context for
				// active context.
				let compacted_ty = compact_iri(
					type_scoped_context,
					&Term::Id(Id::from_string(ty.to_string())),
					true,
					false,
					options,
				)?;

				// Append term, to compacted value.
				compacted_value.push(optional_string(compacted_ty))
			}

			Value::Array(compacted_value)
		};

		// Initialize alias by IRI compacting expanded property.
		let alias = compact_iri(
			active_context,
			&Term::Keyword(Keyword::Type),
			true,
			false,
			options,
		)?
		.unwrap();

		// Initialize as array to true if processing mode is json-ld-1.1 and the
		// container mapping for alias in the active context includes @set,
		// otherwise to the negation of compactArrays.
		let container_mapping = match active_context.get(alias.as_str()) {
			Some(def) => def.container(),
			None => Container::None,
		};
		let as_array = (options.processing_mode != ProcessingMode::JsonLd1_0
			&& container_mapping.contains(ContainerKind::Set))
			|| !options.compact_arrays;

		// Use add value to add compacted value to the alias entry in result using as array.
		add_value(result, &alias, compacted_value, as_array)
	}

	Ok(())
}
