use super::{expand_iri_simple, expand_iri_with, get_entry, Merged};
use crate::{Error, Options, ProcessingStack};
use hashbrown::HashMap;
use iref::{Iri, IriBuf, IriRef};
use jsonld_core::{
	context::{TermDefinition, TypeTermDefinition},
	Container, Context, Id, Loader, ProcessingMode, Term, Type,
};
use jsonld_syntax::{
	is_keyword, is_keyword_like, CompactIri, ContainerKind, Direction, Keyword, LenientLangTagBuf,
	Nullable,
};
use json_syntax::Value;
use rdf_types::BlankId;

fn is_gen_delim(c: char) -> bool {
	matches!(c, ':' | '/' | '?' | '#' | '[' | ']' | '@')
}

// Checks if the input term is an IRI ending with a gen-delim character, or a blank node identifier.
fn is_gen_delim_or_blank(t: &Term) -> bool {
	match t {
		Term::Id(id) if id.is_blank() => true,
		Term::Id(id) => match id.as_iri() {
			Some(iri) => iri.as_str().chars().last().map(is_gen_delim).unwrap_or(false),
			None => false,
		},
		_ => false,
	}
}

/// Checks if the given character is included in the given string anywhere but at the first or last position.
fn contains_between_boundaries(id: &str, c: char) -> bool {
	if let Some(i) = id.find(c) {
		let j = id.rfind(c).unwrap();
		i > 0 && j < id.len() - 1
	} else {
		false
	}
}

/// Map tracking the terms being defined.
#[derive(Default)]
pub struct DefinedTerms(HashMap<String, DefinedTerm>);

impl DefinedTerms {
	pub fn new() -> Self {
		Self::default()
	}

	/// Marks the given `key` as being defined.
	///
	/// Returns `false` if the term is already defined, and
	/// `Error::CyclicIriMapping` if it is currently being defined.
	pub fn begin(&mut self, key: &str) -> Result<bool, Error> {
		match self.0.get(key) {
			Some(d) => {
				if d.pending {
					Err(Error::CyclicIriMapping)
				} else {
					Ok(false)
				}
			}
			None => {
				self.0.insert(key.to_string(), DefinedTerm { pending: true });

				Ok(true)
			}
		}
	}

	pub fn end(&mut self, key: &str) {
		self.0.get_mut(key).unwrap().pending = false
	}
}

pub struct DefinedTerm {
	pending: bool,
}

/// Follows the `https://www.w3.org/TR/json-ld11-api/#create-term-definition` algorithm.
/// Default value for `base_url` is `None`. Default values for `protected` and `override_protected` are `false`.
#[allow(clippy::too_many_arguments)]
pub async fn define<L>(
	active_context: &mut Context,
	local_context: &Merged<'_>,
	term: &str,
	defined: &mut DefinedTerms,
	remote_contexts: ProcessingStack,
	loader: &L,
	base_url: Option<IriBuf>,
	protected: bool,
	options: Options,
) -> Result<(), Error>
where
	L: Loader,
{
	if defined.begin(term)? {
		if term.is_empty() {
			return Err(Error::InvalidTermDefinition);
		}

		// Initialize `value` to a copy of the value associated with the entry `term` in
		// `local_context`.
		if let Some(value) = local_context.get(term)? {
			// Set the value associated with defined's term entry to false.
			// This indicates that the term definition is now being created but is not yet
			// complete.
			// Done with `defined.begin`.

			if term == "@type" {
				// If term is @type, and processing mode is json-ld-1.0, a keyword
				// redefinition error has been detected and processing is aborted.
				if options.processing_mode == ProcessingMode::JsonLd1_0 {
					return Err(Error::KeywordRedefinition);
				}

				let previous_definition = active_context.set_type(None);

				// At this point, `value` MUST be a map with only either or both of the
				// following entries:
				// An entry for @container with value @set.
				// An entry for @protected.
				// Any other value means that a keyword redefinition error has been detected
				// and processing is aborted.
				let mut definition = TypeTermDefinition::default();

				match value {
					Value::Object(value) => {
						for entry in value.iter() {
							match entry.key.as_str() {
								"@container" if entry.value.as_str() == Some("@set") => {
									definition.container_set = true
								}
								"@protected" => match entry.value.as_boolean() {
									Some(b) => definition.protected = b,
									None => return Err(Error::InvalidProtectedValue),
								},
								_ => return Err(Error::KeywordRedefinition),
							}
						}
					}
					_ => return Err(Error::KeywordRedefinition),
				}

				// If override protected is false and previous_definition exists and is
				// protected:
				if !options.override_protected {
					if let Some(previous_definition) = previous_definition {
						if previous_definition.protected {
							// If `definition` is not the same as `previous_definition`
							// (other than the value of protected), a protected term
							// redefinition error has been detected, and processing is aborted.
							if !definition.eq_modulo_protected(&previous_definition) {
								return Err(Error::ProtectedTermRedefinition);
							}

							// Set `definition` to `previous definition` to retain the value of
							// protected.
							definition.protected = true;
						}
					}
				}

				active_context.set_type(Some(definition));
				defined.end(term);
				return Ok(());
			}

			// Since keywords cannot be overridden, term MUST NOT be a keyword and
			// a keyword redefinition error has been detected and processing is aborted.
			if is_keyword(term) {
				return Err(Error::KeywordRedefinition);
			}

			// If term has the form of a keyword, return; processors SHOULD
			// generate a warning.
			if is_keyword_like(term) {
				log::warn!("keyword-like term `{term}`");
				defined.end(term);
				return Ok(());
			}

			// Initialize `previous_definition` to any existing term definition for `term` in
			// `active_context`, removing that term definition from active context.
			let previous_definition = active_context.set_normal(term.to_string(), None);

			// The term is a simple term if its definition is a plain string.
			let simple_term = value.is_string();

			// Normalize the definition into its expanded, map form.
			let (id_value, expanded) = match value {
				Value::Null => (Some(Nullable::Null), None),
				Value::String(id) => (Some(Nullable::Some(id.as_str())), None),
				Value::Object(map) => {
					let id_value = match get_entry(map, "@id")? {
						Some(Value::Null) => Some(Nullable::Null),
						Some(Value::String(id)) => Some(Nullable::Some(id.as_str())),
						Some(_) => return Err(Error::InvalidIriMapping),
						None => None,
					};

					(id_value, Some(map))
				}
				_ => return Err(Error::InvalidTermDefinition),
			};

			// If value contains any entry other than @id, @reverse, @container, @context,
			// @direction, @index, @language, @nest, @prefix, @protected, or @type, an
			// invalid term definition error has been detected and processing is aborted.
			if let Some(map) = expanded {
				for entry in map.iter() {
					if !matches!(
						entry.key.as_str(),
						"@id" | "@reverse"
							| "@container" | "@context"
							| "@direction" | "@index"
							| "@language" | "@nest"
							| "@prefix" | "@protected"
							| "@type"
					) {
						return Err(Error::InvalidTermDefinition);
					}
				}
			}

			// Create a new term definition, `definition`, initializing `prefix` flag to
			// `false`, `protected` to `protected`, and `reverse_property` to `false`.
			let mut definition = TermDefinition {
				protected,
				..Default::default()
			};

			// If the @protected entry in value is true set the protected flag in
			// definition to true.
			if let Some(protected_value) = expanded.map(|m| get_entry(m, "@protected")).transpose()?.flatten() {
				// If processing mode is json-ld-1.0, an invalid term definition has
				// been detected and processing is aborted.
				if options.processing_mode == ProcessingMode::JsonLd1_0 {
					return Err(Error::InvalidTermDefinition);
				}

				match protected_value.as_boolean() {
					Some(b) => definition.protected = b,
					None => return Err(Error::InvalidProtectedValue),
				}
			}

			// If value contains the entry @type:
			if let Some(type_value) = expanded.map(|m| get_entry(m, "@type")).transpose()?.flatten() {
				// The value of @type MUST be a string, otherwise an invalid type mapping
				// error has been detected.
				let type_str = type_value.as_str().ok_or(Error::InvalidTypeMapping)?;

				// Set `typ` to the result of IRI expanding type, using local context,
				// and defined.
				let typ = Box::pin(expand_iri_with(
					active_context,
					Nullable::Some(type_str),
					false,
					true,
					local_context,
					defined,
					remote_contexts.clone(),
					loader,
					options,
				))
				.await?;

				// If the expanded type is @json or @none, and processing mode is
				// json-ld-1.0, an invalid type mapping error has been detected and
				// processing is aborted.
				if options.processing_mode == ProcessingMode::JsonLd1_0
					&& (typ == Term::Keyword(Keyword::Json) || typ == Term::Keyword(Keyword::None))
				{
					return Err(Error::InvalidTypeMapping);
				}

				match Type::try_from(typ) {
					Ok(typ) => {
						// Set the type mapping for definition to type.
						definition.typ = Some(typ);
					}
					Err(_) => return Err(Error::InvalidTypeMapping),
				}
			}

			// If `value` contains the entry @reverse:
			if let Some(reverse_value) = expanded.map(|m| get_entry(m, "@reverse")).transpose()?.flatten() {
				// If `value` contains `@id` or `@nest`, entries, an invalid reverse
				// property error has been detected and processing is aborted.
				if id_value.is_some()
					|| expanded.map(|m| get_entry(m, "@nest")).transpose()?.flatten().is_some()
				{
					return Err(Error::InvalidReverseProperty);
				}

				// The value of @reverse MUST be a string, otherwise an invalid IRI
				// mapping error has been detected.
				let reverse_str = reverse_value.as_str().ok_or(Error::InvalidIriMapping)?;

				// If the value associated with the @reverse entry is a string having
				// the form of a keyword, return; processors SHOULD generate a warning.
				if is_keyword_like(reverse_str) {
					log::warn!("keyword-like value `{reverse_str}`");
					defined.end(term);
					return Ok(());
				}

				// Otherwise, set the IRI mapping of definition to the result of IRI
				// expanding the value associated with the @reverse entry, using
				// local context, and defined.
				// If the result does not have the form of an IRI or a blank node
				// identifier, an invalid IRI mapping error has been detected and
				// processing is aborted.
				match Box::pin(expand_iri_with(
					active_context,
					Nullable::Some(reverse_str),
					false,
					true,
					local_context,
					defined,
					remote_contexts.clone(),
					loader,
					options,
				))
				.await?
				{
					Term::Id(mapping) if mapping.is_valid() => {
						definition.value = Some(Term::Id(mapping))
					}
					_ => return Err(Error::InvalidIriMapping),
				}

				// If `value` contains an `@container` entry, set the `container`
				// mapping of `definition` to an array containing its value;
				// if its value is neither `@set`, nor `@index`, nor null, an
				// invalid reverse property error has been detected (reverse properties
				// only support set- and index-containers) and processing is aborted.
				if let Some(container_value) =
					expanded.map(|m| get_entry(m, "@container")).transpose()?.flatten()
				{
					match container_value {
						Value::Null => (),
						Value::String(s) => match ContainerKind::try_from(s.as_str()) {
							Ok(kind @ (ContainerKind::Set | ContainerKind::Index)) => {
								definition.container = kind.into()
							}
							_ => return Err(Error::InvalidReverseProperty),
						},
						_ => return Err(Error::InvalidReverseProperty),
					}
				}

				// Set the `reverse_property` flag of `definition` to `true`.
				definition.reverse_property = true;

				// Set the term definition of `term` in `active_context` to
				// `definition` and the value associated with `defined`'s entry `term`
				// to `true` and return.
				active_context.set_normal(term.to_string(), Some(definition));
				defined.end(term);
				return Ok(());
			}

			match id_value {
				// If `value` contains the entry `@id` and its value does not equal `term`:
				Some(id_value) if id_value != Nullable::Some(term) => {
					match id_value {
						// If the `@id` entry of value is `null`, the term is not used for IRI
						// expansion, but is retained to be able to detect future redefinitions
						// of this term.
						Nullable::Null => (),
						Nullable::Some(id_value) => {
							// Otherwise:
							// If the value associated with the `@id` entry is not a
							// keyword, but has the form of a keyword, return;
							// processors SHOULD generate a warning.
							if is_keyword_like(id_value) && !is_keyword(id_value) {
								log::warn!("keyword-like value `{id_value}`");
								defined.end(term);
								return Ok(());
							}

							// Otherwise, set the IRI mapping of `definition` to the result
							// of IRI expanding the value associated with the `@id` entry,
							// using `local_context`, and `defined`.
							definition.value = match Box::pin(expand_iri_with(
								active_context,
								Nullable::Some(id_value),
								false,
								true,
								local_context,
								defined,
								remote_contexts.clone(),
								loader,
								options,
							))
							.await?
							{
								Term::Keyword(Keyword::Context) => {
									// if it equals `@context`, an invalid keyword alias error has
									// been detected and processing is aborted.
									return Err(Error::InvalidKeywordAlias);
								}
								Term::Id(prop) if !prop.is_valid() => {
									// If the resulting IRI mapping is neither a keyword,
									// nor an IRI, nor a blank node identifier, an
									// invalid IRI mapping error has been detected and processing
									// is aborted;
									return Err(Error::InvalidIriMapping);
								}
								Term::Null => return Err(Error::InvalidIriMapping),
								value => Some(value),
							};

							// If `term` contains a colon (:) anywhere but as the first or
							// last character of `term`, or if it contains a slash (/)
							// anywhere:
							if contains_between_boundaries(term, ':') || term.contains('/') {
								// Set the value associated with `defined`'s `term` entry
								// to `true`.
								defined.end(term);

								// If the result of IRI expanding `term` using
								// `local_context`, and `defined`, is not the same as the
								// IRI mapping of definition, an invalid IRI mapping error
								// has been detected and processing is aborted.
								let expanded_term = Box::pin(expand_iri_with(
									active_context,
									Nullable::Some(term),
									false,
									true,
									local_context,
									defined,
									remote_contexts.clone(),
									loader,
									options,
								))
								.await?;
								if definition.value.as_ref() != Some(&expanded_term) {
									return Err(Error::InvalidIriMapping);
								}
							}

							// If `term` contains neither a colon (:) nor a slash (/),
							// simple term is true, and if the IRI mapping of definition
							// is either an IRI ending with a gen-delim character,
							// or a blank node identifier, set the `prefix` flag in
							// `definition` to true.
							if !term.contains(':')
								&& !term.contains('/') && simple_term
								&& is_gen_delim_or_blank(definition.value.as_ref().unwrap())
							{
								definition.prefix = true;
							}
						}
					}
				}
				_ => {
					// Otherwise if the `term` contains a colon (:) anywhere after the first
					// character.
					if let Ok(compact_iri) = CompactIri::new(term) {
						// If `term` is a compact IRI with a prefix that is an entry in local
						// context a dependency has been found.
						// Use this algorithm recursively passing `active_context`,
						// `local_context`, the prefix as term, and `defined`.
						Box::pin(define(
							active_context,
							local_context,
							compact_iri.prefix(),
							defined,
							remote_contexts.clone(),
							loader,
							None,
							false,
							options.with_no_override(),
						))
						.await?;

						// If `term`'s prefix has a term definition in `active_context`, set the
						// IRI mapping of `definition` to the result of concatenating the value
						// associated with the prefix's IRI mapping and the term's suffix.
						if let Some(prefix_definition) =
							active_context.get_normal(compact_iri.prefix())
						{
							let mut result = String::new();

							if let Some(prefix_iri) =
								prefix_definition.value.as_ref().and_then(Term::as_iri)
							{
								result = prefix_iri.to_string()
							}

							result.push_str(compact_iri.suffix());

							if let Ok(iri) = Iri::new(result.as_str()) {
								definition.value = Some(Term::from(iri.to_owned()))
							} else {
								return Err(Error::InvalidIriMapping);
							}
						}
					}

					// not a compact IRI
					if definition.value.is_none() {
						if let Ok(blank_id) = BlankId::new(term) {
							definition.value = Some(Term::Id(Id::blank(blank_id.to_owned())))
						} else if let Ok(iri_ref) = IriRef::new(term) {
							match iri_ref.as_iri() {
								Some(iri) => definition.value = Some(Term::from(iri.to_owned())),
								None => {
									if term.contains('/') {
										// Term is a relative IRI reference.
										// Set the IRI mapping of definition to the result of IRI expanding
										// term.
										match expand_iri_simple(
											active_context,
											Nullable::Some(term),
											true,
											false,
										) {
											Term::Id(id) if id.is_iri() => {
												definition.value = Some(Term::Id(id))
											}
											// If the resulting IRI mapping is not an IRI, an invalid IRI mapping
											// error has been detected and processing is aborted.
											_ => return Err(Error::InvalidIriMapping),
										}
									}
								}
							}
						}

						// not a compact IRI, IRI, IRI reference or blank node id.
						if definition.value.is_none() {
							if let Some(context_vocabulary) = active_context.vocabulary() {
								// Otherwise, if `active_context` has a vocabulary mapping, the IRI mapping
								// of `definition` is set to the result of concatenating the value
								// associated with the vocabulary mapping and `term`.
								// If it does not have a vocabulary mapping, an invalid IRI mapping error
								// been detected and processing is aborted.
								if let Some(vocabulary_iri) = context_vocabulary.as_iri() {
									let mut result = vocabulary_iri.to_string();
									result.push_str(term);
									if let Ok(iri) = Iri::new(result.as_str()) {
										definition.value = Some(Term::from(iri.to_owned()))
									} else {
										return Err(Error::InvalidIriMapping);
									}
								} else {
									return Err(Error::InvalidIriMapping);
								}
							} else {
								// If it does not have a vocabulary mapping, an invalid IRI mapping error
								// been detected and processing is aborted.
								return Err(Error::InvalidIriMapping);
							}
						}
					}
				}
			}

			// If value contains the entry @container:
			if let Some(container_value) =
				expanded.map(|m| get_entry(m, "@container")).transpose()?.flatten()
			{
				// If the container value is @graph, @id, or @type, or is otherwise not a
				// string, generate an invalid container mapping error and abort processing
				// if processing mode is json-ld-1.0.
				if options.processing_mode == ProcessingMode::JsonLd1_0 {
					match container_value.as_str().map(ContainerKind::try_from) {
						Some(Ok(
							ContainerKind::Graph | ContainerKind::Id | ContainerKind::Type,
						))
						| Some(Err(_))
						| None => return Err(Error::InvalidContainerMapping),
						_ => (),
					}
				}

				// Initialize `container` to the value associated with the `@container`
				// entry, which MUST be either `@graph`, `@id`, `@index`, `@language`,
				// `@list`, `@set`, `@type`, or an array containing exactly any one of
				// those keywords, an array containing `@graph` and either `@id` or
				// `@index` optionally including `@set`, or an array containing a
				// combination of `@set` and any of `@index`, `@graph`, `@id`, `@type`,
				// `@language` in any order.
				// Otherwise, an invalid container mapping has been detected and processing
				// is aborted.
				let mut container = Container::new();
				for entry in Value::force_as_array(container_value) {
					let kind = entry
						.as_str()
						.and_then(|s| ContainerKind::try_from(s).ok())
						.ok_or(Error::InvalidContainerMapping)?;

					container = container
						.with(kind)
						.ok_or(Error::InvalidContainerMapping)?;
				}

				definition.container = container;

				// If the `container` mapping of definition includes `@type`:
				if definition.container.contains(ContainerKind::Type) {
					match &definition.typ {
						Some(typ) => {
							// If type mapping in definition is neither `@id` nor `@vocab`,
							// an invalid type mapping error has been detected and processing
							// is aborted.
							match typ {
								Type::Id | Type::Vocab => (),
								_ => return Err(Error::InvalidTypeMapping),
							}
						}
						None => {
							// If type mapping in definition is undefined, set it to @id.
							definition.typ = Some(Type::Id)
						}
					}
				}
			}

			// If value contains the entry @index:
			if let Some(index_value) = expanded.map(|m| get_entry(m, "@index")).transpose()?.flatten() {
				// If processing mode is json-ld-1.0 or container mapping does not include
				// `@index`, an invalid term definition has been detected and processing
				// is aborted.
				if !definition.container.contains(ContainerKind::Index)
					|| options.processing_mode == ProcessingMode::JsonLd1_0
				{
					return Err(Error::InvalidTermDefinition);
				}

				// Initialize `index` to the value associated with the `@index` entry,
				// which MUST be a string expanding to an IRI.
				// Otherwise, an invalid term definition has been detected and processing
				// is aborted.
				let index = index_value.as_str().ok_or(Error::InvalidTermDefinition)?;

				match expand_iri_simple(active_context, Nullable::Some(index), false, true) {
					Term::Id(id) if id.is_iri() => (),
					_ => return Err(Error::InvalidTermDefinition),
				}

				definition.index = Some(index.to_string())
			}

			// If `value` contains the entry `@context`:
			if let Some(context_value) =
				expanded.map(|m| get_entry(m, "@context")).transpose()?.flatten()
			{
				// If processing mode is json-ld-1.0, an invalid term definition has been
				// detected and processing is aborted.
				if options.processing_mode == ProcessingMode::JsonLd1_0 {
					return Err(Error::InvalidTermDefinition);
				}

				// Initialize `context` to the value associated with the @context entry,
				// which is treated as a local context.
				// Invoke the Context Processing algorithm using the `active_context`,
				// `context` as local context, `base_url`, and `true` for override
				// protected.
				// If any error is detected, an invalid scoped context error has been
				// detected and processing is aborted.
				Box::pin(super::process_context(
					active_context,
					context_value,
					remote_contexts.clone(),
					loader,
					base_url.clone(),
					options.with_override(),
				))
				.await
				.map_err(|_| Error::InvalidScopedContext)?;

				// Set the local context of definition to context, and base URL to base URL.
				definition.context = Some(Box::new(context_value.clone()));
				definition.base_url = base_url.clone();
			}

			// If `value` contains the entry `@language` and does not contain the entry
			// `@type`:
			if expanded.map(|m| get_entry(m, "@type")).transpose()?.flatten().is_none() {
				if let Some(language_value) =
					expanded.map(|m| get_entry(m, "@language")).transpose()?.flatten()
				{
					// Initialize `language` to the value associated with the `@language`
					// entry, which MUST be either null or a string.
					// If `language` is not well-formed according to section 2.2.9 of
					// [BCP47], processors SHOULD issue a warning.
					// Otherwise, an invalid language mapping error has been detected and
					// processing is aborted.
					// Set the `language` mapping of definition to `language`.
					definition.language = match language_value {
						Value::Null => Some(Nullable::Null),
						Value::String(tag) => {
							let (tag, error) =
								LenientLangTagBuf::new(tag.as_str().to_lowercase());

							if error.is_some() {
								log::warn!("malformed language tag `{tag}`");
							}

							Some(Nullable::Some(tag))
						}
						_ => return Err(Error::InvalidLanguageMapping),
					};
				}

				// If `value` contains the entry `@direction` and does not contain the
				// entry `@type`:
				if let Some(direction_value) =
					expanded.map(|m| get_entry(m, "@direction")).transpose()?.flatten()
				{
					// Initialize `direction` to the value associated with the `@direction`
					// entry, which MUST be either null, "ltr", or "rtl".
					definition.direction = match direction_value {
						Value::Null => Some(Nullable::Null),
						Value::String(dir) => match Direction::try_from(dir.as_str()) {
							Ok(dir) => Some(Nullable::Some(dir)),
							Err(_) => return Err(Error::InvalidBaseDirection),
						},
						_ => return Err(Error::InvalidBaseDirection),
					};
				}
			}

			// If value contains the entry @nest:
			if let Some(nest_value) = expanded.map(|m| get_entry(m, "@nest")).transpose()?.flatten() {
				// If processing mode is json-ld-1.0, an invalid term definition has been
				// detected and processing is aborted.
				if options.processing_mode == ProcessingMode::JsonLd1_0 {
					return Err(Error::InvalidTermDefinition);
				}

				// Its value MUST be a string which is not a keyword other than @nest.
				let nest = nest_value.as_str().ok_or(Error::InvalidNestValue)?;
				if is_keyword(nest) && nest != "@nest" {
					return Err(Error::InvalidNestValue);
				}

				definition.nest = Some(nest.to_string());
			}

			// If value contains the entry @prefix:
			if let Some(prefix_value) = expanded.map(|m| get_entry(m, "@prefix")).transpose()?.flatten() {
				// If processing mode is json-ld-1.0, or if `term` contains a colon (:) or
				// slash (/), an invalid term definition has been detected and processing
				// is aborted.
				if term.contains(':')
					|| term.contains('/')
					|| options.processing_mode == ProcessingMode::JsonLd1_0
				{
					return Err(Error::InvalidTermDefinition);
				}

				// Set the `prefix` flag to the value associated with the @prefix entry,
				// which MUST be a boolean.
				// Otherwise, an invalid @prefix value error has been detected and
				// processing is aborted.
				definition.prefix = prefix_value.as_boolean().ok_or(Error::InvalidPrefixValue)?;

				// If the `prefix` flag of `definition` is set to `true`, and its IRI
				// mapping is a keyword, an invalid term definition has been detected and
				// processing is aborted.
				if definition.prefix && definition.value.as_ref().map(Term::is_keyword).unwrap_or(false)
				{
					return Err(Error::InvalidTermDefinition);
				}
			}

			// If override protected is false and previous_definition exists and is protected;
			if !options.override_protected {
				if let Some(previous_definition) = previous_definition {
					if previous_definition.protected {
						// If `definition` is not the same as `previous_definition`
						// (other than the value of protected), a protected term
						// redefinition error has been detected, and processing is aborted.
						if !definition.eq_modulo_protected(&previous_definition) {
							return Err(Error::ProtectedTermRedefinition);
						}

						// Set `definition` to `previous definition` to retain the value of
						// protected.
						definition.protected = true;
					}
				}
			}

			// Set the term definition of `term` in `active_context` to `definition` and
			// set the value associated with `defined`'s entry term to true.
			active_context.set_normal(term.to_string(), Some(definition));
		}

		defined.end(term);
	}

	Ok(())
}
