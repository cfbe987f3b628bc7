use super::{resolve_iri, DefinedTerms, Merged};
use crate::{Error, Options, ProcessingStack};
use iref::{Iri, IriRef};
use jsonld_core::{Context, Id, Loader, Term};
use jsonld_syntax::{is_keyword_like, CompactIri, Keyword, Nullable};
use rdf_types::BlankId;

fn invalid_iri(value: String) -> Term {
	log::warn!("malformed IRI `{value}`");
	Term::Id(Id::Invalid(value))
}

/// IRI expansion, during context processing.
///
/// Like [`expand_iri_simple`], but ensures that a term definition is created
/// in `active_context` for the value (and any compact IRI prefix it uses) if
/// `local_context` defines it.
///
/// Default values for `document_relative` and `vocab` should be `false` and
/// `true`.
#[allow(clippy::too_many_arguments)]
pub async fn expand_iri_with<L>(
	active_context: &mut Context,
	value: Nullable<&str>,
	document_relative: bool,
	vocab: bool,
	local_context: &Merged<'_>,
	defined: &mut DefinedTerms,
	remote_contexts: ProcessingStack,
	loader: &L,
	options: Options,
) -> Result<Term, Error>
where
	L: Loader,
{
	match value {
		Nullable::Null => Ok(Term::Null),
		Nullable::Some(value) => {
			if let Ok(keyword) = Keyword::try_from(value) {
				return Ok(Term::Keyword(keyword));
			}

			if is_keyword_like(value) {
				log::warn!("keyword-like value `{value}`");
				return Ok(Term::Null);
			}

			// If `local_context` is not null, it contains an entry with a key that equals value, and the
			// value of the entry for value in defined is not true, invoke the Create Term Definition
			// algorithm, passing active context, local context, value as term, and defined. This will
			// ensure that a term definition is created for value in active context during Context
			// Processing.
			Box::pin(super::define(
				active_context,
				local_context,
				value,
				defined,
				remote_contexts.clone(),
				loader,
				None,
				false,
				options.with_no_override(),
			))
			.await?;

			if let Some(term_definition) = active_context.get(value) {
				// If active context has a term definition for value, and the associated IRI mapping
				// is a keyword, return that keyword.
				if let Some(mapped) = term_definition.value() {
					if mapped.is_keyword() {
						return Ok(mapped.clone());
					}
				}

				// If vocab is true and the active context has a term definition for value, return the
				// associated IRI mapping.
				if vocab {
					return match term_definition.value() {
						Some(mapped) => Ok(mapped.clone()),
						None => Ok(Term::Null),
					};
				}
			}

			if value.find(':').map(|i| i > 0).unwrap_or(false) {
				if let Ok(blank_id) = BlankId::new(value) {
					return Ok(Term::Id(Id::blank(blank_id.to_owned())));
				}

				if value == "_:" {
					return Ok(Term::Id(Id::Invalid("_:".to_string())));
				}

				if let Ok(compact_iri) = CompactIri::new(value) {
					// If local context is not null, it contains a `prefix` entry, and the value of the
					// prefix entry in defined is not true, invoke the Create Term Definition
					// algorithm, passing active context, local context, prefix as term, and defined.
					// This will ensure that a term definition is created for prefix in active context
					// during Context Processing.
					Box::pin(super::define(
						active_context,
						local_context,
						compact_iri.prefix(),
						defined,
						remote_contexts,
						loader,
						None,
						false,
						options.with_no_override(),
					))
					.await?;

					// If active context contains a term definition for prefix having a non-null IRI
					// mapping and the prefix flag of the term definition is true, return the result
					// of concatenating the IRI mapping associated with prefix and suffix.
					if let Some(term_definition) = active_context.get_normal(compact_iri.prefix()) {
						if term_definition.prefix {
							if let Some(mapping) = &term_definition.value {
								let mut result = mapping.as_str().to_string();
								result.push_str(compact_iri.suffix());

								return Ok(Term::Id(Id::from_string(result)));
							}
						}
					}
				}

				if let Ok(iri) = Iri::new(value) {
					return Ok(Term::Id(Id::iri(iri.to_owned())));
				}
			}

			// If vocab is true, and active context has a vocabulary mapping, return the result of
			// concatenating the vocabulary mapping with value.
			if vocab {
				match active_context.vocabulary() {
					Some(Term::Id(mapping)) => {
						let mut result = mapping.as_str().to_string();
						result.push_str(value);

						return Ok(Term::Id(Id::from_string(result)));
					}
					Some(_) => return Ok(invalid_iri(value.to_string())),
					None => (),
				}
			}

			// Otherwise, if document relative is true set value to the result of resolving value
			// against the base IRI from active context. Only the basic algorithm in section 5.2 of
			// [RFC3986] is used; neither Syntax-Based Normalization nor Scheme-Based Normalization
			// are performed. Characters additionally allowed in IRI references are treated in the
			// same way that unreserved characters are treated in URI references, per section 6.5 of
			// [RFC3987].
			if document_relative {
				if let Ok(iri_ref) = IriRef::new(value) {
					if let Some(iri) = resolve_iri(iri_ref, active_context.base_iri()) {
						return Ok(Term::Id(Id::iri(iri)));
					}
				}
			}

			// Return value as is.
			Ok(invalid_iri(value.to_string()))
		}
	}
}

/// IRI expansion.
///
/// Default values for `document_relative` and `vocab` should be `false` and
/// `true`.
pub fn expand_iri_simple(
	active_context: &Context,
	value: Nullable<&str>,
	document_relative: bool,
	vocab: bool,
) -> Term {
	match value {
		Nullable::Null => Term::Null,
		Nullable::Some(value) => {
			if let Ok(keyword) = Keyword::try_from(value) {
				return Term::Keyword(keyword);
			}

			if is_keyword_like(value) {
				log::warn!("keyword-like value `{value}`");
				return Term::Null;
			}

			if let Some(term_definition) = active_context.get(value) {
				// If active context has a term definition for value, and the associated IRI mapping
				// is a keyword, return that keyword.
				if let Some(mapped) = term_definition.value() {
					if mapped.is_keyword() {
						return mapped.clone();
					}
				}

				// If vocab is true and the active context has a term definition for value, return the
				// associated IRI mapping.
				if vocab {
					return match term_definition.value() {
						Some(mapped) => mapped.clone(),
						None => Term::Null,
					};
				}
			}

			if value.find(':').map(|i| i > 0).unwrap_or(false) {
				if let Ok(blank_id) = BlankId::new(value) {
					return Term::Id(Id::blank(blank_id.to_owned()));
				}

				if value == "_:" {
					return Term::Id(Id::Invalid("_:".to_string()));
				}

				if let Ok(compact_iri) = CompactIri::new(value) {
					// If active context contains a term definition for prefix having a non-null IRI
					// mapping and the prefix flag of the term definition is true, return the result
					// of concatenating the IRI mapping associated with prefix and suffix.
					if let Some(term_definition) = active_context.get_normal(compact_iri.prefix()) {
						if term_definition.prefix {
							if let Some(mapping) = &term_definition.value {
								let mut result = mapping.as_str().to_string();
								result.push_str(compact_iri.suffix());

								return Term::Id(Id::from_string(result));
							}
						}
					}
				}

				if let Ok(iri) = Iri::new(value) {
					return Term::Id(Id::iri(iri.to_owned()));
				}
			}

			// If vocab is true, and active context has a vocabulary mapping, return the result of
			// concatenating the vocabulary mapping with value.
			if vocab {
				match active_context.vocabulary() {
					Some(Term::Id(mapping)) => {
						let mut result = mapping.as_str().to_string();
						result.push_str(value);

						return Term::Id(Id::from_string(result));
					}
					Some(_) => return invalid_iri(value.to_string()),
					None => (),
				}
			}

			// Otherwise, if document relative is true set value to the result of resolving value
			// against the base IRI from active context. Only the basic algorithm in section 5.2 of
			// [RFC3986] is used; neither Syntax-Based Normalization nor Scheme-Based Normalization
			// are performed. Characters additionally allowed in IRI references are treated in the
			// same way that unreserved characters are treated in URI references, per section 6.5 of
			// [RFC3987].
			if document_relative {
				if let Ok(iri_ref) = IriRef::new(value) {
					if let Some(iri) = resolve_iri(iri_ref, active_context.base_iri()) {
						return Term::Id(Id::iri(iri));
					}
				}
			}

			// Return value as is.
			invalid_iri(value.to_string())
		}
	}
}
