use crate::{Error, Options, ProcessingStack};
use iref::{IriBuf, IriRef};
use jsonld_core::{Context, ExtractContext, Loader, ProcessingMode, Term};
use jsonld_syntax::{Direction, LenientLangTagBuf, Nullable};
use json_syntax::{Object, Value};

mod define;
mod iri;
mod merged;

pub use define::*;
pub use iri::*;
pub use merged::*;

/// Returns the value of the given key in `object`, if present exactly once.
pub(crate) fn get_entry<'a>(object: &'a Object, key: &str) -> Result<Option<&'a Value>, Error> {
	object
		.get_unique(key)
		.map_err(|_| Error::DuplicateKey(key.to_string()))
}

/// Resolve `iri_ref` against the given base IRI.
pub(crate) fn resolve_iri(iri_ref: &IriRef, base_iri: Option<&IriBuf>) -> Option<IriBuf> {
	match base_iri {
		Some(base_iri) => Some(iri_ref.resolved(base_iri)),
		None => iri_ref.as_iri().map(|iri| iri.to_owned()),
	}
}

// This function tries to follow the recommended context processing algorithm.
// See `https://www.w3.org/TR/json-ld11-api/#context-processing-algorithm`.
//
// The recommended default value for `remote_contexts` is the empty set,
// `false` for `override_protected`, and `true` for `propagate`.
pub async fn process_context<L>(
	active_context: &Context,
	local_context: &Value,
	remote_contexts: ProcessingStack,
	loader: &L,
	base_url: Option<IriBuf>,
	mut options: Options,
) -> Result<Context, Error>
where
	L: Loader,
{
	// 1) Initialize result to the result of cloning active context.
	let mut result = active_context.clone();

	// 2) If `local_context` is an object containing the member @propagate,
	// its value MUST be boolean true or false, set `propagate` to that value.
	if let Value::Object(definition) = local_context {
		if let Some(propagate_value) = get_entry(definition, "@propagate")? {
			if options.processing_mode == ProcessingMode::JsonLd1_0 {
				return Err(Error::InvalidContextEntry);
			}

			match propagate_value {
				Value::Boolean(b) => options.propagate = *b,
				_ => return Err(Error::InvalidPropagateValue),
			}
		}
	}

	// 3) If propagate is false, and result does not have a previous context,
	// set previous context in result to active context.
	if !options.propagate && result.previous_context().is_none() {
		result.set_previous_context(active_context.clone());
	}

	// 4) If local context is not an array, set it to an array containing only local context.
	// 5) For each item context in local context:
	for context in Value::force_as_array(local_context) {
		match context {
			// 5.1) If context is null:
			Value::Null => {
				// If `override_protected` is false and `active_context` contains any protected term
				// definitions, an invalid context nullification has been detected and processing
				// is aborted.
				if !options.override_protected && result.has_protected_items() {
					return Err(Error::InvalidContextNullification);
				} else {
					// Otherwise, initialize result as a newly-initialized active context, setting
					// previous_context in result to the previous value of result if propagate is
					// false. Continue with the next context.
					let previous_result = result;

					// Initialize `result` as a newly-initialized active context, setting both
					// `base_iri` and `original_base_url` to the value of `original_base_url` in
					// active context, ...
					result = Context::new(active_context.original_base_url().cloned());

					// ... and, if `propagate` is `false`, `previous_context` in `result` to the
					// previous value of `result`.
					if !options.propagate {
						result.set_previous_context(previous_result);
					}
				}
			}

			// 5.2) If context is a string,
			Value::String(context_url) => {
				// Initialize `context` to the result of resolving context against base URL.
				// If base URL is not a valid IRI, then context MUST be a valid IRI, otherwise
				// a loading document failed error has been detected and processing is aborted.
				let context_iri = IriRef::new(context_url.as_str())
					.ok()
					.and_then(|iri_ref| resolve_iri(iri_ref, base_url.as_ref()))
					.ok_or(Error::LoadingDocumentFailed)?;

				// If context is in the remote contexts stack, a recursive context inclusion
				// has been detected and processing is aborted; otherwise, push context onto
				// the stack.
				let mut remote_contexts = remote_contexts.clone();
				if !remote_contexts.push(context_iri.clone()) {
					return Err(Error::RecursiveContextInclusion);
				}

				// Set `context document` to the RemoteDocument obtained by dereferencing
				// context using the document loader.
				//
				// If context cannot be dereferenced, or the document from context document
				// cannot be transformed into the internal representation, a loading remote
				// context failed error has been detected and processing is aborted.
				// If the document has no top-level map with an @context entry, an invalid
				// remote context has been detected and processing is aborted.
				// Set loaded context to the value of that entry.
				let loaded_context = loader
					.load(&context_iri)
					.await?
					.into_document()
					.into_ld_context()
					.map_err(|_| Error::InvalidRemoteContext)?;

				// Set result to the result of recursively calling this algorithm, passing result
				// for active context, loaded context for local context, the documentUrl of context
				// document for base URL, and a copy of remote contexts.
				let new_options = Options {
					processing_mode: options.processing_mode,
					override_protected: false,
					propagate: true,
				};

				result = Box::pin(process_context(
					&result,
					&loaded_context,
					remote_contexts,
					loader,
					Some(context_iri),
					new_options,
				))
				.await?;
			}

			// 5.4) Context definition.
			Value::Object(context) => {
				// 5.5) If context has a @version entry:
				if let Some(version_value) = get_entry(context, "@version")? {
					// 5.5.1) The value of @version MUST be 1.1, otherwise an invalid @version
					// value error has been detected.
					match version_value {
						Value::Number(n) if n.as_f64_lossy() == 1.1 => (),
						_ => return Err(Error::InvalidVersionValue),
					}

					// 5.5.2) If processing mode is set to json-ld-1.0, a processing mode conflict
					// error has been detected.
					if options.processing_mode == ProcessingMode::JsonLd1_0 {
						return Err(Error::ProcessingModeConflict);
					}
				}

				// 5.6) If context has an @import entry:
				let import_context = match get_entry(context, "@import")? {
					Some(import_value) => {
						// 5.6.1) If processing mode is json-ld-1.0, an invalid context entry error
						// has been detected.
						if options.processing_mode == ProcessingMode::JsonLd1_0 {
							return Err(Error::InvalidContextEntry);
						}

						// 5.6.2) Its value MUST be a string, otherwise an invalid @import value
						// error has been detected.
						let import_str = import_value.as_str().ok_or(Error::InvalidImportValue)?;

						// 5.6.3) Initialize import to the result of resolving the value of
						// @import.
						let import = IriRef::new(import_str)
							.ok()
							.and_then(|iri_ref| resolve_iri(iri_ref, base_url.as_ref()))
							.ok_or(Error::InvalidImportValue)?;

						// 5.6.4) Dereference import.
						let import_context = loader
							.load(&import)
							.await?
							.into_document()
							.into_ld_context()
							.map_err(|_| Error::InvalidRemoteContext)?;

						// If the dereferenced document has no top-level map with an @context
						// entry, or if the value of @context is not a context definition
						// (i.e., it is not a map), an invalid remote context has been
						// detected and processing is aborted; otherwise, set import context
						// to the value of that entry.
						match import_context {
							Value::Object(import_context_def) => {
								// If `import_context` has a @import entry, an invalid context entry
								// error has been detected and processing is aborted.
								if get_entry(&import_context_def, "@import")?.is_some() {
									return Err(Error::InvalidContextEntry);
								}

								// Set `context` to the result of merging context into
								// `import_context`, replacing common entries with those from
								// `context`.
								Some(import_context_def)
							}
							_ => {
								return Err(Error::InvalidRemoteContext);
							}
						}
					}
					None => None,
				};

				let context = Merged::new(context, import_context);

				// 5.7) If context has a @base entry and remote contexts is empty, i.e.,
				// the currently being processed context is not a remote context:
				if remote_contexts.is_empty() {
					// Initialize value to the value associated with the @base entry.
					if let Some(value) = context.get("@base")? {
						match value {
							Value::Null => {
								// If value is null, remove the base IRI of result.
								result.set_base_iri(None);
							}
							Value::String(iri_ref) => {
								let iri_ref = IriRef::new(iri_ref.as_str())
									.map_err(|_| Error::InvalidBaseIri)?;
								match iri_ref.as_iri() {
									Some(iri) => result.set_base_iri(Some(iri.to_owned())),
									None => {
										let resolved = resolve_iri(iri_ref, result.base_iri())
											.ok_or(Error::InvalidBaseIri)?;
										result.set_base_iri(Some(resolved))
									}
								}
							}
							_ => return Err(Error::InvalidBaseIri),
						}
					}
				}

				// 5.8) If context has a @vocab entry:
				// Initialize value to the value associated with the @vocab entry.
				if let Some(value) = context.get("@vocab")? {
					match value {
						Value::Null => {
							// If value is null, remove any vocabulary mapping from result.
							result.set_vocabulary(None);
						}
						Value::String(value) => {
							// Otherwise, if value is an IRI or blank node identifier, the
							// vocabulary mapping of result is set to the result of IRI
							// expanding value using true for document relative. If it is not
							// an IRI, or a blank node identifier, an invalid vocab mapping
							// error has been detected and processing is aborted.
							// NOTE: The use of blank node identifiers to value for @vocab is
							// obsolete, and may be removed in a future version of JSON-LD.
							match expand_iri_simple(
								&result,
								Nullable::Some(value.as_str()),
								true,
								true,
							) {
								Term::Id(vocab) => result.set_vocabulary(Some(Term::Id(vocab))),
								_ => return Err(Error::InvalidVocabMapping),
							}
						}
						_ => return Err(Error::InvalidVocabMapping),
					}
				}

				// 5.9) If context has a @language entry:
				if let Some(value) = context.get("@language")? {
					match value {
						Value::Null => {
							// 5.9.2) If value is null, remove any default language from result.
							result.set_default_language(None);
						}
						Value::String(tag) => {
							// The language tag is stored lowercased. Processors
							// SHOULD issue a warning when it is not well-formed.
							let (tag, error) =
								LenientLangTagBuf::new(tag.as_str().to_lowercase());

							if error.is_some() {
								log::warn!("malformed language tag `{tag}`");
							}

							result.set_default_language(Some(tag));
						}
						_ => return Err(Error::InvalidDefaultLanguage),
					}
				}

				// 5.10) If context has a @direction entry:
				if let Some(value) = context.get("@direction")? {
					// 5.10.1) If processing mode is json-ld-1.0, an invalid context entry error
					// has been detected and processing is aborted.
					if options.processing_mode == ProcessingMode::JsonLd1_0 {
						return Err(Error::InvalidContextEntry);
					}

					match value {
						Value::Null => {
							// 5.10.3) If value is null, remove any base direction from result.
							result.set_default_base_direction(None);
						}
						Value::String(dir) => match Direction::try_from(dir.as_str()) {
							Ok(dir) => result.set_default_base_direction(Some(dir)),
							Err(_) => return Err(Error::InvalidBaseDirection),
						},
						_ => return Err(Error::InvalidBaseDirection),
					}
				}

				// 5.11) If context has a @protected entry:
				let protected = match context.get("@protected")? {
					Some(Value::Boolean(b)) => {
						if options.processing_mode == ProcessingMode::JsonLd1_0 {
							return Err(Error::InvalidContextEntry);
						}

						*b
					}
					Some(_) => return Err(Error::InvalidProtectedValue),
					None => false,
				};

				// 5.12) Create a map `defined` to keep track of whether or not a term
				// has already been defined or is currently being defined during recursion.
				let mut defined = DefinedTerms::new();

				// 5.13) For each key-value pair in context where key is not
				// @base, @direction, @import, @language, @propagate, @protected, @version,
				// or @vocab,
				// invoke the Create Term Definition algorithm passing result for
				// active context, context for local context, key, defined, base URL,
				// and the value of the @protected entry from context, if any, for protected.
				// (and the value of override protected)
				if context.get("@type")?.is_some() {
					define(
						&mut result,
						&context,
						"@type",
						&mut defined,
						remote_contexts.clone(),
						loader,
						base_url.clone(),
						protected,
						options,
					)
					.await?
				}

				for key in context.keys() {
					if !matches!(
						key,
						"@base"
							| "@direction" | "@import" | "@language"
							| "@propagate" | "@protected" | "@version"
							| "@vocab" | "@type"
					) {
						define(
							&mut result,
							&context,
							key,
							&mut defined,
							remote_contexts.clone(),
							loader,
							base_url.clone(),
							protected,
							options,
						)
						.await?
					}
				}
			}

			// 5.3) Anything else is an invalid local context.
			_ => return Err(Error::InvalidLocalContext),
		}
	}

	Ok(result)
}
