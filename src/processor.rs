use crate::{
	compaction::{self, Compact},
	context_processing::{self, Process},
	expansion,
	syntax::ErrorCode,
	Context, ContextLoadError, Expand, LoadError, Loader, Options, RemoteDocument,
	RemoteDocumentReference,
};
use json_syntax::Value;

/// Error that can be raised by the [`JsonLdProcessor::expand`] function.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
	/// Document expansion failed.
	#[error("Expansion failed: {0}")]
	Expansion(expansion::Error),

	/// Context processing failed.
	#[error("Context processing failed: {0}")]
	ContextProcessing(context_processing::Error),

	/// Remote document loading failed with the given precise error.
	#[error(transparent)]
	Loading(#[from] LoadError),

	#[error(transparent)]
	ContextLoading(ContextLoadError),
}

impl ExpandError {
	/// Returns the code of this error.
	pub fn code(&self) -> ErrorCode {
		match self {
			Self::Expansion(e) => e.code(),
			Self::ContextProcessing(e) => e.code(),
			Self::Loading(_) => ErrorCode::LoadingDocumentFailed,
			Self::ContextLoading(_) => ErrorCode::LoadingRemoteContextFailed,
		}
	}
}

/// Result returned by the [`JsonLdProcessor::expand`] function.
pub type ExpandResult = Result<Value, ExpandError>;

/// Error that can be raised by the [`JsonLdProcessor::compact`] function.
#[derive(Debug, thiserror::Error)]
pub enum CompactError {
	/// Document expansion failed.
	#[error("Expansion failed: {0}")]
	Expand(ExpandError),

	/// Context processing failed.
	#[error("Context processing failed: {0}")]
	ContextProcessing(context_processing::Error),

	/// Document compaction failed.
	#[error("Compaction failed: {0}")]
	Compaction(compaction::Error),

	/// Remote document loading failed.
	#[error(transparent)]
	Loading(#[from] LoadError),

	#[error(transparent)]
	ContextLoading(ContextLoadError),
}

impl CompactError {
	/// Returns the code of this error.
	pub fn code(&self) -> ErrorCode {
		match self {
			Self::Expand(e) => e.code(),
			Self::ContextProcessing(e) => e.code(),
			Self::Compaction(e) => e.code(),
			Self::Loading(_) => ErrorCode::LoadingDocumentFailed,
			Self::ContextLoading(_) => ErrorCode::LoadingRemoteContextFailed,
		}
	}
}

/// Result returned by the [`JsonLdProcessor::compact`] function.
pub type CompactResult = Result<Value, CompactError>;

/// Application Programming Interface.
///
/// The `JsonLdProcessor` interface is the high-level programming structure
/// that developers use to access the JSON-LD transformation methods.
///
/// It is implemented for [`RemoteDocument`] and [`RemoteDocumentReference`].
///
/// # Methods naming
///
/// Each processing function is declined in two variants depending on your
/// needs, with the following suffix convention:
///
///   - no suffix: the simplest version, using the default options;
///   - `_full`: allows passing custom [`Options`].
pub trait JsonLdProcessor {
	/// Expand the document with custom options.
	#[allow(async_fn_in_trait)]
	async fn expand_full<L>(&self, loader: &L, options: Options) -> ExpandResult
	where
		L: Loader;

	/// Expand the document.
	#[allow(async_fn_in_trait)]
	async fn expand<L>(&self, loader: &L) -> ExpandResult
	where
		L: Loader,
	{
		self.expand_full(loader, Options::default()).await
	}

	/// Compact the document against the given context, with custom options.
	#[allow(async_fn_in_trait)]
	async fn compact_full<L>(&self, context: &Value, loader: &L, options: Options) -> CompactResult
	where
		L: Loader;

	/// Compact the document against the given context.
	#[allow(async_fn_in_trait)]
	async fn compact<L>(&self, context: &Value, loader: &L) -> CompactResult
	where
		L: Loader,
	{
		self.compact_full(context, loader, Options::default()).await
	}
}

impl JsonLdProcessor for RemoteDocument {
	async fn expand_full<L>(&self, loader: &L, mut options: Options) -> ExpandResult
	where
		L: Loader,
	{
		let mut active_context = Context::new(options.base.clone().or_else(|| self.url().cloned()));

		// If an expand context is given, process it into the initial active
		// context.
		if let Some(expand_context) = options.expand_context.take() {
			active_context = expand_context
				.load_context(loader)
				.await
				.map_err(ExpandError::ContextLoading)?
				.into_document()
				.process_full(
					&active_context,
					loader,
					active_context.original_base_url().cloned(),
					options.context_processing_options(),
				)
				.await
				.map_err(ExpandError::ContextProcessing)?
				.into_processed()
		};

		// If the document was served with a context link header, process the
		// referenced context.
		if let Some(context_url) = self.context_url() {
			active_context = RemoteDocumentReference::Iri(context_url.clone())
				.load_context(loader)
				.await
				.map_err(ExpandError::ContextLoading)?
				.into_document()
				.process_full(
					&active_context,
					loader,
					Some(context_url.clone()),
					options.context_processing_options(),
				)
				.await
				.map_err(ExpandError::ContextProcessing)?
				.into_processed()
		}

		let base_url = self.url().or(options.base.as_ref()).cloned();

		self.document()
			.expand_full(
				active_context,
				base_url.as_ref(),
				loader,
				options.expansion_options(),
			)
			.await
			.map_err(ExpandError::Expansion)
	}

	async fn compact_full<L>(&self, context: &Value, loader: &L, options: Options) -> CompactResult
	where
		L: Loader,
	{
		let expanded = JsonLdProcessor::expand_full(self, loader, options.clone())
			.await
			.map_err(CompactError::Expand)?;

		// If the given context is a map having an `@context` entry, use that
		// entry as the local context.
		let context = match context {
			Value::Object(object) => match object.get_unique("@context").ok().flatten() {
				Some(local_context) => local_context,
				None => context,
			},
			other => other,
		};

		let base_url = options.base.clone().or_else(|| self.url().cloned());
		let active_context = context
			.process_full(
				&Context::new(base_url.clone()),
				loader,
				base_url,
				options.context_processing_options(),
			)
			.await
			.map_err(CompactError::ContextProcessing)?;

		expanded
			.compact_full(&active_context, loader, options.compaction_options())
			.await
			.map_err(CompactError::Compaction)
	}
}

impl JsonLdProcessor for RemoteDocumentReference {
	async fn expand_full<L>(&self, loader: &L, options: Options) -> ExpandResult
	where
		L: Loader,
	{
		let doc = self.clone().load(loader).await?;
		JsonLdProcessor::expand_full(&doc, loader, options).await
	}

	async fn compact_full<L>(&self, context: &Value, loader: &L, options: Options) -> CompactResult
	where
		L: Loader,
	{
		let doc = self.clone().load(loader).await?;
		JsonLdProcessor::compact_full(&doc, context, loader, options).await
	}
}

