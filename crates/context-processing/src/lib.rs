//! JSON-LD context processing types and algorithms.
pub use jsonld_core::{Context, ProcessingMode};
use jsonld_core::{ExtractContextError, LoadError, Loader};
use jsonld_syntax::ErrorCode;

pub mod algorithm;
mod processed;
mod stack;

pub use processed::*;
pub use stack::ProcessingStack;

/// Errors that can happen during context processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid context nullification")]
	InvalidContextNullification,

	#[error("Remote document loading failed")]
	LoadingDocumentFailed,

	#[error("Recursive context inclusion")]
	RecursiveContextInclusion,

	#[error("Processing mode conflict")]
	ProcessingModeConflict,

	#[error("Invalid `@context` entry")]
	InvalidContextEntry,

	#[error("Invalid local context")]
	InvalidLocalContext,

	#[error("Invalid `@version` value")]
	InvalidVersionValue,

	#[error("Invalid `@import` value")]
	InvalidImportValue,

	#[error("Invalid `@propagate` value")]
	InvalidPropagateValue,

	#[error("Invalid `@protected` value")]
	InvalidProtectedValue,

	#[error("Invalid remote context")]
	InvalidRemoteContext,

	#[error("Invalid base IRI")]
	InvalidBaseIri,

	#[error("Invalid vocabulary mapping")]
	InvalidVocabMapping,

	#[error("Invalid default language")]
	InvalidDefaultLanguage,

	#[error("Invalid base direction")]
	InvalidBaseDirection,

	#[error("Cyclic IRI mapping")]
	CyclicIriMapping,

	#[error("Invalid term definition")]
	InvalidTermDefinition,

	#[error("Keyword redefinition")]
	KeywordRedefinition,

	#[error("Invalid type mapping")]
	InvalidTypeMapping,

	#[error("Invalid language mapping")]
	InvalidLanguageMapping,

	#[error("Invalid reverse property")]
	InvalidReverseProperty,

	#[error("Invalid IRI mapping")]
	InvalidIriMapping,

	#[error("Invalid keyword alias")]
	InvalidKeywordAlias,

	#[error("Invalid container mapping")]
	InvalidContainerMapping,

	#[error("Invalid `@nest` value")]
	InvalidNestValue,

	#[error("Invalid `@prefix` value")]
	InvalidPrefixValue,

	#[error("Invalid scoped context")]
	InvalidScopedContext,

	#[error("Protected term redefinition")]
	ProtectedTermRedefinition,

	#[error("Duplicate key `{0}`")]
	DuplicateKey(String),

	#[error(transparent)]
	ContextLoadingFailed(#[from] LoadError),

	#[error("Unable to extract JSON-LD context: {0}")]
	ContextExtractionFailed(ExtractContextError),
}

impl Error {
	pub fn code(&self) -> ErrorCode {
		match self {
			Self::InvalidContextNullification => ErrorCode::InvalidContextNullification,
			Self::LoadingDocumentFailed => ErrorCode::LoadingDocumentFailed,
			Self::RecursiveContextInclusion => ErrorCode::RecursiveContextInclusion,
			Self::ProcessingModeConflict => ErrorCode::ProcessingModeConflict,
			Self::InvalidContextEntry => ErrorCode::InvalidContextEntry,
			Self::InvalidLocalContext => ErrorCode::InvalidLocalContext,
			Self::InvalidVersionValue => ErrorCode::InvalidVersionValue,
			Self::InvalidImportValue => ErrorCode::InvalidImportValue,
			Self::InvalidPropagateValue => ErrorCode::InvalidPropagateValue,
			Self::InvalidProtectedValue => ErrorCode::InvalidProtectedValue,
			Self::InvalidRemoteContext => ErrorCode::InvalidRemoteContext,
			Self::InvalidBaseIri => ErrorCode::InvalidBaseIri,
			Self::InvalidVocabMapping => ErrorCode::InvalidVocabMapping,
			Self::InvalidDefaultLanguage => ErrorCode::InvalidDefaultLanguage,
			Self::InvalidBaseDirection => ErrorCode::InvalidBaseDirection,
			Self::CyclicIriMapping => ErrorCode::CyclicIriMapping,
			Self::InvalidTermDefinition => ErrorCode::InvalidTermDefinition,
			Self::KeywordRedefinition => ErrorCode::KeywordRedefinition,
			Self::InvalidTypeMapping => ErrorCode::InvalidTypeMapping,
			Self::InvalidLanguageMapping => ErrorCode::InvalidLanguageMapping,
			Self::InvalidReverseProperty => ErrorCode::InvalidReverseProperty,
			Self::InvalidIriMapping => ErrorCode::InvalidIriMapping,
			Self::InvalidKeywordAlias => ErrorCode::InvalidKeywordAlias,
			Self::InvalidContainerMapping => ErrorCode::InvalidContainerMapping,
			Self::InvalidNestValue => ErrorCode::InvalidNestValue,
			Self::InvalidPrefixValue => ErrorCode::InvalidPrefixValue,
			Self::InvalidScopedContext => ErrorCode::InvalidScopedContext,
			Self::ProtectedTermRedefinition => ErrorCode::ProtectedTermRedefinition,
			Self::DuplicateKey(_) => ErrorCode::DuplicateKey,
			Self::ContextLoadingFailed(_) => ErrorCode::LoadingRemoteContextFailed,
			Self::ContextExtractionFailed(_) => ErrorCode::LoadingRemoteContextFailed,
		}
	}
}

/// Result of context processing functions.
pub type ProcessingResult<'a> = Result<Processed<'a>, Error>;

/// Context processing.
///
/// Implemented by [`json_syntax::Value`]: any JSON value can be interpreted
/// as a local context (although only null, strings, objects and arrays of
/// these are valid ones).
pub trait Process {
	/// Process the local context with specific options.
	#[allow(async_fn_in_trait)]
	async fn process_full<L>(
		&self,
		active_context: &Context,
		loader: &L,
		base_url: Option<iref::IriBuf>,
		options: Options,
	) -> ProcessingResult<'_>
	where
		L: Loader;

	/// Process the local context with the given initial active context and
	/// the default options: `override_protected` is `false` and `propagate`
	/// is `true`.
	#[allow(async_fn_in_trait)]
	async fn process<L>(
		&self,
		loader: &L,
		base_url: Option<iref::IriBuf>,
	) -> ProcessingResult<'_>
	where
		L: Loader,
	{
		let active_context = Context::new(base_url.clone());
		self.process_full(&active_context, loader, base_url, Options::default())
			.await
	}
}

impl Process for json_syntax::Value {
	async fn process_full<L>(
		&self,
		active_context: &Context,
		loader: &L,
		base_url: Option<iref::IriBuf>,
		options: Options,
	) -> ProcessingResult<'_>
	where
		L: Loader,
	{
		let context = algorithm::process_context(
			active_context,
			self,
			ProcessingStack::default(),
			loader,
			base_url,
			options,
		)
		.await?;

		Ok(Processed::new(self, context))
	}
}

/// Options of the Context Processing Algorithm.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Options {
	/// The processing mode.
	pub processing_mode: ProcessingMode,

	/// Override protected definitions.
	pub override_protected: bool,

	/// Propagate the processed context.
	pub propagate: bool,
}

impl Options {
	/// Return the same set of options, but with `override_protected` set to `true`.
	#[must_use]
	pub fn with_override(&self) -> Options {
		let mut opt = *self;
		opt.override_protected = true;
		opt
	}

	/// Return the same set of options, but with `override_protected` set to `false`.
	#[must_use]
	pub fn with_no_override(&self) -> Options {
		let mut opt = *self;
		opt.override_protected = false;
		opt
	}

	/// Return the same set of options, but with `propagate` set to `false`.
	#[must_use]
	pub fn without_propagation(&self) -> Options {
		let mut opt = *self;
		opt.propagate = false;
		opt
	}
}

impl Default for Options {
	fn default() -> Options {
		Options {
			processing_mode: ProcessingMode::default(),
			override_protected: false,
			propagate: true,
		}
	}
}
