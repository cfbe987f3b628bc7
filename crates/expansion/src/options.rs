use jsonld_core::ProcessingMode;

/// Expansion options.
#[derive(Clone, Copy, Default)]
pub struct Options {
	/// Sets the processing mode.
	pub processing_mode: ProcessingMode,

	/// Term expansion policy.
	///
	/// Default is `Policy::default`.
	pub policy: Policy,

	/// If set to true, input document entries are processed lexicographically.
	/// If false, order is not considered in processing.
	pub ordered: bool,
}

impl Options {
	pub fn unordered(self) -> Self {
		Self {
			ordered: false,
			..self
		}
	}
}

impl From<Options> for jsonld_context_processing::Options {
	fn from(options: Options) -> jsonld_context_processing::Options {
		jsonld_context_processing::Options {
			processing_mode: options.processing_mode,
			..Default::default()
		}
	}
}

/// Action to take on terms that expand to an invalid IRI.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	/// Keep the malformed expansion in the output.
	#[default]
	Keep,

	/// Silently drop the entry.
	Drop,

	/// Abort processing with an error.
	Reject,
}

impl Action {
	pub fn is_reject(&self) -> bool {
		matches!(self, Self::Reject)
	}
}

/// Key expansion policy.
///
/// The default behavior of the expansion algorithm
/// is to drop keys that are not defined in the context unless:
///   - there is a vocabulary mapping (`@vocab`) defined in the context; or
///   - the term contains a `:` character.
/// In other words, a key that cannot be expanded into an
/// IRI or a blank node identifier is dropped unless it contains a `:` character.
///
/// Sometimes, it is preferable to keep undefined keys in the
/// expanded document, or to forbid them completely by raising an error.
/// You can define your preferred policy using one of this type variant
/// with the [`Options::policy`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
	/// How to expand invalid terms.
	pub invalid: Action,

	/// How to expand valid terms when there is no vocabulary mapping.
	pub allow_undefined: bool,
}

impl Policy {
	/// Strict policy: every undefined or malformed key aborts expansion.
	pub fn strict() -> Self {
		Self {
			invalid: Action::Reject,
			allow_undefined: false,
		}
	}
}

impl Default for Policy {
	fn default() -> Self {
		Self {
			invalid: Action::Keep,
			allow_undefined: true,
		}
	}
}
