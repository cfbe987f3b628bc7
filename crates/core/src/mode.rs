use std::fmt;

/// Processing mode.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum ProcessingMode {
	/// JSON-LD 1.0.
	JsonLd1_0,

	/// JSON-LD 1.1.
	#[default]
	JsonLd1_1,

	/// JSON-LD 1.1 frame expansion.
	///
	/// Behaves as JSON-LD 1.1 everywhere, but relaxes the expansion rules
	/// that would otherwise drop frame-specific constructs.
	JsonLd1_1Frame,
}

impl ProcessingMode {
	pub fn is_1_0(&self) -> bool {
		matches!(self, Self::JsonLd1_0)
	}

	pub fn is_1_1(&self) -> bool {
		!self.is_1_0()
	}

	pub fn is_frame(&self) -> bool {
		matches!(self, Self::JsonLd1_1Frame)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::JsonLd1_0 => "json-ld-1.0",
			Self::JsonLd1_1 => "json-ld-1.1",
			Self::JsonLd1_1Frame => "json-ld-1.1-frame",
		}
	}
}

#[derive(Debug, thiserror::Error)]
#[error("unknown processing mode `{0}`")]
pub struct UnknownProcessingMode(pub String);

impl<'a> TryFrom<&'a str> for ProcessingMode {
	type Error = UnknownProcessingMode;

	fn try_from(name: &'a str) -> Result<ProcessingMode, UnknownProcessingMode> {
		match name {
			"json-ld-1.0" => Ok(ProcessingMode::JsonLd1_0),
			"json-ld-1.1" => Ok(ProcessingMode::JsonLd1_1),
			"json-ld-1.1-frame" => Ok(ProcessingMode::JsonLd1_1Frame),
			other => Err(UnknownProcessingMode(other.to_string())),
		}
	}
}

impl fmt::Display for ProcessingMode {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}
