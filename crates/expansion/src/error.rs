use jsonld_syntax::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Context processing failed: {0}")]
	ContextProcessing(jsonld_context_processing::Error),

	#[error("Invalid `@index` value")]
	InvalidIndexValue,

	#[error("Invalid set or list object")]
	InvalidSetOrListObject,

	#[error("Invalid `@reverse` property map")]
	InvalidReversePropertyMap,

	#[error("Invalid `@type` value")]
	InvalidTypeValue,

	#[error("Key `{0}` expansion failed")]
	KeyExpansionFailed(String),

	#[error("Invalid `@reverse` property value")]
	InvalidReversePropertyValue,

	#[error("Invalid `@language` map value")]
	InvalidLanguageMapValue,

	#[error("Colliding keywords")]
	CollidingKeywords,

	#[error("Invalid `@id` value")]
	InvalidIdValue,

	#[error("Invalid `@included` value")]
	InvalidIncludedValue,

	#[error("Invalid `@reverse` value")]
	InvalidReverseValue,

	#[error("Invalid `@nest` value")]
	InvalidNestValue,

	#[error("List of lists")]
	ListOfLists,

	#[error("Invalid language tagged string")]
	InvalidLanguageTaggedString,

	#[error("Invalid base `@direction`")]
	InvalidBaseDirection,

	#[error("Invalid typed value")]
	InvalidTypedValue,

	#[error("Invalid value object")]
	InvalidValueObject,

	#[error("Invalid value object value")]
	InvalidValueObjectValue,

	#[error("Invalid language tagged value")]
	InvalidLanguageTaggedValue,

	#[error("Duplicate key `{0}`")]
	DuplicateKey(String),
}

impl Error {
	pub fn code(&self) -> ErrorCode {
		match self {
			Self::ContextProcessing(e) => e.code(),
			Self::InvalidIndexValue => ErrorCode::InvalidIndexValue,
			Self::InvalidSetOrListObject => ErrorCode::InvalidSetOrListObject,
			Self::InvalidReversePropertyMap => ErrorCode::InvalidReversePropertyMap,
			Self::InvalidTypeValue => ErrorCode::InvalidTypeValue,
			Self::KeyExpansionFailed(_) => ErrorCode::KeyExpansionFailed,
			Self::InvalidReversePropertyValue => ErrorCode::InvalidReversePropertyValue,
			Self::InvalidLanguageMapValue => ErrorCode::InvalidLanguageMapValue,
			Self::CollidingKeywords => ErrorCode::CollidingKeywords,
			Self::InvalidIdValue => ErrorCode::InvalidIdValue,
			Self::InvalidIncludedValue => ErrorCode::InvalidIncludedValue,
			Self::InvalidReverseValue => ErrorCode::InvalidReverseValue,
			Self::InvalidNestValue => ErrorCode::InvalidNestValue,
			Self::ListOfLists => ErrorCode::ListOfLists,
			Self::InvalidLanguageTaggedString => ErrorCode::InvalidLanguageTaggedString,
			Self::InvalidBaseDirection => ErrorCode::InvalidBaseDirection,
			Self::InvalidTypedValue => ErrorCode::InvalidTypedValue,
			Self::InvalidValueObject => ErrorCode::InvalidValueObject,
			Self::InvalidValueObjectValue => ErrorCode::InvalidValueObjectValue,
			Self::InvalidLanguageTaggedValue => ErrorCode::InvalidLanguageTaggedValue,
			Self::DuplicateKey(_) => ErrorCode::DuplicateKey,
		}
	}

	pub(crate) fn duplicate_key(key: &str) -> Self {
		Self::DuplicateKey(key.to_string())
	}
}

impl From<jsonld_context_processing::Error> for Error {
	fn from(e: jsonld_context_processing::Error) -> Self {
		Self::ContextProcessing(e)
	}
}
