use json_syntax::Value;
use jsonld_core::expanded::is_list_object;

/// Result of the expansion of a single element.
pub(crate) enum Expanded {
	Null,
	Object(Value),
	Array(Vec<Value>),
}

impl Expanded {
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	pub fn is_list(&self) -> bool {
		match self {
			Self::Object(value) => is_list_object(value),
			_ => false,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Self::Null => 0,
			Self::Object(_) => 1,
			Self::Array(items) => items.len(),
		}
	}
}

impl IntoIterator for Expanded {
	type Item = Value;
	type IntoIter = std::vec::IntoIter<Value>;

	fn into_iter(self) -> Self::IntoIter {
		match self {
			Self::Null => Vec::new().into_iter(),
			Self::Object(value) => vec![value].into_iter(),
			Self::Array(items) => items.into_iter(),
		}
	}
}

impl From<Value> for Expanded {
	fn from(value: Value) -> Self {
		Self::Object(value)
	}
}
