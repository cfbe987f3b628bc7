use super::get_entry;
use crate::Error;
use json_syntax::{Object, Value};

/// View over a context definition merged with its `@import`ed context.
///
/// Entries of the importing context take precedence over imported ones.
pub struct Merged<'a> {
	context: &'a Object,
	imported: Option<Object>,
}

impl<'a> Merged<'a> {
	pub fn new(context: &'a Object, imported: Option<Object>) -> Self {
		Self { context, imported }
	}

	/// Returns the value of the given entry, if any.
	pub fn get(&self, key: &str) -> Result<Option<&Value>, Error> {
		match get_entry(self.context, key)? {
			Some(value) => Ok(Some(value)),
			None => match &self.imported {
				Some(imported) => get_entry(imported, key),
				None => Ok(None),
			},
		}
	}

	/// Iterates over the keys of the merged definition.
	///
	/// Keys of the importing context come first, followed by the imported
	/// keys it does not override.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.context
			.iter()
			.map(|e| e.key.as_str())
			.chain(
				self.imported
					.iter()
					.flat_map(|imported| imported.iter())
					.map(|e| e.key.as_str())
					.filter(|key| !self.context.iter().any(|e| e.key.as_str() == *key)),
			)
	}
}
