use jsonld_core::Context;
use std::ops::Deref;

/// Processed context, bundled with the unprocessed local context value it
/// was derived from.
///
/// Keeping the raw form around allows the compaction algorithm to embed the
/// original `@context` entry in its output.
pub struct Processed<'a> {
	unprocessed: &'a json_syntax::Value,
	processed: Context,
}

impl<'a> Processed<'a> {
	pub fn new(unprocessed: &'a json_syntax::Value, processed: Context) -> Self {
		Self {
			unprocessed,
			processed,
		}
	}

	pub fn unprocessed(&self) -> &'a json_syntax::Value {
		self.unprocessed
	}

	pub fn into_processed(self) -> Context {
		self.processed
	}

	pub fn as_ref(&self) -> &Context {
		&self.processed
	}
}

impl<'a> Deref for Processed<'a> {
	type Target = Context;

	fn deref(&self) -> &Self::Target {
		&self.processed
	}
}
