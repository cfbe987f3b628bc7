use crate::{compact_iri, CompactFragment, IriConfusedWithPrefix, Options};
use jsonld_context_processing::Processed;
use jsonld_core::{Loader, Term};
use jsonld_syntax::Keyword;
use json_syntax::Value;

pub type CompactDocumentResult = Result<Value, crate::Error>;

/// Context embedding method.
///
/// This trait provides the `embed_context` method that can be used
/// to include a JSON-LD context to a JSON-LD document.
/// It is used at the end of compaction algorithm to embed the
/// context used to compact the document into the compacted output.
pub trait EmbedContext {
	/// Embeds the given context into the document.
	fn embed_context(
		&mut self,
		context: &Processed<'_>,
		options: Options,
	) -> Result<(), IriConfusedWithPrefix>;
}

/// Compaction function.
pub trait Compact {
	/// Compacts the input document with full options.
	#[allow(async_fn_in_trait)]
	async fn compact_full<'a, L>(
		&'a self,
		context: &'a Processed<'a>,
		loader: &'a L,
		options: Options,
	) -> CompactDocumentResult
	where
		L: Loader;

	/// Compacts the input document.
	#[allow(async_fn_in_trait)]
	async fn compact<'a, L>(
		&'a self,
		context: &'a Processed<'a>,
		loader: &'a L,
	) -> CompactDocumentResult
	where
		L: Loader,
	{
		self.compact_full(context, loader, Options::default()).await
	}
}

/// Compaction of an entire document in expanded form.
impl Compact for Value {
	async fn compact_full<'a, L>(
		&'a self,
		context: &'a Processed<'a>,
		loader: &'a L,
		options: Options,
	) -> CompactDocumentResult
	where
		L: Loader,
	{
		let mut compacted_output = self
			.compact_fragment_full(context.as_ref(), context.as_ref(), None, loader, options)
			.await?;

		compacted_output.embed_context(context, options)?;

		Ok(compacted_output)
	}
}

impl EmbedContext for Value {
	fn embed_context(
		&mut self,
		context: &Processed<'_>,
		options: Options,
	) -> Result<(), IriConfusedWithPrefix> {
		let value = self.take();

		let obj = match value {
			Value::Array(array) => {
				let mut obj = json_syntax::Object::new();

				if !array.is_empty() {
					let key = compact_iri(
						context.as_ref(),
						&Term::Keyword(Keyword::Graph),
						true,
						false,
						options,
					)?;

					obj.insert(key.unwrap().into(), Value::Array(array));
				}

				Some(obj)
			}
			Value::Object(obj) => Some(obj),
			_null => None,
		};

		if let Some(mut obj) = obj {
			let json_context = context.unprocessed().clone();

			if !obj.is_empty()
				&& !json_context.is_null()
				&& !json_context.is_empty_array_or_object()
			{
				obj.insert_front("@context".into(), json_context);
			}

			*self = Value::Object(obj)
		};

		Ok(())
	}
}
