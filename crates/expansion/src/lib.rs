//! This library implements the [JSON-LD expansion algorithm](https://www.w3.org/TR/json-ld-api/#expansion-algorithms)
//! for the `jsonld` crate.
//!
//! # Usage
//!
//! The expansion algorithm is provided by the [`Expand`] trait.
use iref::IriBuf;
use jsonld_core::{Context, Loader, RemoteDocument};
use json_syntax::Value;

mod array;
mod document;
mod element;
mod error;
mod expanded;
mod literal;
mod node;
mod options;
mod value;

pub use error::*;
pub use options::*;

pub(crate) use array::*;
pub(crate) use document::filter_top_level_item;
pub(crate) use element::*;
pub(crate) use expanded::*;
pub(crate) use jsonld_context_processing::algorithm::expand_iri_simple as expand_iri;
pub(crate) use literal::*;
pub(crate) use node::*;
pub(crate) use value::*;

/// Result of the document expansion: the expanded document in array form.
pub type ExpansionResult = Result<Value, Error>;

/// Document expansion.
///
/// This trait provides the functions necessary to expand a JSON-LD document
/// into its expanded form. It is implemented by [`json_syntax::Value`]
/// representing a JSON document and [`RemoteDocument`].
///
/// # Example
///
/// ```
/// use jsonld_core::NoLoader;
/// use jsonld_expansion::Expand;
/// use json_syntax::Parse;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// // Parse the input JSON(-LD) document.
/// let (json, _) = json_syntax::Value::parse_str(
///   r##"
///   {
///     "@context": {"name": "http://xmlns.com/foaf/0.1/name"},
///     "name": "Timothy"
///   }
///   "##)
/// .unwrap();
///
/// // Prepare a dummy document loader using `NoLoader`,
/// // since we won't need to load any remote document while expanding this one.
/// let loader = NoLoader;
///
/// // The `expand` method returns the document in expanded form.
/// let expanded = json.expand(&loader).await.unwrap();
/// # assert!(expanded.is_array());
/// # }
/// ```
pub trait Expand {
	/// Returns the default base URL passed to the expansion algorithm
	/// and used to initialize the default empty context when calling
	/// [`Expand::expand`].
	fn default_base_url(&self) -> Option<&IriBuf>;

	/// Expand the document with full options.
	///
	/// The `context` is used as initial context.
	/// The `base_url` is the initial base URL used to resolve relative IRI
	/// references.
	/// The given `loader` is used to load remote documents (such as contexts)
	/// imported by the input and required during expansion.
	/// The `options` are used to tweak the expansion algorithm.
	#[allow(async_fn_in_trait)]
	async fn expand_full<L>(
		&self,
		context: Context,
		base_url: Option<&IriBuf>,
		loader: &L,
		options: Options,
	) -> ExpansionResult
	where
		L: Loader;

	/// Expand the input JSON-LD document.
	///
	/// The given `loader` is used to load remote documents (such as contexts)
	/// imported by the input and required during expansion.
	/// The expansion algorithm is called with an empty initial context with
	/// a base URL given by [`Expand::default_base_url`].
	#[allow(async_fn_in_trait)]
	async fn expand<L>(&self, loader: &L) -> ExpansionResult
	where
		L: Loader,
	{
		self.expand_full(
			Context::new(self.default_base_url().cloned()),
			self.default_base_url(),
			loader,
			Options::default(),
		)
		.await
	}
}

/// Value expansion without base URL.
impl Expand for Value {
	fn default_base_url(&self) -> Option<&IriBuf> {
		None
	}

	async fn expand_full<L>(
		&self,
		context: Context,
		base_url: Option<&IriBuf>,
		loader: &L,
		options: Options,
	) -> ExpansionResult
	where
		L: Loader,
	{
		document::expand(self, context, base_url, loader, options).await
	}
}

/// Remote document expansion.
///
/// The default base URL given to the expansion algorithm is the URL of
/// the remote document.
impl Expand for RemoteDocument {
	fn default_base_url(&self) -> Option<&IriBuf> {
		self.url()
	}

	async fn expand_full<L>(
		&self,
		context: Context,
		base_url: Option<&IriBuf>,
		loader: &L,
		options: Options,
	) -> ExpansionResult
	where
		L: Loader,
	{
		self.document()
			.expand_full(context, base_url, loader, options)
			.await
	}
}
