//! This crate is a Rust implementation of the
//! JSON-LD data interchange format.
//!
//! [Linked Data (LD)](https://www.w3.org/standards/semanticweb/data)
//! is a [World Wide Web Consortium (W3C)](https://www.w3.org/)
//! initiative built upon standard Web technologies to create an
//! interrelated network of datasets across the Web.
//! [JSON-LD](https://www.w3.org/TR/json-ld/) is a lightweight syntax
//! to serialize Linked Data in JSON.
//!
//! This crate provides the two central transformations defined by the
//! [JSON-LD API](https://www.w3.org/TR/json-ld-api/):
//!
//!   - *expansion*, rewriting an input document into a canonical form
//!     where every key is an IRI or a keyword, and every value is
//!     explicitly typed;
//!   - *compaction*, the inverse transformation, rewriting an expanded
//!     document against a context into an application-friendly form.
//!
//! Both are exposed through the [`JsonLdProcessor`] trait, implemented
//! by [`RemoteDocument`] and [`RemoteDocumentReference`].
//!
//! # Example
//!
//! ```
//! use jsonld::{JsonLdProcessor, NoLoader, RemoteDocument};
//! use jsonld::syntax::Parse;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (document, _) = jsonld::syntax::Value::parse_str(
//!   r##"
//!   {
//!     "@context": {"name": "http://xmlns.com/foaf/0.1/name"},
//!     "name": "Timothy"
//!   }
//!   "##)
//! .unwrap();
//!
//! let document = RemoteDocument::new(None, None, document);
//!
//! let expanded = document.expand(&NoLoader).await.unwrap();
//! # assert!(expanded.is_array());
//! # }
//! ```
pub use jsonld_compaction as compaction;
pub use jsonld_context_processing as context_processing;
pub use jsonld_core::*;
pub use jsonld_expansion as expansion;
pub use jsonld_syntax as syntax;

pub use compaction::{Compact, CompactFragment};
pub use context_processing::Process;
pub use expansion::Expand;
pub use jsonld_syntax::ErrorCode;

mod options;
mod processor;

pub use options::*;
pub use processor::*;
