//! JSON-LD core types.
pub use jsonld_syntax::{Direction, Keyword, LenientLangTag, LenientLangTagBuf, Nullable};

mod container;
pub mod context;
pub mod expanded;
mod id;
pub mod loader;
mod mode;
mod term;
mod ty;

pub use container::Container;
pub use context::Context;
pub use id::*;
pub use jsonld_syntax::ContainerKind;
pub use loader::*;
pub use mode::*;
pub use term::*;
pub use ty::*;
