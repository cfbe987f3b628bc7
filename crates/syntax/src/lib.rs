//! Lexical layer of the JSON-LD processor: keywords, container kinds,
//! text directions, language tags and the error code vocabulary.
mod compact_iri;
mod container;
mod direction;
mod error;
mod keyword;
mod lang;
mod nullable;
pub mod utils;

pub use compact_iri::*;
pub use container::*;
pub use direction::*;
pub use error::*;
pub use json_syntax::{
	object, parse, Array, Kind, Number, NumberBuf, Object, Parse, Print, String, Value,
};
pub use keyword::*;
pub use lang::*;
pub use nullable::*;
