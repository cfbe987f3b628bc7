use iref::{Iri, IriBuf};
use rdf_types::{BlankId, BlankIdBuf};
use std::fmt;
use std::hash::Hash;

pub use rdf_types::Id as ValidId;

/// Node identifier.
///
/// Used to reference a node across a document or to a remote document.
/// It can be an identifier (IRI), a blank node identifier for local blank
/// nodes or an invalid reference (a string that is neither an IRI nor blank
/// node identifier).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Id {
	/// Valid node identifier.
	Valid(ValidId<IriBuf, BlankIdBuf>),

	/// Invalid reference.
	Invalid(String),
}

#[allow(clippy::derived_hash_with_manual_eq)]
impl Hash for Id {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		match self {
			Self::Valid(id) => id.hash(state),
			Self::Invalid(id) => id.hash(state),
		}
	}
}

impl Id {
	/// Creates a valid identifier from an IRI.
	pub fn iri(iri: IriBuf) -> Self {
		Self::Valid(ValidId::Iri(iri))
	}

	/// Creates a valid identifier from a blank node identifier.
	pub fn blank(id: BlankIdBuf) -> Self {
		Self::Valid(ValidId::Blank(id))
	}

	/// Parses the given lexical representation into an identifier.
	///
	/// Strings that are neither IRIs nor blank node identifiers are kept
	/// as invalid references.
	pub fn from_string(s: String) -> Self {
		match IriBuf::new(s) {
			Ok(iri) => Self::Valid(ValidId::Iri(iri)),
			Err(e) => match BlankIdBuf::new(e.0) {
				Ok(blank) => Self::Valid(ValidId::Blank(blank)),
				Err(e) => Self::Invalid(e.0),
			},
		}
	}

	pub fn is_valid(&self) -> bool {
		matches!(self, Self::Valid(_))
	}

	pub fn is_iri(&self) -> bool {
		matches!(self, Self::Valid(ValidId::Iri(_)))
	}

	pub fn is_blank(&self) -> bool {
		matches!(self, Self::Valid(ValidId::Blank(_)))
	}

	pub fn as_iri(&self) -> Option<&Iri> {
		match self {
			Self::Valid(ValidId::Iri(iri)) => Some(iri),
			_ => None,
		}
	}

	pub fn as_blank(&self) -> Option<&BlankId> {
		match self {
			Self::Valid(ValidId::Blank(id)) => Some(id),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::Valid(ValidId::Iri(iri)) => iri.as_str(),
			Self::Valid(ValidId::Blank(id)) => id.as_str(),
			Self::Invalid(id) => id.as_str(),
		}
	}

	pub fn into_string(self) -> String {
		match self {
			Self::Valid(ValidId::Iri(iri)) => iri.into_string(),
			Self::Valid(ValidId::Blank(id)) => id.to_string(),
			Self::Invalid(id) => id,
		}
	}
}

impl From<IriBuf> for Id {
	fn from(iri: IriBuf) -> Self {
		Self::iri(iri)
	}
}

impl From<BlankIdBuf> for Id {
	fn from(id: BlankIdBuf) -> Self {
		Self::blank(id)
	}
}

impl PartialEq<str> for Id {
	fn eq(&self, other: &str) -> bool {
		self.as_str() == other
	}
}

impl fmt::Display for Id {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}

impl fmt::Debug for Id {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Valid(id) => write!(f, "Id::Valid({id})"),
			Self::Invalid(id) => write!(f, "Id::Invalid({id})"),
		}
	}
}
