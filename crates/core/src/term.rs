use crate::{Id, ValidId};
use iref::{Iri, IriBuf};
use jsonld_syntax::Keyword;
use std::fmt;

/// Identifier, keyword or `@null`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
	/// `@null` value.
	Null,

	/// Node identifier.
	Id(Id),

	/// Keyword.
	Keyword(Keyword),
}

impl Term {
	/// Checks if this term is `@null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Term::Null)
	}

	/// Checks if this term is a keyword.
	pub fn is_keyword(&self) -> bool {
		matches!(self, Term::Keyword(_))
	}

	/// Returns a reference to the keyword, if this term is one.
	pub fn as_keyword(&self) -> Option<Keyword> {
		match self {
			Term::Keyword(k) => Some(*k),
			_ => None,
		}
	}

	/// Returns a reference to the IRI representation of the term, if any.
	pub fn as_iri(&self) -> Option<&Iri> {
		match self {
			Term::Id(p) => p.as_iri(),
			_ => None,
		}
	}

	/// Turns this term into an IRI if possible.
	///
	/// If it is not an IRI, returns the term itself.
	pub fn into_iri(self) -> Result<IriBuf, Self> {
		match self {
			Term::Id(Id::Valid(ValidId::Iri(id))) => Ok(id),
			term => Err(term),
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Term::Id(p) => p.as_str(),
			Term::Keyword(k) => k.into_str(),
			Term::Null => "",
		}
	}
}

impl From<IriBuf> for Term {
	fn from(iri: IriBuf) -> Term {
		Term::Id(Id::Valid(ValidId::Iri(iri)))
	}
}

impl From<Id> for Term {
	fn from(id: Id) -> Term {
		Term::Id(id)
	}
}

impl From<Keyword> for Term {
	fn from(k: Keyword) -> Term {
		Term::Keyword(k)
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Term::Id(p) => p.fmt(f),
			Term::Keyword(kw) => kw.fmt(f),
			Term::Null => write!(f, "null"),
		}
	}
}

impl fmt::Debug for Term {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Term::Id(p) => write!(f, "Term::Id({p:?})"),
			Term::Keyword(kw) => write!(f, "Term::Keyword({kw})"),
			Term::Null => write!(f, "Term::Null"),
		}
	}
}
