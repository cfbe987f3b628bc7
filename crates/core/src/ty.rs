use crate::Term;
use iref::{Iri, IriBuf};
use jsonld_syntax::Keyword;
use std::fmt;

/// Type mapping of a term definition.
///
/// Either one of the type keywords allowed in a term definition, or a
/// concrete datatype IRI.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Type {
	Id,
	Json,
	None,
	Vocab,
	Iri(IriBuf),
}

impl Type {
	pub fn as_iri(&self) -> Option<&Iri> {
		match self {
			Self::Iri(iri) => Some(iri),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::Id => "@id",
			Self::Json => "@json",
			Self::None => "@none",
			Self::Vocab => "@vocab",
			Self::Iri(iri) => iri.as_str(),
		}
	}

	/// Returns this type as a term, for IRI compaction.
	pub fn as_term(&self) -> Term {
		match self {
			Self::Id => Term::Keyword(Keyword::Id),
			Self::Json => Term::Keyword(Keyword::Json),
			Self::None => Term::Keyword(Keyword::None),
			Self::Vocab => Term::Keyword(Keyword::Vocab),
			Self::Iri(iri) => Term::from(iri.clone()),
		}
	}
}

impl TryFrom<Term> for Type {
	type Error = Term;

	fn try_from(term: Term) -> Result<Self, Term> {
		match term {
			Term::Keyword(Keyword::Id) => Ok(Self::Id),
			Term::Keyword(Keyword::Json) => Ok(Self::Json),
			Term::Keyword(Keyword::None) => Ok(Self::None),
			Term::Keyword(Keyword::Vocab) => Ok(Self::Vocab),
			term => match term.into_iri() {
				Ok(iri) => Ok(Self::Iri(iri)),
				Err(term) => Err(term),
			},
		}
	}
}

impl From<IriBuf> for Type {
	fn from(iri: IriBuf) -> Self {
		Self::Iri(iri)
	}
}

impl fmt::Display for Type {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}
