use crate::{Container, Term, Type};
use indexmap::IndexMap;
use iref::IriBuf;
use jsonld_syntax::{Direction, Keyword, LenientLangTagBuf, Nullable};

/// Term definition.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TermDefinition {
	/// IRI mapping.
	///
	/// `None` records a term explicitly defined to `null`: the term is not
	/// used for IRI expansion but is retained so that future redefinitions
	/// can be detected.
	pub value: Option<Term>,

	/// Prefix flag.
	pub prefix: bool,

	/// Protected flag.
	pub protected: bool,

	/// Reverse property flag.
	pub reverse_property: bool,

	/// Optional base URL.
	pub base_url: Option<IriBuf>,

	/// Optional scoped context, kept in raw form and processed at use-site.
	pub context: Option<Box<json_syntax::Value>>,

	/// Container mapping.
	pub container: Container,

	/// Optional direction mapping.
	pub direction: Option<Nullable<Direction>>,

	/// Optional index mapping.
	pub index: Option<String>,

	/// Optional language mapping.
	pub language: Option<Nullable<LenientLangTagBuf>>,

	/// Optional nest value.
	pub nest: Option<String>,

	/// Optional type mapping.
	pub typ: Option<Type>,
}

impl TermDefinition {
	/// Compares two definitions ignoring the `protected` flag.
	pub fn eq_modulo_protected(&self, other: &Self) -> bool {
		self.value == other.value
			&& self.prefix == other.prefix
			&& self.reverse_property == other.reverse_property
			&& self.base_url == other.base_url
			&& self.context == other.context
			&& self.container == other.container
			&& self.direction == other.direction
			&& self.index == other.index
			&& self.language == other.language
			&& self.nest == other.nest
			&& self.typ == other.typ
	}
}

/// `@type` keyword redefinition.
///
/// JSON-LD 1.1 allows `@type` to be redefined with an `@container: @set`
/// entry and a `@protected` flag, and nothing else.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TypeTermDefinition {
	/// Whether the redefinition carries `@container: @set`.
	pub container_set: bool,

	/// Protected flag.
	pub protected: bool,
}

impl TypeTermDefinition {
	pub fn eq_modulo_protected(&self, other: &Self) -> bool {
		self.container_set == other.container_set
	}
}

static TERM_TYPE: Term = Term::Keyword(Keyword::Type);

/// Reference to a term definition: either a normal definition or the
/// `@type` keyword redefinition.
#[derive(Clone, Copy)]
pub enum TermDefinitionRef<'a> {
	Normal(&'a TermDefinition),
	Type(&'a TypeTermDefinition),
}

impl<'a> TermDefinitionRef<'a> {
	pub fn value(&self) -> Option<&'a Term> {
		match self {
			Self::Normal(d) => d.value.as_ref(),
			Self::Type(_) => Some(&TERM_TYPE),
		}
	}

	pub fn prefix(&self) -> bool {
		match self {
			Self::Normal(d) => d.prefix,
			Self::Type(_) => false,
		}
	}

	pub fn protected(&self) -> bool {
		match self {
			Self::Normal(d) => d.protected,
			Self::Type(d) => d.protected,
		}
	}

	pub fn reverse_property(&self) -> bool {
		match self {
			Self::Normal(d) => d.reverse_property,
			Self::Type(_) => false,
		}
	}

	pub fn base_url(&self) -> Option<&'a IriBuf> {
		match self {
			Self::Normal(d) => d.base_url.as_ref(),
			Self::Type(_) => None,
		}
	}

	pub fn context(&self) -> Option<&'a json_syntax::Value> {
		match self {
			Self::Normal(d) => d.context.as_deref(),
			Self::Type(_) => None,
		}
	}

	pub fn container(&self) -> Container {
		match self {
			Self::Normal(d) => d.container,
			Self::Type(d) => {
				if d.container_set {
					Container::Set
				} else {
					Container::None
				}
			}
		}
	}

	pub fn direction(&self) -> Option<Nullable<Direction>> {
		match self {
			Self::Normal(d) => d.direction,
			Self::Type(_) => None,
		}
	}

	pub fn index(&self) -> Option<&'a str> {
		match self {
			Self::Normal(d) => d.index.as_deref(),
			Self::Type(_) => None,
		}
	}

	pub fn language(&self) -> Option<Nullable<&'a LenientLangTagBuf>> {
		match self {
			Self::Normal(d) => d.language.as_ref().map(Nullable::as_ref),
			Self::Type(_) => None,
		}
	}

	pub fn nest(&self) -> Option<&'a str> {
		match self {
			Self::Normal(d) => d.nest.as_deref(),
			Self::Type(_) => None,
		}
	}

	pub fn typ(&self) -> Option<&'a Type> {
		match self {
			Self::Normal(d) => d.typ.as_ref(),
			Self::Type(_) => None,
		}
	}
}

/// Context term definitions.
///
/// The table preserves term insertion order; every ordered traversal of the
/// table sorts explicitly.
#[derive(Clone, Default)]
pub struct Definitions {
	normal: IndexMap<String, TermDefinition>,
	type_: Option<TypeTermDefinition>,
}

impl Definitions {
	/// Returns the number of defined terms.
	pub fn len(&self) -> usize {
		if self.type_.is_some() {
			self.normal.len() + 1
		} else {
			self.normal.len()
		}
	}

	/// Checks if no terms are defined.
	pub fn is_empty(&self) -> bool {
		self.type_.is_none() && self.normal.is_empty()
	}

	/// Returns a reference to the definition of the given `term`, if any.
	pub fn get(&self, term: &str) -> Option<TermDefinitionRef> {
		if term == "@type" {
			self.type_.as_ref().map(TermDefinitionRef::Type)
		} else {
			self.normal.get(term).map(TermDefinitionRef::Normal)
		}
	}

	/// Returns a reference to the normal definition of the given `term`, if any.
	pub fn get_normal(&self, term: &str) -> Option<&TermDefinition> {
		self.normal.get(term)
	}

	/// Returns a reference to the `@type` definition, if any.
	pub fn get_type(&self) -> Option<&TypeTermDefinition> {
		self.type_.as_ref()
	}

	pub fn contains_term(&self, term: &str) -> bool {
		self.get(term).is_some()
	}

	/// Sets the normal definition for the given term.
	///
	/// Passing `None` removes the definition. Returns the previous
	/// definition, if any.
	pub fn set_normal(
		&mut self,
		term: String,
		definition: Option<TermDefinition>,
	) -> Option<TermDefinition> {
		match definition {
			Some(definition) => self.normal.insert(term, definition),
			None => self.normal.shift_remove(&term),
		}
	}

	/// Sets the `@type` definition.
	pub fn set_type(&mut self, definition: Option<TypeTermDefinition>) -> Option<TypeTermDefinition> {
		std::mem::replace(&mut self.type_, definition)
	}

	/// Iterates over the normal term definitions, in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &TermDefinition)> {
		self.normal.iter().map(|(k, d)| (k.as_str(), d))
	}

	/// Checks if any definition is protected.
	pub fn has_protected_items(&self) -> bool {
		self.type_.map(|d| d.protected).unwrap_or(false)
			|| self.normal.values().any(|d| d.protected)
	}
}
