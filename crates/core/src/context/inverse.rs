use super::Context;
use crate::{Container, Direction, LenientLangTag, LenientLangTagBuf, Term, Type};
use hashbrown::HashMap;
use jsonld_syntax::{utils::cmp_shortest_lex, Nullable};
use std::fmt;

/// Type discriminator of an inverse-context selection.
#[derive(Clone, PartialEq, Eq)]
pub enum TypeSelection {
	Reverse,
	Any,
	Type(Type),
}

impl fmt::Debug for TypeSelection {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			TypeSelection::Reverse => write!(f, "Reverse"),
			TypeSelection::Any => write!(f, "Any"),
			TypeSelection::Type(ty) => write!(f, "Type({ty:?})"),
		}
	}
}

struct InverseType {
	reverse: Option<String>,
	any: Option<String>,
	map: HashMap<Type, String>,
}

impl InverseType {
	fn select(&self, selection: &TypeSelection) -> Option<&str> {
		match selection {
			TypeSelection::Reverse => self.reverse.as_deref(),
			TypeSelection::Any => self.any.as_deref(),
			TypeSelection::Type(ty) => self.map.get(ty).map(String::as_str),
		}
	}

	fn set_any(&mut self, term: &str) {
		if self.any.is_none() {
			self.any = Some(term.to_string())
		}
	}

	fn set_none(&mut self, term: &str) {
		self.set(&Type::None, term)
	}

	fn set(&mut self, ty: &Type, term: &str) {
		if !self.map.contains_key(ty) {
			self.map.insert(ty.clone(), term.to_string());
		}
	}
}

type LangDir = Nullable<(Option<LenientLangTagBuf>, Option<Direction>)>;

struct InverseLang {
	any: Option<String>,
	map: HashMap<LangDir, String>,
}

/// Language discriminator of an inverse-context selection.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LangSelection<'a> {
	Any,
	Lang(Nullable<(Option<&'a LenientLangTag>, Option<Direction>)>),
}

impl InverseLang {
	fn select(&self, selection: LangSelection) -> Option<&str> {
		match selection {
			LangSelection::Any => self.any.as_deref(),
			LangSelection::Lang(lang_dir) => {
				let lang_dir = lang_dir.map(|(l, d)| (l.map(|l| l.to_owned()), d));
				self.map.get(&lang_dir).map(String::as_str)
			}
		}
	}

	fn set_any(&mut self, term: &str) {
		if self.any.is_none() {
			self.any = Some(term.to_string())
		}
	}

	fn set_none(&mut self, term: &str) {
		self.set(Nullable::Some((None, None)), term)
	}

	fn set(
		&mut self,
		lang_dir: Nullable<(Option<&LenientLangTag>, Option<Direction>)>,
		term: &str,
	) {
		let lang_dir = lang_dir.map(|(l, d)| (l.map(|l| l.to_owned()), d));
		self.map
			.entry(lang_dir)
			.or_insert_with(|| term.to_string());
	}
}

struct InverseContainer {
	language: InverseLang,
	typ: InverseType,
	any: Any,
}

struct Any {
	none: String,
}

impl InverseContainer {
	pub fn new(term: &str) -> InverseContainer {
		InverseContainer {
			language: InverseLang {
				any: None,
				map: HashMap::new(),
			},
			typ: InverseType {
				reverse: None,
				any: None,
				map: HashMap::new(),
			},
			any: Any {
				none: term.to_string(),
			},
		}
	}
}

/// Container-indexed inverse entries of a single IRI.
pub struct InverseDefinition {
	map: HashMap<Container, InverseContainer>,
}

impl InverseDefinition {
	fn new() -> InverseDefinition {
		InverseDefinition {
			map: HashMap::new(),
		}
	}

	fn get(&self, container: &Container) -> Option<&InverseContainer> {
		self.map.get(container)
	}

	fn contains(&self, container: &Container) -> bool {
		self.map.contains_key(container)
	}

	fn reference_mut<F: FnOnce() -> InverseContainer>(
		&mut self,
		container: &Container,
		insert: F,
	) -> &mut InverseContainer {
		if !self.contains(container) {
			self.map.insert(*container, insert());
		}
		self.map.get_mut(container).unwrap()
	}

	/// Selects the first term matching one of the given containers and the
	/// given discriminator preferences.
	pub fn select(&self, containers: &[Container], selection: &Selection) -> Option<&str> {
		for container in containers {
			if let Some(type_lang_map) = self.get(container) {
				match selection {
					Selection::Any => return Some(&type_lang_map.any.none),
					Selection::Type(preferred_values) => {
						for item in preferred_values {
							if let Some(term) = type_lang_map.typ.select(item) {
								return Some(term);
							}
						}
					}
					Selection::Lang(preferred_values) => {
						for item in preferred_values {
							if let Some(term) = type_lang_map.language.select(*item) {
								return Some(term);
							}
						}
					}
				}
			}
		}

		None
	}
}

/// Inverse context.
///
/// Index mapping every IRI of a context's term definitions to the best term
/// to use for a given value shape. Derived solely from the term table and
/// recomputed whenever a new context is derived.
pub struct InverseContext {
	map: HashMap<Term, InverseDefinition>,
}

/// Discriminator preference list for term selection.
pub enum Selection<'a> {
	Any,
	Type(Vec<TypeSelection>),
	Lang(Vec<LangSelection<'a>>),
}

impl<'a> fmt::Debug for Selection<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Selection::Any => write!(f, "Any"),
			Selection::Type(s) => write!(f, "Type({s:?})"),
			Selection::Lang(s) => write!(f, "Lang({s:?})"),
		}
	}
}

impl InverseContext {
	pub fn new() -> Self {
		InverseContext {
			map: HashMap::new(),
		}
	}

	pub fn contains(&self, term: &Term) -> bool {
		self.map.contains_key(term)
	}

	pub fn insert(&mut self, term: Term, value: InverseDefinition) {
		self.map.insert(term, value);
	}

	pub fn get(&self, term: &Term) -> Option<&InverseDefinition> {
		self.map.get(term)
	}

	fn reference_mut<F: FnOnce() -> InverseDefinition>(
		&mut self,
		term: &Term,
		insert: F,
	) -> &mut InverseDefinition {
		if !self.contains(term) {
			self.insert(term.clone(), insert());
		}
		self.map.get_mut(term).unwrap()
	}

	pub fn select(
		&self,
		var: &Term,
		containers: &[Container],
		selection: &Selection,
	) -> Option<&str> {
		match self.get(var) {
			Some(container_map) => container_map.select(containers, selection),
			None => None,
		}
	}
}

impl Default for InverseContext {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::context::TermDefinition;
	use iref::IriBuf;

	fn context_with(terms: &[(&str, &str)]) -> Context {
		let mut context = Context::new(None);
		for (term, iri) in terms {
			context.set_normal(
				term.to_string(),
				Some(TermDefinition {
					value: Some(Term::from(IriBuf::new(iri.to_string()).unwrap())),
					..Default::default()
				}),
			);
		}
		context
	}

	fn select_any<'a>(context: &'a Context, iri: &str) -> Option<&'a str> {
		context.inverse().select(
			&Term::from(IriBuf::new(iri.to_string()).unwrap()),
			&[Container::None],
			&Selection::Lang(vec![
				LangSelection::Lang(Nullable::Some((None, None))),
				LangSelection::Any,
			]),
		)
	}

	#[test]
	fn shortest_term_wins() {
		// Both terms map to the same IRI. The first insertion in
		// shortest-then-lexicographic order wins.
		let context = context_with(&[
			("longname", "http://example.org/p"),
			("p", "http://example.org/p"),
		]);

		assert_eq!(select_any(&context, "http://example.org/p"), Some("p"));
	}

	#[test]
	fn lexicographic_tie_break() {
		let context = context_with(&[
			("b", "http://example.org/p"),
			("a", "http://example.org/p"),
		]);

		assert_eq!(select_any(&context, "http://example.org/p"), Some("a"));
	}

	#[test]
	fn rebuild_is_idempotent() {
		let context = context_with(&[("p", "http://example.org/p")]);

		let first = select_any(&context, "http://example.org/p").map(ToOwned::to_owned);
		let rebuilt = InverseContext::from(&context);
		let second = rebuilt.select(
			&Term::from(IriBuf::new("http://example.org/p".to_string()).unwrap()),
			&[Container::None],
			&Selection::Lang(vec![
				LangSelection::Lang(Nullable::Some((None, None))),
				LangSelection::Any,
			]),
		);

		assert_eq!(first.as_deref(), second);
	}
}

impl<'a> From<&'a Context> for InverseContext {
	fn from(context: &'a Context) -> Self {
		let mut result = InverseContext::new();

		// Terms are processed in shortest-then-lexicographic order so that
		// the first insertion for any entry wins.
		let mut definitions: Vec<_> = context.definitions().iter().collect();
		definitions.sort_by(|(a, _), (b, _)| cmp_shortest_lex(a, b));

		for (term, term_definition) in definitions {
			if let Some(var) = term_definition.value.as_ref() {
				let container = &term_definition.container;
				let container_map = result.reference_mut(var, InverseDefinition::new);
				let type_lang_map =
					container_map.reference_mut(container, || InverseContainer::new(term));

				let type_map = &mut type_lang_map.typ;
				let lang_map = &mut type_lang_map.language;

				if term_definition.reverse_property {
					// If the term definition indicates that the term represents a reverse property:
					if type_map.reverse.is_none() {
						type_map.reverse = Some(term.to_string())
					}
				} else {
					match &term_definition.typ {
						Some(Type::None) => {
							// Otherwise, if term definition has a type mapping which is @none:
							type_map.set_any(term);
							lang_map.set_any(term);
						}
						Some(typ) => {
							// Otherwise, if term definition has a type mapping:
							type_map.set(typ, term)
						}
						None => {
							match (&term_definition.language, &term_definition.direction) {
								(Some(language), Some(direction)) => {
									// Otherwise, if term definition has both a language mapping
									// and a direction mapping:
									match (language, direction) {
										(Nullable::Some(language), Nullable::Some(direction)) => {
											lang_map.set(
												Nullable::Some((
													Some(language.as_lenient_lang_tag_ref()),
													Some(*direction),
												)),
												term,
											)
										}
										(Nullable::Some(language), Nullable::Null) => lang_map.set(
											Nullable::Some((
												Some(language.as_lenient_lang_tag_ref()),
												None,
											)),
											term,
										),
										(Nullable::Null, Nullable::Some(direction)) => lang_map
											.set(Nullable::Some((None, Some(*direction))), term),
										(Nullable::Null, Nullable::Null) => {
											lang_map.set(Nullable::Null, term)
										}
									}
								}
								(Some(language), None) => {
									// Otherwise, if term definition has a language mapping (might
									// be null):
									match language {
										Nullable::Some(language) => lang_map.set(
											Nullable::Some((
												Some(language.as_lenient_lang_tag_ref()),
												None,
											)),
											term,
										),
										Nullable::Null => lang_map.set(Nullable::Null, term),
									}
								}
								(None, Some(direction)) => {
									// Otherwise, if term definition has a direction mapping (might
									// be null):
									match direction {
										Nullable::Some(direction) => lang_map
											.set(Nullable::Some((None, Some(*direction))), term),
										Nullable::Null => {
											lang_map.set(Nullable::Some((None, None)), term)
										}
									}
								}
								(None, None) => {
									lang_map.set(
										Nullable::Some((
											context.default_language(),
											context.default_base_direction(),
										)),
										term,
									);
									lang_map.set_none(term);
									type_map.set_none(term);
								}
							}
						}
					}
				}
			}
		}

		result
	}
}
