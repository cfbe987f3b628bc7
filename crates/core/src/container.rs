use jsonld_syntax::ContainerKind;
use smallvec::SmallVec;

/// Container mapping of a term definition.
///
/// A closed enumeration of the container keyword combinations the JSON-LD
/// grammar allows: a single keyword, `@set` combined with any of `@graph`,
/// `@id`, `@index`, `@language` or `@type`, and `@graph` combined with
/// `@id` or `@index` (optionally with `@set`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Container {
	#[default]
	None,
	Graph,
	GraphId,
	GraphIdSet,
	GraphIndex,
	GraphIndexSet,
	GraphSet,
	Id,
	IdSet,
	Index,
	IndexSet,
	Language,
	LanguageSet,
	List,
	Set,
	Type,
	TypeSet,
}

impl Container {
	pub fn new() -> Self {
		Self::None
	}

	/// The container kinds this mapping is composed of, in the
	/// `ContainerKind` ordering.
	pub fn kinds(&self) -> &'static [ContainerKind] {
		use ContainerKind::*;
		match self {
			Self::None => &[],
			Self::Graph => &[Graph],
			Self::GraphId => &[Graph, Id],
			Self::GraphIdSet => &[Graph, Id, Set],
			Self::GraphIndex => &[Graph, Index],
			Self::GraphIndexSet => &[Graph, Index, Set],
			Self::GraphSet => &[Graph, Set],
			Self::Id => &[Id],
			Self::IdSet => &[Id, Set],
			Self::Index => &[Index],
			Self::IndexSet => &[Index, Set],
			Self::Language => &[Language],
			Self::LanguageSet => &[Language, Set],
			Self::List => &[List],
			Self::Set => &[Set],
			Self::Type => &[Type],
			Self::TypeSet => &[Set, Type],
		}
	}

	fn from_kinds(sorted: &[ContainerKind]) -> Option<Self> {
		use ContainerKind::*;
		match sorted {
			[] => Some(Self::None),
			[Graph] => Some(Self::Graph),
			[Graph, Id] => Some(Self::GraphId),
			[Graph, Id, Set] => Some(Self::GraphIdSet),
			[Graph, Index] => Some(Self::GraphIndex),
			[Graph, Index, Set] => Some(Self::GraphIndexSet),
			[Graph, Set] => Some(Self::GraphSet),
			[Id] => Some(Self::Id),
			[Id, Set] => Some(Self::IdSet),
			[Index] => Some(Self::Index),
			[Index, Set] => Some(Self::IndexSet),
			[Language] => Some(Self::Language),
			[Language, Set] => Some(Self::LanguageSet),
			[List] => Some(Self::List),
			[Set] => Some(Self::Set),
			[Type] => Some(Self::Type),
			[Set, Type] => Some(Self::TypeSet),
			_ => None,
		}
	}

	pub fn is_none(&self) -> bool {
		matches!(self, Self::None)
	}

	pub fn contains(&self, kind: ContainerKind) -> bool {
		self.kinds().contains(&kind)
	}

	/// Adds a container kind to this mapping.
	///
	/// Returns `None` if the resulting combination is not allowed by the
	/// grammar.
	pub fn with(self, kind: ContainerKind) -> Option<Self> {
		if self.contains(kind) {
			return Some(self);
		}

		let mut kinds: SmallVec<[ContainerKind; 3]> = self.kinds().iter().copied().collect();
		kinds.push(kind);
		kinds.sort_unstable();
		Self::from_kinds(&kinds)
	}
}

impl From<ContainerKind> for Container {
	fn from(kind: ContainerKind) -> Self {
		use ContainerKind::*;
		match kind {
			Graph => Self::Graph,
			Id => Self::Id,
			Index => Self::Index,
			Language => Self::Language,
			List => Self::List,
			Set => Self::Set,
			Type => Self::Type,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use jsonld_syntax::ContainerKind::*;

	#[test]
	fn valid_combinations() {
		assert_eq!(Container::Graph.with(Id), Some(Container::GraphId));
		assert_eq!(Container::GraphId.with(Set), Some(Container::GraphIdSet));
		assert_eq!(Container::Set.with(Graph), Some(Container::GraphSet));
		assert_eq!(Container::Type.with(Set), Some(Container::TypeSet));
		assert_eq!(Container::Index.with(Index), Some(Container::Index));
	}

	#[test]
	fn invalid_combinations() {
		assert_eq!(Container::List.with(Set), None);
		assert_eq!(Container::Language.with(Id), None);
		assert_eq!(Container::GraphIdSet.with(Type), None);
	}

	#[test]
	fn membership() {
		assert!(Container::GraphIndexSet.contains(Graph));
		assert!(Container::GraphIndexSet.contains(Index));
		assert!(Container::GraphIndexSet.contains(Set));
		assert!(!Container::GraphIndexSet.contains(Id));
	}
}
