use std::fmt;

#[derive(Debug, thiserror::Error)]
#[error("`{0}` is not a compact IRI")]
pub struct InvalidCompactIri<T = String>(pub T);

impl<'a, T: ?Sized + ToOwned> InvalidCompactIri<&'a T> {
	pub fn into_owned(self) -> InvalidCompactIri<T::Owned> {
		InvalidCompactIri(self.0.to_owned())
	}
}

/// Compact IRI of the form `prefix:suffix`.
///
/// The prefix is everything up to the first colon. Strings whose prefix is
/// `_` (blank node identifiers) or whose suffix begins with `//` (absolute
/// IRIs with an authority part) are not compact IRIs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CompactIri<'a> {
	prefix: &'a str,
	suffix: &'a str,
}

impl<'a> CompactIri<'a> {
	pub fn new(s: &'a str) -> Result<Self, InvalidCompactIri<&'a str>> {
		match s.find(':') {
			Some(i) if i > 0 => {
				let (prefix, rest) = s.split_at(i);
				let suffix = &rest[1..];

				if prefix == "_" || suffix.starts_with("//") {
					Err(InvalidCompactIri(s))
				} else {
					Ok(Self { prefix, suffix })
				}
			}
			_ => Err(InvalidCompactIri(s)),
		}
	}

	pub fn prefix(&self) -> &'a str {
		self.prefix
	}

	pub fn suffix(&self) -> &'a str {
		self.suffix
	}
}

impl<'a> fmt::Display for CompactIri<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}:{}", self.prefix, self.suffix)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_first_colon() {
		let c = CompactIri::new("ex:foo:bar").unwrap();
		assert_eq!(c.prefix(), "ex");
		assert_eq!(c.suffix(), "foo:bar");
	}

	#[test]
	fn rejects_non_curies() {
		assert!(CompactIri::new("term").is_err());
		assert!(CompactIri::new("_:b0").is_err());
		assert!(CompactIri::new("http://example.org/").is_err());
		assert!(CompactIri::new(":suffix").is_err());
	}
}
