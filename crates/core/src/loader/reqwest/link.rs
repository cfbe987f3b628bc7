use iref::{IriRef, IriRefBuf};
use reqwest::header::HeaderValue;

/// A single parsed `Link` header value.
///
/// Only the `rel` and `type` parameters are interpreted, which is all the
/// JSON-LD loading algorithm requires.
pub struct Link {
	href: IriRefBuf,
	rel: Option<String>,
	type_: Option<String>,
}

impl Link {
	/// Parses every link of the given header value.
	///
	/// Malformed links are skipped.
	pub fn parse_all(value: &HeaderValue) -> Vec<Self> {
		match value.to_str() {
			Ok(value) => value.split(',').filter_map(Self::parse).collect(),
			Err(_) => Vec::new(),
		}
	}

	fn parse(s: &str) -> Option<Self> {
		let s = s.trim();
		let rest = s.strip_prefix('<')?;
		let (target, params) = rest.split_once('>')?;
		let href = IriRefBuf::new(target.to_string()).ok()?;

		let mut rel = None;
		let mut type_ = None;
		for param in params.split(';').skip_while(|p| p.trim().is_empty()) {
			if let Some((name, value)) = param.split_once('=') {
				let value = value.trim().trim_matches('"');
				match name.trim() {
					"rel" => rel = Some(value.to_string()),
					"type" => type_ = Some(value.to_string()),
					_ => (),
				}
			}
		}

		Some(Self { href, rel, type_ })
	}

	pub fn href(&self) -> &IriRef {
		self.href.as_iri_ref()
	}

	pub fn rel(&self) -> Option<&str> {
		self.rel.as_deref()
	}

	pub fn type_(&self) -> Option<&str> {
		self.type_.as_deref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_context_link() {
		let value = HeaderValue::from_static(
			"<context.jsonld>; rel=\"http://www.w3.org/ns/json-ld#context\"; type=\"application/ld+json\"",
		);
		let links = Link::parse_all(&value);
		assert_eq!(links.len(), 1);
		assert_eq!(links[0].href().as_str(), "context.jsonld");
		assert_eq!(links[0].rel(), Some("http://www.w3.org/ns/json-ld#context"));
		assert_eq!(links[0].type_(), Some("application/ld+json"));
	}

	#[test]
	fn parse_multiple_links() {
		let value = HeaderValue::from_static(
			"<a.jsonld>; rel=\"alternate\", <b.jsonld>; rel=\"alternate\"",
		);
		assert_eq!(Link::parse_all(&value).len(), 2);
	}
}
