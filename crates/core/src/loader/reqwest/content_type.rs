use mime::Mime;
use reqwest::header::HeaderValue;

/// Parsed `Content-Type` header.
pub struct ContentType(Mime);

impl ContentType {
	pub fn new(value: &HeaderValue) -> Option<Self> {
		value.to_str().ok()?.parse::<Mime>().ok().map(Self)
	}

	/// Checks if this content type denotes a JSON or JSON-LD document.
	pub fn is_json_ld(&self) -> bool {
		self.0.essence_str() == "application/ld+json"
			|| self.0.essence_str() == "application/json"
			|| self
				.0
				.suffix()
				.map(|suffix| suffix.as_str() == "json")
				.unwrap_or(false)
	}

	pub fn media_type(&self) -> &Mime {
		&self.0
	}

	pub fn into_media_type(self) -> Mime {
		self.0
	}

	/// Returns the value of the `profile` parameter, if any.
	pub fn profile(&self) -> Option<&str> {
		self.0.get_param("profile").map(|name| name.as_str())
	}
}
