//! Shape predicates over documents in expanded form.
//!
//! Expanded documents are plain JSON values whose objects are either value
//! objects, list objects, node objects or graph objects. The expansion
//! engine guarantees these shapes on output; the compaction engine relies
//! on them on input.
use json_syntax::{Object, Value};

/// Returns the value of the given key in `object`, if present exactly once.
pub fn entry<'a>(object: &'a Object, key: &str) -> Option<&'a Value> {
	object.get_unique(key).ok().flatten()
}

/// Checks if the given value is a JSON scalar (null, boolean, number or
/// string).
pub fn is_scalar(value: &Value) -> bool {
	matches!(
		value,
		Value::Null | Value::Boolean(_) | Value::Number(_) | Value::String(_)
	)
}

/// Checks if the given value is a value object.
pub fn is_value_object(value: &Value) -> bool {
	match value.as_object() {
		Some(o) => entry(o, "@value").is_some(),
		None => false,
	}
}

/// Checks if the given value is a list object.
pub fn is_list_object(value: &Value) -> bool {
	match value.as_object() {
		Some(o) => entry(o, "@list").is_some(),
		None => false,
	}
}

/// Checks if the given value is a graph object: an object with a `@graph`
/// entry and no entry other than `@graph`, `@id`, `@index` and `@context`.
pub fn is_graph_object(value: &Value) -> bool {
	match value.as_object() {
		Some(o) => {
			entry(o, "@graph").is_some()
				&& o.iter()
					.all(|e| matches!(e.key.as_str(), "@graph" | "@id" | "@index" | "@context"))
		}
		None => false,
	}
}

/// Checks if the given value is a graph object without an `@id` entry.
pub fn is_simple_graph_object(value: &Value) -> bool {
	is_graph_object(value)
		&& value
			.as_object()
			.map(|o| entry(o, "@id").is_none())
			.unwrap_or(false)
}

/// Checks if the given value is an object whose only entry is `@id`.
pub fn is_node_reference(value: &Value) -> bool {
	match value.as_object() {
		Some(o) => o.len() == 1 && entry(o, "@id").is_some(),
		None => false,
	}
}

/// Returns the `@index` entry of the given value, if it is an object
/// carrying one.
pub fn index_of(value: &Value) -> Option<&str> {
	value
		.as_object()
		.and_then(|o| entry(o, "@index"))
		.and_then(Value::as_str)
}

/// Returns the `@id` entry of the given value, if it is an object carrying
/// a string one.
pub fn id_of(value: &Value) -> Option<&str> {
	value
		.as_object()
		.and_then(|o| entry(o, "@id"))
		.and_then(Value::as_str)
}

/// Returns the `@language` entry of the given value object.
pub fn language_of(value: &Value) -> Option<&str> {
	value
		.as_object()
		.and_then(|o| entry(o, "@language"))
		.and_then(Value::as_str)
}

/// Returns the `@direction` entry of the given value object.
pub fn direction_of(value: &Value) -> Option<&str> {
	value
		.as_object()
		.and_then(|o| entry(o, "@direction"))
		.and_then(Value::as_str)
}

/// Returns the `@type` entry of the given value object, if it is a string.
pub fn type_of(value: &Value) -> Option<&str> {
	value
		.as_object()
		.and_then(|o| entry(o, "@type"))
		.and_then(Value::as_str)
}

/// Returns the `@value` entry of the given value object.
pub fn value_of(value: &Value) -> Option<&Value> {
	value.as_object().and_then(|o| entry(o, "@value"))
}

/// Returns the `@list` entry of the given list object.
pub fn list_of(value: &Value) -> Option<&Value> {
	value.as_object().and_then(|o| entry(o, "@list"))
}

/// Returns the `@graph` entry of the given graph object.
pub fn graph_of(value: &Value) -> Option<&Value> {
	value.as_object().and_then(|o| entry(o, "@graph"))
}

/// Wraps the given value into a graph object `{"@graph": [value]}`.
pub fn into_graph_object(value: Value) -> Value {
	let mut object = Object::default();
	object.insert("@graph".into(), Value::Array(vec![value]));
	Value::Object(object)
}

#[cfg(test)]
mod tests {
	use super::*;
	use json_syntax::Parse;

	fn parse(s: &str) -> Value {
		Value::parse_str(s).unwrap().0
	}

	#[test]
	fn shapes() {
		assert!(is_value_object(&parse(r#"{"@value": 1}"#)));
		assert!(!is_value_object(&parse(r#"{"@id": "ex:a"}"#)));
		assert!(is_list_object(&parse(r#"{"@list": []}"#)));
		assert!(is_node_reference(&parse(r#"{"@id": "ex:a"}"#)));
		assert!(!is_node_reference(&parse(
			r#"{"@id": "ex:a", "@type": ["ex:T"]}"#
		)));
	}

	#[test]
	fn graph_objects() {
		let simple = parse(r#"{"@graph": [{"@id": "ex:a"}]}"#);
		assert!(is_graph_object(&simple));
		assert!(is_simple_graph_object(&simple));

		let named = parse(r#"{"@graph": [], "@id": "ex:g"}"#);
		assert!(is_graph_object(&named));
		assert!(!is_simple_graph_object(&named));

		let node = parse(r#"{"@graph": [], "ex:p": [{"@value": 1}]}"#);
		assert!(!is_graph_object(&node));
	}

	#[test]
	fn accessors() {
		let value = parse(r#"{"@value": "a", "@language": "en", "@index": "i"}"#);
		assert_eq!(language_of(&value), Some("en"));
		assert_eq!(index_of(&value), Some("i"));
		assert_eq!(value_of(&value).and_then(Value::as_str), Some("a"));
	}
}
