use jsonld_core::NoLoader;
use jsonld_expansion::{Error, Expand, Options, Policy};
use json_syntax::{Parse, Value};

fn parse(s: &str) -> Value {
	Value::parse_str(s).unwrap().0
}

async fn expand(input: &str) -> Result<Value, Error> {
	parse(input).expand(&NoLoader).await
}

async fn expand_ordered(input: &str) -> Result<Value, Error> {
	parse(input)
		.expand_full(
			Default::default(),
			None,
			&NoLoader,
			Options {
				ordered: true,
				..Default::default()
			},
		)
		.await
}

#[tokio::test]
async fn prefix_expansion() {
	let expanded = expand(
		r#"{
			"@context": {"ex": "http://example.org/"},
			"ex:foo": "bar"
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(r#"[{"http://example.org/foo": [{"@value": "bar"}]}]"#)
	);
}

#[tokio::test]
async fn typed_value_coercion() {
	let expanded = expand(
		r#"{
			"@context": {
				"date": {
					"@id": "http://example.org/date",
					"@type": "http://www.w3.org/2001/XMLSchema#date"
				}
			},
			"date": "2020-01-01"
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(
			r#"[{
				"http://example.org/date": [{
					"@value": "2020-01-01",
					"@type": "http://www.w3.org/2001/XMLSchema#date"
				}]
			}]"#
		)
	);
}

#[tokio::test]
async fn language_map() {
	let expanded = expand_ordered(
		r#"{
			"@context": {
				"label": {"@id": "http://example.org/label", "@container": "@language"}
			},
			"label": {"en": "Hi", "de": "Hallo"}
		}"#,
	)
	.await
	.unwrap();

	// Language map entries are processed in lexicographic key order.
	assert_eq!(
		expanded,
		parse(
			r#"[{
				"http://example.org/label": [
					{"@value": "Hallo", "@language": "de"},
					{"@value": "Hi", "@language": "en"}
				]
			}]"#
		)
	);
}

#[tokio::test]
async fn default_language() {
	let expanded = expand(
		r#"{
			"@context": {"@language": "en", "name": "http://example.org/name"},
			"name": "Jane"
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(r#"[{"http://example.org/name": [{"@value": "Jane", "@language": "en"}]}]"#)
	);
}

#[tokio::test]
async fn id_coercion() {
	let expanded = expand(
		r#"{
			"@context": {
				"knows": {"@id": "http://example.org/knows", "@type": "@id"}
			},
			"@id": "http://example.org/jane",
			"knows": "http://example.org/john"
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(
			r#"[{
				"@id": "http://example.org/jane",
				"http://example.org/knows": [{"@id": "http://example.org/john"}]
			}]"#
		)
	);
}

#[tokio::test]
async fn list_container() {
	let expanded = expand(
		r#"{
			"@context": {"p": {"@id": "http://example.org/p", "@container": "@list"}},
			"p": [1, 2]
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(
			r#"[{
				"http://example.org/p": [{"@list": [{"@value": 1}, {"@value": 2}]}]
			}]"#
		)
	);
}

#[tokio::test]
async fn list_of_lists() {
	let result = expand(
		r#"{
			"@context": {"p": {"@id": "http://example.org/p", "@container": "@list"}},
			"p": [[1, 2]]
		}"#,
	)
	.await;

	assert!(matches!(result, Err(Error::ListOfLists)));
}

#[tokio::test]
async fn json_literal() {
	let expanded = expand(
		r#"{
			"@context": {"data": {"@id": "http://example.org/data", "@type": "@json"}},
			"data": {"values": [1, true, null]}
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(
			r#"[{
				"http://example.org/data": [{
					"@value": {"values": [1, true, null]},
					"@type": "@json"
				}]
			}]"#
		)
	);
}

#[tokio::test]
async fn free_floating_values_are_dropped() {
	let expanded = expand(r#""free floating""#).await.unwrap();
	assert_eq!(expanded, parse("[]"));

	let expanded = expand(r#"{"@value": "free floating"}"#).await.unwrap();
	assert_eq!(expanded, parse("[]"));

	let expanded = expand(r#"{"@id": "http://example.org/a"}"#).await.unwrap();
	assert_eq!(expanded, parse("[]"));
}

#[tokio::test]
async fn top_level_graph_is_unwrapped() {
	let expanded = expand(
		r#"{
			"@graph": [
				{"@id": "http://example.org/a", "http://example.org/p": [{"@value": 1}]}
			]
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(r#"[{"@id": "http://example.org/a", "http://example.org/p": [{"@value": 1}]}]"#)
	);
}

#[tokio::test]
async fn reverse_property() {
	let expanded = expand(
		r#"{
			"@context": {
				"children": {"@reverse": "http://example.org/parent"}
			},
			"@id": "http://example.org/jane",
			"children": [{"@id": "http://example.org/john"}]
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(
			r#"[{
				"@id": "http://example.org/jane",
				"@reverse": {
					"http://example.org/parent": [{"@id": "http://example.org/john"}]
				}
			}]"#
		)
	);
}

#[tokio::test]
async fn reverse_value_object_rejected() {
	let result = expand(
		r#"{
			"@context": {
				"children": {"@reverse": "http://example.org/parent"}
			},
			"children": ["not a node"]
		}"#,
	)
	.await;

	assert!(matches!(result, Err(Error::InvalidReversePropertyValue)));
}

#[tokio::test]
async fn nested_properties() {
	let expanded = expand(
		r#"{
			"@context": {
				"@vocab": "http://example.org/",
				"meta": "@nest"
			},
			"meta": {"name": "Jane"}
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(r#"[{"http://example.org/name": [{"@value": "Jane"}]}]"#)
	);
}

#[tokio::test]
async fn index_map() {
	let expanded = expand_ordered(
		r#"{
			"@context": {
				"post": {"@id": "http://example.org/post", "@container": "@index"}
			},
			"post": {
				"en": {"@id": "http://example.org/1"},
				"de": {"@id": "http://example.org/2"}
			}
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(
			r#"[{
				"http://example.org/post": [
					{"@id": "http://example.org/2", "@index": "de"},
					{"@id": "http://example.org/1", "@index": "en"}
				]
			}]"#
		)
	);
}

#[tokio::test]
async fn graph_container() {
	let expanded = expand(
		r#"{
			"@context": {
				"claim": {"@id": "http://example.org/claim", "@container": "@graph"}
			},
			"claim": {"http://example.org/p": [{"@value": 1}]}
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(
			r#"[{
				"http://example.org/claim": [{
					"@graph": [{"http://example.org/p": [{"@value": 1}]}]
				}]
			}]"#
		)
	);
}

#[tokio::test]
async fn property_scoped_context() {
	let expanded = expand(
		r#"{
			"@context": {
				"@vocab": "http://example.org/",
				"detail": {"@id": "http://example.org/detail", "@context": {"alias": "http://example.org/aliased"}}
			},
			"detail": {"alias": "x"}
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(
			r#"[{
				"http://example.org/detail": [{
					"http://example.org/aliased": [{"@value": "x"}]
				}]
			}]"#
		)
	);
}

#[tokio::test]
async fn type_scoped_context() {
	let expanded = expand(
		r#"{
			"@context": {
				"@vocab": "http://example.org/",
				"Person": {"@id": "http://example.org/Person", "@context": {"name": "http://example.org/fullName"}}
			},
			"@type": "Person",
			"name": "Jane"
		}"#,
	)
	.await
	.unwrap();

	assert_eq!(
		expanded,
		parse(
			r#"[{
				"@type": ["http://example.org/Person"],
				"http://example.org/fullName": [{"@value": "Jane"}]
			}]"#
		)
	);
}

#[tokio::test]
async fn colliding_keywords() {
	let result = expand(
		r#"{
			"@context": {"id": "@id"},
			"@id": "http://example.org/a",
			"id": "http://example.org/b"
		}"#,
	)
	.await;

	assert!(matches!(result, Err(Error::CollidingKeywords)));
}

#[tokio::test]
async fn strict_policy_rejects_undefined_keys() {
	let result = parse(r#"{"undefined": 1}"#)
		.expand_full(
			Default::default(),
			None,
			&NoLoader,
			Options {
				policy: Policy::strict(),
				..Default::default()
			},
		)
		.await;

	assert!(matches!(result, Err(Error::KeyExpansionFailed(_))));
}

#[tokio::test]
async fn expansion_is_idempotent() {
	let expanded = expand(
		r#"{
			"@context": {"ex": "http://example.org/"},
			"@id": "http://example.org/a",
			"ex:foo": "bar",
			"ex:typed": {"@value": "x", "@type": "ex:T"}
		}"#,
	)
	.await
	.unwrap();

	let re_expanded = expanded.expand(&NoLoader).await.unwrap();
	assert_eq!(re_expanded, expanded);
}
