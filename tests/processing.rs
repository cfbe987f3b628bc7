use jsonld::syntax::{ErrorCode, Parse};
use jsonld::{JsonLdProcessor, NoLoader, RemoteDocument, RemoteDocumentReference};
use json_syntax::Value;
use static_iref::iri;
use std::collections::HashMap;

fn parse(s: &str) -> Value {
	Value::parse_str(s).unwrap().0
}

fn remote(s: &str) -> RemoteDocument {
	RemoteDocument::new(None, None, parse(s))
}

/// Compares two JSON values ignoring object entry order.
fn unordered_eq(a: &Value, b: &Value) -> bool {
	match (a, b) {
		(Value::Object(a), Value::Object(b)) => {
			a.len() == b.len()
				&& a.iter().all(|entry| {
					b.get_unique(entry.key.as_str())
						.ok()
						.flatten()
						.map(|other| unordered_eq(&entry.value, other))
						.unwrap_or(false)
				})
		}
		(Value::Array(a), Value::Array(b)) => {
			a.len() == b.len() && a.iter().zip(b).all(|(a, b)| unordered_eq(a, b))
		}
		(a, b) => a == b,
	}
}

#[tokio::test]
async fn expand_prefix() {
	let document = remote(
		r#"{
			"@context": {"ex": "http://example.org/"},
			"ex:foo": "bar"
		}"#,
	);

	let expanded = document.expand(&NoLoader).await.unwrap();
	assert_eq!(
		expanded,
		parse(r#"[{"http://example.org/foo": [{"@value": "bar"}]}]"#)
	);
}

#[tokio::test]
async fn expand_typed_coercion() {
	let document = remote(
		r#"{
			"@context": {
				"date": {
					"@id": "http://example.org/date",
					"@type": "http://www.w3.org/2001/XMLSchema#date"
				}
			},
			"date": "2020-01-01"
		}"#,
	);

	let expanded = document.expand(&NoLoader).await.unwrap();
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
async fn expand_language_container() {
	let document = remote(
		r#"{
			"@context": {
				"label": {"@id": "http://ex/label", "@container": "@language"}
			},
			"label": {"en": "Hi", "de": "Hallo"}
		}"#,
	);

	// Language map entries are processed in lexicographic key order:
	// `de` comes before `en`.
	let expanded = document.expand(&NoLoader).await.unwrap();
	assert_eq!(
		expanded,
		parse(
			r#"[{
				"http://ex/label": [
					{"@value": "Hallo", "@language": "de"},
					{"@value": "Hi", "@language": "en"}
				]
			}]"#
		)
	);
}

async fn assert_round_trip(input: &str) {
	let input = parse(input);
	let document = RemoteDocument::new(None, None, input.clone());

	let context = match &input {
		Value::Object(o) => o.get_unique("@context").ok().flatten().cloned().unwrap(),
		_ => panic!("no context"),
	};
	let context = Value::Object({
		let mut o = json_syntax::Object::new();
		o.insert("@context".into(), context);
		o
	});

	let compacted = document.compact(&context, &NoLoader).await.unwrap();
	assert!(
		unordered_eq(&compacted, &input),
		"round trip failed:\ninput: {input:?}\noutput: {compacted:?}"
	);
}

#[tokio::test]
async fn round_trip_prefix() {
	assert_round_trip(
		r#"{
			"@context": {"ex": "http://example.org/"},
			"ex:foo": "bar"
		}"#,
	)
	.await;
}

#[tokio::test]
async fn round_trip_typed_coercion() {
	assert_round_trip(
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
	.await;
}

#[tokio::test]
async fn round_trip_language_container() {
	assert_round_trip(
		r#"{
			"@context": {
				"label": {"@id": "http://ex/label", "@container": "@language"}
			},
			"label": {"de": "Hallo", "en": "Hi"}
		}"#,
	)
	.await;
}

#[tokio::test]
async fn round_trip_lists_and_sets() {
	assert_round_trip(
		r#"{
			"@context": {
				"members": {"@id": "http://example.org/members", "@container": "@list"},
				"tags": {"@id": "http://example.org/tags", "@container": "@set"}
			},
			"members": ["a", "b"],
			"tags": ["x"]
		}"#,
	)
	.await;
}

#[tokio::test]
async fn list_of_lists_is_rejected() {
	let document = remote(
		r#"{
			"@context": {"p": {"@id": "http://example.org/p", "@container": "@list"}},
			"p": [[1, 2]]
		}"#,
	);

	let error = document.expand(&NoLoader).await.unwrap_err();
	assert_eq!(error.code(), ErrorCode::ListOfLists);
}

#[tokio::test]
async fn cyclic_context_is_rejected() {
	let document = remote(
		r#"{
			"@context": {"a": "b:x", "b": "a:y"},
			"a:foo": 1
		}"#,
	);

	let error = document.expand(&NoLoader).await.unwrap_err();
	assert_eq!(error.code(), ErrorCode::CyclicIriMapping);
}

#[tokio::test]
async fn expansion_is_idempotent() {
	let document = remote(
		r#"{
			"@context": {"ex": "http://example.org/", "@language": "en"},
			"@id": "http://example.org/a",
			"ex:name": "Jane",
			"ex:knows": {"@id": "http://example.org/b"}
		}"#,
	);

	let expanded = document.expand(&NoLoader).await.unwrap();
	let re_expanded = RemoteDocument::new(None, None, expanded.clone())
		.expand(&NoLoader)
		.await
		.unwrap();
	assert_eq!(re_expanded, expanded);
}

#[tokio::test]
async fn remote_context() {
	let url = iri!("http://example.org/context.jsonld").to_owned();
	let mut loader = HashMap::new();
	loader.insert(
		url.clone(),
		RemoteDocument::new(
			Some(url),
			Some("application/ld+json".parse().unwrap()),
			parse(r#"{"@context": {"name": "http://xmlns.com/foaf/0.1/name"}}"#),
		),
	);

	let document = remote(
		r#"{
			"@context": "http://example.org/context.jsonld",
			"name": "Jane"
		}"#,
	);

	let expanded = document.expand(&loader).await.unwrap();
	assert_eq!(
		expanded,
		parse(r#"[{"http://xmlns.com/foaf/0.1/name": [{"@value": "Jane"}]}]"#)
	);
}

#[tokio::test]
async fn recursive_remote_context() {
	let url = iri!("http://example.org/a").to_owned();
	let mut loader = HashMap::new();
	loader.insert(
		url.clone(),
		RemoteDocument::new(
			Some(url),
			Some("application/ld+json".parse().unwrap()),
			parse(r#"{"@context": "http://example.org/a"}"#),
		),
	);

	let document = remote(r#"{"@context": "http://example.org/a", "p": 1}"#);

	let error = document.expand(&loader).await.unwrap_err();
	assert_eq!(error.code(), ErrorCode::RecursiveContextInclusion);
}

#[tokio::test]
async fn expand_context_option() {
	let document = remote(r#"{"name": "Jane"}"#);

	let expand_context = RemoteDocumentReference::Loaded(RemoteDocument::new(
		None,
		None,
		parse(r#"{"@context": {"name": "http://xmlns.com/foaf/0.1/name"}}"#),
	));

	let options = jsonld::Options::default().with_expand_context(expand_context);
	let expanded = document.expand_full(&NoLoader, options).await.unwrap();
	assert_eq!(
		expanded,
		parse(r#"[{"http://xmlns.com/foaf/0.1/name": [{"@value": "Jane"}]}]"#)
	);
}

#[tokio::test]
async fn base_iri_resolution() {
	let document = RemoteDocument::new(
		Some(iri!("http://example.org/doc/index").to_owned()),
		None,
		parse(
			r#"{
				"@context": {"link": {"@id": "http://example.org/link", "@type": "@id"}},
				"@id": "node",
				"link": "other"
			}"#,
		),
	);

	let expanded = document.expand(&NoLoader).await.unwrap();
	assert_eq!(
		expanded,
		parse(
			r#"[{
				"@id": "http://example.org/doc/node",
				"http://example.org/link": [{"@id": "http://example.org/doc/other"}]
			}]"#
		)
	);
}

#[tokio::test]
async fn compact_into_graph_object() {
	// Multiple top-level nodes are grouped under `@graph` when compacted.
	let expanded = parse(
		r#"[
			{"@id": "http://example.org/a", "http://example.org/p": [{"@value": 1}]},
			{"@id": "http://example.org/b", "http://example.org/p": [{"@value": 2}]}
		]"#,
	);
	let document = RemoteDocument::new(None, None, expanded);
	let context = parse(r#"{"ex": "http://example.org/"}"#);

	let compacted = document.compact(&context, &NoLoader).await.unwrap();
	assert!(unordered_eq(
		&compacted,
		&parse(
			r#"{
				"@context": {"ex": "http://example.org/"},
				"@graph": [
					{"@id": "ex:a", "ex:p": 1},
					{"@id": "ex:b", "ex:p": 2}
				]
			}"#
		)
	));
}
