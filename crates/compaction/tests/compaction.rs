use jsonld_compaction::CompactFragment;
use jsonld_context_processing::Process;
use jsonld_core::{Context, NoLoader};
use json_syntax::{Parse, Value};

fn parse(s: &str) -> Value {
	Value::parse_str(s).unwrap().0
}

async fn process(context: &Value) -> Context {
	context
		.process(&NoLoader, None)
		.await
		.unwrap()
		.into_processed()
}

async fn compact(context: &str, expanded: &str) -> Value {
	let context = parse(context);
	let context = process(&context).await;
	parse(expanded)
		.compact_fragment(&context, &NoLoader)
		.await
		.unwrap()
}

#[tokio::test]
async fn term_compaction() {
	let compacted = compact(
		r#"{"name": "http://xmlns.com/foaf/0.1/name"}"#,
		r#"[{"http://xmlns.com/foaf/0.1/name": [{"@value": "Jane"}]}]"#,
	)
	.await;

	assert_eq!(compacted, parse(r#"{"name": "Jane"}"#));
}

#[tokio::test]
async fn curie_compaction() {
	let compacted = compact(
		r#"{"ex": "http://example.org/"}"#,
		r#"[{"http://example.org/foo": [{"@value": "bar"}]}]"#,
	)
	.await;

	assert_eq!(compacted, parse(r#"{"ex:foo": "bar"}"#));
}

#[tokio::test]
async fn vocab_suffix_compaction() {
	let compacted = compact(
		r#"{"@vocab": "http://example.org/ns#"}"#,
		r#"[{"http://example.org/ns#p": [{"@value": 1}]}]"#,
	)
	.await;

	assert_eq!(compacted, parse(r#"{"p": 1}"#));
}

#[tokio::test]
async fn typed_value_compaction() {
	let compacted = compact(
		r#"{
			"date": {
				"@id": "http://example.org/date",
				"@type": "http://www.w3.org/2001/XMLSchema#date"
			}
		}"#,
		r#"[{
			"http://example.org/date": [{
				"@value": "2020-01-01",
				"@type": "http://www.w3.org/2001/XMLSchema#date"
			}]
		}]"#,
	)
	.await;

	assert_eq!(compacted, parse(r#"{"date": "2020-01-01"}"#));
}

#[tokio::test]
async fn mismatched_type_stays_value_object() {
	let compacted = compact(
		r#"{"ex": "http://example.org/"}"#,
		r#"[{
			"http://example.org/date": [{
				"@value": "2020-01-01",
				"@type": "http://www.w3.org/2001/XMLSchema#date"
			}]
		}]"#,
	)
	.await;

	assert_eq!(
		compacted,
		parse(
			r#"{"ex:date": {"@value": "2020-01-01", "@type": "http://www.w3.org/2001/XMLSchema#date"}}"#
		)
	);
}

#[tokio::test]
async fn id_coercion_compaction() {
	let compacted = compact(
		r#"{"knows": {"@id": "http://example.org/knows", "@type": "@id"}}"#,
		r#"[{
			"http://example.org/knows": [{"@id": "http://example.org/john"}]
		}]"#,
	)
	.await;

	assert_eq!(compacted, parse(r#"{"knows": "http://example.org/john"}"#));
}

#[tokio::test]
async fn language_map_compaction() {
	let compacted = compact(
		r#"{"label": {"@id": "http://example.org/label", "@container": "@language"}}"#,
		r#"[{
			"http://example.org/label": [
				{"@value": "Hallo", "@language": "de"},
				{"@value": "Hi", "@language": "en"}
			]
		}]"#,
	)
	.await;

	assert_eq!(
		compacted,
		parse(r#"{"label": {"de": "Hallo", "en": "Hi"}}"#)
	);
}

#[tokio::test]
async fn index_map_compaction() {
	let compacted = compact(
		r#"{"post": {"@id": "http://example.org/post", "@container": "@index"}}"#,
		r#"[{
			"http://example.org/post": [
				{"@id": "http://example.org/1", "@index": "a"},
				{"@id": "http://example.org/2", "@index": "b"}
			]
		}]"#,
	)
	.await;

	assert_eq!(
		compacted,
		parse(
			r#"{"post": {"a": {"@id": "http://example.org/1"}, "b": {"@id": "http://example.org/2"}}}"#
		)
	);
}

#[tokio::test]
async fn list_compaction() {
	let compacted = compact(
		r#"{"p": {"@id": "http://example.org/p", "@container": "@list"}}"#,
		r#"[{
			"http://example.org/p": [{"@list": [{"@value": 1}, {"@value": 2}]}]
		}]"#,
	)
	.await;

	assert_eq!(compacted, parse(r#"{"p": [1, 2]}"#));
}

#[tokio::test]
async fn keyword_alias_compaction() {
	let compacted = compact(
		r#"{"id": "@id", "type": "@type"}"#,
		r#"[{
			"@id": "http://example.org/a",
			"@type": ["http://example.org/T"]
		}]"#,
	)
	.await;

	assert_eq!(
		compacted,
		parse(r#"{"id": "http://example.org/a", "type": "http://example.org/T"}"#)
	);
}

#[tokio::test]
async fn reverse_property_folding() {
	let compacted = compact(
		r#"{"children": {"@reverse": "http://example.org/parent", "@type": "@id"}}"#,
		r#"[{
			"@id": "http://example.org/jane",
			"@reverse": {
				"http://example.org/parent": [{"@id": "http://example.org/john"}]
			}
		}]"#,
	)
	.await;

	assert_eq!(
		compacted,
		parse(r#"{"@id": "http://example.org/jane", "children": "http://example.org/john"}"#)
	);
}

#[tokio::test]
async fn unfoldable_reverse_property() {
	let compacted = compact(
		r#"{"ex": "http://example.org/"}"#,
		r#"[{
			"@id": "http://example.org/jane",
			"@reverse": {
				"http://example.org/parent": [{"@id": "http://example.org/john"}]
			}
		}]"#,
	)
	.await;

	assert_eq!(
		compacted,
		parse(
			r#"{"@id": "http://example.org/jane", "@reverse": {"ex:parent": {"@id": "ex:john"}}}"#
		)
	);
}

#[tokio::test]
async fn compact_arrays_unwraps_singletons() {
	let compacted = compact(
		r#"{"ex": "http://example.org/"}"#,
		r#"[{"http://example.org/p": [{"@value": 1}, {"@value": 2}]}]"#,
	)
	.await;

	assert_eq!(compacted, parse(r#"{"ex:p": [1, 2]}"#));
}

#[tokio::test]
async fn set_container_keeps_arrays() {
	let compacted = compact(
		r#"{"p": {"@id": "http://example.org/p", "@container": "@set"}}"#,
		r#"[{"http://example.org/p": [{"@value": 1}]}]"#,
	)
	.await;

	assert_eq!(compacted, parse(r#"{"p": [1]}"#));
}

#[tokio::test]
async fn graph_container_compaction() {
	let compacted = compact(
		r#"{"claim": {"@id": "http://example.org/claim", "@container": "@graph"}}"#,
		r#"[{
			"http://example.org/claim": [{
				"@graph": [{"http://example.org/p": [{"@value": 1}]}]
			}]
		}]"#,
	)
	.await;

	assert_eq!(
		compacted,
		parse(r#"{"claim": {"http://example.org/p": 1}}"#)
	);
}

#[tokio::test]
async fn json_literal_compaction() {
	let compacted = compact(
		r#"{"data": {"@id": "http://example.org/data", "@type": "@json"}}"#,
		r#"[{
			"http://example.org/data": [{
				"@value": {"values": [1, true, null]},
				"@type": "@json"
			}]
		}]"#,
	)
	.await;

	assert_eq!(compacted, parse(r#"{"data": {"values": [1, true, null]}}"#));
}
