use jsonld_context_processing::{Error, Options, Process};
use jsonld_core::{Container, ContainerKind, NoLoader, Term, Type};
use json_syntax::{Parse, Value};
use static_iref::iri;

fn context(s: &str) -> Value {
	Value::parse_str(s).unwrap().0
}

#[tokio::test]
async fn simple_term_definition() {
	let local = context(r#"{"name": "http://xmlns.com/foaf/0.1/name"}"#);
	let processed = local.process(&NoLoader, None).await.unwrap().into_processed();

	let definition = processed.get_normal("name").unwrap();
	assert_eq!(
		definition.value.as_ref().unwrap().as_str(),
		"http://xmlns.com/foaf/0.1/name"
	);
	assert!(!definition.prefix);
}

#[tokio::test]
async fn expanded_term_definition() {
	let local = context(
		r#"{
			"date": {
				"@id": "http://example.org/date",
				"@type": "http://www.w3.org/2001/XMLSchema#date"
			}
		}"#,
	);
	let processed = local.process(&NoLoader, None).await.unwrap().into_processed();

	let definition = processed.get_normal("date").unwrap();
	assert_eq!(definition.value.as_ref().unwrap().as_str(), "http://example.org/date");
	assert_eq!(
		definition.typ,
		Some(Type::Iri(
			iri!("http://www.w3.org/2001/XMLSchema#date").to_owned()
		))
	);
}

#[tokio::test]
async fn simple_prefix_definition() {
	let local = context(r#"{"ex": "http://example.org/", "foo": "ex:foo"}"#);
	let processed = local.process(&NoLoader, None).await.unwrap().into_processed();

	// `ex` maps to an IRI ending with a gen-delim character: it can be used
	// as a prefix.
	assert!(processed.get_normal("ex").unwrap().prefix);
	assert_eq!(
		processed.get_normal("foo").unwrap().value.as_ref().unwrap().as_str(),
		"http://example.org/foo"
	);
}

#[tokio::test]
async fn vocab_mapping() {
	// A term definition with no `@id` falls back to the vocabulary mapping.
	let local = context(r#"{"@vocab": "http://example.org/ns#", "p": {"@type": "@id"}}"#);
	let processed = local.process(&NoLoader, None).await.unwrap().into_processed();
	assert_eq!(
		processed.get_normal("p").unwrap().value.as_ref().unwrap().as_str(),
		"http://example.org/ns#p"
	);
	assert_eq!(processed.get_normal("p").unwrap().typ, Some(Type::Id));
}

#[tokio::test]
async fn container_mapping() {
	let local = context(
		r#"{
			"label": {"@id": "http://example.org/label", "@container": "@language"},
			"tags": {"@id": "http://example.org/tags", "@container": ["@graph", "@id", "@set"]}
		}"#,
	);
	let processed = local.process(&NoLoader, None).await.unwrap().into_processed();

	assert_eq!(
		processed.get_normal("label").unwrap().container,
		Container::Language
	);
	assert_eq!(
		processed.get_normal("tags").unwrap().container,
		Container::GraphIdSet
	);
}

#[tokio::test]
async fn invalid_container_mapping() {
	let local = context(r#"{"p": {"@id": "http://example.org/p", "@container": "@list @set"}}"#);
	assert!(matches!(
		local.process(&NoLoader, None).await,
		Err(Error::InvalidContainerMapping)
	));

	let local = context(
		r#"{"p": {"@id": "http://example.org/p", "@container": ["@list", "@set"]}}"#,
	);
	assert!(matches!(
		local.process(&NoLoader, None).await,
		Err(Error::InvalidContainerMapping)
	));
}

#[tokio::test]
async fn cyclic_iri_mapping() {
	let local = context(r#"{"a": "b:x", "b": "a:y"}"#);
	assert!(matches!(
		local.process(&NoLoader, None).await,
		Err(Error::CyclicIriMapping)
	));
}

#[tokio::test]
async fn keyword_redefinition() {
	let local = context(r#"{"@id": "http://example.org/id"}"#);
	assert!(matches!(
		local.process(&NoLoader, None).await,
		Err(Error::KeywordRedefinition)
	));
}

#[tokio::test]
async fn type_redefinition() {
	let local = context(r#"{"@type": {"@container": "@set"}}"#);
	let processed = local.process(&NoLoader, None).await.unwrap().into_processed();
	assert!(processed.get_type().unwrap().container_set);
}

#[tokio::test]
async fn protected_term_redefinition() {
	let local = context(
		r#"[
			{"@protected": true, "name": "http://example.org/name"},
			{"name": "http://example.org/other"}
		]"#,
	);
	assert!(matches!(
		local.process(&NoLoader, None).await,
		Err(Error::ProtectedTermRedefinition)
	));
}

#[tokio::test]
async fn protected_context_nullification() {
	let local = context(
		r#"[
			{"@protected": true, "name": "http://example.org/name"},
			null
		]"#,
	);
	assert!(matches!(
		local.process(&NoLoader, None).await,
		Err(Error::InvalidContextNullification)
	));
}

#[tokio::test]
async fn null_context_resets() {
	let local = context(r#"[{"name": "http://example.org/name"}, null]"#);
	let processed = local.process(&NoLoader, None).await.unwrap().into_processed();
	assert!(processed.is_empty());
}

#[tokio::test]
async fn null_term_definition_is_retained() {
	let local = context(r#"{"name": null}"#);
	let processed = local.process(&NoLoader, None).await.unwrap().into_processed();

	let definition = processed.get_normal("name").unwrap();
	assert!(definition.value.is_none());
	assert!(processed.contains_term("name"));
}

#[tokio::test]
async fn reverse_term_definition() {
	let local = context(r#"{"children": {"@reverse": "http://example.org/parent"}}"#);
	let processed = local.process(&NoLoader, None).await.unwrap().into_processed();

	let definition = processed.get_normal("children").unwrap();
	assert!(definition.reverse_property);
	assert_eq!(
		definition.value.as_ref().unwrap().as_str(),
		"http://example.org/parent"
	);
}

#[tokio::test]
async fn reverse_term_rejects_list_container() {
	let local = context(
		r#"{"children": {"@reverse": "http://example.org/parent", "@container": "@list"}}"#,
	);
	assert!(matches!(
		local.process(&NoLoader, None).await,
		Err(Error::InvalidReverseProperty)
	));
}

#[tokio::test]
async fn keyword_alias() {
	let local = context(r#"{"id": "@id", "type": "@type"}"#);
	let processed = local.process(&NoLoader, None).await.unwrap().into_processed();

	assert_eq!(
		processed.get_normal("id").unwrap().value,
		Some(Term::Keyword(jsonld_syntax::Keyword::Id))
	);
	assert_eq!(
		processed.get_normal("type").unwrap().value,
		Some(Term::Keyword(jsonld_syntax::Keyword::Type))
	);
}

#[tokio::test]
async fn base_and_version() {
	let local = context(r#"{"@version": 1.1, "@base": "http://example.org/base/"}"#);
	let processed = local.process(&NoLoader, None).await.unwrap().into_processed();
	assert_eq!(
		processed.base_iri().map(|i| i.as_str()),
		Some("http://example.org/base/")
	);

	let local = context(r#"{"@version": 1.0}"#);
	assert!(matches!(
		local.process(&NoLoader, None).await,
		Err(Error::InvalidVersionValue)
	));

	let local = context(r#"{"@version": 1.1}"#);
	let options = Options {
		processing_mode: jsonld_core::ProcessingMode::JsonLd1_0,
		..Default::default()
	};
	let active_context = jsonld_core::Context::new(None);
	assert!(matches!(
		local
			.process_full(&active_context, &NoLoader, None, options)
			.await,
		Err(Error::ProcessingModeConflict)
	));
}

#[tokio::test]
async fn term_definition_with_container_type() {
	let local = context(
		r#"{"byType": {"@id": "http://example.org/byType", "@container": "@type"}}"#,
	);
	let processed = local.process(&NoLoader, None).await.unwrap().into_processed();

	let definition = processed.get_normal("byType").unwrap();
	assert!(definition.container.contains(ContainerKind::Type));
	// A `@type` container with no explicit type mapping defaults to `@id`.
	assert_eq!(definition.typ, Some(Type::Id));
}
