//! Text expansion behavior: segmentation, query evaluation, single-result
//! enforcement, fallback substitution and placeholder validation.

mod common;

use common::{FakeDb, MemoryAttributes, NoServer, TagMap};
use rowcond::{
    AttributeNode, AttributeTree, Column, ConnectionTarget, DataContextSpec, DataType, Error,
    EvaluationScope, Expanded, TabularResult, Value,
};
use rowcond::expand::expand;
use std::path::PathBuf;

const DOC_PATH: &str = "doc.attrs";

fn invoice_doc() -> AttributeTree {
    AttributeTree::new(vec![
        AttributeNode::new("Invoice", "INV-1")
            .with_children(vec![AttributeNode::new("Total", "100.00")]),
        AttributeNode::new("Invoice", "INV-2"),
    ])
}

fn attribute_scope<'a>(
    tags: &'a TagMap,
    loader: &'a MemoryAttributes,
    db: &'a FakeDb,
    fallback: Option<String>,
) -> EvaluationScope<'a> {
    EvaluationScope::new(
        DataContextSpec::Attribute(PathBuf::from(DOC_PATH)),
        tags,
        loader,
        db,
        fallback,
        "doc-1",
    )
}

fn relational_scope<'a>(
    tags: &'a TagMap,
    loader: &'a MemoryAttributes,
    db: &'a FakeDb,
) -> EvaluationScope<'a> {
    EvaluationScope::new(
        DataContextSpec::Relational(ConnectionTarget::HostDatabase),
        tags,
        loader,
        db,
        None,
        "doc-1",
    )
}

#[test]
fn blank_input_expands_without_touching_the_context() {
    let tags = TagMap::new();
    let loader = MemoryAttributes::empty(); // would fail if consulted
    let db = FakeDb::new();
    let mut scope = attribute_scope(&tags, &loader, &db, None);

    assert_eq!(
        expand("   ", &mut scope).unwrap(),
        Expanded::Literal(String::new())
    );
    assert!(db.calls().is_empty());
}

#[test]
fn query_only_input_returns_all_values() {
    let tags = TagMap::new();
    let loader = MemoryAttributes::empty().with_doc(DOC_PATH, invoice_doc());
    let db = FakeDb::new();
    let mut scope = attribute_scope(&tags, &loader, &db, None);

    assert_eq!(
        expand("</Invoice>", &mut scope).unwrap(),
        Expanded::Values(vec!["INV-1".to_string(), "INV-2".to_string()])
    );
}

#[test]
fn embedded_query_amid_literal_text_must_be_single_valued() {
    let tags = TagMap::new();
    let loader = MemoryAttributes::empty().with_doc(DOC_PATH, invoice_doc());
    let db = FakeDb::new();
    let mut scope = attribute_scope(&tags, &loader, &db, None);

    let err = expand("ID: </Invoice>", &mut scope).unwrap_err();
    match err {
        Error::MultiResult {
            values, source_doc, ..
        } => {
            assert_eq!(values, vec!["INV-1".to_string(), "INV-2".to_string()]);
            assert_eq!(source_doc, "doc-1");
        }
        other => panic!("expected MultiResult, got {other:?}"),
    }
}

#[test]
fn shorthand_and_explicit_envelope_are_equivalent() {
    let tags = TagMap::new();
    let loader = MemoryAttributes::empty().with_doc(DOC_PATH, invoice_doc());
    let db = FakeDb::new();

    let mut scope = attribute_scope(&tags, &loader, &db, None);
    let shorthand = expand("</Invoice>", &mut scope).unwrap();

    let mut scope = attribute_scope(&tags, &loader, &db, None);
    let explicit = expand("<Query><Attribute>/Invoice</Attribute></Query>", &mut scope).unwrap();

    assert_eq!(shorthand, explicit);
}

#[test]
fn mixed_content_concatenates_single_results() {
    let tags = TagMap::new();
    let loader = MemoryAttributes::empty().with_doc(DOC_PATH, invoice_doc());
    let db = FakeDb::new();
    let mut scope = attribute_scope(&tags, &loader, &db, None);

    assert_eq!(
        expand("Total: </Invoice/Total>!", &mut scope).unwrap(),
        Expanded::Literal("Total: 100.00!".to_string())
    );
}

#[test]
fn missing_attribute_document_fails_without_fallback() {
    let tags = TagMap::new();
    let loader = MemoryAttributes::empty();
    let db = FakeDb::new();
    let mut scope = attribute_scope(&tags, &loader, &db, None);

    let err = expand("ID: </Invoice>", &mut scope).unwrap_err();
    assert!(matches!(err, Error::DataUnavailable { .. }));
}

#[test]
fn fallback_replacement_substitutes_for_missing_data() {
    let tags = TagMap::new();
    let loader = MemoryAttributes::empty();
    let db = FakeDb::new();
    let mut scope = attribute_scope(&tags, &loader, &db, Some("N/A".to_string()));

    assert_eq!(
        expand("ID: </Invoice>.", &mut scope).unwrap(),
        Expanded::Literal("ID: N/A.".to_string())
    );
}

#[test]
fn path_tags_substitute_after_concatenation() {
    let tags = TagMap::new().with_tag("<SourceDocName>", "invoice-42.tif");
    let loader = MemoryAttributes::empty().with_doc(DOC_PATH, invoice_doc());
    let db = FakeDb::new();
    let mut scope = attribute_scope(&tags, &loader, &db, None);

    assert_eq!(
        expand("File <SourceDocName>, total </Invoice/Total>", &mut scope).unwrap(),
        Expanded::Literal("File invoice-42.tif, total 100.00".to_string())
    );
}

#[test]
fn unresolved_database_placeholder_is_an_error() {
    let tags = TagMap::new(); // no database available to resolve the tag
    let loader = MemoryAttributes::empty().with_doc(DOC_PATH, invoice_doc());
    let db = FakeDb::new();
    let mut scope = attribute_scope(&tags, &loader, &db, None);

    let err = expand("db is <DatabaseName> here", &mut scope).unwrap_err();
    match err {
        Error::UnresolvedPlaceholder { placeholder, .. } => {
            assert_eq!(placeholder, "<DatabaseName>");
        }
        other => panic!("expected UnresolvedPlaceholder, got {other:?}"),
    }
}

#[test]
fn fallback_replacement_degrades_placeholder_to_substitution() {
    let tags = TagMap::new();
    let loader = MemoryAttributes::empty().with_doc(DOC_PATH, invoice_doc());
    let db = FakeDb::new();
    let mut scope = attribute_scope(&tags, &loader, &db, Some("unknown".to_string()));

    assert_eq!(
        expand("db is <DatabaseName> here", &mut scope).unwrap(),
        Expanded::Literal("db is unknown here".to_string())
    );
}

#[test]
fn sql_queries_run_read_only_and_are_memoized() {
    let tags = TagMap::new();
    let loader = MemoryAttributes::empty();
    let result = TabularResult::new(
        vec![Column::new("v", DataType::Str)],
        vec![vec![Value::Str("one".to_string())]],
    )
    .unwrap();
    let db = FakeDb::new().with_result("SELECT 1", result);
    let mut scope = relational_scope(&tags, &loader, &db);

    let out = expand(
        "a <Query>SELECT 1</Query> b <Query>SELECT 1</Query> c",
        &mut scope,
    )
    .unwrap();
    assert_eq!(out, Expanded::Literal("a one b one c".to_string()));

    // One connection, one execution (second hit served from the scope
    // cache), wrapped in begin/rollback, never committed.
    let calls = db.calls();
    assert_eq!(
        calls,
        vec![
            "connect:HostDatabase".to_string(),
            "begin".to_string(),
            "execute:SELECT 1".to_string(),
            "rollback".to_string(),
        ]
    );
    drop(scope);
    assert_eq!(db.calls().last().unwrap(), "close");
}

#[test]
fn connection_failure_reports_the_query_and_document() {
    let tags = TagMap::new();
    let loader = MemoryAttributes::empty();
    let db = NoServer;
    let mut scope = EvaluationScope::new(
        DataContextSpec::Relational(ConnectionTarget::HostDatabase),
        &tags,
        &loader,
        &db,
        None,
        "doc-1",
    );

    let err = expand("x <Query>SELECT 1</Query>", &mut scope).unwrap_err();
    match err {
        Error::Execution(msg) => {
            assert!(msg.contains("<Query>SELECT 1</Query>"));
            assert!(msg.contains("doc-1"));
            assert!(msg.contains("connection refused"));
        }
        other => panic!("expected Execution, got {other:?}"),
    }
}

#[test]
fn malformed_envelope_is_a_parse_error() {
    let tags = TagMap::new();
    let loader = MemoryAttributes::empty();
    let db = FakeDb::new();
    let mut scope = relational_scope(&tags, &loader, &db);

    assert!(matches!(
        expand("<Query>SELECT 1", &mut scope),
        Err(Error::Parse { .. })
    ));
}
