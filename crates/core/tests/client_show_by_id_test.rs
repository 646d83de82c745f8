use stratus_core::{
    AccountObjectIdentifier, AnyObjectIdentifier, Client, DatabaseObjectIdentifier, DropRequest,
    Error, OBJECT_DOES_NOT_EXIST, ObjectType, RequestError, Row, SYNTAX_ERROR,
    SchemaObjectIdentifier, ServerError, ShowObject,
};

#[path = "support/fake_session.rs"]
mod fake_session;

use fake_session::FakeSession;

fn client_with(session: &FakeSession) -> Client {
    Client::new(Box::new(session.clone()))
}

fn table_row(database: &str, schema: &str, name: &str) -> Row {
    Row::new()
        .with("created_on", "2024-01-01 00:00:00")
        .with("name", name)
        .with("database_name", database)
        .with("schema_name", schema)
        .with("owner", "ACCOUNTADMIN")
        .with_null("comment")
}

#[test]
fn show_by_id_issues_like_in_container_and_filters_exact_match() {
    let session = FakeSession::default();
    session.set_rows(vec![
        table_row("DB", "PUBLIC", "ORDERS_ARCHIVE"),
        table_row("DB", "PUBLIC", "ORDERS"),
    ]);
    let client = client_with(&session);
    let id = SchemaObjectIdentifier::new("DB", "PUBLIC", "ORDERS");

    let table = client.tables().show_by_id(&id).expect("table is listed");

    assert_eq!(table.id(), id);
    assert_eq!(table.metadata.comment, None);
    assert_eq!(
        session.queried_sql(),
        vec![r#"SHOW TABLES LIKE 'ORDERS' IN SCHEMA "DB"."PUBLIC""#.to_string()]
    );
}

#[test]
fn show_by_id_without_exact_match_returns_not_found_sentinel() {
    let session = FakeSession::default();
    session.set_rows(vec![table_row("DB", "PUBLIC", "ORDERS_ARCHIVE")]);
    let client = client_with(&session);

    let error = client
        .tables()
        .show_by_id(&SchemaObjectIdentifier::new("DB", "PUBLIC", "ORDERS"))
        .expect_err("no exact match");

    assert!(error.is_object_not_found());
    assert_eq!(
        error.to_string(),
        r#"table "DB"."PUBLIC"."ORDERS" does not exist or not authorized"#
    );
}

#[test]
fn missing_container_server_error_maps_to_sentinel() {
    let session = FakeSession::default();
    session.set_fail_on(
        "SHOW SCHEMAS",
        ServerError::new(OBJECT_DOES_NOT_EXIST, "Database 'GONE' does not exist"),
    );
    let client = client_with(&session);

    let error = client
        .schemas()
        .show_by_id(&DatabaseObjectIdentifier::new("GONE", "PUBLIC"))
        .expect_err("container is missing");

    assert!(
        matches!(error, Error::ObjectNotFound { object_type: ObjectType::Schema, ref id } if id == r#""GONE"."PUBLIC""#),
        "unexpected error: {error:?}"
    );
}

#[test]
fn other_server_errors_pass_through_unchanged() {
    let session = FakeSession::default();
    session.set_fail_on("SHOW", ServerError::new(SYNTAX_ERROR, "boom"));
    let client = client_with(&session);

    let error = client
        .warehouses()
        .show_by_id(&AccountObjectIdentifier::new("WH"))
        .expect_err("query fails");

    assert!(!error.is_object_not_found());
    assert_eq!(
        error.server_error().map(|server| server.code.as_str()),
        Some(SYNTAX_ERROR)
    );
}

#[test]
fn identifier_of_wrong_scope_is_rejected_before_querying() {
    let session = FakeSession::default();
    let client = client_with(&session);

    let error = client
        .show_row_by_id(
            ObjectType::Table,
            &AnyObjectIdentifier::from(AccountObjectIdentifier::new("T")),
        )
        .expect_err("tables need three-part identifiers");

    assert!(matches!(
        error,
        Error::Request(RequestError::IdentifierScope { .. })
    ));
    assert!(session.queried_sql().is_empty());
}

#[test]
fn drop_maps_missing_object_and_rejects_mismatched_kind() {
    let session = FakeSession::default();
    session.set_fail_on(
        "DROP ROLE",
        ServerError::new(OBJECT_DOES_NOT_EXIST, "Role 'R' does not exist"),
    );
    let client = client_with(&session);

    let error = client
        .roles()
        .drop(&DropRequest::new(ObjectType::Role, AccountObjectIdentifier::new("R")))
        .expect_err("role is missing");
    assert!(error.is_object_not_found());
    assert_eq!(session.executed_sql(), vec![r#"DROP ROLE "R""#.to_string()]);

    let mismatch = client
        .roles()
        .drop(&DropRequest::new(
            ObjectType::Warehouse,
            AccountObjectIdentifier::new("WH"),
        ))
        .expect_err("warehouse request through role API");
    assert!(matches!(
        mismatch,
        Error::Request(RequestError::ObjectTypeMismatch {
            expected: ObjectType::Role,
            actual: ObjectType::Warehouse,
        })
    ));
    assert_eq!(session.executed_sql().len(), 1);
}

#[test]
fn exists_folds_not_found_into_false() {
    let session = FakeSession::default();
    let client = client_with(&session);
    let database = AccountObjectIdentifier::new("DB");

    assert!(!client.databases().exists(&database).expect("lookup succeeds"));

    session.set_rows(vec![
        Row::new()
            .with("name", "DB")
            .with("owner", "ACCOUNTADMIN")
            .with_null("comment")
            .with_null("created_on"),
    ]);
    assert!(client.databases().exists(&database).expect("lookup succeeds"));
}

#[test]
fn rows_missing_required_columns_fail_to_decode() {
    let session = FakeSession::default();
    session.set_rows(vec![Row::new().with("name", "ORDERS")]);
    let client = client_with(&session);

    let error = client
        .tables()
        .show_by_id(&SchemaObjectIdentifier::new("DB", "PUBLIC", "ORDERS"))
        .expect_err("row lacks database_name");

    assert!(matches!(error, Error::Decode(_)), "unexpected error: {error:?}");
}
