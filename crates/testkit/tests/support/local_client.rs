use std::sync::Arc;

use stratus_core::{AccountObjectIdentifier, Client, ConnectionConfig, DatabaseObjectIdentifier};

pub fn local_client() -> Arc<Client> {
    Arc::new(
        stratus_local::client(&ConnectionConfig::in_memory())
            .expect("open in-memory local session"),
    )
}

#[allow(dead_code)]
pub fn seeded_schema(client: &Client) -> DatabaseObjectIdentifier {
    client
        .execute(r#"CREATE DATABASE "TEST_DB""#)
        .expect("create test database");
    client
        .execute(r#"CREATE SCHEMA "TEST_DB"."PUBLIC""#)
        .expect("create test schema");
    DatabaseObjectIdentifier::new("TEST_DB", "PUBLIC")
}

#[allow(dead_code)]
pub fn seeded_database(client: &Client) -> AccountObjectIdentifier {
    client
        .execute(r#"CREATE DATABASE "TEST_DB""#)
        .expect("create test database");
    AccountObjectIdentifier::new("TEST_DB")
}
