use std::{collections::HashMap, fs};

use stratus_core::IN_MEMORY_DATABASE;
use stratus_testkit::{DATABASE_ENV, LoadError, ROLE_ENV, TestConfig};
use tempfile::tempdir;

#[test]
fn defaults_to_in_memory_database_without_role() {
    let config = TestConfig::from_yaml_str("{}").expect("empty map is valid");

    assert_eq!(config, TestConfig::default());
    assert_eq!(config.database, IN_MEMORY_DATABASE);
    assert_eq!(config.connection_config().role_or_default(), "ACCOUNTADMIN");
}

#[test]
fn yaml_fields_flow_into_connection_config() {
    let config = TestConfig::from_yaml_str(
        "database: /tmp/catalog.db\nrole: LOADER\nextra:\n  warehouse: COMPUTE_WH\n",
    )
    .expect("valid config");

    let connection = config.connection_config();
    assert_eq!(connection.database, "/tmp/catalog.db");
    assert_eq!(connection.role.as_deref(), Some("LOADER"));
    assert_eq!(
        connection.extra.get("warehouse").map(String::as_str),
        Some("COMPUTE_WH")
    );
}

#[test]
fn unknown_keys_are_rejected_with_location() {
    let error = TestConfig::from_yaml_str("database: x\npassword: hunter2\n")
        .expect_err("unknown key");

    let LoadError::Parse { line, .. } = &error else {
        panic!("expected parse error, got {error:?}");
    };
    assert_eq!(*line, Some(2));
    assert!(error.to_string().contains("password"));
}

#[test]
fn environment_lookup_overrides_defaults_and_ignores_blank_values() {
    let env = HashMap::from([
        (DATABASE_ENV, "/var/lib/stratus.db".to_string()),
        (ROLE_ENV, "  ".to_string()),
    ]);

    let config = TestConfig::from_lookup(|key| env.get(key).cloned());

    assert_eq!(config.database, "/var/lib/stratus.db");
    assert_eq!(config.role, None);
}

#[test]
fn load_reads_files_and_reports_missing_paths() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let path = tempdir.path().join("stratus-test.yaml");
    fs::write(&path, "role: SYSADMIN\n").expect("write config");

    let config = TestConfig::load(&path).expect("load config");
    assert_eq!(config.role.as_deref(), Some("SYSADMIN"));
    assert_eq!(config.database, IN_MEMORY_DATABASE);

    let missing = tempdir.path().join("missing.yaml");
    let error = TestConfig::load(&missing).expect_err("file is missing");
    assert!(matches!(error, LoadError::Read { .. }));
    assert!(error.to_string().contains("missing.yaml"));
}
