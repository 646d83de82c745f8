use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use stratus_core::{ConnectionConfig, IN_MEMORY_DATABASE};
use thiserror::Error;

pub const DATABASE_ENV: &str = "STRATUS_TEST_DATABASE";
pub const ROLE_ENV: &str = "STRATUS_TEST_ROLE";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {label}{}: {source}", render_location(*line, *column))]
    Parse {
        label: String,
        line: Option<usize>,
        column: Option<usize>,
        #[source]
        source: serde_yaml::Error,
    },
}

impl LoadError {
    pub(crate) fn parse(label: impl Into<String>, source: serde_yaml::Error) -> Self {
        let location = source.location();
        Self::Parse {
            label: label.into(),
            line: location.as_ref().map(serde_yaml::Location::line),
            column: location.as_ref().map(serde_yaml::Location::column),
            source,
        }
    }
}

fn render_location(line: Option<usize>, column: Option<usize>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" at line {line}, column {column}"),
        (Some(line), None) => format!(" at line {line}"),
        _ => String::new(),
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Connection settings for acceptance tests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestConfig {
    pub database: String,
    pub role: Option<String>,
    pub extra: BTreeMap<String, String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            database: IN_MEMORY_DATABASE.to_string(),
            role: None,
            extra: BTreeMap::new(),
        }
    }
}

impl TestConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, LoadError> {
        serde_yaml::from_str(yaml).map_err(|source| LoadError::parse("test config", source))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let yaml = read_file(path)?;
        serde_yaml::from_str(&yaml)
            .map_err(|source| LoadError::parse(path.display().to_string(), source))
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an environment-like lookup. Empty values count
    /// as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();
        if let Some(database) = read(DATABASE_ENV) {
            config.database = database;
        }
        config.role = read(ROLE_ENV);
        config
    }

    #[must_use]
    pub fn connection_config(&self) -> ConnectionConfig {
        let mut config = ConnectionConfig::new(self.database.clone());
        config.role = self.role.clone();
        config.extra = self.extra.clone();
        config
    }
}
