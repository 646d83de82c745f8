use std::collections::BTreeMap;

use crate::Result;

/// A live connection able to run statements and return `SHOW` rows.
pub trait Session: Send + Sync {
    fn execute(&self, sql: &str) -> Result<()>;
    fn query(&self, sql: &str) -> Result<Vec<Row>>;
    fn current_role(&self) -> Result<String>;
}

/// One result row, keyed by lower-case column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: BTreeMap<String, Option<String>>,
}

impl Row {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, column: &str, value: impl Into<String>) -> Self {
        self.insert(column, Some(value.into()));
        self
    }

    #[must_use]
    pub fn with_null(mut self, column: &str) -> Self {
        self.insert(column, None);
        self
    }

    pub fn insert(&mut self, column: &str, value: Option<String>) {
        self.columns.insert(column.to_ascii_lowercase(), value);
    }

    /// `None` both for a missing column and for a NULL value.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .get(&column.to_ascii_lowercase())
            .and_then(Option::as_deref)
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(&column.to_ascii_lowercase())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.columns
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_deref()))
    }
}

impl<K: AsRef<str>> FromIterator<(K, Option<String>)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.insert(column.as_ref(), value);
        }
        row
    }
}
