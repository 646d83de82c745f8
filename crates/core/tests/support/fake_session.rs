use std::sync::{Arc, Mutex, MutexGuard};

use stratus_core::{DEFAULT_ROLE, ExecutionError, Result, Row, ServerError, Session};

#[derive(Debug)]
struct FailureRule {
    sql_prefix: String,
    error: ServerError,
}

#[derive(Debug, Default)]
struct FakeSessionState {
    executed_sql: Vec<String>,
    queried_sql: Vec<String>,
    rows: Vec<Row>,
    fail_on: Option<FailureRule>,
}

/// Records statements and answers every query with canned rows.
///
/// Clones share state, so a test can keep a handle after boxing one into a
/// `Client`.
#[derive(Debug, Clone, Default)]
pub struct FakeSession {
    state: Arc<Mutex<FakeSessionState>>,
}

#[allow(dead_code)]
impl FakeSession {
    pub fn set_rows(&self, rows: Vec<Row>) {
        self.state().rows = rows;
    }

    pub fn set_fail_on(&self, sql_prefix: impl Into<String>, error: ServerError) {
        self.state().fail_on = Some(FailureRule {
            sql_prefix: sql_prefix.into(),
            error,
        });
    }

    pub fn executed_sql(&self) -> Vec<String> {
        self.state().executed_sql.clone()
    }

    pub fn queried_sql(&self) -> Vec<String> {
        self.state().queried_sql.clone()
    }

    fn state(&self) -> MutexGuard<'_, FakeSessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_failure(state: &FakeSessionState, sql: &str) -> Result<()> {
        match &state.fail_on {
            Some(rule) if sql.starts_with(&rule.sql_prefix) => {
                Err(ExecutionError::statement_failed(sql, rule.error.clone()).into())
            }
            _ => Ok(()),
        }
    }
}

impl Session for FakeSession {
    fn execute(&self, sql: &str) -> Result<()> {
        let mut state = self.state();
        state.executed_sql.push(sql.to_string());
        Self::check_failure(&state, sql)
    }

    fn query(&self, sql: &str) -> Result<Vec<Row>> {
        let mut state = self.state();
        state.queried_sql.push(sql.to_string());
        Self::check_failure(&state, sql)?;
        Ok(state.rows.clone())
    }

    fn current_role(&self) -> Result<String> {
        Ok(DEFAULT_ROLE.to_string())
    }
}
