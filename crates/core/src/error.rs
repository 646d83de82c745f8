use std::error::Error as StdError;

use thiserror::Error;

use crate::ObjectType;

/// Server error code for "object does not exist or not authorized".
pub const OBJECT_DOES_NOT_EXIST: &str = "002003";
/// Server error code for "object already exists".
pub const OBJECT_ALREADY_EXISTS: &str = "002002";
/// Server error code for a statement the server could not compile.
pub const SYNTAX_ERROR: &str = "001003";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Identifier(#[from] IdentifierError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Execute(#[from] ExecutionError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The single "object not found" sentinel. Callers must test for it with
    /// [`Error::is_object_not_found`] rather than by matching messages.
    #[error("{object_type} {id} does not exist or not authorized")]
    ObjectNotFound { object_type: ObjectType, id: String },
}

impl Error {
    #[must_use]
    pub fn object_not_found(object_type: ObjectType, id: impl Into<String>) -> Self {
        Self::ObjectNotFound {
            object_type,
            id: id.into(),
        }
    }

    #[must_use]
    pub const fn is_object_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound { .. })
    }

    #[must_use]
    pub fn server_error(&self) -> Option<&ServerError> {
        match self {
            Self::Execute(error) => error.server_error(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier `{input}` has an unterminated quoted part")]
    UnterminatedQuote { input: String },
    #[error("identifier `{input}` has unexpected character `{found}` after a quoted part")]
    UnexpectedCharacter { input: String, found: char },
    #[error("identifier `{input}` has an empty part at position {position}")]
    EmptyPart { input: String, position: usize },
    #[error("identifier `{input}` has {actual} part(s); expected {expected}")]
    PartCount {
        input: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("CREATE {object_type} cannot combine OR REPLACE with IF NOT EXISTS")]
    ConflictingCreateModifiers { object_type: ObjectType },
    #[error("request targets {actual} but was issued through the {expected} API")]
    ObjectTypeMismatch {
        expected: ObjectType,
        actual: ObjectType,
    },
    #[error("{object_type} requires a {expected} identifier, got `{id}`")]
    IdentifierScope {
        object_type: ObjectType,
        expected: &'static str,
        id: String,
    },
    #[error("SHOW {plural} cannot be scoped to {scope}")]
    ShowScope { plural: &'static str, scope: String },
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("statement `{sql}` failed: {source}")]
    StatementFailed {
        sql: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl ExecutionError {
    pub fn statement_failed<E>(sql: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::StatementFailed {
            sql: sql.into(),
            source: Box::new(source),
        }
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        match self {
            Self::StatementFailed { sql, .. } => sql,
        }
    }

    #[must_use]
    pub fn server_error(&self) -> Option<&ServerError> {
        match self {
            Self::StatementFailed { source, .. } => source.downcast_ref::<ServerError>(),
        }
    }
}

/// Error reported by a backend while running a statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ServerError {
    pub code: String,
    pub message: String,
}

impl ServerError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_object_missing(&self) -> bool {
        self.code == OBJECT_DOES_NOT_EXIST
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{object_type} row is missing column `{column}`")]
    MissingColumn {
        object_type: ObjectType,
        column: &'static str,
    },
}
