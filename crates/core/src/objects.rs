use std::fmt;

use crate::{
    AccountObjectIdentifier, AnyObjectIdentifier, DatabaseObjectIdentifier, DecodeError,
    IdentifierScope, ObjectIdentifier, ObjectType, Row, SchemaObjectIdentifier,
};

mod account;
mod schema_scoped;

pub use account::{Database, Role, Schema, Warehouse};
pub use schema_scoped::{SchemaLocation, Stage, Table, Tag, View};

pub const CREATED_ON_COLUMN: &str = "created_on";
pub const NAME_COLUMN: &str = "name";
pub const DATABASE_NAME_COLUMN: &str = "database_name";
pub const SCHEMA_NAME_COLUMN: &str = "schema_name";
pub const OWNER_COLUMN: &str = "owner";
pub const COMMENT_COLUMN: &str = "comment";

/// An object kind that can be listed with `SHOW` and looked up by identifier.
pub trait ShowObject: Sized + fmt::Debug {
    type Id: ObjectIdentifier;
    const OBJECT_TYPE: ObjectType;

    fn from_row(row: &Row) -> Result<Self, DecodeError>;
    fn id(&self) -> Self::Id;
    fn metadata(&self) -> &ObjectMetadata;
}

/// Columns every `SHOW` row carries regardless of kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectMetadata {
    pub name: String,
    pub created_on: Option<String>,
    pub owner: Option<String>,
    pub comment: Option<String>,
}

impl ObjectMetadata {
    pub fn from_row(object_type: ObjectType, row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            name: required(object_type, row, NAME_COLUMN)?,
            created_on: row.get(CREATED_ON_COLUMN).map(str::to_string),
            owner: row.get(OWNER_COLUMN).map(str::to_string),
            comment: row.get(COMMENT_COLUMN).map(str::to_string),
        })
    }
}

pub(crate) fn required(
    object_type: ObjectType,
    row: &Row,
    column: &'static str,
) -> Result<String, DecodeError> {
    row.get(column)
        .map(str::to_string)
        .ok_or(DecodeError::MissingColumn {
            object_type,
            column,
        })
}

/// Identifier of the object a row describes, shaped by the kind's scope.
pub fn row_identifier(object_type: ObjectType, row: &Row) -> Result<AnyObjectIdentifier, DecodeError> {
    let name = required(object_type, row, NAME_COLUMN)?;
    Ok(match object_type.scope() {
        IdentifierScope::Account => AccountObjectIdentifier::new(name).into(),
        IdentifierScope::Database => {
            let database = required(object_type, row, DATABASE_NAME_COLUMN)?;
            DatabaseObjectIdentifier::new(database, name).into()
        }
        IdentifierScope::Schema => {
            let database = required(object_type, row, DATABASE_NAME_COLUMN)?;
            let schema = required(object_type, row, SCHEMA_NAME_COLUMN)?;
            SchemaObjectIdentifier::new(database, schema, name).into()
        }
    })
}
