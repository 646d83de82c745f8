mod client;
mod config;
mod error;
mod ident;
mod object_type;
mod objects;
mod request;
mod session;

pub use client::{Client, Objects};
pub use config::{ConnectionConfig, DEFAULT_ROLE, IN_MEMORY_DATABASE};
pub use error::{
    DecodeError, Error, ExecutionError, IdentifierError, OBJECT_ALREADY_EXISTS,
    OBJECT_DOES_NOT_EXIST, RequestError, Result, SYNTAX_ERROR, ServerError,
};
pub use ident::{
    AccountObjectIdentifier, AnyObjectIdentifier, DatabaseObjectIdentifier, Ident,
    ObjectIdentifier, SchemaObjectIdentifier, Scope, quote_ident, split_identifier,
};
pub use object_type::{IdentifierScope, ObjectType, UnknownObjectType};
pub use objects::{
    COMMENT_COLUMN, CREATED_ON_COLUMN, DATABASE_NAME_COLUMN, Database, NAME_COLUMN,
    OWNER_COLUMN, ObjectMetadata, Role, SCHEMA_NAME_COLUMN, Schema, SchemaLocation, ShowObject,
    Stage, Table, Tag, View, Warehouse, row_identifier,
};
pub use request::{
    AlterAction, AlterRequest, CreateRequest, DropRequest, ShowRequest, quote_literal,
};
pub use session::{Row, Session};
