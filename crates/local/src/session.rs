use std::{
    io,
    sync::{Mutex, MutexGuard},
};

use rusqlite::{Connection, params};
use stratus_core::{
    AlterAction, AnyObjectIdentifier, ConnectionConfig, DEFAULT_ROLE, ExecutionError,
    OBJECT_ALREADY_EXISTS, OBJECT_DOES_NOT_EXIST, ObjectIdentifier, ObjectType, Result, Row,
    Scope, ServerError, Session,
};
use tracing::debug;

use crate::{
    catalog_queries,
    command::{Command, parse_command},
};

const CONNECT_SQL: &str = "CONNECT local";
const POISONED_SESSION_MESSAGE: &str = "local session state was poisoned";
const STATUS_COLUMN: &str = "status";

/// A warehouse catalog kept in a SQLite file (or `:memory:`).
pub struct LocalSession {
    state: Mutex<LocalState>,
}

struct LocalState {
    connection: Connection,
    role: String,
}

impl LocalSession {
    pub fn open(config: &ConnectionConfig) -> Result<Self> {
        let connection = Connection::open(config.database.as_str())
            .map_err(|source| ExecutionError::statement_failed(CONNECT_SQL, source))?;
        connection
            .execute_batch(catalog_queries::CREATE_CATALOG_SQL)
            .map_err(|source| {
                ExecutionError::statement_failed(catalog_queries::CREATE_CATALOG_SQL, source)
            })?;

        debug!(database = %config.database, "opened local session");
        Ok(Self {
            state: Mutex::new(LocalState {
                connection,
                role: config.role_or_default().to_string(),
            }),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(&ConnectionConfig::in_memory())
    }

    fn lock_state(&self, sql: &str) -> Result<MutexGuard<'_, LocalState>> {
        self.state.lock().map_err(|_| {
            ExecutionError::statement_failed(sql, io::Error::other(POISONED_SESSION_MESSAGE))
                .into()
        })
    }

    fn run(&self, sql: &str) -> Result<Vec<Row>> {
        let command = parse_command(sql)
            .map_err(|source| ExecutionError::statement_failed(sql, source))?;
        debug!(?command, "running local command");

        let mut state = self.lock_state(sql)?;
        let outcome = match command {
            Command::Create {
                object_type,
                id,
                or_replace,
                if_not_exists,
                comment,
            } => create_object(
                &state.connection,
                &state.role,
                object_type,
                &id,
                or_replace,
                if_not_exists,
                comment.as_deref(),
            ),
            Command::Drop {
                object_type,
                id,
                if_exists,
            } => drop_object(&state.connection, object_type, &id, if_exists),
            Command::Alter {
                object_type,
                id,
                if_exists,
                action,
            } => alter_object(&state.connection, object_type, &id, if_exists, &action),
            Command::Show {
                object_type,
                like,
                scope,
                limit,
            } => show_objects(
                &state.connection,
                object_type,
                like.as_deref(),
                scope.as_ref(),
                limit,
            ),
            Command::UseRole(role) => use_role(&mut state, &role.into()),
        };

        outcome.map_err(|failure| failure.into_error(sql))
    }
}

impl Session for LocalSession {
    fn execute(&self, sql: &str) -> Result<()> {
        self.run(sql).map(|_| ())
    }

    fn query(&self, sql: &str) -> Result<Vec<Row>> {
        self.run(sql)
    }

    fn current_role(&self) -> Result<String> {
        Ok(self.lock_state("SELECT CURRENT_ROLE()")?.role.clone())
    }
}

#[derive(Debug)]
enum Failure {
    Server(ServerError),
    Sqlite(rusqlite::Error),
}

impl Failure {
    fn into_error(self, sql: &str) -> stratus_core::Error {
        match self {
            Self::Server(source) => ExecutionError::statement_failed(sql, source).into(),
            Self::Sqlite(source) => ExecutionError::statement_failed(sql, source).into(),
        }
    }
}

impl From<ServerError> for Failure {
    fn from(value: ServerError) -> Self {
        Self::Server(value)
    }
}

impl From<rusqlite::Error> for Failure {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

type LocalResult<T> = std::result::Result<T, Failure>;

/// Catalog primary key; parts an identifier lacks are stored as ''.
struct ObjectKey {
    database: String,
    schema: String,
    name: String,
}

impl ObjectKey {
    fn of(id: &AnyObjectIdentifier) -> Self {
        match id {
            AnyObjectIdentifier::Account(id) => Self {
                database: String::new(),
                schema: String::new(),
                name: id.name().to_string(),
            },
            AnyObjectIdentifier::Database(id) => Self {
                database: id.database_name().to_string(),
                schema: String::new(),
                name: id.name().to_string(),
            },
            AnyObjectIdentifier::Schema(id) => Self {
                database: id.database_name().to_string(),
                schema: id.schema_name().to_string(),
                name: id.name().to_string(),
            },
        }
    }
}

fn create_object(
    connection: &Connection,
    role: &str,
    object_type: ObjectType,
    id: &AnyObjectIdentifier,
    or_replace: bool,
    if_not_exists: bool,
    comment: Option<&str>,
) -> LocalResult<Vec<Row>> {
    let tx = connection.unchecked_transaction()?;
    ensure_container(&tx, id)?;

    let key = ObjectKey::of(id);
    if object_exists(&tx, object_type, &key)? {
        if if_not_exists {
            return Ok(vec![status_row(&format!(
                "{} already exists, statement succeeded.",
                id.name()
            ))]);
        }
        if !or_replace {
            return Err(already_exists(id).into());
        }
        delete_object(&tx, object_type, &key)?;
    }

    tx.execute(
        catalog_queries::INSERT_OBJECT_SQL,
        params![
            object_type.keyword(),
            key.database,
            key.schema,
            key.name,
            role,
            comment
        ],
    )?;
    tx.commit()?;

    Ok(vec![status_row(&format!(
        "{} {} successfully created.",
        kind_title(object_type),
        id.name()
    ))])
}

fn drop_object(
    connection: &Connection,
    object_type: ObjectType,
    id: &AnyObjectIdentifier,
    if_exists: bool,
) -> LocalResult<Vec<Row>> {
    let tx = connection.unchecked_transaction()?;
    let key = ObjectKey::of(id);
    if !object_exists(&tx, object_type, &key)? {
        if if_exists {
            return Ok(vec![status_row(&format!(
                "Drop statement executed successfully ({} already dropped).",
                id.name()
            ))]);
        }
        return Err(missing_object(object_type, id).into());
    }

    delete_object(&tx, object_type, &key)?;
    tx.commit()?;

    Ok(vec![status_row(&format!(
        "{} successfully dropped.",
        id.name()
    ))])
}

fn alter_object(
    connection: &Connection,
    object_type: ObjectType,
    id: &AnyObjectIdentifier,
    if_exists: bool,
    action: &AlterAction,
) -> LocalResult<Vec<Row>> {
    let tx = connection.unchecked_transaction()?;
    let key = ObjectKey::of(id);
    if !object_exists(&tx, object_type, &key)? {
        if if_exists {
            return Ok(vec![status_row("Statement executed successfully.")]);
        }
        return Err(missing_object(object_type, id).into());
    }

    match action {
        AlterAction::RenameTo(target) => {
            ensure_container(&tx, target)?;
            let target_key = ObjectKey::of(target);
            if object_exists(&tx, object_type, &target_key)? {
                return Err(already_exists(target).into());
            }
            tx.execute(
                catalog_queries::RENAME_OBJECT_SQL,
                params![
                    object_type.keyword(),
                    key.database,
                    key.schema,
                    key.name,
                    target_key.database,
                    target_key.schema,
                    target_key.name
                ],
            )?;
            match object_type {
                ObjectType::Database => {
                    tx.execute(
                        catalog_queries::MOVE_DATABASE_CHILDREN_SQL,
                        params![key.name, target_key.name],
                    )?;
                }
                ObjectType::Schema => {
                    tx.execute(
                        catalog_queries::MOVE_SCHEMA_CHILDREN_SQL,
                        params![key.database, key.name, target_key.database, target_key.name],
                    )?;
                }
                _ => {}
            }
        }
        AlterAction::SetComment(comment) => {
            tx.execute(
                catalog_queries::SET_COMMENT_SQL,
                params![object_type.keyword(), key.database, key.schema, key.name, comment],
            )?;
        }
        AlterAction::UnsetComment => {
            tx.execute(
                catalog_queries::SET_COMMENT_SQL,
                params![
                    object_type.keyword(),
                    key.database,
                    key.schema,
                    key.name,
                    Option::<String>::None
                ],
            )?;
        }
    }
    tx.commit()?;

    Ok(vec![status_row("Statement executed successfully.")])
}

fn show_objects(
    connection: &Connection,
    object_type: ObjectType,
    like: Option<&str>,
    scope: Option<&Scope>,
    limit: Option<u64>,
) -> LocalResult<Vec<Row>> {
    let (database_filter, schema_filter) = match scope {
        None | Some(Scope::Account) => (None, None),
        Some(Scope::Database(database)) => {
            ensure_exists(connection, ObjectType::Database, &database.clone().into())?;
            (Some(database.name().to_string()), None)
        }
        Some(Scope::Schema(schema)) => {
            ensure_exists(connection, ObjectType::Database, &schema.database_id().into())?;
            ensure_exists(connection, ObjectType::Schema, &schema.clone().into())?;
            (
                Some(schema.database_name().to_string()),
                Some(schema.name().to_string()),
            )
        }
    };
    let limit = limit.map_or(-1, |limit| i64::try_from(limit).unwrap_or(i64::MAX));

    let mut statement = connection.prepare(catalog_queries::SHOW_OBJECTS_QUERY)?;
    let rows = statement.query_map(
        params![
            object_type.keyword(),
            like,
            database_filter,
            schema_filter,
            limit
        ],
        |row| {
            Ok(Row::from_iter([
                ("created_on", row.get::<_, Option<String>>(0)?),
                ("name", row.get::<_, Option<String>>(1)?),
                ("database_name", non_empty(row.get::<_, String>(2)?)),
                ("schema_name", non_empty(row.get::<_, String>(3)?)),
                ("owner", row.get::<_, Option<String>>(4)?),
                ("comment", row.get::<_, Option<String>>(5)?),
            ]))
        },
    )?;

    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn use_role(state: &mut LocalState, role: &AnyObjectIdentifier) -> LocalResult<Vec<Row>> {
    if role.name() != DEFAULT_ROLE {
        ensure_exists(&state.connection, ObjectType::Role, role)?;
    }
    state.role = role.name().to_string();
    Ok(vec![status_row("Statement executed successfully.")])
}

fn ensure_container(connection: &Connection, id: &AnyObjectIdentifier) -> LocalResult<()> {
    match id {
        AnyObjectIdentifier::Account(_) => Ok(()),
        AnyObjectIdentifier::Database(id) => {
            ensure_exists(connection, ObjectType::Database, &id.database_id().into())
        }
        AnyObjectIdentifier::Schema(id) => {
            let schema = id.schema_id();
            ensure_exists(connection, ObjectType::Database, &schema.database_id().into())?;
            ensure_exists(connection, ObjectType::Schema, &schema.into())
        }
    }
}

fn ensure_exists(
    connection: &Connection,
    object_type: ObjectType,
    id: &AnyObjectIdentifier,
) -> LocalResult<()> {
    if object_exists(connection, object_type, &ObjectKey::of(id))? {
        Ok(())
    } else {
        Err(missing_object(object_type, id).into())
    }
}

fn object_exists(
    connection: &Connection,
    object_type: ObjectType,
    key: &ObjectKey,
) -> LocalResult<bool> {
    let count: i64 = connection.query_row(
        catalog_queries::OBJECT_EXISTS_QUERY,
        params![object_type.keyword(), key.database, key.schema, key.name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn delete_object(
    connection: &Connection,
    object_type: ObjectType,
    key: &ObjectKey,
) -> LocalResult<()> {
    connection.execute(
        catalog_queries::DELETE_OBJECT_SQL,
        params![object_type.keyword(), key.database, key.schema, key.name],
    )?;
    match object_type {
        ObjectType::Database => {
            connection.execute(catalog_queries::DELETE_DATABASE_CHILDREN_SQL, params![key.name])?;
        }
        ObjectType::Schema => {
            connection.execute(
                catalog_queries::DELETE_SCHEMA_CHILDREN_SQL,
                params![key.database, key.name],
            )?;
        }
        _ => {}
    }
    Ok(())
}

fn missing_object(object_type: ObjectType, id: &AnyObjectIdentifier) -> ServerError {
    ServerError::new(
        OBJECT_DOES_NOT_EXIST,
        format!(
            "SQL compilation error: {} '{}' does not exist or not authorized.",
            kind_title(object_type),
            id.fully_qualified_name()
        ),
    )
}

fn already_exists(id: &AnyObjectIdentifier) -> ServerError {
    ServerError::new(
        OBJECT_ALREADY_EXISTS,
        format!(
            "SQL compilation error: Object '{}' already exists.",
            id.fully_qualified_name()
        ),
    )
}

fn kind_title(object_type: ObjectType) -> String {
    let lower = object_type.to_string();
    let mut chars = lower.chars();
    chars
        .next()
        .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
        .unwrap_or_default()
}

fn status_row(message: &str) -> Row {
    Row::new().with(STATUS_COLUMN, message)
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
