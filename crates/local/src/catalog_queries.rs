// Account-level objects store '' for database_name and schema_name so the
// composite primary key stays NOT NULL.

pub(crate) const CREATE_CATALOG_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS stratus_objects (
    object_type   TEXT NOT NULL,
    database_name TEXT NOT NULL DEFAULT '',
    schema_name   TEXT NOT NULL DEFAULT '',
    name          TEXT NOT NULL,
    owner         TEXT,
    comment       TEXT,
    created_on    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    PRIMARY KEY (object_type, database_name, schema_name, name)
);
"#;

pub(crate) const OBJECT_EXISTS_QUERY: &str = r#"
SELECT COUNT(*)
FROM stratus_objects
WHERE object_type = ?1 AND database_name = ?2 AND schema_name = ?3 AND name = ?4;
"#;

pub(crate) const INSERT_OBJECT_SQL: &str = r#"
INSERT INTO stratus_objects (object_type, database_name, schema_name, name, owner, comment)
VALUES (?1, ?2, ?3, ?4, ?5, ?6);
"#;

pub(crate) const DELETE_OBJECT_SQL: &str = r#"
DELETE FROM stratus_objects
WHERE object_type = ?1 AND database_name = ?2 AND schema_name = ?3 AND name = ?4;
"#;

pub(crate) const DELETE_DATABASE_CHILDREN_SQL: &str = r#"
DELETE FROM stratus_objects
WHERE database_name = ?1;
"#;

pub(crate) const DELETE_SCHEMA_CHILDREN_SQL: &str = r#"
DELETE FROM stratus_objects
WHERE database_name = ?1 AND schema_name = ?2;
"#;

pub(crate) const RENAME_OBJECT_SQL: &str = r#"
UPDATE stratus_objects
SET database_name = ?5, schema_name = ?6, name = ?7
WHERE object_type = ?1 AND database_name = ?2 AND schema_name = ?3 AND name = ?4;
"#;

pub(crate) const MOVE_DATABASE_CHILDREN_SQL: &str = r#"
UPDATE stratus_objects
SET database_name = ?2
WHERE database_name = ?1;
"#;

pub(crate) const MOVE_SCHEMA_CHILDREN_SQL: &str = r#"
UPDATE stratus_objects
SET database_name = ?3, schema_name = ?4
WHERE database_name = ?1 AND schema_name = ?2;
"#;

pub(crate) const SET_COMMENT_SQL: &str = r#"
UPDATE stratus_objects
SET comment = ?5
WHERE object_type = ?1 AND database_name = ?2 AND schema_name = ?3 AND name = ?4;
"#;

// LIKE in SQLite is case-insensitive for ASCII, matching SHOW ... LIKE.
// NULL filters match everything.
pub(crate) const SHOW_OBJECTS_QUERY: &str = r#"
SELECT created_on, name, database_name, schema_name, owner, comment
FROM stratus_objects
WHERE object_type = ?1
  AND (?2 IS NULL OR name LIKE ?2)
  AND (?3 IS NULL OR database_name = ?3)
  AND (?4 IS NULL OR schema_name = ?4)
ORDER BY database_name ASC, schema_name ASC, name ASC
LIMIT ?5;
"#;
