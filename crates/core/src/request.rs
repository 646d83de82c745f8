use std::fmt::Write as _;

use crate::{AnyObjectIdentifier, IdentifierScope, ObjectIdentifier, ObjectType, RequestError, Scope};

/// Renders a single-quoted string literal, backslash-escaping `\` and `'`.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for ch in value.chars() {
        if matches!(ch, '\'' | '\\') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowRequest {
    pub object_type: ObjectType,
    pub like: Option<String>,
    pub in_scope: Option<Scope>,
    pub limit: Option<u32>,
}

impl ShowRequest {
    #[must_use]
    pub const fn new(object_type: ObjectType) -> Self {
        Self {
            object_type,
            like: None,
            in_scope: None,
            limit: None,
        }
    }

    #[must_use]
    pub fn like(mut self, pattern: impl Into<String>) -> Self {
        self.like = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn in_scope(mut self, scope: Scope) -> Self {
        self.in_scope = Some(scope);
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_sql(&self) -> Result<String, RequestError> {
        let mut sql = format!("SHOW {}", self.object_type.plural_keyword());
        if let Some(pattern) = &self.like {
            sql.push_str(" LIKE ");
            sql.push_str(&quote_literal(pattern));
        }
        if let Some(scope) = &self.in_scope {
            validate_show_scope(self.object_type, scope)?;
            let _ = write!(sql, " IN {scope}");
        }
        if let Some(limit) = self.limit {
            let _ = write!(sql, " LIMIT {limit}");
        }
        Ok(sql)
    }
}

fn validate_show_scope(object_type: ObjectType, scope: &Scope) -> Result<(), RequestError> {
    let allowed = match (object_type.scope(), scope) {
        (_, Scope::Account) | (IdentifierScope::Schema, _) => true,
        (IdentifierScope::Database, Scope::Database(_)) => true,
        (IdentifierScope::Account, _) | (IdentifierScope::Database, Scope::Schema(_)) => false,
    };

    if allowed {
        Ok(())
    } else {
        Err(RequestError::ShowScope {
            plural: object_type.plural_keyword(),
            scope: scope.to_string(),
        })
    }
}

pub(crate) fn validate_identifier(
    object_type: ObjectType,
    id: &AnyObjectIdentifier,
) -> Result<(), RequestError> {
    let expected = object_type.scope();
    if id.scope() == expected {
        return Ok(());
    }

    Err(RequestError::IdentifierScope {
        object_type,
        expected: expected.label(),
        id: id.fully_qualified_name(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub object_type: ObjectType,
    pub id: AnyObjectIdentifier,
    pub or_replace: bool,
    pub if_not_exists: bool,
    pub comment: Option<String>,
}

impl CreateRequest {
    pub fn new(object_type: ObjectType, id: impl Into<AnyObjectIdentifier>) -> Self {
        Self {
            object_type,
            id: id.into(),
            or_replace: false,
            if_not_exists: false,
            comment: None,
        }
    }

    #[must_use]
    pub const fn or_replace(mut self) -> Self {
        self.or_replace = true;
        self
    }

    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn to_sql(&self) -> Result<String, RequestError> {
        validate_identifier(self.object_type, &self.id)?;
        if self.or_replace && self.if_not_exists {
            return Err(RequestError::ConflictingCreateModifiers {
                object_type: self.object_type,
            });
        }

        let mut sql = String::from("CREATE ");
        if self.or_replace {
            sql.push_str("OR REPLACE ");
        }
        sql.push_str(self.object_type.keyword());
        if self.if_not_exists {
            sql.push_str(" IF NOT EXISTS");
        }
        let _ = write!(sql, " {}", self.id);
        if let Some(comment) = &self.comment {
            let _ = write!(sql, " COMMENT = {}", quote_literal(comment));
        }
        Ok(sql)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropRequest {
    pub object_type: ObjectType,
    pub id: AnyObjectIdentifier,
    pub if_exists: bool,
}

impl DropRequest {
    pub fn new(object_type: ObjectType, id: impl Into<AnyObjectIdentifier>) -> Self {
        Self {
            object_type,
            id: id.into(),
            if_exists: false,
        }
    }

    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub fn to_sql(&self) -> Result<String, RequestError> {
        validate_identifier(self.object_type, &self.id)?;
        let if_exists = if self.if_exists { " IF EXISTS" } else { "" };
        Ok(format!(
            "DROP {}{if_exists} {}",
            self.object_type.keyword(),
            self.id
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlterAction {
    RenameTo(AnyObjectIdentifier),
    SetComment(String),
    UnsetComment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterRequest {
    pub object_type: ObjectType,
    pub id: AnyObjectIdentifier,
    pub if_exists: bool,
    pub action: AlterAction,
}

impl AlterRequest {
    pub fn new(
        object_type: ObjectType,
        id: impl Into<AnyObjectIdentifier>,
        action: AlterAction,
    ) -> Self {
        Self {
            object_type,
            id: id.into(),
            if_exists: false,
            action,
        }
    }

    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }

    pub fn to_sql(&self) -> Result<String, RequestError> {
        validate_identifier(self.object_type, &self.id)?;

        let mut sql = format!("ALTER {}", self.object_type.keyword());
        if self.if_exists {
            sql.push_str(" IF EXISTS");
        }
        let _ = write!(sql, " {}", self.id);
        match &self.action {
            AlterAction::RenameTo(target) => {
                validate_identifier(self.object_type, target)?;
                let _ = write!(sql, " RENAME TO {target}");
            }
            AlterAction::SetComment(comment) => {
                let _ = write!(sql, " SET COMMENT = {}", quote_literal(comment));
            }
            AlterAction::UnsetComment => sql.push_str(" UNSET COMMENT"),
        }
        Ok(sql)
    }
}
