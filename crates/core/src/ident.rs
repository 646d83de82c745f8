use std::{fmt, hash::Hash, str::FromStr};

use crate::{IdentifierError, IdentifierScope};

/// A single identifier part as written in SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub value: String,
    pub quoted: bool,
}

impl Ident {
    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: true,
        }
    }

    pub fn unquoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
        }
    }

    /// Name the server stores: quoted parts verbatim, bare parts upper-cased.
    #[must_use]
    pub fn normalized(&self) -> String {
        if self.quoted {
            self.value.clone()
        } else {
            self.value.to_ascii_uppercase()
        }
    }
}

#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Splits `db."my schema".name` into normalized parts.
pub fn split_identifier(input: &str) -> Result<Vec<String>, IdentifierError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IdentifierError::Empty);
    }

    let mut parts = Vec::new();
    let mut chars = trimmed.chars().peekable();
    loop {
        let part = if chars.peek() == Some(&'"') {
            chars.next();
            let mut value = String::new();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        value.push('"');
                    }
                    Some('"') => break,
                    Some(ch) => value.push(ch),
                    None => {
                        return Err(IdentifierError::UnterminatedQuote {
                            input: input.to_string(),
                        });
                    }
                }
            }
            if let Some(&found) = chars.peek()
                && found != '.'
            {
                return Err(IdentifierError::UnexpectedCharacter {
                    input: input.to_string(),
                    found,
                });
            }
            Ident::quoted(value)
        } else {
            let mut value = String::new();
            while let Some(&ch) = chars.peek() {
                if ch == '.' {
                    break;
                }
                value.push(ch);
                chars.next();
            }
            Ident::unquoted(value.trim())
        };

        if part.value.is_empty() {
            return Err(IdentifierError::EmptyPart {
                input: input.to_string(),
                position: parts.len(),
            });
        }
        parts.push(part.normalized());

        if chars.next().is_none() {
            break;
        }
    }

    Ok(parts)
}

fn split_exact<const N: usize>(input: &str) -> Result<[String; N], IdentifierError> {
    let parts = split_identifier(input)?;
    let actual = parts.len();
    parts.try_into().map_err(|_| IdentifierError::PartCount {
        input: input.to_string(),
        expected: N,
        actual,
    })
}

/// Where objects of a kind are listed by `SHOW ... IN`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Account,
    Database(AccountObjectIdentifier),
    Schema(DatabaseObjectIdentifier),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => f.write_str("ACCOUNT"),
            Self::Database(id) => write!(f, "DATABASE {id}"),
            Self::Schema(id) => write!(f, "SCHEMA {id}"),
        }
    }
}

pub trait ObjectIdentifier:
    fmt::Debug + fmt::Display + Clone + Eq + Hash + Into<AnyObjectIdentifier> + Send + Sync + 'static
{
    fn name(&self) -> &str;
    fn fully_qualified_name(&self) -> String;
    fn scope(&self) -> IdentifierScope;
    /// Scope that lists this object.
    fn container(&self) -> Scope;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountObjectIdentifier {
    name: String,
}

impl AccountObjectIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ObjectIdentifier for AccountObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn fully_qualified_name(&self) -> String {
        quote_ident(&self.name)
    }

    fn scope(&self) -> IdentifierScope {
        IdentifierScope::Account
    }

    fn container(&self) -> Scope {
        Scope::Account
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DatabaseObjectIdentifier {
    database: String,
    name: String,
}

impl DatabaseObjectIdentifier {
    pub fn new(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn database_name(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(self.database.clone())
    }
}

impl ObjectIdentifier for DatabaseObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn fully_qualified_name(&self) -> String {
        format!("{}.{}", quote_ident(&self.database), quote_ident(&self.name))
    }

    fn scope(&self) -> IdentifierScope {
        IdentifierScope::Database
    }

    fn container(&self) -> Scope {
        Scope::Database(self.database_id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaObjectIdentifier {
    database: String,
    schema: String,
    name: String,
}

impl SchemaObjectIdentifier {
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn in_schema(schema: &DatabaseObjectIdentifier, name: impl Into<String>) -> Self {
        Self::new(schema.database_name(), schema.name(), name)
    }

    #[must_use]
    pub fn database_name(&self) -> &str {
        &self.database
    }

    #[must_use]
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    #[must_use]
    pub fn schema_id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(self.database.clone(), self.schema.clone())
    }
}

impl ObjectIdentifier for SchemaObjectIdentifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn fully_qualified_name(&self) -> String {
        format!(
            "{}.{}.{}",
            quote_ident(&self.database),
            quote_ident(&self.schema),
            quote_ident(&self.name)
        )
    }

    fn scope(&self) -> IdentifierScope {
        IdentifierScope::Schema
    }

    fn container(&self) -> Scope {
        Scope::Schema(self.schema_id())
    }
}

/// Identifier of any scope, for callers that only learn the object kind at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnyObjectIdentifier {
    Account(AccountObjectIdentifier),
    Database(DatabaseObjectIdentifier),
    Schema(SchemaObjectIdentifier),
}

impl AnyObjectIdentifier {
    pub fn parse(scope: IdentifierScope, input: &str) -> Result<Self, IdentifierError> {
        Ok(match scope {
            IdentifierScope::Account => Self::Account(input.parse()?),
            IdentifierScope::Database => Self::Database(input.parse()?),
            IdentifierScope::Schema => Self::Schema(input.parse()?),
        })
    }
}

impl ObjectIdentifier for AnyObjectIdentifier {
    fn name(&self) -> &str {
        match self {
            Self::Account(id) => id.name(),
            Self::Database(id) => id.name(),
            Self::Schema(id) => id.name(),
        }
    }

    fn fully_qualified_name(&self) -> String {
        match self {
            Self::Account(id) => id.fully_qualified_name(),
            Self::Database(id) => id.fully_qualified_name(),
            Self::Schema(id) => id.fully_qualified_name(),
        }
    }

    fn scope(&self) -> IdentifierScope {
        match self {
            Self::Account(_) => IdentifierScope::Account,
            Self::Database(_) => IdentifierScope::Database,
            Self::Schema(_) => IdentifierScope::Schema,
        }
    }

    fn container(&self) -> Scope {
        match self {
            Self::Account(id) => id.container(),
            Self::Database(id) => id.container(),
            Self::Schema(id) => id.container(),
        }
    }
}

impl From<AccountObjectIdentifier> for AnyObjectIdentifier {
    fn from(value: AccountObjectIdentifier) -> Self {
        Self::Account(value)
    }
}

impl From<DatabaseObjectIdentifier> for AnyObjectIdentifier {
    fn from(value: DatabaseObjectIdentifier) -> Self {
        Self::Database(value)
    }
}

impl From<SchemaObjectIdentifier> for AnyObjectIdentifier {
    fn from(value: SchemaObjectIdentifier) -> Self {
        Self::Schema(value)
    }
}

impl FromStr for AccountObjectIdentifier {
    type Err = IdentifierError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let [name] = split_exact::<1>(input)?;
        Ok(Self::new(name))
    }
}

impl FromStr for DatabaseObjectIdentifier {
    type Err = IdentifierError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let [database, name] = split_exact::<2>(input)?;
        Ok(Self::new(database, name))
    }
}

impl FromStr for SchemaObjectIdentifier {
    type Err = IdentifierError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let [database, schema, name] = split_exact::<3>(input)?;
        Ok(Self::new(database, schema, name))
    }
}

impl fmt::Display for AccountObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name())
    }
}

impl fmt::Display for DatabaseObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name())
    }
}

impl fmt::Display for SchemaObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name())
    }
}

impl fmt::Display for AnyObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fully_qualified_name())
    }
}
