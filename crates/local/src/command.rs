use stratus_core::{
    AccountObjectIdentifier, AlterAction, AnyObjectIdentifier, DatabaseObjectIdentifier, Ident,
    IdentifierScope, ObjectType, Scope, SchemaObjectIdentifier, ServerError,
};

use crate::lexer::{Token, syntax_error, tokenize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Create {
        object_type: ObjectType,
        id: AnyObjectIdentifier,
        or_replace: bool,
        if_not_exists: bool,
        comment: Option<String>,
    },
    Drop {
        object_type: ObjectType,
        id: AnyObjectIdentifier,
        if_exists: bool,
    },
    Alter {
        object_type: ObjectType,
        id: AnyObjectIdentifier,
        if_exists: bool,
        action: AlterAction,
    },
    Show {
        object_type: ObjectType,
        like: Option<String>,
        scope: Option<Scope>,
        limit: Option<u64>,
    },
    UseRole(AccountObjectIdentifier),
}

pub(crate) fn parse_command(sql: &str) -> Result<Command, ServerError> {
    let tokens = tokenize(sql)?;
    let mut parser = Parser {
        tokens,
        position: 0,
    };
    let command = parser.parse_command()?;
    parser.expect_end()?;
    Ok(command)
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    fn parse_command(&mut self) -> Result<Command, ServerError> {
        let Some(verb) = self.next_word() else {
            return Err(self.error("expected a statement"));
        };

        match verb.to_ascii_uppercase().as_str() {
            "CREATE" => self.parse_create(),
            "DROP" => self.parse_drop(),
            "ALTER" => self.parse_alter(),
            "SHOW" => self.parse_show(),
            "USE" => self.parse_use(),
            other => Err(self.error(&format!("unsupported statement '{other}'"))),
        }
    }

    fn parse_create(&mut self) -> Result<Command, ServerError> {
        let or_replace = self.accept_keywords(&["OR", "REPLACE"]);
        let object_type = self.parse_object_type()?;
        let if_not_exists = self.accept_keywords(&["IF", "NOT", "EXISTS"]);
        let id = self.parse_identifier(object_type.scope())?;
        let comment = if self.accept_keyword("COMMENT") {
            self.expect(&Token::Equals, "'='")?;
            Some(self.parse_string()?)
        } else {
            None
        };

        if or_replace && if_not_exists {
            return Err(self.error("OR REPLACE and IF NOT EXISTS are incompatible"));
        }

        Ok(Command::Create {
            object_type,
            id,
            or_replace,
            if_not_exists,
            comment,
        })
    }

    fn parse_drop(&mut self) -> Result<Command, ServerError> {
        let object_type = self.parse_object_type()?;
        let if_exists = self.accept_keywords(&["IF", "EXISTS"]);
        let id = self.parse_identifier(object_type.scope())?;
        if !self.accept_keyword("CASCADE") {
            self.accept_keyword("RESTRICT");
        }

        Ok(Command::Drop {
            object_type,
            id,
            if_exists,
        })
    }

    fn parse_alter(&mut self) -> Result<Command, ServerError> {
        let object_type = self.parse_object_type()?;
        let if_exists = self.accept_keywords(&["IF", "EXISTS"]);
        let id = self.parse_identifier(object_type.scope())?;

        let action = if self.accept_keywords(&["RENAME", "TO"]) {
            AlterAction::RenameTo(self.parse_identifier(object_type.scope())?)
        } else if self.accept_keywords(&["SET", "COMMENT"]) {
            self.expect(&Token::Equals, "'='")?;
            AlterAction::SetComment(self.parse_string()?)
        } else if self.accept_keywords(&["UNSET", "COMMENT"]) {
            AlterAction::UnsetComment
        } else {
            return Err(self.error("expected RENAME TO, SET COMMENT, or UNSET COMMENT"));
        };

        Ok(Command::Alter {
            object_type,
            id,
            if_exists,
            action,
        })
    }

    fn parse_show(&mut self) -> Result<Command, ServerError> {
        let Some(plural) = self.next_word() else {
            return Err(self.error("expected an object kind"));
        };
        let object_type = ObjectType::from_plural_keyword(&plural)
            .ok_or_else(|| self.error(&format!("unsupported object kind '{plural}'")))?;

        let like = if self.accept_keyword("LIKE") {
            Some(self.parse_string()?)
        } else {
            None
        };

        let scope = if self.accept_keyword("IN") {
            Some(self.parse_scope(object_type)?)
        } else {
            None
        };

        let limit = if self.accept_keyword("LIMIT") {
            match self.next() {
                Some(Token::Number(limit)) => Some(limit),
                _ => return Err(self.error("expected a row count after LIMIT")),
            }
        } else {
            None
        };

        Ok(Command::Show {
            object_type,
            like,
            scope,
            limit,
        })
    }

    fn parse_scope(&mut self, object_type: ObjectType) -> Result<Scope, ServerError> {
        let scope = if self.accept_keyword("ACCOUNT") {
            Scope::Account
        } else if self.accept_keyword("DATABASE") {
            Scope::Database(self.parse_account_identifier()?)
        } else if self.accept_keyword("SCHEMA") {
            let [database, schema] = self.parse_parts::<2>()?;
            Scope::Schema(DatabaseObjectIdentifier::new(database, schema))
        } else {
            return Err(self.error("expected ACCOUNT, DATABASE, or SCHEMA after IN"));
        };

        let fits = match (&scope, object_type.scope()) {
            (Scope::Account, _) | (_, IdentifierScope::Schema) => true,
            (Scope::Database(_), IdentifierScope::Database) => true,
            (Scope::Database(_) | Scope::Schema(_), IdentifierScope::Account)
            | (Scope::Schema(_), IdentifierScope::Database) => false,
        };
        if !fits {
            return Err(self.error(&format!(
                "{} cannot be listed IN {scope}",
                object_type.plural_keyword()
            )));
        }

        Ok(scope)
    }

    fn parse_use(&mut self) -> Result<Command, ServerError> {
        if !self.accept_keyword("ROLE") {
            return Err(self.error("only USE ROLE is supported"));
        }
        Ok(Command::UseRole(self.parse_account_identifier()?))
    }

    fn parse_object_type(&mut self) -> Result<ObjectType, ServerError> {
        let Some(keyword) = self.next_word() else {
            return Err(self.error("expected an object kind"));
        };
        ObjectType::from_keyword(&keyword)
            .ok_or_else(|| self.error(&format!("unsupported object kind '{keyword}'")))
    }

    fn parse_identifier(&mut self, scope: IdentifierScope) -> Result<AnyObjectIdentifier, ServerError> {
        Ok(match scope {
            IdentifierScope::Account => self.parse_account_identifier()?.into(),
            IdentifierScope::Database => {
                let [database, name] = self.parse_parts::<2>()?;
                DatabaseObjectIdentifier::new(database, name).into()
            }
            IdentifierScope::Schema => {
                let [database, schema, name] = self.parse_parts::<3>()?;
                SchemaObjectIdentifier::new(database, schema, name).into()
            }
        })
    }

    fn parse_account_identifier(&mut self) -> Result<AccountObjectIdentifier, ServerError> {
        let [name] = self.parse_parts::<1>()?;
        Ok(AccountObjectIdentifier::new(name))
    }

    fn parse_parts<const N: usize>(&mut self) -> Result<[String; N], ServerError> {
        let mut parts = vec![self.parse_ident_part()?];
        while self.peek() == Some(&Token::Dot) {
            self.position += 1;
            parts.push(self.parse_ident_part()?);
        }

        let actual = parts.len();
        parts.try_into().map_err(|_| {
            self.error(&format!(
                "identifier has {actual} part(s); expected {N}"
            ))
        })
    }

    fn parse_ident_part(&mut self) -> Result<String, ServerError> {
        let ident = match self.next() {
            Some(Token::QuotedIdent(value)) => Ident::quoted(value),
            Some(Token::Word(value)) => Ident::unquoted(value),
            _ => return Err(self.error("expected an identifier")),
        };

        if ident.value.is_empty() {
            return Err(self.error("identifier cannot be empty"));
        }
        Ok(ident.normalized())
    }

    fn parse_string(&mut self) -> Result<String, ServerError> {
        match self.next() {
            Some(Token::StringLiteral(value)) => Ok(value),
            _ => Err(self.error("expected a string literal")),
        }
    }

    fn expect(&mut self, token: &Token, label: &str) -> Result<(), ServerError> {
        if self.peek() == Some(token) {
            self.position += 1;
            return Ok(());
        }
        Err(self.error(&format!("expected {label}")))
    }

    fn expect_end(&mut self) -> Result<(), ServerError> {
        while self.peek() == Some(&Token::Semicolon) {
            self.position += 1;
        }
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(self.error(&format!("unexpected trailing token {token:?}"))),
        }
    }

    fn accept_keyword(&mut self, keyword: &str) -> bool {
        self.accept_keywords(&[keyword])
    }

    /// Consumes the whole keyword sequence or nothing.
    fn accept_keywords(&mut self, keywords: &[&str]) -> bool {
        let matches = keywords.iter().enumerate().all(|(offset, keyword)| {
            matches!(
                self.tokens.get(self.position + offset),
                Some(Token::Word(word)) if word.eq_ignore_ascii_case(keyword)
            )
        });
        if matches {
            self.position += keywords.len();
        }
        matches
    }

    fn next_word(&mut self) -> Option<String> {
        match self.peek() {
            Some(Token::Word(word)) => {
                let word = word.clone();
                self.position += 1;
                Some(word)
            }
            _ => None,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn error(&self, message: &str) -> ServerError {
        syntax_error(self.position, message)
    }
}
