//! Deciding which columns are identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::Column;

/// Decides whether a column holds identifiers and must be unique.
pub trait IdentifierPolicy: Send + Sync {
    fn is_identifier(&self, column: &Column) -> bool;
}

impl<F> IdentifierPolicy for F
where
    F: Fn(&Column) -> bool + Send + Sync,
{
    fn is_identifier(&self, column: &Column) -> bool {
        self(column)
    }
}

impl fmt::Debug for dyn IdentifierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdentifierPolicy")
    }
}

/// Column name contains a token, ignoring case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameContains {
    pub token: String,
}

impl NameContains {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl Default for NameContains {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdentifierPolicy for NameContains {
    fn is_identifier(&self, column: &Column) -> bool {
        name_contains(&column.name, &self.token)
    }
}

/// An explicit list of column names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColumns {
    pub names: Vec<String>,
}

impl NamedColumns {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl IdentifierPolicy for NamedColumns {
    fn is_identifier(&self, column: &Column) -> bool {
        self.names.iter().any(|n| *n == column.name)
    }
}

/// Declarative identifier rule, as written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdentifierRule {
    NameContains { token: String },
    Named { columns: Vec<String> },
}

impl Default for IdentifierRule {
    fn default() -> Self {
        IdentifierRule::NameContains {
            token: "id".to_string(),
        }
    }
}

impl IdentifierPolicy for IdentifierRule {
    fn is_identifier(&self, column: &Column) -> bool {
        match self {
            IdentifierRule::NameContains { token } => name_contains(&column.name, token),
            IdentifierRule::Named { columns } => columns.iter().any(|n| *n == column.name),
        }
    }
}

fn name_contains(name: &str, token: &str) -> bool {
    name.to_lowercase().contains(&token.to_lowercase())
}
