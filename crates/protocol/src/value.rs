use serde::{Deserialize, Serialize};
use std::fmt;

/// A single database cell or bound query argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Argument bound to a named placeholder of a captured query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryArgument {
    Single(Value),
    List(Vec<Value>),
}

/// The SELECT a listing was built with, as captured after the view executed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapturedQuery {
    /// SQL text with named placeholders (e.g. `:db_condition_placeholder_0`).
    pub sql: String,
    /// Placeholder name (including the leading `:`) to bound value.
    #[serde(default)]
    pub arguments: Vec<(String, QueryArgument)>,
}

impl CapturedQuery {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, placeholder: impl Into<String>, value: QueryArgument) -> Self {
        self.arguments.push((placeholder.into(), value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sql.trim().is_empty()
    }
}
