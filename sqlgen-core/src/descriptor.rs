//! Query descriptors as delivered by the upstream SQL compiler.
//!
//! The wire shape follows the JSON form of a plugin `GenerateRequest`: every
//! field except a query's `name` and `cmd` may be omitted.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::GenError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub queries: Vec<Query>,
}

/// Declared SQL type name. Free-form, the vocabulary is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnType {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub not_null: bool,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default, rename = "type")]
    pub sql_type: Option<ColumnType>,
}

impl Column {
    pub fn new(name: &str, sql_type: &str, not_null: bool) -> Self {
        Self {
            name: name.to_owned(),
            not_null,
            is_array: false,
            sql_type: Some(ColumnType {
                name: sql_type.to_owned(),
            }),
        }
    }

    pub fn untyped(name: &str, not_null: bool) -> Self {
        Self {
            name: name.to_owned(),
            not_null,
            is_array: false,
            sql_type: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// One-based bind position as sent on the wire.
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub column: Option<Column>,
}

impl Parameter {
    pub fn new(number: u32, column: Column) -> Self {
        Self {
            number,
            column: Some(column),
        }
    }

    /// Zero-based bind position, `None` when the request left `number` out.
    pub fn index(&self) -> Option<usize> {
        self.number.checked_sub(1).map(|idx| idx as usize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Exec,
    One,
    Many,
    ExecLastId,
}

impl QueryKind {
    pub fn returns_rows(self) -> bool {
        matches!(self, QueryKind::One | QueryKind::Many)
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKind::Exec => write!(f, ":exec"),
            QueryKind::One => write!(f, ":one"),
            QueryKind::Many => write!(f, ":many"),
            QueryKind::ExecLastId => write!(f, ":execlastid"),
        }
    }
}

/// Error returned when a command string names no known query kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl FromStr for QueryKind {
    type Err = UnknownKind;

    fn from_str(cmd: &str) -> Result<Self, Self::Err> {
        Ok(match cmd.trim().trim_start_matches(':') {
            "exec" => Self::Exec,
            "one" => Self::One,
            "many" => Self::Many,
            "execlastid" => Self::ExecLastId,
            _ => return Err(UnknownKind(cmd.to_owned())),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub name: String,
    pub cmd: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub params: Vec<Parameter>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub filename: String,
}

impl Query {
    pub fn new(name: &str, kind: QueryKind) -> Self {
        Self {
            name: name.to_owned(),
            cmd: kind.to_string(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_owned();
        self
    }

    pub fn with_param(mut self, column: Column) -> Self {
        let number = self.params.len() as u32 + 1;
        self.params.push(Parameter::new(number, column));
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn kind(&self) -> Result<QueryKind, GenError> {
        self.cmd
            .parse()
            .map_err(|UnknownKind(cmd)| GenError::UnknownCommand {
                query: self.name.clone(),
                cmd,
            })
    }
}
