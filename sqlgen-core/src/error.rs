use std::{error::Error, fmt};

use crate::descriptor::QueryKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    UnsupportedQueryKind { query: String, kind: QueryKind },
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::UnsupportedQueryKind { query, kind } => {
                write!(f, "NeverChange driver does not support {kind} (query {query})")
            }
        }
    }
}

impl Error for DriverError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    UnknownCommand { query: String, cmd: String },
    DuplicateName { query: String, name: String },
    Driver(DriverError),
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenError::UnknownCommand { query, cmd } => {
                write!(f, "Unrecognized command {cmd:?} for query {query}")
            }
            GenError::DuplicateName { query, name } => {
                write!(f, "{name} already exists in this file (query {query})")
            }
            GenError::Driver(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GenError::Driver(err) => Some(err),
            GenError::UnknownCommand { .. } | GenError::DuplicateName { .. } => None,
        }
    }
}

impl From<DriverError> for GenError {
    fn from(err: DriverError) -> Self {
        GenError::Driver(err)
    }
}
