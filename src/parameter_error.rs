//! Error handling for the configuration reader

use std::io;

use crate::ik_error::IkError;

/// Unified error to report failures while reading solver parameters and joint limits.
#[derive(Debug)]
pub enum ParameterError {
    IoError(io::Error),
    ParseError(String),
    MissingField(String),
    InvalidLength { expected: usize, found: usize },
    InvalidValue(String),
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            ParameterError::IoError(ref err) =>
                write!(f, "IO Error: {}", err),
            ParameterError::ParseError(ref msg) =>
                write!(f, "Parse Error: {}", msg),
            ParameterError::MissingField(ref field) =>
                write!(f, "Missing Field: {}", field),
            ParameterError::InvalidLength { expected, found } =>
                write!(f, "Invalid Length: expected {}, found {}", expected, found),
            ParameterError::InvalidValue(ref msg) =>
                write!(f, "Invalid Value: {}", msg),
        }
    }
}

impl std::error::Error for ParameterError {}

impl From<io::Error> for ParameterError {
    fn from(err: io::Error) -> Self {
        ParameterError::IoError(err)
    }
}

impl From<IkError> for ParameterError {
    fn from(err: IkError) -> Self {
        match err {
            IkError::InvalidLength { expected, found } => ParameterError::InvalidLength { expected, found },
            other => ParameterError::InvalidValue(other.to_string()),
        }
    }
}
