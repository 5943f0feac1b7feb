use std::fmt;
use thiserror::Error;

/// One acceptable next input for an expectation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Char(char),
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Char(c) => write!(f, "\"{c}\""),
            Expected::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// Raised when the input holds something other than what a hard
/// expectation check allows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "{} at line {line}, column {column}, position {position}.",
    describe(.found, .expected)
)]
pub struct ExpectingError {
    pub expected: Vec<Expected>,
    /// `None` when the input was exhausted.
    pub found: Option<char>,
    pub line: usize,
    pub column: usize,
    pub position: u64,
}

fn describe(found: &Option<char>, expected: &[Expected]) -> String {
    let head = match found {
        Some(c) => format!("Unexpected character \"{c}\" in input"),
        None => "Unexpected end of input".to_string(),
    };
    match expected {
        [] => head,
        [only] => format!("{head}. Expecting {only}"),
        [first, second] => format!("{head}. Expecting {first} or {second}"),
        [init @ .., last] => {
            let listed: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{head}. Expecting {}, or {last}", listed.join(", "))
        }
    }
}

#[derive(Error, Debug)]
pub enum MinifyError {
    #[error("Cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{source_name}: {source}")]
    Syntax {
        source_name: String,
        #[source]
        source: ExpectingError,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MinifyError>;
