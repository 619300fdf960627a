use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Io { path: String, message: String },
    Csv(String),
    MissingColumn(String),
    InvalidDate { line: usize, value: String },
    InvalidPrice { line: usize, value: String },
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, message } => write!(f, "Cannot read {path}: {message}"),
            LoadError::Csv(msg) => write!(f, "CSV parse error: {msg}"),
            LoadError::MissingColumn(col) => write!(f, "Missing required column {col}"),
            LoadError::InvalidDate { line, value } => {
                write!(f, "Line {line}: unparseable date {value:?}")
            }
            LoadError::InvalidPrice { line, value } => {
                write!(f, "Line {line}: price {value:?} is not numeric")
            }
            LoadError::Empty => write!(f, "Dataset has no rows"),
        }
    }
}

impl Error for LoadError {}

impl From<csv::Error> for LoadError {
    fn from(e: csv::Error) -> Self {
        LoadError::Csv(e.to_string())
    }
}
