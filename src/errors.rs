// errors.rs
use std::fmt;

/// Errors raised while answering a request. Startup failures never
/// surface here; they are carried by the dashboard as stage outcomes.
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    RenderError(String),
    InternalError,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::RenderError(msg) => write!(f, "Render Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
