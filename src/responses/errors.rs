use crate::errors::ServerError;
use astra::Response;

/// What every route handler returns.
pub type ResultResp = Result<Response, ServerError>;
