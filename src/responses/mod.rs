pub mod errors;
pub mod html;

pub use errors::ResultResp;

// Normal HTML response
pub use html::{html_response, text_response};
