pub mod dashboard;
pub mod diagnostic;

pub use dashboard::dashboard_page;
pub use diagnostic::diagnostic_page;
