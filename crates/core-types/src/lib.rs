pub mod error;
pub mod month;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use month::Month;
pub use structs::{ReportFilter, ReportRecord};
