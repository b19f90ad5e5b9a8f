use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid calendar month number: {0} (expected 1-12)")]
    InvalidMonth(u32),
}
