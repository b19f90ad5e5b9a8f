use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to reach the reports API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The reports API rejected the request (HTTP {0}): {1}")]
    Status(u16, String),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid client configuration: {0}")]
    Configuration(String),
}
