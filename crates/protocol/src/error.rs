use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProtocolError>;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Invalid field selector: {0}")]
    InvalidFieldSelector(String),

    #[error("Invalid numbers mode: {0} (expected 0, 1 or 2)")]
    InvalidNumericMode(u8),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
