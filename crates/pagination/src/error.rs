use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaginationError>;

#[derive(Error, Debug)]
pub enum PaginationError {
    #[error("Alphabet error: {0}")]
    AlphabetError(#[from] alpha_pagination_alphabet::AlphabetError),

    #[error("Query error: {0}")]
    QueryError(#[from] alpha_pagination_query::QueryError),

    #[error("Cache error: {0}")]
    CacheError(#[from] alpha_pagination_cache::CacheError),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] alpha_pagination_protocol::ProtocolError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("View not found: {0}")]
    ViewNotFound(String),
}
