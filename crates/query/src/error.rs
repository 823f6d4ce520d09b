use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Protocol(#[from] alpha_pagination_protocol::ProtocolError),

    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),
}
