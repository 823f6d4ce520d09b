use thiserror::Error;

pub type Result<T> = std::result::Result<T, AlphabetError>;

#[derive(Error, Debug)]
pub enum AlphabetError {
    #[error("Cache error: {0}")]
    CacheError(#[from] alpha_pagination_cache::CacheError),

    #[error("Cache lock poisoned")]
    Poisoned,
}
