//! # Alpha Pagination Cache
//!
//! Opaque key/value storage for data that is expensive to recompute per
//! request: the alphabet/number tables and the computed character sets.
//!
//! Entries are stored as JSON inside an envelope that records when they were
//! written, so both backends can apply an optional time-to-live on top of the
//! explicit invalidation callers perform when configuration changes.
//!
//! ```text
//! cache_id("alpha_pagination", &key)  ──> "alpha_pagination:<sha256/base64>"
//!            │
//!            ├──> MemoryCache (bounded, most-recently-used first)
//!            └──> FileCache   (one JSON file per id)
//! ```

mod backend;
mod error;
mod file;
mod key;
mod memory;

pub use backend::{load, store, CacheBackend};
pub use error::{CacheError, Result};
pub use file::FileCache;
pub use key::{cache_id, content_hash};
pub use memory::MemoryCache;
