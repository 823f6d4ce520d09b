//! # Alpha Pagination Query
//!
//! Finds which first characters occur in a listing, independent of the page
//! the listing is currently showing.
//!
//! ```text
//! CapturedQuery (sql + placeholders)
//!     │
//!     ├──> render_query      placeholders -> quoted literals
//!     ├──> normalize_query   drop LIMIT, neutralize SUBSTRING filters
//!     │
//!     ├──> Database::query   entity identifiers of the full result set
//!     │
//!     └──> SELECT DISTINCT SUBSTR(field, 1, 1) ... WHERE id IN (...)
//!            └─> upper-cased, de-duplicated prefixes
//! ```

mod capture;
mod database;
mod error;
mod normalize;
mod prefix;
mod sqlite;

pub use capture::{quote_argument, quote_value, render_query};
pub use database::{Database, Row};
pub use error::{QueryError, Result};
pub use normalize::{decode_entities, escape_plain, normalize_query, normalize_rendered};
pub use prefix::{normalize_prefix, PrefixDiscovery, PrefixSource};
pub use sqlite::SqliteDatabase;
