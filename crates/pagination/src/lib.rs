//! # Alpha Pagination
//!
//! A letter/number index for content listings: `A B C ... Z 0-9 All`, each
//! entry linking to the listing filtered by that first character.
//!
//! ```text
//! AlphaPagination::characters()
//!     │
//!     ├──> cache hit?  ──────────────────────────────┐
//!     │                                              │
//!     ├──> AlphabetProvider   ordered letters/digits │
//!     ├──> PrefixDiscovery    first characters found │
//!     ├──> Layout::build      order, enable, filter  │
//!     └──> cache store                               │
//!                                                    ▼
//!                             Layout::activate (per request)
//!                                                    │
//!                                  render() ──> PaginationList
//! ```
//!
//! Only the handler identity ([`HandlerRef`]) outlives a request; the view
//! state is looked up again through a [`ViewRegistry`].
//!
//! [`HandlerRef`]: alpha_pagination_protocol::HandlerRef
//! [`ViewRegistry`]: alpha_pagination_protocol::ViewRegistry

mod builder;
mod character;
mod error;
mod group;
mod link;
mod render;
mod service;
mod set;
mod validate;

pub use builder::Layout;
pub use character::Character;
pub use error::{PaginationError, Result};
pub use group::{first_character, GroupHeading};
pub use link::{
    clean_css_identifier, internal_href, parse_attributes, replace_tokens, view_url, Attributes,
    Link, TokenData, TOKEN_TYPE,
};
pub use render::{ItemContent, PaginationItem, PaginationList};
pub use service::{AlphaPagination, Services};
pub use set::CharacterSet;
pub use validate::validate_display;

pub use alpha_pagination_alphabet::AlphabetProvider;
pub use alpha_pagination_cache::{CacheBackend, FileCache, MemoryCache};
pub use alpha_pagination_protocol::{
    FieldSelector, HandlerRef, HandlerType, NumericMode, PaginationOptions, Position, ViewState,
};
pub use alpha_pagination_query::{Database, SqliteDatabase};
