//! Shared data types for alpha pagination: area options, field selectors,
//! captured queries and the request-scoped view state the index is built from.

mod error;
mod field;
mod options;
mod value;
mod view;

pub use error::{ProtocolError, Result};
pub use field::FieldSelector;
pub use options::{
    NumericMode, PaginationOptions, Position, DEFAULT_LINK_PATH, NUMERIC_DIVIDER_VALUE,
};
pub use value::{CapturedQuery, QueryArgument, Value};
pub use view::{
    ArgumentSpec, HandlerConfig, HandlerRef, HandlerType, StaticViewRegistry, ViewRegistry,
    ViewState, AREA_PLUGIN_ID,
};
