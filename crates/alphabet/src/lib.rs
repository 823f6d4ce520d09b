//! # Alpha Pagination Alphabet
//!
//! Ordered, per-language character tables the pagination index is laid out
//! from. English, Arabic and Russian alphabets and the digits 0-9 ship
//! built in; [`TableAlter`] hooks can reshape them before they are cached.

mod error;
mod hooks;
mod provider;
mod tables;

pub use error::{AlphabetError, Result};
pub use hooks::{AlphabetAlterFn, AlterContext, NumbersAlterFn, TableAlter};
pub use provider::AlphabetProvider;
pub use tables::{
    builtin_alphabets, builtin_numbers, default_alphabet, default_numbers, CharacterTable,
    ARABIC, DEFAULT_LANGCODE, DIGITS, ENGLISH, RUSSIAN,
};
