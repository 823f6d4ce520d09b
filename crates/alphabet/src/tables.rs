//! Literal character tables.
//!
//! Every table is spelled out character by character. Ranges over code points
//! are not used: code point order does not match alphabetical order in every
//! script, and some alphabets have letters outside the contiguous block.

use std::collections::BTreeMap;

/// Langcode to ordered characters.
pub type CharacterTable = BTreeMap<String, Vec<String>>;

pub const DEFAULT_LANGCODE: &str = "en";

pub const ENGLISH: &[&str] = &[
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z",
];

pub const ARABIC: &[&str] = &[
    "ا", "ب", "ت", "ث", "ج", "ح", "خ", "د", "ذ", "ر", "ز", "س", "ش", "ص", "ض", "ط", "ظ", "ع", "غ",
    "ف", "ق", "ك", "ل", "م", "ن", "و", "ه", "ي",
];

pub const RUSSIAN: &[&str] = &[
    "А", "Б", "В", "Г", "Д", "Е", "Ё", "Ж", "З", "И", "Й", "К", "Л", "М", "Н", "О", "П", "Р", "С",
    "Т", "У", "Ф", "Х", "Ц", "Ч", "Ш", "Щ", "Ы", "Э", "Ю", "Я",
];

pub const DIGITS: &[&str] = &["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

pub fn default_alphabet() -> Vec<String> {
    to_owned(ENGLISH)
}

pub fn default_numbers() -> Vec<String> {
    to_owned(DIGITS)
}

/// Alphabets before any alter hook ran.
pub fn builtin_alphabets() -> CharacterTable {
    let mut alphabets = CharacterTable::new();
    alphabets.insert("ar".to_string(), to_owned(ARABIC));
    alphabets.insert("en".to_string(), to_owned(ENGLISH));
    alphabets.insert("ru".to_string(), to_owned(RUSSIAN));
    alphabets
}

/// Numbers before any alter hook ran.
pub fn builtin_numbers() -> CharacterTable {
    let mut numbers = CharacterTable::new();
    numbers.insert("en".to_string(), to_owned(DIGITS));
    numbers
}

fn to_owned(chars: &[&str]) -> Vec<String> {
    chars.iter().map(|c| (*c).to_string()).collect()
}
