use crate::error::{ProtocolError, Result};
use crate::field::FieldSelector;
use serde::{Deserialize, Serialize};

/// How digits take part in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum NumericMode {
    /// No numeric entries.
    #[default]
    Off,
    /// One entry per digit.
    Individual,
    /// A single entry (sentinel value + label) standing for every digit.
    SingleLabel,
}

impl TryFrom<u8> for NumericMode {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::Individual),
            2 => Ok(Self::SingleLabel),
            other => Err(ProtocolError::InvalidNumericMode(other)),
        }
    }
}

impl From<NumericMode> for u8 {
    fn from(mode: NumericMode) -> Self {
        match mode {
            NumericMode::Off => 0,
            NumericMode::Individual => 1,
            NumericMode::SingleLabel => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Before,
    After,
}

/// Options of one alpha pagination area, keyed the way views stores them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationOptions {
    #[serde(rename = "ui_name", skip_serializing_if = "Option::is_none")]
    pub ui_name: Option<String>,

    #[serde(rename = "paginate_view_relationship")]
    pub relationship: String,
    #[serde(rename = "paginate_view_field")]
    pub view_field: String,

    #[serde(rename = "paginate_link_path")]
    pub link_path: String,
    #[serde(rename = "paginate_link_external")]
    pub link_external: bool,
    #[serde(rename = "paginate_link_class")]
    pub link_class: String,
    #[serde(rename = "paginate_link_attributes")]
    pub link_attributes: String,

    #[serde(rename = "paginate_class")]
    pub class: String,
    #[serde(rename = "paginate_list_class")]
    pub list_class: String,
    #[serde(rename = "paginate_active_class")]
    pub active_class: String,
    #[serde(rename = "paginate_inactive_class")]
    pub inactive_class: String,

    #[serde(rename = "paginate_all_display")]
    pub all_display: bool,
    #[serde(rename = "paginate_all_class")]
    pub all_class: String,
    #[serde(rename = "paginate_all_label")]
    pub all_label: String,
    #[serde(rename = "paginate_all_value")]
    pub all_value: String,
    #[serde(rename = "paginate_all_position")]
    pub all_position: Position,
    #[serde(rename = "paginate_toggle_empty")]
    pub toggle_empty: bool,

    #[serde(rename = "paginate_view_numbers")]
    pub numbers: NumericMode,
    #[serde(rename = "paginate_numeric_class")]
    pub numeric_class: String,
    #[serde(rename = "paginate_numeric_divider")]
    pub numeric_divider: bool,
    #[serde(rename = "paginate_numeric_divider_class")]
    pub numeric_divider_class: String,
    #[serde(rename = "paginate_numeric_hide_empty")]
    pub numeric_hide_empty: bool,
    #[serde(rename = "paginate_numeric_label")]
    pub numeric_label: String,
    #[serde(rename = "paginate_numeric_position")]
    pub numeric_position: Position,
    #[serde(rename = "paginate_numeric_value")]
    pub numeric_value: String,
}

/// Value of the divider entry placed between the numeric block and the alphabet.
pub const NUMERIC_DIVIDER_VALUE: &str = "-";

pub const DEFAULT_LINK_PATH: &str = "[alpha_pagination:path]/[alpha_pagination:value]";

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            ui_name: None,
            relationship: "none".to_string(),
            view_field: "title".to_string(),
            link_path: DEFAULT_LINK_PATH.to_string(),
            link_external: false,
            link_class: String::new(),
            link_attributes: String::new(),
            class: "alpha-pagination".to_string(),
            list_class: "alpha-pagination-list".to_string(),
            active_class: "active".to_string(),
            inactive_class: "inactive".to_string(),
            all_display: true,
            all_class: "all".to_string(),
            all_label: "All".to_string(),
            all_value: "all".to_string(),
            all_position: Position::After,
            toggle_empty: true,
            numbers: NumericMode::Off,
            numeric_class: "numeric".to_string(),
            numeric_divider: true,
            numeric_divider_class: "numeric-divider".to_string(),
            numeric_hide_empty: true,
            numeric_label: "#".to_string(),
            numeric_position: Position::Before,
            numeric_value: "0+1+2+3+4+5+6+7+8+9".to_string(),
        }
    }
}

impl PaginationOptions {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn field_selector(&self) -> Result<FieldSelector> {
        FieldSelector::parse(&self.view_field)
    }

    /// Whether the "all" entry takes part in the index.
    pub fn shows_all(&self) -> bool {
        self.all_display && !self.all_label.is_empty()
    }

    /// Whether a divider entry separates the numeric block from the alphabet.
    pub fn shows_divider(&self) -> bool {
        self.numbers == NumericMode::Individual && self.numeric_divider
    }

    pub fn ui_name(&self) -> &str {
        self.ui_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Alpha Pagination")
    }

    /// Check the options against the character tables they will be used with.
    ///
    /// Returns human-readable messages; an empty list means the options are usable.
    pub fn validate(&self, alphabet: &[String], numbers: &[String]) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(err) = self.field_selector() {
            errors.push(format!(
                "The field \"{}\" cannot be used for alpha pagination: {err}",
                self.view_field
            ));
        }

        if self.numbers == NumericMode::SingleLabel {
            if self.numeric_value.is_empty() {
                errors.push("The numeric value must not be empty.".to_string());
            } else if numbers.iter().any(|n| *n == self.numeric_value)
                || alphabet.iter().any(|c| *c == self.numeric_value)
            {
                errors.push(format!(
                    "The numeric value \"{}\" collides with a real character.",
                    self.numeric_value
                ));
            }
        }

        if self.shows_all() {
            if self.all_value.is_empty() {
                errors.push("The \"all\" value must not be empty.".to_string());
            } else if alphabet.iter().any(|c| *c == self.all_value)
                || numbers.iter().any(|n| *n == self.all_value)
                || (self.numbers == NumericMode::SingleLabel
                    && self.all_value == self.numeric_value)
                || self.all_value == NUMERIC_DIVIDER_VALUE
            {
                errors.push(format!(
                    "The \"all\" value \"{}\" collides with another character.",
                    self.all_value
                ));
            }
        }

        errors
    }
}
