use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which column the first-character index is computed from.
///
/// Accepted forms:
/// - `title` / `name`: entity pseudo-fields stored on the base table
/// - `field` or `entity__field`: single value data field (`field_data_<field>.<field>_value`)
/// - `field:column` or `entity__field:column`: one column of a compound field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum FieldSelector {
    Title,
    Name,
    Field { name: String },
    Compound { name: String, column: String },
}

impl FieldSelector {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ProtocolError::InvalidFieldSelector(
                "empty field selector".to_string(),
            ));
        }

        // Drop the `entity__` prefix used by grouped field ids.
        let field = match raw.split_once("__") {
            Some((entity, field)) => {
                if !is_identifier(entity) {
                    return Err(ProtocolError::InvalidFieldSelector(raw.to_string()));
                }
                field
            }
            None => raw,
        };

        match field {
            "title" => return Ok(Self::Title),
            "name" => return Ok(Self::Name),
            _ => {}
        }

        match field.split_once(':') {
            None if is_identifier(field) => Ok(Self::Field {
                name: field.to_string(),
            }),
            Some((name, column)) if is_identifier(name) && is_identifier(column) => {
                Ok(Self::Compound {
                    name: name.to_string(),
                    column: column.to_string(),
                })
            }
            _ => Err(ProtocolError::InvalidFieldSelector(raw.to_string())),
        }
    }

    /// Field name a row renderer knows this selector by.
    pub fn field_name(&self) -> &str {
        match self {
            Self::Title => "title",
            Self::Name => "name",
            Self::Field { name } | Self::Compound { name, .. } => name,
        }
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::Name => f.write_str("name"),
            Self::Field { name } => f.write_str(name),
            Self::Compound { name, column } => write!(f, "{name}:{column}"),
        }
    }
}

fn is_identifier(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pseudo_fields() {
        assert_eq!(FieldSelector::parse("title").unwrap(), FieldSelector::Title);
        assert_eq!(FieldSelector::parse("name").unwrap(), FieldSelector::Name);
        assert_eq!(
            FieldSelector::parse("node__title").unwrap(),
            FieldSelector::Title
        );
    }

    #[test]
    fn parses_data_fields() {
        assert_eq!(
            FieldSelector::parse("field_surname").unwrap(),
            FieldSelector::Field {
                name: "field_surname".to_string()
            }
        );
        assert_eq!(
            FieldSelector::parse("node__field_address:locality").unwrap(),
            FieldSelector::Compound {
                name: "field_address".to_string(),
                column: "locality".to_string()
            }
        );
    }

    #[test]
    fn rejects_unknown_formats() {
        for raw in ["", "  ", "a:b:c", "field name", "x:", ":y", "bad-entity__title", "f;DROP"] {
            assert!(
                FieldSelector::parse(raw).is_err(),
                "selector {raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_round_trips_field_part() {
        let selector = FieldSelector::parse("user__field_address:country").unwrap();
        assert_eq!(selector.to_string(), "field_address:country");
        assert_eq!(selector.field_name(), "field_address");
    }
}
