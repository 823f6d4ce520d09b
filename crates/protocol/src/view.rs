use crate::options::PaginationOptions;
use crate::value::CapturedQuery;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Plugin id of the pagination area handler.
pub const AREA_PLUGIN_ID: &str = "alpha_pagination";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerType {
    Header,
    Footer,
    Empty,
    Field,
}

impl fmt::Display for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Empty => "empty",
            Self::Field => "field",
        })
    }
}

/// Identity of a handler on a display.
///
/// This is all that survives between requests; the live view state is looked
/// up again through a [`ViewRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerRef {
    pub view_id: String,
    pub display_id: String,
    pub handler_type: HandlerType,
    pub field_id: String,
    pub langcode: String,
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.view_id, self.display_id, self.handler_type, self.field_id
        )
    }
}

/// A handler configured on a display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerConfig {
    pub id: String,
    pub handler_type: HandlerType,
    /// Plugin id, e.g. [`AREA_PLUGIN_ID`] or `alpha_pagination_group`.
    pub plugin: String,
    #[serde(default)]
    pub options: PaginationOptions,
}

impl HandlerConfig {
    pub fn is_pagination_area(&self) -> bool {
        matches!(self.handler_type, HandlerType::Header | HandlerType::Footer)
            && self.plugin == AREA_PLUGIN_ID
    }
}

/// A contextual argument of the display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    pub id: String,
    /// Argument is computed, not taken from the URL.
    #[serde(default)]
    pub skip_url: bool,
    /// Value used in URLs when the argument is absent ("exception" value).
    #[serde(default)]
    pub exception_value: Option<String>,
}

/// Request-scoped state of an executed view display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub view_id: String,
    pub display_id: String,
    pub base_table: String,
    pub base_field: String,
    /// Entity property name to schema column (e.g. `title` -> `title`).
    #[serde(default)]
    pub entity_properties: BTreeMap<String, String>,
    /// Arguments passed to the view for this request.
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub arguments: Vec<ArgumentSpec>,
    /// Display path, possibly with `%` placeholders.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub override_url: Option<String>,
    /// Path of the current request, without leading slash.
    #[serde(default)]
    pub current_path: String,
    #[serde(default)]
    pub query_parameters: BTreeMap<String, String>,
    #[serde(default)]
    pub build_info: Option<CapturedQuery>,
    #[serde(default)]
    pub handlers: Vec<HandlerConfig>,
}

impl ViewState {
    pub fn handler(&self, handler_type: HandlerType, id: &str) -> Option<&HandlerConfig> {
        self.handlers
            .iter()
            .find(|h| h.handler_type == handler_type && h.id == id)
    }

    /// Pagination areas configured in the header or footer.
    pub fn area_handlers(&self) -> Vec<&HandlerConfig> {
        self.handlers
            .iter()
            .filter(|h| h.is_pagination_area())
            .collect()
    }

    /// Schema column for an entity property, defaulting to the property name.
    pub fn schema_field<'a>(&'a self, property: &'a str) -> &'a str {
        self.entity_properties
            .get(property)
            .map(String::as_str)
            .unwrap_or(property)
    }
}

/// Resolves handler identities to live view state.
pub trait ViewRegistry: Send + Sync {
    fn load(&self, view_id: &str, display_id: &str) -> Option<ViewState>;
}

/// Registry over views held in memory, keyed by `(view_id, display_id)`.
#[derive(Debug, Default, Clone)]
pub struct StaticViewRegistry {
    views: BTreeMap<(String, String), ViewState>,
}

impl StaticViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, view: ViewState) {
        self.views
            .insert((view.view_id.clone(), view.display_id.clone()), view);
    }
}

impl ViewRegistry for StaticViewRegistry {
    fn load(&self, view_id: &str, display_id: &str) -> Option<ViewState> {
        self.views
            .get(&(view_id.to_string(), display_id.to_string()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(id: &str, handler_type: HandlerType) -> HandlerConfig {
        HandlerConfig {
            id: id.to_string(),
            handler_type,
            plugin: AREA_PLUGIN_ID.to_string(),
            options: PaginationOptions::default(),
        }
    }

    #[test]
    fn area_handlers_only_count_header_and_footer() {
        let view = ViewState {
            handlers: vec![
                area("a", HandlerType::Header),
                area("b", HandlerType::Empty),
                HandlerConfig {
                    plugin: "text".to_string(),
                    ..area("c", HandlerType::Footer)
                },
            ],
            ..Default::default()
        };
        let areas = view.area_handlers();
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].id, "a");
    }

    #[test]
    fn handler_ref_display_is_colon_joined() {
        let handler = HandlerRef {
            view_id: "glossary".to_string(),
            display_id: "page".to_string(),
            handler_type: HandlerType::Header,
            field_id: "alpha_pagination".to_string(),
            langcode: "en".to_string(),
        };
        assert_eq!(handler.to_string(), "glossary:page:header:alpha_pagination");
    }

    #[test]
    fn registry_returns_clone_of_stored_view() {
        let mut registry = StaticViewRegistry::new();
        registry.insert(ViewState {
            view_id: "glossary".to_string(),
            display_id: "page".to_string(),
            ..Default::default()
        });
        assert!(registry.load("glossary", "page").is_some());
        assert!(registry.load("glossary", "block").is_none());
    }

    #[test]
    fn schema_field_defaults_to_property() {
        let mut view = ViewState::default();
        assert_eq!(view.schema_field("title"), "title");
        view.entity_properties
            .insert("name".to_string(), "display_name".to_string());
        assert_eq!(view.schema_field("name"), "display_name");
    }
}
