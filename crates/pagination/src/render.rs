use serde::Serialize;

use crate::link::{escape_html, Attributes, Link};

/// The rendered index: a wrapper around a list of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationList {
    pub wrapper: Attributes,
    pub list: Attributes,
    pub items: Vec<PaginationItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationItem {
    /// Attributes of the list item itself (`all`, `numeric`, `active`, ...).
    pub wrapper: Attributes,
    pub content: ItemContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemContent {
    Divider,
    Link(Link),
    /// A character that is shown but not linked.
    Inactive { label: String },
}

impl PaginationItem {
    pub fn label(&self) -> Option<&str> {
        match &self.content {
            ItemContent::Divider => None,
            ItemContent::Link(link) => Some(&link.label),
            ItemContent::Inactive { label } => Some(label),
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self.content, ItemContent::Link(_))
    }

    fn to_html(&self) -> String {
        let content = match &self.content {
            ItemContent::Divider => String::new(),
            ItemContent::Link(link) => link.to_html(),
            ItemContent::Inactive { label } => format!("<span>{}</span>", escape_html(label)),
        };
        format!("<li{}>{}</li>", self.wrapper.to_html(), content)
    }
}

impl PaginationList {
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().filter_map(PaginationItem::label).collect()
    }

    /// Minimal HTML: `<div><ul><li>...</li></ul></div>`.
    pub fn to_html(&self) -> String {
        let items: String = self.items.iter().map(PaginationItem::to_html).collect();
        format!(
            "<div{}><ul{}>{}</ul></div>",
            self.wrapper.to_html(),
            self.list.to_html(),
            items
        )
    }
}
