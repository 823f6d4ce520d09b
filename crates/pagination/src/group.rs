use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;
use crate::link::{escape_html, replace_tokens};
use crate::service::AlphaPagination;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Grouping header for one row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupHeading {
    pub value: String,
    pub label: String,
    /// Anchor name, when links point at in-page anchors (`#...` link paths).
    pub anchor: Option<String>,
}

impl GroupHeading {
    pub fn to_html(&self) -> String {
        match &self.anchor {
            Some(name) => format!(
                "<a name=\"{}\"></a>{}",
                escape_html(name),
                escape_html(&self.label)
            ),
            None => escape_html(&self.label),
        }
    }
}

/// Upper-cased first grapheme of a rendered field, markup removed.
pub fn first_character(rendered: &str) -> String {
    let text = TAG.replace_all(rendered, "");
    text.trim_start()
        .graphemes(true)
        .next()
        .map(str::to_uppercase)
        .unwrap_or_default()
}

impl AlphaPagination<'_> {
    /// Heading for a row whose pagination field rendered as `rendered`.
    ///
    /// `None` when the display has no pagination area to group by.
    pub fn group(&self, rendered: &str) -> Result<Option<GroupHeading>> {
        if self.view().area_handlers().is_empty() {
            return Ok(None);
        }

        let character = first_character(rendered);
        let value = if character.is_empty() {
            String::new()
        } else {
            self.value(&character)?
        };
        let label = self.label(&value)?;

        let path = &self.options().link_path;
        let anchor = match path.strip_prefix('#') {
            Some(name) if !value.is_empty() => {
                Some(replace_tokens(name, &self.tokens(Some(&value))?, false))
            }
            _ => None,
        };

        Ok(Some(GroupHeading {
            value,
            label,
            anchor,
        }))
    }
}
