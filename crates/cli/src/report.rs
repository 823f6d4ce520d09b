use alpha_pagination::{AlphaPagination, Character};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
pub struct CharacterReport {
    pub value: String,
    pub label: String,
    pub enabled: bool,
    pub active: bool,
    pub link: bool,
    pub all: bool,
    pub numeric: bool,
    pub divider: bool,
}

impl From<&Character> for CharacterReport {
    fn from(c: &Character) -> Self {
        Self {
            value: c.value().to_string(),
            label: c.label().to_string(),
            enabled: c.has_results(),
            active: c.is_active(),
            link: c.is_link(),
            all: c.is_all(),
            numeric: c.is_numeric(),
            divider: c.is_divider(),
        }
    }
}

#[derive(Serialize)]
pub struct RenderReport {
    pub ui_name: String,
    pub cid: String,
    pub url: String,
    pub characters: Vec<CharacterReport>,
    pub list: alpha_pagination::PaginationList,
}

pub fn render_json(pagination: &AlphaPagination<'_>) -> Result<RenderReport> {
    Ok(RenderReport {
        ui_name: pagination.ui_name().to_string(),
        cid: pagination.cid()?,
        url: pagination.url()?.to_string(),
        characters: pagination.characters()?.iter().map(CharacterReport::from).collect(),
        list: pagination.render()?,
    })
}

/// One line per character: value, label and flags.
pub fn render_text(pagination: &AlphaPagination<'_>) -> Result<String> {
    let mut out = String::new();
    for character in pagination.characters()? {
        let mut flags = Vec::new();
        if character.is_active() {
            flags.push("active");
        }
        if character.has_results() {
            flags.push("enabled");
        }
        if character.is_all() {
            flags.push("all");
        }
        if character.is_numeric() {
            flags.push("numeric");
        }
        if character.is_divider() {
            flags.push("divider");
        }
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            character.value(),
            character.label(),
            flags.join(",")
        ));
    }
    Ok(out.trim_end().to_string())
}
