use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::BTreeMap;

use alpha_pagination_protocol::ViewState;

use crate::set::CharacterSet;

/// Token type understood by [`replace_tokens`].
pub const TOKEN_TYPE: &str = "alpha_pagination";

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\s\[\]:]+):([^\[\]]+)\]").expect("token pattern is valid"));

static CSS_INVALID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^\x{002D}\x{0030}-\x{0039}\x{0041}-\x{005A}\x{005F}\x{0061}-\x{007A}\x{00A1}-\x{FFFF}]")
        .expect("css identifier pattern is valid")
});

/// Values for the `[alpha_pagination:*]` tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenData {
    /// The listing's URL, see [`view_url`].
    pub path: String,
    /// The character a link points at.
    pub value: Option<String>,
}

impl TokenData {
    fn lookup(&self, name: &str) -> Option<&str> {
        match name {
            "path" => Some(self.path.as_str()),
            "value" => self.value.as_deref(),
            _ => None,
        }
    }
}

/// Replace `[alpha_pagination:path]` and `[alpha_pagination:value]`.
///
/// Tokens without a value are kept verbatim unless `clear` is set, in which
/// case they are removed.
pub fn replace_tokens(text: &str, tokens: &TokenData, clear: bool) -> String {
    TOKEN
        .replace_all(text, |caps: &Captures<'_>| {
            let replacement = (&caps[1] == TOKEN_TYPE)
                .then(|| tokens.lookup(&caps[2]))
                .flatten();
            match replacement {
                Some(value) => value.to_string(),
                None if clear => String::new(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Make a string usable as a CSS class.
pub fn clean_css_identifier(identifier: &str) -> String {
    let mapped: String = identifier
        .chars()
        .filter(|c| *c != ']')
        .map(|c| match c {
            ' ' | '/' | '[' => '-',
            other => other,
        })
        .collect();
    CSS_INVALID.replace_all(&mapped, "").into_owned()
}

/// HTML attributes of one element. Classes are kept apart so they can be
/// merged without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attributes {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(flatten)]
    pub others: BTreeMap<String, String>,
}

impl Attributes {
    /// Merge space separated classes, cleaning each one.
    pub fn add_classes(&mut self, classes: &str) -> &mut Self {
        for class in classes.split(' ').filter(|c| !c.is_empty()) {
            let class = clean_css_identifier(class);
            if !class.is_empty() && !self.classes.contains(&class) {
                self.classes.push(class);
            }
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.others.is_empty()
    }

    pub(crate) fn to_html(&self) -> String {
        let mut out = String::new();
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_html(&self.classes.join(" "))));
        }
        for (key, value) in &self.others {
            out.push_str(&format!(" {}=\"{}\"", escape_html(key), escape_html(value)));
        }
        out
    }
}

/// Parse `key|value` pairs separated by commas, e.g. `title|Go to [alpha_pagination:value]`.
///
/// Tokens are replaced with clearing. Pairs without `|` are skipped.
pub fn parse_attributes(raw: &str, tokens: &TokenData) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    for pair in raw.split(',').filter(|pair| pair.contains('|')) {
        let replaced = replace_tokens(pair, tokens, true);
        let mut parts = replaced.split('|');
        let key = parts.next().unwrap_or_default().trim();
        let value = parts.next().unwrap_or_default().trim();
        if !key.is_empty() {
            attributes.insert(key.to_string(), value.to_string());
        }
    }
    attributes
}

/// URL of the listing without the pagination argument.
///
/// An override URL wins. Otherwise `%` segments of the display path are
/// filled from the URL arguments, then the argument's exception value, then
/// `*`. Without a usable path the current request path is used, minus a
/// trailing segment naming one of `characters`.
pub fn view_url(view: &ViewState, characters: &CharacterSet) -> String {
    if let Some(url) = view.override_url.as_deref().filter(|url| !url.is_empty()) {
        return url.to_string();
    }

    let mut args: Vec<&str> = view
        .args
        .iter()
        .enumerate()
        .filter(|(position, _)| {
            !view
                .arguments
                .get(*position)
                .map(|spec| spec.skip_url)
                .unwrap_or(false)
        })
        .map(|(_, arg)| arg.as_str())
        .collect();

    let path = view.path.as_deref().unwrap_or_default();
    if path.is_empty() || (args.is_empty() && !path.contains('%')) {
        let mut pieces: Vec<&str> = view.current_path.split('/').collect();
        if pieces.last().is_some_and(|last| characters.contains(last)) {
            pieces.pop();
        }
        return pieces.join("/");
    }

    let mut specs = view.arguments.iter();
    let mut spec = specs.next();
    let mut pieces: Vec<String> = Vec::new();
    for piece in path.split('/') {
        if piece != "%" {
            pieces.push(piece.to_string());
            continue;
        }
        if args.is_empty() {
            let exception = spec
                .and_then(|spec| spec.exception_value.as_deref())
                .filter(|value| !value.is_empty());
            pieces.push(exception.unwrap_or("*").to_string());
        } else {
            pieces.push(args.remove(0).to_string());
        }
        spec = specs.next();
    }
    pieces.join("/")
}

/// Append the request's query parameters to an internal path.
pub fn internal_href(path: &str, query: &BTreeMap<String, String>) -> String {
    let mut href = format!("/{}", path.trim_start_matches('/'));
    if !query.is_empty() {
        let encoded: Vec<String> = query
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect();
        href.push('?');
        href.push_str(&encoded.join("&"));
    }
    href
}

/// A link to one character of the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    /// Token-replaced `paginate_link_path`.
    pub path: String,
    pub href: String,
    pub external: bool,
    pub attributes: Attributes,
}

impl Link {
    pub fn to_html(&self) -> String {
        format!(
            "<a href=\"{}\"{}>{}</a>",
            escape_html(&self.href),
            self.attributes.to_html(),
            escape_html(&self.label)
        )
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}
