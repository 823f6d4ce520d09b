//! Rewrites a listing's SELECT so it scans the whole result set.
//!
//! The rules are line based and match how the listing query text is laid out
//! (one clause per line):
//!
//! 1. A line containing `SUBSTRING` gets ` 1 OR ` inserted right before it, so
//!    a first-letter contextual filter no longer restricts the rows.
//! 2. A final line starting with `LIMIT` is dropped.
//! 3. HTML entities introduced by debug serialization of the query are decoded.
//!
//! Text rendered locally from a captured query has never been serialized, so
//! [`normalize_rendered`] escapes it first and the decode step gives back the
//! exact literals.

const SUBSTRING_MARKER: &str = "SUBSTRING";
const ALWAYS_TRUE: &str = " 1 OR ";

pub fn normalize_query(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = raw.split('\n').map(neutralize_substring).collect();

    if lines
        .last()
        .is_some_and(|line| line.trim_start().starts_with("LIMIT"))
    {
        lines.pop();
    }

    decode_entities(&lines.join("\n"))
}

/// Normalize SQL produced by `render_query`.
pub fn normalize_rendered(rendered: &str) -> String {
    normalize_query(&escape_plain(rendered))
}

// A marker at the very start of a line is left alone.
fn neutralize_substring(line: &str) -> String {
    match line.find(SUBSTRING_MARKER) {
        Some(position) if position > 0 => {
            let mut out = String::with_capacity(line.len() + ALWAYS_TRUE.len());
            out.push_str(&line[..position]);
            out.push_str(ALWAYS_TRUE);
            out.push_str(&line[position..]);
            out
        }
        _ => line.to_string(),
    }
}

/// Plain-text escaping; [`decode_entities`] is its exact inverse.
pub fn escape_plain(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Decode the entities a plain-text escaper produces. `&amp;` goes last so
/// `&amp;lt;` decodes to `&lt;`, not `<`.
pub fn decode_entities(text: &str) -> String {
    text.replace("&#039;", "'")
        .replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn drops_trailing_limit_line() {
        let query = "SELECT node.nid AS nid\nFROM node node\nORDER BY title ASC\nLIMIT 10";
        assert_eq!(
            normalize_query(query),
            "SELECT node.nid AS nid\nFROM node node\nORDER BY title ASC"
        );
    }

    #[test]
    fn keeps_non_limit_last_line() {
        let query = "SELECT nid\nFROM node\nORDER BY title";
        assert_eq!(normalize_query(query), query);
    }

    #[test]
    fn only_the_final_line_is_considered_for_limit() {
        let query = "SELECT nid\nLIMIT 5\nFROM node";
        assert_eq!(normalize_query(query), query);
    }

    #[test]
    fn neutralizes_substring_predicate() {
        let query = "SELECT nid\nFROM node\nWHERE (SUBSTRING(title,1,1) = 'a')\nLIMIT 10";
        let normalized = normalize_query(query);
        assert!(normalized.contains("1 OR SUBSTRING(title,1,1) = 'a'"));
        assert_eq!(
            normalized,
            "SELECT nid\nFROM node\nWHERE ( 1 OR SUBSTRING(title,1,1) = 'a')"
        );
    }

    #[test]
    fn decodes_escaped_quotes_and_operators() {
        let query = "SELECT nid\nWHERE title = &#039;Tom &amp; Jerry&#039; AND nid &gt; 1 AND nid &lt; 9";
        assert_eq!(
            normalize_query(query),
            "SELECT nid\nWHERE title = 'Tom & Jerry' AND nid > 1 AND nid < 9"
        );
    }

    #[test]
    fn does_not_double_decode() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn substring_at_line_start_is_kept() {
        let query = "SELECT nid\nSUBSTRING(title, 1, 1) AS letter\nFROM node";
        assert_eq!(normalize_query(query), query);
    }

    #[test]
    fn rendered_entities_survive_normalization() {
        let rendered = "SELECT nid\nWHERE type = 'R&amp;D' AND note = '&lt;b&gt;'\nLIMIT 3";
        assert_eq!(
            normalize_rendered(rendered),
            "SELECT nid\nWHERE type = 'R&amp;D' AND note = '&lt;b&gt;'"
        );
    }

    #[test]
    fn empty_input_is_a_no_op() {
        assert_eq!(normalize_query(""), "");
        assert_eq!(normalize_query("  \n "), "");
    }

    proptest! {
        #[test]
        fn proptest_limit_line_is_always_removed(limit in 1u32..100000u32, offset in 0u32..1000u32) {
            let q = format!("SELECT nid\nFROM node\nLIMIT {limit} OFFSET {offset}");
            prop_assert_eq!(normalize_query(&q), "SELECT nid\nFROM node");
        }

        #[test]
        fn proptest_plain_lines_survive(lines in proptest::collection::vec("[a-z][a-z ]{0,19}", 1..8)) {
            let q = lines.join("\n");
            prop_assert_eq!(normalize_query(&q), q.clone());
        }

        #[test]
        fn proptest_decode_reverses_escape(text in "[a-z&;#0-9'\"<> ]{0,40}") {
            prop_assert_eq!(decode_entities(&escape_plain(&text)), text);
        }
    }
}
