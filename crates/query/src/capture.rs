use alpha_pagination_protocol::{CapturedQuery, QueryArgument, Value};

/// Render a captured query to executable SQL text.
///
/// Placeholders are substituted with quoted literals; at every position the
/// longest matching placeholder wins, so `:p_10` is never split into `:p_1`
/// followed by `0`. List arguments expand to a comma separated literal list.
pub fn render_query(query: &CapturedQuery) -> String {
    if query.arguments.is_empty() {
        return query.sql.clone();
    }

    let mut replacements: Vec<(&str, String)> = query
        .arguments
        .iter()
        .filter(|(placeholder, _)| !placeholder.is_empty())
        .map(|(placeholder, argument)| (placeholder.as_str(), quote_argument(argument)))
        .collect();
    replacements.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = String::with_capacity(query.sql.len());
    let mut rest = query.sql.as_str();
    'scan: while let Some(ch) = rest.chars().next() {
        for (placeholder, literal) in &replacements {
            if rest.starts_with(placeholder) {
                out.push_str(literal);
                rest = &rest[placeholder.len()..];
                continue 'scan;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}

pub fn quote_argument(argument: &QueryArgument) -> String {
    match argument {
        QueryArgument::Single(value) => quote_value(value),
        QueryArgument::List(values) => values
            .iter()
            .map(quote_value)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

pub fn quote_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(v) => v.to_string(),
        Value::Real(v) => v.to_string(),
        Value::Text(v) => format!("'{}'", v.replace('\'', "''")),
    }
}
