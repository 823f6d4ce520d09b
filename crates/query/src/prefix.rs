use crate::capture::render_query;
use crate::database::Database;
use crate::error::{QueryError, Result};
use crate::normalize::normalize_rendered;
use alpha_pagination_protocol::{FieldSelector, Value, ViewState};
use unicode_segmentation::UnicodeSegmentation;

/// Identifiers per `IN (...)` list.
const ID_BATCH_SIZE: usize = 500;

/// Where first characters are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSource {
    pub table: String,
    pub column: String,
    /// Column matched against the listing's entity identifiers.
    pub key_column: String,
}

impl PrefixSource {
    pub fn resolve(selector: &FieldSelector, view: &ViewState) -> Result<Self> {
        let source = match selector {
            FieldSelector::Title | FieldSelector::Name => Self {
                table: view.base_table.clone(),
                column: view.schema_field(selector.field_name()).to_string(),
                key_column: view.base_field.clone(),
            },
            FieldSelector::Field { name } => Self {
                table: format!("field_data_{name}"),
                column: format!("{name}_value"),
                key_column: "entity_id".to_string(),
            },
            FieldSelector::Compound { name, column } => Self {
                table: format!("field_data_{name}"),
                column: format!("{name}_{column}"),
                key_column: "entity_id".to_string(),
            },
        };
        for ident in [&source.table, &source.column, &source.key_column] {
            ensure_identifier(ident)?;
        }
        Ok(source)
    }

    fn select_sql(&self, placeholders: usize) -> String {
        let params = vec!["?"; placeholders].join(", ");
        format!(
            "SELECT DISTINCT(SUBSTR({column}, 1, 1)) AS prefix\nFROM {table}\nWHERE {key} IN ({params})",
            column = self.column,
            table = self.table,
            key = self.key_column,
        )
    }
}

/// Finds the first characters present in a listing's full result set.
pub struct PrefixDiscovery<'a, D: Database + ?Sized> {
    db: &'a D,
    view: &'a ViewState,
    selector: FieldSelector,
}

impl<'a, D: Database + ?Sized> PrefixDiscovery<'a, D> {
    pub fn new(db: &'a D, view: &'a ViewState, selector: FieldSelector) -> Self {
        Self { db, view, selector }
    }

    /// The normalized listing query, or an empty string when none was captured.
    pub fn listing_query(&self) -> String {
        self.view
            .build_info
            .as_ref()
            .filter(|query| !query.is_empty())
            .map(|query| normalize_rendered(&render_query(query)))
            .unwrap_or_default()
    }

    /// Identifiers of every entity the listing returns, ignoring pagination.
    pub fn entity_ids(&self) -> Result<Vec<Value>> {
        let query = self.listing_query();
        if query.is_empty() {
            log::debug!("No captured query for {}:{}", self.view.view_id, self.view.display_id);
            return Ok(Vec::new());
        }

        let rows = self.db.query(&query, &[])?;
        let ids: Vec<Value> = rows
            .iter()
            .filter_map(|row| row.get(&self.view.base_field))
            .filter(|value| !value.is_null())
            .cloned()
            .collect();
        log::debug!("Listing query matched {} entities", ids.len());
        Ok(ids)
    }

    /// Distinct first characters of the selected field, upper-cased.
    pub fn entity_prefixes(&self) -> Result<Vec<String>> {
        let ids = self.entity_ids()?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let source = PrefixSource::resolve(&self.selector, self.view)?;
        let mut prefixes: Vec<String> = Vec::new();
        for batch in ids.chunks(ID_BATCH_SIZE) {
            let rows = self.db.query(&source.select_sql(batch.len()), batch)?;
            for row in rows {
                let Some(raw) = row.get("prefix").or_else(|| row.first()) else {
                    continue;
                };
                if let Some(prefix) = normalize_prefix(&raw.to_string()) {
                    if !prefixes.contains(&prefix) {
                        prefixes.push(prefix);
                    }
                }
            }
        }
        log::debug!("Discovered prefixes {prefixes:?} from {}", source.table);
        Ok(prefixes)
    }
}

/// First character of `raw` in the form it is compared to table entries.
///
/// Digits are kept as is; anything else is upper-cased with full Unicode case
/// mapping. Empty input yields `None`.
pub fn normalize_prefix(raw: &str) -> Option<String> {
    let first = raw.graphemes(true).next()?;
    if first.trim().is_empty() {
        return None;
    }
    if first.chars().all(|c| c.is_ascii_digit()) {
        return Some(first.to_string());
    }
    Some(first.to_uppercase())
}

fn ensure_identifier(raw: &str) -> Result<()> {
    let valid = !raw.is_empty()
        && raw
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '.');
    if valid {
        Ok(())
    } else {
        Err(QueryError::InvalidIdentifier(raw.to_string()))
    }
}
