//! Catalog listings: sort orders and the page-builder schema.

use shelf_core::{component_schema, ordenation_labels, ordenation_values};

use super::CommandError;

/// Sort orders as `value<TAB>label` lines, relevance shown as `(relevance)`.
#[must_use]
pub fn orderings() -> String {
    ordenation_values()
        .into_iter()
        .zip(ordenation_labels())
        .map(|(value, label)| {
            let value = if value.is_empty() { "(relevance)" } else { value };
            format!("{value}\t{label}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The shelf block's page-builder schema as pretty JSON.
///
/// # Errors
///
/// Returns an error if the schema cannot be serialized.
pub fn schema() -> Result<String, CommandError> {
    Ok(serde_json::to_string_pretty(&component_schema())?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_orderings_lists_every_order() {
        let output = orderings();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("(relevance)\t"));
        assert!(output.contains("OrderByTopSaleDESC\tadmin/editor.shelf.ordination.sales"));
    }

    #[test]
    fn test_schema_json() {
        let json: serde_json::Value = serde_json::from_str(&schema().unwrap()).unwrap();
        assert_eq!(json["title"], "admin/editor.shelf.title");
        assert!(json["properties"]["orderBy"]["enum"].is_array());
    }
}
