use serde::{ser::SerializeStruct, Serialize, Serializer};
use tracing::debug;
use walsa_catalog::{MethodLookup, ParameterSpec, NO_PARAMETERS};
use walsa_core::MethodKey;

use crate::PIPELINE_LOG_TARGET;

/// A table row: parameter name, type label and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterRow {
    pub name: String,
    #[serde(rename = "type")]
    pub type_label: String,
    pub description: String,
}

impl From<&ParameterSpec> for ParameterRow {
    fn from(spec: &ParameterSpec) -> Self {
        Self {
            name: spec.name.clone(),
            type_label: spec.type_label.clone(),
            description: spec.description.clone(),
        }
    }
}

/// Parameter table for a resolved method.
///
/// Serializes as `{"kind": ..., "rows": [...]}` where `rows` are the display
/// rows, so an unavailable table still carries its synthetic row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterTable {
    /// Catalog rows in declaration order
    Rows(Vec<ParameterRow>),
    /// The method has no descriptor in either group
    Unavailable,
}

impl ParameterTable {
    pub fn as_rows(&self) -> &[ParameterRow] {
        match self {
            ParameterTable::Rows(rows) => rows,
            ParameterTable::Unavailable => &[],
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ParameterTable::Unavailable)
    }

    /// Rows as a display shows them. An unavailable table becomes a single
    /// row whose description is "No parameters available.".
    pub fn display_rows(&self) -> Vec<ParameterRow> {
        match self {
            ParameterTable::Rows(rows) => rows.clone(),
            ParameterTable::Unavailable => vec![ParameterRow {
                name: String::new(),
                type_label: String::new(),
                description: NO_PARAMETERS.to_string(),
            }],
        }
    }
}

impl Serialize for ParameterTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = match self {
            ParameterTable::Rows(_) => "rows",
            ParameterTable::Unavailable => "unavailable",
        };
        let mut table = serializer.serialize_struct("ParameterTable", 2)?;
        table.serialize_field("kind", kind)?;
        table.serialize_field("rows", &self.display_rows())?;
        table.end()
    }
}

impl Default for ParameterTable {
    fn default() -> Self {
        ParameterTable::Rows(Vec::new())
    }
}

pub struct ParameterTableRenderer<'a, L: MethodLookup + ?Sized> {
    catalog: &'a L,
}

impl<'a, L: MethodLookup + ?Sized> ParameterTableRenderer<'a, L> {
    pub fn new(catalog: &'a L) -> Self {
        Self { catalog }
    }

    pub fn render(&self, method: MethodKey) -> ParameterTable {
        match self.catalog.parameters_for(method) {
            Some(parameters) => {
                debug!(
                    target: PIPELINE_LOG_TARGET,
                    method = %method,
                    rows = parameters.len(),
                    "Rendered parameter table"
                );
                ParameterTable::Rows(parameters.iter().map(ParameterRow::from).collect())
            }
            None => {
                debug!(target: PIPELINE_LOG_TARGET, method = %method, "No parameters for method");
                ParameterTable::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use walsa_catalog::MethodCatalog;
    use walsa_core::CatalogGroup;

    #[test]
    fn test_rows_follow_declaration_order() {
        let table = ParameterTableRenderer::new(MethodCatalog::builtin()).render(MethodKey::Pod);
        let names: Vec<_> = table.as_rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"signal"));
        assert!(names.contains(&"spod_filter_size"));
        assert!(!table.is_unavailable());
    }

    #[test]
    fn test_unavailable_table_has_synthetic_row() {
        let mut catalog = MethodCatalog::builtin().clone();
        catalog.remove(CatalogGroup::SingleSeries, MethodKey::Emd);
        let table = ParameterTableRenderer::new(&catalog).render(MethodKey::Emd);
        assert!(table.is_unavailable());
        assert!(table.as_rows().is_empty());
        let rows = table.display_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description, "No parameters available.");
        assert!(rows[0].name.is_empty());
    }

    #[test]
    fn test_cross_correlation_welch_uses_single_series_rows() {
        let catalog = MethodCatalog::builtin();
        let table = ParameterTableRenderer::new(catalog).render(MethodKey::Welch);
        assert_eq!(table.as_rows()[0].name, "signal");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ParameterTable::Unavailable).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "unavailable",
                "rows": [{ "name": "", "type": "", "description": "No parameters available." }]
            })
        );

        let table = ParameterTable::Rows(vec![ParameterRow {
            name: "n".into(),
            type_label: "int".into(),
            description: "d".into(),
        }]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json["kind"], "rows");
        assert_eq!(json["rows"][0]["type"], "int");

        let json = serde_json::to_value(ParameterTable::default()).unwrap();
        assert_eq!(json["rows"], serde_json::json!([]));
    }
}
