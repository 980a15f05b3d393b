use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};
use walsa_core::{CatalogGroup, MethodKey};

use crate::builtin::BUILTIN;
use crate::descriptor::{MethodDescriptor, MethodLookup, ParameterSpec, NO_RETURN_VALUES};
use crate::validation::ValidationReport;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML catalog: {0}")]
    ParseToml(#[from] toml::de::Error),

    #[error("Failed to parse JSON catalog: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Unknown method '{method}' in group {group}")]
    UnknownMethod { group: CatalogGroup, method: String },

    #[error("Duplicate parameter '{parameter}' for {group}.{method}")]
    DuplicateParameter {
        group: CatalogGroup,
        method: MethodKey,
        parameter: String,
    },

    #[error("Catalog is missing descriptors: {0}")]
    MissingDescriptors(ValidationReport),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

static BUILTIN_CATALOG: Lazy<MethodCatalog> = Lazy::new(MethodCatalog::from_builtin_tables);

/// Immutable two-group table of method descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MethodCatalog {
    single_series: BTreeMap<MethodKey, MethodDescriptor>,
    cross_correlation: BTreeMap<MethodKey, MethodDescriptor>,
}

impl MethodCatalog {
    /// The catalog compiled into the binary, built once.
    pub fn builtin() -> &'static MethodCatalog {
        &BUILTIN_CATALOG
    }

    fn from_builtin_tables() -> Self {
        let mut catalog = MethodCatalog::default();
        for entry in BUILTIN {
            let descriptor = MethodDescriptor {
                return_values: split_return_values(entry.return_values),
                parameters: entry
                    .parameters
                    .iter()
                    .map(|&(name, type_label, description)| {
                        ParameterSpec::new(name, type_label, description)
                    })
                    .collect(),
            };
            catalog.insert(entry.group, entry.method, descriptor);
        }
        debug!(
            single_series = catalog.single_series.len(),
            cross_correlation = catalog.cross_correlation.len(),
            "Built-in method catalog initialized"
        );
        catalog
    }

    /// Adds or replaces a descriptor.
    pub fn insert(&mut self, group: CatalogGroup, method: MethodKey, descriptor: MethodDescriptor) {
        self.group_mut(group).insert(method, descriptor);
    }

    /// Builder-style [`MethodCatalog::insert`].
    pub fn with(mut self, group: CatalogGroup, method: MethodKey, descriptor: MethodDescriptor) -> Self {
        self.insert(group, method, descriptor);
        self
    }

    pub fn remove(&mut self, group: CatalogGroup, method: MethodKey) -> Option<MethodDescriptor> {
        self.group_mut(group).remove(&method)
    }

    fn group(&self, group: CatalogGroup) -> &BTreeMap<MethodKey, MethodDescriptor> {
        match group {
            CatalogGroup::SingleSeries => &self.single_series,
            CatalogGroup::CrossCorrelation => &self.cross_correlation,
        }
    }

    fn group_mut(&mut self, group: CatalogGroup) -> &mut BTreeMap<MethodKey, MethodDescriptor> {
        match group {
            CatalogGroup::SingleSeries => &mut self.single_series,
            CatalogGroup::CrossCorrelation => &mut self.cross_correlation,
        }
    }

    /// Method keys present in a group.
    pub fn methods(&self, group: CatalogGroup) -> Vec<MethodKey> {
        self.group(group).keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.single_series.len() + self.cross_correlation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Comma-joined return values, or the "No return values available" placeholder.
    pub fn return_values_text(&self, group: CatalogGroup, method: MethodKey) -> String {
        self.descriptor(group, method)
            .map(MethodDescriptor::return_values_text)
            .unwrap_or_else(|| NO_RETURN_VALUES.to_string())
    }

    /// Parse a catalog from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawCatalog = toml::from_str(content)?;
        raw.into_catalog()
    }

    /// Parse a catalog from JSON.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawCatalog = serde_json::from_str(content)?;
        raw.into_catalog()
    }

    /// Load a catalog file; `.json` files are parsed as JSON, anything else as TOML.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let catalog = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        info!(path = %path.display(), methods = catalog.len(), "Loaded method catalog");
        Ok(catalog)
    }

    /// Load the catalog named by configuration, validating it against the
    /// dropdown option lists.
    ///
    /// Without a path the built-in catalog is used. In strict mode any gap is
    /// an error; otherwise gaps are logged and fall back at display time.
    pub fn load(path: Option<&Path>, strict: bool) -> Result<Self> {
        let catalog = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::builtin().clone(),
        };

        let report = catalog.validate();
        if !report.is_clean() {
            if strict {
                return Err(CatalogError::MissingDescriptors(report));
            }
            for missing in &report.missing {
                warn!(
                    group = %missing.group,
                    method = %missing.method,
                    field = %missing.field,
                    "Offered option has no catalog descriptor; display will fall back"
                );
            }
        }
        Ok(catalog)
    }
}

impl MethodLookup for MethodCatalog {
    fn descriptor(&self, group: CatalogGroup, method: MethodKey) -> Option<&MethodDescriptor> {
        self.group(group).get(&method)
    }
}

fn split_return_values(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// On-disk shape: groups keyed by name, methods keyed by catalog key.
#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    single_series: BTreeMap<String, RawDescriptor>,
    #[serde(default)]
    cross_correlation: BTreeMap<String, RawDescriptor>,
}

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    return_values: RawReturnValues,
    #[serde(default)]
    parameters: Vec<ParameterSpec>,
}

/// Return values as a list or as the page's comma-joined string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReturnValues {
    List(Vec<String>),
    Joined(String),
}

impl RawCatalog {
    fn into_catalog(self) -> Result<MethodCatalog> {
        let mut catalog = MethodCatalog::default();
        for (group, entries) in [
            (CatalogGroup::SingleSeries, self.single_series),
            (CatalogGroup::CrossCorrelation, self.cross_correlation),
        ] {
            for (key, raw) in entries {
                let method: MethodKey =
                    key.parse().map_err(|_| CatalogError::UnknownMethod {
                        group,
                        method: key.clone(),
                    })?;

                let mut seen = HashSet::new();
                for parameter in &raw.parameters {
                    if !seen.insert(parameter.name.as_str()) {
                        return Err(CatalogError::DuplicateParameter {
                            group,
                            method,
                            parameter: parameter.name.clone(),
                        });
                    }
                }

                let return_values = match raw.return_values {
                    RawReturnValues::List(values) => values,
                    RawReturnValues::Joined(joined) => split_return_values(&joined),
                };
                catalog.insert(
                    group,
                    method,
                    MethodDescriptor {
                        return_values,
                        parameters: raw.parameters,
                    },
                );
            }
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_groups() {
        let catalog = MethodCatalog::builtin();
        assert_eq!(catalog.methods(CatalogGroup::SingleSeries).len(), 8);
        assert_eq!(
            catalog.methods(CatalogGroup::CrossCorrelation),
            vec![MethodKey::Wavelet, MethodKey::Welch]
        );
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn test_builtin_preserves_declaration_order() {
        let fft = MethodCatalog::builtin()
            .descriptor(CatalogGroup::SingleSeries, MethodKey::Fft)
            .unwrap();
        let names: Vec<_> = fft.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.first(), Some(&"signal"));
        assert_eq!(names.last(), Some(&"silent"));
        assert_eq!(names[13], "amplitude");
        assert_eq!(
            fft.return_values,
            vec!["power", "frequency", "significance", "amplitude"]
        );
    }

    #[test]
    fn test_return_values_text_fallback() {
        let catalog = MethodCatalog::builtin();
        assert_eq!(
            catalog.return_values_text(CatalogGroup::SingleSeries, MethodKey::Pod),
            "pod_results"
        );
        assert_eq!(
            catalog.return_values_text(CatalogGroup::CrossCorrelation, MethodKey::Fft),
            NO_RETURN_VALUES
        );
    }

    #[test]
    fn test_parameters_prefer_single_series() {
        let catalog = MethodCatalog::builtin();
        let welch = catalog.parameters_for(MethodKey::Welch).unwrap();
        assert_eq!(welch[0].name, "signal");

        let only_cross = MethodCatalog::default().with(
            CatalogGroup::CrossCorrelation,
            MethodKey::Welch,
            catalog
                .descriptor(CatalogGroup::CrossCorrelation, MethodKey::Welch)
                .unwrap()
                .clone(),
        );
        assert_eq!(only_cross.parameters_for(MethodKey::Welch).unwrap()[0].name, "data1");
        assert!(only_cross.parameters_for(MethodKey::Fft).is_none());
    }

    #[test]
    fn test_joined_return_values_in_toml() {
        let catalog = MethodCatalog::from_toml_str(
            r#"
[single_series.fft]
return_values = "power, frequency"
parameters = [{ name = "signal", type = "array", description = "x" }]
"#,
        )
        .unwrap();
        assert_eq!(
            catalog
                .descriptor(CatalogGroup::SingleSeries, MethodKey::Fft)
                .unwrap()
                .return_values,
            vec!["power", "frequency"]
        );
    }

    #[test]
    fn test_rejects_unknown_method_and_duplicates() {
        let unknown = MethodCatalog::from_json_str(
            r#"{"single_series": {"fourier": {"return_values": [], "parameters": []}}}"#,
        );
        assert!(matches!(unknown, Err(CatalogError::UnknownMethod { .. })));

        let duplicate = MethodCatalog::from_json_str(
            r#"{"cross_correlation": {"welch": {"return_values": ["f"], "parameters": [
                {"name": "data1", "type": "array", "description": "a"},
                {"name": "data1", "type": "array", "description": "b"}
            ]}}}"#,
        );
        assert!(matches!(duplicate, Err(CatalogError::DuplicateParameter { .. })));
    }
}
