use serde::{Deserialize, Serialize};
use walsa_core::{CatalogGroup, MethodKey};

/// Placeholder shown in place of the return values of an uncatalogued method.
pub const NO_RETURN_VALUES: &str = "No return values available";

/// Text of the single synthetic row shown for an uncatalogued method.
pub const NO_PARAMETERS: &str = "No parameters available.";

/// One documented keyword argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    /// Free-form type label, e.g. "array" or "int, optional"
    #[serde(rename = "type")]
    pub type_label: String,
    /// Description including the default value when the docs give one
    pub description: String,
}

impl ParameterSpec {
    pub fn new(
        name: impl Into<String>,
        type_label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_label: type_label.into(),
            description: description.into(),
        }
    }
}

/// Catalog entry for one method: what it returns and what it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Output identifiers in call order
    pub return_values: Vec<String>,
    /// Parameters in declaration order; the order is the table row order
    pub parameters: Vec<ParameterSpec>,
}

impl MethodDescriptor {
    /// Return values joined the way the calling sequence shows them.
    pub fn return_values_text(&self) -> String {
        if self.return_values.is_empty() {
            return NO_RETURN_VALUES.to_string();
        }
        self.return_values.join(", ")
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Read access to method descriptors.
///
/// The resolver pipeline only ever reads the catalog, so implementors are
/// shared without locking.
pub trait MethodLookup {
    fn descriptor(&self, group: CatalogGroup, method: MethodKey) -> Option<&MethodDescriptor>;

    /// Parameters for a resolved method: `single_series` first, then
    /// `cross_correlation`.
    fn parameters_for(&self, method: MethodKey) -> Option<&[ParameterSpec]> {
        CatalogGroup::ALL
            .iter()
            .find_map(|&group| self.descriptor(group, method))
            .map(|d| d.parameters.as_slice())
    }
}

impl<T: MethodLookup + ?Sized> MethodLookup for &T {
    fn descriptor(&self, group: CatalogGroup, method: MethodKey) -> Option<&MethodDescriptor> {
        (**self).descriptor(group, method)
    }

    fn parameters_for(&self, method: MethodKey) -> Option<&[ParameterSpec]> {
        (**self).parameters_for(method)
    }
}
