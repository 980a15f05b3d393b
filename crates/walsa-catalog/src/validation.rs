use serde::Serialize;
use std::fmt;
use walsa_core::{offered_methods, CatalogGroup, MethodKey, SelectionField, SUB_METHOD_OPTIONS};

use crate::catalog::MethodCatalog;
use crate::descriptor::MethodLookup;

/// An offered dropdown option that has no descriptor to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDescriptor {
    pub field: SelectionField,
    pub group: CatalogGroup,
    pub method: MethodKey,
}

impl fmt::Display for MissingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} (offered as {})", self.group, self.method, self.field)
    }
}

/// Outcome of checking the catalog against the dropdown option lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub checked: usize,
    pub missing: Vec<MissingDescriptor>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "{} options checked, all resolved", self.checked);
        }
        let listed: Vec<String> = self.missing.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{} of {} options unresolved: {}",
            self.missing.len(),
            self.checked,
            listed.join(", ")
        )
    }
}

impl MethodCatalog {
    /// Checks every option the dropdowns can offer.
    ///
    /// Analysis methods must exist in their category's group. Sub-methods
    /// feed only the parameter table, which searches both groups.
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        for (category, _data_type, method) in offered_methods() {
            let group = category.group();
            report.checked += 1;
            if self.descriptor(group, method).is_none() {
                report.missing.push(MissingDescriptor {
                    field: SelectionField::AnalysisMethod,
                    group,
                    method,
                });
            }
        }

        for &method in SUB_METHOD_OPTIONS {
            report.checked += 1;
            if self.parameters_for(method).is_none() {
                report.missing.push(MissingDescriptor {
                    field: SelectionField::SubMethod,
                    group: CatalogGroup::SingleSeries,
                    method,
                });
            }
        }

        report
    }
}
