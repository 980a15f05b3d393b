use serde::Serialize;
use tracing::debug;
use walsa_catalog::{MethodLookup, NO_RETURN_VALUES};
use walsa_core::{Category, DataType, MethodKey, SelectionState};

use crate::resolver::SelectionResolver;
use crate::PIPELINE_LOG_TARGET;

/// Outputs of the averaged-power / dominant-frequency mode over a datacube.
///
/// This composite mode has its own output contract; the `dominantfreq`
/// catalog descriptor is not consulted for it.
pub const DOMINANT_FREQUENCY_RETURN_VALUES: &[&str] =
    &["dominant_frequency", "mean_power", "frequency", "power_map"];

/// Entry point named in every calling sequence.
pub const ENTRY_POINT: &str = "WaLSAtools";

/// Which calling-sequence template a complete selection uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallBranch {
    /// Single series, 1D signal
    SingleSeriesSignal,
    /// Two 1D signals
    CrossCorrelation,
    /// Single series, datacube, dominant frequency with a sub-method
    DominantFrequency,
    /// Single series, datacube, k-omega or POD
    Datacube,
}

impl CallBranch {
    /// Branch for a complete selection, `None` otherwise.
    pub fn of(state: &SelectionState) -> Option<Self> {
        if !SelectionResolver.is_complete(state) {
            return None;
        }
        match (state.category?, state.data_type?, state.analysis_method?) {
            (Category::SingleSeries, DataType::Signal1D, _) => Some(Self::SingleSeriesSignal),
            (Category::CrossCorrelation, _, _) => Some(Self::CrossCorrelation),
            (Category::SingleSeries, DataType::Datacube3D, MethodKey::DominantFreq) => {
                Some(Self::DominantFrequency)
            }
            (Category::SingleSeries, DataType::Datacube3D, _) => Some(Self::Datacube),
        }
    }
}

/// Calling sequence for a complete selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedCall {
    pub branch: CallBranch,
    pub call_text: String,
    /// Output identifiers; empty when the method has no catalog entry
    pub resolved_return_values: Vec<String>,
    /// Catalog key used for the parameter table
    pub resolved_method: MethodKey,
    /// Name written inside `method='...'`
    pub call_label: &'static str,
}

impl FormattedCall {
    /// Left-hand side of the calling sequence.
    pub fn return_values_text(&self) -> String {
        if self.resolved_return_values.is_empty() {
            NO_RETURN_VALUES.to_string()
        } else {
            self.resolved_return_values.join(", ")
        }
    }
}

/// Catalog key whose parameters describe the selection: the sub-method in
/// the dominant-frequency branch, the analysis method otherwise.
pub fn resolved_method(state: &SelectionState) -> Option<MethodKey> {
    if state.analysis_method == Some(MethodKey::DominantFreq) {
        state.sub_method
    } else {
        state.analysis_method
    }
}

/// Builds calling sequences from the catalog's return values.
pub struct CallSignatureFormatter<'a, L: MethodLookup + ?Sized> {
    catalog: &'a L,
}

impl<'a, L: MethodLookup + ?Sized> CallSignatureFormatter<'a, L> {
    pub fn new(catalog: &'a L) -> Self {
        Self { catalog }
    }

    /// Formats a complete selection; `None` when the selection is incomplete.
    pub fn format(&self, state: &SelectionState) -> Option<FormattedCall> {
        let branch = CallBranch::of(state)?;
        let category = state.category?;
        let method = state.analysis_method?;

        let catalog_return_values = || {
            self.catalog
                .descriptor(category.group(), method)
                .map(|d| d.return_values.clone())
                .unwrap_or_default()
        };

        let (resolved_return_values, resolved_method, call_label) = match branch {
            CallBranch::DominantFrequency => {
                let sub_method = state.sub_method?;
                (
                    DOMINANT_FREQUENCY_RETURN_VALUES
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                    sub_method,
                    sub_method.call_label(),
                )
            }
            CallBranch::Datacube => (catalog_return_values(), method, method.call_label()),
            CallBranch::SingleSeriesSignal | CallBranch::CrossCorrelation => {
                (catalog_return_values(), method, method.key())
            }
        };

        let mut call = FormattedCall {
            branch,
            call_text: String::new(),
            resolved_return_values,
            resolved_method,
            call_label,
        };
        call.call_text = render_call_text(&call);

        debug!(
            target: PIPELINE_LOG_TARGET,
            branch = ?call.branch,
            method = %call.resolved_method,
            "Formatted calling sequence"
        );
        Some(call)
    }
}

fn render_call_text(call: &FormattedCall) -> String {
    let lhs = call.return_values_text();
    let label = call.call_label;
    match call.branch {
        CallBranch::SingleSeriesSignal | CallBranch::Datacube => format!(
            "{lhs} = {ENTRY_POINT}(signal=INPUT_DATA, time=TIME_ARRAY, method='{label}', **kwargs)"
        ),
        CallBranch::CrossCorrelation => format!(
            "{lhs} = {ENTRY_POINT}(data1=INPUT_DATA1, data2=INPUT_DATA2, time=TIME_ARRAY, method='{label}', **kwargs)"
        ),
        CallBranch::DominantFrequency => format!(
            "{lhs} = {ENTRY_POINT}(signal=INPUT_DATA, time=TIME_ARRAY, averagedpower=True, dominantfreq=True, method='{label}', **kwargs)"
        ),
    }
}
