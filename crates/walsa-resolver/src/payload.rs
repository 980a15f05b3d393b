use serde::Serialize;
use std::fmt;
use tracing::debug;
use walsa_catalog::MethodLookup;
use walsa_core::SelectionState;

use crate::formatter::CallSignatureFormatter;
use crate::renderer::{ParameterTable, ParameterTableRenderer};
use crate::resolver::{ControlState, SelectionResolver};
use crate::PIPELINE_LOG_TARGET;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusMessage {
    #[serde(rename = "selection incomplete")]
    SelectionIncomplete,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::SelectionIncomplete => f.write_str("selection incomplete"),
        }
    }
}

/// Everything a display needs after one selection change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayPayload {
    /// Whether the results section is shown
    pub visible: bool,
    pub call_text: String,
    pub parameter_rows: ParameterTable,
    pub message: Option<StatusMessage>,
    pub controls: Vec<ControlState>,
}

impl DisplayPayload {
    /// Payload for a selection that cannot be displayed yet.
    pub fn hidden(controls: Vec<ControlState>) -> Self {
        Self {
            visible: false,
            call_text: String::new(),
            parameter_rows: ParameterTable::default(),
            message: Some(StatusMessage::SelectionIncomplete),
            controls,
        }
    }
}

/// Runs the whole pipeline for one selection.
pub fn build_payload<L: MethodLookup + ?Sized>(
    catalog: &L,
    state: &SelectionState,
) -> DisplayPayload {
    let resolver = SelectionResolver::new();
    let resolution = resolver.resolve(state);
    if let Err(e) = resolver.check_consistent(state) {
        debug!(target: PIPELINE_LOG_TARGET, state = %state, error = %e, "Selection not reachable");
        return DisplayPayload::hidden(resolution.into_controls());
    }
    let call = match CallSignatureFormatter::new(catalog).format(state) {
        Some(call) if resolution.is_complete => call,
        _ => return DisplayPayload::hidden(resolution.into_controls()),
    };

    let parameter_rows = ParameterTableRenderer::new(catalog).render(call.resolved_method);
    DisplayPayload {
        visible: true,
        call_text: call.call_text,
        parameter_rows,
        message: None,
        controls: resolution.into_controls(),
    }
}

/// Receives a payload after every selection change.
pub trait DisplaySink {
    fn present(&mut self, payload: &DisplayPayload) -> walsa_core::Result<()>;
}

impl<F> DisplaySink for F
where
    F: FnMut(&DisplayPayload) -> walsa_core::Result<()>,
{
    fn present(&mut self, payload: &DisplayPayload) -> walsa_core::Result<()> {
        self(payload)
    }
}
