use tracing::{debug, warn};
use walsa_catalog::MethodLookup;
use walsa_core::{Result, SelectionEvent, SelectionState};

use crate::payload::{build_payload, DisplayPayload, DisplaySink};
use crate::resolver::SelectionResolver;
use crate::PIPELINE_LOG_TARGET;

/// The single mutable cell of the pipeline.
///
/// Each accepted event replaces the selection and pushes a fresh payload to
/// every registered sink. A rejected event leaves the selection untouched.
pub struct Session<L: MethodLookup> {
    catalog: L,
    state: SelectionState,
    sinks: Vec<Box<dyn DisplaySink>>,
    events_applied: usize,
}

impl<L: MethodLookup> Session<L> {
    pub fn new(catalog: L) -> Self {
        Self {
            catalog,
            state: SelectionState::new(),
            sinks: Vec::new(),
            events_applied: 0,
        }
    }

    pub fn with_sink(mut self, sink: impl DisplaySink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn add_sink(&mut self, sink: impl DisplaySink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn catalog(&self) -> &L {
        &self.catalog
    }

    pub fn events_applied(&self) -> usize {
        self.events_applied
    }

    /// Payload for the current selection, without notifying sinks.
    pub fn payload(&self) -> DisplayPayload {
        build_payload(&self.catalog, &self.state)
    }

    /// Applies one event. The selection only advances once every sink has
    /// accepted the new payload; a rejected event or a failing sink leaves it
    /// untouched.
    pub fn apply(&mut self, event: &SelectionEvent) -> Result<DisplayPayload> {
        let next = match SelectionResolver.apply(&self.state, event) {
            Ok(next) => next,
            Err(e) => {
                warn!(target: PIPELINE_LOG_TARGET, event = %event, error = %e, "Rejected selection event");
                return Err(e.into());
            }
        };
        let payload = self.present(&next)?;
        self.state = next;
        self.events_applied += 1;
        Ok(payload)
    }

    /// Applies events in order, stopping at the first rejected one.
    pub fn apply_all<'e>(
        &mut self,
        events: impl IntoIterator<Item = &'e SelectionEvent>,
    ) -> Result<DisplayPayload> {
        let mut payload = None;
        for event in events {
            payload = Some(self.apply(event)?);
        }
        match payload {
            Some(payload) => Ok(payload),
            None => self.refresh(),
        }
    }

    /// Rebuilds the payload and pushes it to every sink.
    pub fn refresh(&mut self) -> Result<DisplayPayload> {
        let state = self.state;
        self.present(&state)
    }

    fn present(&mut self, state: &SelectionState) -> Result<DisplayPayload> {
        let payload = build_payload(&self.catalog, state);
        debug!(
            target: PIPELINE_LOG_TARGET,
            state = %state,
            visible = payload.visible,
            sinks = self.sinks.len(),
            "Presenting payload"
        );
        for sink in &mut self.sinks {
            if let Err(e) = sink.present(&payload) {
                warn!(target: PIPELINE_LOG_TARGET, state = %state, error = %e, "Display sink failed");
                return Err(e);
            }
        }
        Ok(payload)
    }

    /// Back to the empty selection.
    pub fn reset(&mut self) -> Result<DisplayPayload> {
        let payload = self.present(&SelectionState::new())?;
        self.state = SelectionState::new();
        Ok(payload)
    }

    /// Replaces the selection with a previously saved one.
    ///
    /// The saved selection must be reachable through the dropdowns.
    pub fn restore(&mut self, state: SelectionState) -> Result<DisplayPayload> {
        SelectionResolver.check_consistent(&state)?;
        let payload = self.present(&state)?;
        self.state = state;
        Ok(payload)
    }
}
