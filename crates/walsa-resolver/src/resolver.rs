use serde::Serialize;
use tracing::debug;
use walsa_core::{
    data_type_options, method_options, Category, FieldValue, SelectionError, SelectionEvent,
    SelectionField, SelectionState, SUB_METHOD_OPTIONS,
};

use crate::PIPELINE_LOG_TARGET;

/// One selectable entry of a dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionEntry {
    pub value: FieldValue,
    pub label: &'static str,
}

impl From<FieldValue> for OptionEntry {
    fn from(value: FieldValue) -> Self {
        Self {
            value,
            label: value.label(),
        }
    }
}

/// Derived state of one dropdown control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub field: SelectionField,
    pub enabled: bool,
    pub visible: bool,
    pub placeholder: &'static str,
    pub selected: Option<FieldValue>,
    /// Offered options in declaration order; empty when disabled
    pub options: Vec<OptionEntry>,
}

impl ControlState {
    pub fn offers(&self, value: FieldValue) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// Result of resolving a selection: every control plus the completeness flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// One entry per field in `SelectionField::ALL` order
    controls: Vec<ControlState>,
    pub is_complete: bool,
}

impl Resolution {
    /// Only `SelectionResolver::resolve` builds a resolution, so every field
    /// has exactly one control at its own index.
    pub fn control(&self, field: SelectionField) -> &ControlState {
        &self.controls[field as usize]
    }

    pub fn controls(&self) -> &[ControlState] {
        &self.controls
    }

    pub fn into_controls(self) -> Vec<ControlState> {
        self.controls
    }

    /// Enabled options for `field`, in offer order.
    pub fn enabled_options(&self, field: SelectionField) -> Vec<FieldValue> {
        let control = self.control(field);
        if !control.enabled {
            return Vec::new();
        }
        control.options.iter().map(|o| o.value).collect()
    }
}

/// Derives the cascading dropdown options and completeness of a selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionResolver;

impl SelectionResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, state: &SelectionState) -> Resolution {
        let category_options: Vec<FieldValue> =
            Category::ALL.iter().copied().map(FieldValue::Category).collect();

        let data_types: Vec<FieldValue> = state
            .category
            .map(|c| {
                data_type_options(c)
                    .iter()
                    .copied()
                    .map(FieldValue::DataType)
                    .collect()
            })
            .unwrap_or_default();

        let methods: Vec<FieldValue> = match (state.category, state.data_type) {
            (Some(c), Some(d)) => method_options(c, d)
                .iter()
                .copied()
                .map(FieldValue::Method)
                .collect(),
            _ => Vec::new(),
        };

        let sub_method_applicable = state.sub_method_applicable();
        let sub_method_options: Vec<FieldValue> = if sub_method_applicable {
            SUB_METHOD_OPTIONS.iter().copied().map(FieldValue::Method).collect()
        } else {
            Vec::new()
        };

        let controls = vec![
            control(state, SelectionField::Category, true, category_options),
            control(state, SelectionField::DataType, true, data_types),
            control(state, SelectionField::AnalysisMethod, true, methods),
            control(
                state,
                SelectionField::SubMethod,
                sub_method_applicable,
                sub_method_options,
            ),
        ];

        Resolution {
            controls,
            is_complete: self.is_complete(state),
        }
    }

    /// Category, data type and method set, plus the sub-method when its
    /// control applies.
    pub fn is_complete(&self, state: &SelectionState) -> bool {
        state.category.is_some()
            && state.data_type.is_some()
            && state.analysis_method.is_some()
            && (state.sub_method.is_some() || !state.sub_method_applicable())
    }

    /// Applies one user action, returning the next selection.
    ///
    /// The value must be offered by the field's control as it stands in
    /// `state`. Dependents of the changed field are cleared before the new
    /// value is stored.
    pub fn apply(
        &self,
        state: &SelectionState,
        event: &SelectionEvent,
    ) -> Result<SelectionState, SelectionError> {
        let value = event.typed_value()?;

        if let Some(value) = value {
            let resolution = self.resolve(state);
            let control = resolution.control(event.field);
            if !control.enabled {
                return Err(SelectionError::ControlDisabled { field: event.field });
            }
            if !control.offers(value) {
                return Err(SelectionError::OptionNotEnabled {
                    field: event.field,
                    value: value.code().to_string(),
                });
            }
        }

        let next = state.with_field(event.field, value)?;
        debug!(
            target: PIPELINE_LOG_TARGET,
            event = %event,
            from = %state,
            to = %next,
            "Selection changed"
        );
        Ok(next)
    }

    /// Checks that every set field holds a value its control offers.
    pub fn check_consistent(&self, state: &SelectionState) -> Result<(), SelectionError> {
        let mut replayed = SelectionState::new();
        for &field in SelectionField::ALL {
            if let Some(value) = state.value_of(field) {
                let event = SelectionEvent::new(field, value.code());
                replayed = self.apply(&replayed, &event)?;
            }
        }
        Ok(())
    }
}

fn control(
    state: &SelectionState,
    field: SelectionField,
    visible: bool,
    options: Vec<FieldValue>,
) -> ControlState {
    let enabled = visible && !options.is_empty();
    ControlState {
        field,
        enabled,
        visible,
        placeholder: field.placeholder(),
        selected: state.value_of(field),
        options: options.into_iter().map(OptionEntry::from).collect(),
    }
}
