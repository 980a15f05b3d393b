use thiserror::Error;

use crate::types::SelectionField;

/// Errors surfaced by a running selection pipeline.
#[derive(Error, Debug)]
pub enum WalsaError {
    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    /// A display sink could not present a payload
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Rejections raised while turning a user action into a new selection.
///
/// None of these are fatal for the display: the host keeps the previous
/// state and its payload when an event is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown selection field: {0}")]
    UnknownField(String),

    #[error("Unknown value '{value}' for field {field}")]
    UnknownValue { field: SelectionField, value: String },

    #[error("Option '{value}' is not enabled for field {field}")]
    OptionNotEnabled { field: SelectionField, value: String },

    #[error("Control {field} is disabled")]
    ControlDisabled { field: SelectionField },

    #[error("Malformed selection event: {0}")]
    MalformedEvent(String),
}

/// A key that does not name any member of a closed vocabulary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownKey {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownKey {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WalsaError>;
