use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SelectionError;
use crate::types::{Category, DataType, MethodKey, SelectionField};

/// Snapshot of the four dropdowns.
///
/// Values are immutable: every transition produces a new state, and the
/// host owns the cell holding the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub category: Option<Category>,
    pub data_type: Option<DataType>,
    pub analysis_method: Option<MethodKey>,
    pub sub_method: Option<MethodKey>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the sub-method control applies, i.e. the dominant-frequency
    /// branch over a 3D datacube.
    pub fn sub_method_applicable(&self) -> bool {
        self.category == Some(Category::SingleSeries)
            && self.data_type == Some(DataType::Datacube3D)
            && self.analysis_method == Some(MethodKey::DominantFreq)
    }

    pub fn is_set(&self, field: SelectionField) -> bool {
        match field {
            SelectionField::Category => self.category.is_some(),
            SelectionField::DataType => self.data_type.is_some(),
            SelectionField::AnalysisMethod => self.analysis_method.is_some(),
            SelectionField::SubMethod => self.sub_method.is_some(),
        }
    }

    /// Raw value of a field as the page would submit it.
    pub fn value_of(&self, field: SelectionField) -> Option<FieldValue> {
        match field {
            SelectionField::Category => self.category.map(FieldValue::Category),
            SelectionField::DataType => self.data_type.map(FieldValue::DataType),
            SelectionField::AnalysisMethod => self.analysis_method.map(FieldValue::Method),
            SelectionField::SubMethod => self.sub_method.map(FieldValue::Method),
        }
    }

    /// Returns a copy with `field` set (or unset) and every downstream field cleared.
    ///
    /// Clearing happens even when the new value equals the old one, matching a
    /// dropdown `change` event. A value of the wrong kind for `field` is
    /// rejected with `UnknownValue`.
    pub fn with_field(
        &self,
        field: SelectionField,
        value: Option<FieldValue>,
    ) -> Result<Self, SelectionError> {
        let mut next = self.cleared(field);
        match (field, value) {
            (_, None) => {}
            (SelectionField::Category, Some(FieldValue::Category(c))) => next.category = Some(c),
            (SelectionField::DataType, Some(FieldValue::DataType(d))) => next.data_type = Some(d),
            (SelectionField::AnalysisMethod, Some(FieldValue::Method(m))) => {
                next.analysis_method = Some(m)
            }
            (SelectionField::SubMethod, Some(FieldValue::Method(m))) => next.sub_method = Some(m),
            (field, Some(value)) => {
                return Err(SelectionError::UnknownValue {
                    field,
                    value: value.code().to_string(),
                })
            }
        }
        Ok(next)
    }

    /// Copy with `field` and all of its dependents unset.
    pub fn cleared(&self, field: SelectionField) -> Self {
        let mut next = *self;
        for f in std::iter::once(&field).chain(field.dependents()) {
            match f {
                SelectionField::Category => next.category = None,
                SelectionField::DataType => next.data_type = None,
                SelectionField::AnalysisMethod => next.analysis_method = None,
                SelectionField::SubMethod => next.sub_method = None,
            }
        }
        next
    }
}

impl fmt::Display for SelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn show<T: fmt::Display>(v: &Option<T>) -> String {
            v.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
        }
        write!(
            f,
            "category={} dataType={} analysisMethod={} subMethod={}",
            show(&self.category),
            show(&self.data_type),
            show(&self.analysis_method),
            show(&self.sub_method)
        )
    }
}

/// A typed dropdown value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Category(Category),
    DataType(DataType),
    Method(MethodKey),
}

impl FieldValue {
    /// Parses `raw` as a value for `field`.
    pub fn parse(field: SelectionField, raw: &str) -> Result<Self, SelectionError> {
        let unknown = |_| SelectionError::UnknownValue {
            field,
            value: raw.to_string(),
        };
        match field {
            SelectionField::Category => raw.parse().map(FieldValue::Category).map_err(unknown),
            SelectionField::DataType => raw.parse().map(FieldValue::DataType).map_err(unknown),
            SelectionField::AnalysisMethod | SelectionField::SubMethod => {
                raw.parse().map(FieldValue::Method).map_err(unknown)
            }
        }
    }

    /// Option value as the page encodes it.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Category(c) => c.code(),
            Self::DataType(d) => d.code(),
            Self::Method(m) => m.key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Category(c) => c.label(),
            Self::DataType(d) => d.label(),
            Self::Method(m) => m.label(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One user action: a dropdown changed to a new value.
///
/// `value == None` is the placeholder option and unsets the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEvent {
    pub field: SelectionField,
    pub value: Option<String>,
}

impl SelectionEvent {
    pub fn new(field: SelectionField, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            field,
            value: if value.trim().is_empty() {
                None
            } else {
                Some(value)
            },
        }
    }

    pub fn unset(field: SelectionField) -> Self {
        Self { field, value: None }
    }

    pub fn category(value: impl Into<String>) -> Self {
        Self::new(SelectionField::Category, value)
    }

    pub fn data_type(value: impl Into<String>) -> Self {
        Self::new(SelectionField::DataType, value)
    }

    pub fn analysis_method(value: impl Into<String>) -> Self {
        Self::new(SelectionField::AnalysisMethod, value)
    }

    pub fn sub_method(value: impl Into<String>) -> Self {
        Self::new(SelectionField::SubMethod, value)
    }

    /// Typed value carried by the event, `None` for the placeholder.
    pub fn typed_value(&self) -> Result<Option<FieldValue>, SelectionError> {
        self.value
            .as_deref()
            .map(|raw| FieldValue::parse(self.field, raw.trim()))
            .transpose()
    }
}

impl fmt::Display for SelectionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value.as_deref().unwrap_or(""))
    }
}

impl FromStr for SelectionEvent {
    type Err = SelectionError;

    /// Parses `field=value`; `field=` unsets the field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, value) = s
            .split_once('=')
            .ok_or_else(|| SelectionError::MalformedEvent(s.to_string()))?;
        let field: SelectionField = field
            .parse()
            .map_err(|_| SelectionError::UnknownField(field.trim().to_string()))?;
        Ok(Self::new(field, value.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_state() -> SelectionState {
        SelectionState {
            category: Some(Category::SingleSeries),
            data_type: Some(DataType::Datacube3D),
            analysis_method: Some(MethodKey::DominantFreq),
            sub_method: Some(MethodKey::Wavelet),
        }
    }

    #[test]
    fn test_category_change_clears_everything_downstream() {
        let next = full_state().with_field(
            SelectionField::Category,
            Some(FieldValue::Category(Category::CrossCorrelation)),
        )
        .unwrap();
        assert_eq!(next.category, Some(Category::CrossCorrelation));
        assert_eq!(next.data_type, None);
        assert_eq!(next.analysis_method, None);
        assert_eq!(next.sub_method, None);
    }

    #[test]
    fn test_data_type_change_keeps_category() {
        let next = full_state().with_field(
            SelectionField::DataType,
            Some(FieldValue::DataType(DataType::Signal1D)),
        )
        .unwrap();
        assert_eq!(next.category, Some(Category::SingleSeries));
        assert_eq!(next.data_type, Some(DataType::Signal1D));
        assert_eq!(next.analysis_method, None);
        assert_eq!(next.sub_method, None);
    }

    #[test]
    fn test_mismatched_value_kind_is_rejected() {
        let err = full_state()
            .with_field(
                SelectionField::DataType,
                Some(FieldValue::Method(MethodKey::Fft)),
            )
            .unwrap_err();
        assert_eq!(
            err,
            SelectionError::UnknownValue {
                field: SelectionField::DataType,
                value: "fft".to_string()
            }
        );

        let unset = full_state().with_field(SelectionField::SubMethod, None).unwrap();
        assert_eq!(unset.sub_method, None);
        assert_eq!(unset.analysis_method, Some(MethodKey::DominantFreq));
    }

    #[test]
    fn test_unsetting_method_clears_sub_method() {
        let next = full_state().cleared(SelectionField::AnalysisMethod);
        assert_eq!(next.data_type, Some(DataType::Datacube3D));
        assert_eq!(next.analysis_method, None);
        assert_eq!(next.sub_method, None);
    }

    #[test]
    fn test_input_state_is_untouched() {
        let state = full_state();
        let _ = state.cleared(SelectionField::Category);
        assert_eq!(state, full_state());
    }

    #[test]
    fn test_sub_method_applicable_only_for_dominantfreq_cube() {
        assert!(full_state().sub_method_applicable());
        let mut state = full_state();
        state.analysis_method = Some(MethodKey::KOmega);
        assert!(!state.sub_method_applicable());
        assert!(!SelectionState::new().sub_method_applicable());
    }

    #[test]
    fn test_event_parsing() {
        let event: SelectionEvent = "dataType=2".parse().unwrap();
        assert_eq!(event.field, SelectionField::DataType);
        assert_eq!(
            event.typed_value().unwrap(),
            Some(FieldValue::DataType(DataType::Datacube3D))
        );

        let unset: SelectionEvent = "subMethod=".parse().unwrap();
        assert_eq!(unset.value, None);
        assert_eq!(unset.typed_value().unwrap(), None);

        assert!(matches!(
            "category".parse::<SelectionEvent>(),
            Err(SelectionError::MalformedEvent(_))
        ));
        assert!(matches!(
            "colour=red".parse::<SelectionEvent>(),
            Err(SelectionError::UnknownField(_))
        ));
        let bad = SelectionEvent::analysis_method("fourier");
        assert!(matches!(
            bad.typed_value(),
            Err(SelectionError::UnknownValue { field: SelectionField::AnalysisMethod, .. })
        ));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(
            full_state().to_string(),
            "category=single_series dataType=datacube_3d analysisMethod=dominantfreq subMethod=wavelet"
        );
    }
}
