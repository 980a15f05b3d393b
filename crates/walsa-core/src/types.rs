use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownKey;

/// Top-level analysis category chosen in the first dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SingleSeries,
    CrossCorrelation,
}

impl Category {
    pub const ALL: &'static [Category] = &[Self::SingleSeries, Self::CrossCorrelation];

    /// Option value used by the documentation page.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SingleSeries => "a",
            Self::CrossCorrelation => "b",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::SingleSeries => "Single time series analysis",
            Self::CrossCorrelation => "Cross-correlation between two time series",
        }
    }

    /// Catalog group holding this category's descriptors.
    pub fn group(&self) -> CatalogGroup {
        match self {
            Self::SingleSeries => CatalogGroup::SingleSeries,
            Self::CrossCorrelation => CatalogGroup::CrossCorrelation,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.group().key())
    }
}

impl FromStr for Category {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "single_series" | "singleseries" => Ok(Self::SingleSeries),
            "b" | "cross_correlation" | "crosscorrelation" => Ok(Self::CrossCorrelation),
            _ => Err(UnknownKey::new("category", s)),
        }
    }
}

/// Shape of the input data chosen in the second dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    #[serde(rename = "signal_1d")]
    Signal1D,
    #[serde(rename = "datacube_3d")]
    Datacube3D,
}

impl DataType {
    pub const ALL: &'static [DataType] = &[Self::Signal1D, Self::Datacube3D];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Signal1D => "1",
            Self::Datacube3D => "2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Signal1D => "1D Signal",
            Self::Datacube3D => "3D Datacube",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Signal1D => "signal_1d",
            Self::Datacube3D => "datacube_3d",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DataType {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "signal_1d" | "signal1d" | "1d" => Ok(Self::Signal1D),
            "2" | "datacube_3d" | "datacube3d" | "3d" => Ok(Self::Datacube3D),
            _ => Err(UnknownKey::new("data type", s)),
        }
    }
}

/// Catalog key of an analysis method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKey {
    Fft,
    Wavelet,
    LombScargle,
    Welch,
    Emd,
    KOmega,
    Pod,
    DominantFreq,
}

impl MethodKey {
    pub const ALL: &'static [MethodKey] = &[
        Self::Fft,
        Self::Wavelet,
        Self::LombScargle,
        Self::Welch,
        Self::Emd,
        Self::KOmega,
        Self::Pod,
        Self::DominantFreq,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Fft => "fft",
            Self::Wavelet => "wavelet",
            Self::LombScargle => "lombscargle",
            Self::Welch => "welch",
            Self::Emd => "emd",
            Self::KOmega => "komega",
            Self::Pod => "pod",
            Self::DominantFreq => "dominantfreq",
        }
    }

    /// Human-readable dropdown label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fft => "FFT",
            Self::Wavelet => "Wavelet",
            Self::LombScargle => "Lomb-Scargle",
            Self::Welch => "Welch",
            Self::Emd => "EMD",
            Self::KOmega => "k-omega",
            Self::Pod => "POD",
            Self::DominantFreq => "Dominant Freq / Mean Power Spectrum",
        }
    }

    /// Name written inside `method='...'` of a calling sequence.
    ///
    /// Only display text changes; catalog lookups keep using [`MethodKey::key`].
    pub fn call_label(&self) -> &'static str {
        match self {
            Self::KOmega => "k-omega",
            other => other.key(),
        }
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MethodKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.key() == wanted)
            .ok_or_else(|| UnknownKey::new("method", s))
    }
}

/// The two top-level tables of the method catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogGroup {
    SingleSeries,
    CrossCorrelation,
}

impl CatalogGroup {
    pub const ALL: &'static [CatalogGroup] = &[Self::SingleSeries, Self::CrossCorrelation];

    pub fn key(&self) -> &'static str {
        match self {
            Self::SingleSeries => "single_series",
            Self::CrossCorrelation => "cross_correlation",
        }
    }
}

impl fmt::Display for CatalogGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CatalogGroup {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "single_series" | "single" => Ok(Self::SingleSeries),
            "cross_correlation" | "cross" => Ok(Self::CrossCorrelation),
            _ => Err(UnknownKey::new("catalog group", s)),
        }
    }
}

/// One of the four dropdown controls, in upstream-to-downstream order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectionField {
    Category,
    DataType,
    AnalysisMethod,
    SubMethod,
}

impl SelectionField {
    pub const ALL: &'static [SelectionField] = &[
        Self::Category,
        Self::DataType,
        Self::AnalysisMethod,
        Self::SubMethod,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::DataType => "dataType",
            Self::AnalysisMethod => "analysisMethod",
            Self::SubMethod => "subMethod",
        }
    }

    /// Text of the empty option shown before anything is chosen.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Category => "Select Category",
            Self::DataType => "Select Data Type",
            Self::AnalysisMethod => "Select Method",
            Self::SubMethod => "Select Sub-method",
        }
    }

    /// Fields that are cleared when this one changes.
    pub fn dependents(&self) -> &'static [SelectionField] {
        match self {
            Self::Category => &[Self::DataType, Self::AnalysisMethod, Self::SubMethod],
            Self::DataType => &[Self::AnalysisMethod, Self::SubMethod],
            Self::AnalysisMethod => &[Self::SubMethod],
            Self::SubMethod => &[],
        }
    }
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SelectionField {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "category" => Ok(Self::Category),
            "datatype" => Ok(Self::DataType),
            "analysismethod" | "method" => Ok(Self::AnalysisMethod),
            "submethod" => Ok(Self::SubMethod),
            _ => Err(UnknownKey::new("selection field", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_codes_parse() {
        assert_eq!("a".parse::<Category>().unwrap(), Category::SingleSeries);
        assert_eq!("b".parse::<Category>().unwrap(), Category::CrossCorrelation);
        assert_eq!("1".parse::<DataType>().unwrap(), DataType::Signal1D);
        assert_eq!("2".parse::<DataType>().unwrap(), DataType::Datacube3D);
        assert!("c".parse::<Category>().is_err());
        assert!("3".parse::<DataType>().is_err());
    }

    #[test]
    fn test_method_keys_round_trip_through_display() {
        for method in MethodKey::ALL {
            assert_eq!(method.to_string().parse::<MethodKey>().unwrap(), *method);
        }
        assert!("k-omega".parse::<MethodKey>().is_err());
    }

    #[test]
    fn test_call_label_only_renames_komega() {
        assert_eq!(MethodKey::KOmega.call_label(), "k-omega");
        assert_eq!(MethodKey::KOmega.key(), "komega");
        assert_eq!(MethodKey::Pod.call_label(), "pod");
        assert_eq!(MethodKey::Wavelet.call_label(), "wavelet");
    }

    #[test]
    fn test_field_aliases() {
        assert_eq!("dataType".parse::<SelectionField>().unwrap(), SelectionField::DataType);
        assert_eq!("data_type".parse::<SelectionField>().unwrap(), SelectionField::DataType);
        assert_eq!("method".parse::<SelectionField>().unwrap(), SelectionField::AnalysisMethod);
        assert_eq!("sub-method".parse::<SelectionField>().unwrap(), SelectionField::SubMethod);
        assert!("colour".parse::<SelectionField>().is_err());
    }

    #[test]
    fn test_serde_keys() {
        assert_eq!(serde_json::to_string(&MethodKey::LombScargle).unwrap(), "\"lombscargle\"");
        assert_eq!(serde_json::to_string(&DataType::Datacube3D).unwrap(), "\"datacube_3d\"");
        assert_eq!(serde_json::to_string(&SelectionField::SubMethod).unwrap(), "\"subMethod\"");
        assert_eq!(
            serde_json::to_string(&CatalogGroup::CrossCorrelation).unwrap(),
            "\"cross_correlation\""
        );
    }
}
