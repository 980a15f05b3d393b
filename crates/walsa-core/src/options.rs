//! Declared option lists of the cascading dropdowns.
//!
//! Order is significant: it is the order in which options are offered.

use crate::types::{Category, DataType, MethodKey};

const SINGLE_SERIES_DATA_TYPES: &[DataType] = &[DataType::Signal1D, DataType::Datacube3D];
const CROSS_CORRELATION_DATA_TYPES: &[DataType] = &[DataType::Signal1D];

const SINGLE_SERIES_SIGNAL_METHODS: &[MethodKey] = &[
    MethodKey::Fft,
    MethodKey::Wavelet,
    MethodKey::LombScargle,
    MethodKey::Welch,
    MethodKey::Emd,
];
const SINGLE_SERIES_CUBE_METHODS: &[MethodKey] =
    &[MethodKey::KOmega, MethodKey::Pod, MethodKey::DominantFreq];
const CROSS_CORRELATION_SIGNAL_METHODS: &[MethodKey] = &[MethodKey::Wavelet, MethodKey::Welch];

/// Sub-methods offered in the dominant-frequency branch.
pub const SUB_METHOD_OPTIONS: &[MethodKey] = &[
    MethodKey::Fft,
    MethodKey::Wavelet,
    MethodKey::LombScargle,
    MethodKey::Welch,
];

/// Data types offered once `category` is chosen.
pub fn data_type_options(category: Category) -> &'static [DataType] {
    match category {
        Category::SingleSeries => SINGLE_SERIES_DATA_TYPES,
        Category::CrossCorrelation => CROSS_CORRELATION_DATA_TYPES,
    }
}

/// Analysis methods offered for a category/data-type pair.
///
/// Branches on the category as well as the data type: the two categories
/// offer different methods for a 1D signal. Pairs the page never offers
/// yield an empty list.
pub fn method_options(category: Category, data_type: DataType) -> &'static [MethodKey] {
    match (category, data_type) {
        (Category::SingleSeries, DataType::Signal1D) => SINGLE_SERIES_SIGNAL_METHODS,
        (Category::SingleSeries, DataType::Datacube3D) => SINGLE_SERIES_CUBE_METHODS,
        (Category::CrossCorrelation, DataType::Signal1D) => CROSS_CORRELATION_SIGNAL_METHODS,
        (Category::CrossCorrelation, DataType::Datacube3D) => &[],
    }
}

/// Every (category, data type, method) triple the dropdowns can produce.
pub fn offered_methods() -> impl Iterator<Item = (Category, DataType, MethodKey)> {
    Category::ALL.iter().flat_map(|&category| {
        data_type_options(category).iter().flat_map(move |&data_type| {
            method_options(category, data_type)
                .iter()
                .map(move |&method| (category, data_type, method))
        })
    })
}
