use std::fs;
use tempfile::TempDir;
use walsa_catalog::{CatalogError, MethodCatalog, MethodLookup};
use walsa_core::{CatalogGroup, MethodKey};

const PARTIAL_TOML: &str = r#"
[single_series.fft]
return_values = ["power", "frequency"]

[[single_series.fft.parameters]]
name = "signal"
type = "array"
description = "The input signal (1D)."

[[single_series.fft.parameters]]
name = "time"
type = "array"
description = "The time array corresponding to the signal."

[[single_series.fft.parameters]]
name = "apod"
type = "float"
description = "Extent of apodization edges (of a Tukey window). Default: 0.1."
"#;

#[test]
fn test_toml_file_keeps_parameter_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, PARTIAL_TOML).unwrap();

    let catalog = MethodCatalog::from_path(&path).unwrap();
    let params = catalog.parameters_for(MethodKey::Fft).unwrap();
    let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["signal", "time", "apod"]);
    assert_eq!(params[2].type_label, "float");
}

#[test]
fn test_json_file_round_trips_builtin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.JSON");
    let json = serde_json::to_string_pretty(MethodCatalog::builtin()).unwrap();
    fs::write(&path, json).unwrap();

    let loaded = MethodCatalog::from_path(&path).unwrap();
    assert_eq!(&loaded, MethodCatalog::builtin());
}

#[test]
fn test_lenient_load_accepts_gaps() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, PARTIAL_TOML).unwrap();

    let catalog = MethodCatalog::load(Some(&path), false).unwrap();
    assert!(catalog
        .descriptor(CatalogGroup::SingleSeries, MethodKey::Wavelet)
        .is_none());
    assert!(!catalog.validate().is_clean());
}

#[test]
fn test_strict_load_rejects_gaps() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, PARTIAL_TOML).unwrap();

    match MethodCatalog::load(Some(&path), true) {
        Err(CatalogError::MissingDescriptors(report)) => {
            assert_eq!(report.checked, 14);
            // Only fft is present, as an analysis method and as a sub-method
            assert_eq!(report.missing.len(), 12);
        }
        other => panic!("expected MissingDescriptors, got {:?}", other.map(|c| c.len())),
    }
}

#[test]
fn test_strict_load_of_builtin_succeeds() {
    let catalog = MethodCatalog::load(None, true).unwrap();
    assert_eq!(&catalog, MethodCatalog::builtin());
}

#[test]
fn test_unreadable_file() {
    let dir = TempDir::new().unwrap();
    let result = MethodCatalog::from_path(&dir.path().join("missing.toml"));
    assert!(matches!(result, Err(CatalogError::Read { .. })));
}
