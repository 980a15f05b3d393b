use walsa_catalog::{MethodCatalog, MethodLookup, ParameterSpec};
use walsa_core::{
    data_type_options, method_options, CatalogGroup, Category, DataType, FieldValue, MethodKey,
    SelectionEvent, SelectionField, SelectionState, SUB_METHOD_OPTIONS,
};
use walsa_resolver::{
    build_payload, CallSignatureFormatter, ParameterRow, ParameterTable, ParameterTableRenderer,
    SelectionResolver, Session, StatusMessage,
};

fn session_after(events: &[SelectionEvent]) -> Session<&'static MethodCatalog> {
    let mut session = Session::new(MethodCatalog::builtin());
    session.apply_all(events).expect("events should be accepted");
    session
}

fn rows_of(parameters: &[ParameterSpec]) -> Vec<ParameterRow> {
    parameters.iter().map(ParameterRow::from).collect()
}

#[test]
fn scenario_single_series_fft() {
    let session = session_after(&[
        SelectionEvent::category("a"),
        SelectionEvent::data_type("1"),
        SelectionEvent::analysis_method("fft"),
    ]);
    let payload = session.payload();

    assert!(payload.visible);
    assert_eq!(
        payload.call_text,
        "power, frequency, significance, amplitude = WaLSAtools(signal=INPUT_DATA, time=TIME_ARRAY, method='fft', **kwargs)"
    );
    let first = &payload.parameter_rows.as_rows()[0];
    assert_eq!(
        (first.name.as_str(), first.type_label.as_str(), first.description.as_str()),
        ("signal", "array", "The input signal (1D).")
    );
}

#[test]
fn scenario_cross_correlation_welch() {
    let session = session_after(&[
        SelectionEvent::category("b"),
        SelectionEvent::data_type("1"),
        SelectionEvent::analysis_method("welch"),
    ]);
    let payload = session.payload();

    assert_eq!(
        payload.call_text,
        "frequency, cospectrum, phase_angle, power_data1, power_data2, frequency_coherence, coherence = WaLSAtools(data1=INPUT_DATA1, data2=INPUT_DATA2, time=TIME_ARRAY, method='welch', **kwargs)"
    );
    // Parameter lookup searches single_series first, for both categories.
    let expected = MethodCatalog::builtin()
        .descriptor(CatalogGroup::SingleSeries, MethodKey::Welch)
        .unwrap();
    assert_eq!(payload.parameter_rows.as_rows(), rows_of(&expected.parameters).as_slice());
}

#[test]
fn scenario_dominant_frequency_wavelet() {
    let session = session_after(&[
        SelectionEvent::category("a"),
        SelectionEvent::data_type("2"),
        SelectionEvent::analysis_method("dominantfreq"),
        SelectionEvent::sub_method("wavelet"),
    ]);
    let payload = session.payload();

    assert_eq!(
        payload.call_text,
        "dominant_frequency, mean_power, frequency, power_map = WaLSAtools(signal=INPUT_DATA, time=TIME_ARRAY, averagedpower=True, dominantfreq=True, method='wavelet', **kwargs)"
    );
    let wavelet = MethodCatalog::builtin()
        .descriptor(CatalogGroup::SingleSeries, MethodKey::Wavelet)
        .unwrap();
    assert_eq!(payload.parameter_rows, ParameterTable::Rows(rows_of(&wavelet.parameters)));
}

#[test]
fn scenario_komega_display_label() {
    let session = session_after(&[
        SelectionEvent::category("a"),
        SelectionEvent::data_type("2"),
        SelectionEvent::analysis_method("komega"),
    ]);
    let payload = session.payload();

    assert!(payload.call_text.starts_with("power, wavenumber, frequency, filtered_cube,"));
    assert!(payload
        .call_text
        .ends_with("= WaLSAtools(signal=INPUT_DATA, time=TIME_ARRAY, method='k-omega', **kwargs)"));

    let komega = MethodCatalog::builtin()
        .descriptor(CatalogGroup::SingleSeries, MethodKey::KOmega)
        .unwrap();
    assert_eq!(payload.parameter_rows.as_rows(), rows_of(&komega.parameters).as_slice());

    let call = CallSignatureFormatter::new(MethodCatalog::builtin())
        .format(session.state())
        .unwrap();
    assert_eq!(call.resolved_method, MethodKey::KOmega);
    assert_eq!(call.call_label, "k-omega");
}

#[test]
fn scenario_unset_category_hides_output() {
    let states = [
        SelectionState::new(),
        SelectionState {
            data_type: Some(DataType::Signal1D),
            analysis_method: Some(MethodKey::Fft),
            ..SelectionState::new()
        },
    ];
    for state in states {
        let payload = build_payload(MethodCatalog::builtin(), &state);
        assert!(!payload.visible);
        assert_eq!(payload.message, Some(StatusMessage::SelectionIncomplete));
        assert_eq!(payload.message.unwrap().to_string(), "selection incomplete");
    }
}

#[test]
fn enabled_options_match_declared_lists() {
    let resolver = SelectionResolver::new();
    let mut paths = 0;

    for &category in Category::ALL {
        let state = resolver
            .apply(&SelectionState::new(), &SelectionEvent::category(category.code()))
            .unwrap();
        let resolution = resolver.resolve(&state);
        let offered: Vec<FieldValue> = data_type_options(category)
            .iter()
            .copied()
            .map(FieldValue::DataType)
            .collect();
        assert_eq!(resolution.enabled_options(SelectionField::DataType), offered);

        for &data_type in data_type_options(category) {
            let state = resolver
                .apply(&state, &SelectionEvent::data_type(data_type.code()))
                .unwrap();
            let offered: Vec<FieldValue> = method_options(category, data_type)
                .iter()
                .copied()
                .map(FieldValue::Method)
                .collect();
            assert_eq!(
                resolver.resolve(&state).enabled_options(SelectionField::AnalysisMethod),
                offered
            );

            for &method in method_options(category, data_type) {
                let state = resolver
                    .apply(&state, &SelectionEvent::analysis_method(method.key()))
                    .unwrap();
                let sub_methods = resolver
                    .resolve(&state)
                    .enabled_options(SelectionField::SubMethod);
                if method == MethodKey::DominantFreq {
                    assert_eq!(sub_methods.len(), SUB_METHOD_OPTIONS.len());
                    assert!(!resolver.is_complete(&state));
                } else {
                    assert!(sub_methods.is_empty());
                    assert!(resolver.is_complete(&state));
                }
                paths += 1;
            }
        }
    }

    assert_eq!(paths, 10);
}

#[test]
fn upstream_changes_clear_dependents() {
    let mut session = session_after(&[
        SelectionEvent::category("a"),
        SelectionEvent::data_type("2"),
        SelectionEvent::analysis_method("dominantfreq"),
        SelectionEvent::sub_method("fft"),
    ]);

    session.apply(&SelectionEvent::data_type("1")).unwrap();
    assert_eq!(
        *session.state(),
        SelectionState {
            category: Some(Category::SingleSeries),
            data_type: Some(DataType::Signal1D),
            ..SelectionState::new()
        }
    );

    session.apply(&SelectionEvent::analysis_method("emd")).unwrap();
    session.apply(&SelectionEvent::category("b")).unwrap();
    assert_eq!(
        *session.state(),
        SelectionState {
            category: Some(Category::CrossCorrelation),
            ..SelectionState::new()
        }
    );
}

#[test]
fn method_change_clears_sub_method() {
    let mut session = session_after(&[
        SelectionEvent::category("a"),
        SelectionEvent::data_type("2"),
        SelectionEvent::analysis_method("dominantfreq"),
        SelectionEvent::sub_method("welch"),
    ]);
    let payload = session.apply(&SelectionEvent::analysis_method("pod")).unwrap();
    assert_eq!(session.state().sub_method, None);
    assert!(payload.visible);
    assert!(payload.call_text.starts_with("pod_results = WaLSAtools("));
}

#[test]
fn pipeline_is_idempotent() {
    let session = session_after(&[
        SelectionEvent::category("b"),
        SelectionEvent::data_type("1"),
        SelectionEvent::analysis_method("wavelet"),
    ]);
    let catalog = MethodCatalog::builtin();
    let formatter = CallSignatureFormatter::new(catalog);
    let renderer = ParameterTableRenderer::new(catalog);

    assert_eq!(formatter.format(session.state()), formatter.format(session.state()));
    assert_eq!(renderer.render(MethodKey::Wavelet), renderer.render(MethodKey::Wavelet));
    assert_eq!(session.payload(), session.payload());
}

#[test]
fn uncatalogued_method_falls_back() {
    let mut catalog = MethodCatalog::builtin().clone();
    catalog.remove(CatalogGroup::SingleSeries, MethodKey::LombScargle);

    let mut session = Session::new(&catalog);
    let payload = session
        .apply_all(&[
            SelectionEvent::category("a"),
            SelectionEvent::data_type("1"),
            SelectionEvent::analysis_method("lombscargle"),
        ])
        .unwrap();

    assert!(payload.visible);
    assert_eq!(
        payload.call_text,
        "No return values available = WaLSAtools(signal=INPUT_DATA, time=TIME_ARRAY, method='lombscargle', **kwargs)"
    );
    assert!(payload.parameter_rows.is_unavailable());
    assert_eq!(
        payload.parameter_rows.display_rows()[0].description,
        "No parameters available."
    );
}

#[test]
fn payload_serializes_for_renderers() {
    let session = session_after(&[SelectionEvent::category("a")]);
    let json = serde_json::to_value(session.payload()).unwrap();
    assert_eq!(json["visible"], false);
    assert_eq!(json["message"], "selection incomplete");
    assert_eq!(json["controls"].as_array().unwrap().len(), 4);
}
