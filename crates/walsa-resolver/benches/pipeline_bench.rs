use criterion::{criterion_group, criterion_main, Bencher, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use walsa_catalog::MethodCatalog;
use walsa_core::{offered_methods, SelectionEvent, SelectionState, SUB_METHOD_OPTIONS};
use walsa_resolver::{build_payload, SelectionResolver, Session};

/// Every complete selection the dropdowns can produce.
fn complete_states() -> Vec<SelectionState> {
    let resolver = SelectionResolver::new();
    let mut states = Vec::new();
    for (category, data_type, method) in offered_methods() {
        let base = SelectionState {
            category: Some(category),
            data_type: Some(data_type),
            analysis_method: Some(method),
            sub_method: None,
        };
        if resolver.is_complete(&base) {
            states.push(base);
        } else {
            for &sub in SUB_METHOD_OPTIONS {
                states.push(SelectionState {
                    sub_method: Some(sub),
                    ..base
                });
            }
        }
    }
    states
}

fn bench_build_payload(c: &mut Criterion) {
    let catalog = MethodCatalog::builtin();
    let states = complete_states();

    let mut group = c.benchmark_group("pipeline_build_payload");
    group.throughput(Throughput::Elements(states.len() as u64));
    group.bench_function("all_complete_states", |b| {
        b.iter(|| {
            for state in &states {
                black_box(build_payload(catalog, black_box(state)));
            }
        })
    });
    group.finish();
}

fn bench_session_events(c: &mut Criterion) {
    let events = [
        SelectionEvent::category("a"),
        SelectionEvent::data_type("2"),
        SelectionEvent::analysis_method("dominantfreq"),
        SelectionEvent::sub_method("lombscargle"),
        SelectionEvent::data_type("1"),
        SelectionEvent::analysis_method("wavelet"),
        SelectionEvent::category("b"),
        SelectionEvent::data_type("1"),
        SelectionEvent::analysis_method("welch"),
    ];

    let mut group = c.benchmark_group("pipeline_session");
    for &rounds in &[1usize, 100] {
        group.throughput(Throughput::Elements((rounds * events.len()) as u64));
        group.bench_with_input(
            BenchmarkId::new("apply_events", rounds),
            &rounds,
            |b: &mut Bencher, &rounds| {
                b.iter(|| {
                    let mut session = Session::new(MethodCatalog::builtin());
                    for _ in 0..rounds {
                        black_box(session.apply_all(&events).unwrap());
                    }
                    black_box(session.events_applied())
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_build_payload, bench_session_events);
criterion_main!(benches);
