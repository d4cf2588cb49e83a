use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::io;
use xtest::{Registry, RunConfiguration, Session};

fn bench_registry() -> Registry {
    (0..50).fold(Registry::new(), |registry, i| {
        registry
            .test(format!("unit_{i}"), move |t| {
                t.assert_eq(i * 2, i + i, "doubling");
                t.expect(i >= 0, "non-negative");
            })
            .bench(format!("mark_{i}"), |t| {
                let sum: u64 = (1..=1_000u64).sum();
                t.expect_eq(sum, 500_500, "sum");
            })
    })
}

fn bench_run_session(c: &mut Criterion) {
    let configs = [
        ("default", RunConfiguration::default()),
        (
            "verbose",
            RunConfiguration {
                verbose: true,
                ..RunConfiguration::default()
            },
        ),
        (
            "cutback_repeat_10",
            RunConfiguration {
                cutback: true,
                repeat_count: 10,
                ..RunConfiguration::default()
            },
        ),
    ];

    for (label, config) in configs {
        let mut registry = bench_registry();
        c.bench_function(&format!("run_session_{label}"), |b| {
            b.iter(|| {
                let mut session = Session::start(config, io::sink());
                session.run_registry(&mut registry);
                black_box(session.end().unwrap())
            });
        });
    }
}

criterion_group!(benches, bench_run_session);
criterion_main!(benches);
