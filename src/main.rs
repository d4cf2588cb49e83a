use std::cell::Cell;
use std::process::ExitCode;
use std::rc::Rc;
use xtest::{Registry, TestFixture, cli, infra};

/// The bundled sample suite: a fixture shared by a passing and a failing case,
/// plus a benchmark.
fn sample_suite() -> Registry {
    let prepared = Rc::new(Cell::new(0u32));
    let setup_counter = Rc::clone(&prepared);
    let teardown_counter = Rc::clone(&prepared);
    let basic_fixture = Rc::new(
        TestFixture::new("basic_fixture")
            .setup(move || setup_counter.set(setup_counter.get() + 1))
            .teardown(move || teardown_counter.set(0)),
    );

    let seen = Rc::clone(&prepared);
    Registry::new()
        .test_with_fixture("passing_case", Rc::clone(&basic_fixture), move |t| {
            t.assert(seen.get() > 0, "fixture setup ran before the body");
            t.pass();
        })
        .test_with_fixture("failing_case", basic_fixture, |t| {
            t.fail("This test intentionally fails");
        })
        .bench("sum_bench", |t| {
            let sum: u64 = (1..=10_000u64).sum();
            t.expect_eq(sum, 50_005_000, "sum of the first 10k integers");
        })
}

fn main() -> ExitCode {
    // Initialize diagnostics and i18n
    infra::logging::init();
    xtest::init();

    cli::run(std::env::args_os(), sample_suite())
}
