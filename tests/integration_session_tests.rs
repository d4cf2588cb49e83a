//! # Session Integration Tests / 会话集成测试
//!
//! Runs whole sessions through the public API and checks the report text, the
//! statistics and the exit status.
//!
//! 通过公共 API 运行完整会话，检查报告文本、统计数据和退出状态。

mod common;

use common::{pass_and_fail, run_registry};
use std::cell::Cell;
use std::io::{self, Write};
use std::rc::Rc;
use xtest::infra::output::{Output, Sink};
use xtest::{Outcome, Registry, RunConfiguration, Session, TestCase, TestFixture};

/// A writer that rejects everything.
struct BrokenPipe;

impl Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn test_exit_status_is_failure_count() {
        let mut registry = pass_and_fail().test("also-fails", |t| t.fail("again"));
        let (summary, _) = run_registry(RunConfiguration::default(), &mut registry);
        assert_eq!(summary.stats.passed, 1);
        assert_eq!(summary.stats.failed, 2);
        assert_eq!(summary.exit_status(), 2);
    }

    #[test]
    fn test_all_passing_exits_zero() {
        let mut registry = Registry::new().test("a", |t| t.pass()).bench("b", |t| t.pass());
        let (summary, report) = run_registry(RunConfiguration::default(), &mut registry);
        assert_eq!(summary.exit_status(), 0);
        assert!(report.ends_with("[Xtest report system]\npass: 002, fail: 000\n"));
    }

    #[test]
    fn test_empty_registry() {
        let (summary, report) = run_registry(RunConfiguration::default(), &mut Registry::new());
        assert_eq!(summary.stats.total, 0);
        assert_eq!(report, "[Xtest report system]\npass: 000, fail: 000\n");
    }

    #[test]
    fn test_cutback_summary_scenario() {
        let config = RunConfiguration {
            cutback: true,
            ..RunConfiguration::default()
        };
        let (_, report) = run_registry(config, &mut pass_and_fail());
        assert_eq!(
            report,
            "name: always-pass, type: unit\n[O]\nname: always-fail, type: unit\n[F]\n\
             [Xtest report system]\nresult: fail\n"
        );
    }

    #[test]
    fn test_verbose_summary_scenario() {
        let config = RunConfiguration {
            verbose: true,
            ..RunConfiguration::default()
        };
        let (_, report) = run_registry(config, &mut pass_and_fail());
        assert!(report.ends_with("pass: 001, fail: 001, skip: 000, total: 002\n"));
        assert_eq!(report.matches("[Running Test Case]").count(), 2);
        assert_eq!(report.matches("[Current unit done]").count(), 2);
    }

    #[test]
    fn test_cases_run_in_registration_order() {
        let order = Rc::new(Cell::new(0u32));
        let mut registry = Registry::new();
        for expected in 1..=5u32 {
            let order = Rc::clone(&order);
            registry = registry.test(format!("case_{expected}"), move |t| {
                order.set(order.get() + 1);
                t.assert_eq(order.get(), expected, "registration order");
            });
        }
        let (summary, report) = run_registry(RunConfiguration::default(), &mut registry);
        assert_eq!(summary.stats.passed, 5);
        let positions: Vec<usize> = (1..=5)
            .map(|i| report.find(&format!("name  : case_{i}\n")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_session_stats_snapshot() {
        let mut session = Session::start(RunConfiguration::default(), io::sink());
        let mut case = TestCase::unit("one", |t| t.pass());
        assert_eq!(session.run(&mut case), Outcome::Passed);
        assert_eq!(session.stats().passed, 1);
        assert_eq!(session.stats().total, 1);
        assert_eq!(session.config().repeat_count, 1);
    }

    #[test]
    fn test_session_normalizes_config() {
        let config = RunConfiguration {
            only_tests: true,
            only_benchmarks: true,
            repeat_count: 0,
            ..RunConfiguration::default()
        };
        let session = Session::start(config, io::sink());
        assert!(!session.config().only_tests);
        assert!(!session.config().only_benchmarks);
        assert_eq!(session.config().repeat_count, 1);
    }
}

#[cfg(test)]
mod dry_run_tests {
    use super::*;

    #[test]
    fn test_dry_run_skips_everything() {
        let calls = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&calls);
        let config = RunConfiguration {
            dry_run: true,
            ..RunConfiguration::default()
        };
        let mut registry = pass_and_fail().test("counted", move |_| counter.set(counter.get() + 1));

        let mut buffer = Vec::new();
        let (outcomes, summary) = {
            let mut session = Session::start(config, &mut buffer);
            let outcomes = session.run_registry(&mut registry);
            (outcomes, session.end().unwrap())
        };
        let report = String::from_utf8(buffer).unwrap();

        assert!(outcomes.iter().all(|outcome| *outcome == Outcome::NotRun));
        assert_eq!(calls.get(), 0);
        assert!(summary.dry_run);
        assert_eq!(summary.stats.total, 0);
        assert_eq!(summary.exit_status(), 0);
        assert!(!report.contains("name  :"));
        assert!(report.ends_with("[Xtest report system]\npass: 000, fail: 000\n"));
        assert!(report.lines().count() >= 3);
    }
}

#[cfg(test)]
mod ignore_tests {
    use super::*;

    #[test]
    fn test_ignore_next_skips_one_case() {
        let mut buffer = Vec::new();
        let summary = {
            let mut session = Session::start(RunConfiguration::default(), &mut buffer);
            session.ignore_next("known broken");
            let mut first = TestCase::unit("first", |t| t.fail("must not run"));
            let mut second = TestCase::unit("second", |t| t.pass());
            assert_eq!(session.run(&mut first), Outcome::Ignored);
            assert_eq!(session.run(&mut second), Outcome::Passed);
            session.end().unwrap()
        };
        let report = String::from_utf8(buffer).unwrap();

        assert_eq!(summary.stats.ignored, 1);
        assert_eq!(summary.stats.passed, 1);
        assert_eq!(summary.exit_status(), 0);
        assert!(report.starts_with("[ assumption skipped ]\n"));
        assert!(report.contains("func: session\n"));
        assert!(report.contains("func: first\n"));
    }

    #[test]
    fn test_declared_ignore_with_fixture_in_registry() {
        let setups = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&setups);
        let fixture = Rc::new(TestFixture::new("tracked").setup(move || counter.set(counter.get() + 1)));
        let mut registry = Registry::new()
            .case(
                TestCase::unit("skipped", |t| t.fail("must not run"))
                    .with_fixture(Rc::clone(&fixture))
                    .ignore("disabled"),
            )
            .test_with_fixture("runs", fixture, |t| t.pass());
        let config = RunConfiguration {
            verbose: true,
            repeat_count: 3,
            ..RunConfiguration::default()
        };
        let (summary, report) = run_registry(config, &mut registry);

        assert_eq!(setups.get(), 3);
        assert!(registry.get("skipped").unwrap().ignored);
        assert!(!registry.get("runs").unwrap().ignored);
        assert!(report.ends_with("pass: 001, fail: 000, skip: 001, total: 002\n"));
        assert_eq!(summary.stats.ignored, 1);
    }
}

#[cfg(test)]
mod output_tests {
    use super::*;

    #[test]
    fn test_output_collects_text() {
        let mut output = Output::new(Vec::new());
        output.emit("hello ");
        output.emit("world");
        output.finish().unwrap();
        assert_eq!(output.into_inner(), b"hello world");
    }

    #[test]
    fn test_output_keeps_first_error() {
        let mut output = Output::new(BrokenPipe);
        output.emit("lost");
        output.emit("also lost");
        let err = output.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        output.finish().unwrap();
    }

    #[test]
    fn test_session_end_surfaces_write_error() {
        let mut session = Session::start(RunConfiguration::default(), BrokenPipe);
        let mut case = TestCase::unit("one", |t| t.pass());
        assert_eq!(session.run(&mut case), Outcome::Passed);
        assert!(session.end().is_err());
    }
}

#[cfg(test)]
mod registry_tests {
    use super::*;
    use xtest::CaseKind;

    #[test]
    fn test_registry_builders_keep_kind_and_order() {
        let setups = Rc::new(Cell::new(0u32));
        let counter = Rc::clone(&setups);
        let fixture = Rc::new(TestFixture::new("warm").setup(move || counter.set(counter.get() + 1)));
        let mut registry = Registry::new()
            .test("unit", |t| t.pass())
            .bench_with_fixture("warm_bench", Rc::clone(&fixture), |t| t.pass())
            .case(TestCase::benchmark("plain_bench", |t| t.pass()));

        let names: Vec<&str> = registry.cases().iter().map(|case| case.name.as_str()).collect();
        assert_eq!(names, ["unit", "warm_bench", "plain_bench"]);
        assert_eq!(registry.len(), 3);
        assert!(!registry.is_empty());
        assert!(Registry::new().is_empty());

        let warm = registry.get("warm_bench").unwrap();
        assert!(warm.is_benchmark());
        assert_eq!(warm.kind, CaseKind::Benchmark);
        assert_eq!(warm.fixture().map(|f| f.name()), Some("warm"));
        assert!(!registry.get("unit").unwrap().is_benchmark());
        assert!(registry.get("missing").is_none());

        let config = RunConfiguration {
            only_benchmarks: true,
            repeat_count: 2,
            ..RunConfiguration::default()
        };
        let (summary, _) = run_registry(config, &mut registry);
        assert_eq!(setups.get(), 2);
        assert_eq!(summary.stats.passed, 2);
        assert_eq!(summary.stats.ignored, 1);
    }
}
