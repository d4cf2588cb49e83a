//! # Test Execution Engine Module / 测试执行引擎模块
//!
//! This module runs a single test case: it applies the ignore policy, invokes the
//! fixture hooks and the body `repeat_count` times, times the whole sequence once
//! and classifies the outcome from the tracker's latches.
//!
//! 此模块运行单个测试用例：应用忽略策略，按 `repeat_count` 次调用夹具钩子和用例主体，
//! 对整个序列计时一次，并根据跟踪器的锁存器对结果进行分类。

use std::fmt::Debug;
use std::panic::Location;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::core::config::RunConfiguration;
use crate::core::models::{CheckEvent, CheckKind, IgnoreRequest, Outcome, TestCase, TestStats};
use crate::core::planner;
use crate::core::tracker::Tracker;
use crate::infra::output::Sink;
use crate::reporting::console;

/// Handed to every test body. Records assertions (sticky) and expectations
/// (last write wins) and prints one line per check.
///
/// A failing check never stops the body; it only marks the case as failed.
///
/// 传递给每个测试主体。记录断言（粘性）和期望（最后一次写入生效），
/// 并为每个检查输出一行。失败的检查不会中断主体，只会将用例标记为失败。
pub struct Checker<'a> {
    config: &'a RunConfiguration,
    tracker: &'a mut Tracker,
    sink: &'a mut dyn Sink,
    case_name: &'a str,
}

impl<'a> Checker<'a> {
    pub fn new(
        config: &'a RunConfiguration,
        tracker: &'a mut Tracker,
        sink: &'a mut dyn Sink,
        case_name: &'a str,
    ) -> Self {
        Self {
            config,
            tracker,
            sink,
            case_name,
        }
    }

    /// Name of the running case.
    pub fn case_name(&self) -> &str {
        self.case_name
    }

    /// Records an assertion. Once one assertion fails the case stays failed.
    /// Returns `condition`.
    #[track_caller]
    pub fn assert(&mut self, condition: bool, message: &str) -> bool {
        self.record(CheckKind::Assert, condition, message, Location::caller())
    }

    /// Records an expectation. Only the last expectation of the case counts.
    /// Returns `condition`.
    #[track_caller]
    pub fn expect(&mut self, condition: bool, message: &str) -> bool {
        self.record(CheckKind::Expect, condition, message, Location::caller())
    }

    #[track_caller]
    pub fn assert_eq<T: PartialEq + Debug>(&mut self, left: T, right: T, message: &str) -> bool {
        let passed = left == right;
        let message = compared(message, &left, &right, passed);
        self.record(CheckKind::Assert, passed, &message, Location::caller())
    }

    #[track_caller]
    pub fn assert_ne<T: PartialEq + Debug>(&mut self, left: T, right: T, message: &str) -> bool {
        let passed = left != right;
        let message = compared(message, &left, &right, passed);
        self.record(CheckKind::Assert, passed, &message, Location::caller())
    }

    #[track_caller]
    pub fn expect_eq<T: PartialEq + Debug>(&mut self, left: T, right: T, message: &str) -> bool {
        let passed = left == right;
        let message = compared(message, &left, &right, passed);
        self.record(CheckKind::Expect, passed, &message, Location::caller())
    }

    #[track_caller]
    pub fn expect_ne<T: PartialEq + Debug>(&mut self, left: T, right: T, message: &str) -> bool {
        let passed = left != right;
        let message = compared(message, &left, &right, passed);
        self.record(CheckKind::Expect, passed, &message, Location::caller())
    }

    /// An assertion that always passes.
    #[track_caller]
    pub fn pass(&mut self) {
        self.record(CheckKind::Assert, true, "explicit pass", Location::caller());
    }

    /// An assertion that always fails.
    #[track_caller]
    pub fn fail(&mut self, message: &str) {
        self.record(CheckKind::Assert, false, message, Location::caller());
    }

    fn record(
        &mut self,
        kind: CheckKind,
        passed: bool,
        message: &str,
        location: &'static Location<'static>,
    ) -> bool {
        match kind {
            CheckKind::Assert => self.tracker.assert.record(passed),
            CheckKind::Expect => self.tracker.expect.record(passed),
        }
        let event = CheckEvent {
            kind,
            passed,
            message,
            location,
            func: self.case_name,
        };
        self.sink.emit(&console::format_check(self.config, &event));
        passed
    }
}

/// Appends both operands to a failed comparison's message.
fn compared<T: Debug>(message: &str, left: &T, right: &T, passed: bool) -> String {
    if passed {
        message.to_string()
    } else {
        format!("{message} (left: {left:?}, right: {right:?})")
    }
}

/// Runs cases against borrowed session state. The session builds one per run so
/// the latches and counters stay owned by the session.
/// 针对借用的会话状态运行用例。会话为每次运行创建一个执行器，
/// 因此锁存器和计数器始终归会话所有。
pub struct Executor<'s> {
    config: &'s RunConfiguration,
    tracker: &'s mut Tracker,
    stats: &'s mut TestStats,
    sink: &'s mut dyn Sink,
    pending_ignore: &'s mut Option<IgnoreRequest>,
}

impl<'s> Executor<'s> {
    pub fn new(
        config: &'s RunConfiguration,
        tracker: &'s mut Tracker,
        stats: &'s mut TestStats,
        sink: &'s mut dyn Sink,
        pending_ignore: &'s mut Option<IgnoreRequest>,
    ) -> Self {
        Self {
            config,
            tracker,
            stats,
            sink,
            pending_ignore,
        }
    }

    /// Executes `case` and records its outcome in the statistics.
    ///
    /// # Process / 处理过程
    /// 1. Print the case-start event
    /// 2. Skip the case if it is ignored, without touching body or fixture and
    ///    without a case-end event
    /// 3. Reset the latches and run setup, body and teardown `repeat_count` times
    /// 4. Time the whole loop once
    /// 5. Classify: failed when either latch is failed
    /// 6. Print the case-end event
    pub fn execute(&mut self, case: &mut TestCase) -> Outcome {
        case.ignored = false;
        case.elapsed = Duration::ZERO;

        let number = self.stats.total + 1;
        self.sink.emit(&console::format_case_start(
            self.config,
            &case.name,
            number,
            case.kind,
        ));

        if let Some(cause) = planner::ignore_cause(case, self.config, self.pending_ignore.take()) {
            debug!(case = %case.name, reason = %cause.message(), "case ignored");
            case.ignored = true;
            self.stats.record(Outcome::Ignored);
            self.sink
                .emit(&console::format_ignore(self.config, &cause, &case.name));
            return Outcome::Ignored;
        }

        self.tracker.reset();
        let start_time = Instant::now();
        {
            let fixture = case.fixture();
            let mut checker = Checker::new(self.config, self.tracker, self.sink, &case.name);
            for _ in 0..self.config.repeat_count {
                if let Some(fixture) = fixture {
                    fixture.run_setup();
                }
                (case.body())(&mut checker);
                if let Some(fixture) = fixture {
                    fixture.run_teardown();
                }
            }
        }
        case.elapsed = start_time.elapsed();

        let outcome = if self.tracker.is_failed() {
            Outcome::Failed
        } else {
            Outcome::Passed
        };
        self.tracker.disarm();
        self.stats.record(outcome);
        debug!(case = %case.name, ?outcome, elapsed = ?case.elapsed, "case finished");

        self.sink
            .emit(&console::format_case_end(self.config, case.elapsed, false));
        outcome
    }
}
