//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout xtest: test
//! cases and their kinds, fixtures, ignore requests, outcomes and run statistics.
//!
//! 此模块定义了 xtest 中使用的核心数据结构：测试用例及其类型、夹具、
//! 忽略请求、执行结果以及运行统计。

use std::fmt;
use std::panic::Location;
use std::rc::Rc;
use std::time::Duration;

use crate::core::execution::Checker;

/// The body of a test case. It receives the [`Checker`] that records assertions
/// and expectations for the running case.
pub type TestBody = Box<dyn Fn(&mut Checker<'_>)>;

/// A setup or teardown hook of a [`TestFixture`].
pub type FixtureHook = Box<dyn Fn()>;

/// Whether a case is a unit test or a benchmark. Used by the
/// `--only-test`/`--only-mark` filters.
/// 用例是单元测试还是基准测试。用于 `--only-test`/`--only-mark` 过滤。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseKind {
    Unit,
    Benchmark,
}

impl CaseKind {
    /// Long label used by the detailed output: `Unit test` or `Benchmark`.
    pub fn label(self) -> &'static str {
        match self {
            CaseKind::Unit => "Unit test",
            CaseKind::Benchmark => "Benchmark",
        }
    }

    /// Short label used by the cutback output: `unit` or `mark`.
    pub fn short_label(self) -> &'static str {
        match self {
            CaseKind::Unit => "unit",
            CaseKind::Benchmark => "mark",
        }
    }
}

/// A deliberate request to skip a case, with where it was made.
/// 跳过某个用例的显式请求，以及发出请求的位置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRequest {
    pub reason: String,
    pub location: &'static Location<'static>,
}

impl IgnoreRequest {
    #[track_caller]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            location: Location::caller(),
        }
    }
}

/// Why a case was not executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreCause {
    /// Skipped on request, either for the next case or on the case itself.
    Requested(IgnoreRequest),
    /// The case kind conflicts with `--only-test` or `--only-mark`.
    Filtered(CaseKind),
}

impl IgnoreCause {
    pub fn message(&self) -> String {
        match self {
            IgnoreCause::Requested(request) => request.reason.clone(),
            IgnoreCause::Filtered(CaseKind::Benchmark) => {
                "benchmark skipped by --only-test".to_string()
            }
            IgnoreCause::Filtered(CaseKind::Unit) => "unit test skipped by --only-mark".to_string(),
        }
    }

    pub fn location(&self) -> Option<&'static Location<'static>> {
        match self {
            IgnoreCause::Requested(request) => Some(request.location),
            IgnoreCause::Filtered(_) => None,
        }
    }
}

/// A reusable pair of setup/teardown hooks shared by one or more cases.
/// Both hooks are optional.
///
/// 由一个或多个用例共享的可复用 setup/teardown 钩子对。两个钩子都是可选的。
pub struct TestFixture {
    name: String,
    setup: Option<FixtureHook>,
    teardown: Option<FixtureHook>,
}

impl TestFixture {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setup: None,
            teardown: None,
        }
    }

    /// Sets the hook run before every iteration of the case body.
    pub fn setup(mut self, hook: impl Fn() + 'static) -> Self {
        self.setup = Some(Box::new(hook));
        self
    }

    /// Sets the hook run after every iteration of the case body.
    pub fn teardown(mut self, hook: impl Fn() + 'static) -> Self {
        self.teardown = Some(Box::new(hook));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn run_setup(&self) {
        if let Some(setup) = &self.setup {
            setup();
        }
    }

    pub(crate) fn run_teardown(&self) {
        if let Some(teardown) = &self.teardown {
            teardown();
        }
    }
}

impl fmt::Debug for TestFixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestFixture")
            .field("name", &self.name)
            .field("setup", &self.setup.is_some())
            .field("teardown", &self.teardown.is_some())
            .finish()
    }
}

/// A single registered test case or benchmark.
///
/// `ignored` and `elapsed` describe the most recent invocation only; the
/// executor resets them every time the case runs.
///
/// 单个已注册的测试用例或基准测试。
/// `ignored` 和 `elapsed` 只描述最近一次调用；执行器在每次运行用例时都会重置它们。
pub struct TestCase {
    pub name: String,
    pub kind: CaseKind,
    pub ignored: bool,
    pub elapsed: Duration,
    body: TestBody,
    fixture: Option<Rc<TestFixture>>,
    skip: Option<IgnoreRequest>,
}

impl TestCase {
    pub fn new(
        name: impl Into<String>,
        kind: CaseKind,
        body: impl Fn(&mut Checker<'_>) + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            ignored: false,
            elapsed: Duration::ZERO,
            body: Box::new(body),
            fixture: None,
            skip: None,
        }
    }

    /// A unit test case.
    pub fn unit(name: impl Into<String>, body: impl Fn(&mut Checker<'_>) + 'static) -> Self {
        Self::new(name, CaseKind::Unit, body)
    }

    /// A benchmark case.
    pub fn benchmark(name: impl Into<String>, body: impl Fn(&mut Checker<'_>) + 'static) -> Self {
        Self::new(name, CaseKind::Benchmark, body)
    }

    /// Runs the case inside `fixture`.
    pub fn with_fixture(mut self, fixture: Rc<TestFixture>) -> Self {
        self.fixture = Some(fixture);
        self
    }

    /// Marks the case to be skipped every time it is run.
    #[track_caller]
    pub fn ignore(mut self, reason: impl Into<String>) -> Self {
        self.skip = Some(IgnoreRequest::new(reason));
        self
    }

    pub fn is_benchmark(&self) -> bool {
        self.kind == CaseKind::Benchmark
    }

    pub fn fixture(&self) -> Option<&Rc<TestFixture>> {
        self.fixture.as_ref()
    }

    pub fn skip_request(&self) -> Option<&IgnoreRequest> {
        self.skip.as_ref()
    }

    pub(crate) fn body(&self) -> &TestBody {
        &self.body
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("ignored", &self.ignored)
            .field("elapsed", &self.elapsed)
            .field("fixture", &self.fixture.as_ref().map(|fixture| fixture.name()))
            .finish_non_exhaustive()
    }
}

/// Which latch a check feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Assert,
    Expect,
}

impl CheckKind {
    pub fn label(self) -> &'static str {
        match self {
            CheckKind::Assert => "Assert",
            CheckKind::Expect => "Expect",
        }
    }
}

/// One assertion or expectation, as handed to the formatter.
/// 单个断言或期望，传递给格式化器。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckEvent<'a> {
    pub kind: CheckKind,
    pub passed: bool,
    pub message: &'a str,
    pub location: &'static Location<'static>,
    /// Name of the case the check ran in.
    pub func: &'a str,
}

/// The classification of one case run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed,
    Ignored,
    /// The session is a dry run; the case was not looked at.
    NotRun,
}

/// Outcome counters for a run session. They only ever grow.
/// 运行会话的结果计数器，只会递增。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestStats {
    pub passed: u32,
    pub failed: u32,
    pub ignored: u32,
    pub total: u32,
}

impl TestStats {
    /// Counts one classified case. `NotRun` leaves the counters untouched.
    pub(crate) fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Ignored => self.ignored += 1,
            Outcome::NotRun => return,
        }
        self.total += 1;
    }

    /// The process exit status for these counts: the number of failed cases.
    pub fn exit_status(&self) -> u32 {
        self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}
