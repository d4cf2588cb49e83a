//! # Case Registry / 用例注册表
//!
//! An ordered list of test cases built explicitly by the caller. The session
//! runs them in registration order.
//!
//! 由调用者显式构建的有序测试用例列表。会话按注册顺序运行它们。

use std::rc::Rc;

use crate::core::execution::Checker;
use crate::core::models::{TestCase, TestFixture};

#[derive(Debug, Default)]
pub struct Registry {
    cases: Vec<TestCase>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an already built case.
    pub fn case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    /// Appends a unit test.
    pub fn test(self, name: impl Into<String>, body: impl Fn(&mut Checker<'_>) + 'static) -> Self {
        self.case(TestCase::unit(name, body))
    }

    /// Appends a unit test that runs inside `fixture`.
    pub fn test_with_fixture(
        self,
        name: impl Into<String>,
        fixture: Rc<TestFixture>,
        body: impl Fn(&mut Checker<'_>) + 'static,
    ) -> Self {
        self.case(TestCase::unit(name, body).with_fixture(fixture))
    }

    /// Appends a benchmark.
    pub fn bench(self, name: impl Into<String>, body: impl Fn(&mut Checker<'_>) + 'static) -> Self {
        self.case(TestCase::benchmark(name, body))
    }

    /// Appends a benchmark that runs inside `fixture`.
    pub fn bench_with_fixture(
        self,
        name: impl Into<String>,
        fixture: Rc<TestFixture>,
        body: impl Fn(&mut Checker<'_>) + 'static,
    ) -> Self {
        self.case(TestCase::benchmark(name, body).with_fixture(fixture))
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn cases_mut(&mut self) -> &mut [TestCase] {
        &mut self.cases
    }

    /// Looks a case up by name.
    pub fn get(&self, name: &str) -> Option<&TestCase> {
        self.cases.iter().find(|case| case.name == name)
    }
}
