//! # Assertion/Expectation Tracker / 断言与期望跟踪器
//!
//! Two latches decide whether the running case failed. The assert latch is
//! sticky: one failure holds until the next case starts. The expect latch keeps
//! only the result of the most recent expectation.
//!
//! 两个锁存器决定正在运行的用例是否失败。断言锁存器是“粘性”的：
//! 一次失败会一直保持到下一个用例开始。期望锁存器只保留最近一次期望的结果。

/// How a latch reacts to a new result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchPolicy {
    /// The first failure is kept for the rest of the case.
    Sticky,
    /// Every record overwrites the state with its own result.
    // NOTE: an earlier failing expectation is forgotten once a later one passes.
    LastWrite,
}

/// Failure state for one kind of check within one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Latch {
    policy: LatchPolicy,
    failed: bool,
    armed: bool,
}

impl Latch {
    /// Creates a passing, disarmed latch.
    pub const fn new(policy: LatchPolicy) -> Self {
        Self {
            policy,
            failed: false,
            armed: false,
        }
    }

    pub fn policy(&self) -> LatchPolicy {
        self.policy
    }

    /// Clears the failure state and arms the latch for a new case.
    pub fn reset(&mut self) {
        self.failed = false;
        self.armed = true;
    }

    /// Stops accepting records until the next [`reset`](Self::reset).
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Feeds one check result into the latch. Ignored while disarmed.
    pub fn record(&mut self, result: bool) {
        if !self.armed {
            return;
        }
        match self.policy {
            LatchPolicy::Sticky => self.failed |= !result,
            LatchPolicy::LastWrite => self.failed = !result,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }
}

/// The pair of latches consulted when classifying a case.
/// 对用例进行分类时参考的一对锁存器。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracker {
    pub assert: Latch,
    pub expect: Latch,
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker {
    pub const fn new() -> Self {
        Self {
            assert: Latch::new(LatchPolicy::Sticky),
            expect: Latch::new(LatchPolicy::LastWrite),
        }
    }

    /// Resets and arms both latches at the start of a case.
    pub fn reset(&mut self) {
        self.assert.reset();
        self.expect.reset();
    }

    pub fn disarm(&mut self) {
        self.assert.disarm();
        self.expect.disarm();
    }

    /// `true` when either latch currently holds a failure.
    pub fn is_failed(&self) -> bool {
        self.assert.is_failed() || self.expect.is_failed()
    }
}
