//! # Ignore Planner / 忽略策略
//!
//! Decides whether a case runs at all. A case is skipped when an ignore was
//! requested before execution, or when its kind is excluded by an active
//! `--only-test`/`--only-mark` filter.
//!
//! 决定用例是否运行。当执行前请求了忽略，或者其类型被当前的
//! `--only-test`/`--only-mark` 过滤器排除时，用例会被跳过。

use crate::core::config::RunConfiguration;
use crate::core::models::{CaseKind, IgnoreCause, IgnoreRequest, TestCase};

/// Returns why `case` must be skipped, or `None` when it should run.
///
/// Precedence: a pending session-level request, then the request declared on the
/// case, then the kind filters.
pub fn ignore_cause(
    case: &TestCase,
    config: &RunConfiguration,
    pending: Option<IgnoreRequest>,
) -> Option<IgnoreCause> {
    if let Some(request) = pending {
        return Some(IgnoreCause::Requested(request));
    }
    if let Some(request) = case.skip_request() {
        return Some(IgnoreCause::Requested(request.clone()));
    }
    if is_filtered_out(case.kind, config) {
        return Some(IgnoreCause::Filtered(case.kind));
    }
    None
}

/// `true` when `kind` conflicts with the active kind filter.
pub fn is_filtered_out(kind: CaseKind, config: &RunConfiguration) -> bool {
    // Both filters together mean "run everything".
    if config.only_tests && config.only_benchmarks {
        return false;
    }
    match kind {
        CaseKind::Unit => config.only_benchmarks,
        CaseKind::Benchmark => config.only_tests,
    }
}
