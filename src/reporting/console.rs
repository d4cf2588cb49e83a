//! # Console Reporting Module / 控制台报告模块
//!
//! Pure functions from (run configuration, event) to report text. Nothing here
//! writes or mutates state; the session decides where the text goes.
//!
//! 从（运行配置, 事件）到报告文本的纯函数。这里不写入也不修改任何状态；
//! 由会话决定文本输出到哪里。
//!
//! The layout depends on [`OutputMode`]:
//!
//! ```text
//! mode              | case start              | check                 | case end
//! verbose           | banner + full detail    | full block            | time, ignore, done banner
//! cutback           | name: X, type: unit     | [O] / [F] / [I]       | blank line
//! verbose + cutback | full detail             | message + result      | time
//! default           | full detail             | full block            | ignore
//! ```

use colored::Color;
use std::panic::Location;
use std::time::Duration;

use crate::core::config::{OutputMode, RunConfiguration};
use crate::core::models::{CaseKind, CheckEvent, IgnoreCause, TestStats};
use crate::infra::t;

const HEADER_COLOR: Color = Color::Blue;
const PASS_COLOR: Color = Color::Green;
const FAIL_COLOR: Color = Color::Red;
const IGNORE_COLOR: Color = Color::Yellow;

/// Wraps `text` in `color` when the configuration asks for colored output.
/// The escape codes are written out directly, so the result does not depend on
/// `colored`'s process-wide override or on whether stdout is a terminal.
fn paint(config: &RunConfiguration, text: &str, color: Color) -> String {
    if config.colored {
        format!("\x1b[{}m{}\x1b[0m", color.to_fg_str(), text)
    } else {
        text.to_string()
    }
}

fn result_word(passed: bool) -> &'static str {
    if passed { "PASS" } else { "FAIL" }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn location_block(location: &Location<'_>, func: &str) -> String {
    format!(
        "line: {:04}\nfile: {}\nfunc: {}\n",
        location.line(),
        location.file(),
        func
    )
}

fn time_line(elapsed: Duration) -> String {
    format!("time: {:06} us\n", elapsed.as_micros())
}

/// Renders the line(s) printed when a case starts.
///
/// # Arguments
/// * `number` - 1-based sequence number of the case within the session
pub fn format_case_start(
    config: &RunConfiguration,
    name: &str,
    number: u32,
    kind: CaseKind,
) -> String {
    let detail = format!(
        "name  : {}\nnumber: {:04}\ntype: {}\n",
        name,
        number,
        kind.label()
    );

    match config.output_mode() {
        OutputMode::Verbose => format!(
            "{}{}",
            paint(config, "[Running Test Case]\n", HEADER_COLOR),
            paint(config, &detail, HEADER_COLOR)
        ),
        OutputMode::Cutback => paint(
            config,
            &format!("name: {}, type: {}\n", name, kind.short_label()),
            HEADER_COLOR,
        ),
        OutputMode::VerboseCutback | OutputMode::Default => paint(config, &detail, HEADER_COLOR),
    }
}

/// Renders a single assertion or expectation.
pub fn format_check(config: &RunConfiguration, event: &CheckEvent<'_>) -> String {
    let color = if event.passed { PASS_COLOR } else { FAIL_COLOR };

    match config.output_mode() {
        OutputMode::Cutback => paint(config, if event.passed { "[O]" } else { "[F]" }, color),
        OutputMode::VerboseCutback => paint(
            config,
            &format!(
                "message: {}\nresult: {}\n",
                event.message,
                result_word(event.passed)
            ),
            color,
        ),
        OutputMode::Verbose | OutputMode::Default => {
            let header = format!("[{} assumption]\n", event.kind.label());
            let body = format!(
                "{}message: {}\nresult: {}\n",
                location_block(event.location, event.func),
                event.message,
                result_word(event.passed)
            );
            format!(
                "{}{}",
                paint(config, &header, HEADER_COLOR),
                paint(config, &body, color)
            )
        }
    }
}

/// Renders the reason a case was skipped.
///
/// # Arguments
/// * `func` - name of the case being skipped
pub fn format_ignore(config: &RunConfiguration, cause: &IgnoreCause, func: &str) -> String {
    let message = cause.message();

    match config.output_mode() {
        OutputMode::Cutback => paint(config, "[I]", IGNORE_COLOR),
        OutputMode::VerboseCutback => {
            paint(config, &format!("message: {message}\n"), IGNORE_COLOR)
        }
        OutputMode::Verbose | OutputMode::Default => {
            let mut body = String::new();
            if let Some(location) = cause.location() {
                body.push_str(&location_block(location, func));
            }
            body.push_str(&format!("message: {message}\n"));
            format!(
                "{}{}",
                paint(config, "[ assumption skipped ]\n", HEADER_COLOR),
                paint(config, &body, IGNORE_COLOR)
            )
        }
    }
}

/// Renders the line(s) printed when a case finishes.
pub fn format_case_end(config: &RunConfiguration, elapsed: Duration, ignored: bool) -> String {
    let ignore_line = format!("ignore: {}\n", yes_no(ignored));

    match config.output_mode() {
        OutputMode::Verbose => format!(
            "{}{}{}",
            paint(config, &time_line(elapsed), HEADER_COLOR),
            paint(config, &ignore_line, HEADER_COLOR),
            paint(config, "[Current unit done]\n\n", HEADER_COLOR)
        ),
        OutputMode::Cutback => "\n".to_string(),
        OutputMode::VerboseCutback => paint(config, &time_line(elapsed), HEADER_COLOR),
        OutputMode::Default => paint(config, &ignore_line, HEADER_COLOR),
    }
}

/// Renders the final report for the session.
///
/// # Output Format / 输出格式
/// ```text
/// [Xtest report system]
/// pass: 001, fail: 001, skip: 000, total: 002   (verbose)
/// result: fail                                   (cutback)
/// pass: 001, fail: 001                           (otherwise)
/// ```
pub fn format_summary(config: &RunConfiguration, stats: &TestStats) -> String {
    let body = match config.output_mode() {
        OutputMode::Cutback => {
            format!("result: {}", if stats.has_failures() { "fail" } else { "pass" })
        }
        OutputMode::Verbose => format!(
            "pass: {:03}, fail: {:03}, skip: {:03}, total: {:03}",
            stats.passed, stats.failed, stats.ignored, stats.total
        ),
        OutputMode::VerboseCutback | OutputMode::Default => {
            format!("pass: {:03}, fail: {:03}", stats.passed, stats.failed)
        }
    };
    format!(
        "{}{}\n",
        paint(config, "[Xtest report system]\n", HEADER_COLOR),
        body
    )
}

/// Renders the notice printed when a dry run starts.
pub fn format_dry_run_notice(config: &RunConfiguration) -> String {
    paint(config, &format!("{}\n", t!("dry_run_notice")), HEADER_COLOR)
}
