//! # xtest Library / xtest 库
//!
//! This library provides a minimal unit-test and benchmark execution engine:
//! explicit case registration, fixtures, repeated runs, sticky assertions and
//! last-write expectations, and a console report whose shape is driven by the
//! run configuration.
//!
//! 此库提供一个最小化的单元测试与基准测试执行引擎：
//! 显式注册用例、夹具、重复运行、粘性断言与“最后写入”期望，
//! 以及由运行配置决定格式的控制台报告。
//!
//! ## Modules / 模块
//!
//! - `core` - Run configuration, latches, execution and the run session
//! - `infra` - Output sink and diagnostics setup
//! - `reporting` - Console formatting of case, check and summary events
//! - `cli` - Command-line interface and the process entry point
//!
//! - `core` - 运行配置、锁存器、执行逻辑与运行会话
//! - `infra` - 输出通道与诊断日志初始化
//! - `reporting` - 用例、检查与摘要事件的控制台格式化
//! - `cli` - 命令行接口与进程入口
//!
//! ## Example / 示例
//!
//! ```no_run
//! use xtest::{Registry, TestFixture};
//! use std::process::ExitCode;
//! use std::rc::Rc;
//!
//! fn main() -> ExitCode {
//!     xtest::init();
//!     let fixture = Rc::new(TestFixture::new("numbers").setup(|| println!("setup")));
//!     let registry = Registry::new()
//!         .test("adds", |t| {
//!             t.assert_eq(2 + 2, 4, "addition works");
//!         })
//!         .test_with_fixture("divides", fixture, |t| {
//!             t.expect(10 / 2 == 5, "division works");
//!         });
//!     xtest::cli::run(std::env::args_os(), registry)
//! }
//! ```

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config::{self, Resolution, RunConfiguration};
pub use crate::core::error::UsageError;
pub use crate::core::execution::{Checker, Executor};
pub use crate::core::models::{CaseKind, Outcome, TestCase, TestFixture, TestStats};
pub use crate::core::registry::Registry;
pub use crate::core::session::{RunSummary, Session};

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for help texts and notices. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    let lang = if available_locales.contains(&locale.as_str()) {
        locale.as_str()
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
