//! # Reporting Module / 报告模块
//!
//! This module renders run events (case start/end, individual checks, ignores and
//! the final summary) as console text, optionally colored.
//!
//! 此模块将运行事件（用例开始/结束、单项检查、忽略以及最终摘要）
//! 渲染为控制台文本，可选彩色输出。

pub mod console;

// Re-export common reporting functions
pub use console::{
    format_case_end, format_case_start, format_check, format_dry_run_notice, format_ignore,
    format_summary,
};
