//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for xtest: the output sink the
//! report is written through and the diagnostics (tracing) setup.
//!
//! 此模块为 xtest 提供基础设施服务：报告写入所用的输出通道，
//! 以及诊断日志（tracing）的初始化。

pub mod logging;
pub mod output;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
