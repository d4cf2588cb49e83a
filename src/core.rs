//! # Core Module / 核心模块
//!
//! This module contains the core functionality of xtest: the run configuration,
//! the assertion/expectation latches, the per-case executor and the run session.
//!
//! 此模块包含 xtest 的核心功能：运行配置、断言/期望锁存器、
//! 单个用例的执行器以及运行会话。

pub mod config;
pub mod error;
pub mod execution;
pub mod models;
pub mod planner;
pub mod registry;
pub mod session;
pub mod tracker;

// Re-exports
pub use config::RunConfiguration;
pub use models::{TestCase, TestStats};
pub use session::Session;
