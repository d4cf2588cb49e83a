//! # Usage Errors / 用法错误
//!
//! Errors raised while resolving the run configuration. They are returned to the
//! caller instead of terminating the process, so the CLI decides how to exit.
//!
//! 解析运行配置时产生的错误。它们会返回给调用者而不是直接终止进程，
//! 由命令行入口决定如何退出。

use std::io;
use std::path::PathBuf;

/// The only file name accepted by `--config`.
pub const CONFIG_FILE_NAME: &str = "xtest_config.ini";

/// Exit status used when the command line or the config file is invalid.
pub const USAGE_EXIT_CODE: u8 = 1;

/// A fatal configuration problem detected before any test case runs.
#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    /// Rejected by the argument parser (unknown flag, flag missing its value, ...).
    #[error("{message}")]
    InvalidArguments { message: String },

    /// `--repeat` or `iter_repeat` outside `1..=100` or not a number.
    #[error("--repeat value must be between 1 and 100, got '{value}'")]
    RepeatOutOfRange { value: String },

    /// `--config` named something other than [`CONFIG_FILE_NAME`].
    #[error("configuration file must be named 'xtest_config.ini', got '{given}'")]
    ConfigName { given: String },

    /// The config file has the right name but could not be read.
    #[error("could not open config file '{}'", path.display())]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl UsageError {
    /// The process exit status that corresponds to this error.
    pub fn exit_code(&self) -> u8 {
        USAGE_EXIT_CODE
    }
}
