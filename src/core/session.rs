//! # Run Session / 运行会话
//!
//! A session owns everything that lives for one run: the configuration, the two
//! latches, the statistics and the output. Its lifecycle is
//! `start → (run)* → end`; `end` prints the report and yields the exit status.
//!
//! 会话拥有一次运行期间的所有状态：配置、两个锁存器、统计数据以及输出。
//! 其生命周期为 `start → (run)* → end`；`end` 打印报告并给出退出状态。

use std::io::{self, Write};
use std::process::ExitCode;
use tracing::info;

use crate::core::config::RunConfiguration;
use crate::core::execution::Executor;
use crate::core::models::{IgnoreCause, IgnoreRequest, Outcome, TestCase, TestStats};
use crate::core::registry::Registry;
use crate::core::tracker::Tracker;
use crate::infra::output::{Output, Sink};
use crate::reporting::console;

/// The result of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub stats: TestStats,
    pub dry_run: bool,
}

impl RunSummary {
    /// Number of failed cases; zero means success.
    pub fn exit_status(&self) -> u32 {
        self.stats.exit_status()
    }

    /// The exit status as a process exit code, saturated at 255 so a large
    /// failure count never wraps around to success.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(u8::try_from(self.exit_status()).unwrap_or(u8::MAX))
    }
}

/// One run of registered cases.
/// 一次对已注册用例的运行。
#[derive(Debug)]
pub struct Session<W: Write> {
    config: RunConfiguration,
    tracker: Tracker,
    stats: TestStats,
    output: Output<W>,
    pending_ignore: Option<IgnoreRequest>,
}

impl<W: Write> Session<W> {
    /// Starts a session writing its report to `writer`. In a dry run the
    /// simulation notice is printed immediately.
    pub fn start(config: RunConfiguration, writer: W) -> Self {
        let config = config.normalized();

        let mut output = Output::new(writer);
        if config.dry_run {
            output.emit(&console::format_dry_run_notice(&config));
        }
        info!(?config, "session started");

        Self {
            config,
            tracker: Tracker::new(),
            stats: TestStats::default(),
            output,
            pending_ignore: None,
        }
    }

    pub fn config(&self) -> &RunConfiguration {
        &self.config
    }

    /// Snapshot of the counters so far.
    pub fn stats(&self) -> TestStats {
        self.stats
    }

    /// Skips the next case that is run, printing the ignore notice right away.
    #[track_caller]
    pub fn ignore_next(&mut self, reason: impl Into<String>) {
        let request = IgnoreRequest::new(reason);
        let cause = IgnoreCause::Requested(request.clone());
        self.output
            .emit(&console::format_ignore(&self.config, &cause, "session"));
        self.pending_ignore = Some(request);
    }

    /// Runs one case. In a dry run nothing is executed or counted.
    pub fn run(&mut self, case: &mut TestCase) -> Outcome {
        if self.config.dry_run {
            return Outcome::NotRun;
        }
        Executor::new(
            &self.config,
            &mut self.tracker,
            &mut self.stats,
            &mut self.output,
            &mut self.pending_ignore,
        )
        .execute(case)
    }

    /// Runs every registered case in registration order.
    pub fn run_registry(&mut self, registry: &mut Registry) -> Vec<Outcome> {
        registry
            .cases_mut()
            .iter_mut()
            .map(|case| self.run(case))
            .collect()
    }

    /// Prints the final report and returns the summary.
    ///
    /// # Errors
    /// Returns the first error hit while writing any part of the report.
    pub fn end(mut self) -> io::Result<RunSummary> {
        let summary = RunSummary {
            stats: self.stats,
            dry_run: self.config.dry_run,
        };
        self.output
            .emit(&console::format_summary(&self.config, &self.stats));
        self.output.finish()?;
        info!(
            passed = summary.stats.passed,
            failed = summary.stats.failed,
            ignored = summary.stats.ignored,
            "session finished"
        );
        Ok(summary)
    }
}
