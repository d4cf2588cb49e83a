//! # Run Configuration / 运行配置
//!
//! Resolves the immutable [`RunConfiguration`] for a run from the command line and
//! the optional `xtest_config.ini` file. Resolution order is defaults, then
//! command-line flags, then config-file keys.
//!
//! 从命令行和可选的 `xtest_config.ini` 文件解析不可变的 [`RunConfiguration`]。
//! 解析顺序为：默认值、命令行参数、配置文件键值。

use clap::Command;
use clap::error::ErrorKind;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::cli::build_cli;
use crate::core::error::{CONFIG_FILE_NAME, UsageError};

/// Smallest accepted repeat count.
pub const MIN_REPEAT: u32 = 1;
/// Largest accepted repeat count.
pub const MAX_REPEAT: u32 = 100;

/// Behavior flags for a whole run. Created once at session start and only read
/// afterwards.
/// 整个运行过程的行为标志。在会话开始时创建一次，之后只读。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfiguration {
    /// Compact output: one glyph per check.
    /// 精简输出：每个检查一个符号。
    pub cutback: bool,
    /// Detailed output with banners.
    /// 带横幅的详细输出。
    pub verbose: bool,
    /// Wrap output segments in terminal colors. Escape codes are written
    /// whether or not stdout is a terminal.
    /// 使用终端颜色包装输出片段。
    pub colored: bool,
    /// Skip every case but still complete the session lifecycle.
    /// 跳过所有用例，但仍完成会话生命周期。
    pub dry_run: bool,
    /// Ignore benchmark cases.
    /// 忽略基准测试用例。
    pub only_tests: bool,
    /// Ignore unit test cases.
    /// 忽略单元测试用例。
    pub only_benchmarks: bool,
    /// How many times each case body runs, in `1..=100`.
    /// 每个用例主体运行的次数，范围为 `1..=100`。
    pub repeat_count: u32,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            cutback: false,
            verbose: false,
            colored: false,
            dry_run: false,
            only_tests: false,
            only_benchmarks: false,
            repeat_count: MIN_REPEAT,
        }
    }
}

/// The four rendering modes spanned by `verbose` and `cutback`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `verbose` only.
    Verbose,
    /// `cutback` only.
    Cutback,
    /// Both `verbose` and `cutback`.
    VerboseCutback,
    /// Neither flag.
    Default,
}

impl RunConfiguration {
    /// Returns the rendering mode selected by the `verbose`/`cutback` pair.
    pub fn output_mode(&self) -> OutputMode {
        match (self.verbose, self.cutback) {
            (true, false) => OutputMode::Verbose,
            (false, true) => OutputMode::Cutback,
            (true, true) => OutputMode::VerboseCutback,
            (false, false) => OutputMode::Default,
        }
    }

    /// Enforces the configuration invariants: requesting both filters means
    /// running everything, and the repeat count stays within bounds.
    pub fn normalized(mut self) -> Self {
        if self.only_tests && self.only_benchmarks {
            self.only_tests = false;
            self.only_benchmarks = false;
        }
        self.repeat_count = self.repeat_count.clamp(MIN_REPEAT, MAX_REPEAT);
        self
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Run the registered cases with this configuration.
    Run(RunConfiguration),
    /// `--help` was given; the rendered help text.
    Help(String),
    /// `--version` was given; the version string.
    Version(String),
}

/// Resolves the run configuration from `args` (program name first), reading
/// `xtest_config.ini` from the current directory when `--config` names it.
///
/// Arguments the parser does not know are skipped, so a harness-less bench
/// binary started with `--bench` still runs.
///
/// # Errors
/// Returns a [`UsageError`] for a flag missing its value, an out-of-range repeat
/// count, a wrongly named config file, or a config file that cannot be read.
pub fn resolve<I, T>(args: I) -> Result<Resolution, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    resolve_in(args, Path::new("."))
}

/// Same as [`resolve`], looking for the config file inside `dir`.
/// 与 [`resolve`] 相同，但在 `dir` 目录中查找配置文件。
pub fn resolve_in<I, T>(args: I, dir: &Path) -> Result<Resolution, UsageError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut cmd = build_cli();
    cmd.build();
    let (known, skipped) = partition_args(&cmd, args);
    if !skipped.is_empty() {
        debug!(?skipped, "skipping unrecognized arguments");
    }

    let matches = match cmd.try_get_matches_from(known) {
        Ok(matches) => matches,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp => Ok(Resolution::Help(e.render().to_string())),
                ErrorKind::DisplayVersion => {
                    Ok(Resolution::Version(env!("CARGO_PKG_VERSION").to_string()))
                }
                _ => Err(UsageError::InvalidArguments {
                    message: e.render().to_string().trim_end().to_string(),
                }),
            };
        }
    };

    let mut config = RunConfiguration {
        cutback: matches.get_flag("cutback"),
        verbose: matches.get_flag("verbose"),
        colored: matches.get_flag("colored"),
        dry_run: matches.get_flag("dry-run"),
        only_tests: matches.get_flag("only-test"),
        only_benchmarks: matches.get_flag("only-mark"),
        repeat_count: MIN_REPEAT,
    };

    if let Some(value) = matches.get_one::<String>("repeat") {
        config.repeat_count = parse_repeat(value)?;
    }

    if let Some(name) = matches.get_one::<String>("config") {
        if name != CONFIG_FILE_NAME {
            return Err(UsageError::ConfigName {
                given: name.clone(),
            });
        }
        let path = dir.join(name);
        let text = fs::read_to_string(&path).map_err(|source| UsageError::ConfigUnreadable {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "applying config file");
        apply_config_text(&mut config, &text)?;
    }

    let config = config.normalized();
    debug!(?config, "run configuration resolved");
    Ok(Resolution::Run(config))
}

/// Separates the arguments `cmd` understands from the ones it does not. The
/// program name is always kept, and a flag that takes a value keeps the
/// argument after it, whatever that looks like.
fn partition_args<I, T>(cmd: &Command, args: I) -> (Vec<OsString>, Vec<OsString>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut args = args.into_iter().map(Into::<OsString>::into);
    let mut known: Vec<OsString> = args.next().into_iter().collect();
    let mut skipped = Vec::new();

    while let Some(arg) = args.next() {
        match recognized(cmd, &arg) {
            Some(takes_value) => {
                known.push(arg);
                if takes_value {
                    known.extend(args.next());
                }
            }
            None => skipped.push(arg),
        }
    }
    (known, skipped)
}

/// `Some(takes_separate_value)` when `arg` names one of `cmd`'s flags.
fn recognized(cmd: &Command, arg: &OsStr) -> Option<bool> {
    let text = arg.to_str()?;
    let (flag, inline_value) = if let Some(long) = text.strip_prefix("--") {
        let (name, inline_value) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        (cmd.get_arguments().find(|a| a.get_long() == Some(name))?, inline_value)
    } else {
        let mut chars = text.strip_prefix('-')?.chars();
        let short = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        (cmd.get_arguments().find(|a| a.get_short() == Some(short))?, false)
    };
    Some(!inline_value && flag.get_action().takes_values())
}

/// Applies `key=value` lines from a config file on top of `config`.
///
/// Booleans are enabled only by the literal `true`. Lines without `=` or with an
/// empty key or value are skipped, and unknown keys are ignored. `repeat` is
/// accepted but the iteration count only comes from `iter_repeat`.
///
/// 将配置文件中的 `key=value` 行应用到 `config` 上。
/// 只有字面量 `true` 才会启用布尔值；没有 `=`、键或值为空的行会被跳过，未知键会被忽略。
pub fn apply_config_text(config: &mut RunConfiguration, text: &str) -> Result<(), UsageError> {
    for line in text.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }

        let enabled = value == "true";
        match key {
            "cutback" => config.cutback = enabled,
            "verbose" => config.verbose = enabled,
            "colored" => config.colored = enabled,
            "dry_run" => config.dry_run = enabled,
            "only_mark" => config.only_benchmarks = enabled,
            "only_test" => config.only_tests = enabled,
            "repeat" => debug!(enabled, "repeat key does not change the iteration count"),
            "iter_repeat" => config.repeat_count = parse_repeat(value)?,
            other => debug!(key = other, "ignoring unknown config key"),
        }
    }
    Ok(())
}

/// Parses a repeat count and checks it against `MIN_REPEAT..=MAX_REPEAT`.
pub fn parse_repeat(value: &str) -> Result<u32, UsageError> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|count| (MIN_REPEAT..=MAX_REPEAT).contains(count))
        .ok_or_else(|| UsageError::RepeatOutOfRange {
            value: value.to_string(),
        })
}
