//! # Output Sink / 输出通道
//!
//! Every piece of report text goes through a [`Sink`]. [`Output`] adapts any
//! `io::Write` and keeps the first write error so the session can surface it at
//! the end of the run instead of interrupting a test body.
//!
//! 所有报告文本都通过 [`Sink`] 输出。[`Output`] 适配任意 `io::Write`，
//! 并保存第一个写入错误，以便会话在运行结束时报告它，而不会中断测试主体。

use std::io::{self, Write};
use tracing::warn;

/// Receives rendered report text.
pub trait Sink {
    fn emit(&mut self, text: &str);
}

impl Sink for String {
    fn emit(&mut self, text: &str) {
        self.push_str(text);
    }
}

/// A [`Sink`] over an `io::Write` that remembers the first failure.
#[derive(Debug)]
pub struct Output<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> Output<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Flushes the writer and returns the first error seen, if any.
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for Output<W> {
    fn emit(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.write_all(text.as_bytes()) {
            warn!(error = %e, "report output failed, dropping further output");
            self.error = Some(e);
        }
    }
}
