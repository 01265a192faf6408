//! Sink implementations.

use std::io::Write;

use parking_lot::Mutex;

use crate::error::SinkError;

/// A line-oriented output writer.
///
/// Implementations must be `Send + Sync` so one sink can back several
/// loggers.
pub trait TestOutput: Send + Sync {
    /// Write one line. The line carries no trailing newline.
    fn write_line(&self, line: &str) -> Result<(), SinkError>;
}

/// Sink that keeps every line in memory for later assertions.
#[derive(Debug, Default)]
pub struct CapturedOutput {
    lines: Mutex<Vec<String>>,
    closed: Mutex<bool>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the lines written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Drain the captured lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }

    /// Reject all further writes with [`SinkError::Closed`].
    pub fn close(&self) {
        *self.closed.lock() = true;
    }
}

impl TestOutput for CapturedOutput {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        if *self.closed.lock() {
            return Err(SinkError::Closed);
        }
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}

/// Sink that prints through `println!`.
///
/// The Rust test harness captures this per test and only shows it for
/// failing tests (or with `--nocapture`).
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutOutput;

impl TestOutput for StdoutOutput {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        println!("{}", line);
        Ok(())
    }
}

/// Sink over any `io::Write`, one `\n`-terminated write per line.
#[derive(Debug)]
pub struct WriterOutput<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> TestOutput for WriterOutput<W> {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
