//! Line-buffered standard streams
//!
//! Formatted output is appended to an [`OutputBuffer`] and only reaches the
//! host at line granularity: a flush hands every complete line to the stream's
//! [`OutputSink`] and keeps the trailing partial line for later.

use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Receiver of complete output lines
///
/// Lines arrive without their trailing newline; the sink decides how to
/// terminate them.
pub trait OutputSink {
    fn emit_line(&mut self, line: &str);
}

/// Writes lines to the process stdout
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit_line(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Writes lines to the process stderr
#[derive(Debug, Default)]
pub struct StderrSink;

impl OutputSink for StderrSink {
    fn emit_line(&mut self, line: &str) {
        eprintln!("{}", line);
    }
}

/// Sink capturing lines in memory
///
/// Clones share the same line list, so one handle can be given to the runtime
/// and another kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput {
    lines: Rc<RefCell<Vec<String>>>,
}

impl CapturedOutput {
    pub fn new() -> Self {
        CapturedOutput::default()
    }

    /// Get all lines emitted so far
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Get all lines joined with newlines
    pub fn joined(&self) -> String {
        self.lines.borrow().join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl OutputSink for CapturedOutput {
    fn emit_line(&mut self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

/// Pending output of one stream
pub struct OutputBuffer {
    name: &'static str,
    pending: String,
    sink: Box<dyn OutputSink>,
    lines_emitted: usize,
}

impl OutputBuffer {
    pub fn new(name: &'static str, sink: Box<dyn OutputSink>) -> Self {
        OutputBuffer {
            name,
            pending: String::new(),
            sink,
            lines_emitted: 0,
        }
    }

    /// Append text without flushing
    pub fn push_str(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    /// Append formatted text, then flush
    pub fn write_formatted(&mut self, text: &str) {
        self.push_str(text);
        self.flush();
    }

    /// Append one character; flushes only on newline
    pub fn write_char(&mut self, c: char) {
        self.pending.push(c);
        if c == '\n' {
            self.flush();
        }
    }

    /// Emit every complete line and keep the trailing remainder
    pub fn flush(&mut self) {
        let Some(last_newline) = self.pending.rfind('\n') else {
            return;
        };

        let remainder = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, remainder);

        let mut count = 0;
        for line in complete[..last_newline].split('\n') {
            self.sink.emit_line(line);
            count += 1;
        }
        self.lines_emitted += count;
        debug!(stream = self.name, lines = count, held = self.pending.len(), "flush");
    }

    /// Flush, then emit a held partial line if there is one
    pub fn finish(&mut self) {
        self.flush();
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.sink.emit_line(&line);
            self.lines_emitted += 1;
            debug!(stream = self.name, "emitted partial line at shutdown");
        }
    }

    /// Text written but not yet emitted
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Number of lines handed to the sink
    pub fn lines_emitted(&self) -> usize {
        self.lines_emitted
    }
}
