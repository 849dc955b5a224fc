//! Code sinks for generated source.
//!
//! Generators never build strings directly; they append lines to a
//! [`CodeSink`], which owns indentation. This keeps every aspect's output
//! consistently indented no matter where the caller splices it.

use std::fmt::{self, Write as FmtWrite};

/// Append-only, indentation-aware destination for generated lines
pub trait CodeSink {
    /// Writes one line at the current indentation. Empty lines carry no
    /// trailing whitespace.
    fn write_line(&mut self, line: &str) -> fmt::Result;

    /// Increases the indentation of subsequent lines
    fn indent(&mut self);

    /// Decreases the indentation of subsequent lines
    fn outdent(&mut self);
}

/// [`CodeSink`] over any [`fmt::Write`]
#[derive(Debug)]
pub struct CodeWriter<W: FmtWrite> {
    writer: W,
    indent_str: String,
    indent_level: usize,
}

impl CodeWriter<String> {
    /// Creates a writer collecting into a `String`
    pub fn new(indent_str: impl Into<String>) -> Self {
        Self::with_writer(String::new(), indent_str)
    }
}

impl<W: FmtWrite> CodeWriter<W> {
    /// Creates a writer over `writer`
    pub fn with_writer(writer: W, indent_str: impl Into<String>) -> Self {
        Self {
            writer,
            indent_str: indent_str.into(),
            indent_level: 0,
        }
    }

    /// Current indentation depth
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Consumes the writer, returning what was written
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_indent(&mut self) -> fmt::Result {
        for _ in 0..self.indent_level {
            write!(self.writer, "{}", self.indent_str)?;
        }
        Ok(())
    }
}

impl<W: FmtWrite> CodeSink for CodeWriter<W> {
    fn write_line(&mut self, line: &str) -> fmt::Result {
        if !line.is_empty() {
            self.write_indent()?;
        }
        writeln!(self.writer, "{line}")
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn outdent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }
}
