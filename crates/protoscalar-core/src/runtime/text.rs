//! Text-format printing and parsing of extended fields.
//!
//! Extended values appear in text format as quoted canonical text:
//!
//! ```text
//! created_at: "2023-10-05T00:00:00.0000000Z"
//! price: "123.456"
//! ```

use crate::error::{Error, FormatError, TextPosition};
use crate::ExtendedScalar;
use std::fmt::{self, Write};

/// Escape a string for a quoted text-format literal
pub fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            _ if c.is_ascii_control() => {
                result.push_str(&format!("\\x{:02x}", c as u8));
            }
            _ => result.push(c),
        }
    }
    result
}

/// Writes `name: "value"` lines for message fields.
#[derive(Debug)]
pub struct TextPrinter<W: Write> {
    writer: W,
    indent_str: String,
    indent_level: usize,
}

impl<W: Write> TextPrinter<W> {
    /// Creates a printer indenting nested messages with two spaces
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            indent_str: "  ".to_string(),
            indent_level: 0,
        }
    }

    /// Consumes the printer, returning the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Opens a nested message block
    pub fn begin_message(&mut self, name: &str) -> fmt::Result {
        self.write_indent()?;
        writeln!(self.writer, "{name} {{")?;
        self.indent_level += 1;
        Ok(())
    }

    /// Closes the innermost nested message block
    pub fn end_message(&mut self) -> fmt::Result {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.write_indent()?;
        writeln!(self.writer, "}}")
    }

    fn write_indent(&mut self) -> fmt::Result {
        for _ in 0..self.indent_level {
            write!(self.writer, "{}", self.indent_str)?;
        }
        Ok(())
    }

    /// Prints a raw string field
    pub fn print_text(&mut self, name: &str, text: &str) -> fmt::Result {
        self.write_indent()?;
        writeln!(self.writer, "{name}: \"{}\"", escape_string(text))
    }

    /// Prints a singular extended field, if it is present
    pub fn print_field<T: ExtendedScalar>(
        &mut self,
        name: &str,
        present: bool,
        value: &T,
    ) -> fmt::Result {
        if present {
            self.print_text(name, &value.to_canonical_text())?;
        }
        Ok(())
    }

    /// Prints one line per element of a repeated extended field
    pub fn print_repeated<T: ExtendedScalar>(&mut self, name: &str, values: &[T]) -> fmt::Result {
        for value in values {
            self.print_text(name, &value.to_canonical_text())?;
        }
        Ok(())
    }
}

/// The tokenizer operations extended-field parsing needs
pub trait TextTokenizer {
    /// Consumes `token` or fails
    fn consume(&mut self, token: &str) -> Result<(), FormatError>;

    /// Consumes a quoted string literal and returns its unescaped contents
    fn consume_string(&mut self) -> Result<String, FormatError>;

    /// Position of the next token
    fn position(&self) -> TextPosition;
}

/// Parses `: "<canonical text>"` into an extended value.
///
/// Failures carry the position of the string token.
pub fn parse_field_value<T, K>(tokenizer: &mut K) -> Result<T, Error>
where
    T: ExtendedScalar,
    K: TextTokenizer + ?Sized,
{
    tokenizer.consume(":")?;
    let position = tokenizer.position();
    let text = tokenizer.consume_string()?;
    T::parse_canonical_text(&text).map_err(|e| Error::Format(e.at(position)))
}

/// A minimal text-format tokenizer over a string.
///
/// Whitespace and `#` comments between tokens are skipped, so
/// [`position`](TextTokenizer::position) always points at the next token.
#[derive(Debug, Clone)]
pub struct TextCursor<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> TextCursor<'a> {
    /// Creates a cursor at the first token of `input`
    pub fn new(input: &'a str) -> Self {
        let mut cursor = Self {
            input,
            offset: 0,
            line: 1,
            column: 1,
        };
        cursor.skip_whitespace();
        cursor
    }

    /// Whether all tokens have been consumed
    pub fn at_end(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Consumes a field name
    pub fn consume_identifier(&mut self) -> Result<&'a str, FormatError> {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.unexpected("expected a field name"));
        }
        let identifier = &rest[..len];
        self.advance(len);
        self.skip_whitespace();
        Ok(identifier)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    fn advance(&mut self, bytes: usize) {
        for c in self.input[self.offset..self.offset + bytes].chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += bytes;
    }

    fn skip_whitespace(&mut self) {
        loop {
            let rest = self.rest();
            let trimmed = rest.trim_start();
            if trimmed.len() != rest.len() {
                self.advance(rest.len() - trimmed.len());
            } else if trimmed.starts_with('#') {
                let comment = trimmed.find('\n').unwrap_or(trimmed.len());
                self.advance(comment);
            } else {
                break;
            }
        }
    }

    fn unexpected(&self, reason: &str) -> FormatError {
        let found: String = self.rest().chars().take(16).collect();
        FormatError::new(found, reason).at(self.position())
    }
}

impl TextTokenizer for TextCursor<'_> {
    fn consume(&mut self, token: &str) -> Result<(), FormatError> {
        if !self.rest().starts_with(token) {
            return Err(self.unexpected(&format!("expected `{token}`")));
        }
        self.advance(token.len());
        self.skip_whitespace();
        Ok(())
    }

    fn consume_string(&mut self) -> Result<String, FormatError> {
        let start = self.position();
        let rest = self.rest();
        let quote = match rest.chars().next() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.unexpected("expected a string literal")),
        };

        let mut value = String::new();
        let mut chars = rest.char_indices().skip(1);
        while let Some((i, c)) = chars.next() {
            match c {
                c if c == quote => {
                    self.advance(i + c.len_utf8());
                    self.skip_whitespace();
                    return Ok(value);
                }
                '\n' => break,
                '\\' => match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, 'x')) => {
                        let hex: String = chars.by_ref().take(2).map(|(_, c)| c).collect();
                        let byte = u8::from_str_radix(&hex, 16).map_err(|_| {
                            FormatError::new(format!("\\x{hex}"), "invalid hex escape").at(start)
                        })?;
                        value.push(char::from(byte));
                    }
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                c => value.push(c),
            }
        }
        Err(FormatError::new(rest.lines().next().unwrap_or(rest), "unterminated string").at(start))
    }

    fn position(&self) -> TextPosition {
        TextPosition {
            line: self.line,
            column: self.column,
        }
    }
}
