//! Line-oriented cursor over scene text.
//!
//! The format is fixed field order, `Key: value[, value...]` lines,
//! component blocks bracketed by `{`/`}`, records terminated by `###`.

use crate::object::ParseError;

/// Record terminator line.
pub(crate) const RECORD_END: &str = "###";

/// Cursor over the lines of a scene file. Blank lines are skipped;
/// every yielded line arrives trimmed.
pub(crate) struct LineCursor<'a> {
    lines: std::str::Lines<'a>,
    peeked: Option<&'a str>,
    line_no: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            peeked: None,
            line_no: 0,
        }
    }

    /// 1-based number of the most recently consumed line, for logs.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Next non-blank line, trimmed.
    pub fn next_line(&mut self) -> Option<&'a str> {
        if let Some(line) = self.peeked.take() {
            return Some(line);
        }
        for line in self.lines.by_ref() {
            self.line_no += 1;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Some(trimmed);
            }
        }
        None
    }

    /// Peek the next non-blank line without consuming it.
    pub fn peek_line(&mut self) -> Option<&'a str> {
        if self.peeked.is_none() {
            self.peeked = self.next_line();
        }
        self.peeked
    }

    /// Whether the cursor has run out of lines.
    pub fn at_end(&mut self) -> bool {
        self.peek_line().is_none()
    }

    /// Consume the next line as `Key: value`, splitting on the first
    /// colon so values keep interior colons.
    pub fn next_kv(&mut self) -> Result<(&'a str, &'a str), ParseError> {
        let line = self.next_line().ok_or(ParseError::UnexpectedEnd)?;
        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedLine(line.to_owned()))?;
        Ok((key.trim(), value.trim()))
    }

    /// Consume a `Key: value` line whose key must match `expected`.
    pub fn expect_key(&mut self, expected: &str) -> Result<&'a str, ParseError> {
        let (key, value) = self.next_kv()?;
        if key != expected {
            return Err(ParseError::MissingField(expected.to_owned()));
        }
        Ok(value)
    }

    /// Consume lines up to and including the next record terminator,
    /// recovering after a broken record.
    pub fn skip_record(&mut self) {
        while let Some(line) = self.next_line() {
            if line == RECORD_END {
                break;
            }
        }
    }
}
