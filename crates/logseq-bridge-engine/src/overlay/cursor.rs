use regex::{Captures, Regex};

use super::span::Span;

/// A single-pass scanner over one editor line.
///
/// Overlays advance it as they consume text; the host calls them again
/// until the cursor reaches the end of the line.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    line: &'a str,
    /// Current byte index into `line`, always on a char boundary.
    i: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { line, i: 0 }
    }

    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true once the whole line has been consumed.
    pub fn eol(&self) -> bool {
        self.i >= self.line.len()
    }

    /// The unconsumed remainder of the line.
    pub fn rest(&self) -> &'a str {
        &self.line[self.i..]
    }

    /// Matches `re` at the cursor and advances past the match.
    ///
    /// Matches that start later in the line, or are empty, do not count and
    /// leave the cursor where it was.
    pub fn match_and_advance(&mut self, re: &Regex) -> Option<Captures<'a>> {
        let caps = re.captures(self.rest())?;
        let whole = caps.get(0)?;
        if whole.start() != 0 || whole.is_empty() {
            return None;
        }
        self.i += whole.end();
        Some(caps)
    }

    /// Consumes the rest of the line.
    pub fn skip_to_end(&mut self) {
        self.i = self.line.len();
    }

    /// Advances by one char, returning it.
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.i += c.len_utf8();
        Some(c)
    }

    /// Span from `start` up to the cursor.
    pub fn span_from(&self, start: usize) -> Span {
        Span { start, end: self.i }
    }
}
