/// A byte range `[start, end)` within one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// The covered slice of `line`, or `""` if the span does not fit it.
    pub fn slice(self, line: &str) -> &str {
        line.get(self.start..self.end).unwrap_or_default()
    }
}
