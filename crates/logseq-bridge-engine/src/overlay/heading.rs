use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::LineOverlay;
use super::cursor::LineCursor;

/// Bullet-heading marker: optional indent, `- `, one to five `#`, a space.
///
/// The `#` run must be followed by a space, so a run of six never matches
/// and each line matches at most one level.
static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*- (#{1,5}) ").expect("marker pattern is valid"));

/// The marker plus the rest of the line.
static FULL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*- (#{1,5}) .*").expect("heading pattern is valid"));

/// Heading level of a bullet heading, 1 through 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&level).then_some(Self(level))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// Which part of a heading line an overlay tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayMode {
    /// The whole line, marker included.
    FullLine,
    /// Only the `- ## ` marker; the content is left to the base tokenizer.
    Marker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingToken {
    pub level: HeadingLevel,
    pub mode: OverlayMode,
}

impl HeadingToken {
    /// Editor style tag, `header-N` or `formatting-header-N`.
    pub fn style(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HeadingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            OverlayMode::FullLine => write!(f, "header-{}", self.level.get()),
            OverlayMode::Marker => write!(f, "formatting-header-{}", self.level.get()),
        }
    }
}

/// Tags bullet headings (`- ### Title`) in the source editor.
///
/// Two instances run side by side: the full-line overlay styles the heading
/// text and the marker overlay, at a higher priority, styles the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingOverlay {
    mode: OverlayMode,
}

impl HeadingOverlay {
    pub fn new(mode: OverlayMode) -> Self {
        Self { mode }
    }

    pub fn full_line() -> Self {
        Self::new(OverlayMode::FullLine)
    }

    pub fn marker() -> Self {
        Self::new(OverlayMode::Marker)
    }

    /// Consumes a heading at the cursor and returns its token. Anything else
    /// consumes the rest of the line and returns `None`.
    pub fn next_token(&self, cursor: &mut LineCursor<'_>) -> Option<HeadingToken> {
        let pattern = match self.mode {
            OverlayMode::FullLine => &*FULL_LINE,
            OverlayMode::Marker => &*MARKER,
        };
        let Some(caps) = cursor.match_and_advance(pattern) else {
            cursor.skip_to_end();
            return None;
        };
        let hashes = caps.get(1).map_or(0, |m| m.len());
        let level = u8::try_from(hashes).ok().and_then(HeadingLevel::new)?;
        Some(HeadingToken {
            level,
            mode: self.mode,
        })
    }
}

impl LineOverlay for HeadingOverlay {
    fn priority(&self) -> i32 {
        match self.mode {
            OverlayMode::FullLine => 0,
            OverlayMode::Marker => 1,
        }
    }

    fn token(&self, cursor: &mut LineCursor<'_>) -> Option<String> {
        self.next_token(cursor).map(HeadingToken::style)
    }
}
