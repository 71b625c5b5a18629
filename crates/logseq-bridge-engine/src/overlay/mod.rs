//! # Editor Overlays
//!
//! Extra tokenization passes layered over the host editor's base
//! highlighter. The host calls an overlay repeatedly for one line with a
//! [`LineCursor`]; each call consumes some text and may return a style tag.
//!
//! ## Modules
//!
//! - **`cursor`**: `LineCursor`, the explicit scanner with match-and-advance
//! - **`heading`**: `HeadingOverlay` for `- ## Title` bullet headings
//! - **`span`**: byte ranges within a line

pub mod cursor;
pub mod heading;
pub mod span;

pub use cursor::LineCursor;
pub use heading::{HeadingLevel, HeadingOverlay, HeadingToken, OverlayMode};
pub use span::Span;

/// Line-tokenize hook: an overlay the host runs on every visible line.
pub trait LineOverlay: Send + Sync {
    /// Overlays with a higher priority are applied on top of lower ones.
    fn priority(&self) -> i32;

    /// Consumes text at the cursor and returns a style tag, or `None` to
    /// leave the consumed text to the base tokenizer.
    fn token(&self, cursor: &mut LineCursor<'_>) -> Option<String>;
}

/// Runs `overlay` over a whole line, collecting the tagged spans.
pub fn tokenize_line(overlay: &dyn LineOverlay, line: &str) -> Vec<(Span, String)> {
    let mut cursor = LineCursor::new(line);
    let mut tokens = Vec::new();
    while !cursor.eol() {
        let start = cursor.pos();
        let token = overlay.token(&mut cursor);
        if cursor.pos() == start {
            // An overlay that consumes nothing would stall the line.
            cursor.next_char();
            continue;
        }
        if let Some(style) = token {
            tokens.push((cursor.span_from(start), style));
        }
    }
    tokens
}
