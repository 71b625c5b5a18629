use std::sync::LazyLock;

use regex::Regex;

/// Org-mode style admonition block keyword.
///
/// Each kind owns its `#+BEGIN_`/`#+END_` delimiters; nothing else in the
/// crate spells them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmonitionKind {
    Warning,
    Important,
    Quote,
    Caution,
}

impl AdmonitionKind {
    pub const ALL: [AdmonitionKind; 4] = [
        AdmonitionKind::Warning,
        AdmonitionKind::Important,
        AdmonitionKind::Quote,
        AdmonitionKind::Caution,
    ];

    pub const BEGIN_PREFIX: &'static str = "#+BEGIN_";
    pub const END_PREFIX: &'static str = "#+END_";

    pub fn keyword(self) -> &'static str {
        match self {
            AdmonitionKind::Warning => "WARNING",
            AdmonitionKind::Important => "IMPORTANT",
            AdmonitionKind::Quote => "QUOTE",
            AdmonitionKind::Caution => "CAUTION",
        }
    }

    pub fn begin_token(self) -> String {
        format!("{}{}", Self::BEGIN_PREFIX, self.keyword())
    }

    pub fn end_token(self) -> String {
        format!("{}{}", Self::END_PREFIX, self.keyword())
    }
}

/// Markup substituted for a BEGIN delimiter: a blockquote plus a pointing glyph.
pub const BLOCK_OPEN: &str = "<blockquote> &#9759;";
/// Markup substituted for an END delimiter.
pub const BLOCK_CLOSE: &str = "</blockquote>";

fn delimiter_regex(prefix: &str) -> Regex {
    let keywords: Vec<&str> = AdmonitionKind::ALL.iter().map(|k| k.keyword()).collect();
    let pattern = format!("{}(?:{})", regex::escape(prefix), keywords.join("|"));
    Regex::new(&pattern).expect("delimiter pattern is valid")
}

static BEGIN: LazyLock<Regex> = LazyLock::new(|| delimiter_regex(AdmonitionKind::BEGIN_PREFIX));
static END: LazyLock<Regex> = LazyLock::new(|| delimiter_regex(AdmonitionKind::END_PREFIX));

/// True if `markup` contains a BEGIN delimiter for any supported keyword.
pub fn is_block(markup: &str) -> bool {
    BEGIN.is_match(markup)
}

/// Rewrites the first BEGIN and the first END delimiter into blockquote tags.
///
/// The END delimiter is not required to name the same keyword as the BEGIN
/// one. Missing delimiters are simply left out of the rewrite.
pub fn rewrite_block(markup: &str) -> String {
    let opened = BEGIN.replace(markup, BLOCK_OPEN);
    END.replace(&opened, BLOCK_CLOSE).into_owned()
}
