use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Keys whose value is a 13-digit millisecond timestamp.
pub const TIMESTAMP_KEYS: [&str; 5] = ["doing", "done", "todo", "later", "canceled"];

/// The line-break markup token removed alongside properties.
pub const LINE_BREAK: &str = "<br>";

/// One alternation covering every property shape: timestamp markers,
/// the `collapsed` flag and (case-insensitively) a v4-shaped block id.
static PROPERTY: LazyLock<Regex> = LazyLock::new(|| {
    let uuid = "[0-9A-F]{8}-[0-9A-F]{4}-4[0-9A-F]{3}-[89AB][0-9A-F]{3}-[0-9A-F]{12}";
    let pattern = format!(
        r"(?:{keys}):: [0-9]{{13}}|collapsed:: (?:true|false)|(?i:id:: {uuid})",
        keys = TIMESTAMP_KEYS.join("|"),
    );
    Regex::new(&pattern).expect("property pattern is valid")
});

/// Removes every `key:: value` property token, repeating until none is left.
///
/// Only the matched tokens go; surrounding whitespace and all other text
/// is preserved byte for byte.
pub fn strip_property_tokens(text: &str) -> String {
    let mut out = text.to_string();
    // Removing one token can splice its neighbours into a new one.
    while let Cow::Owned(next) = PROPERTY.replace_all(&out, "") {
        out = next;
    }
    out
}

/// Markup form: drops the first `<br>`, then every property token.
///
/// The line break goes first so that text it separated is checked as one.
pub fn strip_properties(markup: &str) -> String {
    strip_property_tokens(&markup.replacen(LINE_BREAK, "", 1))
}

/// True if `text` still carries at least one property token.
pub fn has_properties(text: &str) -> bool {
    PROPERTY.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn strips_timestamp_leaving_rest() {
        assert_eq!(strip_properties("todo:: 1234567890123 rest"), " rest");
    }

    #[rstest]
    #[case("doing:: 1700000000000")]
    #[case("done:: 1700000000000")]
    #[case("todo:: 1700000000000")]
    #[case("later:: 1700000000000")]
    #[case("canceled:: 1700000000000")]
    #[case("collapsed:: true")]
    #[case("collapsed:: false")]
    #[case("id:: 64b0c6a2-91f3-4d2e-8a1b-0c9d8e7f6a5b")]
    #[case("id:: 64B0C6A2-91F3-4D2E-BA1B-0C9D8E7F6A5B")]
    fn strips_each_property_shape(#[case] property: &str) {
        let text = format!("before {property} after");
        assert_eq!(strip_properties(&text), "before  after");
    }

    #[rstest]
    #[case("todo:: 123456789012")]
    #[case("todo: 1234567890123")]
    #[case("Todo:: 1234567890123")]
    #[case("collapsed:: maybe")]
    #[case("id:: 64b0c6a2-91f3-3d2e-8a1b-0c9d8e7f6a5b")]
    #[case("id:: 64b0c6a2-91f3-4d2e-7a1b-0c9d8e7f6a5b")]
    #[case("plain text with no metadata")]
    fn leaves_lookalikes_untouched(#[case] text: &str) {
        assert_eq!(strip_properties(text), text);
    }

    #[test]
    fn strips_many_occurrences() {
        let text = "a done:: 1700000000000 b collapsed:: true c todo:: 1600000000000";
        assert_eq!(strip_properties(text), "a  b  c ");
    }

    #[test]
    fn strips_only_first_line_break() {
        assert_eq!(strip_properties("one<br>two<br>three"), "onetwo<br>three");
    }

    #[test]
    fn token_split_by_line_break_is_removed() {
        let text = "todo:: 123456<br>7890123 rest";
        assert_eq!(strip_properties(text), " rest");
        assert_eq!(strip_properties(&strip_properties(text)), " rest");
    }

    #[test]
    fn token_stripping_leaves_line_breaks() {
        assert_eq!(
            strip_property_tokens("a <br> collapsed:: true<br>"),
            "a <br> <br>"
        );
    }

    #[test]
    fn spliced_tokens_are_removed_too() {
        let text = "todo:: done:: 17000000000001234567890123";
        let stripped = strip_properties(text);
        assert!(!has_properties(&stripped));
        assert_eq!(stripped, "");
    }

    #[rstest]
    #[case("")]
    #[case("todo:: 1234567890123 rest")]
    #[case("x id:: 64b0c6a2-91f3-4d2e-8a1b-0c9d8e7f6a5b collapsed:: false y<br>")]
    #[case("nothing to see")]
    fn stripping_is_idempotent(#[case] text: &str) {
        let once = strip_properties(text);
        assert_eq!(strip_properties(&once), once);
    }

    #[test]
    fn strips_generated_block_ids() {
        for _ in 0..32 {
            let id = uuid::Uuid::new_v4();
            let text = format!("item id:: {id}");
            assert_eq!(strip_properties(&text), "item ");
            let upper = format!("item id:: {}", id.to_string().to_uppercase());
            assert_eq!(strip_properties(&upper), "item ");
        }
    }
}
