use std::fmt;

/// Task state of an entry, derived from the literal keyword its text starts with.
///
/// Matching is case-sensitive and the keyword must be followed by a space,
/// so `"TODOS"` or `"todo buy milk"` classify as [`TaskType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    Todo,
    Doing,
    Later,
    Done,
    Canceled,
    Unknown,
}

impl TaskType {
    /// Keyword-bearing variants in classification priority order.
    pub const ALL: [TaskType; 5] = [
        TaskType::Done,
        TaskType::Todo,
        TaskType::Doing,
        TaskType::Later,
        TaskType::Canceled,
    ];

    /// Classifies the plain-text content of one entry.
    ///
    /// First match in [`TaskType::ALL`] order wins; anything else is `Unknown`.
    pub fn classify(text: &str) -> TaskType {
        Self::ALL
            .into_iter()
            .find(|task| {
                task.keyword().is_some_and(|kw| {
                    text.strip_prefix(kw)
                        .is_some_and(|rest| rest.starts_with(' '))
                })
            })
            .unwrap_or(TaskType::Unknown)
    }

    /// The literal keyword, or `None` for `Unknown`.
    pub fn keyword(self) -> Option<&'static str> {
        match self {
            TaskType::Todo => Some("TODO"),
            TaskType::Doing => Some("DOING"),
            TaskType::Later => Some("LATER"),
            TaskType::Done => Some("DONE"),
            TaskType::Canceled => Some("CANCELED"),
            TaskType::Unknown => None,
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().unwrap_or("UNKNOWN"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("DONE ship it", TaskType::Done)]
    #[case("TODO buy milk", TaskType::Todo)]
    #[case("DOING write tests", TaskType::Doing)]
    #[case("LATER read book", TaskType::Later)]
    #[case("CANCELED party", TaskType::Canceled)]
    #[case("TODO ", TaskType::Todo)]
    fn classifies_keyword_prefixes(#[case] text: &str, #[case] expected: TaskType) {
        assert_eq!(TaskType::classify(text), expected);
    }

    #[rstest]
    #[case("")]
    #[case("TODO")]
    #[case("TODOS are fun")]
    #[case("todo lowercase")]
    #[case(" TODO leading space")]
    #[case("TODO\tnot a space")]
    #[case("just a note about DONE things")]
    #[case("CANCELLED british spelling")]
    fn unmatched_text_is_unknown(#[case] text: &str) {
        assert_eq!(TaskType::classify(text), TaskType::Unknown);
    }

    #[test]
    fn classification_is_deterministic() {
        for text in ["DONE a", "LATER b", "nothing", ""] {
            assert_eq!(TaskType::classify(text), TaskType::classify(text));
        }
    }

    #[test]
    fn display_prints_keyword() {
        assert_eq!(TaskType::Later.to_string(), "LATER");
        assert_eq!(TaskType::Unknown.to_string(), "UNKNOWN");
    }

    #[test]
    fn every_keyword_variant_round_trips_through_classify() {
        for task in TaskType::ALL {
            let text = format!("{} something", task.keyword().unwrap());
            assert_eq!(TaskType::classify(&text), task);
        }
    }
}
