//! Fixed lexical signals used by the priority scorer.
//!
//! Matching is plain substring search over a lowercased haystack, so short
//! entries such as `"now"` or `"info"` also fire inside longer words.

pub const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "immediate",
    "emergency",
    "critical",
    "deadline",
    "today",
    "now",
    "quickly",
    "rush",
    "priority",
    "important",
    "need response",
    "time sensitive",
    "breaking",
    "alert",
];

pub const NORMAL_KEYWORDS: &[&str] = &[
    "meeting",
    "schedule",
    "discussion",
    "review",
    "update",
    "information",
    "follow up",
    "question",
    "request",
    "feedback",
];

pub const LOW_KEYWORDS: &[&str] = &[
    "newsletter",
    "notification",
    "fyi",
    "heads up",
    "reminder",
    "announcement",
    "info",
    "casual",
    "when you have time",
];

/// Any of these forces an urgent result regardless of the keyword counts.
pub const OVERRIDE_PHRASES: &[&str] = &["deadline today", "need response today", "urgent"];

/// Asked in this order; the first question to reach the best score wins.
pub const DEADLINE_QUESTIONS: [&str; 4] = [
    "When is the deadline?",
    "What is the due date?",
    "When do you need this?",
    "What time is this due?",
];

/// Number of distinct phrases from `set` present in `haystack`.
pub fn count_present(set: &[&str], haystack: &str) -> usize {
    set.iter().filter(|phrase| haystack.contains(*phrase)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_presence_not_frequency() {
        assert_eq!(count_present(URGENT_KEYWORDS, "urgent urgent urgent"), 1);
        assert_eq!(count_present(URGENT_KEYWORDS, "asap, this is critical"), 2);
    }

    #[test]
    fn short_phrases_match_inside_words() {
        assert_eq!(count_present(&["now"], "i know"), 1);
        // "information" carries both the normal and the low entry.
        assert_eq!(count_present(NORMAL_KEYWORDS, "more information"), 1);
        assert_eq!(count_present(LOW_KEYWORDS, "more information"), 1);
    }

    #[test]
    fn tables_are_lowercase() {
        for phrase in URGENT_KEYWORDS
            .iter()
            .chain(NORMAL_KEYWORDS)
            .chain(LOW_KEYWORDS)
            .chain(OVERRIDE_PHRASES)
        {
            assert_eq!(*phrase, phrase.to_lowercase());
        }
    }
}
