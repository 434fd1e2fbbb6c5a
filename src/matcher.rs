//! Keyword membership and occurrence counting over lowercased resume text.

use serde::Deserialize;

/// Decides whether a keyword occurs in a piece of text and how often.
///
/// Both arguments are expected to be lowercased already.
pub trait KeywordMatcher: Send + Sync {
    fn contains(&self, haystack: &str, keyword: &str) -> bool;

    fn occurrences(&self, haystack: &str, keyword: &str) -> usize;
}

/// Raw substring containment. `"java"` is found inside `"javascript"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringMatcher;

impl KeywordMatcher for SubstringMatcher {
    fn contains(&self, haystack: &str, keyword: &str) -> bool {
        haystack.contains(keyword)
    }

    fn occurrences(&self, haystack: &str, keyword: &str) -> usize {
        if keyword.is_empty() {
            return 0;
        }
        haystack.matches(keyword).count()
    }
}

/// Only counts occurrences whose neighbouring characters are not alphanumeric.
#[derive(Debug, Default, Clone, Copy)]
pub struct WholeWordMatcher;

impl WholeWordMatcher {
    fn bounded(haystack: &str, start: usize, end: usize) -> bool {
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    }
}

impl KeywordMatcher for WholeWordMatcher {
    fn contains(&self, haystack: &str, keyword: &str) -> bool {
        self.occurrences(haystack, keyword) > 0
    }

    fn occurrences(&self, haystack: &str, keyword: &str) -> usize {
        if keyword.is_empty() {
            return 0;
        }
        haystack
            .match_indices(keyword)
            .filter(|(start, m)| Self::bounded(haystack, *start, start + m.len()))
            .count()
    }
}

/// Matcher selection as written in configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    #[default]
    Substring,
    WholeWord,
}

impl MatchMode {
    pub fn build(self) -> Box<dyn KeywordMatcher> {
        match self {
            MatchMode::Substring => Box::new(SubstringMatcher),
            MatchMode::WholeWord => Box::new(WholeWordMatcher),
        }
    }
}
