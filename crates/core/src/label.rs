//! Normalized symptom / ingredient identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque identifier for a symptom, ingredient or rule output.
///
/// Normalization happens once, on construction: surrounding whitespace is
/// trimmed and ASCII letters are lowercased. After that, equality is exact.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(raw: &str) -> Self {
        Label(raw.trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable form: `bell_pepper` -> `Bell Pepper`.
    pub fn display_name(&self) -> String {
        self.0
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(raw: &str) -> Self {
        Label::new(raw)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace_once() {
        assert_eq!(Label::new("  Fever \n"), Label::new("fever"));
        assert_eq!(Label::new("Olive_Oil").as_str(), "olive_oil");
    }

    #[test]
    fn distinct_spellings_stay_distinct() {
        assert_ne!(Label::new("olive"), Label::new("olives"));
        assert_ne!(Label::new("olive oil"), Label::new("olive_oil"));
    }

    #[test]
    fn display_name_title_cases_words() {
        assert_eq!(Label::new("bell_pepper").display_name(), "Bell Pepper");
        assert_eq!(Label::new("flu").display_name(), "Flu");
        assert_eq!(Label::new("tomato__sauce").display_name(), "Tomato Sauce");
    }
}
