//! Leaf search terms.

use std::fmt;

use serde::Serialize;

/// How a phrase or sub-expression participates in its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Plain term with no explicit combinator.
    #[default]
    Default,
    /// Follows an `or` keyword.
    Or,
    /// Follows an `and` keyword.
    And,
    /// Prefixed with `-`; must not match.
    Exclude,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Or => "or",
            Self::And => "and",
            Self::Exclude => "exclude",
        };
        f.write_str(name)
    }
}

/// A single search term or a quoted multi-word phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPhrase {
    /// Trimmed phrase content.
    text: String,
    /// Inclusion mode.
    mode: Mode,
    /// Whether `text` contains whitespace.
    is_multi_word: bool,
}

impl QueryPhrase {
    /// Creates a phrase, trimming surrounding whitespace from `text`.
    pub(crate) fn new(text: &str, mode: Mode) -> Self {
        let text = text.trim().to_string();
        let is_multi_word = text.chars().any(char::is_whitespace);
        Self {
            text,
            mode,
            is_multi_word,
        }
    }

    /// Returns the phrase text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the inclusion mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns true if the phrase spans more than one word.
    pub fn is_multi_word(&self) -> bool {
        self.is_multi_word
    }

    /// Returns true unless the phrase is excluded.
    pub fn is_included(&self) -> bool {
        self.mode != Mode::Exclude
    }

    /// Returns the words this phrase contributes to a keyword list.
    ///
    /// A multi-word phrase yields each of its words; a single word yields itself.
    pub fn words(&self) -> Vec<&str> {
        if self.is_multi_word {
            self.text.split_whitespace().collect()
        } else {
            vec![self.text.as_str()]
        }
    }
}
