//! Classified lexemes produced by the lexer.

use std::fmt;

use serde::Serialize;

/// The syntactic class of a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Any text that is not recognized syntax.
    String,
    /// A single whitespace character.
    Space,
    /// A double quote (`"`).
    Quote,
    /// Inclusion prefix (`+`).
    Plus,
    /// Exclusion prefix (`-`).
    Minus,
    /// Opening parenthesis.
    BraceOpen,
    /// Closing parenthesis.
    BraceClose,
    /// The `and` keyword (any case).
    LogicalAnd,
    /// The `or` keyword (any case).
    LogicalOr,
    /// A lone colon.
    Colon,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Space => "space",
            Self::Quote => "quote",
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::BraceOpen => "brace_open",
            Self::BraceClose => "brace_close",
            Self::LogicalAnd => "and",
            Self::LogicalOr => "or",
            Self::Colon => "colon",
        };
        f.write_str(name)
    }
}

/// An immutable lexeme: its kind plus the raw text it was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QueryToken {
    /// Syntactic class.
    kind: TokenKind,
    /// Raw text, casing preserved.
    text: String,
}

impl QueryToken {
    /// Creates a token. Only the lexer builds tokens.
    pub(crate) fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Returns the token's kind.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the raw text of the token.
    pub fn text(&self) -> &str {
        &self.text
    }
}
