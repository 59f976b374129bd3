//! Syntax highlighting and terminal colors for sift.
//!
//! Provides highlighted TOML and JSON output, a colour scheme for query
//! tokens and phrase modes, and a [`Styler`] that applies them only when
//! colour is enabled.

#![warn(missing_docs)]

use sift_query::{Mode, QueryToken, TokenKind};
use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// A syntax highlighter for structured terminal output.
pub struct Highlighter {
    /// The syntax set containing language definitions (including TOML).
    syntax_set: SyntaxSet,
    /// The theme set containing color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// The theme to use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a new highlighter with the default theme (Dracula).
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML content for terminal output.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights JSON content for terminal output.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights content with the specified syntax for terminal output.
    ///
    /// If the syntax is not found, the content is treated as plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self.theme_set.get(self.theme);
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI color codes for terminal output.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text.
    pub const CYAN: &str = "\x1b[36m";
    /// Green text.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red text.
    pub const RED: &str = "\x1b[31m";
    /// Magenta text.
    pub const MAGENTA: &str = "\x1b[35m";
    /// Blue text.
    pub const BLUE: &str = "\x1b[34m";
    /// Dim/gray text.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Returns the escape sequence used for a token kind, if it is coloured.
pub fn token_color(kind: TokenKind) -> Option<&'static str> {
    match kind {
        TokenKind::String | TokenKind::Space => None,
        TokenKind::Quote => Some(colors::YELLOW),
        TokenKind::Plus => Some(colors::GREEN),
        TokenKind::Minus => Some(colors::RED),
        TokenKind::BraceOpen | TokenKind::BraceClose => Some(colors::CYAN),
        TokenKind::LogicalAnd | TokenKind::LogicalOr => Some(colors::MAGENTA),
        TokenKind::Colon => Some(colors::DIM),
    }
}

/// Returns the escape sequence used for a phrase or group mode.
pub fn mode_color(mode: Mode) -> &'static str {
    match mode {
        Mode::Default => colors::BLUE,
        Mode::Or => colors::MAGENTA,
        Mode::And => colors::CYAN,
        Mode::Exclude => colors::RED,
    }
}

/// Applies terminal styles when colour is enabled and passes text through
/// untouched otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Styler {
    /// Whether escape sequences are emitted.
    enabled: bool,
}

impl Styler {
    /// Creates a styler.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Returns true if this styler emits escape sequences.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Wraps `text` in `codes` followed by a reset.
    fn paint(&self, codes: &[&str], text: &str) -> String {
        if !self.enabled || codes.is_empty() {
            return text.to_string();
        }
        let mut out = codes.concat();
        out.push_str(text);
        out.push_str(colors::RESET);
        out
    }

    /// Formats a header with bold cyan styling.
    pub fn header(&self, text: &str) -> String {
        self.paint(&[colors::BOLD, colors::CYAN], text)
    }

    /// Formats text as dimmed/less important.
    pub fn dim(&self, text: &str) -> String {
        self.paint(&[colors::DIM], text)
    }

    /// Formats text as a success message (green).
    pub fn success(&self, text: &str) -> String {
        self.paint(&[colors::GREEN], text)
    }

    /// Formats text as a warning (yellow).
    pub fn warning(&self, text: &str) -> String {
        self.paint(&[colors::YELLOW], text)
    }

    /// Formats text as an error (red).
    pub fn error(&self, text: &str) -> String {
        self.paint(&[colors::RED], text)
    }

    /// Formats a mode label in its mode colour.
    pub fn mode(&self, mode: Mode) -> String {
        self.paint(&[mode_color(mode)], &mode.to_string())
    }

    /// Formats one token's text in its kind colour.
    pub fn token(&self, kind: TokenKind, text: &str) -> String {
        match token_color(kind) {
            Some(color) => self.paint(&[color], text),
            None => text.to_string(),
        }
    }

    /// Reassembles a token stream into coloured query text.
    pub fn query(&self, tokens: &[QueryToken]) -> String {
        tokens
            .iter()
            .map(|token| self.token(token.kind(), token.text()))
            .collect()
    }
}
