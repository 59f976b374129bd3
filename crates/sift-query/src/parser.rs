//! Query parser.
//!
//! Folds the token stream into a [`QueryTree`] with a two-state machine
//! (`Normal` and `InQuotes`) and a stack of per-level combinators.
//!
//! # Behaviour
//!
//! - Bare words become phrases in the current group, tagged with the
//!   combinator most recently set at this nesting level (`or` / `and`), or
//!   `Default` if none.
//! - `-word` adds an excluded phrase; `+word` adds a `Default` phrase. The
//!   prefix is consumed by the next bare word only.
//! - `"..."` collects every token verbatim until the closing quote.
//! - `(` opens a group inserted under the current level's combinator; `)`
//!   returns to the enclosing group. A `)` at the top level is ignored.
//!
//! Parsing never fails: every input yields a tree.

use std::mem;

use tracing::{debug, trace};

use crate::{
    expression::{ExpressionId, QueryTree},
    lexer::{LexerOptions, QueryLexer},
    phrase::Mode,
    token::{QueryToken, TokenKind},
};

/// Parses query strings into expression trees.
///
/// The parser holds only configuration; all per-query state is created fresh
/// inside [`parse`](Self::parse), so one parser can be reused freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParser {
    /// Lexer used for every query.
    lexer: QueryLexer,
}

impl QueryParser {
    /// Creates a parser whose lexer uses `options`.
    pub fn new(options: LexerOptions) -> Self {
        Self {
            lexer: QueryLexer::new(options),
        }
    }

    /// Returns the lexer this parser tokenizes with.
    pub fn lexer(&self) -> &QueryLexer {
        &self.lexer
    }

    /// Parses `query` into a tree whose root carries `query` as its original
    /// query.
    pub fn parse(&self, query: &str) -> QueryTree {
        let tokens = self.lexer.tokenize(query);
        let mut state = ParseState::new(query);

        for token in &tokens {
            state.feed(token);
        }

        let tree = state.finish();
        debug!(
            query_len = query.len(),
            tokens = tokens.len(),
            nodes = tree.node_count(),
            "parsed query"
        );
        tree
    }
}

/// Which of the two machine states the parser is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseMode {
    /// Outside quotes; tokens are interpreted.
    Normal,
    /// Inside quotes; tokens are buffered verbatim.
    InQuotes,
}

/// A one-shot prefix waiting for the next bare word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prefix {
    /// `+`
    Plus,
    /// `-`
    Minus,
}

/// The combinator currently in force at one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Combinator {
    /// No keyword seen yet.
    #[default]
    Default,
    /// An `or` was seen.
    Or,
    /// An `and` was seen.
    And,
}

impl Combinator {
    /// Returns the mode a phrase or group takes under this combinator.
    fn mode(self) -> Mode {
        match self {
            Self::Default => Mode::Default,
            Self::Or => Mode::Or,
            Self::And => Mode::And,
        }
    }
}

/// Mutable state for one `parse` call.
struct ParseState {
    /// Tree under construction.
    tree: QueryTree,
    /// Group receiving new phrases and children.
    cursor: ExpressionId,
    /// Machine state.
    mode: ParseMode,
    /// Quoted text collected so far.
    buffer: String,
    /// Combinator per nesting level; the last entry is the current level.
    levels: Vec<Combinator>,
    /// Pending `+` or `-`.
    prefix: Option<Prefix>,
}

impl ParseState {
    /// Creates state for parsing `query`.
    fn new(query: &str) -> Self {
        Self {
            tree: QueryTree::new(query),
            cursor: ExpressionId::ROOT,
            mode: ParseMode::Normal,
            buffer: String::new(),
            levels: vec![Combinator::Default],
            prefix: None,
        }
    }

    /// Returns the combinator at the current level.
    fn combinator(&self) -> Combinator {
        self.levels.last().copied().unwrap_or_default()
    }

    /// Sets the combinator at the current level.
    fn set_combinator(&mut self, combinator: Combinator) {
        if let Some(current) = self.levels.last_mut() {
            *current = combinator;
        }
    }

    /// Advances the machine by one token.
    fn feed(&mut self, token: &QueryToken) {
        trace!(kind = %token.kind(), text = token.text(), state = ?self.mode, "token");
        match self.mode {
            ParseMode::Normal => self.feed_normal(token),
            ParseMode::InQuotes => self.feed_quoted(token),
        }
    }

    /// Handles a token outside quotes.
    fn feed_normal(&mut self, token: &QueryToken) {
        match token.kind() {
            TokenKind::Space | TokenKind::Colon => {}
            TokenKind::Quote => {
                self.buffer.clear();
                self.mode = ParseMode::InQuotes;
            }
            TokenKind::String => self.add_word(token.text()),
            TokenKind::LogicalOr => self.set_combinator(Combinator::Or),
            TokenKind::LogicalAnd => self.set_combinator(Combinator::And),
            TokenKind::BraceOpen => self.open_group(),
            TokenKind::BraceClose => self.close_group(),
            TokenKind::Plus => self.prefix = Some(Prefix::Plus),
            TokenKind::Minus => self.prefix = Some(Prefix::Minus),
        }
    }

    /// Handles a token inside quotes.
    fn feed_quoted(&mut self, token: &QueryToken) {
        if token.kind() == TokenKind::Quote {
            let text = mem::take(&mut self.buffer);
            let mode = self.combinator().mode();
            self.add_phrase(&text, mode);
            self.mode = ParseMode::Normal;
        } else {
            self.buffer.push_str(token.text());
        }
    }

    /// Adds a bare word, honouring and consuming any pending prefix.
    fn add_word(&mut self, text: &str) {
        let mode = match self.prefix.take() {
            Some(Prefix::Plus) => Mode::Default,
            Some(Prefix::Minus) => Mode::Exclude,
            None => self.combinator().mode(),
        };
        self.add_phrase(text, mode);
    }

    /// Appends a phrase with `mode` to the current group.
    fn add_phrase(&mut self, text: &str, mode: Mode) {
        match mode {
            Mode::Default => self.tree.add_default_phrase(self.cursor, text),
            Mode::Or => self.tree.add_or_phrase(self.cursor, text),
            Mode::And => self.tree.add_and_phrase(self.cursor, text),
            Mode::Exclude => self.tree.add_exclusion_phrase(self.cursor, text),
        }
    }

    /// Descends into a new group.
    fn open_group(&mut self) {
        let mode = self.combinator().mode();
        self.cursor = self.tree.add_subexpression(self.cursor, mode);
        self.levels.push(Combinator::Default);
    }

    /// Returns to the enclosing group; a no-op at the root.
    fn close_group(&mut self) {
        let Some(parent) = self.tree.parent_of(self.cursor) else {
            trace!("ignoring ')' at top level");
            return;
        };
        self.cursor = parent;
        self.levels.pop();
    }

    /// Returns the finished tree. Unterminated quoted text is discarded.
    fn finish(self) -> QueryTree {
        if self.mode == ParseMode::InQuotes && !self.buffer.is_empty() {
            debug!(buffer = %self.buffer, "discarding unterminated quoted text");
        }
        self.tree
    }
}

/// Parses `query` with default lexer options.
pub fn parse(query: &str) -> QueryTree {
    QueryParser::default().parse(query)
}
