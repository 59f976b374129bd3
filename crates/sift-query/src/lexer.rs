//! Query lexer (tokenizer).
//!
//! Converts a raw query string into a stream of tokens in three passes:
//!
//! 1. **Balancing** repairs unmatched parentheses and quotes so that every
//!    opener has a closer. It never fails.
//! 2. **Splitting** cuts the balanced string on whitespace and on the
//!    delimiters `"`, `+`, `(`, `)`, `-`, keeping each delimiter as its own unit.
//! 3. **Classification** maps each unit to a [`TokenKind`].

use tracing::trace;

use crate::token::{QueryToken, TokenKind};

/// Characters that always form a unit of their own.
const DELIMITERS: [char; 5] = ['"', '+', '(', ')', '-'];

/// Lexer behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexerOptions {
    /// Also balance single quotes during the balancing pass.
    pub balance_single_quotes: bool,
}

/// Tokenizes query strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryLexer {
    /// Active options.
    options: LexerOptions,
}

impl QueryLexer {
    /// Creates a lexer with the given options.
    pub fn new(options: LexerOptions) -> Self {
        Self { options }
    }

    /// Returns the lexer's options.
    pub fn options(&self) -> LexerOptions {
        self.options
    }

    /// Runs all three passes over `query`.
    pub fn tokenize(&self, query: &str) -> Vec<QueryToken> {
        let balanced = self.balance(query);
        split(&balanced)
            .into_iter()
            .map(|unit| QueryToken::new(classify(unit), unit))
            .collect()
    }

    /// Returns `query` with every unmatched `(`, `)` and quote repaired.
    ///
    /// Parentheses nest and quotes toggle. A closer whose opener is buried
    /// under other open delimiters first closes those, most recent first. A
    /// `)` with no open `(` gets a `(` prepended to the whole string. Anything
    /// still open at the end is closed in reverse order of opening.
    pub fn balance(&self, query: &str) -> String {
        let mut balancer = Balancer::new(query.len());

        for ch in query.chars() {
            if self.is_quote(ch) {
                balancer.quote(ch);
            } else if ch == '(' {
                balancer.open(ch);
            } else if ch == ')' {
                balancer.close_paren();
            } else {
                balancer.body.push(ch);
            }
        }

        balancer.finish()
    }

    /// Returns true if `ch` is a quote character under the current options.
    fn is_quote(&self, ch: char) -> bool {
        ch == '"' || (ch == '\'' && self.options.balance_single_quotes)
    }
}

/// Scratch state for one balancing pass.
struct Balancer {
    /// Currently open delimiters, innermost last.
    stack: Vec<char>,
    /// Output built so far, excluding prepended openers.
    body: String,
    /// Number of `(` to prepend.
    prepended: usize,
}

impl Balancer {
    /// Creates an empty balancer sized for an input of `len` bytes.
    fn new(len: usize) -> Self {
        Self {
            stack: Vec::new(),
            body: String::with_capacity(len + 4),
            prepended: 0,
        }
    }

    /// Records an opener.
    fn open(&mut self, ch: char) {
        self.stack.push(ch);
        self.body.push(ch);
    }

    /// Handles a quote: closes the most recent open quote of the same kind,
    /// or opens a new one.
    ///
    /// The matching quote need not be on top of the stack. Anything opened
    /// after it is closed first, so `"a (b " c` becomes `"a (b )" c`.
    fn quote(&mut self, ch: char) {
        match self.stack.iter().rposition(|&open| open == ch) {
            Some(position) => {
                self.close_above(position);
                self.body.push(ch);
            }
            None => self.open(ch),
        }
    }

    /// Handles `)`.
    fn close_paren(&mut self) {
        match self.stack.iter().rposition(|&open| open == '(') {
            Some(position) => self.close_above(position),
            None => {
                trace!("prepending '(' for unmatched ')'");
                self.prepended += 1;
            }
        }
        self.body.push(')');
    }

    /// Closes every delimiter opened above `position`, then pops `position`.
    fn close_above(&mut self, position: usize) {
        for opener in self.stack.drain(position + 1..).rev() {
            trace!(%opener, "closing interleaved delimiter");
            self.body.push(closer_for(opener));
        }
        self.stack.truncate(position);
    }

    /// Closes everything still open and applies prepended openers.
    fn finish(mut self) -> String {
        while let Some(opener) = self.stack.pop() {
            trace!(%opener, "closing delimiter left open at end of query");
            self.body.push(closer_for(opener));
        }
        let mut balanced = "(".repeat(self.prepended);
        balanced.push_str(&self.body);
        balanced
    }
}

/// Returns the closer matching an opener.
fn closer_for(opener: char) -> char {
    match opener {
        '(' => ')',
        quote => quote,
    }
}

/// Splits on whitespace and delimiters, keeping each as its own unit.
///
/// Never yields empty units.
pub fn split(input: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;

    for (index, ch) in input.char_indices() {
        if ch.is_whitespace() || DELIMITERS.contains(&ch) {
            if start < index {
                units.push(&input[start..index]);
            }
            let end = index + ch.len_utf8();
            units.push(&input[index..end]);
            start = end;
        }
    }

    if start < input.len() {
        units.push(&input[start..]);
    }

    units
}

/// Classifies one unit produced by [`split`].
///
/// Any single Unicode whitespace character is a `Space`, not only space and
/// tab, so newlines separate words too.
pub fn classify(unit: &str) -> TokenKind {
    let mut chars = unit.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        match ch {
            c if c.is_whitespace() => return TokenKind::Space,
            '"' => return TokenKind::Quote,
            '+' => return TokenKind::Plus,
            '-' => return TokenKind::Minus,
            '(' => return TokenKind::BraceOpen,
            ')' => return TokenKind::BraceClose,
            ':' => return TokenKind::Colon,
            _ => {}
        }
    }

    if unit.eq_ignore_ascii_case("and") {
        TokenKind::LogicalAnd
    } else if unit.eq_ignore_ascii_case("or") {
        TokenKind::LogicalOr
    } else {
        TokenKind::String
    }
}

/// Tokenizes `query` with default options.
pub fn tokenize(query: &str) -> Vec<QueryToken> {
    QueryLexer::default().tokenize(query)
}
