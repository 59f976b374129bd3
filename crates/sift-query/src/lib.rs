//! Tolerant search-query parsing for sift.
//!
//! Turns a free-form search string into a tree of phrases and groups:
//!
//! - **Words**: `rust` - a plain term
//! - **Phrases**: `"error handling"` - several words kept together
//! - **Exclusion**: `-deprecated` - a term that must not match
//! - **Inclusion**: `+tokio` - an explicitly required term
//! - **Combinators**: `rust or golang`, `async and await` (any case)
//! - **Grouping**: `(a b) or (c d)`
//!
//! Malformed input is never rejected. Unbalanced quotes and parentheses are
//! repaired by the lexer, and stray operators degrade to no-ops.
//!
//! A quoted phrase that is blank after trimming adds nothing to the tree, so
//! `""` on its own parses to an empty, invalid query rather than to an empty
//! `Default` phrase.
//!
//! # Example
//!
//! ```
//! use sift_query::{Mode, parse};
//!
//! let tree = parse("foo -bar (baz or qux)");
//! assert!(tree.is_valid());
//! assert_eq!(tree.collect_words(), vec!["foo", "baz", "qux"]);
//!
//! let group = tree.root().children().next().unwrap();
//! assert_eq!(group.phrases()[1].mode(), Mode::Or);
//! ```

#![warn(missing_docs)]

mod expression;
mod lexer;
mod parser;
mod phrase;
mod token;

pub use expression::{ExpressionId, QueryExpression, QueryTree};
pub use lexer::{LexerOptions, QueryLexer, classify, split, tokenize};
pub use parser::{QueryParser, parse};
pub use phrase::{Mode, QueryPhrase};
pub use token::{QueryToken, TokenKind};
