//! Clap argument definitions for the `sift` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};

/// Query syntax summary shown after the help of query commands.
const QUERY_SYNTAX_HELP: &str = "\
QUERY SYNTAX:
  term              Plain term
  term1 term2       Both terms (default combinator)
  \"a phrase\"        Words kept together as one phrase
  -term             Term must NOT appear
  +term             Explicitly included term
  a or b            Either term (keyword is case-insensitive)
  a and b           Both terms, explicitly
  (expr)            Grouping; the group takes the pending combinator

Unbalanced quotes and parentheses are repaired, never rejected.

EXAMPLES:
  sift parse 'rust -deprecated'
  sift parse '\"error handling\" (tokio or async-std)'
  sift words 'a -b (c or d)'
  sift tokens --balanced '(unclosed \"quote'";

/// Top-level CLI options.
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(about = "Inspect how search queries are tokenized and parsed")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log verbosity (-v for debug, -vv for trace); SIFT_LOG overrides
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Lexer flags shared by every command that takes a query.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LexerArgs {
    /// Treat ' as a quote when repairing unbalanced input [default: from config]
    #[arg(long)]
    pub single_quotes: bool,
}

/// Arguments for `sift parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Query to parse
    pub query: String,

    /// Output the tree as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    /// Lexer flags.
    pub lexer: LexerArgs,
}

/// Arguments for `sift words`.
#[derive(Args, Debug, Clone)]
pub struct WordsCommand {
    /// Query to extract words from
    pub query: String,

    /// Output the words as JSON
    #[arg(long)]
    pub json: bool,

    /// Also list the excluded words
    #[arg(long)]
    pub excluded: bool,

    #[command(flatten)]
    /// Lexer flags.
    pub lexer: LexerArgs,
}

/// Arguments for `sift tokens`.
#[derive(Args, Debug, Clone)]
pub struct TokensCommand {
    /// Query to tokenize
    pub query: String,

    /// Also print the query after quote and parenthesis repair
    #[arg(long)]
    pub balanced: bool,

    /// Output the tokens as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    /// Lexer flags.
    pub lexer: LexerArgs,
}

/// Arguments for `sift check`.
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// Queries to check
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Print nothing; report through the exit status only
    #[arg(short = 'q', long)]
    pub quiet: bool,

    #[command(flatten)]
    /// Lexer flags.
    pub lexer: LexerArgs,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sift.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the expression tree a query parses into
    #[command(after_help = QUERY_SYNTAX_HELP)]
    Parse(ParseCommand),

    /// List the words a search would use
    #[command(after_help = QUERY_SYNTAX_HELP)]
    Words(WordsCommand),

    /// Show the token stream of a query
    #[command(after_help = QUERY_SYNTAX_HELP)]
    Tokens(TokensCommand),

    /// Check that queries contain something to search for
    Check(CheckCommand),

    /// Initialize sift configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}
