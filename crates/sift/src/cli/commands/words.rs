//! Implementation of `sift words`.

use std::process::ExitCode;

use serde::Serialize;

use crate::cli::{args::WordsCommand, context::CommandContext, output::print_json};

/// JSON output for `sift words`.
#[derive(Serialize)]
struct JsonWords<'a> {
    /// The query as typed.
    query: &'a str,
    /// Words a search would use.
    words: Vec<String>,
    /// Words that must not match; present only with `--excluded`.
    #[serde(skip_serializing_if = "Option::is_none")]
    excluded: Option<Vec<String>>,
}

/// Prints the words a query contributes to a search.
pub fn run(ctx: &CommandContext, cmd: &WordsCommand) -> ExitCode {
    let tree = ctx.parser(cmd.lexer).parse(&cmd.query);
    let styler = ctx.styler();
    let words = tree.collect_words();
    let excluded = cmd.excluded.then(|| tree.collect_excluded_words());

    if ctx.wants_json(cmd.json) {
        return print_json(
            &JsonWords {
                query: &cmd.query,
                words,
                excluded,
            },
            &styler,
        );
    }

    for word in &words {
        println!("{word}");
    }
    if let Some(excluded) = excluded {
        for word in &excluded {
            println!("{}", styler.error(&format!("-{word}")));
        }
    }
    ExitCode::SUCCESS
}
