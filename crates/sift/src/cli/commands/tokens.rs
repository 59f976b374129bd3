//! Implementation of `sift tokens`.

use std::process::ExitCode;

use serde::Serialize;
use sift_query::{QueryLexer, QueryToken};

use crate::cli::{
    args::TokensCommand,
    context::CommandContext,
    output::{print_json, token_table},
};

/// JSON output for `sift tokens`.
#[derive(Serialize)]
struct JsonTokens<'a> {
    /// The query after repair; present only with `--balanced`.
    #[serde(skip_serializing_if = "Option::is_none")]
    balanced: Option<String>,
    /// The token stream.
    tokens: &'a [QueryToken],
}

/// Prints the token stream of a query.
pub fn run(ctx: &CommandContext, cmd: &TokensCommand) -> ExitCode {
    let lexer = QueryLexer::new(ctx.lexer_options(cmd.lexer));
    let tokens = lexer.tokenize(&cmd.query);
    let balanced = cmd.balanced.then(|| lexer.balance(&cmd.query));
    let styler = ctx.styler();

    // Token streams only render as JSON on request; the config format targets trees
    if cmd.json {
        return print_json(
            &JsonTokens {
                balanced,
                tokens: &tokens,
            },
            &styler,
        );
    }

    if let Some(balanced) = balanced {
        println!("{} {}", styler.dim("balanced:"), styler.query(&tokens));
        if balanced != cmd.query {
            println!("{} {}", styler.dim("repaired:"), styler.warning("yes"));
        }
        println!();
    }
    println!("{}", token_table(&tokens));
    ExitCode::SUCCESS
}
