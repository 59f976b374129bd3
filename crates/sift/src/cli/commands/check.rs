//! Implementation of `sift check`.

use std::process::ExitCode;

use crate::cli::{args::CheckCommand, context::CommandContext};

/// Reports whether each query has something to search for.
///
/// Exits with failure if any query is invalid.
pub fn run(ctx: &CommandContext, cmd: &CheckCommand) -> ExitCode {
    let parser = ctx.parser(cmd.lexer);
    let styler = ctx.styler();
    let mut invalid = 0usize;

    for query in &cmd.queries {
        let tree = parser.parse(query);
        if tree.is_valid() {
            if !cmd.quiet {
                println!("{} {query:?}", styler.success("ok     "));
            }
        } else {
            invalid += 1;
            if !cmd.quiet {
                println!(
                    "{} {query:?} {}",
                    styler.error("invalid"),
                    styler.dim("(no search to perform)")
                );
            }
        }
    }

    if invalid == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
