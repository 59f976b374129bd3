//! Implementation of `sift parse`.

use std::process::ExitCode;

use crate::cli::{
    args::ParseCommand,
    context::CommandContext,
    output::{print_json, render_tree},
};

/// Parses a query and prints its expression tree.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let tree = ctx.parser(cmd.lexer).parse(&cmd.query);
    let styler = ctx.styler();

    if ctx.wants_json(cmd.json) {
        return print_json(&tree, &styler);
    }

    print!("{}", render_tree(&tree, &styler));
    if !tree.is_valid() {
        eprintln!("{}", styler.warning("warning: query has no searchable words"));
    }
    ExitCode::SUCCESS
}
