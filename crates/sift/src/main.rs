//! Command-line entry point for `sift`.

use std::process::ExitCode;

use clap::Parser;
use sift::cli::{Cli, CommandContext, args::Commands, commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // init must work even when an existing config file is broken
    let ctx = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only(cli.no_color)
    } else {
        CommandContext::load(cli.no_color)
    };

    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
