//! Implementation of `sift config`.

use std::process::ExitCode;

use sift_config::discover_config_files;
use sift_highlight::Highlighter;

use crate::cli::context::CommandContext;

/// Shows the config files in effect and the merged settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let styler = ctx.styler();
    let toml = match ctx.config.settings_to_toml() {
        Ok(toml) => toml,
        Err(e) => {
            eprintln!("error: failed to serialize settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    let files = discover_config_files(&ctx.cwd);
    if files.is_empty() {
        println!("{}", styler.dim("# no config files found, showing defaults"));
    } else {
        println!("{}", styler.dim("# config files, highest precedence first:"));
        for path in &files {
            println!("{}", styler.dim(&format!("#   {}", path.display())));
        }
    }
    if let Some(root) = &ctx.config.config_root {
        println!("{}", styler.dim(&format!("# config root: {}", root.display())));
    }
    println!();

    if styler.enabled() {
        print!("{}", Highlighter::new().highlight_toml(&toml));
    } else {
        print!("{toml}");
    }
    ExitCode::SUCCESS
}
