//! Implementation of `sift init`.

use std::{fs, path::PathBuf, process::ExitCode};

use sift_config::{
    CONFIG_FILENAME, ConfigError, global_config_path, global_template, local_template,
};
use sift_highlight::Highlighter;

use crate::cli::{args::InitCommand, context::CommandContext};

/// Writes a commented `.sift.toml` template.
///
/// Running in the home directory writes the global template, as with `--global`.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let is_home_dir = global_config_path()
        .and_then(|p| p.parent().map(|home| home == ctx.cwd))
        .unwrap_or(false);
    let use_global = cmd.global || is_home_dir;

    let config_path = match target_path(ctx, use_global) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = if use_global {
        global_template()
    } else {
        local_template()
    };

    if let Err(e) = fs::write(&config_path, &template) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }

    let styler = ctx.styler();
    println!("{} {}", styler.success("Created"), config_path.display());
    println!();
    if styler.enabled() {
        print!("{}", Highlighter::new().highlight_toml(&template));
    } else {
        print!("{template}");
    }

    ExitCode::SUCCESS
}

/// Resolves where the new config file goes.
fn target_path(ctx: &CommandContext, global: bool) -> Result<PathBuf, ConfigError> {
    if global {
        global_config_path().ok_or(ConfigError::NoHomeDirectory)
    } else {
        Ok(ctx.cwd.join(CONFIG_FILENAME))
    }
}
