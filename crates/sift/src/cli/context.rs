//! Shared context for running CLI commands.

use std::{
    env,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    process::ExitCode,
};

use sift_config::{Config, OutputFormat};
use sift_highlight::Styler;
use sift_query::{LexerOptions, QueryParser};

use crate::cli::args::LexerArgs;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Set by `--no-color`.
    no_color: bool,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(no_color: bool) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self::with_config(cwd, config, no_color))
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only(no_color: bool) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self::with_config(cwd, Config::default(), no_color))
    }

    /// Builds a context from parts.
    pub fn with_config(cwd: PathBuf, config: Config, no_color: bool) -> Self {
        Self {
            cwd,
            config,
            no_color,
        }
    }

    /// Lexer options from config, with command-line flags layered on top.
    pub fn lexer_options(&self, args: LexerArgs) -> LexerOptions {
        LexerOptions {
            balance_single_quotes: args.single_quotes || self.config.query.balance_single_quotes,
        }
    }

    /// Returns a parser configured for this invocation.
    pub fn parser(&self, args: LexerArgs) -> QueryParser {
        QueryParser::new(self.lexer_options(args))
    }

    /// Returns true if JSON output was requested by flag or by config.
    pub fn wants_json(&self, flag: bool) -> bool {
        flag || self.config.output.format == OutputFormat::Json
    }

    /// Whether stdout output should carry ANSI styling.
    ///
    /// Colour needs all of: config `output.color`, no `--no-color`, no
    /// `NO_COLOR` in the environment, and a terminal on stdout.
    pub fn color_enabled(&self) -> bool {
        self.config.output.color
            && !self.no_color
            && env::var_os("NO_COLOR").is_none()
            && io::stdout().is_terminal()
    }

    /// Returns a styler honouring [`Self::color_enabled`].
    pub fn styler(&self) -> Styler {
        Styler::new(self.color_enabled())
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
