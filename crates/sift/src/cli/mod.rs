//! CLI support for the `sift` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod logging;
pub mod output;

pub use args::Cli;
pub use context::CommandContext;
