//! Starter files written by `sift init`.
//!
//! The templates are kept as valid TOML so they can be checked against the
//! real defaults, then every setting is commented out before writing. A fresh
//! file therefore documents the defaults without pinning them.

/// Project-level template.
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Template for `~/.sift.toml`.
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the project template with all settings commented out.
pub fn local_template() -> String {
    comment_out(LOCAL_TEMPLATE)
}

/// Returns the global template with all settings commented out.
pub fn global_template() -> String {
    comment_out(GLOBAL_TEMPLATE)
}

/// Prefixes every setting and section header with `# `.
///
/// Blank lines and existing comments pass through.
fn comment_out(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{line}\n")
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}
