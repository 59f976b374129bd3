//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use sift_highlight::{Highlighter, Styler};
use sift_query::{QueryExpression, QueryToken, QueryTree};

/// Indentation per tree level.
const INDENT: &str = "  ";

/// Renders a parsed tree, one phrase or group per line.
///
/// Matches the engine's `Display` layout, with modes coloured by `styler`.
pub fn render_tree(tree: &QueryTree, styler: &Styler) -> String {
    let mut out = styler.header(&format!("Query({:?})", tree.original_query()));
    out.push('\n');
    render_contents(&mut out, tree.root(), styler);
    out
}

/// Appends the phrases, then the child groups, of `expr`, indented one level
/// below its depth.
fn render_contents(out: &mut String, expr: QueryExpression<'_>, styler: &Styler) {
    let indent = INDENT.repeat(expr.depth() + 1);
    for phrase in expr.phrases() {
        out.push_str(&format!(
            "{indent}Phrase({}, {:?})\n",
            styler.mode(phrase.mode()),
            phrase.text()
        ));
    }
    for child in expr.children() {
        out.push_str(&format!("{indent}Group({})\n", styler.mode(child.mode())));
        render_contents(out, child, styler);
    }
}

/// Builds the token table for `sift tokens`.
pub fn token_table(tokens: &[QueryToken]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Kind", "Text"]);
    for (index, token) in tokens.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(token.kind()),
            Cell::new(format!("{:?}", token.text())),
        ]);
    }
    table
}

/// Prints `value` as pretty JSON, highlighted when `styler` is enabled.
pub fn print_json<T: Serialize + ?Sized>(value: &T, styler: &Styler) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            if styler.enabled() {
                println!("{}", Highlighter::new().highlight_json(&json));
            } else {
                println!("{json}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}
