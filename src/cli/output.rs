//! Output formatting helpers for command summaries

use colored::*;

/// Print a section header
pub fn section_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Print an info message
pub fn info(msg: &str) {
    eprintln!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg.green());
}

/// Print a single tree item
pub fn tree_item(last: bool, key: &str, value: Option<&str>) {
    let prefix = if last { "└─" } else { "├─" };
    match value {
        Some(v) => println!("{} {}: {}", prefix, key.bold(), v),
        None => println!("{} {}", prefix, key.bold()),
    }
}
