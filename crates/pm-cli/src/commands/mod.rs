pub mod catalog;
pub mod dex;
pub mod show;
pub mod vocab;

use colored::{ColoredString, Colorize};
use pm_core::Roster;

/// Category name in its palette color, plain if it has none.
fn paint(roster: &Roster, category: &str) -> ColoredString {
    match roster.color(category) {
        Some(c) => category.truecolor(c.rgb[0], c.rgb[1], c.rgb[2]),
        None => category.normal(),
    }
}

/// Shorten text for a table cell.
fn clip(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{head}...")
    } else if text.is_empty() {
        "—".to_string()
    } else {
        text.to_string()
    }
}
