use std::path::Path;

use colored::Colorize;
use pm_core::{Entry, Roster};

pub fn run(file: &Path, category: Option<&str>) -> Result<(), String> {
    let roster = Roster::read(file).map_err(|e| e.to_string())?;

    if let Some(name) = category.filter(|name| !roster.has_category(name)) {
        return Err(format!("category not found: \"{name}\""));
    }

    println!(
        "  {} {} (seed {}, created {})",
        "Dex".bold(),
        roster.meta.id,
        roster.meta.seed,
        roster.meta.created_at.format("%Y-%m-%d %H:%M")
    );
    println!();

    let mut shown = 0;
    for c in roster.categories() {
        if category.is_some_and(|name| name != c.name()) {
            continue;
        }
        println!("  {}", super::paint(&roster, c.name()).bold());
        println!();
        for entry in roster.entries_of(c.name()).into_iter().flat_map(|m| m.values()) {
            print_card(entry);
            shown += 1;
        }
    }

    println!("  {shown} entries");
    Ok(())
}

fn print_card(e: &Entry) {
    println!(
        "    {} [{}/{}] {}  HP {}",
        e.name.bold(),
        e.primary,
        e.secondary,
        e.rarity.to_string().dimmed(),
        e.hp
    );
    println!("    {}", e.description.italic());
    for m in &e.moves {
        println!("      {m}");
    }
    println!("    strong against: {}", e.strong_against);
    println!();
}
