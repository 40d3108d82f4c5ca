use std::path::Path;

use colored::Colorize;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use pm_core::Catalog;
use pm_vocab::{PartitionConfig, shortfalls};

pub fn run(data: &Path) -> Result<(), String> {
    let catalog = Catalog::load(&data.join("types")).map_err(|e| e.to_string())?;
    let min = PartitionConfig::default().min_pool;

    let size_cell = |n: usize| {
        let cell = Cell::new(n);
        if n < min { cell.fg(Color::Red) } else { cell }
    };

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Nouns", "Verbs", "Adjectives", "Wikipedia", "ImageNet"]);
    for c in catalog.categories() {
        table.add_row(vec![
            Cell::new(c.name()),
            Cell::new(c.nouns().len()),
            size_cell(c.verbs().len()),
            size_cell(c.adjectives().len()),
            Cell::new(c.wikipedia()),
            Cell::new(c.imagenet()),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} categories", catalog.categories().len());

    let short = shortfalls(catalog.categories(), min);
    if short.is_empty() {
        println!("  all pools have at least {min} words");
    } else {
        println!("  {}", "these categories need more words:".yellow());
        for s in short {
            println!("    {} {} ({})", s.category, s.part, s.size);
        }
    }
    Ok(())
}
