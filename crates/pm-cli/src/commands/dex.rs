use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use pm_gen::{Dex, DexConfig};
use pm_scrape::{ScrapeConfig, Scraper};

pub struct DexArgs {
    pub categories: usize,
    pub entries: usize,
    pub seed: Option<u64>,
    pub offline: bool,
    pub data: PathBuf,
    pub out: PathBuf,
}

pub fn run(args: &DexArgs) -> Result<(), String> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = DexConfig::default()
        .with_categories(args.categories)
        .with_entries_per_category(args.entries)
        .with_seed(seed)
        .with_data_dir(&args.data)
        .with_output_root(&args.out);

    // Offline runs must not poison the persisted negative caches.
    let scraper = if args.offline {
        Scraper::offline(&ScrapeConfig::default())
    } else {
        Scraper::online(&ScrapeConfig::default().with_cache_dir(config.cache_dir()))
    }
    .map_err(|e| e.to_string())?;

    let mut dex = Dex::build(config, scraper).map_err(|e| e.to_string())?;
    let dir = dex.write_output().map_err(|e| e.to_string())?;
    let roster = dex.roster();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Type", "Rarity", "HP", "Moves", "Description"]);
    for e in roster.iter_entries() {
        let moves = e
            .moves
            .iter()
            .map(|m| format!("{} ({}/{})", m.name, m.cost, m.damage))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            e.name.clone(),
            format!("{}/{}", e.primary, e.secondary),
            e.rarity.to_string(),
            e.hp.to_string(),
            moves,
            super::clip(&e.description, 50),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} entries in {} categories (seed {})",
        roster.entry_count(),
        roster.categories().len(),
        seed
    );
    println!("  written to {}", dir.display().to_string().bold());

    Ok(())
}
