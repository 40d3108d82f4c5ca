use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use pm_vocab::{EmbeddingModel, PartitionConfig, partition_catalog};

pub fn run(model: &Path, data: &Path) -> Result<(), String> {
    let model = EmbeddingModel::load(model).map_err(|e| e.to_string())?;
    let partition =
        partition_catalog(data, &model, &PartitionConfig::default()).map_err(|e| e.to_string())?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Verbs", "Adjectives"]);
    for (name, pools) in &partition.pools {
        table.add_row(vec![
            name.clone(),
            pools.verbs.len().to_string(),
            pools.adjectives.len().to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} generic attack verbs", partition.generic.len());
    Ok(())
}
