//! CLI frontend for the Procemon roster generator.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "procemon",
    about = "Procemon: procedurally generated creature cards",
    version,
    propagate_version = true
)]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a roster and write it to a fresh output directory
    Dex {
        /// Number of categories
        #[arg(short = 'c', long, default_value = "12")]
        categories: usize,

        /// Number of entries per category
        #[arg(short = 'n', long, default_value = "9")]
        entries: usize,

        /// RNG seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Do not scrape text or images
        #[arg(long)]
        offline: bool,

        /// Data directory with types/, moves/, and cache/
        #[arg(short, long, default_value = "data")]
        data: PathBuf,

        /// Parent directory of run output directories
        #[arg(short, long, default_value = "dst/dex")]
        out: PathBuf,
    },

    /// Print the entries of a roster file
    Show {
        /// Path to a dex.json file
        file: PathBuf,

        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List categories and their vocabulary pool sizes
    Catalog {
        /// Data directory with types/ and moves/
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },

    /// Assign verbs and adjectives to categories with a word-vector model
    Vocab {
        /// Word vectors in word2vec / GloVe text format
        #[arg(short, long)]
        model: PathBuf,

        /// Data directory with types/ and moves/
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    let result = match cli.command {
        Commands::Dex {
            categories,
            entries,
            seed,
            offline,
            data,
            out,
        } => commands::dex::run(&commands::dex::DexArgs {
            categories,
            entries,
            seed,
            offline,
            data,
            out,
        }),
        Commands::Show { file, category } => commands::show::run(&file, category.as_deref()),
        Commands::Catalog { data } => commands::catalog::run(&data),
        Commands::Vocab { model, data } => commands::vocab::run(&model, &data),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
