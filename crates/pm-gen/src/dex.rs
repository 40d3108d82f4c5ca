//! The roster builder.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fs;
use std::path::PathBuf;

use image::RgbaImage;
use pm_core::{Catalog, Category, PALETTE, Rarity, Roster, RosterMeta};
use pm_scrape::Scraper;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::config::DexConfig;
use crate::entry::{EntryContext, synthesize_entry};
use crate::error::{GenError, GenResult};
use crate::lexicon::Lexicon;

/// Name of the roster file inside a run directory.
pub const DEX_FILE: &str = "dex.json";
/// Name of the sprite directory inside a run directory.
pub const SPRITES_DIR: &str = "sprites";

/// Rarity tiers for `n` entries: ⌊0.2n⌋ rare, ⌊0.4n⌋ uncommon, the rest
/// common. Commons come first.
pub fn allocate_rarities(n: usize) -> Vec<Rarity> {
    let rare = n / 5;
    let uncommon = 2 * n / 5;
    let common = n - rare - uncommon;
    std::iter::repeat_n(Rarity::Common, common)
        .chain(std::iter::repeat_n(Rarity::Uncommon, uncommon))
        .chain(std::iter::repeat_n(Rarity::Rare, rare))
        .collect()
}

/// Give each category a palette index: the palette is shuffled once and
/// dealt out round-robin, wrapping when categories outnumber colors.
pub fn assign_colors(
    names: &[&str],
    palette_len: usize,
    rng: &mut StdRng,
) -> BTreeMap<String, usize> {
    let mut order: Vec<usize> = (0..palette_len.max(1)).collect();
    order.shuffle(rng);
    names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), order[i % order.len()]))
        .collect()
}

/// Sprites for one category, handed out in order. Once only one is left
/// it is reused for every later entry.
#[derive(Debug, Clone, Default)]
pub struct ImagePool {
    images: VecDeque<RgbaImage>,
}

impl ImagePool {
    /// Pool over already-prepared sprites.
    pub fn new(images: Vec<RgbaImage>) -> Self {
        Self {
            images: images.into(),
        }
    }

    /// The next sprite, or `None` if the pool was empty from the start.
    pub fn draw(&mut self) -> Option<RgbaImage> {
        if self.images.len() > 1 {
            self.images.pop_front()
        } else {
            self.images.front().cloned()
        }
    }

    /// Sprites left.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the pool has nothing to hand out.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// One generation run: the populated roster plus every run-level cache.
#[derive(Debug)]
pub struct Dex {
    config: DexConfig,
    roster: Roster,
    scraper: Scraper,
    pools: HashMap<String, ImagePool>,
}

impl Dex {
    /// Load the catalog and word lists named by `config` and build a roster.
    pub fn build(config: DexConfig, scraper: Scraper) -> GenResult<Self> {
        let catalog = Catalog::load(&config.catalog_dir())?;
        let lexicon = Lexicon::load(&config.moves_dir())?;
        Self::build_from(config, catalog.into_categories(), &lexicon, scraper)
    }

    /// Build a roster from categories and word lists already in memory.
    pub fn build_from(
        config: DexConfig,
        mut categories: Vec<Category>,
        lexicon: &Lexicon,
        mut scraper: Scraper,
    ) -> GenResult<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);

        categories.shuffle(&mut rng);
        categories.truncate(config.num_categories);
        if categories.len() < 2 {
            return Err(GenError::TooFewCategories {
                got: categories.len(),
            });
        }

        let names: Vec<&str> = categories.iter().map(Category::name).collect();
        let colors = assign_colors(&names, PALETTE.len(), &mut rng);
        let moods = lexicon.sample_moods(config.moods_per_run, &mut rng);
        let meta = RosterMeta::new(config.seed, config.entries_per_category);
        let mut roster = Roster::new(meta, categories.clone(), colors)?;

        let ctx = EntryContext {
            categories: &categories,
            attack_verbs: &lexicon.attack_verbs,
            moods: &moods,
            name_retries: config.name_retries,
        };
        let rarities = allocate_rarities(config.entries_per_category);

        for category in &categories {
            tracing::info!(category = category.name(), "generating entries");
            for &rarity in &rarities {
                let entry = synthesize_entry(category, rarity, &ctx, &mut scraper, &mut rng, |name| {
                    roster.contains(category.name(), name)
                })?;
                roster.insert(entry)?;
            }
        }
        tracing::info!(
            id = %roster.meta.id,
            categories = categories.len(),
            entries = roster.entry_count(),
            "roster complete"
        );

        Ok(Self {
            config,
            roster,
            scraper,
            pools: HashMap::new(),
        })
    }

    /// The generated roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Take the roster, dropping the run caches.
    pub fn into_roster(self) -> Roster {
        self.roster
    }

    /// The run configuration.
    pub fn config(&self) -> &DexConfig {
        &self.config
    }

    /// The scraper and its caches.
    pub fn scraper(&self) -> &Scraper {
        &self.scraper
    }

    /// Next sprite for a category. The category's pool is crawled the
    /// first time it is asked for.
    pub fn next_sprite(&mut self, category: &str) -> Option<RgbaImage> {
        if !self.pools.contains_key(category) {
            let corpus_id = self.roster.category(category)?.imagenet().to_string();
            let sprites = self.scraper.crawl_sprites(
                &corpus_id,
                self.config.entries_per_category,
                self.config.sprite_size,
            );
            tracing::debug!(category, sprites = sprites.len(), "filled image pool");
            self.pools
                .insert(category.to_string(), ImagePool::new(sprites));
        }
        self.pools.get_mut(category)?.draw()
    }

    /// Write `dex.json` and one sprite per entry into a fresh directory
    /// under the output root. Returns that directory.
    pub fn write_output(&mut self) -> GenResult<PathBuf> {
        let dir = self.config.output_root.join(&self.roster.meta.id);
        let sprites = dir.join(SPRITES_DIR);
        fs::create_dir_all(&sprites).map_err(|source| GenError::Io {
            path: sprites.clone(),
            source,
        })?;

        self.roster.write(&dir.join(DEX_FILE))?;

        let keys: Vec<(String, String)> = self
            .roster
            .iter_entries()
            .map(|e| (e.primary.clone(), e.name.clone()))
            .collect();
        let mut written = 0;
        for (category, name) in keys {
            match self.next_sprite(&category) {
                Some(img) => {
                    img.save(sprites.join(format!("{category}_{name}.png")))?;
                    written += 1;
                }
                None => tracing::warn!(category = %category, name = %name, "no sprite available"),
            }
        }
        tracing::info!(dir = %dir.display(), sprites = written, "wrote roster");
        Ok(dir)
    }
}
