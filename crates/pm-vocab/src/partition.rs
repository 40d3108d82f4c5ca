//! Embedding-distance partitioning of verbs and adjectives.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::PartitionConfig;
use crate::model::EmbeddingModel;

/// Word lists to partition.
#[derive(Debug, Clone, Copy)]
pub struct VocabInput<'a> {
    /// Every candidate verb.
    pub verbs: &'a [String],
    /// Every candidate adjective.
    pub adjectives: &'a [String],
    /// Category names, as looked up in the model.
    pub categories: &'a [String],
    /// Verbs never to use (auxiliaries, nouns that double as verbs).
    pub exclude: &'a [String],
}

/// One category's words, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pools {
    /// Category verbs.
    pub verbs: Vec<String>,
    /// Category adjectives.
    pub adjectives: Vec<String>,
}

/// Result of a partitioning run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Category-agnostic attack verbs, sorted.
    pub generic: Vec<String>,
    /// Pools per category name.
    pub pools: BTreeMap<String, Pools>,
}

/// Split the vocabulary between the generic pool and the categories.
pub fn partition(model: &EmbeddingModel, input: &VocabInput<'_>, config: &PartitionConfig) -> Partition {
    let verbs: Vec<&str> = dedup(input.verbs)
        .into_iter()
        .filter(|v| v.chars().count() > config.max_ignored_verb_len)
        .filter(|v| !input.exclude.iter().any(|e| e == v))
        .collect();

    let generic: BTreeSet<&str> = verbs
        .iter()
        .copied()
        .filter(|v| is_generic(model, v, config))
        .collect();
    let specific: Vec<&str> = verbs
        .iter()
        .copied()
        .filter(|v| !generic.contains(v))
        .collect();
    let adjectives = dedup(input.adjectives);

    let verb_pools = assign(model, &specific, input.categories, config);
    let adjective_pools = assign(model, &adjectives, input.categories, config);

    let pools = input
        .categories
        .iter()
        .map(|name| {
            let p = Pools {
                verbs: pool_words(&verb_pools, name),
                adjectives: pool_words(&adjective_pools, name),
            };
            tracing::info!(
                category = %name,
                verbs = p.verbs.len(),
                adjectives = p.adjectives.len(),
                "partitioned vocabulary"
            );
            (name.clone(), p)
        })
        .collect();

    Partition {
        generic: generic.into_iter().map(String::from).collect(),
        pools,
    }
}

fn pool_words(pools: &BTreeMap<&str, BTreeSet<&str>>, name: &str) -> Vec<String> {
    pools
        .get(name)
        .map(|set| set.iter().map(|w| w.to_string()).collect())
        .unwrap_or_default()
}

fn dedup(words: &[String]) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    words
        .iter()
        .map(|w| w.trim())
        .filter(|w| !w.is_empty() && seen.insert(*w))
        .collect()
}

fn is_generic(model: &EmbeddingModel, verb: &str, config: &PartitionConfig) -> bool {
    config
        .archetypes
        .iter()
        .filter_map(|a| model.distance(verb, a))
        .any(|d| d < config.generic_threshold)
}

/// Assign one part of speech to categories, then top up thin pools.
fn assign<'w>(
    model: &EmbeddingModel,
    words: &[&'w str],
    categories: &'w [String],
    config: &PartitionConfig,
) -> BTreeMap<&'w str, BTreeSet<&'w str>> {
    let mut pools: BTreeMap<&str, BTreeSet<&str>> = categories
        .iter()
        .map(|c| (c.as_str(), BTreeSet::new()))
        .collect();

    for &word in words {
        let distances: Vec<(&str, f32)> = categories
            .iter()
            .filter_map(|c| model.distance(word, c).map(|d| (c.as_str(), d)))
            .collect();
        if let Some((category, _)) =
            strict_minimum(&distances).filter(|&(_, d)| d < config.working_threshold)
        {
            pools.entry(category).or_default().insert(word);
        }
        for &(category, d) in &distances {
            if d < config.dual_threshold {
                pools.entry(category).or_default().insert(word);
            }
        }
    }

    for category in categories {
        let pool = pools.entry(category.as_str()).or_default();
        top_up(model, words, category, pool, config);
    }
    pools
}

/// The unique closest category, if there is one.
fn strict_minimum<'c>(distances: &[(&'c str, f32)]) -> Option<(&'c str, f32)> {
    let best = distances
        .iter()
        .copied()
        .min_by(|a, b| a.1.total_cmp(&b.1))?;
    let ties = distances.iter().filter(|(_, d)| *d == best.1).count();
    (ties == 1).then_some(best)
}

/// Widen the category's threshold, then borrow from its neighbours.
fn top_up<'w>(
    model: &EmbeddingModel,
    words: &[&'w str],
    category: &str,
    pool: &mut BTreeSet<&'w str>,
    config: &PartitionConfig,
) {
    for threshold in config.widening_steps() {
        if pool.len() >= config.min_pool {
            return;
        }
        for &word in words {
            if model.distance(word, category).is_some_and(|d| d < threshold) {
                pool.insert(word);
            }
        }
    }

    if pool.len() >= config.min_pool {
        return;
    }
    for (neighbour, _) in model.most_similar(category, config.neighbour_topn) {
        if pool.len() >= config.min_pool {
            return;
        }
        for &word in words {
            if word == neighbour {
                continue;
            }
            if model
                .distance(word, &neighbour)
                .is_some_and(|d| d < config.working_threshold)
            {
                pool.insert(word);
            }
        }
    }

    if pool.len() < config.min_pool {
        tracing::warn!(category, size = pool.len(), min = config.min_pool, "pool still under minimum");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    /// Axes: 0 = combat, 1 = fire, 2 = water, 3 = unrelated.
    fn model() -> EmbeddingModel {
        EmbeddingModel::from_pairs([
            ("attack", vec![1.0, 0.0, 0.0, 0.0]),
            ("pummel", vec![1.0, 0.1, 0.0, 0.0]),
            ("hit", vec![1.0, 0.0, 0.0, 0.0]),
            ("fire", vec![0.0, 1.0, 0.0, 0.0]),
            ("water", vec![0.0, 0.0, 1.0, 0.0]),
            ("ice", vec![0.0, 0.0, -1.0, 0.0]),
            ("burn", vec![0.0, 1.0, 0.2, 0.0]),
            ("soak", vec![0.0, 0.2, 1.0, 0.0]),
            ("steam", vec![0.0, 1.0, 1.0, 0.0]),
            ("smoulder", vec![0.0, 0.0, 0.0, 1.0]),
            ("hot", vec![0.0, 1.0, 0.0, 0.3]),
            ("wet", vec![0.0, 0.0, 1.0, 0.3]),
            ("tepid", vec![0.0, 1.0, 0.6, 0.0]),
        ])
    }

    /// Dual assignment tight enough that only near-exact matches double up.
    fn tight() -> PartitionConfig {
        PartitionConfig::default()
            .with_min_pool(1)
            .with_thresholds(0.5, 0.6, 0.2)
    }

    fn run_for(categories: &[&str], config: &PartitionConfig) -> Partition {
        let verbs = s(&["pummel", "burn", "scorch", "soak", "steam", "hit", "smoulder", "burn"]);
        let adjectives = s(&["hot", "wet", "tepid"]);
        let categories = s(categories);
        let exclude = s(&["scorch"]);
        let input = VocabInput {
            verbs: &verbs,
            adjectives: &adjectives,
            categories: &categories,
            exclude: &exclude,
        };
        partition(&model(), &input, config)
    }

    fn run(config: &PartitionConfig) -> Partition {
        run_for(&["fire", "water"], config)
    }

    fn has(words: &[String], w: &str) -> bool {
        words.iter().any(|x| x == w)
    }

    #[test]
    fn generic_verbs_leave_category_pools() {
        let p = run(&tight());
        assert_eq!(p.generic, ["pummel"]);
        assert!(p.pools.values().all(|pool| !has(&pool.verbs, "pummel")));
    }

    #[test]
    fn short_and_excluded_verbs_are_ignored() {
        let p = run(&PartitionConfig::default());
        for pool in p.pools.values() {
            assert!(!has(&pool.verbs, "hit"));
            assert!(!has(&pool.verbs, "scorch"));
        }
        assert!(!has(&p.generic, "hit"));
    }

    #[test]
    fn nearest_category_wins() {
        let p = run(&tight());
        assert_eq!(p.pools["fire"].verbs, ["burn"]);
        assert_eq!(p.pools["water"].verbs, ["soak"]);
        assert_eq!(p.pools["fire"].adjectives, ["hot", "tepid"]);
        assert_eq!(p.pools["water"].adjectives, ["wet"]);
    }

    #[test]
    fn ties_only_assign_through_dual_threshold() {
        // "steam" is equally close to fire and water (distance ≈ 0.29).
        let p = run(&tight());
        assert!(!has(&p.pools["fire"].verbs, "steam"));
        assert!(!has(&p.pools["water"].verbs, "steam"));

        let p = run(&PartitionConfig::default().with_min_pool(1));
        assert!(has(&p.pools["fire"].verbs, "steam"));
        assert!(has(&p.pools["water"].verbs, "steam"));
    }

    #[test]
    fn thin_pools_widen() {
        let p = run(&tight().with_min_pool(2));
        assert_eq!(p.pools["fire"].verbs, ["burn", "steam"]);
        assert_eq!(p.pools["water"].verbs, ["soak", "steam"]);
    }

    #[test]
    fn unreachable_pools_borrow_from_neighbours() {
        let p = run_for(&["ice"], &tight());
        let model = model();
        let verbs = &p.pools["ice"].verbs;
        assert!(!verbs.is_empty());
        for v in verbs {
            assert!(model.distance(v, "ice").unwrap() >= 0.9, "{v}");
        }
    }

    #[test]
    fn unknown_category_gets_empty_pools() {
        let p = run_for(&["ghost"], &tight());
        assert_eq!(p.pools["ghost"], Pools::default());
    }

    #[test]
    fn strict_minimum_rejects_ties() {
        assert_eq!(strict_minimum(&[("a", 0.2), ("b", 0.3)]), Some(("a", 0.2)));
        assert_eq!(strict_minimum(&[("a", 0.2), ("b", 0.2)]), None);
        assert_eq!(strict_minimum(&[]), None);
    }
}
