//! Thresholds for vocabulary partitioning.

/// Words that define "generic combat".
pub const DEFAULT_ARCHETYPES: [&str; 11] = [
    "attack", "assault", "battle", "clash", "kill", "fight", "punch", "kick", "slash", "strike",
    "defend",
];

/// Configuration for [`partition`](crate::partition()).
///
/// Distances are cosine distances in `[0, 2]`.
#[derive(Debug, Clone)]
pub struct PartitionConfig {
    /// Verbs closer than this to any archetype are generic.
    pub generic_threshold: f32,
    /// A word goes to its nearest category if closer than this.
    pub working_threshold: f32,
    /// A word also goes to every category closer than this.
    pub dual_threshold: f32,
    /// Smallest acceptable pool per part of speech.
    pub min_pool: usize,
    /// Threshold increase per widening step.
    pub widen_step: f32,
    /// Widening never goes past this.
    pub widen_cap: f32,
    /// Neighbours of the category name searched as a last resort.
    pub neighbour_topn: usize,
    /// Verbs of this many letters or fewer are ignored.
    pub max_ignored_verb_len: usize,
    /// Archetype attack words.
    pub archetypes: Vec<String>,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            generic_threshold: 0.5,
            working_threshold: 0.6,
            dual_threshold: 0.45,
            min_pool: 12,
            widen_step: 0.05,
            widen_cap: 0.9,
            neighbour_topn: 30,
            max_ignored_verb_len: 3,
            archetypes: DEFAULT_ARCHETYPES.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl PartitionConfig {
    /// Set the minimum pool size.
    pub fn with_min_pool(mut self, n: usize) -> Self {
        self.min_pool = n;
        self
    }

    /// Set the generic, working, and dual-assignment thresholds.
    pub fn with_thresholds(mut self, generic: f32, working: f32, dual: f32) -> Self {
        self.generic_threshold = generic;
        self.working_threshold = working;
        self.dual_threshold = dual;
        self
    }

    /// Set the widening cap. Never below the working threshold.
    pub fn with_widen_cap(mut self, cap: f32) -> Self {
        self.widen_cap = cap.max(self.working_threshold);
        self
    }

    /// Replace the archetype words.
    pub fn with_archetypes(mut self, words: &[&str]) -> Self {
        self.archetypes = words.iter().map(|w| w.to_string()).collect();
        self
    }

    /// Thresholds tried when widening, working threshold excluded.
    pub fn widening_steps(&self) -> Vec<f32> {
        if self.widen_step <= 0.0 {
            return Vec::new();
        }
        let span = self.widen_cap - self.working_threshold;
        let steps = (span / self.widen_step + 1e-4).floor().max(0.0) as usize;
        (1..=steps)
            .map(|k| self.working_threshold + k as f32 * self.widen_step)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = PartitionConfig::default();
        assert_eq!(cfg.min_pool, 12);
        assert_eq!(cfg.neighbour_topn, 30);
        assert_eq!(cfg.archetypes.len(), 11);
        assert!(cfg.dual_threshold < cfg.working_threshold);
    }

    #[test]
    fn widening_stops_at_cap() {
        let steps = PartitionConfig::default().widening_steps();
        assert_eq!(steps.len(), 6);
        assert!((steps[0] - 0.65).abs() < 1e-5);
        assert!((steps[5] - 0.9).abs() < 1e-5);
    }

    #[test]
    fn builder_methods() {
        let cfg = PartitionConfig::default()
            .with_min_pool(2)
            .with_thresholds(0.3, 0.4, 0.2)
            .with_widen_cap(0.1)
            .with_archetypes(&["attack"]);
        assert_eq!(cfg.min_pool, 2);
        assert!((cfg.widen_cap - 0.4).abs() < 1e-6);
        assert!(cfg.widening_steps().is_empty());
        assert_eq!(cfg.archetypes, ["attack"]);
    }
}
