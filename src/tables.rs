//! Biome transition tables
//!
//! A table maps each biome to an ordered list of weighted candidates for the
//! next cell grown from it. Selection lays the candidates out as contiguous
//! half-open weight intervals in declaration order and makes a single draw in
//! `[0, total_weight)`.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, HexflowerError, Result};

/// Biome identifier
pub type Biome = String;

/// One candidate of a weighted list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedBiome {
    pub biome: Biome,
    pub weight: u32,
}

impl WeightedBiome {
    pub fn new(biome: impl Into<Biome>, weight: u32) -> Self {
        Self {
            biome: biome.into(),
            weight,
        }
    }
}

/// Weighted transition rules plus the root (center) biome policy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomeTable {
    /// Fixed center biome. When absent, the center is drawn from `start`.
    #[serde(default)]
    pub root: Option<Biome>,
    /// Distribution for the center cell when no root is configured
    #[serde(default)]
    pub start: Vec<WeightedBiome>,
    pub transitions: BTreeMap<Biome, Vec<WeightedBiome>>,
}

/// Sandbox generator biomes, in table order.
pub const SANDBOX_BIOMES: [&str; 5] = ["grassland", "forest", "hills", "marsh", "mountains"];

impl BiomeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in d10 tables.
    ///
    /// Start: 1-4 grassland, 5-6 forest, 7-8 hills, 9 marsh, 10 mountains.
    /// Next: 1-5 same as previous, 6 grassland, 7 forest, 8 hills, 9 marsh,
    /// 10 mountains.
    pub fn sandbox() -> Self {
        let start = vec![
            WeightedBiome::new("grassland", 4),
            WeightedBiome::new("forest", 2),
            WeightedBiome::new("hills", 2),
            WeightedBiome::new("marsh", 1),
            WeightedBiome::new("mountains", 1),
        ];

        let mut transitions = BTreeMap::new();
        for prev in SANDBOX_BIOMES {
            let mut candidates = vec![WeightedBiome::new(prev, 5)];
            candidates.extend(SANDBOX_BIOMES.iter().map(|&b| WeightedBiome::new(b, 1)));
            transitions.insert(prev.to_string(), candidates);
        }

        Self {
            root: None,
            start,
            transitions,
        }
    }

    pub fn with_root(mut self, root: impl Into<Biome>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_start(mut self, start: Vec<WeightedBiome>) -> Self {
        self.start = start;
        self
    }

    pub fn with_transition(mut self, biome: impl Into<Biome>, candidates: Vec<WeightedBiome>) -> Self {
        self.transitions.insert(biome.into(), candidates);
        self
    }

    pub fn candidates(&self, biome: &str) -> Result<&[WeightedBiome]> {
        self.transitions
            .get(biome)
            .map(Vec::as_slice)
            .ok_or_else(|| HexflowerError::UnknownBiome(biome.to_string()))
    }

    /// Draw the biome of a cell grown from a `current` cell, advancing `rng`.
    pub fn next<R: Rng>(&self, current: &str, rng: &mut R) -> Result<Biome> {
        let candidates = self.candidates(current)?;
        weighted_pick(candidates, rng)
            .map(|c| c.biome.clone())
            .ok_or_else(|| HexflowerError::EmptyCandidates(current.to_string()))
    }

    /// Biome of a snowflake center. A configured root consumes no randomness.
    pub fn root_biome<R: Rng>(&self, rng: &mut R) -> Result<Biome> {
        if let Some(root) = &self.root {
            return Ok(root.clone());
        }
        weighted_pick(&self.start, rng)
            .map(|c| c.biome.clone())
            .ok_or_else(|| HexflowerError::EmptyCandidates("start".to_string()))
    }

    /// Check that every biome reachable from the root (or any start
    /// candidate) has a usable candidate list.
    pub fn validate(&self) -> Result<()> {
        let mut queue: VecDeque<&str> = VecDeque::new();
        match &self.root {
            Some(root) => queue.push_back(root.as_str()),
            None => {
                if total_weight(&self.start) == 0 {
                    return Err(HexflowerError::EmptyCandidates("start".to_string()));
                }
                queue.extend(self.start.iter().filter(|c| c.weight > 0).map(|c| c.biome.as_str()));
            }
        }

        let mut seen: HashSet<&str> = queue.iter().copied().collect();
        while let Some(biome) = queue.pop_front() {
            let candidates = self.candidates(biome)?;
            if total_weight(candidates) == 0 {
                return Err(HexflowerError::EmptyCandidates(biome.to_string()));
            }
            for c in candidates.iter().filter(|c| c.weight > 0) {
                if seen.insert(c.biome.as_str()) {
                    queue.push_back(c.biome.as_str());
                }
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load a table from a JSON file.
    pub fn load(path: &Path) -> std::result::Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn total_weight(candidates: &[WeightedBiome]) -> u64 {
    candidates.iter().map(|c| c.weight as u64).sum()
}

/// Weighted draw over contiguous half-open intervals in declaration order.
/// Returns `None` when the list carries no weight.
pub fn weighted_pick<'a, R: Rng>(
    candidates: &'a [WeightedBiome],
    rng: &mut R,
) -> Option<&'a WeightedBiome> {
    let total = total_weight(candidates);
    if total == 0 {
        return None;
    }
    let draw = rng.gen_range(0..total);
    pick_at(candidates, draw)
}

/// Candidate whose interval contains `draw`.
fn pick_at(candidates: &[WeightedBiome], draw: u64) -> Option<&WeightedBiome> {
    let mut upper = 0u64;
    for candidate in candidates {
        upper += candidate.weight as u64;
        if draw < upper {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn abc() -> Vec<WeightedBiome> {
        vec![
            WeightedBiome::new("a", 2),
            WeightedBiome::new("b", 0),
            WeightedBiome::new("c", 3),
        ]
    }

    #[test]
    fn test_pick_at_interval_boundaries() {
        let list = abc();
        assert_eq!(pick_at(&list, 0).unwrap().biome, "a");
        assert_eq!(pick_at(&list, 1).unwrap().biome, "a");
        // zero-weight "b" owns no interval
        assert_eq!(pick_at(&list, 2).unwrap().biome, "c");
        assert_eq!(pick_at(&list, 4).unwrap().biome, "c");
        assert!(pick_at(&list, 5).is_none());
    }

    #[test]
    fn test_weighted_pick_never_selects_zero_weight() {
        let list = abc();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..500 {
            assert_ne!(weighted_pick(&list, &mut rng).unwrap().biome, "b");
        }
    }

    #[test]
    fn test_weighted_pick_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(weighted_pick(&[], &mut rng).is_none());
        assert!(weighted_pick(&[WeightedBiome::new("x", 0)], &mut rng).is_none());
    }

    #[test]
    fn test_next_is_deterministic() {
        let table = BiomeTable::sandbox();
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(table.next("forest", &mut a).unwrap(), table.next("forest", &mut b).unwrap());
        }
    }

    #[test]
    fn test_next_unknown_biome() {
        let table = BiomeTable::sandbox();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            table.next("lava", &mut rng),
            Err(HexflowerError::UnknownBiome("lava".into()))
        );
    }

    #[test]
    fn test_next_empty_candidates() {
        let table = BiomeTable::new().with_transition("void", vec![]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            table.next("void", &mut rng),
            Err(HexflowerError::EmptyCandidates("void".into()))
        );
    }

    #[test]
    fn test_sandbox_favours_same_biome() {
        let table = BiomeTable::sandbox();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let same = (0..2000)
            .filter(|_| table.next("hills", &mut rng).unwrap() == "hills")
            .count();
        // expected 6 in 10
        assert!(same > 1000 && same < 1400, "same = {}", same);
    }

    #[test]
    fn test_root_biome_configured_consumes_no_randomness() {
        let table = BiomeTable::sandbox().with_root("marsh");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut untouched = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(table.root_biome(&mut rng).unwrap(), "marsh");
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_root_biome_from_start() {
        let table = BiomeTable::sandbox();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let root = table.root_biome(&mut rng).unwrap();
        assert!(SANDBOX_BIOMES.contains(&root.as_str()));

        let empty = BiomeTable::new();
        assert_eq!(
            empty.root_biome(&mut rng),
            Err(HexflowerError::EmptyCandidates("start".into()))
        );
    }

    #[test]
    fn test_validate() {
        assert!(BiomeTable::sandbox().validate().is_ok());
        assert!(BiomeTable::sandbox().with_root("forest").validate().is_ok());

        let dangling = BiomeTable::new()
            .with_root("a")
            .with_transition("a", vec![WeightedBiome::new("a", 1), WeightedBiome::new("b", 1)]);
        assert_eq!(dangling.validate(), Err(HexflowerError::UnknownBiome("b".into())));

        // unreachable entries do not matter, zero-weight candidates are never reached
        let partial = BiomeTable::new()
            .with_root("a")
            .with_transition("a", vec![WeightedBiome::new("a", 1), WeightedBiome::new("ghost", 0)]);
        assert!(partial.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let table = BiomeTable::sandbox().with_root("hills");
        let json = serde_json::to_string(&table).unwrap();
        let back = BiomeTable::from_json_str(&json).unwrap();
        assert_eq!(table, back);
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "transitions": {
                "sea": [{"biome": "sea", "weight": 3}, {"biome": "reef", "weight": 1}],
                "reef": [{"biome": "sea", "weight": 1}]
            }
        }"#;
        let table = BiomeTable::from_json_str(json).unwrap();
        assert!(table.root.is_none());
        assert!(table.start.is_empty());
        assert_eq!(table.candidates("sea").unwrap().len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = BiomeTable::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
