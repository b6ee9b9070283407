//! Question catalog and the no-repeat question pool.
//!
//! The pool starts as a copy of the catalog. Each dispensed question leaves
//! the pool for good, so a question is asked at most once per pool lifetime.
//! What happens once the pool is empty is decided by [`ExhaustionPolicy`].

use std::path::Path;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::ExhaustionPolicy;
use crate::error::{GameError, GameResult};

/// Built-in questions (18 entries).
pub const CATALOG: &[&str] = &[
    "What is the capital of France?",
    "How many continents are there on Earth?",
    "Which planet is known as the Red Planet?",
    "What is the largest ocean on Earth?",
    "Who painted the Mona Lisa?",
    "What is the chemical symbol for gold?",
    "How many legs does a spider have?",
    "What is the tallest mountain in the world?",
    "In which country are the pyramids of Giza?",
    "What is the boiling point of water at sea level in Celsius?",
    "Which instrument has 88 keys?",
    "What is the longest river in South America?",
    "How many sides does a hexagon have?",
    "Which gas do plants absorb from the air?",
    "What is the smallest prime number?",
    "Which language has the most native speakers?",
    "Who wrote Romeo and Juliet?",
    "What is the hardest natural substance?",
];

/// Load a question catalog from a JSON file holding an array of strings.
pub fn load_catalog(path: &Path) -> GameResult<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|source| GameError::QuestionFileIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| GameError::QuestionFileParse {
        path: path.to_path_buf(),
        source,
    })
}

/// The questions not yet asked in the current pool lifetime.
#[derive(Debug, Clone)]
pub struct QuestionPool {
    catalog: Vec<String>,
    remaining: Vec<String>,
    policy: ExhaustionPolicy,
}

impl QuestionPool {
    /// Create a full pool from a catalog.
    pub fn new(catalog: Vec<String>, policy: ExhaustionPolicy) -> Self {
        Self {
            remaining: catalog.clone(),
            catalog,
            policy,
        }
    }

    /// Take one question uniformly at random from the remaining pool.
    ///
    /// When the pool is empty, [`ExhaustionPolicy::Reject`] fails with
    /// [`GameError::ExhaustedPool`] and [`ExhaustionPolicy::Recycle`] refills
    /// the pool from the catalog first.
    pub fn dispense(&mut self, rng: &mut StdRng) -> GameResult<String> {
        if self.remaining.is_empty() {
            match self.policy {
                ExhaustionPolicy::Reject => return Err(GameError::ExhaustedPool),
                ExhaustionPolicy::Recycle => {
                    debug!(questions = self.catalog.len(), "question pool refilled");
                    self.reset();
                }
            }
        }
        if self.remaining.is_empty() {
            return Err(GameError::ExhaustedPool);
        }
        let index = rng.random_range(0..self.remaining.len());
        let question = self.remaining.remove(index);
        debug!(remaining = self.remaining.len(), "dispensed question");
        Ok(question)
    }

    /// Return an unasked question to the pool.
    ///
    /// Used when a round is abandoned before its question was revealed.
    pub fn put_back(&mut self, question: String) {
        if !self.remaining.contains(&question) {
            self.remaining.push(question);
        }
    }

    /// Refill the pool from the catalog, starting a new pool lifetime.
    pub fn reset(&mut self) {
        self.remaining = self.catalog.clone();
    }

    /// Questions still in the pool.
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    /// Size of the full catalog the pool is filled from.
    pub fn catalog_len(&self) -> usize {
        self.catalog.len()
    }

    /// Whether every question has been asked.
    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn catalog() -> Vec<String> {
        CATALOG.iter().map(|q| (*q).to_string()).collect()
    }

    #[test]
    fn catalog_has_18_distinct_entries() {
        assert_eq!(CATALOG.len(), 18);
        let unique: HashSet<_> = CATALOG.iter().collect();
        assert_eq!(unique.len(), 18);
    }

    #[test]
    fn dispense_never_repeats_and_empties_pool() {
        let mut pool = QuestionPool::new(catalog(), ExhaustionPolicy::Reject);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..CATALOG.len() {
            let q = pool.dispense(&mut rng).unwrap();
            assert!(seen.insert(q));
        }
        assert!(pool.is_exhausted());
        assert_eq!(seen.len(), 18);
        assert_eq!(pool.catalog_len(), 18);
    }

    #[test]
    fn reject_policy_fails_when_empty() {
        let mut pool = QuestionPool::new(vec!["Only?".to_string()], ExhaustionPolicy::Reject);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pool.dispense(&mut rng).unwrap(), "Only?");
        assert!(matches!(pool.dispense(&mut rng), Err(GameError::ExhaustedPool)));
        assert!(matches!(pool.dispense(&mut rng), Err(GameError::ExhaustedPool)));
    }

    #[test]
    fn recycle_policy_refills() {
        let mut pool = QuestionPool::new(
            vec!["A?".to_string(), "B?".to_string()],
            ExhaustionPolicy::Recycle,
        );
        let mut rng = StdRng::seed_from_u64(3);
        pool.dispense(&mut rng).unwrap();
        pool.dispense(&mut rng).unwrap();
        assert!(pool.is_exhausted());
        let q = pool.dispense(&mut rng).unwrap();
        assert!(q == "A?" || q == "B?");
        assert_eq!(pool.remaining().len(), 1);
    }

    #[test]
    fn empty_catalog_fails_even_when_recycling() {
        let mut pool = QuestionPool::new(Vec::new(), ExhaustionPolicy::Recycle);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(pool.dispense(&mut rng), Err(GameError::ExhaustedPool)));
    }

    #[test]
    fn put_back_restores_question() {
        let mut pool = QuestionPool::new(vec!["A?".to_string()], ExhaustionPolicy::Reject);
        let mut rng = StdRng::seed_from_u64(3);
        let q = pool.dispense(&mut rng).unwrap();
        pool.put_back(q.clone());
        pool.put_back(q);
        assert_eq!(pool.remaining(), &["A?".to_string()]);
    }

    #[test]
    fn load_catalog_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, r#"["One?", "Two?"]"#).unwrap();
        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded, vec!["One?".to_string(), "Two?".to_string()]);
    }

    #[test]
    fn load_catalog_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.json");
        std::fs::write(&path, r#"{"not": "a list"}"#).unwrap();
        assert!(matches!(
            load_catalog(&path),
            Err(GameError::QuestionFileParse { .. })
        ));
    }

    #[test]
    fn load_catalog_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_catalog(&dir.path().join("missing.json")),
            Err(GameError::QuestionFileIo { .. })
        ));
    }

    proptest! {
        #[test]
        fn n_dispenses_drain_an_n_pool(size in 1usize..40, seed in any::<u64>()) {
            let questions: Vec<String> = (0..size).map(|i| format!("Q{i}?")).collect();
            let mut pool = QuestionPool::new(questions, ExhaustionPolicy::Reject);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut seen = HashSet::new();
            for _ in 0..size {
                prop_assert!(seen.insert(pool.dispense(&mut rng).unwrap()));
            }
            prop_assert!(pool.is_exhausted());
            prop_assert!(pool.dispense(&mut rng).is_err());
        }
    }
}
