//! Configuration for a game session.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::draw::DrawTiming;
use crate::error::{GameError, GameResult};
use crate::questions::CATALOG;

/// What the question pool does once every question has been asked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Refuse to start another round.
    #[default]
    Reject,
    /// Refill the pool from the full catalog and keep going.
    Recycle,
}

/// Configuration for a game session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// RNG seed for reproducible draws and question order.
    pub seed: u64,
    /// Time between highlight ticks during a draw.
    pub tick_interval: Duration,
    /// Total time from draw start to the final pick.
    pub draw_duration: Duration,
    /// Behavior once the question pool runs dry.
    pub exhaustion: ExhaustionPolicy,
    /// Questions the pool is filled from.
    pub catalog: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_interval: Duration::from_millis(100),
            draw_duration: Duration::from_millis(3000),
            exhaustion: ExhaustionPolicy::Reject,
            catalog: CATALOG.iter().map(|q| (*q).to_string()).collect(),
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the time between highlight ticks.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the total draw duration.
    pub fn with_draw_duration(mut self, duration: Duration) -> Self {
        self.draw_duration = duration;
        self
    }

    /// Set the pool exhaustion policy.
    pub fn with_exhaustion(mut self, policy: ExhaustionPolicy) -> Self {
        self.exhaustion = policy;
        self
    }

    /// Replace the question catalog.
    ///
    /// Entries are trimmed; blank entries and repeats are dropped so that a
    /// pool never hands out the same text twice.
    pub fn with_catalog<I, S>(mut self, questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog: Vec<String> = Vec::new();
        for question in questions {
            let question: String = question.into();
            let trimmed = question.trim();
            if !trimmed.is_empty() && !catalog.iter().any(|q| q == trimmed) {
                catalog.push(trimmed.to_string());
            }
        }
        self.catalog = catalog;
        self
    }

    /// Draw timing derived from this config.
    pub fn timing(&self) -> DrawTiming {
        DrawTiming {
            tick_interval: self.tick_interval,
            duration: self.draw_duration,
        }
    }

    /// Check that the config can run a game.
    pub fn validate(&self) -> GameResult<()> {
        if self.tick_interval.is_zero() {
            return Err(GameError::InvalidConfig(
                "tick interval must be greater than zero".to_string(),
            ));
        }
        if self.draw_duration < self.tick_interval {
            return Err(GameError::InvalidConfig(format!(
                "draw duration ({:?}) must be at least one tick interval ({:?})",
                self.draw_duration, self.tick_interval
            )));
        }
        if self.catalog.is_empty() {
            return Err(GameError::InvalidConfig(
                "question catalog is empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.tick_interval, Duration::from_millis(100));
        assert_eq!(cfg.draw_duration, Duration::from_millis(3000));
        assert_eq!(cfg.exhaustion, ExhaustionPolicy::Reject);
        assert_eq!(cfg.catalog.len(), 18);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let cfg = GameConfig::default()
            .with_seed(7)
            .with_tick_interval(Duration::from_millis(5))
            .with_draw_duration(Duration::from_millis(50))
            .with_exhaustion(ExhaustionPolicy::Recycle);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.timing().tick_interval, Duration::from_millis(5));
        assert_eq!(cfg.timing().duration, Duration::from_millis(50));
        assert_eq!(cfg.exhaustion, ExhaustionPolicy::Recycle);
    }

    #[test]
    fn catalog_is_trimmed_and_deduplicated() {
        let cfg = GameConfig::default().with_catalog(["  Why? ", "", "Why?", "How?", "   "]);
        assert_eq!(cfg.catalog, vec!["Why?".to_string(), "How?".to_string()]);
    }

    #[test]
    fn zero_tick_interval_rejected() {
        let cfg = GameConfig::default().with_tick_interval(Duration::ZERO);
        assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn draw_shorter_than_tick_rejected() {
        let cfg = GameConfig::default()
            .with_tick_interval(Duration::from_millis(100))
            .with_draw_duration(Duration::from_millis(50));
        assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn empty_catalog_rejected() {
        let cfg = GameConfig::default().with_catalog(Vec::<String>::new());
        assert!(matches!(cfg.validate(), Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn policy_serializes_snake_case() {
        let json = serde_json::to_string(&ExhaustionPolicy::Recycle).unwrap();
        assert_eq!(json, "\"recycle\"");
    }
}
