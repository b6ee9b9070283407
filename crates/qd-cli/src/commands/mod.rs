pub mod play;
pub mod questions;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use qd_engine::questions::load_catalog;
use qd_engine::{ExhaustionPolicy, GameConfig};

/// Game settings shared by commands that run a session.
#[derive(Args, Debug, Clone)]
pub struct GameArgs {
    /// RNG seed for reproducible draws (default: random)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Milliseconds between highlight ticks
    #[arg(long, default_value = "100")]
    pub tick_ms: u64,

    /// Milliseconds from draw start to the final pick
    #[arg(long, default_value = "3000")]
    pub draw_ms: u64,

    /// JSON file with an array of questions (default: built-in catalog)
    #[arg(short, long)]
    pub questions: Option<PathBuf>,

    /// Reuse the catalog once every question has been asked
    #[arg(long)]
    pub recycle: bool,
}

impl GameArgs {
    /// Turn command-line settings into a game config.
    pub fn to_config(&self) -> Result<GameConfig, String> {
        let mut config = GameConfig::default()
            .with_seed(self.seed.unwrap_or_else(rand::random))
            .with_tick_interval(Duration::from_millis(self.tick_ms))
            .with_draw_duration(Duration::from_millis(self.draw_ms));

        if self.recycle {
            config = config.with_exhaustion(ExhaustionPolicy::Recycle);
        }
        if let Some(path) = &self.questions {
            config = config.with_catalog(read_catalog(path)?);
        }

        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

/// Load a question file, or fall back to the built-in catalog.
///
/// File questions are cleaned the same way a game would see them.
fn catalog_or_default(path: Option<&Path>) -> Result<Vec<String>, String> {
    let config = GameConfig::default();
    match path {
        Some(path) => Ok(config.with_catalog(read_catalog(path)?).catalog),
        None => Ok(config.catalog),
    }
}

fn read_catalog(path: &Path) -> Result<Vec<String>, String> {
    load_catalog(path).map_err(|e| e.to_string())
}
