//! Timed random draw.
//!
//! A draw runs as a Tokio task over a snapshot of candidate IDs taken when
//! the draw starts. It emits one [`DrawEvent::Highlight`] per tick and, once
//! the draw duration has elapsed, exactly one [`DrawEvent::Selected`].
//!
//! Every event carries the generation of the draw that produced it. Starting
//! or cancelling a draw bumps the engine's generation and aborts the running
//! task; events already sitting in the channel from an older generation are
//! discarded when read. A superseded draw therefore never surfaces another
//! highlight or selection.

use std::time::Duration;

use qd_core::ParticipantId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace};

use crate::error::{GameError, GameResult};

/// Tick interval and total duration of a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawTiming {
    /// Time between highlight ticks.
    pub tick_interval: Duration,
    /// Time from draw start to the final pick.
    pub duration: Duration,
}

impl Default for DrawTiming {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(100),
            duration: Duration::from_millis(3000),
        }
    }
}

impl DrawTiming {
    /// Number of highlight ticks that fire strictly before the final pick.
    pub fn highlight_count(&self) -> u32 {
        let interval = self.tick_interval.as_nanos();
        if interval == 0 {
            return 0;
        }
        let ticks = self.duration.as_nanos().div_ceil(interval).saturating_sub(1);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }
}

/// Something that happened during a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawEvent {
    /// A candidate is highlighted for one tick. Cosmetic only.
    Highlight {
        /// The draw that produced this event.
        generation: u64,
        /// 1-based tick number within the draw.
        seq: u32,
        /// The highlighted candidate.
        participant: ParticipantId,
    },
    /// The draw finished and picked a candidate.
    Selected {
        /// The draw that produced this event.
        generation: u64,
        /// The picked candidate.
        participant: ParticipantId,
    },
}

impl DrawEvent {
    /// The generation of the draw that produced this event.
    pub fn generation(&self) -> u64 {
        match self {
            Self::Highlight { generation, .. } | Self::Selected { generation, .. } => *generation,
        }
    }

    /// The candidate this event names.
    pub fn participant(&self) -> ParticipantId {
        match self {
            Self::Highlight { participant, .. } | Self::Selected { participant, .. } => {
                *participant
            }
        }
    }
}

/// Runs one draw at a time and filters out events from superseded draws.
///
/// Must be used from within a Tokio runtime.
pub struct DrawEngine {
    timing: DrawTiming,
    rng: StdRng,
    generation: u64,
    candidates: Vec<ParticipantId>,
    task: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<DrawEvent>,
    rx: mpsc::UnboundedReceiver<DrawEvent>,
}

impl std::fmt::Debug for DrawEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawEngine")
            .field("timing", &self.timing)
            .field("generation", &self.generation)
            .field("candidates", &self.candidates.len())
            .field("drawing", &self.is_drawing())
            .finish()
    }
}

impl DrawEngine {
    /// Create an idle engine. The seed makes every draw reproducible.
    pub fn new(timing: DrawTiming, seed: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            timing,
            rng: StdRng::seed_from_u64(seed),
            generation: 0,
            candidates: Vec::new(),
            task: None,
            tx,
            rx,
        }
    }

    /// Start a draw over a snapshot of candidates, cancelling any draw in
    /// progress. Returns the new draw's generation.
    pub fn start(&mut self, candidates: Vec<ParticipantId>) -> GameResult<u64> {
        if candidates.is_empty() {
            return Err(GameError::EmptyRoster);
        }
        self.cancel();

        self.generation += 1;
        let generation = self.generation;
        let started = Instant::now();
        let rng = StdRng::seed_from_u64(self.rng.random());
        let tx = self.tx.clone();
        let timing = self.timing;

        self.candidates = candidates.clone();
        self.task = Some(tokio::spawn(run_draw(
            generation, candidates, timing, started, rng, tx,
        )));

        debug!(
            generation,
            candidates = self.candidates.len(),
            ticks = timing.highlight_count(),
            "draw started"
        );
        Ok(generation)
    }

    /// Cancel the draw in progress. Returns `false` if nothing was running.
    pub fn cancel(&mut self) -> bool {
        let Some(handle) = self.task.take() else {
            return false;
        };
        handle.abort();
        self.generation += 1;
        self.candidates.clear();
        debug!(generation = self.generation, "draw cancelled");
        true
    }

    /// Wait for the next event of the current draw.
    ///
    /// Returns `None` when no draw is running. Stale events are skipped.
    pub async fn next_event(&mut self) -> Option<DrawEvent> {
        loop {
            if self.task.is_none() {
                return None;
            }
            let event = self.rx.recv().await?;
            if let Some(event) = self.accept(event) {
                return Some(event);
            }
        }
    }

    /// Take the next event of the current draw if one is already queued.
    pub fn try_next_event(&mut self) -> Option<DrawEvent> {
        while self.task.is_some() {
            let event = self.rx.try_recv().ok()?;
            if let Some(event) = self.accept(event) {
                return Some(event);
            }
        }
        None
    }

    /// Whether a draw is in progress.
    pub fn is_drawing(&self) -> bool {
        self.task.is_some()
    }

    /// Generation of the most recent draw or cancellation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Candidate snapshot of the draw in progress.
    pub fn candidates(&self) -> &[ParticipantId] {
        &self.candidates
    }

    fn accept(&mut self, event: DrawEvent) -> Option<DrawEvent> {
        if event.generation() != self.generation {
            debug!(
                event_generation = event.generation(),
                current_generation = self.generation,
                "discarding stale draw event"
            );
            return None;
        }
        if let DrawEvent::Selected { participant, .. } = event {
            debug!(generation = self.generation, %participant, "draw finished");
            self.task = None;
            self.candidates.clear();
        }
        Some(event)
    }
}

impl Drop for DrawEngine {
    fn drop(&mut self) {
        if let Some(handle) = self.task.take() {
            handle.abort();
        }
    }
}

async fn run_draw(
    generation: u64,
    candidates: Vec<ParticipantId>,
    timing: DrawTiming,
    started: Instant,
    mut rng: StdRng,
    tx: mpsc::UnboundedSender<DrawEvent>,
) {
    for seq in 1..=timing.highlight_count() {
        sleep_until(started + timing.tick_interval * seq).await;
        let participant = candidates[rng.random_range(0..candidates.len())];
        trace!(generation, seq, %participant, "highlight");
        if tx
            .send(DrawEvent::Highlight {
                generation,
                seq,
                participant,
            })
            .is_err()
        {
            return;
        }
    }

    sleep_until(started + timing.duration).await;
    let participant = candidates[rng.random_range(0..candidates.len())];
    let _ = tx.send(DrawEvent::Selected {
        generation,
        participant,
    });
}
