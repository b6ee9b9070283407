//! Game session: the turn lifecycle over roster, questions and draws.
//!
//! ```text
//! Idle --start_selection--> Drawing --(highlight)*--> Drawing
//! Drawing --(selected)--> AwaitingJudgment --mark_result--> Idle
//! ```
//!
//! Roster edits are allowed in every phase. A draw works on the candidate
//! snapshot taken when it started, so edits made mid-draw never change who
//! can be picked. If the pick leaves the roster before the verdict, the round
//! is forfeited and nobody scores.

use std::fmt;

use chrono::Utc;
use qd_core::{Participant, ParticipantId, Roster};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::GameConfig;
use crate::draw::{DrawEngine, DrawEvent};
use crate::error::{GameError, GameResult};
use crate::history::{Outcome, RoundHistory, RoundRecord};
use crate::questions::QuestionPool;

/// Where the session is in the turn lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for a draw to be started.
    #[default]
    Idle,
    /// A draw is running.
    Drawing,
    /// A participant was picked and the verdict is pending.
    AwaitingJudgment,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Drawing => write!(f, "drawing"),
            Self::AwaitingJudgment => write!(f, "awaiting judgment"),
        }
    }
}

/// A change observers should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A candidate is highlighted for one tick.
    Highlighted {
        /// The highlighted candidate.
        participant: ParticipantId,
        /// 1-based tick number within the draw.
        seq: u32,
    },
    /// The draw picked a participant and the question is revealed.
    Selected {
        /// The picked participant.
        participant: ParticipantId,
        /// The question for this round.
        question: String,
    },
}

/// Result of recording a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Correct answer; carries the participant with the updated score.
    Correct(Participant),
    /// Wrong answer; the score is unchanged.
    Incorrect(Participant),
    /// The pick left the roster before the verdict; nothing was scored.
    Forfeited(ParticipantId),
}

impl Verdict {
    /// The history outcome for this verdict.
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Correct(_) => Outcome::Correct,
            Self::Incorrect(_) => Outcome::Incorrect,
            Self::Forfeited(_) => Outcome::Forfeited,
        }
    }
}

/// Read-only view of the session for observers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// Candidate highlighted by the running draw.
    pub highlighted: Option<ParticipantId>,
    /// Participant picked by the last draw.
    pub selected: Option<ParticipantId>,
    /// Question revealed by the last draw.
    pub question: Option<String>,
    /// Participants in roster order.
    pub roster: Vec<Participant>,
    /// Number of questions still in the pool.
    pub questions_left: usize,
}

/// An interactive quiz session.
///
/// Draws run as Tokio tasks, so [`Session::start_selection`] must be called
/// from within a Tokio runtime.
#[derive(Debug)]
pub struct Session {
    roster: Roster,
    questions: QuestionPool,
    draw: DrawEngine,
    history: RoundHistory,
    rng: StdRng,
    phase: Phase,
    highlighted: Option<ParticipantId>,
    selected: Option<ParticipantId>,
    pending_question: Option<String>,
    current_question: Option<String>,
    round: u32,
}

impl Session {
    /// Create a session with an empty roster and a full question pool.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let draw_seed: u64 = rng.random();
        let draw = DrawEngine::new(config.timing(), draw_seed);
        let questions = QuestionPool::new(config.catalog, config.exhaustion);

        Ok(Self {
            roster: Roster::new(),
            questions,
            draw,
            history: RoundHistory::new(),
            rng,
            phase: Phase::Idle,
            highlighted: None,
            selected: None,
            pending_question: None,
            current_question: None,
            round: 0,
        })
    }

    /// Get the roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Get the question pool.
    pub fn questions(&self) -> &QuestionPool {
        &self.questions
    }

    /// Get the round history.
    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    /// Get the current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Candidate highlighted by the running draw, if still on the roster.
    pub fn highlighted(&self) -> Option<ParticipantId> {
        self.highlighted
    }

    /// Participant picked by the last draw, until the verdict is recorded.
    pub fn selected(&self) -> Option<ParticipantId> {
        self.selected
    }

    /// Question revealed by the last completed draw.
    pub fn current_question(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    /// Participants ordered by score, highest first.
    pub fn standings(&self) -> Vec<&Participant> {
        self.roster.standings()
    }

    /// Capture the observable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            highlighted: self.highlighted,
            selected: self.selected,
            question: self.current_question.clone(),
            roster: self.roster.list().to_vec(),
            questions_left: self.questions.remaining().len(),
        }
    }

    /// Add a participant. Blank names are rejected.
    pub fn add_participant(&mut self, name: &str) -> GameResult<ParticipantId> {
        Ok(self.roster.add(name)?)
    }

    /// Remove a participant.
    ///
    /// Allowed in every phase. A running draw keeps its snapshot; if the
    /// removed participant ends up picked, the round is forfeited.
    pub fn remove_participant(&mut self, id: ParticipantId) -> GameResult<Participant> {
        let removed = self.roster.remove(id)?;
        if self.highlighted == Some(id) {
            self.highlighted = None;
        }
        Ok(removed)
    }

    /// Rename a participant. Blank names are rejected.
    pub fn rename_participant(&mut self, id: ParticipantId, new_name: &str) -> GameResult<()> {
        self.roster.rename(id, new_name)?;
        Ok(())
    }

    /// Start a draw over the current roster.
    ///
    /// From `Idle` this takes a question from the pool and holds it back
    /// until the draw completes. From `Drawing` it restarts the draw with a
    /// fresh roster snapshot and keeps the held question. Returns the
    /// generation of the new draw.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_selection(&mut self) -> GameResult<u64> {
        if self.phase == Phase::AwaitingJudgment {
            return Err(GameError::JudgmentPending);
        }
        if self.roster.is_empty() {
            return Err(GameError::EmptyRoster);
        }

        let question = match self.pending_question.take() {
            Some(question) => question,
            None => self.questions.dispense(&mut self.rng)?,
        };
        let generation = match self.draw.start(self.roster.ids()) {
            Ok(generation) => generation,
            Err(e) => {
                self.questions.put_back(question);
                return Err(e);
            }
        };

        if self.phase == Phase::Idle {
            self.round += 1;
        }
        self.pending_question = Some(question);
        self.current_question = None;
        self.selected = None;
        self.highlighted = None;
        self.phase = Phase::Drawing;

        info!(
            round = self.round,
            generation,
            candidates = self.roster.len(),
            "selection started"
        );
        Ok(generation)
    }

    /// Abort the running draw and return its question to the pool.
    ///
    /// Returns `false` when no draw was running.
    pub fn cancel_selection(&mut self) -> bool {
        if self.phase != Phase::Drawing {
            return false;
        }
        self.draw.cancel();
        if let Some(question) = self.pending_question.take() {
            self.questions.put_back(question);
        }
        self.highlighted = None;
        self.round = self.round.saturating_sub(1);
        self.phase = Phase::Idle;
        info!("selection cancelled");
        true
    }

    /// Wait for the next draw event and apply it.
    ///
    /// Returns `None` when no draw is running.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        if self.phase != Phase::Drawing {
            return None;
        }
        let event = self.draw.next_event().await?;
        Some(self.apply(event))
    }

    /// Apply the next draw event if one is already queued.
    pub fn try_next_event(&mut self) -> Option<SessionEvent> {
        if self.phase != Phase::Drawing {
            return None;
        }
        let event = self.draw.try_next_event()?;
        Some(self.apply(event))
    }

    /// Drive the running draw to completion and return the pick.
    pub async fn run_draw(&mut self) -> Option<ParticipantId> {
        while let Some(event) = self.next_event().await {
            if let SessionEvent::Selected { participant, .. } = event {
                return Some(participant);
            }
        }
        None
    }

    /// Record whether the pick answered correctly and return to `Idle`.
    pub fn mark_result(&mut self, correct: bool) -> GameResult<Verdict> {
        if self.phase != Phase::AwaitingJudgment {
            return Err(GameError::NotAwaitingJudgment);
        }
        let Some(id) = self.selected.take() else {
            self.phase = Phase::Idle;
            return Err(GameError::NotAwaitingJudgment);
        };

        let verdict = match self.roster.get(id).cloned() {
            None => {
                warn!(participant = %id, "pick left the roster before the verdict");
                Verdict::Forfeited(id)
            }
            Some(_) if correct => Verdict::Correct(self.roster.record_score(id, 1)?.clone()),
            Some(participant) => Verdict::Incorrect(participant),
        };

        let name = match &verdict {
            Verdict::Correct(p) | Verdict::Incorrect(p) => Some(p.name.clone()),
            Verdict::Forfeited(_) => None,
        };
        self.history.push(RoundRecord {
            round: self.round,
            participant: id,
            name,
            question: self.current_question.clone().unwrap_or_default(),
            outcome: verdict.outcome(),
            judged_at: Utc::now(),
        });

        self.phase = Phase::Idle;
        info!(round = self.round, participant = %id, outcome = %verdict.outcome(), "round judged");
        Ok(verdict)
    }

    fn apply(&mut self, event: DrawEvent) -> SessionEvent {
        match event {
            DrawEvent::Highlight {
                seq, participant, ..
            } => {
                // The draw ticks over its snapshot; a removed id stays unhighlighted.
                self.highlighted = self.roster.contains(participant).then_some(participant);
                SessionEvent::Highlighted { participant, seq }
            }
            DrawEvent::Selected { participant, .. } => {
                let question = self.pending_question.take().unwrap_or_default();
                self.highlighted = None;
                self.selected = Some(participant);
                self.current_question = Some(question.clone());
                self.phase = Phase::AwaitingJudgment;
                debug!(round = self.round, %participant, "participant selected");
                SessionEvent::Selected {
                    participant,
                    question,
                }
            }
        }
    }
}
