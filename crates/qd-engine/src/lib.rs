//! Draw, question and scoring engine for Quizdraw.
//!
//! A [`Session`] owns the roster, the question pool and the draw engine, and
//! walks them through the turn lifecycle: idle, drawing, awaiting judgment,
//! and back to idle. Draws run as Tokio tasks on a timer; their events are
//! pulled through [`Session::next_event`], and events from a cancelled draw
//! are never applied.

pub mod config;
pub mod draw;
pub mod error;
pub mod history;
pub mod questions;
pub mod session;

pub use config::{ExhaustionPolicy, GameConfig};
pub use draw::{DrawEngine, DrawEvent, DrawTiming};
pub use error::{GameError, GameResult};
pub use history::{Outcome, RoundHistory, RoundRecord};
pub use questions::QuestionPool;
pub use session::{Phase, Session, SessionEvent, SessionSnapshot, Verdict};

pub use qd_core::{Participant, ParticipantId, Roster, RosterError};
