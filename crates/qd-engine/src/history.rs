//! Log of judged rounds.

use std::fmt;

use chrono::{DateTime, Utc};
use qd_core::ParticipantId;
use serde::{Deserialize, Serialize};

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The pick answered correctly and scored a point.
    Correct,
    /// The pick answered wrongly.
    Incorrect,
    /// The pick left the roster before the verdict; nothing was scored.
    Forfeited,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Correct => write!(f, "correct"),
            Self::Incorrect => write!(f, "incorrect"),
            Self::Forfeited => write!(f, "forfeited"),
        }
    }
}

/// One judged round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number, starting at 1.
    pub round: u32,
    /// Who was picked.
    pub participant: ParticipantId,
    /// The pick's name at judgment time, if still on the roster.
    pub name: Option<String>,
    /// The question that was asked.
    pub question: String,
    /// How the round ended.
    pub outcome: Outcome,
    /// When the verdict was recorded.
    pub judged_at: DateTime<Utc>,
}

/// Chronological list of judged rounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoundHistory {
    rounds: Vec<RoundRecord>,
}

impl RoundHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a judged round.
    pub fn push(&mut self, record: RoundRecord) {
        self.rounds.push(record);
    }

    /// The most recent round.
    pub fn last(&self) -> Option<&RoundRecord> {
        self.rounds.last()
    }

    /// Number of judged rounds.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Whether no round has been judged yet.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Rounds in which this participant was picked.
    pub fn for_participant(&self, id: ParticipantId) -> Vec<&RoundRecord> {
        self.rounds.iter().filter(|r| r.participant == id).collect()
    }

    /// Plain-text rendering, one line per round.
    pub fn export_text(&self) -> String {
        let mut out = String::new();
        for record in &self.rounds {
            let name = record.name.as_deref().unwrap_or("(removed)");
            out.push_str(&format!(
                "Round {}: {name} ({}) - {}\n  Q: {}\n",
                record.round,
                record.outcome,
                record.judged_at.format("%H:%M:%S"),
                record.question
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(round: u32, participant: ParticipantId, outcome: Outcome) -> RoundRecord {
        RoundRecord {
            round,
            participant,
            name: Some(format!("P{round}")),
            question: format!("Question {round}?"),
            outcome,
            judged_at: Utc::now(),
        }
    }

    #[test]
    fn push_and_query() {
        let alice = ParticipantId::new();
        let bob = ParticipantId::new();
        let mut history = RoundHistory::new();
        assert!(history.is_empty());

        history.push(record(1, alice, Outcome::Correct));
        history.push(record(2, bob, Outcome::Incorrect));
        history.push(record(3, alice, Outcome::Incorrect));

        assert_eq!(history.len(), 3);
        assert_eq!(history.last().unwrap().round, 3);
        assert_eq!(history.for_participant(alice).len(), 2);
        assert_eq!(history.for_participant(bob).len(), 1);
    }

    #[test]
    fn export_text_lists_rounds() {
        let mut history = RoundHistory::new();
        history.push(record(1, ParticipantId::new(), Outcome::Correct));
        let mut forfeited = record(2, ParticipantId::new(), Outcome::Forfeited);
        forfeited.name = None;
        history.push(forfeited);

        let text = history.export_text();
        assert!(text.contains("Round 1: P1 (correct)"));
        assert!(text.contains("Q: Question 1?"));
        assert!(text.contains("Round 2: (removed) (forfeited)"));
    }

    #[test]
    fn outcome_serializes_snake_case() {
        let json = serde_json::to_string(&Outcome::Forfeited).unwrap();
        assert_eq!(json, "\"forfeited\"");
    }
}
