use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identity of a participant, independent of its display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    /// Generate a new random participant ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A named entry in the roster with a running score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier for this participant.
    pub id: ParticipantId,
    /// Display name. Not required to be unique.
    pub name: String,
    /// Number of correctly answered questions.
    pub score: u32,
    /// When the participant joined the roster.
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    /// Create a participant with a fresh ID and a score of zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ParticipantId::new(), name)
    }

    /// Create a participant with a pre-assigned ID.
    pub fn with_id(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0,
            joined_at: Utc::now(),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.score > 0 {
            write!(f, "{} ({} pts)", self.name, self.score)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_id_display_shows_short_form() {
        let id = ParticipantId::new();
        let shown = id.to_string();
        assert_eq!(shown.len(), 8);
        assert!(id.0.to_string().starts_with(&shown));
    }

    #[test]
    fn participant_ids_are_unique() {
        let a = ParticipantId::new();
        let b = ParticipantId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn new_participant_starts_at_zero() {
        let p = Participant::new("Alice");
        assert_eq!(p.name, "Alice");
        assert_eq!(p.score, 0);
    }

    #[test]
    fn display_hides_zero_score() {
        let mut p = Participant::new("Bob");
        assert_eq!(p.to_string(), "Bob");
        p.score = 3;
        assert_eq!(p.to_string(), "Bob (3 pts)");
    }

    #[test]
    fn serde_roundtrip_keeps_identity() {
        let p = Participant::new("Carol");
        let json = serde_json::to_string(&p).unwrap();
        let back: Participant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
