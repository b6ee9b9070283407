use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RosterError, RosterResult};
use crate::participant::{Participant, ParticipantId};

/// The ordered collection of participants.
///
/// Insertion order is preserved for display. All lookups and mutations go
/// through [`ParticipantId`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new participant with a score of zero.
    ///
    /// The name is trimmed before it is stored. Blank names are rejected and
    /// leave the roster untouched.
    pub fn add(&mut self, name: &str) -> RosterResult<ParticipantId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::InvalidName);
        }
        let participant = Participant::new(name);
        let id = participant.id;
        self.participants.push(participant);
        debug!(participant = %id, name, "added participant");
        Ok(id)
    }

    /// Remove a participant, returning the removed record.
    pub fn remove(&mut self, id: ParticipantId) -> RosterResult<Participant> {
        let index = self.index_of(id)?;
        let removed = self.participants.remove(index);
        debug!(participant = %id, name = %removed.name, "removed participant");
        Ok(removed)
    }

    /// Replace a participant's display name. Identity and score are kept.
    pub fn rename(&mut self, id: ParticipantId, new_name: &str) -> RosterResult<&Participant> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(RosterError::InvalidName);
        }
        let index = self.index_of(id)?;
        let participant = &mut self.participants[index];
        debug!(participant = %id, from = %participant.name, to = new_name, "renamed participant");
        participant.name = new_name.to_string();
        Ok(participant)
    }

    /// Add `delta` points to a participant's score. Saturates at `u32::MAX`.
    pub fn record_score(&mut self, id: ParticipantId, delta: u32) -> RosterResult<&Participant> {
        let index = self.index_of(id)?;
        let participant = &mut self.participants[index];
        participant.score = participant.score.saturating_add(delta);
        debug!(participant = %id, score = participant.score, "recorded score");
        Ok(participant)
    }

    /// Look up a participant by ID.
    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Whether a participant with this ID is on the roster.
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.get(id).is_some()
    }

    /// All participants in insertion order.
    pub fn list(&self) -> &[Participant] {
        &self.participants
    }

    /// IDs of all participants in insertion order.
    pub fn ids(&self) -> Vec<ParticipantId> {
        self.participants.iter().map(|p| p.id).collect()
    }

    /// Participants whose name matches case-insensitively.
    pub fn find_by_name(&self, name: &str) -> Vec<&Participant> {
        let needle = name.trim().to_lowercase();
        self.participants
            .iter()
            .filter(|p| p.name.to_lowercase() == needle)
            .collect()
    }

    /// Participants ordered by score, highest first. Ties keep insertion order.
    pub fn standings(&self) -> Vec<&Participant> {
        let mut ranked: Vec<&Participant> = self.participants.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    fn index_of(&self, id: ParticipantId) -> RosterResult<usize> {
        self.participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(RosterError::UnknownParticipant(id))
    }
}
