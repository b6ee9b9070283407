use crate::participant::ParticipantId;

/// Alias for `Result<T, RosterError>`.
pub type RosterResult<T> = Result<T, RosterError>;

/// Errors that can occur when mutating the roster.
///
/// A failed operation never changes the roster, so callers that treat these
/// as silent no-ops may simply discard them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    /// The name was empty after trimming whitespace.
    #[error("participant name must not be blank")]
    InvalidName,

    /// No participant with this identity is on the roster.
    #[error("participant not found: {0}")]
    UnknownParticipant(ParticipantId),
}
