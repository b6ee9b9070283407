//! Core types for Quizdraw: participants, identities, and the roster.
//!
//! This crate holds the data the game engine mutates. It knows nothing about
//! draws or questions; the turn lifecycle lives in `qd-engine`. Every roster
//! operation is keyed by [`ParticipantId`], never by display name, so two
//! participants may share a name without ambiguity.

/// Error types used throughout the crate.
pub mod error;
/// Participant identifiers and participant records.
pub mod participant;
/// The ordered roster of participants and their scores.
pub mod roster;

/// Re-export error types.
pub use error::{RosterError, RosterResult};
/// Re-export participant types.
pub use participant::{Participant, ParticipantId};
/// Re-export the roster.
pub use roster::Roster;
