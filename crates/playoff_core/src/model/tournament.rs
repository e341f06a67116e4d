//! Tournament domain record.
//!
//! # Responsibility
//! - Define the canonical tournament shape shared by cache, remote and
//!   service layers.
//! - Provide the derived classification used to partition "my tournament"
//!   views.
//!
//! # Invariants
//! - `id` is stable and never reused for another tournament.
//! - A tournament is finished when the organizer deactivated it or its
//!   status reached `Finished`; the two flags are deliberately distinct.

use crate::cache::CacheEntity;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a tournament.
pub type TournamentId = Uuid;

/// Stable identifier for a user (creator or participant).
pub type UserId = Uuid;

/// Server-driven tournament lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentStatus {
    /// Accepting registrations.
    Registration,
    /// Play has started.
    Ongoing,
    /// Play has concluded.
    Finished,
}

/// Canonical tournament record, wire-shaped to the server payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    /// Stable global id used for caching and routing.
    pub id: TournamentId,
    pub name: String,
    pub city: Option<String>,
    /// Scheduled start, epoch milliseconds.
    pub starts_at_ms: i64,
    pub status: TournamentStatus,
    /// Organizer kill-switch; a deactivated tournament counts as finished
    /// regardless of `status`.
    pub is_active: bool,
    pub creator_id: UserId,
    pub participant_ids: Vec<UserId>,
    pub max_participants: Option<u32>,
    /// Epoch milliseconds, set by the server.
    pub created_at_ms: i64,
    /// Epoch milliseconds, set by the server.
    pub updated_at_ms: i64,
}

impl Tournament {
    /// Creates a locally-shaped record with a generated id.
    ///
    /// Authoritative field values always come from the server; this
    /// constructor exists for tests and fixtures.
    pub fn new(name: impl Into<String>, creator_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            city: None,
            starts_at_ms: 0,
            status: TournamentStatus::Registration,
            is_active: true,
            creator_id,
            participant_ids: Vec::new(),
            max_participants: None,
            created_at_ms: 0,
            updated_at_ms: 0,
        }
    }

    /// Returns whether this tournament classifies as finished.
    pub fn is_finished(&self) -> bool {
        !self.is_active || self.status == TournamentStatus::Finished
    }

    /// Returns whether `user` created or plays in this tournament.
    pub fn involves(&self, user: &UserId) -> bool {
        self.creator_id == *user || self.participant_ids.contains(user)
    }
}

impl CacheEntity for Tournament {
    type Id = TournamentId;

    fn id(&self) -> TournamentId {
        self.id
    }
}
