//! Transport SPI for the tournament backend.

use std::sync::Arc;

use crate::model::tournament::{Tournament, TournamentId, UserId};
use crate::remote::types::{ApiResult, BrowseQuery, DeleteAck, TournamentDraft};

/// Contract the networking layer implements.
///
/// Implementations own transport, authentication and persistence concerns.
/// Every mutation returns the authoritative post-mutation record as accepted
/// by the server, so callers can reconcile caches without guessing.
pub trait TournamentApi: Send + Sync {
    /// Public listing with optional filters.
    fn browse(&self, query: &BrowseQuery) -> ApiResult<Vec<Tournament>>;

    /// The caller's tournaments, partitioned by finished state.
    fn list_mine(&self, finished: bool) -> ApiResult<Vec<Tournament>>;

    /// One tournament by id.
    fn fetch(&self, id: TournamentId) -> ApiResult<Tournament>;

    fn create(&self, draft: &TournamentDraft) -> ApiResult<Tournament>;

    fn update(&self, id: TournamentId, draft: &TournamentDraft) -> ApiResult<Tournament>;

    fn delete(&self, id: TournamentId) -> ApiResult<DeleteAck>;

    /// Registers the caller as a participant.
    fn register(&self, id: TournamentId) -> ApiResult<Tournament>;

    /// Withdraws the caller from the participant list.
    fn leave(&self, id: TournamentId) -> ApiResult<Tournament>;

    /// Organizer toggle for the active flag.
    fn set_status(&self, id: TournamentId, is_active: bool) -> ApiResult<Tournament>;

    /// Organizer removal of a participant.
    fn remove_participant(&self, id: TournamentId, user: UserId) -> ApiResult<Tournament>;
}

impl<T: TournamentApi + ?Sized> TournamentApi for Arc<T> {
    fn browse(&self, query: &BrowseQuery) -> ApiResult<Vec<Tournament>> {
        (**self).browse(query)
    }

    fn list_mine(&self, finished: bool) -> ApiResult<Vec<Tournament>> {
        (**self).list_mine(finished)
    }

    fn fetch(&self, id: TournamentId) -> ApiResult<Tournament> {
        (**self).fetch(id)
    }

    fn create(&self, draft: &TournamentDraft) -> ApiResult<Tournament> {
        (**self).create(draft)
    }

    fn update(&self, id: TournamentId, draft: &TournamentDraft) -> ApiResult<Tournament> {
        (**self).update(id, draft)
    }

    fn delete(&self, id: TournamentId) -> ApiResult<DeleteAck> {
        (**self).delete(id)
    }

    fn register(&self, id: TournamentId) -> ApiResult<Tournament> {
        (**self).register(id)
    }

    fn leave(&self, id: TournamentId) -> ApiResult<Tournament> {
        (**self).leave(id)
    }

    fn set_status(&self, id: TournamentId, is_active: bool) -> ApiResult<Tournament> {
        (**self).set_status(id, is_active)
    }

    fn remove_participant(&self, id: TournamentId, user: UserId) -> ApiResult<Tournament> {
        (**self).remove_participant(id, user)
    }
}
