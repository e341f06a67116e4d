//! Tournament use-case service.
//!
//! # Responsibility
//! - Drive every tournament read and mutation through one API round-trip
//!   and exactly one reconciled cache event.
//! - Serve populated, fresh views without network activity.
//!
//! # Invariants
//! - Mutations cache only the authoritative server response, never a
//!   locally-guessed record.
//! - A fetch acquires its sequence number before the network call, so a
//!   slow stale response can never overwrite a newer page.

use crate::cache::{CacheError, MutationEvent, SessionCache, ViewSpec};
use crate::model::tournament::{Tournament, TournamentId, UserId};
use crate::remote::api::TournamentApi;
use crate::remote::types::{ApiError, BrowseQuery, DeleteAck, TournamentDraft};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

/// Public browse listing; every known tournament belongs here.
pub const BROWSE_VIEW: &str = "tournaments";
/// The caller's tournaments still in play.
pub const MY_ACTIVE_VIEW: &str = "my-active";
/// The caller's concluded tournaments.
pub const MY_FINISHED_VIEW: &str = "my-finished";

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case level error: transport failures and cache wiring bugs.
#[derive(Debug)]
pub enum ServiceError {
    Api(ApiError),
    Cache(CacheError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api(err) => write!(f, "{err}"),
            Self::Cache(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Api(err) => Some(err),
            Self::Cache(err) => Some(err),
        }
    }
}

impl From<ApiError> for ServiceError {
    fn from(value: ApiError) -> Self {
        Self::Api(value)
    }
}

impl From<CacheError> for ServiceError {
    fn from(value: CacheError) -> Self {
        Self::Cache(value)
    }
}

/// Session-scoped tournament service over a transport implementation.
pub struct TournamentService<A: TournamentApi> {
    api: A,
    cache: SessionCache<Tournament>,
    user_id: UserId,
    /// Process-monotonic fetch ticket counter; per-view monotonicity
    /// follows from global monotonicity.
    fetch_seq: AtomicU64,
}

impl<A: TournamentApi> TournamentService<A> {
    /// Builds the service and declares the session's views.
    ///
    /// # Errors
    /// - `ServiceError::Cache` on duplicate view names; a startup wiring
    ///   bug, not a runtime condition.
    pub fn new(api: A, user_id: UserId) -> ServiceResult<Self> {
        let newest_first =
            |a: &Tournament, b: &Tournament| b.created_at_ms.cmp(&a.created_at_ms);
        let cache = SessionCache::new(vec![
            ViewSpec::new(BROWSE_VIEW, |_: &Tournament| true, newest_first),
            ViewSpec::new(
                MY_ACTIVE_VIEW,
                move |t: &Tournament| t.involves(&user_id) && !t.is_finished(),
                newest_first,
            ),
            ViewSpec::new(
                MY_FINISHED_VIEW,
                move |t: &Tournament| t.involves(&user_id) && t.is_finished(),
                newest_first,
            ),
        ])?;

        Ok(Self {
            api,
            cache,
            user_id,
            fetch_seq: AtomicU64::new(0),
        })
    }

    /// The session cache handle; the read surface for consumers that
    /// render views directly.
    pub fn cache(&self) -> &SessionCache<Tournament> {
        &self.cache
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Fetches the public listing and installs it as the browse view.
    pub fn browse(&self, query: &BrowseQuery) -> ServiceResult<Vec<Tournament>> {
        let seq = self.next_seq();
        let rows = self.api.browse(query)?;
        self.cache.populate(BROWSE_VIEW, rows, seq)?;
        Ok(self.cache.read(BROWSE_VIEW)?.unwrap_or_default())
    }

    /// The caller's tournaments for one partition.
    ///
    /// Serves the populated view without network activity while it is
    /// fresh; a stale or absent view triggers a refetch.
    pub fn my_tournaments(&self, finished: bool) -> ServiceResult<Vec<Tournament>> {
        let name = my_view_name(finished);
        if self.cache.is_populated(name)? && !self.cache.is_stale(name)? {
            if let Some(rows) = self.cache.read(name)? {
                return Ok(rows);
            }
        }
        self.refresh_mine(finished)
    }

    /// Forces a refetch of one "mine" partition.
    pub fn refresh_mine(&self, finished: bool) -> ServiceResult<Vec<Tournament>> {
        let name = my_view_name(finished);
        let seq = self.next_seq();
        let rows = self.api.list_mine(finished)?;
        self.cache.populate(name, rows, seq)?;
        Ok(self.cache.read(name)?.unwrap_or_default())
    }

    /// One tournament by id, from cache when known.
    pub fn tournament(&self, id: TournamentId) -> ServiceResult<Tournament> {
        if let Some(known) = self.cache.entity(&id) {
            return Ok(known);
        }
        let fetched = self.api.fetch(id)?;
        self.cache.apply(MutationEvent::Updated(fetched.clone()));
        Ok(fetched)
    }

    pub fn create(&self, draft: &TournamentDraft) -> ServiceResult<Tournament> {
        let created = self.api.create(draft)?;
        self.cache.apply(MutationEvent::Created(created.clone()));
        Ok(created)
    }

    /// Edits a tournament. When the edit flips the finished classification,
    /// reconciliation moves it between the two "mine" partitions in one
    /// indivisible step.
    pub fn update(&self, id: TournamentId, draft: &TournamentDraft) -> ServiceResult<Tournament> {
        let updated = self.api.update(id, draft)?;
        self.cache.apply(MutationEvent::Updated(updated.clone()));
        Ok(updated)
    }

    pub fn delete(&self, id: TournamentId) -> ServiceResult<DeleteAck> {
        let ack = self.api.delete(id)?;
        self.cache.apply(MutationEvent::Deleted(id));
        Ok(ack)
    }

    /// Joins the caller into a tournament.
    pub fn register(&self, id: TournamentId) -> ServiceResult<Tournament> {
        let joined = self.api.register(id)?;
        self.cache.apply(MutationEvent::Updated(joined.clone()));
        Ok(joined)
    }

    /// Withdraws the caller; predicate-driven reconciliation drops the
    /// record from the "mine" views.
    pub fn leave(&self, id: TournamentId) -> ServiceResult<Tournament> {
        let left = self.api.leave(id)?;
        self.cache.apply(MutationEvent::Updated(left.clone()));
        Ok(left)
    }

    /// Organizer toggle; the classic reclassification path.
    pub fn set_status(&self, id: TournamentId, is_active: bool) -> ServiceResult<Tournament> {
        let updated = self.api.set_status(id, is_active)?;
        self.cache.apply(MutationEvent::Updated(updated.clone()));
        Ok(updated)
    }

    /// Organizer removal of a participant.
    pub fn remove_participant(
        &self,
        id: TournamentId,
        user: UserId,
    ) -> ServiceResult<Tournament> {
        let updated = self.api.remove_participant(id, user)?;
        self.cache.apply(MutationEvent::Updated(updated.clone()));
        Ok(updated)
    }

    /// App-foregrounded signal: server state may have changed out-of-band,
    /// so every populated view turns stale while keeping last-good rows.
    pub fn on_foreground(&self) -> ServiceResult<()> {
        for name in self.cache.view_names() {
            self.cache.invalidate(&name)?;
        }
        info!("event=views_marked_stale module=service reason=foreground");
        Ok(())
    }

    /// Session teardown at sign-out.
    pub fn sign_out(&self) {
        self.cache.reset();
        info!("event=session_signed_out module=service status=ok");
    }

    fn next_seq(&self) -> u64 {
        self.fetch_seq.fetch_add(1, Ordering::Relaxed) + 1
    }
}

fn my_view_name(finished: bool) -> &'static str {
    if finished {
        MY_FINISHED_VIEW
    } else {
        MY_ACTIVE_VIEW
    }
}
