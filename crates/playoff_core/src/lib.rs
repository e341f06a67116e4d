//! Core domain logic for Playoff.
//! This crate is the single source of truth for cache-consistency invariants.

pub mod cache;
pub mod logging;
pub mod model;
pub mod remote;
pub mod service;

pub use cache::{
    CacheEntity, CacheError, CacheResult, EntityStore, MutationEvent, PopulateOutcome,
    SessionCache, ViewRegistry, ViewSpec,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::tournament::{Tournament, TournamentId, TournamentStatus, UserId};
pub use remote::{ApiError, ApiOp, ApiResult, BrowseQuery, DeleteAck, TournamentApi, TournamentDraft};
pub use service::tournament_service::{
    ServiceError, ServiceResult, TournamentService, BROWSE_VIEW, MY_ACTIVE_VIEW,
    MY_FINISHED_VIEW,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
