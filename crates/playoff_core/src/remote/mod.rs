//! Remote API boundary.
//!
//! # Responsibility
//! - Define the transport-agnostic contract the networking layer implements.
//! - Keep request/response shapes and the typed error envelope in one place.
//!
//! # Invariants
//! - Every mutation endpoint returns the authoritative post-mutation record
//!   (or a delete acknowledgement); the core never caches locally-guessed
//!   values.

pub mod api;
pub mod types;

pub use api::TournamentApi;
pub use types::{ApiError, ApiOp, ApiResult, BrowseQuery, DeleteAck, TournamentDraft};
