//! Domain model for the tournament client core.
//!
//! # Responsibility
//! - Define the canonical wire-shaped records the cache and services carry.
//!
//! # Invariants
//! - Every record is identified by a stable id and is replaced wholesale on
//!   mutation; the authoritative value always comes from the server.

pub mod tournament;
