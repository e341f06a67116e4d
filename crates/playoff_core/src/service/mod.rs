//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate remote calls and cache reconciliation into use-case APIs.
//! - Keep UI layers decoupled from transport and cache details.

pub mod tournament_service;
