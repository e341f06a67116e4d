//! Process-wide cache instance with an init/teardown lifecycle.
//!
//! # Responsibility
//! - Own the entity store and all view caches behind one lock, so a
//!   mutation event is observed as a single indivisible step.
//! - Give every layer a cheap cloneable handle instead of an ambient
//!   global.
//!
//! # Invariants
//! - Views are declared once at construction and are static thereafter.
//! - The write lock is held only for synchronous reconciliation or page
//!   installation, never across fetch I/O.
//! - Readers receive snapshots, never live references into the cache.

use crate::cache::entity::CacheEntity;
use crate::cache::entity_store::EntityStore;
use crate::cache::reconciler::{reconcile, MutationEvent};
use crate::cache::view_registry::{PopulateOutcome, ViewRegistry, ViewSpec};
use crate::cache::CacheResult;
use log::info;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

struct CacheState<E: CacheEntity> {
    store: EntityStore<E>,
    views: ViewRegistry<E>,
}

/// Shared handle to the session's cache state.
///
/// Created at session start, torn down at sign-out via [`reset`].
///
/// [`reset`]: SessionCache::reset
pub struct SessionCache<E: CacheEntity> {
    state: Arc<RwLock<CacheState<E>>>,
}

impl<E: CacheEntity> Clone for SessionCache<E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<E: CacheEntity> SessionCache<E> {
    /// Builds the cache and registers every view.
    ///
    /// # Errors
    /// - `CacheError::DuplicateView` when two specs share a name. This is a
    ///   startup wiring bug and should abort session construction.
    pub fn new(specs: Vec<ViewSpec<E>>) -> CacheResult<Self> {
        let mut views = ViewRegistry::new();
        for spec in specs {
            views.register(spec)?;
        }
        info!(
            "event=cache_init module=cache status=ok views={}",
            views.names().len()
        );
        Ok(Self {
            state: Arc::new(RwLock::new(CacheState {
                store: EntityStore::new(),
                views,
            })),
        })
    }

    /// Applies one authoritative mutation event.
    ///
    /// Runs the reconciler to completion under the write lock; readers never
    /// observe a partially applied event.
    pub fn apply(&self, event: MutationEvent<E>) {
        let kind = event.kind();
        let mut state = self.write();
        let CacheState { store, views } = &mut *state;
        reconcile(store, views, event);
        info!(
            "event=event_reconciled module=cache kind={} store_len={}",
            kind,
            store.len()
        );
    }

    /// Installs an already-fetched page into a view.
    ///
    /// The lock is taken only for the installation itself; the caller must
    /// have finished its fetch I/O beforehand.
    ///
    /// # Errors
    /// - `CacheError::UnknownView` when `name` was never registered.
    pub fn populate(
        &self,
        name: &str,
        entities: Vec<E>,
        seq: u64,
    ) -> CacheResult<PopulateOutcome> {
        let mut state = self.write();
        let CacheState { store, views } = &mut *state;
        views.populate(store, name, entities, seq)
    }

    /// Marks a populated view stale, keeping its last-good rows readable.
    ///
    /// # Errors
    /// - `CacheError::UnknownView` when `name` was never registered.
    pub fn invalidate(&self, name: &str) -> CacheResult<()> {
        self.write().views.invalidate(name)
    }

    /// Returns a snapshot of the view contents in view order, or `None`
    /// when the view was never populated.
    ///
    /// # Errors
    /// - `CacheError::UnknownView` when `name` was never registered.
    pub fn read(&self, name: &str) -> CacheResult<Option<Vec<E>>> {
        let state = self.read_guard();
        state.views.read(&state.store, name)
    }

    /// Returns a snapshot of the canonical record for `id`.
    pub fn entity(&self, id: &E::Id) -> Option<E> {
        self.read_guard().store.get(id).cloned()
    }

    /// # Errors
    /// - `CacheError::UnknownView` when `name` was never registered.
    pub fn is_populated(&self, name: &str) -> CacheResult<bool> {
        self.read_guard().views.is_populated(name)
    }

    /// # Errors
    /// - `CacheError::UnknownView` when `name` was never registered.
    pub fn is_stale(&self, name: &str) -> CacheResult<bool> {
        self.read_guard().views.is_stale(name)
    }

    /// Registered view names.
    pub fn view_names(&self) -> Vec<String> {
        self.read_guard().views.names()
    }

    /// Tears the session's cached data down: the store empties and every
    /// view returns to the absent state. Registrations survive, so the
    /// handle stays usable for a subsequent sign-in.
    pub fn reset(&self) {
        let mut state = self.write();
        state.store.clear();
        state.views.clear_states();
        info!("event=cache_reset module=cache status=ok");
    }

    // A poisoned lock only marks a panic in another holder; the cache state
    // itself is still structurally valid, so the guard is recovered.
    fn read_guard(&self) -> RwLockReadGuard<'_, CacheState<E>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState<E>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
