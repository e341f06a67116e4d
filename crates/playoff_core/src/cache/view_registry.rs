//! View declarations and per-view cached state.
//!
//! # Responsibility
//! - Hold the static set of view definitions declared at session start.
//! - Track, per view, the ordered id sequence, staleness flag and last
//!   applied fetch sequence number once the view has been populated.
//!
//! # Invariants
//! - View names are unique; re-registration fails.
//! - `populate` is the only way a view transitions from absent to present.
//! - A stale response (sequence number not newer than the last applied) is
//!   discarded as a no-op, never an error.

use crate::cache::entity::CacheEntity;
use crate::cache::entity_store::EntityStore;
use crate::cache::{CacheError, CacheResult};
use log::{debug, info};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Formatter};

pub(crate) type PredicateFn<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;
pub(crate) type ComparatorFn<E> = Box<dyn Fn(&E, &E) -> Ordering + Send + Sync>;

/// Declaration of one derived view: a unique name, a membership predicate
/// and a total-order comparator.
///
/// Predicates are plain closures and may capture session context (for
/// example the signed-in user id), which keeps membership decidable locally
/// for every registered view. Comparator ties are broken by insertion
/// order.
pub struct ViewSpec<E> {
    name: String,
    pub(crate) predicate: PredicateFn<E>,
    pub(crate) comparator: ComparatorFn<E>,
}

impl<E> ViewSpec<E> {
    pub fn new<P, C>(name: impl Into<String>, predicate: P, comparator: C) -> Self
    where
        P: Fn(&E) -> bool + Send + Sync + 'static,
        C: Fn(&E, &E) -> Ordering + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
            comparator: Box::new(comparator),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<E> Debug for ViewSpec<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewSpec").field("name", &self.name).finish()
    }
}

/// Outcome of a `populate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulateOutcome {
    /// The page was installed and the view is now fresh.
    Applied,
    /// The page lost a fetch race and was dropped without touching the view.
    Discarded,
}

/// Incrementally tracked state of a populated view.
#[derive(Debug)]
pub(crate) struct ViewState<I> {
    /// Entity ids in view order, sorted by the view comparator.
    pub(crate) ids: Vec<I>,
    /// Stale-while-revalidate flag; rows stay readable while set.
    pub(crate) stale: bool,
    /// Sequence number of the last applied fetch.
    pub(crate) last_seq: u64,
}

pub(crate) struct RegisteredView<E: CacheEntity> {
    pub(crate) spec: ViewSpec<E>,
    /// `None` until the first successful populate; absent is distinct from
    /// populated-and-empty.
    pub(crate) state: Option<ViewState<E::Id>>,
}

/// Registry of all declared views and their cached state.
pub struct ViewRegistry<E: CacheEntity> {
    views: BTreeMap<String, RegisteredView<E>>,
}

impl<E: CacheEntity> Default for ViewRegistry<E> {
    fn default() -> Self {
        Self {
            views: BTreeMap::new(),
        }
    }
}

impl<E: CacheEntity> ViewRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one view definition.
    pub fn register(&mut self, spec: ViewSpec<E>) -> CacheResult<()> {
        let name = spec.name().to_string();
        if self.views.contains_key(&name) {
            return Err(CacheError::DuplicateView(name));
        }
        self.views
            .insert(name, RegisteredView { spec, state: None });
        Ok(())
    }

    /// Returns registered view names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.views.keys().cloned().collect()
    }

    /// Installs a full fetch result as the view's contents.
    ///
    /// Entities are written into the store, ids are installed stable-sorted
    /// by the view comparator (server order survives among ties), staleness
    /// clears and `seq` is recorded. A `seq` that is not newer than the last
    /// applied one loses the fetch race: the call returns
    /// [`PopulateOutcome::Discarded`] and nothing changes.
    pub fn populate(
        &mut self,
        store: &mut EntityStore<E>,
        name: &str,
        mut entities: Vec<E>,
        seq: u64,
    ) -> CacheResult<PopulateOutcome> {
        let view = self
            .views
            .get_mut(name)
            .ok_or_else(|| CacheError::UnknownView(name.to_string()))?;

        if let Some(state) = view.state.as_ref() {
            if seq <= state.last_seq {
                debug!(
                    "event=populate_discarded module=cache view={} seq={} last_seq={}",
                    name, seq, state.last_seq
                );
                return Ok(PopulateOutcome::Discarded);
            }
        }

        entities.sort_by(|a, b| (view.spec.comparator)(a, b));
        let ids: Vec<E::Id> = entities.iter().map(CacheEntity::id).collect();
        let row_count = ids.len();
        for entity in entities {
            store.put(entity);
        }
        view.state = Some(ViewState {
            ids,
            stale: false,
            last_seq: seq,
        });

        info!(
            "event=view_populated module=cache view={} rows={} seq={}",
            name, row_count, seq
        );
        Ok(PopulateOutcome::Applied)
    }

    /// Returns the view contents in order, or `None` when never populated.
    pub fn read(&self, store: &EntityStore<E>, name: &str) -> CacheResult<Option<Vec<E>>> {
        let view = self
            .views
            .get(name)
            .ok_or_else(|| CacheError::UnknownView(name.to_string()))?;

        let Some(state) = view.state.as_ref() else {
            return Ok(None);
        };
        let rows = state
            .ids
            .iter()
            .filter_map(|id| store.get(id).cloned())
            .collect();
        Ok(Some(rows))
    }

    pub fn is_populated(&self, name: &str) -> CacheResult<bool> {
        self.require(name).map(|view| view.state.is_some())
    }

    pub fn is_stale(&self, name: &str) -> CacheResult<bool> {
        self.require(name)
            .map(|view| view.state.as_ref().is_some_and(|state| state.stale))
    }

    /// Marks a populated view stale without discarding its last-good rows.
    ///
    /// A no-op for a view that was never populated; there is nothing to
    /// serve stale in that case.
    pub fn invalidate(&mut self, name: &str) -> CacheResult<()> {
        let view = self
            .views
            .get_mut(name)
            .ok_or_else(|| CacheError::UnknownView(name.to_string()))?;
        if let Some(state) = view.state.as_mut() {
            state.stale = true;
            info!("event=view_invalidated module=cache view={}", name);
        }
        Ok(())
    }

    /// Depopulates every view, keeping registrations. Session teardown.
    pub(crate) fn clear_states(&mut self) {
        for view in self.views.values_mut() {
            view.state = None;
        }
    }

    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (&String, &mut RegisteredView<E>)> {
        self.views.iter_mut()
    }

    fn require(&self, name: &str) -> CacheResult<&RegisteredView<E>> {
        self.views
            .get(name)
            .ok_or_else(|| CacheError::UnknownView(name.to_string()))
    }
}
