//! Mutation event reconciliation.
//!
//! # Responsibility
//! - Apply one mutation event to the entity store and every populated view
//!   in a single pass.
//!
//! # Invariants
//! - Unpopulated views are never touched; they pick up the correct state on
//!   their next populate.
//! - A membership flip between two populated partition views is applied in
//!   the same pass: the id is removed from the losing view and inserted
//!   into the gaining view before any reader can observe either.
//! - Insertions keep the id sequence sorted by the view comparator; ties
//!   land after existing equal entries, preserving insertion order.

use crate::cache::entity::CacheEntity;
use crate::cache::entity_store::EntityStore;
use crate::cache::view_registry::{RegisteredView, ViewRegistry};
use log::debug;
use std::cmp::Ordering;

/// One authoritative mutation, emitted after the external system has
/// durably accepted it.
///
/// `Updated` carries the full post-mutation record; the previous record may
/// or may not be known to the store. `Deleted` carries only the id.
#[derive(Debug, Clone)]
pub enum MutationEvent<E: CacheEntity> {
    Created(E),
    Updated(E),
    Deleted(E::Id),
}

impl<E: CacheEntity> MutationEvent<E> {
    /// Stable event name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(_) => "updated",
            Self::Deleted(_) => "deleted",
        }
    }
}

/// Applies `event` to the store and every populated view.
///
/// Total over its inputs: expected conditions (unknown previous record,
/// duplicate create, delete of an id no view holds) degrade to the defined
/// fallback instead of failing.
pub fn reconcile<E: CacheEntity>(
    store: &mut EntityStore<E>,
    views: &mut ViewRegistry<E>,
    event: MutationEvent<E>,
) {
    match event {
        // A duplicate create (server echo) degenerates to the update path,
        // which re-seats the id instead of inserting a second copy.
        MutationEvent::Created(entity) | MutationEvent::Updated(entity) => {
            let previous = store.get(&entity.id()).cloned();
            store.put(entity.clone());
            for (name, view) in views.iter_mut() {
                upsert_into_view(store, name, view, previous.as_ref(), &entity);
            }
        }
        MutationEvent::Deleted(id) => {
            store.remove(&id);
            for (name, view) in views.iter_mut() {
                let Some(state) = view.state.as_mut() else {
                    continue;
                };
                if let Some(position) = state.ids.iter().position(|other| *other == id) {
                    state.ids.remove(position);
                    debug!(
                        "event=view_row_removed module=cache view={} reason=deleted",
                        name
                    );
                }
            }
        }
    }
}

/// Reconciles one view against the stored previous record and the new one.
fn upsert_into_view<E: CacheEntity>(
    store: &EntityStore<E>,
    name: &str,
    view: &mut RegisteredView<E>,
    previous: Option<&E>,
    entity: &E,
) {
    let spec = &view.spec;
    let Some(state) = view.state.as_mut() else {
        return;
    };

    // An unknown previous record means no prior memberships: the update
    // degenerates to insert-only for every view it newly qualifies for.
    let was_member = previous.is_some_and(|old| (spec.predicate)(old));
    let is_member = (spec.predicate)(entity);
    let id = entity.id();

    // The id can be present even when the previous record was unknown
    // (populate raced ahead of the single-entity path); trust the sequence.
    let held_position = state.ids.iter().position(|other| *other == id);

    if (was_member || held_position.is_some()) && !is_member {
        if let Some(position) = held_position {
            state.ids.remove(position);
            debug!(
                "event=view_row_removed module=cache view={} reason=reclassified",
                name
            );
        }
        return;
    }
    if !is_member {
        return;
    }

    // Member after the event. Re-seat: the sort key may have changed, so a
    // held id moves via remove-then-insert rather than re-sorting the view.
    if let Some(position) = held_position {
        state.ids.remove(position);
    }
    let insert_at = state.ids.partition_point(|other| match store.get(other) {
        Some(current) => (spec.comparator)(current, entity) != Ordering::Greater,
        None => true,
    });
    state.ids.insert(insert_at, id);
    debug!(
        "event=view_row_seated module=cache view={} position={} moved={}",
        name,
        insert_at,
        held_position.is_some()
    );
}

#[cfg(test)]
mod tests {
    use super::{reconcile, MutationEvent};
    use crate::cache::entity::CacheEntity;
    use crate::cache::entity_store::EntityStore;
    use crate::cache::view_registry::{ViewRegistry, ViewSpec};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        key: u32,
        rank: i64,
        kept: bool,
    }

    impl Row {
        fn new(key: u32, rank: i64) -> Self {
            Self {
                key,
                rank,
                kept: true,
            }
        }
    }

    impl CacheEntity for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.key
        }
    }

    fn kept_by_rank() -> ViewSpec<Row> {
        ViewSpec::new("kept", |row: &Row| row.kept, |a: &Row, b: &Row| {
            a.rank.cmp(&b.rank)
        })
    }

    fn view_ids(
        store: &EntityStore<Row>,
        views: &ViewRegistry<Row>,
        name: &str,
    ) -> Vec<u32> {
        views
            .read(store, name)
            .unwrap()
            .unwrap()
            .iter()
            .map(Row::id)
            .collect()
    }

    fn populated_fixture() -> (EntityStore<Row>, ViewRegistry<Row>) {
        let mut store = EntityStore::new();
        let mut views = ViewRegistry::new();
        views.register(kept_by_rank()).unwrap();
        views
            .populate(
                &mut store,
                "kept",
                vec![Row::new(1, 10), Row::new(2, 20), Row::new(3, 30)],
                1,
            )
            .unwrap();
        (store, views)
    }

    #[test]
    fn created_inserts_in_comparator_position() {
        let (mut store, mut views) = populated_fixture();

        reconcile(&mut store, &mut views, MutationEvent::Created(Row::new(4, 25)));

        assert_eq!(view_ids(&store, &views, "kept"), vec![1, 2, 4, 3]);
    }

    #[test]
    fn tie_inserts_after_existing_equal_rank() {
        let (mut store, mut views) = populated_fixture();

        reconcile(&mut store, &mut views, MutationEvent::Created(Row::new(4, 20)));

        assert_eq!(view_ids(&store, &views, "kept"), vec![1, 2, 4, 3]);
    }

    #[test]
    fn updated_moves_row_when_sort_key_changes() {
        let (mut store, mut views) = populated_fixture();

        reconcile(&mut store, &mut views, MutationEvent::Updated(Row::new(1, 35)));

        assert_eq!(view_ids(&store, &views, "kept"), vec![2, 3, 1]);
    }

    #[test]
    fn updated_with_unknown_previous_is_insert_only() {
        let (mut store, mut views) = populated_fixture();

        reconcile(&mut store, &mut views, MutationEvent::Updated(Row::new(9, 5)));

        assert_eq!(view_ids(&store, &views, "kept"), vec![9, 1, 2, 3]);
    }

    #[test]
    fn updated_out_of_predicate_removes_row() {
        let (mut store, mut views) = populated_fixture();

        let mut row = Row::new(2, 20);
        row.kept = false;
        reconcile(&mut store, &mut views, MutationEvent::Updated(row));

        assert_eq!(view_ids(&store, &views, "kept"), vec![1, 3]);
        // Canonical record still reflects the update.
        assert!(!store.get(&2).unwrap().kept);
    }

    #[test]
    fn deleted_removes_store_entry_and_view_row() {
        let (mut store, mut views) = populated_fixture();

        reconcile(&mut store, &mut views, MutationEvent::Deleted(2));

        assert!(store.get(&2).is_none());
        assert_eq!(view_ids(&store, &views, "kept"), vec![1, 3]);
    }

    #[test]
    fn unpopulated_view_is_never_touched() {
        let mut store = EntityStore::new();
        let mut views = ViewRegistry::new();
        views.register(kept_by_rank()).unwrap();

        reconcile(&mut store, &mut views, MutationEvent::Created(Row::new(1, 10)));

        assert!(store.get(&1).is_some());
        assert!(views.read(&store, "kept").unwrap().is_none());
        assert!(!views.is_populated("kept").unwrap());
    }
}
