//! Record lifecycle: create-or-update and delete over an in-memory collection.
//!
//! These functions only touch the `Vec`. Persisting the result is the job of
//! [`FarmState`](crate::farm::FarmState), which calls them and then saves the
//! whole collection.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::store::CollectionKey;

/// A record stored in one of the farm collections.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Collection the record belongs to.
    const KEY: CollectionKey;

    /// Record ID; empty means "not saved yet".
    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Human-facing name used in logs.
    fn label(&self) -> &str;
}

/// What an upsert did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Appended with a freshly generated ID.
    Inserted(String),
    /// Replaced the record with this ID in place.
    Updated(String),
}

impl UpsertOutcome {
    pub fn id(&self) -> &str {
        match self {
            UpsertOutcome::Inserted(id) | UpsertOutcome::Updated(id) => id,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, UpsertOutcome::Inserted(_))
    }
}

/// Generate a time-ordered record ID not already used in `records`.
pub fn generate_id<T: Record>(records: &[T]) -> String {
    loop {
        let id = uuid::Uuid::now_v7().to_string();
        if !records.iter().any(|r| r.id() == id) {
            return id;
        }
    }
}

/// Replace the record with the same ID, or append it with a new ID.
///
/// A record whose ID is empty or matches nothing in the collection is treated
/// as new and receives a fresh ID.
pub fn upsert<T: Record>(records: &mut Vec<T>, mut record: T) -> UpsertOutcome {
    if !record.id().is_empty() {
        if let Some(slot) = records.iter_mut().find(|r| r.id() == record.id()) {
            let id = record.id().to_string();
            *slot = record;
            return UpsertOutcome::Updated(id);
        }
    }

    let id = generate_id(records);
    record.set_id(id.clone());
    records.push(record);
    UpsertOutcome::Inserted(id)
}

/// Remove the record with `id`, returning it. No-op when absent.
pub fn remove<T: Record>(records: &mut Vec<T>, id: &str) -> Option<T> {
    let position = records.iter().position(|r| r.id() == id)?;
    Some(records.remove(position))
}

/// Find a record by ID.
pub fn find<'a, T: Record>(records: &'a [T], id: &str) -> Option<&'a T> {
    records.iter().find(|r| r.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lot;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn lot(id: &str, name: &str) -> Lot {
        Lot {
            id: id.into(),
            ..Lot::new(name, 10)
        }
    }

    #[test]
    fn test_insert_assigns_id() {
        let mut lots = vec![lot("1", "A")];
        let outcome = upsert(&mut lots, Lot::new("B", 5));

        assert!(outcome.is_insert());
        assert_eq!(lots.len(), 2);
        assert_eq!(lots[1].id, outcome.id());
        assert_eq!(lots[1].name, "B");
        assert_ne!(lots[1].id, "1");
    }

    #[test]
    fn test_update_in_place() {
        let mut lots = vec![lot("1", "A"), lot("2", "B"), lot("3", "C")];
        let outcome = upsert(&mut lots, lot("2", "B renamed"));

        assert_eq!(outcome, UpsertOutcome::Updated("2".into()));
        let names: Vec<_> = lots.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B renamed", "C"]);
    }

    #[test]
    fn test_unknown_id_is_inserted_with_fresh_id() {
        let mut lots = vec![lot("1", "A")];
        let outcome = upsert(&mut lots, lot("ghost", "B"));

        assert!(outcome.is_insert());
        assert_ne!(outcome.id(), "ghost");
        assert_eq!(lots.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut lots = vec![lot("1", "A"), lot("2", "B")];
        assert!(remove(&mut lots, "missing").is_none());
        assert_eq!(lots.len(), 2);

        let removed = remove(&mut lots, "1").unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(lots.len(), 1);
        assert!(find(&lots, "1").is_none());
    }

    fn arb_lots() -> impl Strategy<Value = Vec<Lot>> {
        prop::collection::vec("[a-z]{1,8}", 0..20).prop_map(|names| {
            names
                .into_iter()
                .enumerate()
                .map(|(i, name)| lot(&format!("id-{i}"), &name))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_insert_grows_by_one_with_fresh_id(lots in arb_lots(), name in "[a-z]{1,8}") {
            let before: HashSet<String> = lots.iter().map(|l| l.id.clone()).collect();
            let mut lots = lots;
            let len = lots.len();

            let outcome = upsert(&mut lots, Lot::new(name, 1));

            prop_assert_eq!(lots.len(), len + 1);
            prop_assert!(!before.contains(outcome.id()));
            prop_assert_eq!(&lots[len].id, outcome.id());
        }

        #[test]
        fn prop_update_preserves_length_and_order(lots in arb_lots(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!lots.is_empty());
            let target = pick.index(lots.len());
            let ids_before: Vec<String> = lots.iter().map(|l| l.id.clone()).collect();
            let mut lots = lots;

            let replacement = lot(&ids_before[target], "replaced");
            upsert(&mut lots, replacement);

            let ids_after: Vec<String> = lots.iter().map(|l| l.id.clone()).collect();
            prop_assert_eq!(ids_after, ids_before);
            prop_assert_eq!(lots[target].name.as_str(), "replaced");
        }

        #[test]
        fn prop_remove_present_shrinks_by_one(lots in arb_lots(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!lots.is_empty());
            let id = lots[pick.index(lots.len())].id.clone();
            let mut lots = lots;
            let len = lots.len();

            prop_assert!(remove(&mut lots, &id).is_some());
            prop_assert_eq!(lots.len(), len - 1);
            prop_assert!(find(&lots, &id).is_none());
        }

        #[test]
        fn prop_remove_absent_is_noop(lots in arb_lots()) {
            let before = lots.clone();
            let mut lots = lots;
            prop_assert!(remove(&mut lots, "not-an-id").is_none());
            prop_assert_eq!(lots, before);
        }
    }
}
