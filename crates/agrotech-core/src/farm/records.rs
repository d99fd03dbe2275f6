//! Binds each record type to its slot in [`Collections`] and to its save hooks.

use chrono::{DateTime, Utc};

use crate::lifecycle::Record;
use crate::models::{
    Animal, BirthRecord, HealthRecord, Lot, MilkProductionRecord, Paddock, VaccineRecord,
};
use crate::store::CollectionKey;

use super::Collections;

/// A record type owned by [`FarmState`](super::FarmState).
pub trait FarmRecord: Record {
    fn records(collections: &Collections) -> &Vec<Self>;

    fn records_mut(collections: &mut Collections) -> &mut Vec<Self>;

    /// Adjust derived fields right before the record is stored.
    fn prepare(&mut self, _now: DateTime<Utc>) {}

    /// Carry an update into other collections. Returns the keys it touched.
    fn cascade(_collections: &mut Collections, _previous: &Self, _current: &Self) -> Vec<CollectionKey> {
        Vec::new()
    }
}

impl FarmRecord for Animal {
    fn records(collections: &Collections) -> &Vec<Self> {
        &collections.animals
    }

    fn records_mut(collections: &mut Collections) -> &mut Vec<Self> {
        &mut collections.animals
    }

    fn prepare(&mut self, now: DateTime<Utc>) {
        let today = now.date_naive();
        self.refresh_age(today);
        self.last_update = now.to_rfc3339();
        if self.weight_history.is_empty() && self.weight > 0.0 {
            self.record_weighing(today.format("%Y-%m-%d").to_string(), self.weight);
        }
    }
}

impl FarmRecord for Paddock {
    fn records(collections: &Collections) -> &Vec<Self> {
        &collections.paddocks
    }

    fn records_mut(collections: &mut Collections) -> &mut Vec<Self> {
        &mut collections.paddocks
    }

    fn cascade(collections: &mut Collections, previous: &Self, current: &Self) -> Vec<CollectionKey> {
        if previous.name == current.name || previous.name.is_empty() {
            return Vec::new();
        }

        let mut touched = Vec::new();
        if rename(
            collections.animals.iter_mut().map(|a| &mut a.paddock),
            &previous.name,
            &current.name,
        ) {
            touched.push(CollectionKey::Animals);
        }
        if rename(
            collections.lots.iter_mut().map(|l| &mut l.paddock),
            &previous.name,
            &current.name,
        ) {
            touched.push(CollectionKey::Lots);
        }
        touched
    }
}

impl FarmRecord for Lot {
    fn records(collections: &Collections) -> &Vec<Self> {
        &collections.lots
    }

    fn records_mut(collections: &mut Collections) -> &mut Vec<Self> {
        &mut collections.lots
    }

    fn cascade(collections: &mut Collections, previous: &Self, current: &Self) -> Vec<CollectionKey> {
        if previous.name == current.name || previous.name.is_empty() {
            return Vec::new();
        }

        let renamed = rename(
            collections.animals.iter_mut().map(|a| &mut a.lot),
            &previous.name,
            &current.name,
        );
        if renamed {
            vec![CollectionKey::Animals]
        } else {
            Vec::new()
        }
    }
}

impl FarmRecord for VaccineRecord {
    fn records(collections: &Collections) -> &Vec<Self> {
        &collections.vaccines
    }

    fn records_mut(collections: &mut Collections) -> &mut Vec<Self> {
        &mut collections.vaccines
    }
}

impl FarmRecord for HealthRecord {
    fn records(collections: &Collections) -> &Vec<Self> {
        &collections.health_records
    }

    fn records_mut(collections: &mut Collections) -> &mut Vec<Self> {
        &mut collections.health_records
    }
}

impl FarmRecord for MilkProductionRecord {
    fn records(collections: &Collections) -> &Vec<Self> {
        &collections.milk_records
    }

    fn records_mut(collections: &mut Collections) -> &mut Vec<Self> {
        &mut collections.milk_records
    }
}

impl FarmRecord for BirthRecord {
    fn records(collections: &Collections) -> &Vec<Self> {
        &collections.birth_records
    }

    fn records_mut(collections: &mut Collections) -> &mut Vec<Self> {
        &mut collections.birth_records
    }
}

/// Rewrite every reference equal to `from`. Returns whether any changed.
fn rename<'a, I>(references: I, from: &str, to: &str) -> bool
where
    I: Iterator<Item = &'a mut String>,
{
    let mut changed = false;
    for reference in references.filter(|r| r.as_str() == from) {
        *reference = to.to_string();
        changed = true;
    }
    changed
}
