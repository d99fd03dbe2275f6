//! Farm state: the loaded collections plus the store they persist to.
//!
//! Every mutation changes the in-memory collection first and then saves the
//! whole collection. If the save fails the error is returned and memory stays
//! ahead of storage until [`FarmState::reload`].

mod records;

pub use records::FarmRecord;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;
use tracing::{debug, info};

use agrotech_insight::HerdSnapshot;

use crate::lifecycle::{self, Record, UpsertOutcome};
use crate::models::{
    Animal, BirthRecord, HealthRecord, Lot, MilkProductionRecord, Paddock, Property,
    VaccineRecord,
};
use crate::seed;
use crate::stats::{self, DashboardSummary};
use crate::store::{CollectionKey, RecordStore, StoreError};

#[derive(Error, Debug)]
pub enum FarmError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type FarmResult<T> = Result<T, FarmError>;

/// Result of a confirmed-delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    /// The confirmation callback said no; nothing changed.
    Declined,
    /// No record with that ID; confirmation was not asked.
    NotFound,
}

/// The record collections held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    pub animals: Vec<Animal>,
    pub paddocks: Vec<Paddock>,
    pub lots: Vec<Lot>,
    pub vaccines: Vec<VaccineRecord>,
    pub health_records: Vec<HealthRecord>,
    pub milk_records: Vec<MilkProductionRecord>,
    pub birth_records: Vec<BirthRecord>,
}

impl Collections {
    /// Read every collection, falling back to the seed data.
    fn load<S: RecordStore>(store: &S) -> FarmResult<Self> {
        Ok(Self {
            animals: store.load(CollectionKey::Animals, seed::animals())?,
            paddocks: store.load(CollectionKey::Paddocks, seed::paddocks())?,
            lots: store.load(CollectionKey::Lots, seed::lots())?,
            vaccines: store.load(CollectionKey::Vaccines, Vec::new())?,
            health_records: store.load(CollectionKey::HealthRecords, Vec::new())?,
            milk_records: store.load(CollectionKey::MilkRecords, Vec::new())?,
            birth_records: store.load(CollectionKey::BirthRecords, Vec::new())?,
        })
    }

    fn save<S: RecordStore>(&self, store: &S, key: CollectionKey) -> FarmResult<()> {
        match key {
            CollectionKey::Animals => store.save(key, &self.animals)?,
            CollectionKey::Paddocks => store.save(key, &self.paddocks)?,
            CollectionKey::Lots => store.save(key, &self.lots)?,
            CollectionKey::Vaccines => store.save(key, &self.vaccines)?,
            CollectionKey::HealthRecords => store.save(key, &self.health_records)?,
            CollectionKey::MilkRecords => store.save(key, &self.milk_records)?,
            CollectionKey::BirthRecords => store.save(key, &self.birth_records)?,
            // Singletons are saved by their own methods.
            CollectionKey::Property | CollectionKey::User => {}
        }
        Ok(())
    }
}

/// Application state container.
pub struct FarmState<S: RecordStore> {
    store: S,
    collections: Collections,
    property: Property,
}

impl<S: RecordStore> FarmState<S> {
    /// Load all collections from `store`, seeding the ones never saved.
    pub fn load(store: S) -> FarmResult<Self> {
        Self::load_on(store, Utc::now().date_naive())
    }

    /// [`load`](Self::load), with cached age labels computed for `today`.
    pub fn load_on(store: S, today: NaiveDate) -> FarmResult<Self> {
        let mut collections = Collections::load(&store)?;
        refresh_ages(&mut collections.animals, today);
        let property = store.load(CollectionKey::Property, seed::property())?;
        info!(
            animals = collections.animals.len(),
            lots = collections.lots.len(),
            paddocks = collections.paddocks.len(),
            "farm state loaded"
        );
        Ok(Self {
            store,
            collections,
            property,
        })
    }

    /// Discard in-memory state and read everything from the store again.
    pub fn reload(&mut self) -> FarmResult<()> {
        self.collections = Collections::load(&self.store)?;
        refresh_ages(&mut self.collections.animals, Utc::now().date_naive());
        self.property = self.store.load(CollectionKey::Property, seed::property())?;
        debug!("farm state reloaded");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    pub fn records<T: FarmRecord>(&self) -> &[T] {
        T::records(&self.collections)
    }

    pub fn find<T: FarmRecord>(&self, id: &str) -> Option<&T> {
        lifecycle::find(T::records(&self.collections), id)
    }

    pub fn animals(&self) -> &[Animal] {
        &self.collections.animals
    }

    pub fn paddocks(&self) -> &[Paddock] {
        &self.collections.paddocks
    }

    pub fn lots(&self) -> &[Lot] {
        &self.collections.lots
    }

    pub fn vaccines(&self) -> &[VaccineRecord] {
        &self.collections.vaccines
    }

    pub fn health_records(&self) -> &[HealthRecord] {
        &self.collections.health_records
    }

    pub fn milk_records(&self) -> &[MilkProductionRecord] {
        &self.collections.milk_records
    }

    pub fn birth_records(&self) -> &[BirthRecord] {
        &self.collections.birth_records
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    /// Create or replace a record and persist its collection.
    pub fn upsert<T: FarmRecord>(&mut self, record: T) -> FarmResult<UpsertOutcome> {
        self.upsert_at(record, Utc::now())
    }

    /// [`upsert`](Self::upsert) with an explicit clock.
    pub fn upsert_at<T: FarmRecord>(
        &mut self,
        mut record: T,
        now: DateTime<Utc>,
    ) -> FarmResult<UpsertOutcome> {
        record.prepare(now);

        // An empty ID never names an existing record, even if stored data
        // left some records without one.
        let previous = if record.id().is_empty() {
            None
        } else {
            lifecycle::find(T::records(&self.collections), record.id()).cloned()
        };
        let outcome = lifecycle::upsert(T::records_mut(&mut self.collections), record);

        let mut touched = vec![T::KEY];
        if let (UpsertOutcome::Updated(id), Some(previous)) = (&outcome, previous) {
            if let Some(current) = lifecycle::find(T::records(&self.collections), id).cloned() {
                touched.extend(T::cascade(&mut self.collections, &previous, &current));
            }
        }

        for key in &touched {
            self.collections.save(&self.store, *key)?;
        }

        debug!(
            collection = %T::KEY,
            id = outcome.id(),
            inserted = outcome.is_insert(),
            cascaded = touched.len() - 1,
            "record saved"
        );
        Ok(outcome)
    }

    /// Delete a record after `confirm` approves it.
    pub fn remove<T, F>(&mut self, id: &str, confirm: F) -> FarmResult<Removal>
    where
        T: FarmRecord,
        F: FnOnce(&T) -> bool,
    {
        let Some(record) = lifecycle::find(T::records(&self.collections), id) else {
            debug!(collection = %T::KEY, id, "remove: no such record");
            return Ok(Removal::NotFound);
        };

        if !confirm(record) {
            debug!(collection = %T::KEY, id, "remove declined");
            return Ok(Removal::Declined);
        }

        if let Some(removed) = lifecycle::remove(T::records_mut(&mut self.collections), id) {
            self.collections.save(&self.store, T::KEY)?;
            info!(collection = %T::KEY, id, label = removed.label(), "record removed");
        }
        Ok(Removal::Removed)
    }

    /// Append a weighing to an animal and make it the current weight.
    pub fn record_weighing(&mut self, animal_id: &str, date: &str, weight: f64) -> FarmResult<()> {
        let animal = self
            .collections
            .animals
            .iter_mut()
            .find(|a| a.id == animal_id)
            .ok_or_else(|| FarmError::NotFound(format!("animal {animal_id}")))?;

        animal.record_weighing(date, weight);
        animal.last_update = Utc::now().to_rfc3339();
        let tag = animal.tag.clone();

        self.collections.save(&self.store, CollectionKey::Animals)?;
        debug!(animal = %tag, weight, "weighing recorded");
        Ok(())
    }

    /// Replace the property singleton.
    pub fn update_property(&mut self, property: Property) -> FarmResult<()> {
        self.store.save(CollectionKey::Property, &property)?;
        self.property = property;
        info!(name = %self.property.name, "property updated");
        Ok(())
    }

    /// Figures fed to the insight prompt.
    pub fn herd_snapshot(&self) -> HerdSnapshot {
        HerdSnapshot {
            total_animals: self.collections.animals.len(),
            lot_count: self.collections.lots.len(),
            average_milk_liters: stats::average_liters(&self.collections.milk_records),
            under_treatment: stats::under_treatment_count(&self.collections.health_records),
        }
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        stats::dashboard_summary(
            &self.collections.animals,
            &self.collections.lots,
            &self.collections.paddocks,
            &self.collections.milk_records,
            &self.collections.health_records,
        )
    }

    /// Headcount of a paddock, derived from animal assignments.
    pub fn paddock_headcount(&self, paddock_id: &str) -> Option<usize> {
        let paddock = self.find::<Paddock>(paddock_id)?;
        Some(stats::paddock_headcount(paddock, &self.collections.animals))
    }
}

/// Recompute cached age labels in memory. Storage keeps the old labels until
/// the animal is next saved.
fn refresh_ages(animals: &mut [Animal], today: NaiveDate) {
    for animal in animals {
        animal.refresh_age(today);
    }
}
