//! Livestock models.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::lifecycle::Record;
use crate::stats::age_label;
use crate::store::CollectionKey;

/// Health status shown on the herd list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalStatus {
    #[default]
    Healthy,
    Sick,
    UnderObservation,
}

impl AnimalStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "Saudável",
            Self::Sick => "Doente",
            Self::UnderObservation => "Observação",
        }
    }
}

impl fmt::Display for AnimalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One weighing event.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeightRecord {
    /// Date of the weighing
    pub date: String,
    /// Weight in kg
    pub weight: f64,
}

/// An animal identified by its ear tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Animal {
    /// Record ID, empty until first save
    pub id: String,
    /// Ear tag (brinco), the human-facing reference
    pub tag: String,
    pub breed: String,
    /// ISO birth date
    pub birth_date: String,
    /// Cached age label; recomputed from `birth_date` on every save
    pub age: String,
    /// Current weight in kg
    pub weight: f64,
    /// Weighings in the order they were recorded
    pub weight_history: Vec<WeightRecord>,
    /// Lot name, empty when unassigned
    pub lot: String,
    /// Paddock name, empty when unassigned
    pub paddock: String,
    pub status: AnimalStatus,
    /// RFC 3339 timestamp of the last save
    pub last_update: String,
}

impl Animal {
    /// Create an unsaved animal with required fields.
    pub fn new(tag: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            breed: breed.into(),
            ..Default::default()
        }
    }

    /// Append a weighing and make it the current weight.
    pub fn record_weighing(&mut self, date: impl Into<String>, weight: f64) {
        self.weight_history.push(WeightRecord {
            date: date.into(),
            weight,
        });
        self.weight = weight;
    }

    /// Weight gained between the first and last weighing.
    pub fn weight_gain(&self) -> Option<f64> {
        match (self.weight_history.first(), self.weight_history.last()) {
            (Some(first), Some(last)) if self.weight_history.len() > 1 => {
                Some(last.weight - first.weight)
            }
            _ => None,
        }
    }

    /// Recompute the cached age label.
    pub fn refresh_age(&mut self, today: NaiveDate) {
        self.age = age_label(&self.birth_date, today);
    }

    pub fn has_lot(&self) -> bool {
        !self.lot.trim().is_empty()
    }

    pub fn has_paddock(&self) -> bool {
        !self.paddock.trim().is_empty()
    }
}

impl Record for Animal {
    const KEY: CollectionKey = CollectionKey::Animals;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.tag
    }
}
