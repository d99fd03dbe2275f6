//! Paddock (piquete) and lot (lote) models.
//!
//! Neither record stores a headcount. Occupancy is always derived from the
//! animal collection, see [`crate::stats::occupancy`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::parse_date;
use crate::lifecycle::Record;
use crate::store::CollectionKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaddockStatus {
    #[default]
    Active,
    Resting,
    Maintenance,
}

impl PaddockStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Resting => "Descanso",
            Self::Maintenance => "Manutenção",
        }
    }
}

impl fmt::Display for PaddockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A grazing enclosure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Paddock {
    pub id: String,
    pub name: String,
    /// Free-text area, e.g. "15 ha"
    pub area: String,
    /// Forage grown (capim)
    pub forage: String,
    pub status: PaddockStatus,
    pub rest_start: Option<String>,
    pub rest_end: Option<String>,
}

impl Paddock {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Days left in the rest period, negative once it has ended.
    ///
    /// `None` unless the paddock is resting with a parseable end date.
    pub fn rest_days_remaining(&self, today: NaiveDate) -> Option<i64> {
        if self.status != PaddockStatus::Resting {
            return None;
        }
        let end = parse_date(self.rest_end.as_deref()?)?;
        Some((end - today).num_days())
    }
}

impl Record for Paddock {
    const KEY: CollectionKey = CollectionKey::Paddocks;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotStatus {
    #[default]
    Active,
    Archived,
}

impl LotStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Archived => "Arquivado",
        }
    }
}

impl fmt::Display for LotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named group of animals managed together.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Lot {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Paddock name the lot grazes in
    pub paddock: String,
    /// Advisory headcount limit, never enforced
    pub capacity: u32,
    /// ISO formation date
    pub formed_on: String,
    pub status: LotStatus,
}

impl Lot {
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity,
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == LotStatus::Active
    }
}

impl Record for Lot {
    const KEY: CollectionKey = CollectionKey::Lots;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.name
    }
}
