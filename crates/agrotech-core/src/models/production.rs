//! Milk production and birth models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lifecycle::Record;
use crate::store::CollectionKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilkPeriod {
    Morning,
    Afternoon,
    #[default]
    FullDay,
}

impl MilkPeriod {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Manhã",
            Self::Afternoon => "Tarde",
            Self::FullDay => "Total Dia",
        }
    }
}

impl fmt::Display for MilkPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A milking record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MilkProductionRecord {
    pub id: String,
    /// ISO or `dd/mm/yyyy` date
    pub date: String,
    pub period: MilkPeriod,
    pub liters: f64,
    /// Fat percentage
    pub fat_pct: Option<f64>,
    /// Protein percentage
    pub protein_pct: Option<f64>,
    /// Total bacterial count (CBS)
    pub bacterial_count: Option<f64>,
    /// Somatic cell count (CCS)
    pub somatic_cell_count: Option<f64>,
    pub responsible: String,
}

impl MilkProductionRecord {
    pub fn new(date: impl Into<String>, period: MilkPeriod, liters: f64) -> Self {
        Self {
            date: date.into(),
            period,
            liters,
            ..Default::default()
        }
    }
}

impl Record for MilkProductionRecord {
    const KEY: CollectionKey = CollectionKey::MilkRecords;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalfSex {
    #[default]
    Male,
    Female,
}

impl CalfSex {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Male => "Macho",
            Self::Female => "Fêmea",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryKind {
    #[default]
    Natural,
    Assisted,
    Cesarean,
}

impl DeliveryKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Natural => "Natural",
            Self::Assisted => "Auxiliado",
            Self::Cesarean => "Cesariana",
        }
    }
}

/// A calving.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BirthRecord {
    pub id: String,
    pub date: String,
    pub mother_tag: String,
    pub father_name: Option<String>,
    pub calf_tag: String,
    pub sex: CalfSex,
    /// Birth weight in kg
    pub birth_weight: f64,
    pub delivery: DeliveryKind,
    pub notes: Option<String>,
}

impl BirthRecord {
    pub fn new(
        date: impl Into<String>,
        mother_tag: impl Into<String>,
        calf_tag: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            mother_tag: mother_tag.into(),
            calf_tag: calf_tag.into(),
            ..Default::default()
        }
    }
}

impl Record for BirthRecord {
    const KEY: CollectionKey = CollectionKey::BirthRecords;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.calf_tag
    }
}
