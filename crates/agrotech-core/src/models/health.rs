//! Sanitary models: vaccinations and health events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lifecycle::Record;
use crate::store::CollectionKey;

/// Vaccination schedule state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaccineStatus {
    #[default]
    OnSchedule,
    DueSoon,
    Overdue,
}

impl VaccineStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::OnSchedule => "Em Dia",
            Self::DueSoon => "Vencendo",
            Self::Overdue => "Atrasada",
        }
    }
}

impl fmt::Display for VaccineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One vaccine application.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VaccineRecord {
    pub id: String,
    /// Vaccine name; coverage is grouped by it
    pub name: String,
    /// Target species or group
    pub target: String,
    pub lot: Option<String>,
    pub paddock: Option<String>,
    pub applied_on: String,
    pub next_dose: String,
    pub veterinarian: String,
    /// Status entered by the operator. The schedule state shown to users is
    /// derived from `next_dose`; this value is only used when that date does
    /// not parse.
    pub recorded_status: VaccineStatus,
}

impl VaccineRecord {
    pub fn new(name: impl Into<String>, applied_on: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            applied_on: applied_on.into(),
            ..Default::default()
        }
    }
}

impl Record for VaccineRecord {
    const KEY: CollectionKey = CollectionKey::Vaccines;

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
pub enum HealthEventKind {
    #[default]
    Disease,
    Injury,
    Birth,
    Exam,
    Other,
}

impl HealthEventKind {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Disease => "Doença",
            Self::Injury => "Lesão",
            Self::Birth => "Parto",
            Self::Exam => "Exame",
            Self::Other => "Outro",
        }
    }
}

impl fmt::Display for HealthEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    #[default]
    UnderTreatment,
    Recovered,
    UnderObservation,
    Deceased,
}

impl HealthStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UnderTreatment => "Em Tratamento",
            Self::Recovered => "Recuperado",
            Self::UnderObservation => "Observação",
            Self::Deceased => "Óbito",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A health event for one animal, referenced by ear tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthRecord {
    pub id: String,
    pub animal_tag: String,
    pub kind: HealthEventKind,
    pub diagnosis: String,
    pub date: String,
    pub treatment: String,
    pub veterinarian: String,
    pub cost: f64,
    pub status: HealthStatus,
}

impl HealthRecord {
    pub fn new(animal_tag: impl Into<String>, kind: HealthEventKind) -> Self {
        Self {
            animal_tag: animal_tag.into(),
            kind,
            ..Default::default()
        }
    }
}

impl Record for HealthRecord {
    const KEY: CollectionKey = CollectionKey::HealthRecords;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn label(&self) -> &str {
        &self.animal_tag
    }
}
