//! Vaccination coverage and schedule state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::parse_date;
use crate::models::{VaccineRecord, VaccineStatus};

/// Days ahead of the next dose at which a schedule becomes due soon.
pub const DUE_SOON_DAYS: i64 = 7;

/// Coverage row for one vaccine name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccineCoverage {
    pub name: String,
    pub applications: usize,
    /// Most recent application date, `None` if no date parses
    pub last_applied: Option<NaiveDate>,
    /// Applications over herd size, rounded, capped at 100
    pub coverage_pct: u32,
}

/// Coverage per distinct vaccine name, in first-seen order.
///
/// Coverage counts applications, not distinct animals: a herd vaccinated twice
/// reads 100%, never more. With no animals coverage is 0.
pub fn vaccine_coverage(vaccines: &[VaccineRecord], animal_count: usize) -> Vec<VaccineCoverage> {
    let mut names: Vec<&str> = Vec::new();
    for vaccine in vaccines {
        if !names.contains(&vaccine.name.as_str()) {
            names.push(&vaccine.name);
        }
    }

    names
        .into_iter()
        .map(|name| {
            let applied: Vec<&VaccineRecord> =
                vaccines.iter().filter(|v| v.name == name).collect();
            let last_applied = applied
                .iter()
                .filter_map(|v| parse_date(&v.applied_on))
                .max();

            VaccineCoverage {
                name: name.to_string(),
                applications: applied.len(),
                last_applied,
                coverage_pct: coverage_percent(applied.len(), animal_count),
            }
        })
        .collect()
}

pub fn coverage_percent(applications: usize, animal_count: usize) -> u32 {
    if animal_count == 0 {
        return 0;
    }
    let pct = (applications as f64 / animal_count as f64 * 100.0).round();
    pct.min(100.0) as u32
}

/// Schedule state derived from the next-dose date.
///
/// Past dates are overdue, dates within [`DUE_SOON_DAYS`] (today included) are
/// due soon, later dates are on schedule. When the next dose does not parse
/// the operator-entered status stands.
pub fn schedule_status(vaccine: &VaccineRecord, today: NaiveDate) -> VaccineStatus {
    match parse_date(&vaccine.next_dose) {
        Some(next) => {
            let days = (next - today).num_days();
            if days < 0 {
                VaccineStatus::Overdue
            } else if days <= DUE_SOON_DAYS {
                VaccineStatus::DueSoon
            } else {
                VaccineStatus::OnSchedule
            }
        }
        None => vaccine.recorded_status,
    }
}

/// Record counts per derived schedule state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleCounts {
    pub on_schedule: usize,
    pub due_soon: usize,
    pub overdue: usize,
}

pub fn schedule_counts(vaccines: &[VaccineRecord], today: NaiveDate) -> ScheduleCounts {
    let mut counts = ScheduleCounts::default();
    for vaccine in vaccines {
        match schedule_status(vaccine, today) {
            VaccineStatus::OnSchedule => counts.on_schedule += 1,
            VaccineStatus::DueSoon => counts.due_soon += 1,
            VaccineStatus::Overdue => counts.overdue += 1,
        }
    }
    counts
}

/// Records whose next dose falls within the coming [`DUE_SOON_DAYS`].
pub fn upcoming_count(vaccines: &[VaccineRecord], today: NaiveDate) -> usize {
    vaccines
        .iter()
        .filter_map(|v| parse_date(&v.next_dose))
        .filter(|next| (0..=DUE_SOON_DAYS).contains(&(*next - today).num_days()))
        .count()
}
