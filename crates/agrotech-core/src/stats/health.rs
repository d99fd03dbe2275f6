//! Health record aggregates.

use crate::models::{HealthRecord, HealthStatus};

/// Sum of recorded costs across every record, whatever its status.
pub fn total_health_cost(records: &[HealthRecord]) -> f64 {
    records.iter().map(|r| r.cost).sum()
}

pub fn under_treatment_count(records: &[HealthRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.status == HealthStatus::UnderTreatment)
        .count()
}
