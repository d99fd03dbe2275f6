//! Dashboard headline figures.

use serde::{Deserialize, Serialize};

use super::health::under_treatment_count;
use super::production::{production_trend, TrendPeriod};
use crate::models::{Animal, HealthRecord, Lot, MilkProductionRecord, Paddock, PaddockStatus};

/// KPI cards shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_animals: usize,
    pub total_lots: usize,
    pub active_lots: usize,
    pub total_paddocks: usize,
    pub active_paddocks: usize,
    /// Liters over the last seven recorded days
    pub weekly_milk_liters: f64,
    pub under_treatment: usize,
}

pub fn dashboard_summary(
    animals: &[Animal],
    lots: &[Lot],
    paddocks: &[Paddock],
    milk: &[MilkProductionRecord],
    health: &[HealthRecord],
) -> DashboardSummary {
    let weekly_milk_liters = production_trend(milk, TrendPeriod::Weekly)
        .iter()
        .map(|p| p.liters)
        .sum();

    DashboardSummary {
        total_animals: animals.len(),
        total_lots: lots.len(),
        active_lots: lots.iter().filter(|l| l.is_active()).count(),
        total_paddocks: paddocks.len(),
        active_paddocks: paddocks
            .iter()
            .filter(|p| p.status == PaddockStatus::Active)
            .count(),
        weekly_milk_liters,
        under_treatment: under_treatment_count(health),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LotStatus, MilkPeriod};

    #[test]
    fn test_summary_counts() {
        let mut archived = Lot::new("Velho", 5);
        archived.status = LotStatus::Archived;
        let lots = vec![Lot::new("Engorda 01", 60), archived];

        let mut resting = Paddock::new("Mombaça 02");
        resting.status = PaddockStatus::Resting;
        let paddocks = vec![Paddock::new("Piquete A1"), resting];

        let milk: Vec<_> = (1..=9)
            .map(|d| MilkProductionRecord::new(format!("2024-05-{d:02}"), MilkPeriod::FullDay, 10.0))
            .collect();

        let summary = dashboard_summary(
            &[Animal::new("BR-1", "Nelore")],
            &lots,
            &paddocks,
            &milk,
            &[],
        );

        assert_eq!(summary.total_animals, 1);
        assert_eq!(summary.total_lots, 2);
        assert_eq!(summary.active_lots, 1);
        assert_eq!(summary.active_paddocks, 1);
        assert_eq!(summary.total_paddocks, 2);
        assert_eq!(summary.weekly_milk_liters, 70.0);
        assert_eq!(summary.under_treatment, 0);
    }
}
