//! Milk production aggregates.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::dates::{day_month_label, parse_date};
use crate::models::MilkProductionRecord;

/// Number of points in the weekly trend window.
pub const WEEKLY_POINTS: usize = 7;

/// Which slice of the trend to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendPeriod {
    /// The last seven recorded days.
    #[default]
    Weekly,
    /// Every recorded day.
    Monthly,
}

/// Liters produced on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// `dd/mm` chart label
    pub label: String,
    pub liters: f64,
}

/// Daily production totals in calendar order.
///
/// Records are grouped by their full date, so series spanning a year boundary
/// stay in order. Records whose date does not parse are left out.
pub fn production_trend(records: &[MilkProductionRecord], period: TrendPeriod) -> Vec<TrendPoint> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in records {
        if let Some(date) = parse_date(&record.date) {
            *by_day.entry(date).or_insert(0.0) += record.liters;
        }
    }

    let points: Vec<TrendPoint> = by_day
        .into_iter()
        .map(|(date, liters)| TrendPoint {
            date,
            label: day_month_label(date),
            liters,
        })
        .collect();

    match period {
        TrendPeriod::Weekly => {
            let skip = points.len().saturating_sub(WEEKLY_POINTS);
            points.into_iter().skip(skip).collect()
        }
        TrendPeriod::Monthly => points,
    }
}

/// Production headline figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSummary {
    /// Liters recorded in the calendar month of `today`
    pub current_month_total: f64,
    /// Liters recorded from seven days before `today` through `today`
    pub weekly_total: f64,
    /// Mean fat percentage over all records; records without fat count as 0
    pub average_fat_pct: f64,
    pub record_count: usize,
}

pub fn production_summary(records: &[MilkProductionRecord], today: NaiveDate) -> ProductionSummary {
    let (month_start, month_end) = month_bounds(today);
    let current_month_total = sum_liters(filter_by_date_range(records, month_start, month_end));
    let weekly_total = sum_liters(filter_by_date_range(records, today - Duration::days(7), today));

    let average_fat_pct = if records.is_empty() {
        0.0
    } else {
        records.iter().map(|r| r.fat_pct.unwrap_or(0.0)).sum::<f64>() / records.len() as f64
    };

    ProductionSummary {
        current_month_total,
        weekly_total,
        average_fat_pct,
        record_count: records.len(),
    }
}

fn sum_liters(records: Vec<&MilkProductionRecord>) -> f64 {
    records.iter().map(|r| r.liters).sum()
}

/// Mean liters per record, 0 when there are none.
pub fn average_liters(records: &[MilkProductionRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|r| r.liters).sum::<f64>() / records.len() as f64
}

/// Records dated within `start..=end`. Unparseable dates are excluded.
pub fn filter_by_date_range<'a>(
    records: &'a [MilkProductionRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&'a MilkProductionRecord> {
    records
        .iter()
        .filter(|r| parse_date(&r.date).is_some_and(|d| d >= start && d <= end))
        .collect()
}

/// First and last day of the month containing `today`.
pub fn month_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day(1).unwrap_or(today);
    let next_month = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)
    };
    let last = next_month.and_then(|d| d.pred_opt()).unwrap_or(today);
    (first, last)
}
