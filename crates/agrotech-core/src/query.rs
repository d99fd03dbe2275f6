//! Search, filter and pagination for the list views.
//!
//! Filters use `None` for "Todos" (no constraint). Text search is a
//! case-insensitive substring match.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{
    Animal, HealthEventKind, HealthRecord, HealthStatus, Lot, VaccineRecord, VaccineStatus,
};

/// Rows per page in every list view.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Bucket for vaccine records without a lot or paddock.
pub const UNASSIGNED: &str = "N/A";

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was served
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based index of the first item shown, 0 when the page is empty
    pub first_item: usize,
    /// 1-based index of the last item shown, 0 when the page is empty
    pub last_item: usize,
}

/// Slice `items` into 1-based pages. Page 0 is read as page 1; a page past
/// the end comes back empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let page = page.max(1);
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);

    let start = (page - 1).saturating_mul(per_page).min(total_items);
    let end = start.saturating_add(per_page).min(total_items);
    let page_items = items[start..end].to_vec();

    let (first_item, last_item) = if page_items.is_empty() {
        (0, 0)
    } else {
        (start + 1, end)
    };

    Page {
        items: page_items,
        page,
        total_pages,
        total_items,
        first_item,
        last_item,
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches_opt(value: &str, wanted: &Option<String>) -> bool {
    wanted.as_deref().map_or(true, |w| value == w)
}

/// Herd list filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimalFilter {
    /// Matches ear tag or lot name
    pub search: String,
    pub breed: Option<String>,
    pub lot: Option<String>,
}

impl AnimalFilter {
    pub fn matches(&self, animal: &Animal) -> bool {
        let matches_search =
            contains_ci(&animal.tag, &self.search) || contains_ci(&animal.lot, &self.search);
        matches_search && matches_opt(&animal.breed, &self.breed) && matches_opt(&animal.lot, &self.lot)
    }

    pub fn apply<'a>(&self, animals: &'a [Animal]) -> Vec<&'a Animal> {
        animals.iter().filter(|a| self.matches(a)).collect()
    }
}

/// Health list filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthFilter {
    /// Matches ear tag or diagnosis
    pub search: String,
    pub status: Option<HealthStatus>,
    pub kind: Option<HealthEventKind>,
}

impl HealthFilter {
    pub fn matches(&self, record: &HealthRecord) -> bool {
        let matches_search = contains_ci(&record.animal_tag, &self.search)
            || contains_ci(&record.diagnosis, &self.search);
        matches_search
            && self.status.map_or(true, |s| record.status == s)
            && self.kind.map_or(true, |k| record.kind == k)
    }

    pub fn apply<'a>(&self, records: &'a [HealthRecord]) -> Vec<&'a HealthRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Vaccine list filter.
///
/// `status` compares against the derived schedule state, which the caller
/// computes for the current date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaccineFilter {
    /// Matches vaccine name or target
    pub search: String,
    /// Lot name, or [`UNASSIGNED`]
    pub lot: Option<String>,
    /// Paddock name, or [`UNASSIGNED`]
    pub paddock: Option<String>,
    pub status: Option<VaccineStatus>,
    pub name: Option<String>,
}

impl VaccineFilter {
    pub fn matches(&self, vaccine: &VaccineRecord, status: VaccineStatus) -> bool {
        let matches_search =
            contains_ci(&vaccine.name, &self.search) || contains_ci(&vaccine.target, &self.search);
        let lot = vaccine.lot.as_deref().unwrap_or(UNASSIGNED);
        let paddock = vaccine.paddock.as_deref().unwrap_or(UNASSIGNED);

        matches_search
            && matches_opt(lot, &self.lot)
            && matches_opt(paddock, &self.paddock)
            && self.status.map_or(true, |s| s == status)
            && matches_opt(&vaccine.name, &self.name)
    }
}

/// Lot list filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotFilter {
    /// Matches lot name or description
    pub search: String,
    pub paddock: Option<String>,
}

impl LotFilter {
    pub fn matches(&self, lot: &Lot) -> bool {
        let matches_search =
            contains_ci(&lot.name, &self.search) || contains_ci(&lot.description, &self.search);
        matches_search && matches_opt(&lot.paddock, &self.paddock)
    }

    pub fn apply<'a>(&self, lots: &'a [Lot]) -> Vec<&'a Lot> {
        lots.iter().filter(|l| self.matches(l)).collect()
    }
}

/// Sorted distinct non-empty values, for filter dropdowns.
pub fn distinct<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate() {
        let items: Vec<usize> = (1..=30).collect();

        let first = paginate(&items, 1, DEFAULT_PAGE_SIZE);
        assert_eq!(first.items.len(), 12);
        assert_eq!(first.total_pages, 3);
        assert_eq!((first.first_item, first.last_item), (1, 12));

        let last = paginate(&items, 3, DEFAULT_PAGE_SIZE);
        assert_eq!(last.items, (25..=30).collect::<Vec<_>>());
        assert_eq!((last.first_item, last.last_item), (25, 30));
    }

    #[test]
    fn test_paginate_edges() {
        let items: Vec<usize> = (1..=5).collect();
        assert_eq!(paginate(&items, 0, 12).page, 1);
        assert!(paginate(&items, 9, 12).items.is_empty());
        assert_eq!(paginate(&items, 9, 12).first_item, 0);

        let empty = paginate::<usize>(&[], 1, 12);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_animal_filter() {
        let mut a = Animal::new("BR-1001", "Nelore");
        a.lot = "Engorda 01".into();
        let mut b = Animal::new("BR-2005", "Holandês");
        b.lot = "Leite 01".into();
        let animals = vec![a, b];

        let by_search = AnimalFilter {
            search: "leite".into(),
            ..Default::default()
        };
        assert_eq!(by_search.apply(&animals).len(), 1);

        let by_breed = AnimalFilter {
            breed: Some("Nelore".into()),
            ..Default::default()
        };
        assert_eq!(by_breed.apply(&animals)[0].tag, "BR-1001");

        assert_eq!(AnimalFilter::default().apply(&animals).len(), 2);
    }

    #[test]
    fn test_health_filter() {
        let mut record = HealthRecord::new("BR-1002", HealthEventKind::Disease);
        record.diagnosis = "Mastite".into();
        record.status = HealthStatus::Recovered;

        let filter = HealthFilter {
            search: "mast".into(),
            status: Some(HealthStatus::Recovered),
            kind: None,
        };
        assert!(filter.matches(&record));

        let filter = HealthFilter {
            status: Some(HealthStatus::UnderTreatment),
            ..Default::default()
        };
        assert!(!filter.matches(&record));
    }

    #[test]
    fn test_vaccine_filter_unassigned_bucket() {
        let vaccine = VaccineRecord::new("Aftosa", "2024-05-01");
        let filter = VaccineFilter {
            lot: Some(UNASSIGNED.into()),
            ..Default::default()
        };
        assert!(filter.matches(&vaccine, VaccineStatus::OnSchedule));

        let filter = VaccineFilter {
            status: Some(VaccineStatus::Overdue),
            ..Default::default()
        };
        assert!(!filter.matches(&vaccine, VaccineStatus::OnSchedule));
    }

    #[test]
    fn test_lot_filter() {
        let mut lot = Lot::new("Leite 01", 30);
        lot.description = "Vacas em lactação".into();
        lot.paddock = "Mombaça 02".into();

        let filter = LotFilter {
            search: "lactação".into(),
            paddock: Some("Mombaça 02".into()),
        };
        assert_eq!(filter.apply(std::slice::from_ref(&lot)).len(), 1);
    }

    #[test]
    fn test_distinct() {
        let values = distinct(["Nelore", "Angus", "", "Nelore"]);
        assert_eq!(values, vec!["Angus".to_string(), "Nelore".to_string()]);
    }
}
