//! Herd distribution across lots and paddocks.

use serde::{Deserialize, Serialize};

use crate::models::{Animal, Lot, Paddock};

/// Grouping used by the distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionBy {
    #[default]
    Lot,
    Paddock,
}

/// One slice of the distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub name: String,
    pub count: usize,
}

/// Animal count per existing lot or paddock, in collection order.
///
/// Every lot/paddock gets a slice whatever its status. Animals whose field is
/// empty or names no existing lot/paddock are not counted anywhere.
pub fn distribution(
    animals: &[Animal],
    lots: &[Lot],
    paddocks: &[Paddock],
    by: DistributionBy,
) -> Vec<DistributionSlice> {
    match by {
        DistributionBy::Lot => lots
            .iter()
            .map(|lot| DistributionSlice {
                name: lot.name.clone(),
                count: animals_in_lot(animals, &lot.name),
            })
            .collect(),
        DistributionBy::Paddock => paddocks
            .iter()
            .map(|paddock| DistributionSlice {
                name: paddock.name.clone(),
                count: animals_in_paddock(animals, &paddock.name),
            })
            .collect(),
    }
}

/// Animals whose lot field equals `lot_name`. Empty names match nothing.
pub fn animals_in_lot(animals: &[Animal], lot_name: &str) -> usize {
    if lot_name.is_empty() {
        return 0;
    }
    animals.iter().filter(|a| a.lot == lot_name).count()
}

/// Animals whose paddock field equals `paddock_name`. Empty names match nothing.
pub fn animals_in_paddock(animals: &[Animal], paddock_name: &str) -> usize {
    if paddock_name.is_empty() {
        return 0;
    }
    animals.iter().filter(|a| a.paddock == paddock_name).count()
}
