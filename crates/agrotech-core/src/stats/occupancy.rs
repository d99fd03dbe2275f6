//! Lot and paddock occupancy.
//!
//! Capacity is advisory. Nothing here stops an animal from being assigned to a
//! full lot; the level only drives warnings.

use serde::{Deserialize, Serialize};

use super::distribution::{animals_in_lot, animals_in_paddock};
use crate::models::{Animal, Lot, Paddock};

/// Percentage at which a lot shows the amber warning.
pub const WARNING_PCT: f64 = 75.0;

/// Percentage at which a lot is near capacity.
pub const CRITICAL_PCT: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccupancyLevel {
    Normal,
    Warning,
    Critical,
}

/// Headcount of one lot against its capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotOccupancy {
    pub lot_id: String,
    pub lot_name: String,
    pub animal_count: usize,
    pub capacity: u32,
    /// `animal_count / capacity * 100`; 0 when capacity is 0
    pub percent: f64,
    pub level: OccupancyLevel,
}

impl LotOccupancy {
    /// At or above [`CRITICAL_PCT`].
    pub fn near_capacity(&self) -> bool {
        self.percent >= CRITICAL_PCT
    }

    pub fn over_capacity(&self) -> bool {
        self.capacity > 0 && self.animal_count > self.capacity as usize
    }

    /// Percentage clamped to 100 for progress bars.
    pub fn bar_percent(&self) -> f64 {
        self.percent.min(100.0)
    }
}

/// Occupancy percentage; a capacity of 0 reads as 0%.
pub fn occupancy_percent(count: usize, capacity: u32) -> f64 {
    if capacity == 0 {
        return 0.0;
    }
    count as f64 * 100.0 / capacity as f64
}

pub fn occupancy_level(percent: f64) -> OccupancyLevel {
    if percent >= CRITICAL_PCT {
        OccupancyLevel::Critical
    } else if percent >= WARNING_PCT {
        OccupancyLevel::Warning
    } else {
        OccupancyLevel::Normal
    }
}

pub fn lot_occupancy(lot: &Lot, animals: &[Animal]) -> LotOccupancy {
    let animal_count = animals_in_lot(animals, &lot.name);
    let percent = occupancy_percent(animal_count, lot.capacity);
    LotOccupancy {
        lot_id: lot.id.clone(),
        lot_name: lot.name.clone(),
        animal_count,
        capacity: lot.capacity,
        percent,
        level: occupancy_level(percent),
    }
}

/// Occupancy of every lot, in collection order.
pub fn all_lot_occupancy(lots: &[Lot], animals: &[Animal]) -> Vec<LotOccupancy> {
    lots.iter().map(|lot| lot_occupancy(lot, animals)).collect()
}

/// Animals with a lot assigned, divided by the number of lots (rounded).
pub fn average_animals_per_lot(lots: &[Lot], animals: &[Animal]) -> usize {
    if lots.is_empty() {
        return 0;
    }
    let allocated = animals.iter().filter(|a| a.has_lot()).count();
    (allocated as f64 / lots.len() as f64).round() as usize
}

/// Current headcount of a paddock, derived from the animal collection.
pub fn paddock_headcount(paddock: &Paddock, animals: &[Animal]) -> usize {
    animals_in_paddock(animals, &paddock.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn herd(lot: &str, n: usize) -> Vec<Animal> {
        (0..n)
            .map(|i| Animal {
                lot: lot.into(),
                ..Animal::new(format!("BR-{i}"), "Nelore")
            })
            .collect()
    }

    #[test]
    fn test_percent_and_levels() {
        let lot = Lot::new("Leite 01", 30);

        let occupancy = lot_occupancy(&lot, &herd("Leite 01", 15));
        assert_eq!(occupancy.percent, 50.0);
        assert_eq!(occupancy.level, OccupancyLevel::Normal);

        let occupancy = lot_occupancy(&lot, &herd("Leite 01", 24));
        assert_eq!(occupancy.level, OccupancyLevel::Warning);
        assert!(!occupancy.near_capacity());

        let occupancy = lot_occupancy(&lot, &herd("Leite 01", 27));
        assert_eq!(occupancy.percent, 90.0);
        assert!(occupancy.near_capacity());
        assert_eq!(occupancy.level, OccupancyLevel::Critical);
    }

    #[test]
    fn test_over_capacity_is_allowed() {
        let lot = Lot::new("Engorda 01", 10);
        let occupancy = lot_occupancy(&lot, &herd("Engorda 01", 12));
        assert_eq!(occupancy.animal_count, 12);
        assert_eq!(occupancy.percent, 120.0);
        assert!(occupancy.over_capacity());
        assert_eq!(occupancy.bar_percent(), 100.0);
    }

    #[test]
    fn test_zero_capacity() {
        let lot = Lot::new("Sem limite", 0);
        let occupancy = lot_occupancy(&lot, &herd("Sem limite", 5));
        assert_eq!(occupancy.percent, 0.0);
        assert!(occupancy.percent.is_finite());
        assert_eq!(occupancy.level, OccupancyLevel::Normal);
        assert!(!occupancy.over_capacity());
    }

    #[test]
    fn test_average_per_lot() {
        let lots = vec![Lot::new("A", 10), Lot::new("B", 10)];
        let mut animals = herd("A", 3);
        animals.extend(herd("", 4));
        assert_eq!(average_animals_per_lot(&lots, &animals), 2);
        assert_eq!(average_animals_per_lot(&[], &animals), 0);
    }

    #[test]
    fn test_paddock_headcount_is_derived() {
        let paddock = Paddock::new("Piquete A1");
        let animals: Vec<Animal> = (0..3)
            .map(|i| Animal {
                paddock: if i < 2 { "Piquete A1".into() } else { String::new() },
                ..Animal::new(format!("BR-{i}"), "Nelore")
            })
            .collect();
        assert_eq!(paddock_headcount(&paddock, &animals), 2);
    }
}
