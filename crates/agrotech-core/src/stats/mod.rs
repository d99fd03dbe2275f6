//! Derived statistics.
//!
//! Pure functions over the raw collections. Nothing is cached: every call
//! recomputes from its inputs, and anything that depends on the current date
//! takes `today` explicitly.

mod age;
mod dashboard;
mod distribution;
mod health;
mod production;
mod vaccines;

pub mod occupancy;

pub use age::*;
pub use dashboard::*;
pub use distribution::*;
pub use health::*;
pub use occupancy::{
    all_lot_occupancy, average_animals_per_lot, lot_occupancy, occupancy_percent,
    paddock_headcount, LotOccupancy, OccupancyLevel,
};
pub use production::*;
pub use vaccines::*;
