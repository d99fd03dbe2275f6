//! Domain models for the farm.

mod animal;
mod health;
mod paddock;
mod production;
mod property;

pub use animal::*;
pub use health::*;
pub use paddock::*;
pub use production::*;
pub use property::*;
