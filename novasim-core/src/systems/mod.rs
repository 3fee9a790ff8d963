//! Per-mission-type resolution handlers.
//!
//! Each handler applies the arrival effects for one mission type and tells
//! the engine what (if anything) flies home. The engine owns the shared
//! return-trip lifecycle.

pub mod attack;
pub mod colonization;
pub mod combat;
pub mod deployment;
pub mod espionage;
pub mod expedition;
pub mod recycling;
pub mod transport;

pub use combat::{debris_value, resolve_battle, BattleOutcome};

use crate::resources::Resources;
use crate::units::UnitCollection;

/// What a handler sends back on the return leg. `None` means no return
/// trip (fleet docked, was consumed, or was destroyed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnCargo {
    pub units: UnitCollection,
    pub resources: Resources,
}

impl ReturnCargo {
    pub fn units_only(units: UnitCollection) -> Self {
        Self {
            units,
            resources: Resources::ZERO,
        }
    }
}
