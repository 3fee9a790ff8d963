//! Error taxonomy for dispatch and resolution.
//!
//! Dispatch errors surface to the caller and guarantee no state was
//! mutated. Resolution errors never leave a mission stuck: a lost
//! processed-flag race is a benign skip, a missing destination drops the
//! effects but still marks the mission processed.

use novadata::UnitId;
use thiserror::Error;

use crate::coordinates::Coordinate;
use crate::eligibility::IneligibleReason;
use crate::resources::Resources;
use crate::state::MissionId;
use crate::units::UnitShortage;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("mission not eligible: {0}")]
    Ineligible(IneligibleReason),

    #[error("insufficient resources at origin: required {required}, available {available}")]
    InsufficientResources {
        required: Resources,
        available: Resources,
    },

    #[error("insufficient units at origin: {unit} requested {requested}, available {available}")]
    InsufficientUnits {
        unit: UnitId,
        requested: u64,
        available: u64,
    },

    #[error("invalid fleet composition: {0}")]
    InvalidFleetComposition(String),

    #[error("invalid speed percent {0}, expected a multiple of ten in 10..=100")]
    InvalidSpeed(u8),

    #[error("origin planet {0} not found")]
    OriginNotFound(crate::state::PlanetId),

    #[error("planet at {planet} is not owned by player {player}")]
    NotPlanetOwner { planet: Coordinate, player: u32 },
}

impl From<UnitShortage> for DispatchError {
    fn from(shortage: UnitShortage) -> Self {
        DispatchError::InsufficientUnits {
            unit: shortage.unit,
            requested: shortage.requested,
            available: shortage.available,
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// Another resolver already processed this mission. Benign: the loser
    /// of the race skips.
    #[error("mission {0} already processed")]
    AlreadyProcessed(MissionId),

    #[error("mission {0} not found")]
    MissionNotFound(MissionId),
}
