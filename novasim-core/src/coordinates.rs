//! Galaxy/system/position coordinates and the weighted distance metric.

use novadata::defines::{distance, galaxy};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Coordinate {
    pub galaxy: u8,
    pub system: u16,
    pub position: u8,
}

impl Coordinate {
    pub fn new(galaxy: u8, system: u16, position: u8) -> Self {
        Self {
            galaxy,
            system,
            position,
        }
    }

    /// Weighted travel distance. Galaxy separation dominates, then system,
    /// then position. Constants must match the reference universe exactly.
    pub fn distance_to(&self, other: &Coordinate) -> u64 {
        if self.galaxy != other.galaxy {
            let gap = self.galaxy.abs_diff(other.galaxy) as u64;
            return distance::PER_GALAXY * gap;
        }
        if self.system != other.system {
            let gap = self.system.abs_diff(other.system) as u64;
            return distance::SAME_GALAXY_BASE + distance::PER_SYSTEM * gap;
        }
        if self.position != other.position {
            let gap = self.position.abs_diff(other.position) as u64;
            return distance::SAME_SYSTEM_BASE + distance::PER_POSITION * gap;
        }
        distance::SAME_POSITION
    }

    /// True for the deep-space slot expeditions fly to.
    pub fn is_expedition_slot(&self) -> bool {
        self.position == galaxy::EXPEDITION_POSITION
    }

    /// True for a slot that can hold a planet.
    pub fn is_planet_slot(&self) -> bool {
        (1..=galaxy::MAX_PLANET_POSITION).contains(&self.position)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.galaxy, self.system, self.position)
    }
}
