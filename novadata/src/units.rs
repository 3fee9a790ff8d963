//! Unit catalog: ships and stationary defenses.
//!
//! Each unit carries a stable numeric type id used in persisted records,
//! and a static [`UnitStats`] block. Defenses have zero speed and cargo and
//! can never be part of a flying fleet.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All unit types in the game, ships first, then defenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum UnitId {
    SmallCargo,
    LargeCargo,
    LightFighter,
    HeavyFighter,
    Cruiser,
    Battleship,
    ColonyShip,
    Recycler,
    EspionageProbe,
    Bomber,
    Destroyer,
    Battlecruiser,
    RocketLauncher,
    LightLaser,
    HeavyLaser,
    GaussCannon,
    IonCannon,
    PlasmaTurret,
}

/// Static per-unit stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitStats {
    /// Base travel speed. Zero for defenses.
    pub speed: u32,
    /// Cargo hold capacity.
    pub cargo: u64,
    /// Base deuterium consumption over the reference distance.
    pub fuel: u32,
    /// Base weapon power per combat round.
    pub weapon: u64,
    /// Base shield absorption.
    pub shield: u64,
    /// Metal part of the build cost.
    pub cost_metal: u64,
    /// Crystal part of the build cost.
    pub cost_crystal: u64,
}

impl UnitStats {
    /// Hull points, derived from build cost as in the reference rules.
    pub fn hull(&self) -> u64 {
        (self.cost_metal + self.cost_crystal) / crate::defines::combat::HULL_COST_DIVISOR
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown unit type id {0}")]
pub struct UnknownUnitId(pub u16);

impl UnitId {
    pub const ALL: [UnitId; 18] = [
        UnitId::SmallCargo,
        UnitId::LargeCargo,
        UnitId::LightFighter,
        UnitId::HeavyFighter,
        UnitId::Cruiser,
        UnitId::Battleship,
        UnitId::ColonyShip,
        UnitId::Recycler,
        UnitId::EspionageProbe,
        UnitId::Bomber,
        UnitId::Destroyer,
        UnitId::Battlecruiser,
        UnitId::RocketLauncher,
        UnitId::LightLaser,
        UnitId::HeavyLaser,
        UnitId::GaussCannon,
        UnitId::IonCannon,
        UnitId::PlasmaTurret,
    ];

    /// Stable numeric id used in persisted unit compositions.
    pub fn type_id(self) -> u16 {
        match self {
            UnitId::SmallCargo => 202,
            UnitId::LargeCargo => 203,
            UnitId::LightFighter => 204,
            UnitId::HeavyFighter => 205,
            UnitId::Cruiser => 206,
            UnitId::Battleship => 207,
            UnitId::ColonyShip => 208,
            UnitId::Recycler => 209,
            UnitId::EspionageProbe => 210,
            UnitId::Bomber => 211,
            UnitId::Destroyer => 213,
            UnitId::Battlecruiser => 215,
            UnitId::RocketLauncher => 401,
            UnitId::LightLaser => 402,
            UnitId::HeavyLaser => 403,
            UnitId::GaussCannon => 404,
            UnitId::IonCannon => 405,
            UnitId::PlasmaTurret => 406,
        }
    }

    pub fn from_type_id(id: u16) -> Option<UnitId> {
        UnitId::ALL.iter().copied().find(|u| u.type_id() == id)
    }

    /// True for units that can fly missions.
    pub fn is_ship(self) -> bool {
        self.stats().speed > 0
    }

    /// True for stationary defense structures.
    pub fn is_defense(self) -> bool {
        !self.is_ship()
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitId::SmallCargo => "small_cargo",
            UnitId::LargeCargo => "large_cargo",
            UnitId::LightFighter => "light_fighter",
            UnitId::HeavyFighter => "heavy_fighter",
            UnitId::Cruiser => "cruiser",
            UnitId::Battleship => "battleship",
            UnitId::ColonyShip => "colony_ship",
            UnitId::Recycler => "recycler",
            UnitId::EspionageProbe => "espionage_probe",
            UnitId::Bomber => "bomber",
            UnitId::Destroyer => "destroyer",
            UnitId::Battlecruiser => "battlecruiser",
            UnitId::RocketLauncher => "rocket_launcher",
            UnitId::LightLaser => "light_laser",
            UnitId::HeavyLaser => "heavy_laser",
            UnitId::GaussCannon => "gauss_cannon",
            UnitId::IonCannon => "ion_cannon",
            UnitId::PlasmaTurret => "plasma_turret",
        }
    }

    /// Static stats block, reference universe values.
    pub fn stats(self) -> UnitStats {
        match self {
            UnitId::SmallCargo => UnitStats {
                speed: 5_000,
                cargo: 5_000,
                fuel: 10,
                weapon: 5,
                shield: 10,
                cost_metal: 2_000,
                cost_crystal: 2_000,
            },
            UnitId::LargeCargo => UnitStats {
                speed: 7_500,
                cargo: 25_000,
                fuel: 50,
                weapon: 5,
                shield: 25,
                cost_metal: 6_000,
                cost_crystal: 6_000,
            },
            UnitId::LightFighter => UnitStats {
                speed: 12_500,
                cargo: 50,
                fuel: 20,
                weapon: 50,
                shield: 10,
                cost_metal: 3_000,
                cost_crystal: 1_000,
            },
            UnitId::HeavyFighter => UnitStats {
                speed: 10_000,
                cargo: 100,
                fuel: 75,
                weapon: 150,
                shield: 25,
                cost_metal: 6_000,
                cost_crystal: 4_000,
            },
            UnitId::Cruiser => UnitStats {
                speed: 15_000,
                cargo: 800,
                fuel: 300,
                weapon: 400,
                shield: 50,
                cost_metal: 20_000,
                cost_crystal: 7_000,
            },
            UnitId::Battleship => UnitStats {
                speed: 10_000,
                cargo: 1_500,
                fuel: 500,
                weapon: 1_000,
                shield: 200,
                cost_metal: 45_000,
                cost_crystal: 15_000,
            },
            UnitId::ColonyShip => UnitStats {
                speed: 2_500,
                cargo: 7_500,
                fuel: 1_000,
                weapon: 50,
                shield: 100,
                cost_metal: 10_000,
                cost_crystal: 20_000,
            },
            UnitId::Recycler => UnitStats {
                speed: 2_000,
                cargo: 20_000,
                fuel: 300,
                weapon: 1,
                shield: 10,
                cost_metal: 10_000,
                cost_crystal: 6_000,
            },
            UnitId::EspionageProbe => UnitStats {
                speed: 100_000_000,
                cargo: 5,
                fuel: 1,
                weapon: 0,
                shield: 0,
                cost_metal: 0,
                cost_crystal: 1_000,
            },
            UnitId::Bomber => UnitStats {
                speed: 4_000,
                cargo: 500,
                fuel: 1_000,
                weapon: 1_000,
                shield: 500,
                cost_metal: 50_000,
                cost_crystal: 25_000,
            },
            UnitId::Destroyer => UnitStats {
                speed: 5_000,
                cargo: 2_000,
                fuel: 1_000,
                weapon: 2_000,
                shield: 500,
                cost_metal: 60_000,
                cost_crystal: 50_000,
            },
            UnitId::Battlecruiser => UnitStats {
                speed: 10_000,
                cargo: 750,
                fuel: 250,
                weapon: 700,
                shield: 400,
                cost_metal: 30_000,
                cost_crystal: 40_000,
            },
            UnitId::RocketLauncher => UnitStats {
                speed: 0,
                cargo: 0,
                fuel: 0,
                weapon: 80,
                shield: 20,
                cost_metal: 2_000,
                cost_crystal: 0,
            },
            UnitId::LightLaser => UnitStats {
                speed: 0,
                cargo: 0,
                fuel: 0,
                weapon: 100,
                shield: 25,
                cost_metal: 1_500,
                cost_crystal: 500,
            },
            UnitId::HeavyLaser => UnitStats {
                speed: 0,
                cargo: 0,
                fuel: 0,
                weapon: 250,
                shield: 100,
                cost_metal: 6_000,
                cost_crystal: 2_000,
            },
            UnitId::GaussCannon => UnitStats {
                speed: 0,
                cargo: 0,
                fuel: 0,
                weapon: 1_100,
                shield: 200,
                cost_metal: 20_000,
                cost_crystal: 15_000,
            },
            UnitId::IonCannon => UnitStats {
                speed: 0,
                cargo: 0,
                fuel: 0,
                weapon: 150,
                shield: 500,
                cost_metal: 2_000,
                cost_crystal: 6_000,
            },
            UnitId::PlasmaTurret => UnitStats {
                speed: 0,
                cargo: 0,
                fuel: 0,
                weapon: 3_000,
                shield: 300,
                cost_metal: 50_000,
                cost_crystal: 50_000,
            },
        }
    }
}

impl From<UnitId> for u16 {
    fn from(unit: UnitId) -> u16 {
        unit.type_id()
    }
}

impl TryFrom<u16> for UnitId {
    type Error = UnknownUnitId;

    fn try_from(id: u16) -> Result<Self, Self::Error> {
        UnitId::from_type_id(id).ok_or(UnknownUnitId(id))
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
