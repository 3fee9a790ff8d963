//! World state: players, planets, debris fields and the mission table.
//!
//! Time is a game clock in seconds (`WorldState::now`), not wall clock.
//! All randomness flows through `rng_state` so runs are replayable.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::coordinates::Coordinate;
use crate::errors::ResolveError;
use crate::resources::Resources;
use crate::units::{UnitCollection, UnitShortage};

pub type PlayerId = u32;
pub type PlanetId = u32;
pub type MissionId = u64;

/// Research levels that feed combat and espionage modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TechLevels {
    pub weapons: u8,
    pub shielding: u8,
    pub armor: u8,
    pub espionage: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub tech: TechLevels,
}

/// Building levels visible in espionage reports and used as colony defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildingLevels {
    pub metal_mine: u8,
    pub crystal_mine: u8,
    pub deuterium_synthesizer: u8,
    pub shipyard: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub name: String,
    pub owner: PlayerId,
    pub coordinates: Coordinate,
    pub resources: Resources,
    pub units: UnitCollection,
    pub buildings: BuildingLevels,
}

impl Planet {
    pub fn add_resources(&mut self, amount: Resources) {
        self.resources += amount;
    }

    /// All-or-nothing debit of stored resources.
    pub fn subtract_resources(&mut self, amount: &Resources) -> Result<(), Resources> {
        match self.resources.checked_sub(amount) {
            Some(rest) => {
                self.resources = rest;
                Ok(())
            }
            None => Err(self.resources),
        }
    }

    pub fn add_units(&mut self, units: &UnitCollection) {
        self.units.merge(units);
    }

    /// All-or-nothing undocking of units.
    pub fn subtract_units(&mut self, units: &UnitCollection) -> Result<(), UnitShortage> {
        self.units.subtract(units)
    }
}

/// Coordinate-keyed accumulation of wreckage. Created lazily on first
/// deposit, updated additively, never deleted (may hold zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebrisField {
    pub coordinates: Coordinate,
    pub metal: u64,
    pub crystal: u64,
}

impl DebrisField {
    pub fn new(coordinates: Coordinate) -> Self {
        Self {
            coordinates,
            metal: 0,
            crystal: 0,
        }
    }

    pub fn resources(&self) -> Resources {
        Resources::new(self.metal, self.crystal, 0, 0)
    }

    pub fn is_empty(&self) -> bool {
        self.metal == 0 && self.crystal == 0
    }

    /// Deuterium never survives as wreckage; only metal and crystal land.
    pub fn append(&mut self, amount: &Resources) {
        self.metal += amount.metal;
        self.crystal += amount.crystal;
    }

    /// Take up to `capacity` resources out of the field, proportionally
    /// across metal and crystal, zeroing the collected portion.
    pub fn collect_up_to(&mut self, capacity: u64) -> Resources {
        let collected = self.resources().capped_at(capacity);
        self.metal -= collected.metal;
        self.crystal -= collected.crystal;
        collected
    }
}

/// Closed set of mission types, each with a stable persisted id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum MissionType {
    Attack,
    Transport,
    Deployment,
    Espionage,
    Colonization,
    Recycling,
    Expedition,
}

impl MissionType {
    pub const ALL: [MissionType; 7] = [
        MissionType::Attack,
        MissionType::Transport,
        MissionType::Deployment,
        MissionType::Espionage,
        MissionType::Colonization,
        MissionType::Recycling,
        MissionType::Expedition,
    ];

    /// Stable persisted mission type id.
    pub fn type_id(self) -> u8 {
        match self {
            MissionType::Attack => 1,
            MissionType::Transport => 3,
            MissionType::Deployment => 4,
            MissionType::Espionage => 6,
            MissionType::Colonization => 7,
            MissionType::Recycling => 8,
            MissionType::Expedition => 15,
        }
    }

    pub fn from_type_id(id: u8) -> Option<MissionType> {
        MissionType::ALL.iter().copied().find(|m| m.type_id() == id)
    }

    /// Whether the outbound leg spawns a return trip on success.
    /// Deployment docks at the target; colonization consumes the ship.
    pub fn has_return_mission(self) -> bool {
        match self {
            MissionType::Deployment | MissionType::Colonization => false,
            MissionType::Attack
            | MissionType::Transport
            | MissionType::Espionage
            | MissionType::Recycling
            | MissionType::Expedition => true,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MissionType::Attack => "attack",
            MissionType::Transport => "transport",
            MissionType::Deployment => "deployment",
            MissionType::Espionage => "espionage",
            MissionType::Colonization => "colonization",
            MissionType::Recycling => "recycling",
            MissionType::Expedition => "expedition",
        }
    }
}

impl From<MissionType> for u8 {
    fn from(mission: MissionType) -> u8 {
        mission.type_id()
    }
}

impl TryFrom<u8> for MissionType {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        MissionType::from_type_id(id).ok_or_else(|| format!("unknown mission type id {id}"))
    }
}

impl std::fmt::Display for MissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

mod bool_as_int {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(u8::deserialize(deserializer)? != 0)
    }
}

/// The central persisted record: a scheduled, time-delayed transfer of
/// units and resources between two coordinates.
///
/// Field names and encodings are the persistence contract: mission type as
/// its integer id, `processed` as 0/1, unit composition as type-id -> count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetMission {
    pub id: MissionId,
    pub mission_type: MissionType,
    pub coordinate_from: Coordinate,
    pub coordinate_to: Coordinate,
    pub user_id: PlayerId,
    pub time_departure: u64,
    pub time_arrival: u64,
    pub metal: u64,
    pub crystal: u64,
    pub deuterium: u64,
    pub units: UnitCollection,
    #[serde(with = "bool_as_int")]
    pub processed: bool,
    pub is_return_trip: bool,
    pub parent_mission_id: Option<MissionId>,
}

impl FleetMission {
    /// Carried cargo as a resource block.
    pub fn resources(&self) -> Resources {
        Resources::new(self.metal, self.crystal, self.deuterium, 0)
    }
}

/// Mission store with monotonically increasing ids.
///
/// `mark_processed` is a conditional transition keyed on the current
/// `processed` value; with a database backing this would be the row-level
/// compare-and-swap that makes resolution at-most-once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionTable {
    missions: FxHashMap<MissionId, FleetMission>,
    next_id: MissionId,
}

impl MissionTable {
    pub fn get(&self, id: MissionId) -> Option<&FleetMission> {
        self.missions.get(&id)
    }

    pub fn len(&self) -> usize {
        self.missions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.missions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FleetMission> {
        self.missions.values()
    }

    /// Insert a new record, assigning the next id.
    pub fn insert(&mut self, mut mission: FleetMission) -> MissionId {
        let id = self.next_id;
        self.next_id += 1;
        mission.id = id;
        self.missions.insert(id, mission);
        id
    }

    /// Unprocessed missions with `time_arrival <= now`, ordered by arrival
    /// time then id. Ids are allocated in dispatch order, so ties resolve
    /// deterministically.
    pub fn due(&self, now: u64) -> Vec<MissionId> {
        let mut due: Vec<(u64, MissionId)> = self
            .missions
            .values()
            .filter(|m| !m.processed && m.time_arrival <= now)
            .map(|m| (m.time_arrival, m.id))
            .collect();
        due.sort_unstable();
        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Transition `processed` false -> true. Fails if the mission is gone
    /// or a concurrent resolver already won the race.
    pub fn mark_processed(&mut self, id: MissionId) -> Result<(), ResolveError> {
        let mission = self
            .missions
            .get_mut(&id)
            .ok_or(ResolveError::MissionNotFound(id))?;
        if mission.processed {
            return Err(ResolveError::AlreadyProcessed(id));
        }
        mission.processed = true;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldState {
    /// Game clock in seconds.
    pub now: u64,
    pub rng_seed: u64,
    /// Current RNG state (must be deterministic for replay).
    pub rng_state: u64,
    pub players: FxHashMap<PlayerId, Player>,
    pub planets: FxHashMap<PlanetId, Planet>,
    /// Lazily created, never deleted. Few enough that linear lookup by
    /// coordinate is fine.
    pub debris_fields: Vec<DebrisField>,
    pub missions: MissionTable,
    pub next_planet_id: PlanetId,
}

impl WorldState {
    pub fn advance(&mut self, seconds: u64) {
        self.now += seconds;
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(&id)
    }

    pub fn planet_mut(&mut self, id: PlanetId) -> Option<&mut Planet> {
        self.planets.get_mut(&id)
    }

    pub fn planet_at(&self, coordinates: Coordinate) -> Option<&Planet> {
        self.planets.values().find(|p| p.coordinates == coordinates)
    }

    pub fn planet_at_mut(&mut self, coordinates: Coordinate) -> Option<&mut Planet> {
        self.planets
            .values_mut()
            .find(|p| p.coordinates == coordinates)
    }

    /// Create a planet at a free slot. Callers validate the slot first.
    pub fn create_planet(&mut self, owner: PlayerId, coordinates: Coordinate, name: &str) -> PlanetId {
        let id = self.next_planet_id;
        self.next_planet_id += 1;
        self.planets.insert(
            id,
            Planet {
                id,
                name: name.to_string(),
                owner,
                coordinates,
                resources: Resources::ZERO,
                units: UnitCollection::new(),
                buildings: BuildingLevels::default(),
            },
        );
        id
    }

    pub fn debris_at(&self, coordinates: Coordinate) -> Option<&DebrisField> {
        self.debris_fields
            .iter()
            .find(|d| d.coordinates == coordinates)
    }

    pub fn debris_at_mut(&mut self, coordinates: Coordinate) -> Option<&mut DebrisField> {
        self.debris_fields
            .iter_mut()
            .find(|d| d.coordinates == coordinates)
    }

    /// Load an existing field or create an empty one at the coordinates.
    pub fn load_or_create_debris(&mut self, coordinates: Coordinate) -> &mut DebrisField {
        let index = self
            .debris_fields
            .iter()
            .position(|d| d.coordinates == coordinates);
        match index {
            Some(i) => &mut self.debris_fields[i],
            None => {
                self.debris_fields.push(DebrisField::new(coordinates));
                self.debris_fields.last_mut().unwrap()
            }
        }
    }

    /// Draw a value in `0..bound` from the deterministic RNG stream.
    pub fn roll(&mut self, bound: u64) -> u64 {
        let mut rng = SmallRng::seed_from_u64(self.rng_state);
        let value = if bound == 0 { 0 } else { rng.gen_range(0..bound) };
        self.rng_state = rng.gen();
        value
    }

    /// Compute a deterministic checksum of the world state.
    ///
    /// Identical states produce identical checksums; used for replay
    /// validation and desync detection between server processes.
    pub fn checksum(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        self.now.hash(&mut hasher);
        self.rng_state.hash(&mut hasher);

        // Players (sorted by id)
        let mut player_ids: Vec<_> = self.players.keys().collect();
        player_ids.sort();
        for &id in player_ids {
            let p = &self.players[&id];
            id.hash(&mut hasher);
            p.name.hash(&mut hasher);
            p.tech.weapons.hash(&mut hasher);
            p.tech.shielding.hash(&mut hasher);
            p.tech.armor.hash(&mut hasher);
            p.tech.espionage.hash(&mut hasher);
        }

        // Planets (sorted by id)
        let mut planet_ids: Vec<_> = self.planets.keys().collect();
        planet_ids.sort();
        for &id in planet_ids {
            let p = &self.planets[&id];
            id.hash(&mut hasher);
            p.name.hash(&mut hasher);
            p.owner.hash(&mut hasher);
            p.coordinates.hash(&mut hasher);
            p.resources.metal.hash(&mut hasher);
            p.resources.crystal.hash(&mut hasher);
            p.resources.deuterium.hash(&mut hasher);
            p.resources.energy.hash(&mut hasher);
            for (unit, count) in p.units.iter() {
                unit.type_id().hash(&mut hasher);
                count.hash(&mut hasher);
            }
        }

        // Debris fields (sorted by coordinate)
        let mut fields: Vec<_> = self.debris_fields.iter().collect();
        fields.sort_by_key(|d| d.coordinates);
        for field in fields {
            field.coordinates.hash(&mut hasher);
            field.metal.hash(&mut hasher);
            field.crystal.hash(&mut hasher);
        }

        // Missions (sorted by id)
        let mut missions: Vec<_> = self.missions.iter().collect();
        missions.sort_by_key(|m| m.id);
        for m in missions {
            m.id.hash(&mut hasher);
            m.mission_type.type_id().hash(&mut hasher);
            m.coordinate_from.hash(&mut hasher);
            m.coordinate_to.hash(&mut hasher);
            m.user_id.hash(&mut hasher);
            m.time_departure.hash(&mut hasher);
            m.time_arrival.hash(&mut hasher);
            m.metal.hash(&mut hasher);
            m.crystal.hash(&mut hasher);
            m.deuterium.hash(&mut hasher);
            for (unit, count) in m.units.iter() {
                unit.type_id().hash(&mut hasher);
                count.hash(&mut hasher);
            }
            m.processed.hash(&mut hasher);
            m.is_return_trip.hash(&mut hasher);
            m.parent_mission_id.hash(&mut hasher);
        }

        hasher.finish()
    }
}
