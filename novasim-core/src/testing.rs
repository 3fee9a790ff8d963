//! Test fixtures: a chainable builder for assembling small worlds.

use crate::coordinates::Coordinate;
use crate::resources::Resources;
use crate::state::{Planet, PlanetId, Player, PlayerId, TechLevels, WorldState};
use novadata::UnitId;

pub struct WorldStateBuilder {
    state: WorldState,
}

impl WorldStateBuilder {
    pub fn new() -> Self {
        Self {
            state: WorldState {
                next_planet_id: 1,
                ..WorldState::default()
            },
        }
    }

    pub fn now(mut self, now: u64) -> Self {
        self.state.now = now;
        self
    }

    /// Seed both the replay seed and the live RNG state.
    pub fn seed(mut self, seed: u64) -> Self {
        self.state.rng_seed = seed;
        self.state.rng_state = seed;
        self
    }

    pub fn with_player(mut self, id: PlayerId, name: &str) -> Self {
        self.state.players.insert(
            id,
            Player {
                id,
                name: name.to_string(),
                tech: TechLevels::default(),
            },
        );
        self
    }

    pub fn with_player_tech(mut self, id: PlayerId, tech: TechLevels) -> Self {
        if let Some(player) = self.state.players.get_mut(&id) {
            player.tech = tech;
        }
        self
    }

    pub fn with_planet(mut self, id: PlanetId, owner: PlayerId, coordinates: Coordinate) -> Self {
        self.state.planets.insert(
            id,
            Planet {
                id,
                name: format!("Planet {}", id),
                owner,
                coordinates,
                resources: Resources::ZERO,
                units: Default::default(),
                buildings: Default::default(),
            },
        );
        self.state.next_planet_id = self.state.next_planet_id.max(id + 1);
        self
    }

    pub fn with_planet_resources(mut self, id: PlanetId, resources: Resources) -> Self {
        if let Some(planet) = self.state.planets.get_mut(&id) {
            planet.resources = resources;
        }
        self
    }

    pub fn with_planet_units(mut self, id: PlanetId, unit: UnitId, count: u64) -> Self {
        if let Some(planet) = self.state.planets.get_mut(&id) {
            planet.units.add(unit, count);
        }
        self
    }

    pub fn build(self) -> WorldState {
        self.state
    }
}

impl Default for WorldStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let state = WorldStateBuilder::default()
            .seed(42)
            .with_player(1, "Kael")
            .with_planet(1, 1, Coordinate::new(1, 1, 1))
            .with_planet(7, 1, Coordinate::new(1, 1, 2))
            .with_planet_resources(7, Resources::new(100, 0, 0, 0))
            .with_planet_units(7, UnitId::SmallCargo, 3)
            .build();

        assert_eq!(state.rng_seed, 42);
        assert_eq!(state.player(1).unwrap().name, "Kael");
        assert_eq!(state.planet(7).unwrap().resources.metal, 100);
        assert_eq!(state.planet(7).unwrap().units.count(UnitId::SmallCargo), 3);
        // Fresh planets never collide with fixture ids.
        assert_eq!(state.next_planet_id, 8);
    }
}
