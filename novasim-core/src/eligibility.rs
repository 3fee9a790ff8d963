//! Mission eligibility policy.
//!
//! Pure predicate over supplied snapshots: can this fleet fly this mission
//! type from here to there? No side effects, no resource-sufficiency
//! checks (those are the scheduler's job at dispatch time). Callers must
//! re-validate against live state at dispatch, since planets can change
//! between display and submission.

use novadata::UnitId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinates::Coordinate;
use crate::state::{MissionType, Planet, WorldState};
use crate::units::UnitCollection;

/// Why a mission is not possible. Stable codes, presentation maps them to
/// player-facing text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    #[error("fleet is empty")]
    EmptyFleet,
    #[error("defense structures cannot fly")]
    DefensesCannotFly,
    #[error("mission requires an existing target planet")]
    TargetRequired,
    #[error("target planet belongs to another player")]
    TargetNotOwnPlanet,
    #[error("target planet belongs to you")]
    TargetIsOwnPlanet,
    #[error("fleet has no combat-capable ships")]
    NoCombatShips,
    #[error("mission requires at least one espionage probe")]
    NoEspionageProbe,
    #[error("mission requires at least one colony ship")]
    NoColonyShip,
    #[error("mission requires at least one recycler")]
    NoRecycler,
    #[error("destination is not a colonizable position")]
    NotColonizable,
    #[error("destination position is already occupied")]
    PositionOccupied,
    #[error("no debris field at destination")]
    NoDebrisField,
    #[error("expeditions fly to the deep-space slot")]
    NotDeepSpace,
    #[error("destination is out of range for this mission")]
    OutOfRange,
}

/// Ephemeral feasibility verdict, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionPossibleStatus {
    pub possible: bool,
    pub reason: Option<IneligibleReason>,
}

impl MissionPossibleStatus {
    pub fn possible() -> Self {
        Self {
            possible: true,
            reason: None,
        }
    }

    pub fn impossible(reason: IneligibleReason) -> Self {
        Self {
            possible: false,
            reason: Some(reason),
        }
    }
}

/// Ordered short-circuit checks: fleet composition class first, then
/// per-type destination validity.
pub fn evaluate_mission(
    state: &WorldState,
    origin: &Planet,
    destination: Coordinate,
    mission_type: MissionType,
    units: &UnitCollection,
) -> MissionPossibleStatus {
    if units.is_empty() {
        return MissionPossibleStatus::impossible(IneligibleReason::EmptyFleet);
    }
    if !units.is_flyable() {
        return MissionPossibleStatus::impossible(IneligibleReason::DefensesCannotFly);
    }

    let target = state.planet_at(destination);

    match mission_type {
        MissionType::Deployment => match target {
            None => MissionPossibleStatus::impossible(IneligibleReason::TargetRequired),
            Some(planet) if planet.owner != origin.owner => {
                MissionPossibleStatus::impossible(IneligibleReason::TargetNotOwnPlanet)
            }
            Some(_) => MissionPossibleStatus::possible(),
        },
        MissionType::Transport => match target {
            None => MissionPossibleStatus::impossible(IneligibleReason::TargetRequired),
            Some(_) => MissionPossibleStatus::possible(),
        },
        MissionType::Attack => match target {
            None => MissionPossibleStatus::impossible(IneligibleReason::TargetRequired),
            Some(planet) if planet.owner == origin.owner => {
                MissionPossibleStatus::impossible(IneligibleReason::TargetIsOwnPlanet)
            }
            Some(_) if !units.has_combat_ships() => {
                MissionPossibleStatus::impossible(IneligibleReason::NoCombatShips)
            }
            Some(_) => MissionPossibleStatus::possible(),
        },
        MissionType::Espionage => match target {
            None => MissionPossibleStatus::impossible(IneligibleReason::TargetRequired),
            Some(planet) if planet.owner == origin.owner => {
                MissionPossibleStatus::impossible(IneligibleReason::TargetIsOwnPlanet)
            }
            Some(_) if units.count(UnitId::EspionageProbe) == 0 => {
                MissionPossibleStatus::impossible(IneligibleReason::NoEspionageProbe)
            }
            Some(_) => MissionPossibleStatus::possible(),
        },
        MissionType::Colonization => {
            if !destination.is_planet_slot() {
                return MissionPossibleStatus::impossible(IneligibleReason::NotColonizable);
            }
            if target.is_some() {
                return MissionPossibleStatus::impossible(IneligibleReason::PositionOccupied);
            }
            if units.count(UnitId::ColonyShip) == 0 {
                return MissionPossibleStatus::impossible(IneligibleReason::NoColonyShip);
            }
            MissionPossibleStatus::possible()
        }
        MissionType::Recycling => {
            if units.count(UnitId::Recycler) == 0 {
                return MissionPossibleStatus::impossible(IneligibleReason::NoRecycler);
            }
            match state.debris_at(destination) {
                Some(field) if !field.is_empty() => MissionPossibleStatus::possible(),
                _ => MissionPossibleStatus::impossible(IneligibleReason::NoDebrisField),
            }
        }
        MissionType::Expedition => {
            if !destination.is_expedition_slot() {
                return MissionPossibleStatus::impossible(IneligibleReason::NotDeepSpace);
            }
            // Expeditions stay within the origin galaxy.
            if destination.galaxy != origin.coordinates.galaxy {
                return MissionPossibleStatus::impossible(IneligibleReason::OutOfRange);
            }
            MissionPossibleStatus::possible()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Resources;
    use crate::testing::WorldStateBuilder;

    fn two_player_world() -> WorldState {
        WorldStateBuilder::new()
            .with_player(1, "Kael")
            .with_player(2, "Mira")
            .with_planet(1, 1, Coordinate::new(1, 205, 12))
            .with_planet(2, 1, Coordinate::new(1, 205, 8))
            .with_planet(3, 2, Coordinate::new(1, 206, 4))
            .build()
    }

    fn cargo_fleet() -> UnitCollection {
        UnitCollection::from_pairs(&[(UnitId::SmallCargo, 5)])
    }

    #[test]
    fn test_empty_fleet_rejected_first() {
        let state = two_player_world();
        let origin = state.planet(1).unwrap();
        let status = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 205, 8),
            MissionType::Deployment,
            &UnitCollection::new(),
        );
        assert_eq!(status.reason, Some(IneligibleReason::EmptyFleet));
    }

    #[test]
    fn test_defenses_cannot_fly() {
        let state = two_player_world();
        let origin = state.planet(1).unwrap();
        let fleet = UnitCollection::from_pairs(&[(UnitId::SmallCargo, 1), (UnitId::LightLaser, 1)]);
        let status = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 205, 8),
            MissionType::Transport,
            &fleet,
        );
        assert_eq!(status.reason, Some(IneligibleReason::DefensesCannotFly));
    }

    #[test]
    fn test_deployment_requires_own_target() {
        let state = two_player_world();
        let origin = state.planet(1).unwrap();

        let own = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 205, 8),
            MissionType::Deployment,
            &cargo_fleet(),
        );
        assert!(own.possible);

        let foreign = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 206, 4),
            MissionType::Deployment,
            &cargo_fleet(),
        );
        assert_eq!(foreign.reason, Some(IneligibleReason::TargetNotOwnPlanet));

        let empty = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 1, 1),
            MissionType::Deployment,
            &cargo_fleet(),
        );
        assert_eq!(empty.reason, Some(IneligibleReason::TargetRequired));
    }

    #[test]
    fn test_attack_rejects_own_planet_and_unarmed_fleet() {
        let state = two_player_world();
        let origin = state.planet(1).unwrap();

        let own = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 205, 8),
            MissionType::Attack,
            &cargo_fleet(),
        );
        assert_eq!(own.reason, Some(IneligibleReason::TargetIsOwnPlanet));

        let probes = UnitCollection::from_pairs(&[(UnitId::EspionageProbe, 3)]);
        let unarmed = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 206, 4),
            MissionType::Attack,
            &probes,
        );
        assert_eq!(unarmed.reason, Some(IneligibleReason::NoCombatShips));

        let fighters = UnitCollection::from_pairs(&[(UnitId::LightFighter, 10)]);
        let armed = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 206, 4),
            MissionType::Attack,
            &fighters,
        );
        assert!(armed.possible);
    }

    #[test]
    fn test_espionage_needs_probe() {
        let state = two_player_world();
        let origin = state.planet(1).unwrap();
        let status = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 206, 4),
            MissionType::Espionage,
            &cargo_fleet(),
        );
        assert_eq!(status.reason, Some(IneligibleReason::NoEspionageProbe));
    }

    #[test]
    fn test_colonization_checks_slot_and_ship() {
        let state = two_player_world();
        let origin = state.planet(1).unwrap();
        let colony = UnitCollection::from_pairs(&[(UnitId::ColonyShip, 1)]);

        let occupied = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 206, 4),
            MissionType::Colonization,
            &colony,
        );
        assert_eq!(occupied.reason, Some(IneligibleReason::PositionOccupied));

        let deep_space = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 206, 16),
            MissionType::Colonization,
            &colony,
        );
        assert_eq!(deep_space.reason, Some(IneligibleReason::NotColonizable));

        let no_ship = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 206, 9),
            MissionType::Colonization,
            &cargo_fleet(),
        );
        assert_eq!(no_ship.reason, Some(IneligibleReason::NoColonyShip));

        let ok = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 206, 9),
            MissionType::Colonization,
            &colony,
        );
        assert!(ok.possible);
    }

    #[test]
    fn test_recycling_needs_field_and_recycler() {
        let mut state = two_player_world();
        let debris_coord = Coordinate::new(1, 206, 4);
        let recyclers = UnitCollection::from_pairs(&[(UnitId::Recycler, 2)]);

        let origin = state.planet(1).unwrap().clone();
        let no_field =
            evaluate_mission(&state, &origin, debris_coord, MissionType::Recycling, &recyclers);
        assert_eq!(no_field.reason, Some(IneligibleReason::NoDebrisField));

        state
            .load_or_create_debris(debris_coord)
            .append(&Resources::new(5_000, 2_000, 0, 0));
        let ok =
            evaluate_mission(&state, &origin, debris_coord, MissionType::Recycling, &recyclers);
        assert!(ok.possible);

        let no_recycler =
            evaluate_mission(&state, &origin, debris_coord, MissionType::Recycling, &cargo_fleet());
        assert_eq!(no_recycler.reason, Some(IneligibleReason::NoRecycler));
    }

    #[test]
    fn test_expedition_requires_deep_space_in_galaxy() {
        let state = two_player_world();
        let origin = state.planet(1).unwrap();
        let fleet = UnitCollection::from_pairs(&[(UnitId::LargeCargo, 3)]);

        let ok = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 300, 16),
            MissionType::Expedition,
            &fleet,
        );
        assert!(ok.possible);

        let not_deep = evaluate_mission(
            &state,
            origin,
            Coordinate::new(1, 300, 9),
            MissionType::Expedition,
            &fleet,
        );
        assert_eq!(not_deep.reason, Some(IneligibleReason::NotDeepSpace));

        let far = evaluate_mission(
            &state,
            origin,
            Coordinate::new(2, 300, 16),
            MissionType::Expedition,
            &fleet,
        );
        assert_eq!(far.reason, Some(IneligibleReason::OutOfRange));
    }
}
