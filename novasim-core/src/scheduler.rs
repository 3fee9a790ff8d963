//! Mission scheduler: travel math and fleet dispatch.
//!
//! `dispatch` is all-or-nothing: every check runs before the first
//! mutation, so a rejected dispatch leaves the world untouched.

use tracing::instrument;

use novadata::defines::fleet;

use crate::config::UniverseConfig;
use crate::coordinates::Coordinate;
use crate::eligibility::evaluate_mission;
use crate::errors::DispatchError;
use crate::resources::Resources;
use crate::state::{MissionId, MissionType, PlanetId, PlayerId, WorldState};
use crate::state::FleetMission;
use crate::units::UnitCollection;

/// Travel duration in seconds.
///
/// `round((35000 / p * sqrt(distance * 10 / slowest) + 10) / fleet_speed)`,
/// reference formula, never below one second.
pub fn travel_duration(
    distance: u64,
    slowest_speed: u32,
    speed_percent: u8,
    fleet_speed: u32,
) -> u64 {
    let raw = fleet::TRAVEL_FACTOR / f64::from(speed_percent)
        * (distance as f64 * 10.0 / f64::from(slowest_speed)).sqrt()
        + fleet::TRAVEL_BASE_SECONDS;
    let seconds = (raw / f64::from(fleet_speed)).round() as u64;
    seconds.max(1)
}

/// Deuterium burned over the trip: per unit type,
/// `base * count * distance / 35000 * (1 + p/100)^2`, summed and rounded
/// up. A non-empty fleet always burns at least one.
pub fn fuel_consumption(units: &UnitCollection, distance: u64, speed_percent: u8) -> u64 {
    if units.is_empty() {
        return 0;
    }
    let speed_factor = 1.0 + f64::from(speed_percent) / 100.0;
    let total: f64 = units
        .iter()
        .map(|(unit, count)| {
            f64::from(unit.stats().fuel) * count as f64 * distance as f64 / fleet::TRAVEL_FACTOR
        })
        .sum::<f64>()
        * speed_factor
        * speed_factor;
    (total.ceil() as u64).max(1)
}

/// Validate and schedule a fleet mission.
///
/// On success the origin planet has been debited of units, cargo and fuel,
/// and an unprocessed [`FleetMission`] with `arrival = now + duration` is
/// in the table. On error nothing has changed.
#[instrument(skip_all, fields(player = player, mission_type = %mission_type))]
pub fn dispatch(
    state: &mut WorldState,
    config: &UniverseConfig,
    player: PlayerId,
    origin: PlanetId,
    destination: Coordinate,
    units: &UnitCollection,
    cargo: Resources,
    mission_type: MissionType,
    speed_percent: u8,
) -> Result<MissionId, DispatchError> {
    // Speed settings come in ten-percent steps.
    if !(fleet::MIN_SPEED_PERCENT..=fleet::MAX_SPEED_PERCENT).contains(&speed_percent)
        || speed_percent % 10 != 0
    {
        return Err(DispatchError::InvalidSpeed(speed_percent));
    }

    let origin_planet = state
        .planet(origin)
        .ok_or(DispatchError::OriginNotFound(origin))?;
    if origin_planet.owner != player {
        return Err(DispatchError::NotPlanetOwner {
            planet: origin_planet.coordinates,
            player,
        });
    }

    let status = evaluate_mission(state, origin_planet, destination, mission_type, units);
    if let Some(reason) = status.reason {
        return Err(DispatchError::Ineligible(reason));
    }

    // Docked unit availability, checked before any mutation.
    for (unit, requested) in units.iter() {
        let available = origin_planet.units.count(unit);
        if available < requested {
            return Err(DispatchError::InsufficientUnits {
                unit,
                requested,
                available,
            });
        }
    }

    if units.cargo_capacity() < cargo.sum() {
        return Err(DispatchError::InvalidFleetComposition(format!(
            "cargo {} exceeds fleet capacity {}",
            cargo.sum(),
            units.cargo_capacity()
        )));
    }

    let distance = origin_planet.coordinates.distance_to(&destination);
    // Eligibility guarantees a flyable, non-empty fleet.
    let slowest = units
        .slowest_speed()
        .ok_or_else(|| DispatchError::InvalidFleetComposition("fleet cannot fly".into()))?;
    let duration = travel_duration(distance, slowest, speed_percent, config.fleet_speed);
    let fuel = fuel_consumption(units, distance, speed_percent);

    let required = cargo + Resources::new(0, 0, fuel, 0);
    if !origin_planet.resources.contains(&required) {
        return Err(DispatchError::InsufficientResources {
            required,
            available: origin_planet.resources,
        });
    }

    // All checks passed: debit origin and persist the mission record.
    let origin_coordinates = origin_planet.coordinates;
    let now = state.now;
    let planet = state
        .planet_mut(origin)
        .ok_or(DispatchError::OriginNotFound(origin))?;
    planet.subtract_units(units)?;
    planet
        .subtract_resources(&required)
        .map_err(|available| DispatchError::InsufficientResources {
            required,
            available,
        })?;

    let id = state.missions.insert(FleetMission {
        id: 0,
        mission_type,
        coordinate_from: origin_coordinates,
        coordinate_to: destination,
        user_id: player,
        time_departure: now,
        time_arrival: now + duration,
        metal: cargo.metal,
        crystal: cargo.crystal,
        deuterium: cargo.deuterium,
        units: units.clone(),
        processed: false,
        is_return_trip: false,
        parent_mission_id: None,
    });

    log::info!(
        "player {} dispatched {} mission {} from {} to {}, arrival in {}s",
        player,
        mission_type,
        id,
        origin_coordinates,
        destination,
        duration
    );

    Ok(id)
}

/// Unprocessed missions whose arrival time has passed, in resolution
/// order (arrival ascending, dispatch order on ties).
pub fn due_missions(state: &WorldState, now: u64) -> Vec<MissionId> {
    state.missions.due(now)
}
