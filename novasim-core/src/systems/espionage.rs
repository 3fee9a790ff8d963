//! Espionage: photograph the target planet, unless counter-espionage
//! catches the probes first.

use novadata::UnitId;

use crate::config::UniverseConfig;
use crate::notify::{MessageArgs, MessageCategory, Notifier};
use crate::state::{FleetMission, WorldState};
use crate::systems::ReturnCargo;

/// Chance (percent) that the defender notices the probe sweep. Grows with
/// the defending force, shrinks with the spy's espionage tech lead.
fn detection_chance(defender_units: u64, attacker_tech: u8, defender_tech: u8) -> u64 {
    let base = defender_units.saturating_mul(2) + 10;
    let lead = i64::from(attacker_tech) - i64::from(defender_tech);
    base.saturating_add_signed(-5 * lead).min(100)
}

pub(crate) fn process_arrival(
    state: &mut WorldState,
    _config: &UniverseConfig,
    notifier: &mut dyn Notifier,
    mission: &FleetMission,
) -> Option<ReturnCargo> {
    let Some(target) = state.planet_at(mission.coordinate_to) else {
        log::error!(
            "espionage mission {}: no planet at {}, effects dropped",
            mission.id,
            mission.coordinate_to
        );
        return None;
    };

    let defender_id = target.owner;
    let snapshot_resources = target.resources;
    let snapshot_units = target.units.clone();
    let snapshot_buildings = target.buildings;
    let defender_count = target.units.total();

    let attacker_tech = state.player(mission.user_id).map(|p| p.tech.espionage);
    let defender_tech = state.player(defender_id).map(|p| p.tech.espionage);
    let chance = detection_chance(
        defender_count,
        attacker_tech.unwrap_or(0),
        defender_tech.unwrap_or(0),
    );

    if state.roll(100) < chance {
        // Caught: probes are shot down, the defender gets the alert.
        log::info!(
            "espionage mission {} detected at {} (chance {}%)",
            mission.id,
            mission.coordinate_to,
            chance
        );
        notifier.notify(
            defender_id,
            MessageCategory::EspionageDetected,
            MessageArgs::EspionageDetected {
                target: mission.coordinate_to,
                probes: mission.units.count(UnitId::EspionageProbe),
            },
        );
        return None;
    }

    notifier.notify(
        mission.user_id,
        MessageCategory::EspionageReport,
        MessageArgs::EspionageReport {
            target: mission.coordinate_to,
            resources: snapshot_resources,
            units: snapshot_units,
            buildings: snapshot_buildings,
        },
    );

    Some(ReturnCargo {
        units: mission.units.clone(),
        resources: mission.resources(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_chance_bounds() {
        assert_eq!(detection_chance(0, 0, 0), 10);
        // Tech lead pushes the chance down to zero.
        assert_eq!(detection_chance(0, 10, 0), 0);
        // A big garrison saturates at 100.
        assert_eq!(detection_chance(1_000, 0, 0), 100);
        // Defender tech raises it.
        assert_eq!(detection_chance(10, 0, 4), 50);
    }
}
