//! Colonization: found a new planet on an empty position.
//!
//! The slot is re-validated at resolution time; someone else may have
//! settled it while the fleet was in flight. On failure the colony ship
//! is not consumed and the whole fleet turns around.

use novadata::UnitId;

use crate::config::UniverseConfig;
use crate::notify::{MessageArgs, MessageCategory, Notifier};
use crate::state::{FleetMission, WorldState};
use crate::systems::ReturnCargo;

pub(crate) fn process_arrival(
    state: &mut WorldState,
    _config: &UniverseConfig,
    notifier: &mut dyn Notifier,
    mission: &FleetMission,
) -> Option<ReturnCargo> {
    let slot_taken =
        !mission.coordinate_to.is_planet_slot() || state.planet_at(mission.coordinate_to).is_some();
    if slot_taken {
        log::info!(
            "colonization mission {}: position {} no longer free, fleet returns",
            mission.id,
            mission.coordinate_to
        );
        notifier.notify(
            mission.user_id,
            MessageCategory::ColonyFailed,
            MessageArgs::ColonyFailed {
                coordinates: mission.coordinate_to,
            },
        );
        return Some(ReturnCargo {
            units: mission.units.clone(),
            resources: mission.resources(),
        });
    }

    // The colony ship becomes the settlement; escorts and cargo stay.
    let mut settlers = mission.units.clone();
    settlers.remove(UnitId::ColonyShip, 1);

    let planet_id = state.create_planet(mission.user_id, mission.coordinate_to, "Colony");
    if let Some(colony) = state.planet_mut(planet_id) {
        colony.add_resources(mission.resources());
        colony.add_units(&settlers);
    }

    log::info!(
        "player {} colonized {} (mission {})",
        mission.user_id,
        mission.coordinate_to,
        mission.id
    );
    notifier.notify(
        mission.user_id,
        MessageCategory::ColonyEstablished,
        MessageArgs::ColonyEstablished {
            coordinates: mission.coordinate_to,
        },
    );

    None
}
