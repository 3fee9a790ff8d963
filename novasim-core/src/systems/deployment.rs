//! Deployment: relocate a fleet and its cargo to another planet of the
//! same player. One-way; the fleet docks at the destination.

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
    let Some(target) = state.planet_at_mut(mission.coordinate_to) else {
        log::error!(
            "deployment mission {}: no planet at {}, effects dropped",
            mission.id,
            mission.coordinate_to
        );
        return None;
    };

    target.add_resources(mission.resources());
    target.add_units(&mission.units);
    let owner = target.owner;

    notifier.notify(
        owner,
        MessageCategory::FleetDeployment,
        MessageArgs::Delivery {
            from: mission.coordinate_from,
            to: mission.coordinate_to,
            resources: mission.resources(),
        },
    );

    None
}
