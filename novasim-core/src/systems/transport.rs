//! Transport: deliver cargo to any planet, then fly home empty.
//! Goods-back flows are a separate dispatch, not part of the return leg.

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
            "transport mission {}: no planet at {}, effects dropped",
            mission.id,
            mission.coordinate_to
        );
        return None;
    };

    target.add_resources(mission.resources());
    let owner = target.owner;

    notifier.notify(
        owner,
        MessageCategory::TransportArrived,
        MessageArgs::Delivery {
            from: mission.coordinate_from,
            to: mission.coordinate_to,
            resources: mission.resources(),
        },
    );

    Some(ReturnCargo::units_only(mission.units.clone()))
}
