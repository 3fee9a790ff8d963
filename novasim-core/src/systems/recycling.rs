//! Recycling: scoop a debris field into the fleet's holds.
//!
//! The field may have been harvested by someone else in the meantime;
//! collecting nothing is not an error. Collected amounts are taken
//! proportionally and the field is zeroed but never deleted.

use crate::config::UniverseConfig;
use crate::notify::{MessageArgs, MessageCategory, Notifier};
use crate::resources::Resources;
use crate::state::{FleetMission, WorldState};
use crate::systems::ReturnCargo;

pub(crate) fn process_arrival(
    state: &mut WorldState,
    _config: &UniverseConfig,
    notifier: &mut dyn Notifier,
    mission: &FleetMission,
) -> Option<ReturnCargo> {
    let free_capacity = mission
        .units
        .cargo_capacity()
        .saturating_sub(mission.resources().sum());

    let (collected, remaining) = match state.debris_at_mut(mission.coordinate_to) {
        Some(field) => {
            let collected = field.collect_up_to(free_capacity);
            (collected, field.resources())
        }
        None => (Resources::ZERO, Resources::ZERO),
    };

    log::info!(
        "recycling mission {} collected {} at {}",
        mission.id,
        collected,
        mission.coordinate_to
    );
    notifier.notify(
        mission.user_id,
        MessageCategory::DebrisHarvested,
        MessageArgs::DebrisHarvested {
            coordinates: mission.coordinate_to,
            collected,
            remaining,
        },
    );

    Some(ReturnCargo {
        units: mission.units.clone(),
        resources: mission.resources() + collected,
    })
}
