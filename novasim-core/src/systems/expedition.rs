//! Expedition: roll on the deep-space outcome table.
//!
//! Outcomes draw from the world RNG stream, so a fixed seed replays the
//! same expedition. Ambush losses leave no debris; there is no orbit out
//! there to collect from.

use novadata::UnitId;

use crate::config::UniverseConfig;
use crate::notify::{ExpeditionOutcome, MessageArgs, MessageCategory, Notifier};
use crate::resources::Resources;
use crate::state::{FleetMission, WorldState};
use crate::systems::ReturnCargo;
use crate::units::UnitCollection;

pub(crate) fn process_arrival(
    state: &mut WorldState,
    config: &UniverseConfig,
    notifier: &mut dyn Notifier,
    mission: &FleetMission,
) -> Option<ReturnCargo> {
    let weights = config.expedition;
    let outcome = match state.roll(u64::from(weights.total().max(1))) {
        r if r < u64::from(weights.nothing) => ExpeditionOutcome::Nothing,
        r if r < u64::from(weights.nothing + weights.resources) => ExpeditionOutcome::Resources,
        r if r < u64::from(weights.nothing + weights.resources + weights.ships) => {
            ExpeditionOutcome::Ships
        }
        _ => ExpeditionOutcome::Ambush,
    };

    let mut units = mission.units.clone();
    let mut gained_resources = Resources::ZERO;
    let mut gained_units = UnitCollection::new();
    let mut lost_units = UnitCollection::new();

    match outcome {
        ExpeditionOutcome::Nothing => {}
        ExpeditionOutcome::Resources => {
            // A find worth 10..=50% of the free hold space.
            let free = units.cargo_capacity().saturating_sub(mission.resources().sum());
            let share = 10 + state.roll(41);
            let amount = free * share / 100;
            gained_resources =
                Resources::new(amount / 2, amount * 3 / 10, amount / 5, 0);
        }
        ExpeditionOutcome::Ships => {
            // Derelict hulls, crewed on the spot. Scales with fleet size.
            let found = (units.total() / 5).max(1);
            gained_units.add(UnitId::LightFighter, found);
            units.merge(&gained_units);
        }
        ExpeditionOutcome::Ambush => {
            let share = 10 + state.roll(41);
            let casualties: Vec<_> = units
                .iter()
                .map(|(unit, count)| (unit, count * share / 100))
                .collect();
            for (unit, lost) in casualties {
                if lost > 0 {
                    units.remove(unit, lost);
                    lost_units.add(unit, lost);
                }
            }
        }
    }

    log::info!(
        "expedition mission {} outcome {:?}: +{} resources, +{} units, -{} units",
        mission.id,
        outcome,
        gained_resources.sum(),
        gained_units.total(),
        lost_units.total()
    );
    notifier.notify(
        mission.user_id,
        MessageCategory::ExpeditionReport,
        MessageArgs::Expedition {
            outcome,
            gained_resources,
            gained_units,
            lost_units,
        },
    );

    if units.is_empty() {
        return None;
    }
    Some(ReturnCargo {
        units,
        resources: mission.resources() + gained_resources,
    })
}
