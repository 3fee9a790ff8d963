//! Attack: battle against the destination's docked ships and defenses,
//! plunder with the survivors, leave wreckage in orbit.

use crate::config::UniverseConfig;
use crate::notify::{MessageArgs, MessageCategory, Notifier};
use crate::resources::Resources;
use crate::state::{FleetMission, TechLevels, WorldState};
use crate::systems::combat::{debris_value, resolve_battle};
use crate::systems::ReturnCargo;

pub(crate) fn process_arrival(
    state: &mut WorldState,
    config: &UniverseConfig,
    notifier: &mut dyn Notifier,
    mission: &FleetMission,
) -> Option<ReturnCargo> {
    let Some(target) = state.planet_at(mission.coordinate_to) else {
        log::error!(
            "attack mission {}: no planet at {}, effects dropped",
            mission.id,
            mission.coordinate_to
        );
        return None;
    };
    let defender_id = target.owner;
    let defender_units = target.units.clone();

    let attacker_tech = tech_of(state, mission.user_id);
    let defender_tech = tech_of(state, defender_id);

    let outcome = resolve_battle(
        &mission.units,
        &attacker_tech,
        &defender_units,
        &defender_tech,
    );

    // Losses shrink the fleet's holds; cargo that no longer fits went down
    // with the ships that carried it.
    let capacity = outcome.attacker_survivors.cargo_capacity();
    let carried = mission.resources().capped_at(capacity);

    // Plunder with whatever hold space the survivors still have free.
    let mut loot = Resources::ZERO;
    {
        let Some(target) = state.planet_at_mut(mission.coordinate_to) else {
            return None;
        };
        target.units = outcome.defender_survivors.clone();
        if outcome.attacker_won() {
            let free_capacity = capacity.saturating_sub(carried.sum());
            loot = target.resources.capped_at(free_capacity);
            if let Err(stock) = target.subtract_resources(&loot) {
                // Cannot happen: loot is capped at the stored amount.
                log::error!(
                    "attack mission {}: loot {} exceeds stock {}",
                    mission.id,
                    loot,
                    stock
                );
                loot = Resources::ZERO;
            }
        }
    }

    // Destroyed ships of both sides feed the debris field. No losses, no
    // field: an undefended raid leaves a clean orbit.
    let mut debris = debris_value(&outcome.attacker_losses, config.debris_percent);
    debris += debris_value(&outcome.defender_losses, config.debris_percent);
    if !debris.is_empty() {
        state
            .load_or_create_debris(mission.coordinate_to)
            .append(&debris);
    }

    let report = MessageArgs::Battle {
        location: mission.coordinate_to,
        attacker: mission.user_id,
        defender: defender_id,
        rounds: outcome.rounds,
        attacker_losses: outcome.attacker_losses.clone(),
        defender_losses: outcome.defender_losses.clone(),
        loot,
        debris,
    };
    notifier.notify(mission.user_id, MessageCategory::BattleReport, report.clone());
    notifier.notify(defender_id, MessageCategory::BattleReport, report);

    if outcome.attacker_survivors.is_empty() {
        // Fleet annihilated; nothing comes home.
        return None;
    }
    Some(ReturnCargo {
        units: outcome.attacker_survivors,
        resources: carried + loot,
    })
}

fn tech_of(state: &WorldState, player: u32) -> TechLevels {
    state
        .player(player)
        .map(|p| p.tech)
        .unwrap_or_default()
}
