//! Battle resolution for attack missions.
//!
//! Round-based proportional attrition: each round both sides deal their
//! total weapon power against the other side's total hull pool, destroying
//! a matching fraction of every unit type. Runs to annihilation, stalemate
//! or the round cap, whichever comes first. Fully deterministic.

use novadata::defines::combat;

use crate::resources::Resources;
use crate::state::TechLevels;
use crate::units::UnitCollection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleOutcome {
    pub attacker_survivors: UnitCollection,
    pub defender_survivors: UnitCollection,
    pub attacker_losses: UnitCollection,
    pub defender_losses: UnitCollection,
    pub rounds: u32,
}

impl BattleOutcome {
    /// Attacker wins only by wiping the defender out while keeping ships.
    pub fn attacker_won(&self) -> bool {
        self.defender_survivors.is_empty() && !self.attacker_survivors.is_empty()
    }
}

fn tech_scaled(base: u64, level: u8) -> u64 {
    base * (100 + combat::TECH_BONUS_PERCENT * u64::from(level)) / 100
}

/// Total weapon power per round.
fn side_power(units: &UnitCollection, tech: &TechLevels) -> u128 {
    units
        .iter()
        .map(|(unit, count)| tech_scaled(unit.stats().weapon, tech.weapons) as u128 * count as u128)
        .sum()
}

/// Total hull-plus-shield pool.
fn side_hull(units: &UnitCollection, tech: &TechLevels) -> u128 {
    units
        .iter()
        .map(|(unit, count)| {
            let stats = unit.stats();
            let per_unit = tech_scaled(stats.hull(), tech.armor)
                + tech_scaled(stats.shield, tech.shielding);
            per_unit as u128 * count as u128
        })
        .sum()
}

/// Destroy `power / hull_pool` of every unit type, floored per type.
/// Returns what was destroyed.
fn apply_damage(units: &mut UnitCollection, incoming: u128, hull_pool: u128) -> UnitCollection {
    let mut destroyed = UnitCollection::new();
    if hull_pool == 0 || incoming == 0 {
        return destroyed;
    }
    let casualties: Vec<_> = units
        .iter()
        .map(|(unit, count)| {
            let lost = ((count as u128 * incoming / hull_pool) as u64).min(count);
            (unit, lost)
        })
        .collect();
    for (unit, lost) in casualties {
        if lost > 0 {
            units.remove(unit, lost);
            destroyed.add(unit, lost);
        }
    }
    destroyed
}

pub fn resolve_battle(
    attacker: &UnitCollection,
    attacker_tech: &TechLevels,
    defender: &UnitCollection,
    defender_tech: &TechLevels,
) -> BattleOutcome {
    let mut att = attacker.clone();
    let mut def = defender.clone();
    let mut att_losses = UnitCollection::new();
    let mut def_losses = UnitCollection::new();
    let mut rounds = 0;

    while rounds < combat::MAX_ROUNDS && !att.is_empty() && !def.is_empty() {
        // Both sides fire simultaneously from round-start strength.
        let att_power = side_power(&att, attacker_tech);
        let def_power = side_power(&def, defender_tech);
        let att_hull = side_hull(&att, attacker_tech);
        let def_hull = side_hull(&def, defender_tech);

        let lost_def = apply_damage(&mut def, att_power, def_hull);
        let lost_att = apply_damage(&mut att, def_power, att_hull);

        rounds += 1;

        if lost_def.is_empty() && lost_att.is_empty() {
            // Neither side can scratch the other; call it a draw.
            break;
        }
        def_losses.merge(&lost_def);
        att_losses.merge(&lost_att);
    }

    log::info!(
        "battle resolved in {} rounds: attacker lost {}, defender lost {}",
        rounds,
        att_losses.total(),
        def_losses.total()
    );

    BattleOutcome {
        attacker_survivors: att,
        defender_survivors: def,
        attacker_losses: att_losses,
        defender_losses: def_losses,
        rounds,
    }
}

/// Wreckage from destroyed units. Only ships leave debris; ground
/// defenses collapse into the planet's crust. Deuterium burns up.
pub fn debris_value(losses: &UnitCollection, debris_percent: u64) -> Resources {
    let mut debris = Resources::ZERO;
    for (unit, count) in losses.iter() {
        if !unit.is_ship() {
            continue;
        }
        let stats = unit.stats();
        debris.metal += stats.cost_metal * count * debris_percent / 100;
        debris.crystal += stats.cost_crystal * count * debris_percent / 100;
    }
    debris
}
