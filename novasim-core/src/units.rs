//! Unit composition owned by a planet (docked) or a mission (in flight).
//!
//! Backed by a `BTreeMap` so iteration order, serialization and checksums
//! are deterministic. Counts are strictly positive; removing the last unit
//! of a type removes the entry.

use novadata::UnitId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::resources::Resources;

/// A unit type with fewer available than requested.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("not enough {unit}: requested {requested}, available {available}")]
pub struct UnitShortage {
    pub unit: UnitId,
    pub requested: u64,
    pub available: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitCollection {
    counts: BTreeMap<UnitId, u64>,
}

impl UnitCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor from (unit, count) pairs.
    pub fn from_pairs(pairs: &[(UnitId, u64)]) -> Self {
        let mut units = Self::new();
        for &(unit, count) in pairs {
            units.add(unit, count);
        }
        units
    }

    pub fn add(&mut self, unit: UnitId, count: u64) {
        if count > 0 {
            *self.counts.entry(unit).or_insert(0) += count;
        }
    }

    pub fn count(&self, unit: UnitId) -> u64 {
        self.counts.get(&unit).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (UnitId, u64)> + '_ {
        self.counts.iter().map(|(&unit, &count)| (unit, count))
    }

    /// Merge another collection into this one.
    pub fn merge(&mut self, other: &UnitCollection) {
        for (unit, count) in other.iter() {
            self.add(unit, count);
        }
    }

    /// Remove `other` from this collection. Fails without mutating anything
    /// if any unit type is short.
    pub fn subtract(&mut self, other: &UnitCollection) -> Result<(), UnitShortage> {
        for (unit, requested) in other.iter() {
            let available = self.count(unit);
            if available < requested {
                return Err(UnitShortage {
                    unit,
                    requested,
                    available,
                });
            }
        }
        for (unit, requested) in other.iter() {
            self.remove(unit, requested);
        }
        Ok(())
    }

    /// Remove up to `count` units of a type, returning how many were removed.
    pub fn remove(&mut self, unit: UnitId, count: u64) -> u64 {
        match self.counts.get_mut(&unit) {
            Some(have) => {
                let taken = count.min(*have);
                *have -= taken;
                if *have == 0 {
                    self.counts.remove(&unit);
                }
                taken
            }
            None => 0,
        }
    }

    /// True if every unit in the collection can fly (no defenses).
    pub fn is_flyable(&self) -> bool {
        self.iter().all(|(unit, _)| unit.is_ship())
    }

    /// True if any unit has weapon power (probe-only fleets do not).
    pub fn has_combat_ships(&self) -> bool {
        self.iter().any(|(unit, _)| unit.stats().weapon > 0)
    }

    /// Total cargo hold across the fleet.
    pub fn cargo_capacity(&self) -> u64 {
        self.iter()
            .map(|(unit, count)| unit.stats().cargo * count)
            .sum()
    }

    /// Speed of the slowest unit, `None` for an empty collection or one
    /// containing a grounded unit.
    pub fn slowest_speed(&self) -> Option<u32> {
        if self.is_empty() || !self.is_flyable() {
            return None;
        }
        self.iter().map(|(unit, _)| unit.stats().speed).min()
    }

    /// Combined metal/crystal build cost of all units.
    pub fn build_cost(&self) -> Resources {
        let mut cost = Resources::ZERO;
        for (unit, count) in self.iter() {
            let stats = unit.stats();
            cost.metal += stats.cost_metal * count;
            cost.crystal += stats.cost_crystal * count;
        }
        cost
    }
}

impl std::fmt::Display for UnitCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (unit, count) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}x {}", count, unit)?;
            first = false;
        }
        if first {
            write!(f, "(empty)")?;
        }
        Ok(())
    }
}
