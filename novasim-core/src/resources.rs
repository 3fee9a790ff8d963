//! Resource quantities: metal, crystal, deuterium and energy.
//!
//! Counts are unsigned, so non-negativity holds by construction. Any
//! operation that could underflow is explicit (`checked_sub`).

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Resources {
    pub metal: u64,
    pub crystal: u64,
    pub deuterium: u64,
    pub energy: u64,
}

impl Resources {
    pub const ZERO: Resources = Resources {
        metal: 0,
        crystal: 0,
        deuterium: 0,
        energy: 0,
    };

    pub fn new(metal: u64, crystal: u64, deuterium: u64, energy: u64) -> Self {
        Self {
            metal,
            crystal,
            deuterium,
            energy,
        }
    }

    /// Total transportable amount. Energy is not transportable and is
    /// excluded, matching cargo accounting everywhere else.
    pub fn sum(&self) -> u64 {
        self.metal + self.crystal + self.deuterium
    }

    pub fn is_empty(&self) -> bool {
        self.sum() == 0
    }

    /// True if every component of `other` fits within `self`.
    pub fn contains(&self, other: &Resources) -> bool {
        self.metal >= other.metal
            && self.crystal >= other.crystal
            && self.deuterium >= other.deuterium
    }

    /// Component-wise subtraction, `None` on any underflow.
    pub fn checked_sub(&self, other: &Resources) -> Option<Resources> {
        Some(Resources {
            metal: self.metal.checked_sub(other.metal)?,
            crystal: self.crystal.checked_sub(other.crystal)?,
            deuterium: self.deuterium.checked_sub(other.deuterium)?,
            energy: self.energy,
        })
    }

    /// Scale the transportable components down proportionally so their sum
    /// does not exceed `cap`. Used for loot and debris collection where a
    /// fleet's hold is smaller than what is available.
    pub fn capped_at(&self, cap: u64) -> Resources {
        let total = self.sum();
        if total <= cap {
            return *self;
        }
        if cap == 0 {
            return Resources::ZERO;
        }
        let metal = self.metal * cap / total;
        let crystal = self.crystal * cap / total;
        let mut out = Resources::new(metal, crystal, self.deuterium * cap / total, 0);
        // Integer division leaves slack; top up metal then crystal without
        // exceeding either the cap or the available amounts.
        let mut slack = cap - out.sum();
        let metal_room = self.metal - out.metal;
        let take = slack.min(metal_room);
        out.metal += take;
        slack -= take;
        out.crystal += slack.min(self.crystal - out.crystal);
        out
    }
}

impl Add for Resources {
    type Output = Resources;

    fn add(self, rhs: Resources) -> Resources {
        Resources {
            metal: self.metal + rhs.metal,
            crystal: self.crystal + rhs.crystal,
            deuterium: self.deuterium + rhs.deuterium,
            energy: self.energy + rhs.energy,
        }
    }
}

impl AddAssign for Resources {
    fn add_assign(&mut self, rhs: Resources) {
        *self = *self + rhs;
    }
}

impl std::fmt::Display for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "metal {} / crystal {} / deuterium {}",
            self.metal, self.crystal, self.deuterium
        )
    }
}
