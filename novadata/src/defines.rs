//! Game mechanic constants (defines).
//!
//! Values match the classic reference universe so that travel times, fuel
//! costs and debris yields are compatible with existing balance sheets.

/// Distance metric between coordinates.
pub mod distance {
    /// Distance between two identical coordinates (planet to its own orbit).
    pub const SAME_POSITION: u64 = 5;

    /// Base distance for two positions in the same system.
    pub const SAME_SYSTEM_BASE: u64 = 1_000;

    /// Added per position of separation within a system.
    pub const PER_POSITION: u64 = 5;

    /// Base distance for two systems in the same galaxy.
    pub const SAME_GALAXY_BASE: u64 = 2_700;

    /// Added per system of separation within a galaxy.
    pub const PER_SYSTEM: u64 = 95;

    /// Distance per galaxy of separation.
    pub const PER_GALAXY: u64 = 20_000;
}

/// Fleet travel constants.
pub mod fleet {
    /// Divisor in the duration and fuel formulas.
    pub const TRAVEL_FACTOR: f64 = 35_000.0;

    /// Flat seconds added to every trip before the universe speed divide.
    pub const TRAVEL_BASE_SECONDS: f64 = 10.0;

    /// Lowest dispatchable speed setting, in percent.
    pub const MIN_SPEED_PERCENT: u8 = 10;

    /// Highest dispatchable speed setting, in percent.
    pub const MAX_SPEED_PERCENT: u8 = 100;
}

/// Combat constants.
pub mod combat {
    /// Maximum battle rounds before the engagement is called a draw.
    pub const MAX_ROUNDS: u32 = 6;

    /// Hull points per unit of build cost (metal + crystal).
    pub const HULL_COST_DIVISOR: u64 = 10;

    /// Combat stat bonus per technology level, in percent.
    pub const TECH_BONUS_PERCENT: u64 = 10;

    /// Share of a destroyed ship's metal/crystal cost that becomes debris,
    /// in percent.
    pub const DEBRIS_PERCENT: u64 = 30;
}

/// Galaxy layout.
pub mod galaxy {
    /// Planet slots per system run 1..=15.
    pub const MAX_PLANET_POSITION: u8 = 15;

    /// Position 16 is the deep-space expedition slot.
    pub const EXPEDITION_POSITION: u8 = 16;

    pub const MAX_GALAXY: u8 = 9;
    pub const MAX_SYSTEM: u16 = 499;
}
