//! Universe configuration.

use serde::{Deserialize, Serialize};

/// Relative weights for expedition outcomes. Zero disables an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpeditionWeights {
    pub nothing: u32,
    pub resources: u32,
    pub ships: u32,
    pub ambush: u32,
}

impl ExpeditionWeights {
    pub fn total(&self) -> u32 {
        self.nothing + self.resources + self.ships + self.ambush
    }
}

impl Default for ExpeditionWeights {
    fn default() -> Self {
        Self {
            nothing: 40,
            resources: 30,
            ships: 15,
            ambush: 15,
        }
    }
}

/// Per-universe tuning knobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseConfig {
    /// Universe-wide fleet speed multiplier. Travel durations divide by
    /// this, so `2` halves every trip.
    pub fleet_speed: u32,

    /// Share of a destroyed ship's metal/crystal cost that becomes debris,
    /// in percent.
    pub debris_percent: u64,

    pub expedition: ExpeditionWeights,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            fleet_speed: 1,
            debris_percent: novadata::defines::combat::DEBRIS_PERCENT,
            expedition: ExpeditionWeights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UniverseConfig::default();
        assert_eq!(config.fleet_speed, 1);
        assert_eq!(config.debris_percent, 30);
        assert_eq!(config.expedition.total(), 100);
    }
}
