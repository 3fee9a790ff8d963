//! Notification outbox adapter.
//!
//! The resolution engine reports every player-facing event through the
//! [`Notifier`] trait. Delivery is the collaborator's problem (at least
//! once); the engine fires and forgets, and a failing notifier must never
//! block a mission from being marked processed. Payloads are structured
//! arguments, never prose: the presentation layer owns wording and
//! translation, keyed by the stable category strings.

use serde::{Deserialize, Serialize};

use crate::coordinates::Coordinate;
use crate::resources::Resources;
use crate::state::{BuildingLevels, PlayerId};
use crate::units::UnitCollection;

/// Stable routing keys consumed by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageCategory {
    FleetDeployment,
    TransportArrived,
    ReturnOfFleet,
    BattleReport,
    EspionageReport,
    EspionageDetected,
    ColonyEstablished,
    ColonyFailed,
    ExpeditionReport,
    DebrisHarvested,
}

impl MessageCategory {
    pub fn key(self) -> &'static str {
        match self {
            MessageCategory::FleetDeployment => "fleet_deployment",
            MessageCategory::TransportArrived => "transport_arrived",
            MessageCategory::ReturnOfFleet => "return_of_fleet",
            MessageCategory::BattleReport => "battle_report",
            MessageCategory::EspionageReport => "espionage_report",
            MessageCategory::EspionageDetected => "espionage_detected",
            MessageCategory::ColonyEstablished => "colony_established",
            MessageCategory::ColonyFailed => "colony_failed",
            MessageCategory::ExpeditionReport => "expedition_report",
            MessageCategory::DebrisHarvested => "debris_harvested",
        }
    }
}

/// How an expedition went. Part of the message vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpeditionOutcome {
    Nothing,
    Resources,
    Ships,
    Ambush,
}

/// Structured message payloads.
///
/// Uses serde's tag format for clean JSONL output:
/// ```json
/// {"type":"delivery","from":{"galaxy":1,"system":205,"position":12},...}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageArgs {
    /// Cargo delivered by a deployment or transport arrival.
    Delivery {
        from: Coordinate,
        to: Coordinate,
        resources: Resources,
    },

    /// A fleet came home, with whatever survived the outbound leg.
    FleetReturn {
        from: Coordinate,
        to: Coordinate,
        units: UnitCollection,
        resources: Resources,
    },

    /// Battle resolved at a planet.
    Battle {
        location: Coordinate,
        attacker: PlayerId,
        defender: PlayerId,
        rounds: u32,
        attacker_losses: UnitCollection,
        defender_losses: UnitCollection,
        loot: Resources,
        debris: Resources,
    },

    /// Successful espionage sweep of a planet.
    EspionageReport {
        target: Coordinate,
        resources: Resources,
        units: UnitCollection,
        buildings: BuildingLevels,
    },

    /// Defender noticed (and destroyed) a probe fleet.
    EspionageDetected { target: Coordinate, probes: u64 },

    ColonyEstablished { coordinates: Coordinate },

    /// Position was taken by the time the colony ship arrived.
    ColonyFailed { coordinates: Coordinate },

    Expedition {
        outcome: ExpeditionOutcome,
        gained_resources: Resources,
        gained_units: UnitCollection,
        lost_units: UnitCollection,
    },

    DebrisHarvested {
        coordinates: Coordinate,
        collected: Resources,
        remaining: Resources,
    },
}

/// External notification collaborator. At-least-once delivery is assumed
/// downstream; the engine never retries.
pub trait Notifier {
    fn notify(&mut self, player: PlayerId, category: MessageCategory, args: MessageArgs);
}

/// A queued notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub player: PlayerId,
    pub category: MessageCategory,
    pub args: MessageArgs,
}

/// In-memory outbox, the default collaborator. Tests inspect `entries`; a
/// real deployment drains them into the message pipeline.
#[derive(Debug, Default, Clone)]
pub struct Outbox {
    pub entries: Vec<OutboxEntry>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_player(&self, player: PlayerId) -> Vec<&OutboxEntry> {
        self.entries.iter().filter(|e| e.player == player).collect()
    }
}

impl Notifier for Outbox {
    fn notify(&mut self, player: PlayerId, category: MessageCategory, args: MessageArgs) {
        self.entries.push(OutboxEntry {
            player,
            category,
            args,
        });
    }
}

/// Notifier that just logs, for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, player: PlayerId, category: MessageCategory, args: MessageArgs) {
        match serde_json::to_string(&args) {
            Ok(payload) => log::info!("notify player {} [{}]: {}", player, category.key(), payload),
            Err(e) => log::warn!("notify player {} [{}]: unserializable args: {}", player, category.key(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys_are_stable() {
        assert_eq!(MessageCategory::FleetDeployment.key(), "fleet_deployment");
        assert_eq!(MessageCategory::ReturnOfFleet.key(), "return_of_fleet");
        assert_eq!(MessageCategory::EspionageReport.key(), "espionage_report");
        assert_eq!(MessageCategory::BattleReport.key(), "battle_report");
    }

    #[test]
    fn test_outbox_records_in_order() {
        let mut outbox = Outbox::new();
        outbox.notify(
            1,
            MessageCategory::FleetDeployment,
            MessageArgs::Delivery {
                from: Coordinate::new(1, 1, 1),
                to: Coordinate::new(1, 1, 2),
                resources: Resources::new(100, 0, 0, 0),
            },
        );
        outbox.notify(
            2,
            MessageCategory::ColonyEstablished,
            MessageArgs::ColonyEstablished {
                coordinates: Coordinate::new(2, 3, 4),
            },
        );

        assert_eq!(outbox.entries.len(), 2);
        assert_eq!(outbox.for_player(1).len(), 1);
        assert_eq!(outbox.entries[0].category, MessageCategory::FleetDeployment);
    }

    #[test]
    fn test_args_serialize_tagged() {
        let args = MessageArgs::ColonyEstablished {
            coordinates: Coordinate::new(3, 40, 8),
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json["type"], "colony_established");
    }
}
