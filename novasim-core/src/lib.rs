//! # Nova Simulation Core
//!
//! Deterministic fleet-mission engine for a persistent space-strategy
//! universe.
//!
//! A mission is scheduled once at dispatch time with a precomputed arrival,
//! then resolved exactly once when the game clock reaches it. All effects of
//! a mission (resource transfers, battles, colonies, debris, notifications)
//! happen at resolution under a single exclusive borrow of [`WorldState`].
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐     ┌───────────────┐     ┌──────────────────┐
//! │ dispatch  │────▶│ MissionTable  │────▶│ run_mission_tick │
//! │ (validate │     │ (due missions │     │ (resolve, spawn  │
//! │  + debit) │     │  by arrival)  │     │  return trips)   │
//! └───────────┘     └───────────────┘     └────────┬─────────┘
//!                                                  │
//!                   ┌───────────────┐     ┌────────▼─────────┐
//!                   │   Notifier    │◀────│ systems::* per-  │
//!                   │ (player mail) │     │ type handlers    │
//!                   └───────────────┘     └──────────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`WorldState`] | Complete universe state (players, planets, missions, debris) |
//! | [`FleetMission`] | One scheduled fleet movement with cargo and arrival time |
//! | [`dispatch`] | Validate and launch a mission, debiting the origin atomically |
//! | [`run_mission_tick`] | Resolve every due mission at the current clock |
//! | [`Notifier`] | Trait for delivering player-facing reports |
//!
//! Determinism: all randomness (espionage detection, expedition outcomes)
//! flows through [`WorldState::roll`], so a seed replays bit-identically and
//! [`WorldState::checksum`] detects divergence between processes.

pub mod config;
pub mod coordinates;
pub mod eligibility;
pub mod engine;
pub mod errors;
pub mod notify;
pub mod resources;
pub mod scheduler;
pub mod state;
pub mod systems;
pub mod testing;
pub mod units;

pub use config::{ExpeditionWeights, UniverseConfig};
pub use coordinates::Coordinate;
pub use eligibility::{evaluate_mission, IneligibleReason, MissionPossibleStatus};
pub use engine::{resolve, run_mission_tick};
pub use errors::{DispatchError, ResolveError};
pub use notify::{LogNotifier, MessageArgs, MessageCategory, Notifier, Outbox};
pub use resources::Resources;
pub use scheduler::{dispatch, due_missions, fuel_consumption, travel_duration};
pub use state::{
    DebrisField, FleetMission, MissionId, MissionType, Planet, PlanetId, Player, PlayerId,
    TechLevels, WorldState,
};
pub use systems::{resolve_battle, BattleOutcome};
pub use units::UnitCollection;
