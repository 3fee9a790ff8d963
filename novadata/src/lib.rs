//! Static game catalog for the Nova mission core.
//!
//! Unit definitions (ships and stationary defenses) and game-mechanic
//! constants. Everything here is immutable lookup data; the simulation
//! state lives in `novasim-core`.

pub mod defines;
pub mod units;

pub use units::{UnitId, UnitStats};
