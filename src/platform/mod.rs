//! Platform abstraction layer
//!
//! Bridges a windowed (or headless) front end to the fixed-tick simulation:
//! - Time: accumulate variable frame time into fixed ticks
//! - Input: map held keys to per-tick input snapshots

pub mod input;
pub mod time;

pub use input::{Key, KeyBindings, PlayerKeys, ScriptStep, expand_script, parse_script};
pub use time::FrameClock;
