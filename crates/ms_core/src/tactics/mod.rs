// crates/ms_core/src/tactics/mod.rs
// Tactic selectors and their lookup tables

pub mod tables;
pub mod tactic;

pub use tables::{playstyle_bonus_weight, position_effect, PositionEffect};
pub use tactic::{DefensiveSetup, Tactic, TacticLeaning};
