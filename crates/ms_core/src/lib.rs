//! # ms_core - Deterministic Match Outcome Engine
//!
//! Simulates the outcome of a football match from two rosters and their
//! tactical setup: final score, minute-by-minute timeline and xG analytics,
//! reproducible from a seed.
//!
//! ## Features
//! - Same inputs and seed always give a byte-identical result
//! - Tactic collision, playstyle bonuses and positional effects
//! - Defensive disruption, set pieces and long shots
//! - Optional decision trace for debugging
//! - JSON API and parallel batch runner
//!
//! ```rust
//! use ms_core::models::{Player, Position, Team};
//! use ms_core::tactics::{DefensiveSetup, Tactic};
//!
//! let squad = |name: &str| {
//!     let players = (0..11)
//!         .map(|i| {
//!             let pos = if i == 0 { Position::GK } else { Position::CM };
//!             Player::new(i.to_string(), format!("{name} {i}"), 50.0, pos)
//!         })
//!         .collect();
//!     Team::new(name, name, Tactic::TikiTaka, DefensiveSetup::ManMarking, players)
//! };
//!
//! let result = ms_core::simulate(&squad("Home"), &squad("Away"), "match-1", false);
//! let again = ms_core::simulate(&squad("Home"), &squad("Away"), "match-1", false);
//! assert_eq!(result, again);
//! ```

// Resolution steps take the chance, both sides, config, RNG and tracer
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod tactics;

pub use api::{simulate_batch, simulate_match_json, BatchSummary, MatchFixture, MatchRequest};
pub use engine::{simulate, EngineConfig, MatchEngine, MatchSeed};
pub use error::{MatchError, Result};
pub use models::{MatchEvent, MatchResult, Team, TeamSide};
