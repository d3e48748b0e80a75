use super::player::Player;
use super::playstyle::{Playstyle, PlaystyleTier};
use crate::tactics::{DefensiveSetup, Tactic};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum roster size; a side with fewer players forfeits.
pub const MIN_ROSTER_SIZE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub fn opponent(&self) -> TeamSide {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, TeamSide::Home)
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamSide::Home => write!(f, "home"),
            TeamSide::Away => write!(f, "away"),
        }
    }
}

/// A team as entered for one match: tactical selectors plus the exact
/// players assigned to it. Home/away is decided by the argument position
/// of `simulate`, not stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub tactic: Tactic,
    #[serde(default)]
    pub defensive_setup: DefensiveSetup,
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        tactic: Tactic,
        defensive_setup: DefensiveSetup,
        players: Vec<Player>,
    ) -> Self {
        Self { id: id.into(), name: name.into(), tactic, defensive_setup, players }
    }

    /// Number of nominally attacking positions fielded
    pub fn attacking_positions(&self) -> usize {
        self.players.iter().filter(|p| p.position.is_attacking()).count()
    }

    /// Highest tier of a playstyle present anywhere on the roster
    pub fn best_tier(&self, style: Playstyle) -> PlaystyleTier {
        self.players.iter().map(|p| p.tier(style)).max().unwrap_or_default()
    }
}
