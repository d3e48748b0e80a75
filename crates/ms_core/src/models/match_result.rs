//! Match Result Data Structures
//!
//! Output of the engine and the entire contract with the surrounding
//! application, which persists it, renders it and folds the score into
//! league standings.
//!
//! ```text
//! MatchResult
//!  ├─► homeScore / awayScore     ← goals resolved by the shot resolver
//!  ├─► homeXG / awayXG           ← sum of clamped per-shot xG
//!  ├─► events: Vec<MatchEvent>   ← narrator, ascending by minute
//!  ├─► statistics                ← AP/DP, xG budget, per-team counters
//!  ├─► forfeited                 ← side that forfeited, if any
//!  └─► debug: Option<DebugTrace> ← only when requested
//! ```

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::events::{EventType, MatchEvent};
use super::team::TeamSide;
use crate::engine::debug_trace::DebugTrace;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub home_score: u8,
    pub away_score: u8,
    #[serde(rename = "homeXG")]
    pub home_xg: f32,
    #[serde(rename = "awayXG")]
    pub away_xg: f32,
    pub events: Vec<MatchEvent>,
    pub statistics: MatchStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forfeited: Option<TeamSide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugTrace>,
}

impl MatchResult {
    pub fn score(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.home_score,
            TeamSide::Away => self.away_score,
        }
    }

    pub fn xg(&self, side: TeamSide) -> f32 {
        match side {
            TeamSide::Home => self.home_xg,
            TeamSide::Away => self.away_xg,
        }
    }

    /// Goal events credited to a side
    pub fn goal_events(&self, side: TeamSide) -> usize {
        self.events
            .iter()
            .filter(|e| e.team == side && e.event_type == EventType::Goal)
            .count()
    }

    pub fn winner(&self) -> Option<TeamSide> {
        match self.home_score.cmp(&self.away_score) {
            std::cmp::Ordering::Greater => Some(TeamSide::Home),
            std::cmp::Ordering::Less => Some(TeamSide::Away),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// SHA-256 hex digest of the canonical JSON form.
    ///
    /// Two results with the same fingerprint are byte-identical when serialized.
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        let digest = Sha256::digest(&bytes);
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

// ============================================
// Statistics
// ============================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatistics {
    /// Total expected-goal budget drawn for the match
    pub xg_budget: f32,
    /// Side whose tactic won the collision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collision_winner: Option<TeamSide>,
    pub home: TeamStatistics,
    pub away: TeamStatistics,
}

impl MatchStatistics {
    pub fn side(&self, side: TeamSide) -> &TeamStatistics {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: TeamSide) -> &mut TeamStatistics {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatistics {
    pub attack_power: f32,
    pub defense_power: f32,
    /// Expected-goal share allocated before chances were discretized
    pub allocated_xg: f32,
    /// Whether this side's defensive setup matched the opponent's shape
    pub setup_correct: bool,
    pub chances: u8,
    pub disrupted: u8,
    pub shots: u8,
    pub shots_on_target: u8,
    pub goals: u8,
    pub set_pieces: u8,
}
