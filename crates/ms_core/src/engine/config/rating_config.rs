//! Rating constants: strength evaluation, tactic collision, team aggregation.

use serde::{Deserialize, Serialize};

use super::{check_finite, check_non_negative, check_positive};
use crate::error::Result;
use crate::models::playstyle::PlaystyleTier;
use crate::tactics::TacticLeaning;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RatingConfig {
    /// Multiplier gain for a buffed position (×(1 + buff))
    pub position_buff: f64,
    /// Multiplier loss for a nerfed position (×(1 − nerf))
    pub position_nerf: f64,

    /// Collision bonus for an attack-leaning winner
    pub collision_attack: f64,
    /// Collision bonus for a universal winner
    pub collision_universal: f64,
    /// Collision bonus for a defense-leaning winner (largest)
    pub collision_defense: f64,

    /// Leadership multiplier by best Leader tier: [bronze, silver, gold]
    pub leadership: [f64; 3],
    /// Home-ground multiplier on AP and DP
    pub home_advantage: f64,
    /// Floor applied to AP/DP so the log edge stays finite
    pub min_power: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            position_buff: 0.06,
            position_nerf: 0.06,
            collision_attack: 0.05,
            collision_universal: 0.07,
            collision_defense: 0.10,
            leadership: [1.02, 1.04, 1.06],
            home_advantage: 1.05,
            min_power: 1.0,
        }
    }
}

impl RatingConfig {
    pub fn collision_bonus(&self, leaning: TacticLeaning) -> f64 {
        match leaning {
            TacticLeaning::Attack => self.collision_attack,
            TacticLeaning::Universal => self.collision_universal,
            TacticLeaning::Defense => self.collision_defense,
        }
    }

    /// Team-wide leadership multiplier. Gold is the cap.
    pub fn leadership_multiplier(&self, tier: PlaystyleTier) -> f64 {
        match tier {
            PlaystyleTier::None => 1.0,
            PlaystyleTier::Bronze => self.leadership[0],
            PlaystyleTier::Silver => self.leadership[1],
            PlaystyleTier::Gold => self.leadership[2],
        }
    }
}

impl RatingConfig {
    pub fn validate(&self) -> Result<()> {
        check_finite("rating.position_buff", self.position_buff)?;
        check_finite("rating.position_nerf", self.position_nerf)?;
        check_non_negative("rating.collision_attack", self.collision_attack)?;
        check_non_negative("rating.collision_universal", self.collision_universal)?;
        check_non_negative("rating.collision_defense", self.collision_defense)?;
        for value in self.leadership {
            check_positive("rating.leadership", value)?;
        }
        check_positive("rating.home_advantage", self.home_advantage)?;
        // Floor keeps ln(AP / DP) finite
        check_positive("rating.min_power", self.min_power)
    }
}
