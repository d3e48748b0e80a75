//! Chance allocation constants.

use serde::{Deserialize, Serialize};

use super::{check_finite, check_non_negative, check_ordered, check_probability};
use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChanceConfig {
    /// Lower bound of the match xG budget draw
    pub xg_budget_min: f64,
    /// Upper bound (exclusive) of the match xG budget draw
    pub xg_budget_max: f64,
    /// Steepness of the logistic edge → share transform
    pub share_steepness: f64,
    pub share_min: f64,
    pub share_max: f64,
    /// Attacker's xG share multiplier when the defender's setup is correct
    pub setup_correct_factor: f64,
    /// Discrete chances per unit of expected goals
    pub chances_per_xg: f64,
    pub min_chances: u8,
    pub max_chances: u8,

    // === Set-piece frequencies (remaining mass is open play) ===
    pub penalty_rate: f64,
    pub free_kick_rate: f64,
    pub corner_rate: f64,
}

impl Default for ChanceConfig {
    fn default() -> Self {
        Self {
            xg_budget_min: 2.2,
            xg_budget_max: 3.2,
            share_steepness: 1.6,
            share_min: 0.25,
            share_max: 0.75,
            setup_correct_factor: 0.90,
            chances_per_xg: 4.5,
            min_chances: 4,
            max_chances: 16,
            penalty_rate: 0.04,
            free_kick_rate: 0.10,
            corner_rate: 0.16,
        }
    }
}

impl ChanceConfig {
    pub fn validate(&self) -> Result<()> {
        check_non_negative("chance.xg_budget_min", self.xg_budget_min)?;
        check_ordered(
            "chance.xg_budget_min",
            self.xg_budget_min,
            "chance.xg_budget_max",
            self.xg_budget_max,
        )?;
        check_finite("chance.share_steepness", self.share_steepness)?;
        check_probability("chance.share_min", self.share_min)?;
        check_probability("chance.share_max", self.share_max)?;
        check_ordered("chance.share_min", self.share_min, "chance.share_max", self.share_max)?;
        check_non_negative("chance.setup_correct_factor", self.setup_correct_factor)?;
        check_non_negative("chance.chances_per_xg", self.chances_per_xg)?;
        if self.min_chances > self.max_chances {
            return Err(MatchError::InvalidConfig(format!(
                "chance.min_chances ({}) exceeds chance.max_chances ({})",
                self.min_chances, self.max_chances
            )));
        }
        check_probability("chance.penalty_rate", self.penalty_rate)?;
        check_probability("chance.free_kick_rate", self.free_kick_rate)?;
        check_probability("chance.corner_rate", self.corner_rate)?;
        check_probability(
            "chance set-piece rates (sum)",
            self.penalty_rate + self.free_kick_rate + self.corner_rate,
        )
    }
}
