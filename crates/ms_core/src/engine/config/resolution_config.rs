//! Per-chance resolution constants: disruption and shot.

use serde::{Deserialize, Serialize};

use super::{check_finite, check_non_negative, check_ordered, check_positive, check_probability};
use crate::error::{MatchError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResolutionConfig {
    // === Disruption ===
    /// More attacking positions than this makes zonal the correct setup
    pub attacking_threshold: usize,
    /// Base disruption for evenly matched sides
    pub disruption_midpoint: f64,
    /// Gain per unit of (DP − AP) / (AP + DP)
    pub disruption_slope: f64,
    pub disruption_min: f64,
    pub disruption_max: f64,
    /// Ceiling after all disruption scaling
    pub disruption_cap: f64,
    /// Disruption multiplier when the defender's setup is correct
    pub setup_disruption_boost: f64,
    /// Shot xG multiplier when the defender's setup is correct
    pub setup_quality_factor: f64,
    /// Reference power for strongest-defender scaling
    pub defender_reference: f64,
    /// Divisor for strongest-defender scaling: 1 + (power − reference) / scale
    pub defender_scale: f64,
    /// Disruption gain per set-piece-defending tier level
    pub set_piece_defending_step: f64,

    // === Shot ===
    pub base_xg_open_play: f64,
    pub base_xg_corner: f64,
    pub base_xg_free_kick: f64,
    pub base_xg_penalty: f64,
    pub long_shot_rate_open_play: f64,
    pub long_shot_rate_free_kick: f64,
    /// Base xG multiplier for a long shot
    pub long_shot_factor: f64,
    /// Long-shot bonus per LongShot tier level, weighted by position suitability
    pub long_shot_tier_step: f64,
    pub shot_power_step: f64,
    pub set_piece_attacking_step: f64,
    /// Exponent on shooter/goalkeeper power ratio (> 1 amplifies mismatches)
    pub duel_exponent: f64,
    pub xg_min: f64,
    pub xg_max: f64,
    /// Keeper power multiplier when no GK is on the roster
    pub emergency_keeper_factor: f64,
    pub assist_rate_open_play: f64,
    pub assist_rate_corner: f64,
    /// Save probability bounds for the narrative coin-flip on non-goals
    pub save_min: f64,
    pub save_max: f64,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            attacking_threshold: 3,
            disruption_midpoint: 0.30,
            disruption_slope: 0.50,
            disruption_min: 0.15,
            disruption_max: 0.70,
            disruption_cap: 0.90,
            setup_disruption_boost: 1.20,
            setup_quality_factor: 0.85,
            defender_reference: 50.0,
            defender_scale: 250.0,
            set_piece_defending_step: 0.05,

            base_xg_open_play: 0.13,
            base_xg_corner: 0.07,
            base_xg_free_kick: 0.06,
            base_xg_penalty: 0.76,
            long_shot_rate_open_play: 0.20,
            long_shot_rate_free_kick: 0.60,
            long_shot_factor: 0.45,
            long_shot_tier_step: 0.10,
            shot_power_step: 0.04,
            set_piece_attacking_step: 0.05,
            duel_exponent: 1.5,
            xg_min: 0.01,
            xg_max: 0.99,
            emergency_keeper_factor: 0.6,
            assist_rate_open_play: 0.70,
            assist_rate_corner: 1.0,
            save_min: 0.25,
            save_max: 0.75,
        }
    }
}

impl ResolutionConfig {
    pub fn validate(&self) -> Result<()> {
        check_finite("resolution.disruption_midpoint", self.disruption_midpoint)?;
        check_finite("resolution.disruption_slope", self.disruption_slope)?;
        check_probability("resolution.disruption_min", self.disruption_min)?;
        check_probability("resolution.disruption_max", self.disruption_max)?;
        check_ordered(
            "resolution.disruption_min",
            self.disruption_min,
            "resolution.disruption_max",
            self.disruption_max,
        )?;
        check_probability("resolution.disruption_cap", self.disruption_cap)?;
        check_non_negative("resolution.setup_disruption_boost", self.setup_disruption_boost)?;
        check_non_negative("resolution.setup_quality_factor", self.setup_quality_factor)?;
        check_finite("resolution.defender_reference", self.defender_reference)?;
        check_positive("resolution.defender_scale", self.defender_scale)?;
        check_finite("resolution.set_piece_defending_step", self.set_piece_defending_step)?;

        for (name, value) in [
            ("resolution.base_xg_open_play", self.base_xg_open_play),
            ("resolution.base_xg_corner", self.base_xg_corner),
            ("resolution.base_xg_free_kick", self.base_xg_free_kick),
            ("resolution.base_xg_penalty", self.base_xg_penalty),
            ("resolution.long_shot_rate_open_play", self.long_shot_rate_open_play),
            ("resolution.long_shot_rate_free_kick", self.long_shot_rate_free_kick),
            ("resolution.assist_rate_open_play", self.assist_rate_open_play),
            ("resolution.assist_rate_corner", self.assist_rate_corner),
            ("resolution.save_min", self.save_min),
            ("resolution.save_max", self.save_max),
        ] {
            check_probability(name, value)?;
        }
        check_ordered("resolution.save_min", self.save_min, "resolution.save_max", self.save_max)?;

        check_non_negative("resolution.long_shot_factor", self.long_shot_factor)?;
        check_finite("resolution.long_shot_tier_step", self.long_shot_tier_step)?;
        check_finite("resolution.shot_power_step", self.shot_power_step)?;
        check_finite("resolution.set_piece_attacking_step", self.set_piece_attacking_step)?;
        check_finite("resolution.duel_exponent", self.duel_exponent)?;
        check_non_negative("resolution.emergency_keeper_factor", self.emergency_keeper_factor)?;

        // Per-shot xG stays strictly inside (0, 1)
        check_ordered("resolution.xg_min", self.xg_min, "resolution.xg_max", self.xg_max)?;
        if self.xg_min <= 0.0 || self.xg_max >= 1.0 {
            return Err(MatchError::InvalidConfig(format!(
                "resolution.xg_min ({}) and xg_max ({}) must lie strictly inside (0, 1)",
                self.xg_min, self.xg_max
            )));
        }
        Ok(())
    }
}
