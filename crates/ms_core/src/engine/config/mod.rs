//! # Engine Configuration
//!
//! All tuning constants of the outcome engine in one place.
//!
//! ## Usage
//! ```rust
//! use ms_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.chance.xg_budget_max > config.chance.xg_budget_max);
//! ```
//!
//! ## Environment Variables
//!
//! - `MS_ENGINE_PROFILE`: Select preset (realistic, arcade, simulation)

mod chance_config;
mod rating_config;
mod resolution_config;

pub use chance_config::ChanceConfig;
pub use rating_config::RatingConfig;
pub use resolution_config::ResolutionConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{MatchError, Result};
use crate::models::team::MIN_ROSTER_SIZE;

pub const PROFILE_ENV_VAR: &str = "MS_ENGINE_PROFILE";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Strength, collision and aggregation
    pub rating: RatingConfig,
    /// xG budget and chance discretization
    pub chance: ChanceConfig,
    /// Disruption and shot resolution
    pub resolution: ResolutionConfig,
    /// Sides below this size forfeit
    pub min_roster_size: usize,
    /// Goals awarded to the non-forfeiting side
    pub forfeit_goals: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rating: RatingConfig::default(),
            chance: ChanceConfig::default(),
            resolution: ResolutionConfig::default(),
            min_roster_size: MIN_ROSTER_SIZE,
            forfeit_goals: 3,
        }
    }
}

impl EngineConfig {
    /// Default league-average tuning
    pub fn realistic() -> Self {
        Self::default()
    }

    /// More goals: bigger budget, weaker defending
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.chance.xg_budget_min = 3.0;
        cfg.chance.xg_budget_max = 4.2;
        cfg.resolution.disruption_min = 0.10;
        cfg.resolution.disruption_max = 0.55;
        cfg.resolution.duel_exponent = 1.3;
        cfg
    }

    /// Tighter matches: smaller budget, stronger defending
    pub fn simulation() -> Self {
        let mut cfg = Self::default();
        cfg.chance.xg_budget_min = 2.0;
        cfg.chance.xg_budget_max = 2.8;
        cfg.resolution.disruption_min = 0.20;
        cfg.resolution.disruption_max = 0.75;
        cfg.resolution.setup_disruption_boost = 1.3;
        cfg
    }

    pub fn from_profile(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "realistic" | "default" => Some(Self::realistic()),
            "arcade" => Some(Self::arcade()),
            "simulation" => Some(Self::simulation()),
            _ => None,
        }
    }

    pub fn from_env_or_default() -> Self {
        let profile = env::var(PROFILE_ENV_VAR).unwrap_or_default();
        match Self::from_profile(&profile) {
            Some(cfg) => cfg,
            None => {
                if !profile.is_empty() {
                    log::warn!("Unknown {} '{}', using defaults", PROFILE_ENV_VAR, profile);
                }
                Self::default()
            }
        }
    }

    /// Parse YAML. Missing fields keep their defaults; the result is validated.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Every bound finite, ordered, and probabilities within `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        self.rating.validate()?;
        self.chance.validate()?;
        self.resolution.validate()
    }
}

// ========== Validation helpers ==========

fn invalid(msg: String) -> MatchError {
    MatchError::InvalidConfig(msg)
}

pub(crate) fn check_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{} must be finite, got {}", name, value)))
    }
}

pub(crate) fn check_non_negative(name: &str, value: f64) -> Result<()> {
    check_finite(name, value)?;
    if value < 0.0 {
        return Err(invalid(format!("{} must not be negative, got {}", name, value)));
    }
    Ok(())
}

pub(crate) fn check_positive(name: &str, value: f64) -> Result<()> {
    check_finite(name, value)?;
    if value <= 0.0 {
        return Err(invalid(format!("{} must be positive, got {}", name, value)));
    }
    Ok(())
}

pub(crate) fn check_probability(name: &str, value: f64) -> Result<()> {
    check_finite(name, value)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(format!("{} must lie in [0, 1], got {}", name, value)));
    }
    Ok(())
}

pub(crate) fn check_ordered(min_name: &str, min: f64, max_name: &str, max: f64) -> Result<()> {
    check_finite(min_name, min)?;
    check_finite(max_name, max)?;
    if min > max {
        return Err(invalid(format!("{} ({}) exceeds {} ({})", min_name, min, max_name, max)));
    }
    Ok(())
}

// ========== Tests ==========
