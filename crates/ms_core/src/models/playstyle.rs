//! Playstyle System
//!
//! Named per-player traits with a 4-level tier (None/Bronze/Silver/Gold).
//! A player holds at most [`MAX_PLAYSTYLES`] styles at once.
//!
//! Playstyles feed the engine in two ways:
//! - Rating bonus: the team tactic decides which styles add a percentage to
//!   the player's effective rating (see `tactics::tables`)
//! - Situational bonus: Leader, ShotPower, SetPieceAttacking,
//!   SetPieceDefending and LongShot are read directly by the aggregator,
//!   disruption and shot resolvers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MatchError;

/// Maximum simultaneous playstyles per player
pub const MAX_PLAYSTYLES: usize = 5;

// ============================================================================
// Tier System
// ============================================================================

/// Playstyle tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum PlaystyleTier {
    #[default]
    None = 0,
    Bronze = 1,
    Silver = 2,
    Gold = 3,
}

impl PlaystyleTier {
    /// Numeric level used by every bonus formula (`level_value × weight`)
    pub fn level_value(&self) -> f32 {
        *self as u8 as f32
    }
}

impl FromStr for PlaystyleTier {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(PlaystyleTier::None),
            "bronze" => Ok(PlaystyleTier::Bronze),
            "silver" => Ok(PlaystyleTier::Silver),
            "gold" => Ok(PlaystyleTier::Gold),
            other => Err(MatchError::UnknownTier(other.to_string())),
        }
    }
}

// ============================================================================
// Playstyle ID
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Playstyle {
    // === Situational ===
    Leader,
    ShotPower,
    SetPieceAttacking,
    SetPieceDefending,
    LongShot,

    // === Tactic-driven ===
    Playmaker,
    Dribbler,
    Engine,
    Tackler,
    Aerial,
    Speedster,
    Sweeper,
}

impl Playstyle {
    pub fn key(&self) -> &'static str {
        match self {
            Playstyle::Leader => "leader",
            Playstyle::ShotPower => "shot_power",
            Playstyle::SetPieceAttacking => "set_piece_attacking",
            Playstyle::SetPieceDefending => "set_piece_defending",
            Playstyle::LongShot => "long_shot",
            Playstyle::Playmaker => "playmaker",
            Playstyle::Dribbler => "dribbler",
            Playstyle::Engine => "engine",
            Playstyle::Tackler => "tackler",
            Playstyle::Aerial => "aerial",
            Playstyle::Speedster => "speedster",
            Playstyle::Sweeper => "sweeper",
        }
    }
}

impl FromStr for Playstyle {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let style = match key.as_str() {
            "leader" => Playstyle::Leader,
            "shot_power" => Playstyle::ShotPower,
            "set_piece_attacking" => Playstyle::SetPieceAttacking,
            "set_piece_defending" => Playstyle::SetPieceDefending,
            "long_shot" => Playstyle::LongShot,
            "playmaker" => Playstyle::Playmaker,
            "dribbler" => Playstyle::Dribbler,
            "engine" => Playstyle::Engine,
            "tackler" => Playstyle::Tackler,
            "aerial" => Playstyle::Aerial,
            "speedster" => Playstyle::Speedster,
            "sweeper" => Playstyle::Sweeper,
            _ => return Err(MatchError::UnknownPlaystyle(s.to_string())),
        };
        Ok(style)
    }
}

/// A playstyle held at a given tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaystyleLevel {
    pub style: Playstyle,
    pub tier: PlaystyleTier,
}

impl PlaystyleLevel {
    pub fn new(style: Playstyle, tier: PlaystyleTier) -> Self {
        Self { style, tier }
    }
}

// ============================================================================
// Playstyle Set
// ============================================================================

/// Up to [`MAX_PLAYSTYLES`] distinct playstyles.
///
/// Deserializing a list longer than the cap, or one naming the same style
/// twice, is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PlaystyleLevel>", into = "Vec<PlaystyleLevel>")]
pub struct PlaystyleSet {
    levels: Vec<PlaystyleLevel>,
}

impl PlaystyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equip a style. `None`-tier entries are accepted and count toward the cap.
    pub fn equip(&mut self, style: Playstyle, tier: PlaystyleTier) -> Result<(), PlaystyleError> {
        if self.levels.iter().any(|l| l.style == style) {
            return Err(PlaystyleError::Duplicate(style));
        }
        if self.levels.len() >= MAX_PLAYSTYLES {
            return Err(PlaystyleError::SlotsFull);
        }
        self.levels.push(PlaystyleLevel::new(style, tier));
        Ok(())
    }

    /// Tier held for a style (`None` when not equipped)
    pub fn tier(&self, style: Playstyle) -> PlaystyleTier {
        self.levels.iter().find(|l| l.style == style).map(|l| l.tier).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlaystyleLevel> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl TryFrom<Vec<PlaystyleLevel>> for PlaystyleSet {
    type Error = PlaystyleError;

    fn try_from(levels: Vec<PlaystyleLevel>) -> Result<Self, Self::Error> {
        let mut set = PlaystyleSet::new();
        for level in levels {
            set.equip(level.style, level.tier)?;
        }
        Ok(set)
    }
}

impl From<PlaystyleSet> for Vec<PlaystyleLevel> {
    fn from(set: PlaystyleSet) -> Self {
        set.levels
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaystyleError {
    SlotsFull,
    Duplicate(Playstyle),
}

impl fmt::Display for PlaystyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaystyleError::SlotsFull => {
                write!(f, "A player can hold at most {} playstyles", MAX_PLAYSTYLES)
            }
            PlaystyleError::Duplicate(style) => {
                write!(f, "Playstyle {} is already equipped", style.key())
            }
        }
    }
}

impl std::error::Error for PlaystyleError {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tier_level_values() {
        assert_eq!(PlaystyleTier::None.level_value(), 0.0);
        assert_eq!(PlaystyleTier::Bronze.level_value(), 1.0);
        assert_eq!(PlaystyleTier::Silver.level_value(), 2.0);
        assert_eq!(PlaystyleTier::Gold.level_value(), 3.0);
    }

    #[test]
    fn test_cap_at_five_styles() {
        let mut set = PlaystyleSet::new();
        let styles: Vec<Playstyle> = Playstyle::iter().collect();
        for style in &styles[..MAX_PLAYSTYLES] {
            assert!(set.equip(*style, PlaystyleTier::Bronze).is_ok());
        }
        assert_eq!(
            set.equip(styles[MAX_PLAYSTYLES], PlaystyleTier::Gold),
            Err(PlaystyleError::SlotsFull)
        );
        assert_eq!(set.len(), MAX_PLAYSTYLES);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut set = PlaystyleSet::new();
        set.equip(Playstyle::Leader, PlaystyleTier::Silver).unwrap();
        assert_eq!(
            set.equip(Playstyle::Leader, PlaystyleTier::Gold),
            Err(PlaystyleError::Duplicate(Playstyle::Leader))
        );
        assert_eq!(set.tier(Playstyle::Leader), PlaystyleTier::Silver);
        assert_eq!(set.tier(Playstyle::Engine), PlaystyleTier::None);
    }

    #[test]
    fn test_deserialize_enforces_cap() {
        let json = r#"[
            {"style": "leader", "tier": "gold"},
            {"style": "engine", "tier": "bronze"},
            {"style": "tackler", "tier": "bronze"},
            {"style": "aerial", "tier": "bronze"},
            {"style": "sweeper", "tier": "bronze"},
            {"style": "dribbler", "tier": "bronze"}
        ]"#;
        assert!(serde_json::from_str::<PlaystyleSet>(json).is_err());

        let ok = r#"[{"style": "shot_power", "tier": "silver"}]"#;
        let set: PlaystyleSet = serde_json::from_str(ok).unwrap();
        assert_eq!(set.tier(Playstyle::ShotPower), PlaystyleTier::Silver);
    }

    #[test]
    fn test_tier_wire_format_is_snake_case() {
        for tier in PlaystyleTier::iter() {
            let json = serde_json::to_string(&tier).unwrap();
            let key = json.trim_matches('"');
            assert_eq!(key, key.to_ascii_lowercase());
            assert_eq!(key.parse::<PlaystyleTier>().unwrap(), tier);
        }
        assert!(serde_json::from_str::<PlaystyleTier>("\"Gold\"").is_err());
        assert_eq!(serde_json::from_str::<PlaystyleTier>("\"gold\"").unwrap(), PlaystyleTier::Gold);
    }

    #[test]
    fn test_keys_round_trip_through_from_str() {
        for style in Playstyle::iter() {
            assert_eq!(style.key().parse::<Playstyle>().unwrap(), style);
        }
        let spaced: Playstyle = "Set-Piece Attacking".parse().unwrap();
        assert_eq!(spaced, Playstyle::SetPieceAttacking);
        assert!("juggler".parse::<Playstyle>().is_err());
    }
}
