use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::playstyle::{Playstyle, PlaystyleError, PlaystyleSet, PlaystyleTier};
use crate::error::MatchError;

/// Player as seen by the match engine.
///
/// Immutable for the duration of one simulation; the engine only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    /// Base power rating (0-100 scale in practice, any non-negative value accepted)
    pub power: f32,
    pub position: Position,
    #[serde(default)]
    pub playstyles: PlaystyleSet,
}

impl Player {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        power: f32,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            power,
            position,
            playstyles: PlaystyleSet::new(),
        }
    }

    /// Builder-style equip, for fixtures and request conversion
    pub fn with_playstyle(
        mut self,
        style: Playstyle,
        tier: PlaystyleTier,
    ) -> Result<Self, PlaystyleError> {
        self.playstyles.equip(style, tier)?;
        Ok(self)
    }

    pub fn tier(&self, style: Playstyle) -> PlaystyleTier {
        self.playstyles.tier(style)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    GK,
    LB,
    CB,
    RB,
    LWB,
    RWB,
    CDM,
    CM,
    CAM,
    LM,
    RM,
    LW,
    RW,
    CF,
    ST,
    // Generic positions
    DF,
    MF,
    FW,
}

impl Position {
    /// Decode from compact numeric codes (0=GK ... 17=FW).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Position::GK),
            1 => Some(Position::LB),
            2 => Some(Position::CB),
            3 => Some(Position::RB),
            4 => Some(Position::LWB),
            5 => Some(Position::RWB),
            6 => Some(Position::CDM),
            7 => Some(Position::CM),
            8 => Some(Position::CAM),
            9 => Some(Position::LM),
            10 => Some(Position::RM),
            11 => Some(Position::LW),
            12 => Some(Position::RW),
            13 => Some(Position::CF),
            14 => Some(Position::ST),
            15 => Some(Position::DF),
            16 => Some(Position::MF),
            17 => Some(Position::FW),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::LB => "LB",
            Position::CB => "CB",
            Position::RB => "RB",
            Position::LWB => "LWB",
            Position::RWB => "RWB",
            Position::CDM => "CDM",
            Position::CM => "CM",
            Position::CAM => "CAM",
            Position::LM => "LM",
            Position::RM => "RM",
            Position::LW => "LW",
            Position::RW => "RW",
            Position::CF => "CF",
            Position::ST => "ST",
            Position::DF => "DF",
            Position::MF => "MF",
            Position::FW => "FW",
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        matches!(self, Position::GK)
    }

    pub fn is_defender(&self) -> bool {
        matches!(
            self,
            Position::LB
                | Position::CB
                | Position::RB
                | Position::LWB
                | Position::RWB
                | Position::DF
        )
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Position::LW | Position::RW | Position::CF | Position::ST | Position::FW)
    }

    /// Nominally attacking positions, counted when judging a team's shape
    /// (forwards plus the attacking midfielder).
    pub fn is_attacking(&self) -> bool {
        self.is_forward() || matches!(self, Position::CAM)
    }

    /// (attack weight, defense weight) split used by the team aggregator.
    /// Each pair sums to 1.0.
    pub fn attack_defense_split(&self) -> (f32, f32) {
        match self {
            Position::GK => (0.02, 0.98),
            Position::CB => (0.12, 0.88),
            Position::DF => (0.18, 0.82),
            Position::LB | Position::RB => (0.28, 0.72),
            Position::LWB | Position::RWB => (0.42, 0.58),
            Position::CDM => (0.30, 0.70),
            Position::CM | Position::MF => (0.50, 0.50),
            Position::LM | Position::RM => (0.60, 0.40),
            Position::CAM => (0.75, 0.25),
            Position::LW | Position::RW => (0.85, 0.15),
            Position::CF | Position::FW => (0.90, 0.10),
            Position::ST => (0.95, 0.05),
        }
    }

    /// How natural a shot from distance is for this position (0.0-1.0)
    pub fn long_shot_suitability(&self) -> f32 {
        match self {
            Position::GK => 0.0,
            Position::CB | Position::DF => 0.25,
            Position::LB | Position::RB | Position::LWB | Position::RWB => 0.35,
            Position::CDM => 0.55,
            Position::CM | Position::MF | Position::LM | Position::RM => 0.75,
            Position::CAM | Position::LW | Position::RW => 0.9,
            Position::CF | Position::ST | Position::FW => 1.0,
        }
    }
}

impl FromStr for Position {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        if let Ok(numeric) = code.parse::<u8>() {
            return Position::from_code(numeric).ok_or(MatchError::UnknownPosition(s.to_string()));
        }
        let position = match code.as_str() {
            "GK" => Position::GK,
            "LB" => Position::LB,
            "CB" => Position::CB,
            "RB" => Position::RB,
            "LWB" => Position::LWB,
            "RWB" => Position::RWB,
            "CDM" | "DM" => Position::CDM,
            "CM" => Position::CM,
            "CAM" | "AM" => Position::CAM,
            "LM" => Position::LM,
            "RM" => Position::RM,
            "LW" => Position::LW,
            "RW" => Position::RW,
            "CF" => Position::CF,
            "ST" => Position::ST,
            "DF" => Position::DF,
            "MF" => Position::MF,
            "FW" => Position::FW,
            _ => return Err(MatchError::UnknownPosition(s.to_string())),
        };
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_splits_sum_to_one() {
        for position in Position::iter() {
            let (attack, defense) = position.attack_defense_split();
            assert!((attack + defense - 1.0).abs() < 1e-6, "{:?}", position);
        }
    }

    #[test]
    fn test_keeper_defends_striker_attacks() {
        let (gk_attack, gk_defense) = Position::GK.attack_defense_split();
        let (st_attack, st_defense) = Position::ST.attack_defense_split();
        assert!(gk_defense > 0.9 && gk_attack < 0.1);
        assert!(st_attack > 0.9 && st_defense < 0.1);
    }

    #[test]
    fn test_codes_parse_back() {
        for position in Position::iter() {
            assert_eq!(position.code().parse::<Position>().unwrap(), position);
        }
        assert_eq!("14".parse::<Position>().unwrap(), Position::ST);
        assert_eq!(" cam ".parse::<Position>().unwrap(), Position::CAM);
        assert!("SW".parse::<Position>().is_err());
        assert!("99".parse::<Position>().is_err());
    }

    #[test]
    fn test_attacking_positions() {
        assert!(Position::CAM.is_attacking());
        assert!(Position::ST.is_attacking());
        assert!(!Position::CM.is_attacking());
        assert!(!Position::GK.is_attacking());
    }
}
