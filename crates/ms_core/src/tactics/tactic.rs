//! Team tactic and defensive setup selectors.
//!
//! The five tactics form one counter cycle, each beating exactly one other:
//!
//! ```text
//! Gegenpress ─▶ TikiTaka ─▶ ParkTheBus ─▶ LongBall ─▶ CounterAttack ─┐
//!     ▲                                                              │
//!     └──────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::MatchError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Tactic {
    Gegenpress,
    TikiTaka,
    ParkTheBus,
    LongBall,
    CounterAttack,
}

/// General directional leaning of a tactic. Decides the collision bonus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TacticLeaning {
    Attack,
    Universal,
    Defense,
}

impl Tactic {
    pub fn key(&self) -> &'static str {
        match self {
            Tactic::Gegenpress => "gegenpress",
            Tactic::TikiTaka => "tiki_taka",
            Tactic::ParkTheBus => "park_the_bus",
            Tactic::LongBall => "long_ball",
            Tactic::CounterAttack => "counter_attack",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Tactic::Gegenpress => "Gegenpress",
            Tactic::TikiTaka => "Tiki-Taka",
            Tactic::ParkTheBus => "Park the Bus",
            Tactic::LongBall => "Long Ball",
            Tactic::CounterAttack => "Counter-Attack",
        }
    }

    pub fn leaning(&self) -> TacticLeaning {
        match self {
            Tactic::Gegenpress | Tactic::LongBall => TacticLeaning::Attack,
            Tactic::TikiTaka => TacticLeaning::Universal,
            Tactic::ParkTheBus | Tactic::CounterAttack => TacticLeaning::Defense,
        }
    }

    /// The single tactic this one counters
    pub fn beats(&self) -> Tactic {
        match self {
            Tactic::Gegenpress => Tactic::TikiTaka,
            Tactic::TikiTaka => Tactic::ParkTheBus,
            Tactic::ParkTheBus => Tactic::LongBall,
            Tactic::LongBall => Tactic::CounterAttack,
            Tactic::CounterAttack => Tactic::Gegenpress,
        }
    }

    pub fn counters(&self, other: Tactic) -> bool {
        self.beats() == other
    }
}

impl FromStr for Tactic {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "gegenpress" | "high_press" => Ok(Tactic::Gegenpress),
            "tiki_taka" | "tikitaka" | "possession" => Ok(Tactic::TikiTaka),
            "park_the_bus" | "parkthebus" => Ok(Tactic::ParkTheBus),
            "long_ball" | "longball" | "direct" => Ok(Tactic::LongBall),
            "counter_attack" | "counterattack" | "counter" => Ok(Tactic::CounterAttack),
            _ => Err(MatchError::UnknownTactic(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum DefensiveSetup {
    #[default]
    ManMarking,
    Zonal,
}

impl DefensiveSetup {
    pub fn key(&self) -> &'static str {
        match self {
            DefensiveSetup::ManMarking => "man_marking",
            DefensiveSetup::Zonal => "zonal",
        }
    }
}

impl FromStr for DefensiveSetup {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "man_marking" | "man" | "manmarking" => Ok(DefensiveSetup::ManMarking),
            "zonal" | "zone" => Ok(DefensiveSetup::Zonal),
            _ => Err(MatchError::UnknownDefensiveSetup(s.to_string())),
        }
    }
}
