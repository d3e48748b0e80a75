//! Per-tactic lookup tables.
//!
//! - `playstyle_bonus_weight`: rating percentage granted per tier level of a
//!   playstyle under a tactic
//! - `position_effect`: whether a tactic buffs, nerfs or leaves a position alone

use serde::{Deserialize, Serialize};

use super::tactic::Tactic;
use crate::models::player::Position;
use crate::models::playstyle::Playstyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionEffect {
    Buff,
    Neutral,
    Nerf,
}

/// Rating bonus per tier level (bronze = 1, silver = 2, gold = 3).
///
/// Situational styles (Leader, ShotPower, set-piece styles, LongShot) are
/// consumed elsewhere and give no rating bonus here.
pub fn playstyle_bonus_weight(tactic: Tactic, style: Playstyle) -> f32 {
    use Playstyle::*;

    match (tactic, style) {
        (_, Leader | ShotPower | SetPieceAttacking | SetPieceDefending | LongShot) => 0.0,

        (Tactic::Gegenpress, Engine) => 0.025,
        (Tactic::Gegenpress, Tackler) => 0.020,
        (Tactic::Gegenpress, Speedster) => 0.015,
        (Tactic::Gegenpress, Playmaker | Dribbler | Aerial | Sweeper) => 0.005,

        (Tactic::TikiTaka, Playmaker) => 0.025,
        (Tactic::TikiTaka, Dribbler) => 0.020,
        (Tactic::TikiTaka, Engine) => 0.010,
        (Tactic::TikiTaka, Tackler | Aerial | Speedster | Sweeper) => 0.0,

        (Tactic::ParkTheBus, Tackler) => 0.025,
        (Tactic::ParkTheBus, Sweeper) => 0.020,
        (Tactic::ParkTheBus, Aerial) => 0.015,
        (Tactic::ParkTheBus, Playmaker | Dribbler | Engine | Speedster) => 0.0,

        (Tactic::LongBall, Aerial) => 0.025,
        (Tactic::LongBall, Speedster) => 0.015,
        (Tactic::LongBall, Engine) => 0.010,
        (Tactic::LongBall, Playmaker | Dribbler | Tackler | Sweeper) => 0.005,

        (Tactic::CounterAttack, Speedster) => 0.025,
        (Tactic::CounterAttack, Dribbler) => 0.015,
        (Tactic::CounterAttack, Sweeper) => 0.015,
        (Tactic::CounterAttack, Playmaker | Engine | Tackler | Aerial) => 0.005,
    }
}

pub fn position_effect(tactic: Tactic, position: Position) -> PositionEffect {
    use Position::*;

    match tactic {
        Tactic::Gegenpress => match position {
            CDM | CM | LW | RW | CF => PositionEffect::Buff,
            GK | CB => PositionEffect::Nerf,
            _ => PositionEffect::Neutral,
        },
        Tactic::TikiTaka => match position {
            CM | CAM | MF => PositionEffect::Buff,
            ST | CB => PositionEffect::Nerf,
            _ => PositionEffect::Neutral,
        },
        Tactic::ParkTheBus => match position {
            GK | CB | CDM | DF => PositionEffect::Buff,
            CAM | LW | RW | ST | CF | FW => PositionEffect::Nerf,
            _ => PositionEffect::Neutral,
        },
        Tactic::LongBall => match position {
            ST | CB | FW => PositionEffect::Buff,
            CAM | CM => PositionEffect::Nerf,
            _ => PositionEffect::Neutral,
        },
        Tactic::CounterAttack => match position {
            LW | RW | ST | LWB | RWB => PositionEffect::Buff,
            CAM | LM | RM => PositionEffect::Nerf,
            _ => PositionEffect::Neutral,
        },
    }
}
