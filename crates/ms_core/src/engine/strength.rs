//! Strength Evaluator
//!
//! effective = power × (1 + Σ level × tactic_weight(style)) × position_effect
//!
//! Pure function of (player, tactic); collision bonuses are applied later
//! by the collision resolver on the evaluated ratings.

use super::config::RatingConfig;
use super::debug_trace::{TraceEntry, TraceStage, Tracer};
use crate::models::player::Player;
use crate::models::team::{Team, TeamSide};
use crate::tactics::{playstyle_bonus_weight, position_effect, PositionEffect, Tactic};

/// Cumulative playstyle percentage a tactic grants a player
pub fn playstyle_bonus(player: &Player, tactic: Tactic) -> f64 {
    player
        .playstyles
        .iter()
        .map(|l| l.tier.level_value() as f64 * playstyle_bonus_weight(tactic, l.style) as f64)
        .sum()
}

pub fn position_multiplier(effect: PositionEffect, cfg: &RatingConfig) -> f64 {
    match effect {
        PositionEffect::Buff => 1.0 + cfg.position_buff,
        PositionEffect::Neutral => 1.0,
        PositionEffect::Nerf => 1.0 - cfg.position_nerf,
    }
}

/// Effective rating of one player under a tactic (always ≥ 0)
pub fn evaluate_player(player: &Player, tactic: Tactic, cfg: &RatingConfig) -> f64 {
    let base = (player.power as f64).max(0.0);
    let boosted = base * (1.0 + playstyle_bonus(player, tactic));
    let effect = position_effect(tactic, player.position);
    (boosted * position_multiplier(effect, cfg)).max(0.0)
}

/// Evaluate a whole roster, in roster order
pub fn evaluate_team(
    team: &Team,
    side: TeamSide,
    cfg: &RatingConfig,
    tracer: &mut Tracer,
) -> Vec<f64> {
    team.players
        .iter()
        .map(|player| {
            let rating = evaluate_player(player, team.tactic, cfg);
            tracer.record(|| {
                TraceEntry::new(TraceStage::Strength, player.name.as_str())
                    .team(side)
                    .input("power", player.power as f64)
                    .input("playstyle_bonus", playstyle_bonus(player, team.tactic))
                    .input(
                        "position_multiplier",
                        position_multiplier(position_effect(team.tactic, player.position), cfg),
                    )
                    .outcome(format!("rating {:.2}", rating))
            });
            rating
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Position;
    use crate::models::playstyle::{Playstyle, PlaystyleTier};

    #[test]
    fn test_plain_player_neutral_position() {
        let cfg = RatingConfig::default();
        // LB is neutral under TikiTaka
        let player = Player::new("1", "Plain", 60.0, Position::LB);
        assert!((evaluate_player(&player, Tactic::TikiTaka, &cfg) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_playstyle_bonus_scales_with_tier() {
        let cfg = RatingConfig::default();
        let bronze = Player::new("1", "B", 60.0, Position::LB)
            .with_playstyle(Playstyle::Playmaker, PlaystyleTier::Bronze)
            .unwrap();
        let gold = Player::new("2", "G", 60.0, Position::LB)
            .with_playstyle(Playstyle::Playmaker, PlaystyleTier::Gold)
            .unwrap();
        let weight = playstyle_bonus_weight(Tactic::TikiTaka, Playstyle::Playmaker) as f64;
        assert!((playstyle_bonus(&bronze, Tactic::TikiTaka) - weight).abs() < 1e-9);
        assert!((playstyle_bonus(&gold, Tactic::TikiTaka) - 3.0 * weight).abs() < 1e-9);
        assert!(
            evaluate_player(&gold, Tactic::TikiTaka, &cfg)
                > evaluate_player(&bronze, Tactic::TikiTaka, &cfg)
        );
    }

    #[test]
    fn test_bonus_depends_on_tactic() {
        let player = Player::new("1", "Runner", 70.0, Position::LB)
            .with_playstyle(Playstyle::Speedster, PlaystyleTier::Gold)
            .unwrap();
        assert!(
            playstyle_bonus(&player, Tactic::CounterAttack)
                > playstyle_bonus(&player, Tactic::TikiTaka)
        );
    }

    #[test]
    fn test_buff_and_nerf() {
        let cfg = RatingConfig::default();
        // ParkTheBus buffs CB and nerfs ST
        let cb = Player::new("1", "CB", 50.0, Position::CB);
        let st = Player::new("2", "ST", 50.0, Position::ST);
        assert!((evaluate_player(&cb, Tactic::ParkTheBus, &cfg) - 50.0 * 1.06).abs() < 1e-9);
        assert!((evaluate_player(&st, Tactic::ParkTheBus, &cfg) - 50.0 * 0.94).abs() < 1e-9);
    }

    #[test]
    fn test_rating_never_negative() {
        let cfg = RatingConfig::default();
        let broken = Player::new("1", "Neg", -20.0, Position::ST);
        assert_eq!(evaluate_player(&broken, Tactic::ParkTheBus, &cfg), 0.0);
    }
}
