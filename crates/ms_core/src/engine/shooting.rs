//! Shot Resolver
//!
//! Resolves an undisrupted chance into goal, save or off target.
//!
//! ```text
//! shooter_power = rating × (1 + 0.04·shot_power) × (1 + 0.05·set_piece_attacking)?
//! xG = base(set_piece) × (shooter_power / keeper_power)^1.5
//!        × long_shot_factor?  × setup_quality?
//! xG = clamp(xG, 0.01, 0.99)
//! ```
//!
//! Draw order per shot: shooter (open play / corner only), long-shot roll
//! (open play / free kick only), assist roll and pick, goal roll, then the
//! save coin-flip on non-goals. The coin-flip is narrative only.

use super::aggregation::TeamProfile;
use super::config::ResolutionConfig;
use super::debug_trace::{TraceEntry, TraceStage, Tracer};
use super::rng::MatchRng;
use crate::models::events::{EventType, SetPiece};
use crate::models::player::Player;
use crate::models::playstyle::Playstyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotResult {
    Goal,
    Save,
    OffTarget,
}

impl ShotResult {
    pub fn event_type(&self) -> EventType {
        match self {
            ShotResult::Goal => EventType::Goal,
            ShotResult::Save => EventType::Save,
            ShotResult::OffTarget => EventType::Shot,
        }
    }

    pub fn on_target(&self) -> bool {
        !matches!(self, ShotResult::OffTarget)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotOutcome {
    pub shooter: usize,
    pub assist: Option<usize>,
    pub long_shot: bool,
    /// Clamped into [xg_min, xg_max]
    pub xg: f64,
    pub result: ShotResult,
}

pub fn base_xg(set_piece: SetPiece, cfg: &ResolutionConfig) -> f64 {
    match set_piece {
        SetPiece::None => cfg.base_xg_open_play,
        SetPiece::Corner => cfg.base_xg_corner,
        SetPiece::FreeKick => cfg.base_xg_free_kick,
        SetPiece::Penalty => cfg.base_xg_penalty,
    }
}

pub fn long_shot_rate(set_piece: SetPiece, cfg: &ResolutionConfig) -> f64 {
    match set_piece {
        SetPiece::None => cfg.long_shot_rate_open_play,
        SetPiece::FreeKick => cfg.long_shot_rate_free_kick,
        SetPiece::Corner | SetPiece::Penalty => 0.0,
    }
}

/// Shooter rating boosted by shot-power and, on set pieces, set-piece attacking
pub fn shooter_power(
    player: &Player,
    rating: f64,
    set_piece: SetPiece,
    cfg: &ResolutionConfig,
) -> f64 {
    let shot_power = player.tier(Playstyle::ShotPower).level_value() as f64;
    let mut power = rating * (1.0 + cfg.shot_power_step * shot_power);
    if set_piece.is_set_piece() {
        let set_piece_attacking = player.tier(Playstyle::SetPieceAttacking).level_value() as f64;
        power *= 1.0 + cfg.set_piece_attacking_step * set_piece_attacking;
    }
    power
}

/// Long-shot multiplier on base xG: long-shot tier weighted by position suitability
pub fn long_shot_multiplier(player: &Player, cfg: &ResolutionConfig) -> f64 {
    let tier = player.tier(Playstyle::LongShot).level_value() as f64;
    let suitability = player.position.long_shot_suitability() as f64;
    cfg.long_shot_factor * (1.0 + cfg.long_shot_tier_step * tier * suitability)
}

/// Per-shot xG before the goal roll
pub fn shot_xg(
    base: f64,
    shooter_power: f64,
    keeper_power: f64,
    modifier: f64,
    cfg: &ResolutionConfig,
) -> f64 {
    let ratio = if keeper_power > 0.0 { shooter_power / keeper_power } else { 1.0 };
    let xg = base * ratio.max(0.0).powf(cfg.duel_exponent) * modifier;
    if xg.is_finite() {
        xg.clamp(cfg.xg_min, cfg.xg_max)
    } else {
        cfg.xg_max
    }
}

/// Resolve a shot for `attacker` against `defender`'s goalkeeper
pub fn resolve_shot(
    minute: u8,
    set_piece: SetPiece,
    attacker: &TeamProfile,
    defender: &TeamProfile,
    guessed_right: bool,
    cfg: &ResolutionConfig,
    rng: &mut MatchRng,
    tracer: &mut Tracer,
) -> ShotOutcome {
    let side = attacker.side;
    let shooter = pick_shooter(attacker, set_piece, rng);
    let player = attacker.player(shooter);

    let rate = long_shot_rate(set_piece, cfg);
    let long_shot = if rate > 0.0 {
        let roll = rng.roll();
        let taken = roll < rate;
        tracer.record(|| {
            TraceEntry::new(TraceStage::LongShot, player.name.as_str())
                .team(side)
                .minute(minute)
                .set_piece(set_piece)
                .roll(roll)
                .threshold(rate)
                .outcome(if taken { "long shot" } else { "inside the box" })
        });
        taken
    } else {
        false
    };

    let rate = assist_rate(set_piece, cfg);
    let assist = if rate > 0.0 {
        let roll = rng.roll();
        let assist = if roll < rate { pick_assist(attacker, shooter, rng) } else { None };
        tracer.record(|| {
            TraceEntry::new(TraceStage::Assist, player.name.as_str())
                .team(side)
                .minute(minute)
                .set_piece(set_piece)
                .roll(roll)
                .threshold(rate)
                .outcome(match assist {
                    Some(i) => attacker.player(i).name.clone(),
                    None => "unassisted".to_string(),
                })
        });
        assist
    } else {
        None
    };

    let power = shooter_power(player, attacker.rating(shooter), set_piece, cfg);
    let long_shot_factor = if long_shot { long_shot_multiplier(player, cfg) } else { 1.0 };
    let setup_factor = if guessed_right { cfg.setup_quality_factor } else { 1.0 };
    let modifier = long_shot_factor * setup_factor;
    let keeper_power = defender.keeper.power;
    let base = base_xg(set_piece, cfg);
    let xg = shot_xg(base, power, keeper_power, modifier, cfg);

    let goal_roll = rng.roll();
    let goal = goal_roll < xg;
    tracer.record(|| {
        TraceEntry::new(TraceStage::Shot, player.name.as_str())
            .team(side)
            .minute(minute)
            .set_piece(set_piece)
            .input("shooter_power", power)
            .input("keeper_power", keeper_power)
            .input("base_xg", base)
            .input("long_shot_factor", long_shot_factor)
            .input("setup_factor", setup_factor)
            .input("modifier", modifier)
            .roll(goal_roll)
            .threshold(xg)
            .outcome(if goal { "goal" } else { "no goal" })
    });

    let result = if goal {
        ShotResult::Goal
    } else {
        let save_chance = (keeper_power / (keeper_power + power).max(f64::EPSILON))
            .clamp(cfg.save_min, cfg.save_max);
        let roll = rng.roll();
        let result = if roll < save_chance { ShotResult::Save } else { ShotResult::OffTarget };
        tracer.record(|| {
            TraceEntry::new(TraceStage::Save, player.name.as_str())
                .team(side)
                .minute(minute)
                .input("shooter_power", power)
                .input("keeper_power", keeper_power)
                .roll(roll)
                .threshold(save_chance)
                .outcome(format!("{:?}", result))
        });
        result
    };

    ShotOutcome { shooter, assist, long_shot, xg, result }
}

/// Set-piece takers are the best SetPieceAttacking specialist (rating
/// breaks ties). Otherwise weighted by rating × attack weight.
pub fn pick_shooter(attacker: &TeamProfile, set_piece: SetPiece, rng: &mut MatchRng) -> usize {
    let candidates = outfield(attacker);

    if matches!(set_piece, SetPiece::Penalty | SetPiece::FreeKick) {
        let mut best = candidates[0];
        for &i in &candidates[1..] {
            let tier = attacker.player(i).tier(Playstyle::SetPieceAttacking);
            let best_tier = attacker.player(best).tier(Playstyle::SetPieceAttacking);
            let stronger = attacker.rating(i) > attacker.rating(best);
            if tier > best_tier || (tier == best_tier && stronger) {
                best = i;
            }
        }
        return best;
    }

    let weights: Vec<f64> = candidates
        .iter()
        .map(|&i| attacker.rating(i) * attacker.player(i).position.attack_defense_split().0 as f64)
        .collect();
    rng.weighted_index(&weights).map(|k| candidates[k]).unwrap_or(candidates[0])
}

/// Probability that a shot from this set piece is assisted
pub fn assist_rate(set_piece: SetPiece, cfg: &ResolutionConfig) -> f64 {
    match set_piece {
        SetPiece::None => cfg.assist_rate_open_play,
        SetPiece::Corner => cfg.assist_rate_corner,
        SetPiece::FreeKick | SetPiece::Penalty => 0.0,
    }
}

/// Assisting teammate, weighted towards playmakers
pub fn pick_assist(attacker: &TeamProfile, shooter: usize, rng: &mut MatchRng) -> Option<usize> {
    let candidates: Vec<usize> = outfield(attacker).into_iter().filter(|&i| i != shooter).collect();
    let weights: Vec<f64> = candidates
        .iter()
        .map(|&i| {
            let player = attacker.player(i);
            let playmaker = 1.0 + 0.1 * player.tier(Playstyle::Playmaker).level_value() as f64;
            attacker.rating(i) * player.position.attack_defense_split().0 as f64 * playmaker
        })
        .collect();
    rng.weighted_index(&weights).map(|k| candidates[k])
}

/// Outfield roster indices; the whole roster when only keepers are listed
fn outfield(profile: &TeamProfile) -> Vec<usize> {
    let players = &profile.team.players;
    let outfield: Vec<usize> =
        (0..players.len()).filter(|&i| !players[i].position.is_goalkeeper()).collect();
    if outfield.is_empty() {
        (0..players.len()).collect()
    } else {
        outfield
    }
}
