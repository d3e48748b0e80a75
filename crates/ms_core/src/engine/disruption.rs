//! Defensive Disruption Resolver
//!
//! Decides, before any shot, whether the defense breaks up an attack.
//!
//! ```text
//! x     = (DP_def − AP_att) / (AP_att + DP_def)
//! base  = clamp(midpoint + slope · x, disruption_min, disruption_max)
//! p     = base × setup_boost? × defender_scale × set_piece_defending?
//! p     = min(p, disruption_cap)          penalties: p = 0, no roll
//! ```

use super::aggregation::TeamProfile;
use super::chance_allocation::Chance;
use super::config::ResolutionConfig;
use super::debug_trace::{TraceEntry, TraceStage, Tracer};
use super::rng::MatchRng;
use crate::models::events::SetPiece;
use crate::models::team::Team;
use crate::tactics::DefensiveSetup;

/// Setup that matches an attack fielding `attacking_positions` attackers
pub fn correct_setup(attacking_positions: usize, cfg: &ResolutionConfig) -> DefensiveSetup {
    if attacking_positions > cfg.attacking_threshold {
        DefensiveSetup::Zonal
    } else {
        DefensiveSetup::ManMarking
    }
}

/// Whether `defender` chose the right setup against `attacker`'s shape
pub fn defender_guessed_right(defender: &Team, attacker: &Team, cfg: &ResolutionConfig) -> bool {
    defender.defensive_setup == correct_setup(attacker.attacking_positions(), cfg)
}

/// Band-clamped base probability from the AP/DP matchup
pub fn base_disruption(attack_power: f64, defense_power: f64, cfg: &ResolutionConfig) -> f64 {
    let total = attack_power + defense_power;
    let x = if total > 0.0 { (defense_power - attack_power) / total } else { 0.0 };
    let base = cfg.disruption_midpoint + cfg.disruption_slope * x;
    base.clamp(cfg.disruption_min, cfg.disruption_max)
}

/// Strongest-defender multiplier, centred on the reference power
pub fn defender_scaling(defender_power: Option<f64>, cfg: &ResolutionConfig) -> f64 {
    match defender_power {
        Some(power) => (1.0 + (power - cfg.defender_reference) / cfg.defender_scale).max(0.0),
        None => 1.0,
    }
}

/// Final disruption probability for one chance
pub fn disruption_probability(
    set_piece: SetPiece,
    attacker: &TeamProfile,
    defender: &TeamProfile,
    guessed_right: bool,
    cfg: &ResolutionConfig,
) -> f64 {
    if set_piece == SetPiece::Penalty {
        return 0.0;
    }

    let mut p = base_disruption(attacker.power.attack, defender.power.defense, cfg);
    if guessed_right {
        p *= cfg.setup_disruption_boost;
    }
    p *= defender_scaling(defender.strongest_defender_power(), cfg);
    if set_piece.is_set_piece() {
        p *= 1.0 + cfg.set_piece_defending_step * defender.set_piece_defending.level_value() as f64;
    }
    p.clamp(0.0, cfg.disruption_cap)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisruptionOutcome {
    pub probability: f64,
    /// `None` when no roll was taken (penalties)
    pub roll: Option<f64>,
    pub disrupted: bool,
    /// Defender credited with breaking up the attack
    pub defender: Option<usize>,
}

/// Roll a chance against the defense. Marks `chance.disrupted`.
pub fn resolve_disruption(
    chance: &mut Chance,
    attacker: &TeamProfile,
    defender: &TeamProfile,
    guessed_right: bool,
    cfg: &ResolutionConfig,
    rng: &mut MatchRng,
    tracer: &mut Tracer,
) -> DisruptionOutcome {
    let probability =
        disruption_probability(chance.set_piece, attacker, defender, guessed_right, cfg);

    let outcome = if chance.set_piece == SetPiece::Penalty {
        DisruptionOutcome { probability, roll: None, disrupted: false, defender: None }
    } else {
        let roll = rng.roll();
        let disrupted = roll < probability;
        let credited = if disrupted { pick_defender(defender, rng) } else { None };
        DisruptionOutcome { probability, roll: Some(roll), disrupted, defender: credited }
    };
    chance.disrupted = outcome.disrupted;

    tracer.record(|| {
        let mut entry = TraceEntry::new(
            TraceStage::Disruption,
            format!("{} attack", attacker.team.name),
        )
        .team(attacker.side)
        .minute(chance.minute)
        .input("attack_power", attacker.power.attack)
        .input("defense_power", defender.power.defense)
        .input("guessed_right", if guessed_right { 1.0 } else { 0.0 })
        .threshold(probability);
        if let Some(roll) = outcome.roll {
            entry = entry.roll(roll);
        }
        let result = match (outcome.disrupted, outcome.roll) {
            (true, _) => "disrupted",
            (false, Some(_)) => "attack continues",
            (false, None) => "penalty, cannot be disrupted",
        };
        entry.outcome(result)
    });

    outcome
}

/// Outfield defender weighted by rating × defense weight
fn pick_defender(defender: &TeamProfile, rng: &mut MatchRng) -> Option<usize> {
    let weights: Vec<f64> = defender
        .team
        .players
        .iter()
        .zip(&defender.ratings)
        .map(|(player, rating)| {
            if player.position.is_goalkeeper() {
                0.0
            } else {
                rating * player.position.attack_defense_split().1 as f64
            }
        })
        .collect();
    rng.weighted_index(&weights)
}
