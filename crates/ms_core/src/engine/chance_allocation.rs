//! Chance Allocator
//!
//! ```text
//! budget ~ U[xg_budget_min, xg_budget_max)
//! edge   = ln(own AP / opponent DP)
//! share  = clamp(logistic(k · (edge_home − edge_away)), 0.25, 0.75)
//! xG     = budget × share × setup_factor(opponent guessed right)
//! chances = clamp(round(Σ xG × chances_per_xg), min, max), split by xG
//! ```
//!
//! The discrete chance count, not the xG figure, drives how many events
//! are simulated.

use super::aggregation::TeamPower;
use super::config::ChanceConfig;
use super::debug_trace::{TraceEntry, TraceStage, Tracer};
use super::rng::MatchRng;
use crate::models::events::SetPiece;
use crate::models::team::TeamSide;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChanceAllocation {
    pub xg_budget: f64,
    /// Home share of the budget before setup scaling
    pub home_share: f64,
    pub home_xg: f64,
    pub away_xg: f64,
    pub home_chances: u8,
    pub away_chances: u8,
}

impl ChanceAllocation {
    pub fn chances(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.home_chances,
            TeamSide::Away => self.away_chances,
        }
    }

    pub fn xg(&self, side: TeamSide) -> f64 {
        match side {
            TeamSide::Home => self.home_xg,
            TeamSide::Away => self.away_xg,
        }
    }

    pub fn total_chances(&self) -> u8 {
        self.home_chances + self.away_chances
    }
}

/// One attacking opportunity. Lives only for the duration of a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chance {
    pub minute: u8,
    pub side: TeamSide,
    pub set_piece: SetPiece,
    pub disrupted: bool,
}

/// Attacking edge of `attack` against the opponent's `defense`
pub fn attacking_edge(attack: f64, defense: f64) -> f64 {
    (attack / defense).ln()
}

/// Home share of the xG budget from both sides' AP/DP
pub fn home_share(home: &TeamPower, away: &TeamPower, cfg: &ChanceConfig) -> f64 {
    let delta =
        attacking_edge(home.attack, away.defense) - attacking_edge(away.attack, home.defense);
    let share = 1.0 / (1.0 + (-cfg.share_steepness * delta).exp());
    share.clamp(cfg.share_min, cfg.share_max)
}

/// Split a total chance count proportionally to the xG figures
pub fn discretize(home_xg: f64, away_xg: f64, cfg: &ChanceConfig) -> (u8, u8) {
    let total_xg = home_xg + away_xg;
    let total = (total_xg * cfg.chances_per_xg)
        .round()
        .clamp(cfg.min_chances as f64, cfg.max_chances as f64) as u8;
    if total_xg <= 0.0 {
        let home = total / 2;
        return (home, total - home);
    }
    let home = ((total as f64) * home_xg / total_xg).round() as u8;
    let home = home.min(total);
    (home, total - home)
}

/// Draw the budget and apportion chances.
///
/// `home_guessed_right` means the home defense matched the away attack's
/// shape, which trims the away side's share (and vice versa).
pub fn allocate(
    home: &TeamPower,
    away: &TeamPower,
    home_guessed_right: bool,
    away_guessed_right: bool,
    cfg: &ChanceConfig,
    rng: &mut MatchRng,
    tracer: &mut Tracer,
) -> ChanceAllocation {
    let xg_budget = rng.range(cfg.xg_budget_min, cfg.xg_budget_max);
    let share = home_share(home, away, cfg);

    let setup_factor =
        |guessed_right: bool| if guessed_right { cfg.setup_correct_factor } else { 1.0 };
    let home_xg = xg_budget * share * setup_factor(away_guessed_right);
    let away_xg = xg_budget * (1.0 - share) * setup_factor(home_guessed_right);
    let (home_chances, away_chances) = discretize(home_xg, away_xg, cfg);

    let allocation = ChanceAllocation {
        xg_budget,
        home_share: share,
        home_xg,
        away_xg,
        home_chances,
        away_chances,
    };

    tracer.record(|| {
        TraceEntry::new(TraceStage::Allocation, "xG budget")
            .input("budget", xg_budget)
            .input("home_share", share)
            .input("home_xg", home_xg)
            .input("away_xg", away_xg)
            .outcome(format!("{} home / {} away chances", home_chances, away_chances))
    });

    allocation
}

/// Set-piece category for a uniform `roll`. Remaining mass is open play.
pub fn set_piece_for_roll(roll: f64, cfg: &ChanceConfig) -> SetPiece {
    if roll < cfg.penalty_rate {
        SetPiece::Penalty
    } else if roll < cfg.penalty_rate + cfg.free_kick_rate {
        SetPiece::FreeKick
    } else if roll < cfg.penalty_rate + cfg.free_kick_rate + cfg.corner_rate {
        SetPiece::Corner
    } else {
        SetPiece::None
    }
}

/// Place every allocated chance on the clock, ascending by minute.
/// Home chances are drawn first; the sort is stable.
pub fn schedule_chances(
    allocation: &ChanceAllocation,
    cfg: &ChanceConfig,
    rng: &mut MatchRng,
    tracer: &mut Tracer,
) -> Vec<Chance> {
    let mut chances = Vec::with_capacity(allocation.total_chances() as usize);
    for side in [TeamSide::Home, TeamSide::Away] {
        for n in 0..allocation.chances(side) {
            let minute = rng.minute();
            let roll = rng.roll();
            let set_piece = set_piece_for_roll(roll, cfg);
            tracer.record(|| {
                TraceEntry::new(TraceStage::Schedule, format!("{} chance {}", side, n + 1))
                    .team(side)
                    .minute(minute)
                    .set_piece(set_piece)
                    .input("penalty_rate", cfg.penalty_rate)
                    .input("free_kick_rate", cfg.free_kick_rate)
                    .input("corner_rate", cfg.corner_rate)
                    .roll(roll)
                    .threshold(cfg.penalty_rate + cfg.free_kick_rate + cfg.corner_rate)
                    .outcome(format!("{:?}", set_piece))
            });
            chances.push(Chance { minute, side, set_piece, disrupted: false });
        }
    }
    chances.sort_by_key(|c| c.minute);
    chances
}
