//! Team Aggregator
//!
//! Folds post-collision player ratings into team Attack Power (AP) and
//! Defense Power (DP):
//!
//! ```text
//! AP = Σ rating × attack_weight(position)  ┐
//! DP = Σ rating × defense_weight(position) ┘ × leadership × home_advantage
//! ```
//!
//! The reduction is order-independent. [`TeamProfile`] bundles the figures
//! with the roster lookups the per-chance resolvers need (goalkeeper,
//! strongest defender, team-wide playstyle tiers).

use super::config::{RatingConfig, ResolutionConfig};
use super::debug_trace::{TraceEntry, TraceStage, Tracer};
use crate::models::player::Player;
use crate::models::playstyle::{Playstyle, PlaystyleTier};
use crate::models::team::{Team, TeamSide};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamPower {
    pub attack: f64,
    pub defense: f64,
    /// Team-wide leadership multiplier already folded into attack/defense
    pub leadership: f64,
}

/// Aggregate ratings (same order as `team.players`) into AP/DP
pub fn aggregate(team: &Team, ratings: &[f64], side: TeamSide, cfg: &RatingConfig) -> TeamPower {
    debug_assert_eq!(team.players.len(), ratings.len());

    let (attack, defense) = team.players.iter().zip(ratings).fold(
        (0.0_f64, 0.0_f64),
        |(ap, dp), (player, rating)| {
            let (aw, dw) = player.position.attack_defense_split();
            (ap + rating * aw as f64, dp + rating * dw as f64)
        },
    );

    let leadership = cfg.leadership_multiplier(team.best_tier(Playstyle::Leader));
    let home = if side.is_home() { cfg.home_advantage } else { 1.0 };
    let multiplier = leadership * home;

    TeamPower {
        attack: (attack * multiplier).max(cfg.min_power),
        defense: (defense * multiplier).max(cfg.min_power),
        leadership,
    }
}

/// Who stands in goal for a side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keeper {
    /// Roster index; `None` only for an empty roster
    pub index: Option<usize>,
    /// Rating used in the shot duel
    pub power: f64,
    /// No GK on the roster; an outfield player is covering
    pub emergency: bool,
}

/// Everything the per-chance resolvers need to know about one side
#[derive(Debug, Clone)]
pub struct TeamProfile<'a> {
    pub side: TeamSide,
    pub team: &'a Team,
    /// Effective ratings after strength evaluation and collision
    pub ratings: Vec<f64>,
    pub power: TeamPower,
    pub keeper: Keeper,
    /// Index of the highest-rated defender
    pub strongest_defender: Option<usize>,
    pub set_piece_defending: PlaystyleTier,
}

impl<'a> TeamProfile<'a> {
    pub fn build(
        team: &'a Team,
        side: TeamSide,
        ratings: Vec<f64>,
        rating_cfg: &RatingConfig,
        resolution_cfg: &ResolutionConfig,
        tracer: &mut Tracer,
    ) -> Self {
        let power = aggregate(team, &ratings, side, rating_cfg);
        let keeper = select_keeper(team, &ratings, resolution_cfg, rating_cfg.min_power);
        if keeper.emergency {
            log::warn!("{} has no goalkeeper, an outfield player covers in goal", team.name);
        }
        let strongest_defender = strongest_defender(team, &ratings);
        let set_piece_defending = team.best_tier(Playstyle::SetPieceDefending);

        tracer.record(|| {
            TraceEntry::new(TraceStage::Aggregation, team.name.as_str())
                .team(side)
                .input("attack_power", power.attack)
                .input("defense_power", power.defense)
                .input("leadership", power.leadership)
                .input("keeper_power", keeper.power)
                .outcome(format!("AP {:.1} / DP {:.1}", power.attack, power.defense))
        });

        Self { side, team, ratings, power, keeper, strongest_defender, set_piece_defending }
    }

    pub fn player(&self, index: usize) -> &'a Player {
        &self.team.players[index]
    }

    pub fn rating(&self, index: usize) -> f64 {
        self.ratings[index]
    }

    pub fn strongest_defender_power(&self) -> Option<f64> {
        self.strongest_defender.map(|i| self.ratings[i])
    }

    pub fn keeper_player(&self) -> Option<&'a Player> {
        self.keeper.index.map(|i| self.player(i))
    }
}

/// Highest-rated goalkeeper; otherwise the best defensive contributor at a
/// reduced rating.
pub fn select_keeper(team: &Team, ratings: &[f64], cfg: &ResolutionConfig, floor: f64) -> Keeper {
    let goalkeeper = best_by(team, ratings, |p| p.position.is_goalkeeper(), |_, r| r);
    if let Some(index) = goalkeeper {
        return Keeper { index: Some(index), power: ratings[index].max(floor), emergency: false };
    }

    let cover = best_by(
        team,
        ratings,
        |_| true,
        |p, r| r * p.position.attack_defense_split().1 as f64,
    );
    Keeper {
        index: cover,
        power: cover
            .map(|i| ratings[i] * cfg.emergency_keeper_factor)
            .unwrap_or(floor)
            .max(floor),
        emergency: true,
    }
}

/// Highest-rated defender, falling back to the best defensive outfielder
pub fn strongest_defender(team: &Team, ratings: &[f64]) -> Option<usize> {
    best_by(team, ratings, |p| p.position.is_defender(), |_, r| r).or_else(|| {
        best_by(
            team,
            ratings,
            |p| !p.position.is_goalkeeper(),
            |p, r| r * p.position.attack_defense_split().1 as f64,
        )
    })
}

/// Index maximizing `score` among players passing `filter`. Earliest wins ties.
fn best_by(
    team: &Team,
    ratings: &[f64],
    filter: impl Fn(&Player) -> bool,
    score: impl Fn(&Player, f64) -> f64,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, (player, rating)) in team.players.iter().zip(ratings).enumerate() {
        if !filter(player) {
            continue;
        }
        let s = score(player, *rating);
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((i, s));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::player::Position;
    use crate::tactics::{DefensiveSetup, Tactic};

    fn team(players: Vec<Player>) -> Team {
        Team::new("t", "Test FC", Tactic::TikiTaka, DefensiveSetup::ManMarking, players)
    }

    #[test]
    fn test_goalkeeper_contributes_to_defense() {
        let t = team(vec![
            Player::new("1", "Keeper", 50.0, Position::GK),
            Player::new("2", "Striker", 50.0, Position::ST),
        ]);
        let power = aggregate(&t, &[50.0, 50.0], TeamSide::Away, &RatingConfig::default());
        assert!((power.attack - (50.0 * 0.02 + 50.0 * 0.95)).abs() < 1e-4);
        assert!((power.defense - (50.0 * 0.98 + 50.0 * 0.05)).abs() < 1e-4);
    }

    #[test]
    fn test_home_advantage_only_for_home() {
        let cfg = RatingConfig::default();
        let t = team(vec![Player::new("1", "Mid", 60.0, Position::CM)]);
        let home = aggregate(&t, &[60.0], TeamSide::Home, &cfg);
        let away = aggregate(&t, &[60.0], TeamSide::Away, &cfg);
        assert!((home.attack / away.attack - cfg.home_advantage).abs() < 1e-9);
        assert!((home.defense / away.defense - cfg.home_advantage).abs() < 1e-9);
    }

    #[test]
    fn test_leadership_uses_best_tier_only() {
        let cfg = RatingConfig::default();
        let players = vec![
            Player::new("1", "Captain", 60.0, Position::CM)
                .with_playstyle(Playstyle::Leader, PlaystyleTier::Silver)
                .unwrap(),
            Player::new("2", "Vice", 60.0, Position::CM)
                .with_playstyle(Playstyle::Leader, PlaystyleTier::Bronze)
                .unwrap(),
        ];
        let power = aggregate(&team(players), &[60.0, 60.0], TeamSide::Away, &cfg);
        assert_eq!(power.leadership, cfg.leadership[1]);
        assert!((power.attack - 60.0 * cfg.leadership[1]).abs() < 1e-9);
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let cfg = RatingConfig::default();
        let a = Player::new("1", "A", 70.0, Position::CB);
        let b = Player::new("2", "B", 40.0, Position::LW);
        let pair = team(vec![a.clone(), b.clone()]);
        let forward = aggregate(&pair, &[70.0, 40.0], TeamSide::Home, &cfg);
        let reverse = aggregate(&team(vec![b, a]), &[40.0, 70.0], TeamSide::Home, &cfg);
        assert!((forward.attack - reverse.attack).abs() < 1e-9);
        assert!((forward.defense - reverse.defense).abs() < 1e-9);
    }

    #[test]
    fn test_power_floor() {
        let cfg = RatingConfig::default();
        let t = team(vec![Player::new("1", "Ghost", 0.0, Position::ST)]);
        let power = aggregate(&t, &[0.0], TeamSide::Away, &cfg);
        assert_eq!(power.attack, cfg.min_power);
        assert_eq!(power.defense, cfg.min_power);
    }

    #[test]
    fn test_emergency_keeper() {
        let cfg = ResolutionConfig::default();
        let t = team(vec![
            Player::new("1", "Wide", 80.0, Position::LW),
            Player::new("2", "Stopper", 60.0, Position::CB),
        ]);
        let keeper = select_keeper(&t, &[80.0, 60.0], &cfg, 1.0);
        assert!(keeper.emergency);
        assert_eq!(keeper.index, Some(1));
        assert!((keeper.power - 60.0 * cfg.emergency_keeper_factor).abs() < 1e-9);
    }

    #[test]
    fn test_strongest_defender_prefers_defenders() {
        let t = team(vec![
            Player::new("1", "Keeper", 90.0, Position::GK),
            Player::new("2", "Back", 55.0, Position::LB),
            Player::new("3", "Centre", 65.0, Position::CB),
            Player::new("4", "Star", 95.0, Position::ST),
        ]);
        assert_eq!(strongest_defender(&t, &[90.0, 55.0, 65.0, 95.0]), Some(2));

        let no_backs = team(vec![
            Player::new("1", "Keeper", 90.0, Position::GK),
            Player::new("2", "Holder", 60.0, Position::CDM),
            Player::new("3", "Star", 95.0, Position::ST),
        ]);
        assert_eq!(strongest_defender(&no_backs, &[90.0, 60.0, 95.0]), Some(1));
    }
}
