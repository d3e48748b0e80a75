//! Tactic Collision Resolver
//!
//! If one side's tactic counters the other's, every rating of the winning
//! side is multiplied by `1 + bonus(leaning)`. Runs between strength
//! evaluation and aggregation.

use super::config::RatingConfig;
use super::debug_trace::{TraceEntry, TraceStage, Tracer};
use crate::models::team::TeamSide;
use crate::tactics::Tactic;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionOutcome {
    pub winner: Option<TeamSide>,
    /// Bonus fraction granted to the winner (0.0 without a winner)
    pub bonus: f64,
}

impl CollisionOutcome {
    pub fn multiplier_for(&self, side: TeamSide) -> f64 {
        if self.winner == Some(side) {
            1.0 + self.bonus
        } else {
            1.0
        }
    }
}

pub fn resolve_collision(home: Tactic, away: Tactic, cfg: &RatingConfig) -> CollisionOutcome {
    let winner = if home.counters(away) {
        Some((TeamSide::Home, home))
    } else if away.counters(home) {
        Some((TeamSide::Away, away))
    } else {
        None
    };

    match winner {
        Some((side, tactic)) => CollisionOutcome {
            winner: Some(side),
            bonus: cfg.collision_bonus(tactic.leaning()),
        },
        None => CollisionOutcome { winner: None, bonus: 0.0 },
    }
}

/// Resolve the collision and scale the winner's ratings in place
pub fn apply_collision(
    home_tactic: Tactic,
    away_tactic: Tactic,
    home_ratings: &mut [f64],
    away_ratings: &mut [f64],
    cfg: &RatingConfig,
    tracer: &mut Tracer,
) -> CollisionOutcome {
    let outcome = resolve_collision(home_tactic, away_tactic, cfg);

    for (side, ratings) in [(TeamSide::Home, home_ratings), (TeamSide::Away, away_ratings)] {
        let multiplier = outcome.multiplier_for(side);
        if multiplier != 1.0 {
            ratings.iter_mut().for_each(|r| *r *= multiplier);
        }
    }

    tracer.record(|| {
        let result = match outcome.winner {
            Some(side) => format!("{} wins (+{:.0}%)", side, outcome.bonus * 100.0),
            None => "no winner".to_string(),
        };
        TraceEntry::new(
            TraceStage::Collision,
            format!("{} vs {}", home_tactic.display_name(), away_tactic.display_name()),
        )
        .input("bonus", outcome.bonus)
        .outcome(result)
    });

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_mirror_has_no_winner() {
        let cfg = RatingConfig::default();
        for tactic in Tactic::iter() {
            let outcome = resolve_collision(tactic, tactic, &cfg);
            assert_eq!(outcome.winner, None);
            assert_eq!(outcome.bonus, 0.0);
        }
    }

    #[test]
    fn test_counter_wins_with_leaning_bonus() {
        let cfg = RatingConfig::default();
        // CounterAttack (defense-leaning) beats Gegenpress
        let outcome = resolve_collision(Tactic::Gegenpress, Tactic::CounterAttack, &cfg);
        assert_eq!(outcome.winner, Some(TeamSide::Away));
        assert_eq!(outcome.bonus, cfg.collision_defense);

        // Gegenpress (attack-leaning) beats TikiTaka
        let outcome = resolve_collision(Tactic::Gegenpress, Tactic::TikiTaka, &cfg);
        assert_eq!(outcome.winner, Some(TeamSide::Home));
        assert_eq!(outcome.bonus, cfg.collision_attack);
    }

    #[test]
    fn test_non_adjacent_tactics_do_not_collide() {
        let cfg = RatingConfig::default();
        // Gegenpress and ParkTheBus are two steps apart in the cycle
        let outcome = resolve_collision(Tactic::Gegenpress, Tactic::ParkTheBus, &cfg);
        assert_eq!(outcome.winner, None);
    }

    #[test]
    fn test_apply_scales_only_winner() {
        let cfg = RatingConfig::default();
        let mut home = vec![50.0, 60.0];
        let mut away = vec![50.0, 60.0];
        let mut tracer = Tracer::new(true);
        let outcome =
            apply_collision(
                Tactic::TikiTaka,
                Tactic::ParkTheBus,
                &mut home,
                &mut away,
                &cfg,
                &mut tracer,
            );
        assert_eq!(outcome.winner, Some(TeamSide::Home));
        assert!((home[0] - 50.0 * (1.0 + cfg.collision_universal)).abs() < 1e-9);
        assert_eq!(away, vec![50.0, 60.0]);
        assert_eq!(tracer.finish().unwrap().entries.len(), 1);
    }
}
