//! Parallel multi-match runner.
//!
//! Each fixture gets its own engine call and therefore its own RNG; rayon
//! distributes the calls and `collect` keeps fixture order, so a batch is
//! as reproducible as the single matches it contains.

use rayon::prelude::*;
use serde::Serialize;

use crate::engine::{EngineConfig, MatchEngine, MatchSeed};
use crate::models::{MatchResult, Team, TeamSide};

/// One match to simulate
#[derive(Debug, Clone)]
pub struct MatchFixture {
    pub home: Team,
    pub away: Team,
    pub seed: MatchSeed,
    pub debug: bool,
}

impl MatchFixture {
    pub fn new(home: Team, away: Team, seed: impl Into<MatchSeed>) -> Self {
        Self { home, away, seed: seed.into(), debug: false }
    }

    /// `runs` copies of this fixture seeded `"{prefix}-0"`, `"{prefix}-1"`, ...
    pub fn replicate(&self, runs: usize, seed_prefix: &str) -> Vec<MatchFixture> {
        (0..runs)
            .map(|i| MatchFixture {
                seed: MatchSeed::Text(format!("{}-{}", seed_prefix, i)),
                ..self.clone()
            })
            .collect()
    }
}

/// Simulate every fixture in parallel. Results come back in fixture order.
pub fn simulate_batch(fixtures: &[MatchFixture], config: &EngineConfig) -> Vec<MatchResult> {
    let engine = MatchEngine::new(config.clone());
    let results: Vec<MatchResult> = fixtures
        .par_iter()
        .map(|f| engine.simulate(&f.home, &f.away, &f.seed, f.debug))
        .collect();
    log::info!("Simulated {} fixtures", results.len());
    results
}

/// Aggregate outcome of a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub matches: u32,
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
    pub forfeits: u32,
    pub home_goals: u32,
    pub away_goals: u32,
    pub home_xg: f64,
    pub away_xg: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[MatchResult]) -> Self {
        let mut summary = Self::default();
        for result in results {
            summary.add(result);
        }
        summary
    }

    pub fn add(&mut self, result: &MatchResult) {
        self.matches += 1;
        match result.winner() {
            Some(TeamSide::Home) => self.home_wins += 1,
            Some(TeamSide::Away) => self.away_wins += 1,
            None => self.draws += 1,
        }
        if result.forfeited.is_some() {
            self.forfeits += 1;
        }
        self.home_goals += result.home_score as u32;
        self.away_goals += result.away_score as u32;
        self.home_xg += result.home_xg as f64;
        self.away_xg += result.away_xg as f64;
    }

    pub fn avg_home_goals(&self) -> f64 {
        self.per_match(self.home_goals as f64)
    }

    pub fn avg_away_goals(&self) -> f64 {
        self.per_match(self.away_goals as f64)
    }

    pub fn avg_total_xg(&self) -> f64 {
        self.per_match(self.home_xg + self.away_xg)
    }

    fn per_match(&self, total: f64) -> f64 {
        if self.matches == 0 {
            0.0
        } else {
            total / self.matches as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::simulate;
    use crate::models::{Player, Position};
    use crate::tactics::{DefensiveSetup, Tactic};

    fn squad(name: &str, power: f32) -> Team {
        let positions = [
            Position::GK,
            Position::LB,
            Position::CB,
            Position::CB,
            Position::RB,
            Position::CM,
            Position::CM,
            Position::CAM,
            Position::LW,
            Position::RW,
            Position::ST,
        ];
        let players = positions
            .iter()
            .enumerate()
            .map(|(i, pos)| Player::new(i.to_string(), format!("{name} {i}"), power, *pos))
            .collect();
        Team::new(name, name, Tactic::LongBall, DefensiveSetup::Zonal, players)
    }

    #[test]
    fn test_batch_matches_sequential_in_order() {
        let fixture = MatchFixture::new(squad("Home", 55.0), squad("Away", 50.0), "base");
        let fixtures = fixture.replicate(16, "round");
        let batch = simulate_batch(&fixtures, &EngineConfig::default());
        assert_eq!(batch.len(), 16);
        for (f, result) in fixtures.iter().zip(&batch) {
            assert_eq!(&simulate(&f.home, &f.away, f.seed.clone(), false), result);
        }
    }

    #[test]
    fn test_replicate_seeds() {
        let fixture = MatchFixture::new(squad("Home", 50.0), squad("Away", 50.0), 1u64);
        let copies = fixture.replicate(3, "s");
        let seeds: Vec<_> = copies.iter().map(|f| f.seed.clone()).collect();
        assert_eq!(
            seeds,
            vec![
                MatchSeed::Text("s-0".into()),
                MatchSeed::Text("s-1".into()),
                MatchSeed::Text("s-2".into())
            ]
        );
    }

    #[test]
    fn test_summary_counts() {
        let fixture = MatchFixture::new(squad("Home", 60.0), squad("Away", 60.0), 0u64);
        let results = simulate_batch(&fixture.replicate(20, "sum"), &EngineConfig::default());
        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.matches, 20);
        assert_eq!(summary.home_wins + summary.draws + summary.away_wins, 20);
        assert_eq!(summary.forfeits, 0);
        let goals: u32 = results.iter().map(|r| (r.home_score + r.away_score) as u32).sum();
        assert_eq!(summary.home_goals + summary.away_goals, goals);
        assert!(summary.avg_total_xg() > 0.0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::from_results(&[]);
        assert_eq!(summary.matches, 0);
        assert_eq!(summary.avg_home_goals(), 0.0);
    }
}
