//! # Match Outcome Engine
//!
//! Pure function: (home, away, seed, debug) → [`MatchResult`].
//!
//! ```text
//!  Team ──► strength ──► collision ──► aggregation ──► chance_allocation
//!                                        (AP / DP)        (xG budget, N chances)
//!                                                               │
//!              ┌────────────────── per chance ──────────────────┘
//!              ▼
//!        disruption ──► shooting ──► narrator ──► MatchEvent
//!
//!  MatchRng feeds every stochastic step; Tracer observes every step.
//! ```
//!
//! Every invocation owns its RNG, seeded from the caller's [`MatchSeed`];
//! nothing is shared between calls, so independent matches can run on any
//! number of threads.

pub mod aggregation;
pub mod chance_allocation;
pub mod collision;
pub mod config;
pub mod debug_trace;
pub mod disruption;
pub mod narrator;
pub mod rng;
pub mod shooting;
pub mod strength;


pub use config::EngineConfig;
pub use debug_trace::{DebugTrace, TraceEntry, TraceStage, Tracer};
pub use rng::{MatchRng, MatchSeed};

use aggregation::TeamProfile;
use chance_allocation::{allocate, schedule_chances};
use collision::apply_collision;
use disruption::{defender_guessed_right, resolve_disruption};
use narrator::{narrate_disruption, narrate_forfeit, narrate_shot, ShotCall};
use shooting::resolve_shot;

use crate::models::events::{MatchEvent, PlayerRef};
use crate::models::match_result::{MatchResult, MatchStatistics};
use crate::models::team::{Team, TeamSide};

/// Match engine holding its tuning. Cheap to clone, stateless between calls.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    config: EngineConfig,
}

impl MatchEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Simulate one match.
    ///
    /// # Panics
    ///
    /// If either roster is empty. Short (non-empty) rosters forfeit instead.
    pub fn simulate(&self, home: &Team, away: &Team, seed: &MatchSeed, debug: bool) -> MatchResult {
        assert!(!home.players.is_empty(), "home roster must not be empty");
        assert!(!away.players.is_empty(), "away roster must not be empty");

        let cfg = &self.config;
        let mut tracer = Tracer::new(debug);

        for (side, team) in [(TeamSide::Home, home), (TeamSide::Away, away)] {
            let viable = team.players.len() >= cfg.min_roster_size;
            tracer.record(|| {
                TraceEntry::new(TraceStage::Roster, team.name.as_str())
                    .team(side)
                    .input("players", team.players.len() as f64)
                    .threshold(cfg.min_roster_size as f64)
                    .outcome(if viable { "viable" } else { "forfeit" })
            });
            if !viable {
                return self.forfeit(side, team, tracer);
            }
        }

        let mut rng = MatchRng::from_seed(seed);

        // Ratings: strength, then collision on the evaluated ratings
        let mut home_ratings =
            strength::evaluate_team(home, TeamSide::Home, &cfg.rating, &mut tracer);
        let mut away_ratings =
            strength::evaluate_team(away, TeamSide::Away, &cfg.rating, &mut tracer);
        let collision = apply_collision(
            home.tactic,
            away.tactic,
            &mut home_ratings,
            &mut away_ratings,
            &cfg.rating,
            &mut tracer,
        );

        let home_profile = TeamProfile::build(
            home,
            TeamSide::Home,
            home_ratings,
            &cfg.rating,
            &cfg.resolution,
            &mut tracer,
        );
        let away_profile = TeamProfile::build(
            away,
            TeamSide::Away,
            away_ratings,
            &cfg.rating,
            &cfg.resolution,
            &mut tracer,
        );

        let home_guessed_right = defender_guessed_right(home, away, &cfg.resolution);
        let away_guessed_right = defender_guessed_right(away, home, &cfg.resolution);

        let allocation = allocate(
            &home_profile.power,
            &away_profile.power,
            home_guessed_right,
            away_guessed_right,
            &cfg.chance,
            &mut rng,
            &mut tracer,
        );

        log::debug!(
            "{} vs {}: AP/DP {:.1}/{:.1} v {:.1}/{:.1}, budget {:.2}, chances {}-{}",
            home.name,
            away.name,
            home_profile.power.attack,
            home_profile.power.defense,
            away_profile.power.attack,
            away_profile.power.defense,
            allocation.xg_budget,
            allocation.home_chances,
            allocation.away_chances
        );

        let mut statistics = MatchStatistics {
            xg_budget: allocation.xg_budget as f32,
            collision_winner: collision.winner,
            ..Default::default()
        };
        for (side, profile, guessed_right) in [
            (TeamSide::Home, &home_profile, home_guessed_right),
            (TeamSide::Away, &away_profile, away_guessed_right),
        ] {
            let stats = statistics.side_mut(side);
            stats.attack_power = profile.power.attack as f32;
            stats.defense_power = profile.power.defense as f32;
            stats.allocated_xg = allocation.xg(side) as f32;
            stats.setup_correct = guessed_right;
        }

        let mut chances = schedule_chances(&allocation, &cfg.chance, &mut rng, &mut tracer);
        let mut events = Vec::with_capacity(chances.len());
        let mut home_xg = 0.0_f64;
        let mut away_xg = 0.0_f64;

        for chance in chances.iter_mut() {
            let side = chance.side;
            let (attacker, defender, guessed_right) = match side {
                TeamSide::Home => (&home_profile, &away_profile, away_guessed_right),
                TeamSide::Away => (&away_profile, &home_profile, home_guessed_right),
            };

            {
                let stats = statistics.side_mut(side);
                stats.chances += 1;
                if chance.set_piece.is_set_piece() {
                    stats.set_pieces += 1;
                }
            }

            let disruption = resolve_disruption(
                chance,
                attacker,
                defender,
                guessed_right,
                &cfg.resolution,
                &mut rng,
                &mut tracer,
            );

            if disruption.disrupted {
                let stopper = disruption.defender.map(|i| defender.player(i));
                let text = narrate_disruption(
                    chance.set_piece,
                    &attacker.team.name,
                    stopper.map(|p| p.name.as_str()),
                );
                log::trace!("{}' {} chance disrupted", chance.minute, side);
                events.push(MatchEvent::chance(
                    chance.minute,
                    side,
                    text,
                    stopper.map(PlayerRef::from),
                    chance.set_piece,
                ));
                statistics.side_mut(side).disrupted += 1;
                continue;
            }

            let shot = resolve_shot(
                chance.minute,
                chance.set_piece,
                attacker,
                defender,
                guessed_right,
                &cfg.resolution,
                &mut rng,
                &mut tracer,
            );

            match side {
                TeamSide::Home => home_xg += shot.xg,
                TeamSide::Away => away_xg += shot.xg,
            }

            let shooter = attacker.player(shot.shooter);
            let assist = shot.assist.map(|i| attacker.player(i));
            let keeper = defender.keeper_player();
            let text = narrate_shot(&ShotCall {
                result: shot.result,
                set_piece: chance.set_piece,
                long_shot: shot.long_shot,
                shooter: &shooter.name,
                assist: assist.map(|p| p.name.as_str()),
                keeper: keeper.map(|p| p.name.as_str()),
            });
            log::trace!(
                "{}' {} shot by {} (xG {:.3}): {:?}",
                chance.minute,
                side,
                shooter.name,
                shot.xg,
                shot.result
            );

            {
                let stats = statistics.side_mut(side);
                stats.shots += 1;
                if shot.result.on_target() {
                    stats.shots_on_target += 1;
                }
                if shot.result == shooting::ShotResult::Goal {
                    stats.goals += 1;
                }
            }

            // Keeper is only credited on a save
            let credited_keeper = match shot.result {
                shooting::ShotResult::Save => keeper.map(PlayerRef::from),
                _ => None,
            };
            events.push(MatchEvent::shot(
                chance.minute,
                shot.result.event_type(),
                side,
                text,
                PlayerRef::from(shooter),
                assist.map(PlayerRef::from),
                credited_keeper,
                shot.xg as f32,
                chance.set_piece,
                shot.long_shot,
            ));
        }

        // Chances are scheduled in minute order already; keep the guarantee local
        events.sort_by_key(|e| e.minute);

        let home_score = statistics.home.goals;
        let away_score = statistics.away.goals;
        log::debug!(
            "{} {}-{} {} (xG {:.2}-{:.2}, {} rng draws)",
            home.name,
            home_score,
            away_score,
            away.name,
            home_xg,
            away_xg,
            rng.draws()
        );

        MatchResult {
            home_score,
            away_score,
            home_xg: home_xg as f32,
            away_xg: away_xg as f32,
            events,
            statistics,
            forfeited: None,
            debug: tracer.finish(),
        }
    }

    /// Short-circuit for a side below the minimum roster size
    fn forfeit(&self, side: TeamSide, team: &Team, tracer: Tracer) -> MatchResult {
        let goals = self.config.forfeit_goals;
        log::info!(
            "{} forfeits with {} players ({} required)",
            team.name,
            team.players.len(),
            self.config.min_roster_size
        );

        let text = narrate_forfeit(&team.name, team.players.len(), self.config.min_roster_size);
        let mut statistics = MatchStatistics::default();
        statistics.side_mut(side.opponent()).goals = goals;

        let (home_score, away_score) = match side {
            TeamSide::Home => (0, goals),
            TeamSide::Away => (goals, 0),
        };

        MatchResult {
            home_score,
            away_score,
            home_xg: 0.0,
            away_xg: 0.0,
            events: vec![MatchEvent::forfeit(side, text)],
            statistics,
            forfeited: Some(side),
            debug: tracer.finish(),
        }
    }
}

/// Simulate with the default engine configuration
pub fn simulate(home: &Team, away: &Team, seed: impl Into<MatchSeed>, debug: bool) -> MatchResult {
    MatchEngine::default().simulate(home, away, &seed.into(), debug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::events::{EventType, SetPiece};
    use crate::models::player::{Player, Position};
    use crate::tactics::{DefensiveSetup, Tactic};

    const ELEVEN: [Position; 11] = [
        Position::GK,
        Position::LB,
        Position::CB,
        Position::CB,
        Position::RB,
        Position::CDM,
        Position::CM,
        Position::CAM,
        Position::LW,
        Position::RW,
        Position::ST,
    ];

    fn squad(name: &str, power: f32, size: usize, tactic: Tactic) -> Team {
        let players = ELEVEN
            .iter()
            .cycle()
            .take(size)
            .enumerate()
            .map(|(i, pos)| Player::new(format!("{name}-{i}"), format!("{name} {i}"), power, *pos))
            .collect();
        Team::new(name, name, tactic, DefensiveSetup::ManMarking, players)
    }

    #[test]
    fn test_same_seed_same_result() {
        let home = squad("Home", 50.0, 11, Tactic::TikiTaka);
        let away = squad("Away", 50.0, 11, Tactic::TikiTaka);
        let a = simulate(&home, &away, "match-1", false);
        let b = simulate(&home, &away, "match-1", false);
        assert_eq!(a, b);
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_score_matches_goal_events() {
        let home = squad("Home", 60.0, 11, Tactic::Gegenpress);
        let away = squad("Away", 55.0, 11, Tactic::LongBall);
        for seed in 0..40u64 {
            let result = simulate(&home, &away, seed, false);
            assert_eq!(result.home_score as usize, result.goal_events(TeamSide::Home));
            assert_eq!(result.away_score as usize, result.goal_events(TeamSide::Away));
            assert!(result.events.windows(2).all(|w| w[0].minute <= w[1].minute));
            assert!(result.forfeited.is_none());
        }
    }

    #[test]
    fn test_debug_trace_is_observational() {
        let home = squad("Home", 50.0, 11, Tactic::CounterAttack);
        let away = squad("Away", 50.0, 11, Tactic::Gegenpress);
        let plain = simulate(&home, &away, "trace", false);
        let mut traced = simulate(&home, &away, "trace", true);
        let trace = traced.debug.take().unwrap();
        assert!(plain.debug.is_none());
        assert_eq!(plain, traced);
        assert_eq!(trace.stage(TraceStage::Strength).count(), 22);
        assert_eq!(trace.stage(TraceStage::Collision).count(), 1);
        assert_eq!(trace.stage(TraceStage::Aggregation).count(), 2);
        let chances = (plain.statistics.home.chances + plain.statistics.away.chances) as usize;
        assert_eq!(trace.stage(TraceStage::Disruption).count(), chances);
        assert_eq!(trace.stage(TraceStage::Schedule).count(), chances);
        assert_eq!(plain.statistics.collision_winner, Some(TeamSide::Home));

        let shots: Vec<&MatchEvent> = plain.events.iter().filter(|e| e.xg.is_some()).collect();
        let goals = shots.iter().filter(|e| e.is_goal).count();
        let from_distance = shots
            .iter()
            .filter(|e| matches!(e.set_piece, None | Some(SetPiece::FreeKick)))
            .count();
        let assistable =
            shots.iter().filter(|e| matches!(e.set_piece, None | Some(SetPiece::Corner))).count();
        assert_eq!(trace.stage(TraceStage::Shot).count(), shots.len());
        assert_eq!(trace.stage(TraceStage::Save).count(), shots.len() - goals);
        assert_eq!(trace.stage(TraceStage::LongShot).count(), from_distance);
        assert_eq!(trace.stage(TraceStage::Assist).count(), assistable);
        assert!(trace
            .entries
            .iter()
            .filter(|e| {
                matches!(
                    e.stage,
                    TraceStage::Schedule
                        | TraceStage::LongShot
                        | TraceStage::Assist
                        | TraceStage::Shot
                        | TraceStage::Save
                )
            })
            .all(|e| e.minute.is_some() && e.roll.is_some() && e.threshold.is_some()));
    }

    #[test]
    fn test_long_shots_leave_a_trace() {
        let home = squad("Home", 60.0, 11, Tactic::LongBall);
        let away = squad("Away", 55.0, 11, Tactic::TikiTaka);
        for seed in 0..30u64 {
            let result = simulate(&home, &away, seed, true);
            let trace = result.debug.as_ref().unwrap();
            let taken =
                trace.stage(TraceStage::LongShot).filter(|e| e.outcome == "long shot").count();
            assert_eq!(taken, result.events.iter().filter(|e| e.long_shot).count());
        }
    }

    #[test]
    fn test_correct_setup_lowers_opponent_shot_quality() {
        // Four attacking positions each, so zonal is the correct read
        let mut home = squad("Home", 60.0, 11, Tactic::TikiTaka);
        home.defensive_setup = DefensiveSetup::Zonal;
        let away = squad("Away", 60.0, 11, Tactic::TikiTaka);
        let cfg = EngineConfig::default();

        let mut checked = 0;
        for seed in 0..20u64 {
            let result = simulate(&home, &away, seed, true);
            assert!(result.statistics.home.setup_correct);
            assert!(!result.statistics.away.setup_correct);
            let trace = result.debug.unwrap();
            for shot in trace.stage(TraceStage::Shot) {
                let expected = match shot.team {
                    Some(TeamSide::Away) => cfg.resolution.setup_quality_factor,
                    _ => 1.0,
                };
                assert_eq!(shot.value("setup_factor"), Some(expected));
                let xg = shooting::shot_xg(
                    shot.value("base_xg").unwrap(),
                    shot.value("shooter_power").unwrap(),
                    shot.value("keeper_power").unwrap(),
                    shot.value("modifier").unwrap(),
                    &cfg.resolution,
                );
                assert_eq!(shot.threshold, Some(xg));
                checked += 1;
            }
        }
        assert!(checked > 0);
    }

    #[test]
    fn test_short_home_roster_forfeits() {
        let home = squad("Home", 50.0, 6, Tactic::TikiTaka);
        let away = squad("Away", 50.0, 11, Tactic::TikiTaka);
        let result = simulate(&home, &away, 12345u64, true);
        assert_eq!((result.home_score, result.away_score), (0, 3));
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].event_type, EventType::Forfeit);
        assert_eq!(result.forfeited, Some(TeamSide::Home));
        assert_eq!(result.statistics.home.chances + result.statistics.away.chances, 0);
        assert_eq!(result.debug.unwrap().stage(TraceStage::Shot).count(), 0);
    }

    #[test]
    fn test_short_away_roster_forfeits() {
        let home = squad("Home", 50.0, 11, Tactic::TikiTaka);
        let away = squad("Away", 50.0, 6, Tactic::TikiTaka);
        let result = simulate(&home, &away, "any", false);
        assert_eq!((result.home_score, result.away_score), (3, 0));
        assert_eq!(result.forfeited, Some(TeamSide::Away));
    }

    #[test]
    #[should_panic(expected = "away roster must not be empty")]
    fn test_empty_roster_panics() {
        let home = squad("Home", 50.0, 11, Tactic::TikiTaka);
        let away = Team::new("a", "Away", Tactic::TikiTaka, DefensiveSetup::Zonal, Vec::new());
        simulate(&home, &away, 1u64, false);
    }

    #[test]
    fn test_custom_config_is_used() {
        let mut config = EngineConfig::default();
        config.min_roster_size = 12;
        config.forfeit_goals = 5;
        let engine = MatchEngine::new(config);
        let home = squad("Home", 50.0, 11, Tactic::TikiTaka);
        let away = squad("Away", 50.0, 11, Tactic::TikiTaka);
        let result = engine.simulate(&home, &away, &MatchSeed::from("cfg"), false);
        assert_eq!((result.home_score, result.away_score), (0, 5));
    }

    #[test]
    fn test_goalkeeper_less_roster_still_plays() {
        let home = squad("Home", 50.0, 11, Tactic::TikiTaka);
        let mut away = squad("Away", 50.0, 11, Tactic::TikiTaka);
        away.players[0].position = Position::CB;
        let result = simulate(&home, &away, 8u64, false);
        assert!(result.forfeited.is_none());
        assert!(result.statistics.home.chances + result.statistics.away.chances >= 4);
    }
}
