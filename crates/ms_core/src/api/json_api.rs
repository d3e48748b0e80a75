//! JSON boundary of the engine.
//!
//! Requests use string keys for tactics, setups, positions and playstyles;
//! they are parsed here into the closed enums the engine works with, so an
//! unknown key is reported as a [`MatchError`] instead of reaching
//! `simulate`.
//!
//! ```json
//! {
//!   "seed": "match-1",
//!   "debug": false,
//!   "homeTeam": {
//!     "name": "Rovers", "tactic": "tiki_taka", "defensiveSetup": "zonal",
//!     "players": [
//!       { "name": "Keller", "power": 71, "position": "GK" },
//!       { "name": "Silva", "power": 80, "position": "ST",
//!         "playstyles": [{ "style": "shot_power", "tier": "gold" }] }
//!     ]
//!   },
//!   "awayTeam": { ... }
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::batch::MatchFixture;
use crate::engine::{EngineConfig, MatchEngine, MatchSeed};
use crate::error::{MatchError, Result};
use crate::models::{Player, Playstyle, PlaystyleTier, Position, Team};
use crate::tactics::{DefensiveSetup, Tactic};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub seed: SeedData,
    #[serde(default)]
    pub debug: bool,
    pub home_team: TeamData,
    pub away_team: TeamData,
}

/// Seed as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeedData {
    Integer(u64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamData {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub tactic: String,
    #[serde(default)]
    pub defensive_setup: Option<String>,
    pub players: Vec<PlayerData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerData {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub power: f32,
    pub position: String,
    #[serde(default)]
    pub playstyles: Vec<PlaystyleData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaystyleData {
    pub style: String,
    pub tier: String,
}

impl SeedData {
    pub fn to_seed(&self) -> Result<MatchSeed> {
        match self {
            SeedData::Integer(n) => Ok(MatchSeed::Number(*n)),
            SeedData::Float(f) => MatchSeed::try_from_f64(*f),
            SeedData::Text(s) => Ok(MatchSeed::Text(s.clone())),
        }
    }
}

impl MatchRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate and convert into engine types
    pub fn into_fixture(self) -> Result<MatchFixture> {
        let seed = self.seed.to_seed()?;
        let home = convert_team(self.home_team)?;
        let away = convert_team(self.away_team)?;
        Ok(MatchFixture { home, away, seed, debug: self.debug })
    }
}

/// Simulate a JSON request using the profile selected by `MS_ENGINE_PROFILE`
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    simulate_match_json_with_config(request_json, &EngineConfig::from_env_or_default())
}

pub fn simulate_match_json_with_config(
    request_json: &str,
    config: &EngineConfig,
) -> Result<String> {
    let fixture = MatchRequest::from_json(request_json)?.into_fixture()?;
    let engine = MatchEngine::new(config.clone());
    let result = engine.simulate(&fixture.home, &fixture.away, &fixture.seed, fixture.debug);
    Ok(serde_json::to_string(&result)?)
}

fn convert_team(data: TeamData) -> Result<Team> {
    if data.players.is_empty() {
        return Err(MatchError::InvalidRequest(format!("{} has an empty roster", data.name)));
    }

    let tactic: Tactic = data.tactic.parse()?;
    let defensive_setup: DefensiveSetup = match data.defensive_setup {
        Some(key) => key.parse()?,
        None => Default::default(),
    };
    let players = data
        .players
        .into_iter()
        .enumerate()
        .map(|(i, p)| convert_player(i, p))
        .collect::<Result<Vec<_>>>()?;

    let id = data.id.unwrap_or_else(|| data.name.clone());
    Ok(Team::new(id, data.name, tactic, defensive_setup, players))
}

fn convert_player(index: usize, data: PlayerData) -> Result<Player> {
    if !data.power.is_finite() || data.power < 0.0 {
        return Err(MatchError::InvalidRequest(format!(
            "{} has invalid power {}",
            data.name, data.power
        )));
    }

    let position: Position = data.position.parse()?;
    let id = data.id.unwrap_or_else(|| (index + 1).to_string());
    let mut player = Player::new(id, data.name, data.power, position);
    for ps in data.playstyles {
        let style: Playstyle = ps.style.parse()?;
        let tier: PlaystyleTier = ps.tier.parse()?;
        player = player.with_playstyle(style, tier)?;
    }
    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn team_json(name: &str, size: usize) -> Value {
        let positions = ["GK", "LB", "CB", "CB", "RB", "CDM", "CM", "CAM", "LW", "RW", "ST"];
        let players: Vec<Value> = (0..size)
            .map(|i| {
                json!({ "name": format!("{name} {i}"), "power": 60, "position": positions[i % 11] })
            })
            .collect();
        json!({
            "name": name,
            "tactic": "tiki-taka",
            "defensiveSetup": "zonal",
            "players": players,
        })
    }

    fn request(seed: Value) -> String {
        json!({
            "seed": seed,
            "homeTeam": team_json("Rovers", 11),
            "awayTeam": team_json("United", 11),
        })
        .to_string()
    }

    #[test]
    fn test_request_converts_keys() {
        let mut value: Value = serde_json::from_str(&request(json!("match-1"))).unwrap();
        value["homeTeam"]["players"][10]["playstyles"] =
            json!([{ "style": "shot_power", "tier": "gold" }]);
        let fixture = MatchRequest::from_json(&value.to_string()).unwrap().into_fixture().unwrap();

        assert_eq!(fixture.seed, MatchSeed::Text("match-1".into()));
        assert_eq!(fixture.home.tactic, Tactic::TikiTaka);
        assert_eq!(fixture.home.defensive_setup, DefensiveSetup::Zonal);
        assert_eq!(fixture.home.id, "Rovers");
        let striker = &fixture.home.players[10];
        assert_eq!(striker.position, Position::ST);
        assert_eq!(striker.id, "11");
        assert_eq!(striker.tier(Playstyle::ShotPower), PlaystyleTier::Gold);
    }

    #[test]
    fn test_simulate_json_contract_keys() {
        let out =
            simulate_match_json_with_config(&request(json!(42)), &EngineConfig::default()).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        for key in ["homeScore", "awayScore", "homeXG", "awayXG", "events", "statistics"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert!(value.get("debug").is_none());
        assert!(value.get("forfeited").is_none());
    }

    #[test]
    fn test_same_request_same_output() {
        let config = EngineConfig::default();
        let a = simulate_match_json_with_config(&request(json!("derby")), &config).unwrap();
        let b = simulate_match_json_with_config(&request(json!("derby")), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_tactic_is_error() {
        let mut value: Value = serde_json::from_str(&request(json!(1))).unwrap();
        value["awayTeam"]["tactic"] = json!("catenaccio");
        let err = simulate_match_json_with_config(&value.to_string(), &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, MatchError::UnknownTactic(ref t) if t == "catenaccio"));
    }

    #[test]
    fn test_empty_roster_is_error() {
        let mut value: Value = serde_json::from_str(&request(json!(1))).unwrap();
        value["awayTeam"]["players"] = json!([]);
        let err = simulate_match_json_with_config(&value.to_string(), &EngineConfig::default())
            .unwrap_err();
        assert!(matches!(err, MatchError::InvalidRequest(_)));
    }

    #[test]
    fn test_too_many_playstyles_is_error() {
        let mut value: Value = serde_json::from_str(&request(json!(1))).unwrap();
        value["homeTeam"]["players"][0]["playstyles"] = json!([
            { "style": "leader", "tier": "gold" },
            { "style": "aerial", "tier": "gold" },
            { "style": "engine", "tier": "gold" },
            { "style": "sweeper", "tier": "gold" },
            { "style": "tackler", "tier": "gold" },
            { "style": "dribbler", "tier": "gold" },
        ]);
        let err = MatchRequest::from_json(&value.to_string()).unwrap().into_fixture().unwrap_err();
        assert!(matches!(err, MatchError::Playstyle(_)));
    }

    #[test]
    fn test_short_roster_forfeits_through_json() {
        let value = json!({
            "seed": 7,
            "homeTeam": team_json("Rovers", 11),
            "awayTeam": team_json("United", 6),
        });
        let out =
            simulate_match_json_with_config(&value.to_string(), &EngineConfig::default()).unwrap();
        let result: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(result["homeScore"], json!(3));
        assert_eq!(result["awayScore"], json!(0));
        assert_eq!(result["forfeited"], json!("away"));
        assert_eq!(result["events"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_float_seed_accepted() {
        let fixture =
            MatchRequest::from_json(&request(json!(1.5))).unwrap().into_fixture().unwrap();
        assert_eq!(fixture.seed, MatchSeed::Number(1.5f64.to_bits()));
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(simulate_match_json("{"), Err(MatchError::Json(_))));
    }
}
