pub mod batch;
pub mod json_api;

pub use batch::{simulate_batch, BatchSummary, MatchFixture};
pub use json_api::{
    simulate_match_json, simulate_match_json_with_config, MatchRequest, PlayerData, PlaystyleData,
    SeedData, TeamData,
};
