use thiserror::Error;

use crate::models::playstyle::PlaystyleError;

/// Errors raised at the parsing boundaries of the engine (JSON requests,
/// string keys, YAML config). The simulation itself never returns an error:
/// short rosters forfeit and contract violations panic.
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Unknown tactic: {0}")]
    UnknownTactic(String),

    #[error("Unknown defensive setup: {0}")]
    UnknownDefensiveSetup(String),

    #[error("Unknown player position: {0}")]
    UnknownPosition(String),

    #[error("Unknown playstyle: {0}")]
    UnknownPlaystyle(String),

    #[error("Unknown playstyle tier: {0}")]
    UnknownTier(String),

    #[error("Playstyle error: {0}")]
    Playstyle(#[from] PlaystyleError),

    #[error("Invalid seed: {0}")]
    InvalidSeed(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MatchError>;
