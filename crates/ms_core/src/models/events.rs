use serde::{Deserialize, Serialize};

use super::player::Player;
use super::team::TeamSide;

/// Timeline entry. Serialized with the camelCase keys of the result contract:
/// `{ minute, type, team, text, isGoal, player?, assist? }` plus optional detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    /// 0..=90
    pub minute: u8,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub team: TeamSide,
    pub text: String,
    pub is_goal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<PlayerRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assist: Option<PlayerRef>,
    /// Goalkeeper (saves) or defender (disrupted chances) on the other side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opponent: Option<PlayerRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xg: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_piece: Option<SetPiece>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub long_shot: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Attack broken up before a shot
    Chance,
    /// Shot off target
    Shot,
    Goal,
    Save,
    /// Roster below the minimum size
    Forfeit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum SetPiece {
    #[default]
    None,
    Corner,
    FreeKick,
    Penalty,
}

impl SetPiece {
    pub fn is_set_piece(&self) -> bool {
        !matches!(self, SetPiece::None)
    }
}

/// Lightweight reference to a player in the event list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerRef {
    pub id: String,
    pub name: String,
}

impl From<&Player> for PlayerRef {
    fn from(player: &Player) -> Self {
        Self { id: player.id.clone(), name: player.name.clone() }
    }
}

impl MatchEvent {
    fn base(minute: u8, event_type: EventType, team: TeamSide, text: String) -> Self {
        Self {
            minute,
            event_type,
            team,
            text,
            is_goal: matches!(event_type, EventType::Goal),
            player: None,
            assist: None,
            opponent: None,
            xg: None,
            set_piece: None,
            long_shot: false,
        }
    }

    /// Disrupted attack. `defender` is credited as the opponent.
    pub fn chance(
        minute: u8,
        team: TeamSide,
        text: String,
        defender: Option<PlayerRef>,
        set_piece: SetPiece,
    ) -> Self {
        Self {
            opponent: defender,
            set_piece: set_piece.is_set_piece().then_some(set_piece),
            ..Self::base(minute, EventType::Chance, team, text)
        }
    }

    /// Resolved shot (goal, save or off target)
    pub fn shot(
        minute: u8,
        event_type: EventType,
        team: TeamSide,
        text: String,
        shooter: PlayerRef,
        assist: Option<PlayerRef>,
        goalkeeper: Option<PlayerRef>,
        xg: f32,
        set_piece: SetPiece,
        long_shot: bool,
    ) -> Self {
        Self {
            player: Some(shooter),
            assist,
            opponent: goalkeeper,
            xg: Some(xg),
            set_piece: set_piece.is_set_piece().then_some(set_piece),
            long_shot,
            ..Self::base(minute, event_type, team, text)
        }
    }

    /// Forfeit notice, attributed to the forfeiting side
    pub fn forfeit(team: TeamSide, text: String) -> Self {
        Self::base(0, EventType::Forfeit, team, text)
    }
}
