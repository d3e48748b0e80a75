pub mod events;
pub mod match_result;
pub mod player;
pub mod playstyle;
pub mod team;

pub use events::{EventType, MatchEvent, PlayerRef, SetPiece};
pub use match_result::{MatchResult, MatchStatistics, TeamStatistics};
pub use player::{Player, Position};
pub use playstyle::{
    Playstyle, PlaystyleError, PlaystyleLevel, PlaystyleSet, PlaystyleTier, MAX_PLAYSTYLES,
};
pub use team::{Team, TeamSide, MIN_ROSTER_SIZE};
