//! Event Narrator
//!
//! Pure text templates for the match timeline. No randomness; the same
//! inputs always produce the same line.

use super::shooting::ShotResult;
use crate::models::events::SetPiece;

/// Everything needed to describe a resolved shot
#[derive(Debug, Clone, Copy)]
pub struct ShotCall<'a> {
    pub result: ShotResult,
    pub set_piece: SetPiece,
    pub long_shot: bool,
    pub shooter: &'a str,
    pub assist: Option<&'a str>,
    pub keeper: Option<&'a str>,
}

pub fn narrate_shot(call: &ShotCall) -> String {
    match call.result {
        ShotResult::Goal => narrate_goal(call),
        ShotResult::Save => narrate_save(call),
        ShotResult::OffTarget => narrate_miss(call),
    }
}

fn narrate_goal(call: &ShotCall) -> String {
    let shooter = call.shooter;
    match (call.set_piece, call.long_shot) {
        (SetPiece::Penalty, _) => format!("GOAL! {} converts the penalty.", shooter),
        (SetPiece::FreeKick, true) => {
            format!("GOAL! {} curls a free kick into the top corner from distance.", shooter)
        }
        (SetPiece::FreeKick, false) => format!("GOAL! {} scores direct from a free kick.", shooter),
        (SetPiece::Corner, _) => match call.assist {
            Some(a) => format!("GOAL! {} heads home from a corner delivered by {}.", shooter, a),
            None => format!("GOAL! {} heads home from a corner.", shooter),
        },
        (SetPiece::None, true) => match call.assist {
            Some(a) => {
                format!("GOAL! {} lashes one in from distance after {} lays it off.", shooter, a)
            }
            None => format!("GOAL! {} lashes one in from distance.", shooter),
        },
        (SetPiece::None, false) => match call.assist {
            Some(a) => format!("GOAL! {} finishes after a pass from {}.", shooter, a),
            None => format!("GOAL! {} finishes.", shooter),
        },
    }
}

fn narrate_save(call: &ShotCall) -> String {
    let keeper = call.keeper.unwrap_or("The goalkeeper");
    let shooter = call.shooter;
    match (call.set_piece, call.long_shot) {
        (SetPiece::Penalty, _) => format!("{} saves the penalty from {}!", keeper, shooter),
        (SetPiece::FreeKick, true) => {
            format!("{} claws away a long-range free kick from {}.", keeper, shooter)
        }
        (SetPiece::FreeKick, false) => {
            format!("{} tips the free kick from {} over the bar.", keeper, shooter)
        }
        (SetPiece::Corner, _) => {
            format!("{} blocks a header from {} at the corner.", keeper, shooter)
        }
        (SetPiece::None, true) => format!("{} saves a long shot from {}.", keeper, shooter),
        (SetPiece::None, false) => format!("{} denies {} at close range.", keeper, shooter),
    }
}

fn narrate_miss(call: &ShotCall) -> String {
    let shooter = call.shooter;
    match (call.set_piece, call.long_shot) {
        (SetPiece::Penalty, _) => format!("{} fires the penalty wide!", shooter),
        (SetPiece::FreeKick, true) => format!("{} sends a long free kick over the bar.", shooter),
        (SetPiece::FreeKick, false) => format!("{} hits the wall with the free kick.", shooter),
        (SetPiece::Corner, _) => format!("{} heads the corner over the bar.", shooter),
        (SetPiece::None, true) => format!("{} tries from distance but it flies wide.", shooter),
        (SetPiece::None, false) => format!("{} drags the shot wide.", shooter),
    }
}

/// Attack broken up before a shot
pub fn narrate_disruption(set_piece: SetPiece, team: &str, defender: Option<&str>) -> String {
    let who = defender.unwrap_or("The defence");
    match set_piece {
        SetPiece::Corner => format!("{} clears the {} corner.", who, team),
        SetPiece::FreeKick => format!("{} blocks the {} free kick.", who, team),
        SetPiece::None | SetPiece::Penalty => format!("{} breaks up the {} attack.", who, team),
    }
}

pub fn narrate_forfeit(team: &str, available: usize, required: usize) -> String {
    format!(
        "{} forfeit the match: only {} players available, {} required.",
        team, available, required
    )
}
