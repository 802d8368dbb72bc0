//! Single-input interaction loop.
//!
//! `select` is called once per user input. With no source chosen the input
//! picks a source; with a source chosen it either deselects, executes a move,
//! or is refused. Every call returns either a new state with the event that
//! produced it, or the reason the input was refused.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::candidate::MoveCandidate;
use crate::error::Rejection;
use crate::execute::execute_move;
use crate::game::{GameState, Phase};
use crate::rules::{Reach, destinations, has_any_legal_move, ready_to_end};
use crate::turn::{TurnOutcome, after_move, calc_moves_made, change_turn};
use crate::types::{Color, Location, NUM_POINTS};

/// A move that was carried out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub color: Color,
    pub from: Location,
    pub to: Location,
    pub dice: Vec<u8>,
    /// Points on which an opponent checker was sent to the bar.
    pub hits: Vec<u8>,
    pub outcome: TurnOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum Event {
    SourceSelected { from: Location, targets: Vec<Location> },
    Deselected,
    Moved(MoveRecord),
    /// The active player had dice but no legal move; the turn went to the opponent.
    ForcedPass { player: Color },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub event: Event,
}

#[instrument(level = "debug", skip(state), fields(active = ?state.turn.active))]
pub fn select(state: &GameState, at: Location) -> Result<Transition, Rejection> {
    let result = evaluate(state, at);
    if let Err(reason) = &result {
        debug!(?at, %reason, "selection rejected");
    }
    result
}

fn evaluate(state: &GameState, at: Location) -> Result<Transition, Rejection> {
    if !state.is_active() {
        return Err(Rejection::GameNotActive);
    }
    if !state.turn.rolled {
        return Err(Rejection::DiceNotRolled);
    }
    if !has_any_legal_move(&state.board, &state.turn) {
        return Ok(forced_pass(state));
    }

    match state.candidate.from {
        Some(from) => finish_move(state, from, at),
        None => choose_source(state, at),
    }
}

fn forced_pass(state: &GameState) -> Transition {
    let player = state.turn.active;
    info!(?player, remaining = ?state.turn.remaining, "no legal move, passing");
    Transition {
        state: GameState {
            board: state.board,
            turn: change_turn(&state.board, &state.turn),
            candidate: MoveCandidate::idle(),
            phase: state.phase,
        },
        event: Event::ForcedPass { player },
    }
}

fn choose_source(state: &GameState, at: Location) -> Result<Transition, Rejection> {
    let board = &state.board;
    let color = state.turn.active;

    match at {
        Location::Bar if board.bar(color) == 0 => return Err(Rejection::BarEmpty),
        Location::Off if !ready_to_end(board, color) => return Err(Rejection::NotInHomeQuadrant),
        Location::Point(point) => {
            if point as usize >= NUM_POINTS {
                return Err(Rejection::OutOfRange { point });
            }
            let content = board.point(point as usize);
            match content.owner() {
                None => return Err(Rejection::SourceEmpty { point }),
                Some(owner) if owner != color && content.count() >= 2 => {
                    return Err(Rejection::PointBlocked { point });
                }
                Some(owner) if owner != color => return Err(Rejection::NotOwnChecker { point }),
                Some(_) => {}
            }
        }
        _ => {}
    }

    if board.bar(color) > 0 && at != Location::Bar {
        return Err(Rejection::MustPlayFromBar);
    }

    let reaches = destinations(board, &state.turn, at);
    if reaches.is_empty() {
        return Err(Rejection::NoLegalDestinations { from: at });
    }

    let candidate = MoveCandidate::chosen(at, reaches);
    let targets = candidate.targets();
    debug!(from = ?at, ?targets, "source selected");

    Ok(Transition {
        state: GameState {
            candidate,
            ..state.clone()
        },
        event: Event::SourceSelected { from: at, targets },
    })
}

fn finish_move(state: &GameState, from: Location, at: Location) -> Result<Transition, Rejection> {
    if at == from {
        return Ok(Transition {
            state: GameState {
                candidate: MoveCandidate::idle(),
                ..state.clone()
            },
            event: Event::Deselected,
        });
    }

    // Recomputed rather than read from the candidate, which may come from a snapshot.
    let reach = destinations(&state.board, &state.turn, from)
        .into_iter()
        .find(|reach| reach.to == at)
        .ok_or(Rejection::UnreachableDestination { from, to: at })?;

    // Choosing a point after selecting the off area bears that point's checker off.
    let (source, reach) = match from {
        Location::Off => (
            at,
            Reach {
                to: Location::Off,
                dice: reach.dice,
            },
        ),
        _ => (from, reach),
    };

    let color = state.turn.active;
    let execution = execute_move(&state.board, color, source, &reach);
    let turn = calc_moves_made(&state.turn, &reach.dice);
    let (turn, outcome) = after_move(&execution.board, &turn);
    let phase = match outcome {
        TurnOutcome::GameOver(result) => Phase::Finished(result),
        _ => Phase::Active,
    };

    info!(
        player = ?color,
        from = ?source,
        to = ?reach.to,
        dice = ?reach.dice,
        hits = ?execution.hits,
        ?outcome,
        "move executed"
    );

    let record = MoveRecord {
        color,
        from: source,
        to: reach.to,
        dice: reach.dice,
        hits: execution.hits,
        outcome,
    };

    Ok(Transition {
        state: GameState {
            board: execution.board,
            turn,
            candidate: MoveCandidate::idle(),
            phase,
        },
        event: Event::Moved(record),
    })
}
