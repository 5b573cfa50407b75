//! Capture & goal resolver.
//!
//! Applies a committed move to the state:
//! 1. Unless the destination is a safe cell, every opposing piece standing
//!    on it is sent home. Own pieces may share a cell.
//! 2. The mover is placed on the destination.
//! 3. Landing on the mover's own goal index moves it to `Goal`, and a
//!    player with every piece in goal wins.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::board::Route;
use crate::core::{GameState, PieceId, PlayerId, Position};
use crate::events::GameEvent;

/// What a committed move did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// At least one opposing piece was sent home.
    pub captured: bool,
    /// The mover finished its circuit.
    pub reached_goal: bool,
}

/// Move `mover` to `destination` and resolve captures and goal.
///
/// The caller has already checked legality.
pub fn resolve_move(
    route: &Route,
    state: &mut GameState,
    mover: PieceId,
    destination: usize,
    events: &mut Vec<GameEvent>,
) -> MoveOutcome {
    let Some(from) = state.piece(mover).map(|p| p.position) else {
        return MoveOutcome::default();
    };
    debug_assert!(!from.is_goal(), "{} moved out of goal", mover);

    let captured = if route.is_safe(destination) {
        SmallVec::new()
    } else {
        capture_at(state, mover, destination)
    };

    if let Some(piece) = state.piece_mut(mover) {
        piece.position = Position::OnRoute(destination);
    }

    match from {
        Position::OnRoute(from) => events.push(GameEvent::PieceMoved {
            piece: mover,
            from,
            to: destination,
        }),
        Position::Home | Position::Goal => events.push(GameEvent::PieceEntered {
            piece: mover,
            to: destination,
        }),
    }

    for &piece in &captured {
        debug!(%piece, by = %mover, at = destination, "capture");
        events.push(GameEvent::PieceCaptured {
            piece,
            by: mover,
            at: destination,
        });
    }

    let reached_goal = route.is_goal_index(mover.player, destination);
    if reached_goal {
        send_to_goal(state, mover, events);
    }

    MoveOutcome {
        captured: !captured.is_empty(),
        reached_goal,
    }
}

/// Put a piece straight into goal and check for a win.
pub fn send_to_goal(state: &mut GameState, piece: PieceId, events: &mut Vec<GameEvent>) {
    let Some(target) = state.piece_mut(piece) else {
        return;
    };
    target.position = Position::Goal;

    debug!(%piece, "reached goal");
    events.push(GameEvent::ReachedGoal { piece });
    check_win(state, piece.player, events);
}

/// Send every opposing piece at `index` home; returns them.
fn capture_at(state: &mut GameState, mover: PieceId, index: usize) -> SmallVec<[PieceId; 2]> {
    let mut captured = SmallVec::new();

    for player in state.players.values_mut() {
        if player.id() == mover.player {
            continue;
        }
        for piece in &mut player.pieces {
            if piece.position == Position::OnRoute(index) {
                piece.position = Position::Home;
                captured.push(piece.id);
            }
        }
    }

    captured
}

fn check_win(state: &mut GameState, player: PlayerId, events: &mut Vec<GameEvent>) {
    if state.winner.is_some() {
        return;
    }
    let finished = state.player(player).is_some_and(|p| p.has_finished());
    if finished {
        info!(%player, "wins");
        state.winner = Some(player);
        events.push(GameEvent::Won { player });
    }
}
