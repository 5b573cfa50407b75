//! Turn state machine.
//!
//! ## Entering
//!
//! Every movable piece is at home. The player gets `entry_attempts` rolls
//! to throw a double. A double places pieces on the route and switches the
//! turn to Moving with one bonus roll.
//!
//! ## Moving
//!
//! Each roll becomes two pending single-die moves, used once each on any
//! pieces in any order. Dice with no legal use are forfeited. Using both
//! dice of a double, or capturing with the last move, earns another roll.
//! Too many doubles in a row sends the lead piece to goal and ends the
//! turn.

use smallvec::SmallVec;
use tracing::{debug, instrument};

use super::parques::{MoveReport, Parques, RollReport};
use crate::core::{Action, DiceRoll, GameState, Phase, PieceId, PlayerId};
use crate::events::{BonusReason, GameEvent};
use crate::rules::{
    advance, destinations, entry_index, resolve_move, send_to_goal, DiceInput, Destinations,
    RuleViolation, RulesEngine,
};

impl Parques {
    /// Roll the dice from the state's RNG.
    #[instrument(skip(self, state))]
    pub fn roll(&self, state: &mut GameState, player: PlayerId) -> Result<RollReport, RuleViolation> {
        self.check_can_roll(state, player)?;
        let dice = state.rng.roll_dice();
        Ok(self.resolve_roll(state, player, dice))
    }

    /// Roll with dice supplied by the caller (physical dice, replays, tests).
    #[instrument(skip(self, state))]
    pub fn apply_roll(
        &self,
        state: &mut GameState,
        player: PlayerId,
        dice: DiceRoll,
    ) -> Result<RollReport, RuleViolation> {
        self.check_can_roll(state, player)?;
        if !dice.is_valid() {
            return Err(RuleViolation::InvalidDice(dice));
        }
        Ok(self.resolve_roll(state, player, dice))
    }

    /// Legal destinations for `piece` with the given dice.
    ///
    /// A pure query: it ignores whose turn it is and which dice are pending.
    #[must_use]
    pub fn legal_moves(&self, state: &GameState, piece: PieceId, dice: DiceInput) -> Destinations {
        match state.piece(piece) {
            Some(p) => destinations(self.route(), piece.player, p.position, dice),
            None => Destinations::new(),
        }
    }

    /// Every `(piece, destination)` reachable with a pending die.
    #[must_use]
    pub fn pending_moves(&self, state: &GameState, player: PlayerId) -> Vec<(PieceId, usize)> {
        let Some(owner) = state.player(player) else {
            return vec![];
        };

        let mut moves = Vec::new();
        for (_, value) in state.turn.unused_dice() {
            for piece in owner.movable_pieces() {
                let dests = destinations(self.route(), player, piece.position, DiceInput::Single(value));
                moves.extend(dests.iter().map(|d| (piece.id, d.index)));
            }
        }
        moves
    }

    /// Move `piece` to `destination` using one pending die.
    #[instrument(skip(self, state))]
    pub fn commit_move(
        &self,
        state: &mut GameState,
        player: PlayerId,
        piece: PieceId,
        destination: usize,
    ) -> Result<MoveReport, RuleViolation> {
        self.check_turn(state, player)?;
        if piece.player != player {
            return Err(RuleViolation::NotYourPiece { piece, player });
        }
        let position = state
            .piece(piece)
            .map(|p| p.position)
            .ok_or(RuleViolation::UnknownPiece(piece))?;
        if state.turn.moves_left == 0 {
            return Err(RuleViolation::NoPendingDice);
        }

        let route = self.route();
        let slot = state
            .turn
            .unused_dice()
            .find(|&(_, value)| {
                destinations(route, player, position, DiceInput::Single(value))
                    .iter()
                    .any(|d| d.index == destination)
            })
            .map(|(slot, _)| slot)
            .ok_or(RuleViolation::IllegalMove { piece, destination })?;

        state.turn.use_die(slot);
        state.record_action(player, Action::Move { piece, destination }, None);

        let mut events = Vec::new();
        let outcome = resolve_move(route, state, piece, destination, &mut events);
        debug!(%piece, destination, captured = outcome.captured, "move committed");

        if !state.is_over() {
            if state.turn.moves_left > 0 {
                if !self.has_legal_move(state, player) {
                    self.forfeit(state, player, &mut events);
                }
            } else {
                let doubles = state.turn.last_roll.is_some_and(DiceRoll::is_double);
                let reason = if outcome.captured {
                    Some(BonusReason::Capture)
                } else if doubles {
                    Some(BonusReason::Doubles)
                } else {
                    None
                };

                match reason {
                    Some(reason) => self.bonus_roll(state, player, reason, &mut events),
                    None => self.end_turn(state, &mut events),
                }
            }
        }

        Ok(MoveReport {
            outcome,
            events,
            signals: state.signals(),
        })
    }

    fn check_turn(&self, state: &GameState, player: PlayerId) -> Result<(), RuleViolation> {
        if state.is_over() {
            return Err(RuleViolation::GameOver);
        }
        let current = state.current_player();
        if player != current {
            return Err(RuleViolation::NotYourTurn { player, current });
        }
        Ok(())
    }

    fn check_can_roll(&self, state: &GameState, player: PlayerId) -> Result<(), RuleViolation> {
        self.check_turn(state, player)?;
        if !state.turn.dice_ready() {
            return Err(RuleViolation::DiceNotReady);
        }
        Ok(())
    }

    fn resolve_roll(&self, state: &mut GameState, player: PlayerId, dice: DiceRoll) -> RollReport {
        debug!(%player, %dice, phase = %state.turn.phase, "dice rolled");
        state.record_action(player, Action::Roll, Some(dice));
        state.turn.last_roll = Some(dice);
        state.turn.attempts_left = state.turn.attempts_left.saturating_sub(1);

        let mut events = vec![GameEvent::DiceRolled { player, dice }];
        match state.turn.phase {
            Phase::Entering => self.entering_roll(state, player, dice, &mut events),
            Phase::Moving => self.moving_roll(state, player, dice, &mut events),
        }

        RollReport {
            dice,
            events,
            signals: state.signals(),
        }
    }

    fn entering_roll(
        &self,
        state: &mut GameState,
        player: PlayerId,
        dice: DiceRoll,
        events: &mut Vec<GameEvent>,
    ) {
        if !dice.is_double() {
            if state.turn.attempts_left == 0 {
                debug!(%player, "out of entry attempts");
                self.end_turn(state, events);
            }
            return;
        }

        self.place_from_home(state, player, dice.d1, events);
        if state.is_over() {
            return;
        }

        let turn = &mut state.turn;
        turn.phase = Phase::Moving;
        turn.consecutive_doubles = 1;
        turn.grant_bonus_roll();
        events.push(GameEvent::PhaseChanged {
            player,
            phase: Phase::Moving,
        });
        events.push(GameEvent::BonusRoll {
            player,
            reason: BonusReason::Entered,
        });
    }

    /// Entry placement on a double of `die`.
    ///
    /// Two or more at home: the first goes `die` cells past the start, the
    /// second onto the start. Exactly one at home: it goes onto the start
    /// and the first other piece on the route advances by `die` if it can.
    fn place_from_home(
        &self,
        state: &mut GameState,
        player: PlayerId,
        die: u8,
        events: &mut Vec<GameEvent>,
    ) {
        let route = self.route();
        let Some(owner) = state.player(player) else {
            return;
        };
        let home: SmallVec<[PieceId; 4]> = owner.pieces_at_home().map(|p| p.id).collect();
        let start = route.start_index(player);

        // Entering earns its bonus roll either way; captures are only logged.
        let mut captured = false;
        match home.as_slice() {
            [first, second, ..] => {
                debug!(%player, die, "two pieces enter");
                let entry = entry_index(route, player, die);
                captured |= resolve_move(route, state, *first, entry, events).captured;
                captured |= resolve_move(route, state, *second, start, events).captured;
            }
            [only] => {
                let other = owner
                    .pieces_on_route()
                    .find_map(|p| p.position.route_index().map(|i| (p.id, i)));
                debug!(%player, die, "last piece enters");
                captured |= resolve_move(route, state, *only, start, events).captured;

                let step = other.filter(|_| !state.is_over()).and_then(|(piece, from)| {
                    advance(route, player, from, usize::from(die)).map(|to| (piece, to))
                });
                if let Some((piece, to)) = step {
                    captured |= resolve_move(route, state, piece, to, events).captured;
                }
            }
            [] => {}
        }
        debug!(%player, captured, "pieces entered");
    }

    fn moving_roll(
        &self,
        state: &mut GameState,
        player: PlayerId,
        dice: DiceRoll,
        events: &mut Vec<GameEvent>,
    ) {
        let turn = &mut state.turn;
        if dice.is_double() {
            turn.consecutive_doubles += 1;
        } else {
            turn.consecutive_doubles = 0;
        }

        if turn.consecutive_doubles >= self.config().penalty_doubles {
            self.doubles_penalty(state, player, events);
            if !state.is_over() {
                self.end_turn(state, events);
            }
            return;
        }

        state.turn.set_pending(dice);
        if !self.has_legal_move(state, player) {
            self.forfeit(state, player, events);
        }
    }

    /// Send the lead piece (largest absolute route index, first in piece
    /// order on ties) straight to goal.
    fn doubles_penalty(&self, state: &mut GameState, player: PlayerId, events: &mut Vec<GameEvent>) {
        let lead = state.player(player).and_then(|owner| {
            owner
                .pieces_on_route()
                .filter_map(|p| p.position.route_index().map(|i| (p.id, i)))
                .fold(None, |best: Option<(PieceId, usize)>, (id, index)| match best {
                    Some((_, top)) if top >= index => best,
                    _ => Some((id, index)),
                })
                .map(|(id, _)| id)
        });

        debug!(%player, lead = ?lead, "consecutive doubles penalty");
        state.turn.pending_dice.clear();
        state.turn.moves_left = 0;
        events.push(GameEvent::DoublesPenalty { player, piece: lead });

        if let Some(piece) = lead {
            send_to_goal(state, piece, events);
        }
    }

    fn has_legal_move(&self, state: &GameState, player: PlayerId) -> bool {
        let Some(owner) = state.player(player) else {
            return false;
        };
        state.turn.unused_dice().any(|(_, value)| {
            owner.movable_pieces().any(|piece| {
                !destinations(self.route(), player, piece.position, DiceInput::Single(value)).is_empty()
            })
        })
    }

    /// Drop the remaining dice and pass the turn.
    fn forfeit(&self, state: &mut GameState, player: PlayerId, events: &mut Vec<GameEvent>) {
        let remaining = state.turn.moves_left;
        debug!(%player, remaining, "no legal move, dice forfeited");
        state.turn.pending_dice.clear();
        state.turn.moves_left = 0;
        events.push(GameEvent::MovesForfeited { player, remaining });
        self.end_turn(state, events);
    }

    fn bonus_roll(
        &self,
        state: &mut GameState,
        player: PlayerId,
        reason: BonusReason,
        events: &mut Vec<GameEvent>,
    ) {
        debug!(%player, ?reason, "bonus roll");
        state.turn.grant_bonus_roll();
        events.push(GameEvent::BonusRoll { player, reason });
    }

    fn end_turn(&self, state: &mut GameState, events: &mut Vec<GameEvent>) {
        let next = state.current_player().next(state.player_count());
        state.begin_turn(next, self.config().entry_attempts);
        debug!(player = %next, phase = %state.turn.phase, turn = state.turn_number, "turn changed");
        events.push(GameEvent::TurnChanged {
            player: next,
            phase: state.turn.phase,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;
    use crate::game::ParquesBuilder;

    fn pid(player: u8, index: u8) -> PieceId {
        PieceId::new(PlayerId::new(player), index)
    }

    fn moving_state(game: &Parques, seed: u64) -> GameState {
        let mut state = game.new_game(seed);
        state.piece_mut(pid(0, 0)).unwrap().position = Position::OnRoute(10);
        state.turn.phase = Phase::Moving;
        state.turn.attempts_left = 1;
        state
    }

    #[test]
    fn test_entering_non_double_uses_attempt() {
        let (game, mut state) = ParquesBuilder::new().build(1).unwrap();
        let p0 = PlayerId::new(0);

        let report = game.apply_roll(&mut state, p0, DiceRoll::new(1, 2)).unwrap();
        assert_eq!(report.signals.attempts_left, 2);
        assert!(report.signals.dice_ready);
        assert_eq!(state.current_player(), p0);
    }

    #[test]
    fn test_entering_double_places_two() {
        let (game, mut state) = ParquesBuilder::new().build(1).unwrap();
        let p0 = PlayerId::new(0);

        let report = game.apply_roll(&mut state, p0, DiceRoll::new(3, 3)).unwrap();

        assert_eq!(state.piece(pid(0, 0)).unwrap().position, Position::OnRoute(3));
        assert_eq!(state.piece(pid(0, 1)).unwrap().position, Position::OnRoute(0));
        assert_eq!(state.turn.phase, Phase::Moving);
        assert_eq!(state.turn.attempts_left, 1);
        assert_eq!(state.turn.consecutive_doubles, 1);
        assert!(report.events.contains(&GameEvent::BonusRoll {
            player: p0,
            reason: BonusReason::Entered,
        }));
    }

    #[test]
    fn test_last_home_piece_enters_and_other_advances() {
        let (game, mut state) = ParquesBuilder::new().build(1).unwrap();
        let p0 = PlayerId::new(0);
        state.piece_mut(pid(0, 0)).unwrap().position = Position::Goal;
        state.piece_mut(pid(0, 1)).unwrap().position = Position::Goal;
        state.piece_mut(pid(0, 2)).unwrap().position = Position::OnRoute(20);

        let mut events = Vec::new();
        game.place_from_home(&mut state, p0, 5, &mut events);

        assert_eq!(state.piece(pid(0, 3)).unwrap().position, Position::OnRoute(0));
        assert_eq!(state.piece(pid(0, 2)).unwrap().position, Position::OnRoute(25));
    }

    #[test]
    fn test_last_home_piece_other_overshoot_stays() {
        let (game, mut state) = ParquesBuilder::new().build(1).unwrap();
        let p0 = PlayerId::new(0);
        state.piece_mut(pid(0, 0)).unwrap().position = Position::OnRoute(37);
        state.piece_mut(pid(0, 1)).unwrap().position = Position::Goal;
        state.piece_mut(pid(0, 2)).unwrap().position = Position::Goal;

        let mut events = Vec::new();
        game.place_from_home(&mut state, p0, 6, &mut events);

        assert_eq!(state.piece(pid(0, 3)).unwrap().position, Position::OnRoute(0));
        assert_eq!(state.piece(pid(0, 0)).unwrap().position, Position::OnRoute(37));
    }

    #[test]
    fn test_moving_roll_sets_pending() {
        let (game, _) = ParquesBuilder::new().build(1).unwrap();
        let mut state = moving_state(&game, 1);
        let p0 = PlayerId::new(0);

        let report = game.apply_roll(&mut state, p0, DiceRoll::new(2, 5)).unwrap();

        assert_eq!(report.signals.moves_left, 2);
        assert!(!report.signals.dice_ready);
        assert_eq!(
            game.pending_moves(&state, p0),
            vec![(pid(0, 0), 12), (pid(0, 0), 15)]
        );
    }

    #[test]
    fn test_commit_move_picks_matching_die() {
        let (game, _) = ParquesBuilder::new().build(1).unwrap();
        let mut state = moving_state(&game, 1);
        let p0 = PlayerId::new(0);
        game.apply_roll(&mut state, p0, DiceRoll::new(2, 5)).unwrap();

        game.commit_move(&mut state, p0, pid(0, 0), 15).unwrap();
        assert!(state.turn.pending_dice[1].used);
        assert!(!state.turn.pending_dice[0].used);
        assert_eq!(state.turn.moves_left, 1);

        let report = game.commit_move(&mut state, p0, pid(0, 0), 17).unwrap();
        assert_eq!(state.current_player(), PlayerId::new(1));
        assert!(matches!(report.events.last(), Some(GameEvent::TurnChanged { .. })));
    }

    #[test]
    fn test_commit_move_refusals() {
        let (game, _) = ParquesBuilder::new().build(1).unwrap();
        let mut state = moving_state(&game, 1);
        let p0 = PlayerId::new(0);

        assert_eq!(
            game.commit_move(&mut state, p0, pid(0, 0), 12),
            Err(RuleViolation::NoPendingDice)
        );

        game.apply_roll(&mut state, p0, DiceRoll::new(2, 5)).unwrap();
        let before = state.clone();

        assert_eq!(
            game.commit_move(&mut state, p0, pid(0, 0), 13),
            Err(RuleViolation::IllegalMove { piece: pid(0, 0), destination: 13 })
        );
        assert_eq!(
            game.commit_move(&mut state, p0, pid(1, 0), 12),
            Err(RuleViolation::NotYourPiece { piece: pid(1, 0), player: p0 })
        );
        assert_eq!(
            game.commit_move(&mut state, p0, pid(0, 9), 12),
            Err(RuleViolation::UnknownPiece(pid(0, 9)))
        );
        assert_eq!(
            game.commit_move(&mut state, PlayerId::new(2), pid(2, 0), 22),
            Err(RuleViolation::NotYourTurn {
                player: PlayerId::new(2),
                current: p0,
            })
        );
        assert_eq!(
            game.apply_roll(&mut state, p0, DiceRoll::new(1, 1)).unwrap_err(),
            RuleViolation::DiceNotReady
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_invalid_dice_refused() {
        let (game, mut state) = ParquesBuilder::new().build(1).unwrap();
        let before = state.clone();

        let err = game
            .apply_roll(&mut state, PlayerId::new(0), DiceRoll::new(0, 7))
            .unwrap_err();
        assert_eq!(err, RuleViolation::InvalidDice(DiceRoll::new(0, 7)));
        assert_eq!(state, before);
    }

    #[test]
    fn test_doubles_used_grant_bonus() {
        let (game, _) = ParquesBuilder::new().build(1).unwrap();
        let mut state = moving_state(&game, 1);
        let p0 = PlayerId::new(0);
        game.apply_roll(&mut state, p0, DiceRoll::new(4, 4)).unwrap();

        game.commit_move(&mut state, p0, pid(0, 0), 14).unwrap();
        let report = game.commit_move(&mut state, p0, pid(0, 0), 18).unwrap();

        assert!(report.events.contains(&GameEvent::BonusRoll {
            player: p0,
            reason: BonusReason::Doubles,
        }));
        assert_eq!(state.current_player(), p0);
        assert!(report.signals.dice_ready);
        assert_eq!(state.turn.consecutive_doubles, 1);
    }

    #[test]
    fn test_forfeit_remaining_die() {
        let (game, _) = ParquesBuilder::new().build(1).unwrap();
        let mut state = moving_state(&game, 1);
        let p0 = PlayerId::new(0);
        state.piece_mut(pid(0, 0)).unwrap().position = Position::OnRoute(33);
        game.apply_roll(&mut state, p0, DiceRoll::new(6, 5)).unwrap();

        // 33 + 6 = 39 is the goal; nothing left can use the 5.
        let report = game.commit_move(&mut state, p0, pid(0, 0), 39).unwrap();

        assert!(report.outcome.reached_goal);
        assert!(report.events.contains(&GameEvent::MovesForfeited {
            player: p0,
            remaining: 1,
        }));
        assert_eq!(state.current_player(), PlayerId::new(1));
    }

    #[test]
    fn test_roll_with_no_legal_move_forfeits() {
        let (game, _) = ParquesBuilder::new().build(1).unwrap();
        let mut state = moving_state(&game, 1);
        let p0 = PlayerId::new(0);
        state.piece_mut(pid(0, 0)).unwrap().position = Position::OnRoute(38);

        let report = game.apply_roll(&mut state, p0, DiceRoll::new(3, 4)).unwrap();

        assert!(report.events.contains(&GameEvent::MovesForfeited {
            player: p0,
            remaining: 2,
        }));
        assert_eq!(state.current_player(), PlayerId::new(1));
    }

    #[test]
    fn test_triple_doubles_penalty() {
        let (game, _) = ParquesBuilder::new().build(1).unwrap();
        let mut state = moving_state(&game, 1);
        let p0 = PlayerId::new(0);
        state.piece_mut(pid(0, 1)).unwrap().position = Position::OnRoute(25);
        state.turn.consecutive_doubles = 2;

        let report = game.apply_roll(&mut state, p0, DiceRoll::new(2, 2)).unwrap();

        assert_eq!(state.piece(pid(0, 1)).unwrap().position, Position::Goal);
        assert_eq!(state.piece(pid(0, 0)).unwrap().position, Position::OnRoute(10));
        assert!(report.events.contains(&GameEvent::DoublesPenalty {
            player: p0,
            piece: Some(pid(0, 1)),
        }));
        assert_eq!(state.current_player(), PlayerId::new(1));
    }

    #[test]
    fn test_penalty_without_route_piece() {
        let (game, _) = ParquesBuilder::new().build(1).unwrap();
        let mut state = moving_state(&game, 1);
        let p0 = PlayerId::new(0);
        state.piece_mut(pid(0, 0)).unwrap().position = Position::Goal;
        state.turn.consecutive_doubles = 2;
        let before: Vec<_> = state.pieces().map(|p| p.position).collect();

        let report = game.apply_roll(&mut state, p0, DiceRoll::new(3, 3)).unwrap();

        assert!(report.events.contains(&GameEvent::DoublesPenalty { player: p0, piece: None }));
        assert!(!report.events.iter().any(|e| matches!(e, GameEvent::ReachedGoal { .. })));
        assert_eq!(state.pieces().map(|p| p.position).collect::<Vec<_>>(), before);
        assert_eq!(state.winner, None);
        assert_eq!(state.current_player(), PlayerId::new(1));
        assert!(matches!(report.events.last(), Some(GameEvent::TurnChanged { .. })));
    }

    #[test]
    fn test_penalty_tie_goes_to_first_piece() {
        let (game, _) = ParquesBuilder::new().build(1).unwrap();
        let mut state = moving_state(&game, 1);
        let p0 = PlayerId::new(0);
        state.piece_mut(pid(0, 0)).unwrap().position = Position::OnRoute(20);
        state.piece_mut(pid(0, 2)).unwrap().position = Position::OnRoute(20);

        let mut events = Vec::new();
        game.doubles_penalty(&mut state, p0, &mut events);

        assert_eq!(state.piece(pid(0, 0)).unwrap().position, Position::Goal);
        assert_eq!(state.piece(pid(0, 2)).unwrap().position, Position::OnRoute(20));
    }

    #[test]
    fn test_non_double_resets_consecutive() {
        let (game, _) = ParquesBuilder::new().build(1).unwrap();
        let mut state = moving_state(&game, 1);
        state.turn.consecutive_doubles = 2;

        game.apply_roll(&mut state, PlayerId::new(0), DiceRoll::new(1, 3)).unwrap();
        assert_eq!(state.turn.consecutive_doubles, 0);
    }

    #[test]
    fn test_rng_roll_records_dice() {
        let (game, mut state) = ParquesBuilder::new().build(99).unwrap();
        let p0 = PlayerId::new(0);

        let report = game.roll(&mut state, p0).unwrap();
        let record = state.history.front().unwrap();

        assert_eq!(record.action, Action::Roll);
        assert_eq!(record.dice, Some(report.dice));
        assert!(report.dice.is_valid());
    }

    #[test]
    fn test_legal_actions_match_pending_moves() {
        let (game, _) = ParquesBuilder::new().build(1).unwrap();
        let mut state = moving_state(&game, 1);
        let p0 = PlayerId::new(0);
        game.apply_roll(&mut state, p0, DiceRoll::new(3, 3)).unwrap();

        // Both dice reach the same cell: one action.
        assert_eq!(
            game.legal_actions(&state, p0),
            vec![Action::Move { piece: pid(0, 0), destination: 13 }]
        );
    }
}
