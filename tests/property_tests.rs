//! Property tests for the route arithmetic, the movement resolver and the
//! turn state machine.

use parques_engine::rules::{advance, destinations, DiceInput};
use parques_engine::{
    BoardGeometry, Color, DiceRoll, GameState, Parques, ParquesBuilder, Phase, PieceId, PlayerId,
    Position, Route, RulesEngine,
};
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn route_for(size: u8) -> Route {
    Route::build(&BoardGeometry::new(size, 2), &Color::ALL).unwrap()
}

/// Checks that must hold after every accepted action.
fn assert_consistent(game: &Parques, state: &GameState) {
    let len = game.route().len();

    for piece in state.pieces() {
        if let Position::OnRoute(index) = piece.position {
            assert!(index < len, "{} off the route at {}", piece.id, index);
        }
    }

    let unused = state.turn.unused_dice().count();
    assert_eq!(usize::from(state.turn.moves_left), unused);

    if state.is_over() {
        assert!(!state.signals().dice_ready);
        return;
    }

    let current = state.current_player();
    assert!(!game.legal_actions(state, current).is_empty());
    if state.turn.phase == Phase::Entering {
        assert!(state.player(current).unwrap().all_movable_at_home() || state.turn.attempts_left == 0);
    }
}

proptest! {
    /// goal = start + L - 1 and relative/absolute are inverses, for every seat.
    #[test]
    fn route_arithmetic(size in 7u8..24, abs in 0usize..200, seat in 0u8..4) {
        let route = route_for(size);
        let len = route.len();
        let player = PlayerId::new(seat);
        let abs = abs % len;

        prop_assert_eq!(route.goal_index(player), (route.start_index(player) + len - 1) % len);

        let rel = route.relative_position(player, abs);
        prop_assert!(rel < len);
        prop_assert_eq!(route.absolute_index(player, rel), abs);
    }

    /// Overshooting the goal never yields a destination; anything shorter
    /// lands exactly `steps` ahead.
    #[test]
    fn single_die_destination(size in 7u8..24, rel in 0usize..200, value in 1u8..=6, seat in 0u8..4) {
        let route = route_for(size);
        let len = route.len();
        let player = PlayerId::new(seat);
        let rel = rel % len;
        let abs = route.absolute_index(player, rel);

        let dests = destinations(&route, player, Position::OnRoute(abs), DiceInput::Single(value));
        let steps = usize::from(value);

        if rel + steps > len - 1 {
            prop_assert!(dests.is_empty());
            prop_assert_eq!(advance(&route, player, abs, steps), None);
        } else {
            prop_assert_eq!(dests.len(), 1);
            prop_assert_eq!(route.relative_position(player, dests[0].index), rel + steps);
            prop_assert_eq!(
                dests[0].index == route.goal_index(player),
                route.would_reach_goal(player, abs, steps)
            );
        }
    }

    /// Home leaves only on doubles; goal never moves.
    #[test]
    fn home_and_goal_rules(d1 in 1u8..=6, d2 in 1u8..=6, seat in 0u8..4) {
        let route = route_for(15);
        let player = PlayerId::new(seat);
        let roll = DiceRoll::new(d1, d2);

        let from_home = destinations(&route, player, Position::Home, DiceInput::Pair(roll));
        prop_assert_eq!(from_home.len(), usize::from(roll.is_double()));
        prop_assert!(destinations(&route, player, Position::Home, DiceInput::Single(d1)).is_empty());
        prop_assert!(destinations(&route, player, Position::Goal, DiceInput::Pair(roll)).is_empty());
        prop_assert!(destinations(&route, player, Position::Goal, DiceInput::Single(d2)).is_empty());
    }

    /// Random games never break the engine's invariants, and a piece in
    /// goal never leaves it.
    #[test]
    fn random_games_stay_consistent(
        seed in any::<u64>(),
        picker_seed in any::<u64>(),
        players in 2usize..=4,
    ) {
        let (game, mut state) = ParquesBuilder::new().player_count(players).build(seed).unwrap();
        let mut picker = ChaCha8Rng::seed_from_u64(picker_seed);
        let mut in_goal: Vec<PieceId> = Vec::new();

        for _ in 0..600 {
            if game.is_terminal(&state).is_some() {
                break;
            }
            let current = state.current_player();
            let legal = game.legal_actions(&state, current);
            let action = *legal.choose(&mut picker).unwrap();

            prop_assert!(game.apply_action(&mut state, current, &action).is_ok());
            assert_consistent(&game, &state);

            for id in &in_goal {
                prop_assert_eq!(state.piece(*id).unwrap().position, Position::Goal);
            }
            in_goal = state.pieces().filter(|p| p.position.is_goal()).map(|p| p.id).collect();
        }
    }

    /// A non-double with no entry attempts left passes the turn, moving nothing.
    #[test]
    fn last_failed_entry_passes_turn(d1 in 1u8..=6, d2 in 1u8..=6) {
        prop_assume!(d1 != d2);
        let (game, mut state) = ParquesBuilder::new().build(1).unwrap();
        let p0 = PlayerId::new(0);
        state.turn.attempts_left = 1;

        let report = game.apply_roll(&mut state, p0, DiceRoll::new(d1, d2)).unwrap();

        prop_assert!(state.pieces().all(|p| p.position == Position::Home));
        prop_assert_eq!(report.signals.current_player, PlayerId::new(1));
    }
}
