use backgammon::rules::{
    destinations, has_any_legal_move, possible_bear_off_dice, possible_moves_from_point,
    ready_to_end,
};
use backgammon::{
    Board, Color, Event, GameConfig, GameState, Location, Rejection, Turn, TurnOutcome, roll_dice,
    select,
};

fn position(
    layout: &[(usize, Color, u8)],
    white_bar: u8,
    black_bar: u8,
    active: Color,
) -> GameState {
    let board = Board::from_layout(layout, white_bar, black_bar).expect("valid layout");
    GameState::from_parts(board, Turn::new(active))
}

fn play(state: &GameState, from: Location, to: Location) -> GameState {
    let chosen = select(state, from).expect("source accepted").state;
    select(&chosen, to).expect("destination accepted").state
}

fn targets(state: &GameState, from: Location) -> Vec<Location> {
    destinations(&state.board, &state.turn, from)
        .into_iter()
        .map(|reach| reach.to)
        .collect()
}

#[test]
fn opening_six_five_runs_a_back_checker() {
    let state = roll_dice(&GameState::new(&GameConfig::default()), 6, 5).unwrap();

    assert!(targets(&state, Location::Point(23)).contains(&Location::Point(17)));
    assert!(targets(&state, Location::Point(12)).contains(&Location::Point(7)));

    let after_six = play(&state, Location::Point(23), Location::Point(17));
    assert_eq!(state.turn.max_moves(), 2);
    assert_eq!(after_six.turn.max_moves(), 1);
    assert_eq!(after_six.board.count_at(23), 1);
    assert_eq!(after_six.board.count_at(17), 1);

    let after_five = play(&after_six, Location::Point(12), Location::Point(7));
    assert_eq!(after_five.turn.active, Color::Black);
    assert!(!after_five.turn.rolled);
    assert_eq!(after_five.board.count_at(7), 4);
    assert_eq!(after_five.board.count_at(12), 4);
}

#[test]
fn combined_move_uses_both_dice() {
    let state = roll_dice(&GameState::new(&GameConfig::default()), 6, 5).unwrap();
    let chosen = select(&state, Location::Point(23)).unwrap().state;

    let moved = select(&chosen, Location::Point(12)).unwrap();

    let Event::Moved(record) = moved.event else {
        panic!("expected a move");
    };
    assert_eq!(record.dice, vec![6, 5]);
    assert_eq!(record.outcome, TurnOutcome::TurnEnded);
    assert_eq!(moved.state.board.count_at(12), 6);
    assert_eq!(moved.state.turn.active, Color::Black);
}

#[test]
fn bar_checker_must_enter_first() {
    let state = roll_dice(
        &position(
            &[
                (12, Color::White, 5),
                (5, Color::White, 9),
                (18, Color::Black, 5),
                (19, Color::Black, 2),
            ],
            1,
            0,
            Color::White,
        ),
        3,
        4,
    )
    .unwrap();

    for point in 0..24 {
        assert!(possible_moves_from_point(&state.board, &state.turn, point).is_empty());
    }
    assert_eq!(
        select(&state, Location::Point(12)),
        Err(Rejection::MustPlayFromBar)
    );
    // 21 is three pips in, 20 four; neither holds two Black checkers.
    assert_eq!(
        targets(&state, Location::Bar),
        vec![Location::Point(21), Location::Point(20)]
    );

    let entered = play(&state, Location::Bar, Location::Point(21));
    assert_eq!(entered.board.bar(Color::White), 0);
    assert!(select(&entered, Location::Point(12)).is_ok());
}

#[test]
fn blocked_entry_point_is_left_out() {
    let state = roll_dice(
        &position(&[(12, Color::White, 5), (20, Color::Black, 2)], 1, 0, Color::White),
        3,
        4,
    )
    .unwrap();

    assert_eq!(targets(&state, Location::Bar), vec![Location::Point(21)]);
}

#[test]
fn hit_checker_re_enters_for_black() {
    let state = roll_dice(
        &position(
            &[(10, Color::White, 2), (7, Color::Black, 1), (16, Color::Black, 14)],
            0,
            0,
            Color::White,
        ),
        3,
        5,
    )
    .unwrap();
    let hit = play(&state, Location::Point(10), Location::Point(7));
    assert_eq!(hit.board.bar(Color::Black), 1);
    assert_eq!(hit.board.on_board(Color::Black), 14);
    assert_eq!(hit.board.owner_at(7), Some(Color::White));

    let ended = play(&hit, Location::Point(10), Location::Point(5));
    assert_eq!(ended.turn.active, Color::Black);

    let black = roll_dice(&ended, 2, 1).unwrap();
    assert_eq!(
        select(&black, Location::Point(16)),
        Err(Rejection::MustPlayFromBar)
    );
    let entered = play(&black, Location::Bar, Location::Point(1));
    assert_eq!(entered.board.bar(Color::Black), 0);
    assert_eq!(entered.board.owner_at(1), Some(Color::Black));
}

#[test]
fn bearing_off_exact_and_overage() {
    let layout = [
        (0, Color::White, 3),
        (1, Color::White, 3),
        (2, Color::White, 3),
        (3, Color::White, 3),
        (4, Color::White, 3),
        (20, Color::Black, 2),
    ];
    let state = roll_dice(&position(&layout, 0, 0, Color::White), 2, 6).unwrap();

    assert!(ready_to_end(&state.board, Color::White));
    let pairs = possible_bear_off_dice(&state.board, &state.turn);
    assert!(pairs.contains(&(1, 2)));
    // Nothing sits six away, so the 6 serves the farthest checker on index 4.
    assert!(pairs.contains(&(4, 6)));
    assert!(!pairs.contains(&(3, 6)));

    let borne = play(&state, Location::Point(4), Location::Off);
    assert_eq!(borne.board.off(Color::White), 1);
    assert_eq!(borne.turn.remaining, vec![2]);
}

#[test]
fn both_dice_bear_one_checker_off() {
    let layout = [(0, Color::White, 14), (4, Color::White, 1), (20, Color::Black, 2)];
    let state = roll_dice(&position(&layout, 0, 0, Color::White), 2, 3).unwrap();
    let chosen = select(&state, Location::Point(4)).unwrap().state;

    let moved = select(&chosen, Location::Off).unwrap();

    let Event::Moved(record) = moved.event else {
        panic!("expected a move");
    };
    assert_eq!(record.dice, vec![2, 3]);
    assert_eq!(record.to, Location::Off);
    assert_eq!(moved.state.board.off(Color::White), 1);
    assert_eq!(moved.state.board.count_at(4), 0);
    assert_eq!(moved.state.turn.active, Color::Black);
}

#[test]
fn six_point_checker_takes_the_six_exactly() {
    let layout = [(5, Color::White, 1), (1, Color::White, 14), (20, Color::Black, 2)];
    let state = roll_dice(&position(&layout, 0, 0, Color::White), 2, 6).unwrap();

    let pairs = possible_bear_off_dice(&state.board, &state.turn);

    assert_eq!(pairs, vec![(1, 2), (5, 6)]);
}

#[test]
fn off_sentinel_is_refused_until_every_checker_is_home() {
    let state = roll_dice(
        &position(
            &[(0, Color::White, 14), (8, Color::White, 1), (20, Color::Black, 2)],
            0,
            0,
            Color::White,
        ),
        1,
        2,
    )
    .unwrap();

    assert!(!ready_to_end(&state.board, Color::White));
    assert_eq!(
        select(&state, Location::Off),
        Err(Rejection::NotInHomeQuadrant)
    );
    assert!(possible_bear_off_dice(&state.board, &state.turn).is_empty());
}

#[test]
fn bear_off_eligibility_is_lost_after_being_hit() {
    let layout = [
        (2, Color::White, 1),
        (4, Color::White, 14),
        (0, Color::Black, 1),
        (20, Color::Black, 14),
    ];
    let black = roll_dice(&position(&layout, 0, 0, Color::Black), 2, 6).unwrap();
    assert!(ready_to_end(&black.board, Color::White));

    let after = play(&black, Location::Point(0), Location::Point(2));

    assert_eq!(after.board.bar(Color::White), 1);
    assert!(!ready_to_end(&after.board, Color::White));
}

#[test]
fn forced_pass_after_a_move_hands_over_the_turn() {
    // 13 -> 8 with the 5 leaves a 6 that only lands on Black's points.
    let layout = [
        (13, Color::White, 1),
        (7, Color::Black, 2),
        (2, Color::Black, 2),
        (22, Color::Black, 11),
    ];
    let state = roll_dice(&position(&layout, 0, 0, Color::White), 6, 5).unwrap();
    let chosen = select(&state, Location::Point(13)).unwrap().state;

    let moved = select(&chosen, Location::Point(8)).unwrap();

    let Event::Moved(record) = moved.event else {
        panic!("expected a move");
    };
    assert_eq!(record.outcome, TurnOutcome::ForcedPass);
    assert_eq!(moved.state.turn.active, Color::Black);
    assert!(!moved.state.turn.rolled);
    assert!(moved.state.turn.remaining.is_empty());
}

#[test]
fn doubles_allow_four_moves() {
    let state = roll_dice(&GameState::new(&GameConfig::default()), 3, 3).unwrap();
    assert_eq!(state.turn.max_moves(), 4);

    let one = play(&state, Location::Point(7), Location::Point(4));
    let two = play(&one, Location::Point(7), Location::Point(4));
    let three = play(&two, Location::Point(5), Location::Point(2));
    assert_eq!(three.turn.max_moves(), 1);
    assert_eq!(three.turn.active, Color::White);

    let four = play(&three, Location::Point(5), Location::Point(2));
    assert_eq!(four.turn.active, Color::Black);
    assert_eq!(four.board.count_at(4), 2);
    assert_eq!(four.board.count_at(2), 2);
}

#[test]
fn replaying_the_same_inputs_gives_the_same_fingerprint() {
    let inputs = [
        Location::Point(23),
        Location::Point(17),
        Location::Point(12),
        Location::Point(7),
    ];
    let run = || {
        let mut state = roll_dice(&GameState::new(&GameConfig::default()), 6, 5).unwrap();
        for at in inputs {
            state = select(&state, at).unwrap().state;
        }
        state
    };

    let server = run();
    let client = run();

    assert_eq!(server, client);
    assert_eq!(server.fingerprint(), client.fingerprint());
    assert_ne!(
        server.fingerprint(),
        GameState::new(&GameConfig::default()).fingerprint()
    );
}

#[test]
fn closed_board_forces_a_pass_on_the_next_input() {
    let layout: Vec<_> = (18..24).map(|p| (p, Color::Black, 2)).collect();
    let state = roll_dice(&position(&layout, 1, 0, Color::White), 6, 6).unwrap();
    assert!(!has_any_legal_move(&state.board, &state.turn));

    let passed = select(&state, Location::Bar).unwrap();

    assert_eq!(
        passed.event,
        Event::ForcedPass {
            player: Color::White
        }
    );
    assert_eq!(passed.state.turn.active, Color::Black);
}
