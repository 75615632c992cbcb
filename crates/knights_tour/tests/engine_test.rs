//! Tests for the tour engine state machine.

use knights_tour::{MoveError, Phase, Position, TourEngine};

fn pos(x: u8, y: u8) -> Position {
    Position::new(x, y).expect("coordinates in bounds")
}

/// Plays a scripted alternating sequence, asserting every move is accepted.
fn play_script(engine: &mut TourEngine, moves: &[Position]) {
    for (index, target) in moves.iter().enumerate() {
        if index % 2 == 0 {
            engine
                .apply_human_move(*target)
                .unwrap_or_else(|e| panic!("human move {index} to {target} rejected: {e}"));
        } else {
            engine
                .apply_npc_move(*target)
                .unwrap_or_else(|e| panic!("computer move {index} to {target} rejected: {e}"));
        }
    }
}

#[test]
fn test_fresh_game_awaits_human_opening() {
    let mut engine = TourEngine::seeded(1);
    engine.reset(false);

    assert_eq!(engine.phase(), Phase::AwaitingHuman);
    assert_eq!(engine.position(), None);
    assert!(engine.history().is_empty());
    assert_eq!(engine.legal_moves().len(), 64);
}

#[test]
fn test_engine_starts_not_started() {
    let mut engine = TourEngine::seeded(1);
    assert_eq!(engine.phase(), Phase::NotStarted);
    assert!(matches!(
        engine.apply_human_move(pos(3, 3)),
        Err(MoveError::IllegalState(Phase::NotStarted))
    ));
}

#[test]
fn test_npc_first_reset_opens_with_one_move() {
    let mut engine = TourEngine::seeded(2);
    engine.reset(true);

    assert_eq!(engine.phase(), Phase::AwaitingHuman);
    let opening = engine.position().expect("computer opened");
    assert_eq!(engine.history(), &[opening]);
    assert_eq!(engine.board().visited_count(), 1);
    // Every legal reply is a knight target of the opening cell.
    for target in engine.legal_moves() {
        assert!(opening.knight_targets().any(|t| t == target));
    }
}

#[test]
fn test_human_move_bookkeeping() {
    let mut engine = TourEngine::seeded(3);
    engine.reset(false);

    let target = Position::from_notation("d4").expect("valid notation");
    engine.apply_human_move(target).expect("opening move");

    assert_eq!(engine.phase(), Phase::AwaitingNpc);
    assert_eq!(engine.position(), Some(target));
    assert_eq!(engine.history(), &[target]);
    assert!(engine.board().is_visited(target));
}

#[test]
fn test_illegal_move_leaves_state_unchanged() {
    let mut engine = TourEngine::seeded(4);
    engine.reset(false);
    engine.apply_human_move(pos(3, 3)).expect("opening move");
    let reply = engine.compute_npc_move().expect("computer to move");
    engine.apply_npc_move(reply).expect("computer reply");

    let board = engine.board().clone();
    let history = engine.history().to_vec();
    let position = engine.position();

    // Already visited.
    assert!(matches!(
        engine.apply_human_move(pos(3, 3)),
        Err(MoveError::IllegalMove(_))
    ));
    // Not a knight move away.
    assert!(matches!(
        engine.apply_human_move(pos(7, 7)),
        Err(MoveError::IllegalMove(_))
    ));

    assert_eq!(engine.board(), &board);
    assert_eq!(engine.history(), history);
    assert_eq!(engine.position(), position);
    assert_eq!(engine.phase(), Phase::AwaitingHuman);
}

#[test]
fn test_moves_rejected_while_computer_thinks() {
    let mut engine = TourEngine::seeded(5);
    engine.reset(false);
    engine.apply_human_move(pos(4, 4)).expect("opening move");

    assert_eq!(engine.phase(), Phase::AwaitingNpc);
    assert!(matches!(
        engine.apply_human_move(pos(5, 6)),
        Err(MoveError::IllegalState(Phase::AwaitingNpc))
    ));
}

#[test]
fn test_npc_move_queries_fail_out_of_turn() {
    let mut engine = TourEngine::seeded(6);
    engine.reset(false);

    assert!(matches!(
        engine.compute_npc_move(),
        Err(MoveError::IllegalState(Phase::AwaitingHuman))
    ));
    assert!(matches!(
        engine.apply_npc_move(pos(0, 0)),
        Err(MoveError::IllegalState(Phase::AwaitingHuman))
    ));
}

#[test]
fn test_human_wins_when_computer_is_cornered() {
    let mut engine = TourEngine::seeded(7);
    engine.reset(false);

    // Alternating knight path ending with the human entering a8, whose
    // only exits (b6 and c7) are already burned.
    let script = [
        pos(1, 1),
        pos(3, 0),
        pos(2, 2),
        pos(1, 0),
        pos(0, 2),
        pos(2, 1),
        pos(3, 3),
        pos(1, 2),
        pos(0, 0),
    ];
    play_script(&mut engine, &script);

    assert_eq!(engine.phase(), Phase::HumanWon);
    assert!(engine.phase().is_terminal());
    assert!(engine.legal_moves().is_empty());
    assert_eq!(engine.history().len(), script.len());
}

#[test]
fn test_human_loses_when_boxed_in() {
    let mut engine = TourEngine::seeded(8);
    engine.reset(false);

    // Same trap with roles shifted one ply: the computer takes a8 and the
    // human has nowhere to go.
    let script = [
        pos(3, 0),
        pos(2, 2),
        pos(1, 0),
        pos(0, 2),
        pos(2, 1),
        pos(3, 3),
        pos(1, 2),
        pos(0, 0),
    ];
    play_script(&mut engine, &script);

    assert_eq!(engine.phase(), Phase::HumanLost);
    assert!(engine.legal_moves().is_empty());
}

#[test]
fn test_terminal_game_rejects_further_moves() {
    let mut engine = TourEngine::seeded(9);
    engine.reset(false);
    let script = [
        pos(1, 1),
        pos(3, 0),
        pos(2, 2),
        pos(1, 0),
        pos(0, 2),
        pos(2, 1),
        pos(3, 3),
        pos(1, 2),
        pos(0, 0),
    ];
    play_script(&mut engine, &script);
    assert_eq!(engine.phase(), Phase::HumanWon);

    assert!(matches!(
        engine.apply_human_move(pos(4, 4)),
        Err(MoveError::IllegalState(Phase::HumanWon))
    ));
    assert!(matches!(
        engine.compute_npc_move(),
        Err(MoveError::IllegalState(Phase::HumanWon))
    ));
}

#[test]
fn test_reset_discards_finished_game() {
    let mut engine = TourEngine::seeded(10);
    engine.reset(false);
    engine.apply_human_move(pos(0, 0)).expect("opening move");

    engine.reset(false);
    assert_eq!(engine.phase(), Phase::AwaitingHuman);
    assert_eq!(engine.position(), None);
    assert!(engine.history().is_empty());
    assert_eq!(engine.board().visited_count(), 0);
}

#[test]
fn test_npc_prefers_leaving_current_region() {
    for seed in 0..32 {
        let mut engine = TourEngine::seeded(seed);
        engine.reset(false);
        engine.apply_human_move(pos(3, 4)).expect("opening move");

        let current = engine.position().expect("knight placed");
        let here = engine.regions().region_of(current);
        let legal = engine.legal_moves();
        let fresh: Vec<Position> = legal
            .iter()
            .copied()
            .filter(|target| engine.regions().region_of(*target) != here)
            .collect();

        let reply = engine.compute_npc_move().expect("computer to move");
        assert!(legal.contains(&reply), "reply {reply} not legal");
        if !fresh.is_empty() {
            assert!(
                fresh.contains(&reply),
                "reply {reply} stayed in region {here} despite exits"
            );
        }
    }
}

#[test]
fn test_compute_does_not_mutate_game_state() {
    let mut engine = TourEngine::seeded(11);
    engine.reset(false);
    engine.apply_human_move(pos(2, 5)).expect("opening move");

    let board = engine.board().clone();
    let history = engine.history().to_vec();
    let first = engine.compute_npc_move().expect("computer to move");
    let second = engine.compute_npc_move().expect("computer to move");

    assert_eq!(engine.board(), &board);
    assert_eq!(engine.history(), history);
    assert_eq!(engine.phase(), Phase::AwaitingNpc);
    // Both picks must be legal even though the RNG advances between them.
    assert!(engine.legal_moves().contains(&first));
    assert!(engine.legal_moves().contains(&second));
}

#[test]
fn test_full_games_terminate_cleanly() {
    for seed in 0..8 {
        let mut engine = TourEngine::seeded(seed);
        engine.reset(seed % 2 == 0);

        let mut plies = 0;
        while !engine.phase().is_terminal() {
            assert!(plies <= 64, "game did not terminate");

            let legal = engine.legal_moves();
            assert!(!legal.is_empty());
            for target in &legal {
                assert!(!engine.board().is_visited(*target));
            }

            engine.apply_human_move(legal[0]).expect("legal human move");
            plies += 1;

            if engine.phase() == Phase::AwaitingNpc {
                let reply = engine.compute_npc_move().expect("computer to move");
                engine.apply_npc_move(reply).expect("computer reply");
                plies += 1;
            }
        }

        assert_eq!(engine.history().len(), engine.board().visited_count());
        assert!(matches!(
            engine.phase(),
            Phase::HumanWon | Phase::HumanLost
        ));
    }
}
