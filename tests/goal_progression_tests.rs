//! Integration tests for goal completion: consumption of the matching tile,
//! difficulty advancement, the energy reward, and the delayed board re-scan
//! that chains into freshly drawn goals.

use tilefuse::{
    GameConfig, GameEvent, GameSession, MemorySnapshotStore, MergeOutcome, Tile,
};

fn test_session(seed: u64) -> GameSession {
    let _ = env_logger::builder().is_test(true).try_init();
    GameSession::new(
        GameConfig::for_testing(seed),
        Box::new(MemorySnapshotStore::new()),
    )
}

#[test]
fn test_merge_to_goal_consumes_tile_and_rewards_energy() {
    let mut session = test_session(19);
    let goal = session.goal_number();
    assert!((10..20).contains(&goal));

    let a = Tile::new(goal - 3);
    let b = Tile::new(3);
    let (a_id, b_id) = (a.id, b.id);
    assert!(session.place_tile(0, a));
    assert!(session.place_tile(1, b));
    session.poll_events();

    let outcome = session.merge_tiles(a_id, b_id);
    assert_eq!(
        outcome,
        MergeOutcome::Merged {
            tile: a_id,
            slot: 1,
            value: goal,
            goal_reached: true,
        }
    );

    // The goal tile is consumed immediately, not left on the board.
    assert!(session.board().is_empty());
    assert_eq!(session.energy().current(), 15);
    assert_eq!(session.difficulty().goal_range, 30);
    assert_ne!(session.goal_number(), goal);

    let events = session.poll_events();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::TileMerged { value, .. } if *value == goal)));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::GoalReached { value, .. } if *value == goal)));
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::EnergyChanged { current: 15, .. })));
}

#[test]
fn test_rescan_consumes_tiles_matching_fresh_goal() {
    let mut session = test_session(19);
    let goal = session.goal_number();

    let a = Tile::new(goal - 2);
    let b = Tile::new(2);
    let (a_id, b_id) = (a.id, b.id);
    assert!(session.place_tile(0, a));
    assert!(session.place_tile(1, b));
    assert!(matches!(
        session.merge_tiles(a_id, b_id),
        MergeOutcome::Merged { goal_reached: true, .. }
    ));

    // A tile already equal to the freshly drawn goal gets picked up by the
    // scheduled re-scan (immediate in the test configuration).
    let next_goal = session.goal_number();
    let lucky = Tile::new(next_goal);
    assert!(session.place_tile(4, lucky));
    session.poll_events();

    session.tick(0.0);
    assert!(session.board().is_empty());
    assert_eq!(session.energy().current(), 20);
    assert_eq!(session.difficulty().goal_range, 40);
    assert_ne!(session.goal_number(), next_goal);
    assert!(session
        .poll_events()
        .iter()
        .any(|e| matches!(e, GameEvent::GoalReached { value, .. } if *value == next_goal)));
}

#[test]
fn test_rescan_consumes_every_tile_matching_the_scan_goal() {
    let mut session = test_session(43);
    let goal = session.goal_number();

    let a = Tile::new(goal - 4);
    let b = Tile::new(4);
    let (a_id, b_id) = (a.id, b.id);
    assert!(session.place_tile(0, a));
    assert!(session.place_tile(1, b));
    assert!(matches!(
        session.merge_tiles(a_id, b_id),
        MergeOutcome::Merged { goal_reached: true, .. }
    ));

    // Two tiles equal to the same fresh goal: the first consumption rerolls
    // the goal, but both belong to the same scan pass and both go.
    let next_goal = session.goal_number();
    assert!(session.place_tile(2, Tile::new(next_goal)));
    assert!(session.place_tile(3, Tile::new(next_goal)));
    session.poll_events();

    session.tick(0.0);
    assert!(session.board().is_empty());
    assert_eq!(session.energy().current(), 25);
    assert_eq!(session.difficulty().goal_range, 50);

    let reached: Vec<u64> = session
        .poll_events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::GoalReached { value, .. } => Some(*value),
            _ => None,
        })
        .collect();
    assert_eq!(reached, vec![next_goal, next_goal]);
}

#[test]
fn test_rescan_leaves_non_matching_tiles_alone() {
    let mut session = test_session(23);
    let goal = session.goal_number();

    let a = Tile::new(goal - 5);
    let b = Tile::new(5);
    let (a_id, b_id) = (a.id, b.id);
    assert!(session.place_tile(0, a));
    assert!(session.place_tile(1, b));
    // Values well above any early goal stay put through the re-scan.
    assert!(session.place_tile(2, Tile::new(5000)));

    assert!(matches!(
        session.merge_tiles(a_id, b_id),
        MergeOutcome::Merged { goal_reached: true, .. }
    ));
    session.tick(0.0);

    assert_eq!(session.board().tile_count(), 1);
    assert_eq!(session.board().tile(2).map(Tile::value), Some(5000));
}

#[test]
fn test_rescan_waits_for_configured_delay() {
    let mut config = GameConfig::for_testing(31);
    config.goal_rescan_delay_seconds = 1.0;
    let mut session = GameSession::new(config, Box::new(MemorySnapshotStore::new()));
    let goal = session.goal_number();

    let a = Tile::new(goal - 1);
    let b = Tile::new(1);
    let (a_id, b_id) = (a.id, b.id);
    assert!(session.place_tile(0, a));
    assert!(session.place_tile(1, b));
    assert!(matches!(
        session.merge_tiles(a_id, b_id),
        MergeOutcome::Merged { goal_reached: true, .. }
    ));

    let next_goal = session.goal_number();
    assert!(session.place_tile(3, Tile::new(next_goal)));

    // Half the delay: the matching tile is still there.
    session.tick(0.5);
    assert_eq!(session.board().tile_count(), 1);

    session.tick(0.5);
    assert!(session.board().is_empty());
}

#[test]
fn test_successive_goals_are_distinct() {
    let mut session = test_session(37);
    let mut previous = session.goal_number();

    for slot in 0..5 {
        let goal = session.goal_number();
        let a = Tile::new(goal - 1);
        let b = Tile::new(1);
        let (a_id, b_id) = (a.id, b.id);
        assert!(session.place_tile(slot, a));
        assert!(session.place_tile(slot + 1, b));
        assert!(matches!(
            session.merge_tiles(a_id, b_id),
            MergeOutcome::Merged { goal_reached: true, .. }
        ));
        session.tick(0.0);

        assert_ne!(session.goal_number(), previous);
        previous = session.goal_number();
        assert!(session.board().is_empty());
    }
}
