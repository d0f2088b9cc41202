/// Integration tests for full session resets: a second airborne block or a
/// block falling off while another hovers reloads the scene everywhere

use stacker_client::{Boundary, BoundaryExit, BoundaryOutcome, IgnoreReason, ParticipantEvent};
use stacker_shared::{BlockId, BlockLifecycle, Vec3};
use stacker_test::{assert_single_hover, init_logging, TestSession, TowerLayout};

fn exit(session: &mut TestSession, index: usize, boundary: Boundary, block: BlockId) -> BoundaryOutcome {
    session
        .participant_mut(index)
        .on_boundary_exit(BoundaryExit { boundary, block })
        .unwrap()
}

fn assert_fresh_scene(session: &TestSession, generation: u32) {
    let layout = session.layout().blocks();
    for participant in session.participants() {
        assert_eq!(participant.session().generation(), generation);
        assert_eq!(participant.session().dropped_count(), 0);
        assert!(!participant.session().is_block_hovering());
        assert_eq!(participant.selected(), None);
        for (id, initial) in layout.iter() {
            let sync = participant.block(id).unwrap();
            assert_eq!(sync.lifecycle(), BlockLifecycle::Idle);
            assert_eq!(sync.block().position(), initial.position());
            assert_eq!(sync.block().owner(), None);
            assert_eq!(participant.ownership().owner(id), None);
        }
    }
}

fn reset_events(session: &mut TestSession, index: usize) -> usize {
    session
        .events(index)
        .into_iter()
        .filter(|event| matches!(event, ParticipantEvent::SessionReset { .. }))
        .count()
}

#[test]
fn second_block_leaving_the_tower_resets_the_session() {
    init_logging();
    let mut session = TestSession::new(2, TowerLayout::stack(1));
    let first = BlockId::from_u64(1);
    let second = BlockId::from_u64(2);
    session.select_and_settle(0, first);
    session.select_and_settle(1, second);

    assert!(matches!(
        exit(&mut session, 0, Boundary::Tower, first),
        BoundaryOutcome::Hovered { .. }
    ));
    session.pump();

    assert_eq!(
        exit(&mut session, 1, Boundary::Tower, second),
        BoundaryOutcome::ResetRequested
    );
    // a refused lift does not reframe the camera
    assert_eq!(session.participant(1).view().destination(), Vec3::ZERO);
    assert!(!session.participant(1).view().is_moving());
    session.pump();

    assert_fresh_scene(&session, 1);
    for index in 0..2 {
        assert_eq!(reset_events(&mut session, index), 1);
    }
}

#[test]
fn block_falling_off_while_another_hovers_resets_once() {
    init_logging();
    let mut session = TestSession::new(2, TowerLayout::stack(1));
    let hovering = BlockId::from_u64(1);
    let falling = BlockId::from_u64(3);
    session.select_and_settle(0, hovering);
    exit(&mut session, 0, Boundary::Tower, hovering);
    session.pump();

    // both participants see the unowned block fall
    assert_eq!(
        exit(&mut session, 0, Boundary::GameOver, falling),
        BoundaryOutcome::ResetRequested
    );
    assert_eq!(
        exit(&mut session, 1, Boundary::GameOver, falling),
        BoundaryOutcome::ResetRequested
    );
    session.pump();

    assert_fresh_scene(&session, 1);
    for index in 0..2 {
        assert_eq!(reset_events(&mut session, index), 1);
    }
}

#[test]
fn falling_block_without_a_hover_is_ignored() {
    init_logging();
    let mut session = TestSession::new(2, TowerLayout::stack(1));
    assert_eq!(
        exit(&mut session, 1, Boundary::GameOver, BlockId::from_u64(3)),
        BoundaryOutcome::Ignored(IgnoreReason::NoHoverInProgress)
    );
    session.pump();
    assert_fresh_scene(&session, 0);
}

#[test]
fn sensors_of_blocks_owned_elsewhere_are_ignored() {
    init_logging();
    let mut session = TestSession::new(2, TowerLayout::stack(1));
    let block = BlockId::from_u64(1);
    session.select_and_settle(0, block);

    assert_eq!(
        exit(&mut session, 1, Boundary::Tower, block),
        BoundaryOutcome::Ignored(IgnoreReason::OwnedElsewhere)
    );
    assert_eq!(
        exit(&mut session, 1, Boundary::Tower, BlockId::from_u64(2)),
        BoundaryOutcome::Ignored(IgnoreReason::NotOwned)
    );
}

#[test]
fn simultaneous_lifts_collapse_into_a_reset() {
    init_logging();
    let mut session = TestSession::new(2, TowerLayout::stack(1));
    let first = BlockId::from_u64(1);
    let second = BlockId::from_u64(2);
    session.select_and_settle(0, first);
    session.select_and_settle(1, second);

    // neither has heard of the other's lift yet
    assert!(matches!(
        exit(&mut session, 0, Boundary::Tower, first),
        BoundaryOutcome::Hovered { .. }
    ));
    assert!(matches!(
        exit(&mut session, 1, Boundary::Tower, second),
        BoundaryOutcome::Hovered { .. }
    ));
    session.pump();

    assert_single_hover!(session);
    assert_fresh_scene(&session, 1);
}

#[test]
fn play_continues_after_a_reset() {
    init_logging();
    let mut session = TestSession::new(2, TowerLayout::stack(1));
    let block = BlockId::from_u64(1);
    session.select_and_settle(0, block);
    exit(&mut session, 0, Boundary::Tower, block);
    session.pump();
    exit(&mut session, 1, Boundary::GameOver, BlockId::from_u64(2));
    session.pump();
    assert_fresh_scene(&session, 1);

    session.select_and_settle(1, block);
    assert!(session.participant(1).ownership().is_local_owner(&block));
    assert!(matches!(
        exit(&mut session, 1, Boundary::Tower, block),
        BoundaryOutcome::Hovered { .. }
    ));
    session.pump();
    session.participant_mut(1).push_or_drop().unwrap();
    session.pump();
    for participant in session.participants() {
        assert_eq!(participant.session().dropped_count(), 1);
        assert_eq!(participant.session().generation(), 1);
    }
}

#[test]
fn drop_refused_after_a_takeover_resets_the_session() {
    init_logging();
    let mut session = TestSession::new(2, TowerLayout::single());
    let block = BlockId::from_u64(1);

    session.select_and_settle(1, block);
    session.select_and_settle(0, block);
    exit(&mut session, 0, Boundary::Tower, block);
    session.pump();
    assert_single_hover!(session);

    // the second participant still has the block selected and takes it back;
    // the relay grants it before the first participant hears about it
    session.participant_mut(1).select(block).unwrap();
    session.relay().deliver_all().unwrap();

    session.participant_mut(0).push_or_drop().unwrap();
    assert_eq!(
        session.participant(0).block(&block).unwrap().lifecycle(),
        BlockLifecycle::Dropped
    );
    session.pump();

    assert_fresh_scene(&session, 1);
    assert_eq!(reset_events(&mut session, 0), 1);
    assert_eq!(reset_events(&mut session, 1), 1);
}
