/// Integration tests for how remote copies follow the owner, including over
/// links that lose or repeat block calls

use stacker_client::{Boundary, BoundaryExit, ParticipantConfig, ParticipantEvent};
use stacker_server::{LinkConditionerConfig, RelayConfig};
use stacker_shared::{BlockId, BlockLifecycle, Quat, Vec3};
use stacker_test::{assert_vec3_near, init_logging, TestSession, TowerLayout};

const DT: f32 = 1.0 / 60.0;

fn conditioned_session(players: usize, conditioner: LinkConditionerConfig) -> TestSession {
    let relay_config = RelayConfig {
        link_conditioner: Some(conditioner),
        seed: Some(42),
        ..Default::default()
    };
    TestSession::with_config(
        players,
        TowerLayout::single(),
        relay_config,
        ParticipantConfig::default(),
    )
}

fn lift(session: &mut TestSession, index: usize, block: BlockId) {
    session
        .participant_mut(index)
        .on_boundary_exit(BoundaryExit {
            boundary: Boundary::Tower,
            block,
        })
        .unwrap();
    session.pump();
}

#[test]
fn remote_copy_closes_in_monotonically_without_overshoot() {
    init_logging();
    let mut session = TestSession::new(2, TowerLayout::single());
    let block = BlockId::from_u64(1);
    session.select_and_settle(0, block);
    lift(&mut session, 0, block);

    let target = session.participant(1).block(&block).unwrap().block().target_position();
    assert_eq!(target, Vec3::new(0.0, 2.5, 0.0));

    let mut distance = session
        .participant(1)
        .block(&block)
        .unwrap()
        .block()
        .position()
        .distance(target);
    let mut ticks = 0;
    while distance > 0.0 {
        session.participant_mut(1).tick(DT);
        ticks += 1;
        let position = session.participant(1).block(&block).unwrap().block().position();
        let next = position.distance(target);
        assert!(next < distance, "distance grew from {} to {}", distance, next);
        assert!(position.y <= target.y, "overshot to {}", position.y);
        distance = next;
        assert!(ticks < 200, "no convergence after {} ticks", ticks);
    }
    assert_eq!(
        session.participant(1).block(&block).unwrap().block().position(),
        target
    );
}

#[test]
fn owner_eases_to_hover_height_without_remote_input() {
    init_logging();
    let mut session = TestSession::new(1, TowerLayout::single());
    let block = BlockId::from_u64(1);
    session.select_and_settle(0, block);
    lift(&mut session, 0, block);

    session.run(30, DT);
    let sync = session.participant(0).block(&block).unwrap();
    assert_eq!(sync.lifecycle(), BlockLifecycle::Hovering);
    assert_vec3_near!(sync.block().position(), Vec3::new(0.0, 2.5, 0.0));
    assert_eq!(sync.block().target_position(), sync.block().position());
}

#[test]
fn lossy_link_is_healed_by_the_next_update() {
    init_logging();
    let mut session = conditioned_session(2, LinkConditionerConfig::new(0.5, 0.0));
    let block = BlockId::from_u64(1);
    session.select_and_settle(0, block);

    for _ in 0..10 {
        session.participant_mut(0).move_right().unwrap();
        session.pump();
    }

    let mut healed = false;
    for _ in 0..64 {
        session.participant_mut(0).move_right().unwrap();
        session.pump();
        let owner = session.participant(0).block(&block).unwrap().block().position();
        let remote = session.participant(1).block(&block).unwrap().block().position();
        if owner == remote {
            healed = true;
            break;
        }
    }
    assert!(healed, "remote copy never caught up with the owner");
}

#[test]
fn repeated_drop_is_counted_once() {
    init_logging();
    let mut session = conditioned_session(2, LinkConditionerConfig::new(0.0, 1.0));
    let block = BlockId::from_u64(1);
    session.select_and_settle(0, block);
    lift(&mut session, 0, block);
    session.participant_mut(0).push_or_drop().unwrap();
    session.pump();

    for index in 0..2 {
        assert_eq!(session.participant(index).session().dropped_count(), 1);
        let drops = session
            .events(index)
            .into_iter()
            .filter(|event| matches!(event, ParticipantEvent::BlockDropped { .. }))
            .count();
        assert_eq!(drops, 1);
    }
    assert_eq!(
        session.participant(1).block(&block).unwrap().lifecycle(),
        BlockLifecycle::Dropped
    );
}

#[test]
fn physics_write_back_only_applies_to_simulated_blocks_not_owned_elsewhere() {
    init_logging();
    let mut session = TestSession::new(2, TowerLayout::single());
    let block = BlockId::from_u64(1);
    let moved = Vec3::new(0.3, 0.25, 0.0);

    // nobody owns it yet: either participant's physics may move it
    assert!(session
        .participant_mut(1)
        .write_physics_transform(block, moved, Quat::IDENTITY));

    session.select_and_settle(0, block);
    assert!(!session
        .participant_mut(1)
        .write_physics_transform(block, Vec3::ZERO, Quat::IDENTITY));

    lift(&mut session, 0, block);
    assert!(!session
        .participant_mut(0)
        .write_physics_transform(block, Vec3::ZERO, Quat::IDENTITY));
}
