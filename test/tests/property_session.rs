/// PROPERTY-BASED TESTS: session invariants under random play
///
/// Key invariants, checked whenever the session has settled:
/// 1. At most one block hovers on any participant
/// 2. Every participant agrees on every block's lifecycle
/// 3. A dropped block stays dropped until the session is reset
/// 4. Hover slots never leave -1..=1

use std::collections::HashSet;

use proptest::prelude::*;
use stacker_client::{Boundary, BoundaryExit, HoverSlot};
use stacker_shared::{BlockId, Generation};
use stacker_test::{assert_lifecycles_agree, assert_single_hover, TestSession, TowerLayout};

const PLAYERS: usize = 2;
const BLOCKS: u64 = 6;

#[derive(Clone, Debug)]
enum Step {
    Select(usize, u64),
    Lift(usize, u64),
    FallOff(usize, u64),
    MoveLeft(usize),
    MoveRight(usize),
    PushOrDrop(usize),
    Pump,
    Tick,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    let player = 0..PLAYERS;
    let block = 1..=BLOCKS;
    prop_oneof![
        3 => (player.clone(), block.clone()).prop_map(|(p, b)| Step::Select(p, b)),
        3 => (player.clone(), block.clone()).prop_map(|(p, b)| Step::Lift(p, b)),
        1 => (player.clone(), block).prop_map(|(p, b)| Step::FallOff(p, b)),
        1 => player.clone().prop_map(Step::MoveLeft),
        1 => player.clone().prop_map(Step::MoveRight),
        3 => player.prop_map(Step::PushOrDrop),
        3 => Just(Step::Pump),
        1 => Just(Step::Tick),
    ]
}

fn apply(session: &mut TestSession, step: &Step) {
    // gestures that are not possible right now simply have no effect
    match *step {
        Step::Select(p, b) => {
            let _ = session.participant_mut(p).select(BlockId::from_u64(b));
        }
        Step::Lift(p, b) => {
            let _ = session.participant_mut(p).on_boundary_exit(BoundaryExit {
                boundary: Boundary::Tower,
                block: BlockId::from_u64(b),
            });
        }
        Step::FallOff(p, b) => {
            let _ = session.participant_mut(p).on_boundary_exit(BoundaryExit {
                boundary: Boundary::GameOver,
                block: BlockId::from_u64(b),
            });
        }
        Step::MoveLeft(p) => {
            let _ = session.participant_mut(p).move_left();
        }
        Step::MoveRight(p) => {
            let _ = session.participant_mut(p).move_right();
        }
        Step::PushOrDrop(p) => {
            let _ = session.participant_mut(p).push_or_drop();
        }
        Step::Pump => {
            session.pump();
        }
        Step::Tick => session.tick(1.0 / 60.0),
    }
}

fn dropped_blocks(session: &TestSession) -> (Generation, HashSet<BlockId>) {
    let participant = session.participant(0);
    let dropped = participant
        .scene()
        .blocks()
        .filter(|sync| sync.block().is_dropped())
        .map(|sync| sync.id())
        .collect();
    (participant.session().generation(), dropped)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Random play by two participants never breaks the session invariants
    #[test]
    fn prop_settled_session_is_consistent(
        steps in prop::collection::vec(step_strategy(), 1..60)
    ) {
        let mut session = TestSession::new(PLAYERS, TowerLayout::stack(2));
        let mut previous = dropped_blocks(&session);

        for step in steps.iter() {
            apply(&mut session, step);
            if let Step::Pump = step {
                assert_single_hover!(session);
                assert_lifecycles_agree!(session);

                let current = dropped_blocks(&session);
                if current.0 == previous.0 {
                    prop_assert!(
                        current.1.is_superset(&previous.1),
                        "blocks {:?} stopped being dropped",
                        previous.1.difference(&current.1).collect::<Vec<_>>()
                    );
                }
                previous = current;
            }
        }

        session.pump();
        assert_single_hover!(session);
        assert_lifecycles_agree!(session);
        let dropped_count = session.participant(0).session().dropped_count() as usize;
        prop_assert_eq!(dropped_count, dropped_blocks(&session).1.len());
    }

    /// Hover slots clamp whatever sequence of shifts is applied
    #[test]
    fn prop_hover_slot_stays_in_range(shifts in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut slot = HoverSlot::center();
        for right in shifts {
            if right {
                slot.shift_right();
            } else {
                slot.shift_left();
            }
            prop_assert!((HoverSlot::MIN..=HoverSlot::MAX).contains(&slot.index()));
        }
    }
}
