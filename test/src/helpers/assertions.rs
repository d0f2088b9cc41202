/// Assert that no participant sees more than one hovering block
#[macro_export]
macro_rules! assert_single_hover {
    ($session:expr) => {
        for participant in $session.participants() {
            let hovering: Vec<_> = participant
                .scene()
                .blocks()
                .filter(|sync| sync.block().is_hovering())
                .map(|sync| sync.id())
                .collect();
            assert!(
                hovering.len() <= 1,
                "{} sees several hovering blocks: {:?}",
                participant.id(),
                hovering
            );
        }
    };
}

/// Assert that every participant agrees on the lifecycle of every block
#[macro_export]
macro_rules! assert_lifecycles_agree {
    ($session:expr) => {
        let reference = $session.participant(0);
        for participant in $session.participants().skip(1) {
            for sync in reference.scene().blocks() {
                let other = participant
                    .block(&sync.id())
                    .expect("every participant shares the layout");
                assert_eq!(
                    sync.lifecycle(),
                    other.lifecycle(),
                    "{} and {} disagree on {}",
                    reference.id(),
                    participant.id(),
                    sync.id()
                );
            }
        }
    };
}

/// Assert that two vectors are within `eps` of each other
#[macro_export]
macro_rules! assert_vec3_near {
    ($left:expr, $right:expr) => {
        $crate::assert_vec3_near!($left, $right, 1e-4)
    };
    ($left:expr, $right:expr, $eps:expr) => {{
        let (left, right) = ($left, $right);
        assert!(
            left.abs_diff_eq(right, $eps),
            "{:?} is not within {} of {:?}",
            left,
            $eps,
            right
        );
    }};
}
