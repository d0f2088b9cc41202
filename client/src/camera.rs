use log::debug;

use stacker_shared::{math::flatten_direction, TimedTransition, Vec3};

use crate::config::CameraConfig;

/// Orientation of the player's camera, supplied each frame by the camera
/// controller. Gestures are camera-relative and only use the ground-plane
/// projection of these axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    pub right: Vec3,
    pub forward: Vec3,
}

impl CameraBasis {
    pub fn new(right: Vec3, forward: Vec3) -> Self {
        Self { right, forward }
    }

    pub fn flat_right(&self) -> Vec3 {
        flatten_direction(self.right)
    }

    pub fn flat_forward(&self) -> Vec3 {
        flatten_direction(self.forward)
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self {
            right: Vec3::X,
            forward: Vec3::Z,
        }
    }
}

/// The collaborator that keeps the tower framed as it grows
pub trait ViewFollower {
    /// Frame the top of the tower while a block hovers above it
    fn move_to_tower_top(&mut self, tallest_top: f32);
    /// Go back to the resting follow target
    fn restore_target(&mut self);
    /// Raise the resting follow target after a floor completes
    fn increase_target_height(&mut self, block_height: f32);
    /// Return to the initial framing after a session reset
    fn reset(&mut self);
    /// Advance any transition in progress
    fn tick(&mut self, dt: f32);
}

/// Follow target for an orbiting camera. Every move is a `TimedTransition`;
/// a new move cancels the previous one.
pub struct CameraRig {
    config: CameraConfig,
    resting_target: Vec3,
    follow: TimedTransition<Vec3>,
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        let initial = config.initial_target;
        Self {
            config,
            resting_target: initial,
            follow: TimedTransition::at_rest(initial),
        }
    }

    /// Where the camera currently looks
    pub fn target(&self) -> Vec3 {
        self.follow.value()
    }

    /// Where the camera is heading
    pub fn destination(&self) -> Vec3 {
        self.follow.target()
    }

    pub fn resting_target(&self) -> Vec3 {
        self.resting_target
    }

    pub fn is_moving(&self) -> bool {
        self.follow.is_active()
    }

    fn move_to(&mut self, destination: Vec3) {
        debug!("camera target moving to {:?}", destination);
        self.follow.retarget(destination, self.config.transition_time);
    }
}

impl ViewFollower for CameraRig {
    fn move_to_tower_top(&mut self, tallest_top: f32) {
        let mut destination = self.follow.value();
        destination.y = tallest_top + self.config.tower_top_offset;
        self.move_to(destination);
    }

    fn restore_target(&mut self) {
        self.move_to(self.resting_target);
    }

    fn increase_target_height(&mut self, block_height: f32) {
        self.resting_target.y += block_height / 2.0;
        self.move_to(self.resting_target);
    }

    fn reset(&mut self) {
        self.resting_target = self.config.initial_target;
        self.follow.snap(self.resting_target);
    }

    fn tick(&mut self, dt: f32) {
        self.follow.tick(dt);
    }
}
