use glam::{Quat, Vec3};

use crate::{
    block::block_state::{BlockLifecycle, BodyMode},
    math::top_surface,
    ParticipantId,
};

/// One participant's copy of a block's replicated data.
///
/// Only `BlockSync` mutates it; every participant holds an identical copy
/// apart from `is_selected`, which is local UI state.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplicatedBlock {
    pub(crate) position: Vec3,
    pub(crate) rotation: Quat,
    pub(crate) target_position: Vec3,
    pub(crate) target_rotation: Quat,
    pub(crate) is_hovering: bool,
    pub(crate) is_selected: bool,
    pub(crate) is_dropped: bool,
    pub(crate) owner: Option<ParticipantId>,
    pub(crate) hover_y: f32,
    pub(crate) half_height: f32,
    pub(crate) body: BodyMode,
}

impl ReplicatedBlock {
    /// A block resting at `position`, with its target equal to its transform.
    /// `half_height` is half of the block's vertical thickness.
    pub fn new(position: Vec3, rotation: Quat, half_height: f32) -> Self {
        Self {
            position,
            rotation,
            target_position: position,
            target_rotation: rotation,
            is_hovering: false,
            is_selected: false,
            is_dropped: false,
            owner: None,
            hover_y: 0.0,
            half_height,
            body: BodyMode::Simulated,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    pub fn target_rotation(&self) -> Quat {
        self.target_rotation
    }

    pub fn is_hovering(&self) -> bool {
        self.is_hovering
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn is_dropped(&self) -> bool {
        self.is_dropped
    }

    pub fn owner(&self) -> Option<ParticipantId> {
        self.owner
    }

    pub fn hover_y(&self) -> f32 {
        self.hover_y
    }

    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    /// Full vertical thickness of the block
    pub fn height(&self) -> f32 {
        self.half_height * 2.0
    }

    pub fn body(&self) -> BodyMode {
        self.body
    }

    pub fn top(&self) -> f32 {
        top_surface(self.position.y, self.half_height)
    }

    pub fn lifecycle(&self) -> BlockLifecycle {
        if self.is_dropped {
            BlockLifecycle::Dropped
        } else if self.is_hovering {
            BlockLifecycle::Hovering
        } else {
            BlockLifecycle::Idle
        }
    }
}
