use glam::{Quat, Vec3};
use log::debug;

use crate::{
    block::{
        block_state::{BlockLifecycle, BodyMode, HoverChange},
        replicated_block::ReplicatedBlock,
    },
    math::quat_from_euler_degrees,
    BlockId, BlockRpc, ParticipantId, SyncConfig,
};

/// The unit of replication: one block's state machine plus the policy that
/// reconciles authoritative updates with the rendered transform.
///
/// The `apply_*` methods run identically on every participant when the
/// matching RPC arrives. They overwrite the target unconditionally; only the
/// block's owner emits those RPCs, so last-writer-wins is enough.
#[cfg_attr(feature = "bevy_support", derive(bevy_ecs::component::Component))]
#[derive(Debug, Clone)]
pub struct BlockSync {
    id: BlockId,
    block: ReplicatedBlock,
}

impl BlockSync {
    pub fn new(id: BlockId, block: ReplicatedBlock) -> Self {
        Self { id, block }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn block(&self) -> &ReplicatedBlock {
        &self.block
    }

    pub fn lifecycle(&self) -> BlockLifecycle {
        self.block.lifecycle()
    }

    pub fn is_owned_by(&self, participant: ParticipantId) -> bool {
        self.block.owner == Some(participant)
    }

    /// Dispatch a received RPC to the matching `apply_*` method
    pub fn apply_rpc(&mut self, rpc: &BlockRpc, local: ParticipantId) -> AppliedRpc {
        match *rpc {
            BlockRpc::MoveBlock { position } => {
                self.apply_move(position);
                AppliedRpc::Moved
            }
            BlockRpc::SetRotation { euler } => {
                self.apply_rotate(euler);
                AppliedRpc::Rotated
            }
            BlockRpc::DropBlock { position, euler } => AppliedRpc::Dropped {
                newly_dropped: self.apply_drop(position, euler),
            },
            BlockRpc::UpdateTransform { position, euler } => {
                let is_local_owner = self.is_owned_by(local);
                self.apply_transform(position, euler, is_local_owner);
                AppliedRpc::Transformed
            }
            BlockRpc::SetHoveringState { hovering, hover_y } => {
                AppliedRpc::Hover(self.apply_hover_state(hovering, hover_y))
            }
        }
    }

    /// `MoveBlock`: snap the rendered and target position
    pub fn apply_move(&mut self, position: Vec3) {
        self.block.position = position;
        self.block.target_position = position;
    }

    /// `SetRotation`: snap the rendered and target rotation
    pub fn apply_rotate(&mut self, euler: Vec3) {
        let rotation = quat_from_euler_degrees(euler);
        self.block.rotation = rotation;
        self.block.target_rotation = rotation;
    }

    /// `DropBlock`: place the block and hand it back to the physics
    /// simulation. Applying it again with the same arguments changes nothing.
    ///
    /// Returns whether this call performed the one-way transition to dropped.
    pub fn apply_drop(&mut self, position: Vec3, euler: Vec3) -> bool {
        let rotation = quat_from_euler_degrees(euler);
        self.block.position = position;
        self.block.rotation = rotation;
        self.block.target_position = position;
        self.block.target_rotation = rotation;

        let newly_dropped = !self.block.is_dropped;
        self.block.is_dropped = true;
        self.apply_hover_state(false, 0.0);
        self.block.body = BodyMode::Simulated;

        newly_dropped
    }

    /// `UpdateTransform`: retarget every copy; the owner also snaps
    pub fn apply_transform(&mut self, position: Vec3, euler: Vec3, is_local_owner: bool) {
        let rotation = quat_from_euler_degrees(euler);
        self.block.target_position = position;
        self.block.target_rotation = rotation;
        if is_local_owner {
            self.block.position = position;
            self.block.rotation = rotation;
        }
    }

    /// `SetHoveringState`: enter or leave the hovering state. A dropped block
    /// can never hover again.
    pub fn apply_hover_state(&mut self, hovering: bool, hover_y: f32) -> HoverChange {
        if self.block.is_dropped && hovering {
            debug!("{} is dropped, refusing to hover it again", self.id);
            return HoverChange::Refused;
        }

        let was_hovering = self.block.is_hovering;
        self.block.is_hovering = hovering;
        if hovering {
            self.block.hover_y = hover_y;
            self.block.body = BodyMode::Kinematic;
        }

        match (was_hovering, hovering) {
            (false, true) => HoverChange::Entered,
            (true, false) => HoverChange::Left,
            _ => HoverChange::Unchanged,
        }
    }

    /// Local-only selection highlight, never replicated
    pub fn set_selected(&mut self, selected: bool) {
        self.block.is_selected = selected;
    }

    /// Record which participant the arbiter says owns this block
    pub fn set_owner(&mut self, owner: Option<ParticipantId>) {
        self.block.owner = owner;
    }

    /// Transform written back by the physics engine for a simulated block.
    /// Kinematic blocks are driven by `update` and ignore it.
    pub fn write_physics_transform(&mut self, position: Vec3, rotation: Quat) -> bool {
        if self.block.body == BodyMode::Kinematic {
            return false;
        }
        self.block.position = position;
        self.block.rotation = rotation;
        true
    }

    /// Restore the copy taken at scene setup
    pub fn reset_to(&mut self, initial: &ReplicatedBlock) {
        self.block = initial.clone();
    }

    /// Per-tick update. The owner integrates its own motion and publishes it as
    /// the target; every other copy chases the last target it received, so a
    /// lost update is simply superseded by the next one.
    pub fn update(&mut self, local: ParticipantId, dt: f32, config: &SyncConfig) {
        if self.is_owned_by(local) {
            self.update_owned(dt, config);
        } else {
            self.update_remote(dt, config);
        }
    }

    fn update_owned(&mut self, dt: f32, config: &SyncConfig) {
        if self.block.is_hovering {
            let t = (dt * config.hover_adjust_speed).clamp(0.0, 1.0);
            let y = self.block.position.y;
            self.block.position.y = y + (self.block.hover_y - y) * t;
        }
        self.block.target_position = self.block.position;
        self.block.target_rotation = self.block.rotation;
    }

    fn update_remote(&mut self, dt: f32, config: &SyncConfig) {
        let factor = config.remote_blend.factor(dt);

        let position = self.block.position.lerp(self.block.target_position, factor);
        self.block.position = if position.distance(self.block.target_position) <= config.snap_epsilon {
            self.block.target_position
        } else {
            position
        };

        let rotation = self.block.rotation.lerp(self.block.target_rotation, factor);
        self.block.rotation = if rotation.angle_between(self.block.target_rotation) <= config.snap_epsilon {
            self.block.target_rotation
        } else {
            rotation
        };
    }
}

/// What applying an RPC did to the block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedRpc {
    Moved,
    Rotated,
    Transformed,
    Dropped { newly_dropped: bool },
    Hover(HoverChange),
}
