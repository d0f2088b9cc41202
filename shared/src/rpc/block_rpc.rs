use glam::Vec3;

use crate::{BlockId, ParticipantId};

/// Discrete remote procedures a block's owner emits. Every member of the
/// room, the sender included, applies them to its own copy.
///
/// Angles are Euler degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockRpc {
    MoveBlock { position: Vec3 },
    SetRotation { euler: Vec3 },
    DropBlock { position: Vec3, euler: Vec3 },
    UpdateTransform { position: Vec3, euler: Vec3 },
    SetHoveringState { hovering: bool, hover_y: f32 },
}

impl BlockRpc {
    /// Wire name of the procedure
    pub fn name(&self) -> &'static str {
        match self {
            BlockRpc::MoveBlock { .. } => "MoveBlock",
            BlockRpc::SetRotation { .. } => "SetRotation",
            BlockRpc::DropBlock { .. } => "DropBlock",
            BlockRpc::UpdateTransform { .. } => "UpdateTransform",
            BlockRpc::SetHoveringState { .. } => "SetHoveringState",
        }
    }
}

/// A block RPC as delivered by the relay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockCall {
    pub sender: ParticipantId,
    pub block: BlockId,
    pub rpc: BlockRpc,
}
