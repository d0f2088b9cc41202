use crate::{BlockCall, BlockId, Generation, OwnershipGrant, ParticipantId};

/// Everything the relay delivers to a participant
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// A block RPC from the block's owner (possibly this participant)
    Call(BlockCall),
    /// Ownership of a block moved, broadcast to the whole room
    OwnershipChanged(OwnershipGrant),
    /// This participant's ownership request was refused
    OwnershipDenied {
        block: BlockId,
        owner: ParticipantId,
    },
    /// The room's scene must be reloaded; `generation` is the new generation
    SessionReset { generation: Generation },
    ParticipantJoined(ParticipantId),
    ParticipantLeft(ParticipantId),
}
