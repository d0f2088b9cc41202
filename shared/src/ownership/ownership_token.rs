use crate::{BlockId, Epoch, OwnershipError, ParticipantId};

/// Outcome of an arbitration, broadcast to the whole room.
/// `owner == None` means the block was released.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OwnershipGrant {
    pub block: BlockId,
    pub owner: Option<ParticipantId>,
    pub epoch: Epoch,
}

impl OwnershipGrant {
    /// The write capability this grant hands to `participant`, if any
    pub fn token_for(&self, participant: ParticipantId) -> Option<OwnershipToken> {
        if self.owner != Some(participant) {
            return None;
        }
        Some(OwnershipToken {
            block: self.block,
            owner: participant,
            epoch: self.epoch,
        })
    }
}

/// Capability to emit authoritative updates for one block. It can only be
/// obtained from the `OwnershipGrant` that named its holder, and it goes
/// stale as soon as the arbiter grants the block again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OwnershipToken {
    block: BlockId,
    owner: ParticipantId,
    epoch: Epoch,
}

impl OwnershipToken {
    pub fn block(&self) -> BlockId {
        self.block
    }

    pub fn owner(&self) -> ParticipantId {
        self.owner
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Check the token against the arbiter's current epoch for the block
    pub fn validate(&self, current_epoch: Epoch) -> Result<(), OwnershipError> {
        if self.epoch != current_epoch {
            return Err(OwnershipError::StaleToken {
                block: self.block,
                token_epoch: self.epoch,
                current_epoch,
            });
        }
        Ok(())
    }
}
