use std::collections::HashMap;

use log::debug;

use stacker_shared::{
    BlockId, Epoch, OwnershipError, OwnershipGrant, OwnershipToken, ParticipantId,
};

use crate::relay::OwnershipPolicy;

/// The arbiter's answer to one ownership request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arbitration {
    /// Ownership moved to the requester; broadcast to the room
    Granted(OwnershipGrant),
    /// The requester already holds the block; the current grant is repeated
    AlreadyOwner(OwnershipGrant),
    /// Refused under the exclusive policy
    Denied { owner: ParticipantId },
}

#[derive(Default)]
struct OwnershipRecord {
    owner: Option<ParticipantId>,
    epoch: Epoch,
}

impl OwnershipRecord {
    fn grant(&self, block: BlockId) -> OwnershipGrant {
        OwnershipGrant {
            block,
            owner: self.owner,
            epoch: self.epoch,
        }
    }
}

/// Serializes ownership requests for one room. Every change of owner bumps
/// the block's epoch, which is what makes older tokens stale.
pub struct OwnershipArbiter {
    policy: OwnershipPolicy,
    records: HashMap<BlockId, OwnershipRecord>,
}

impl OwnershipArbiter {
    pub fn new(policy: OwnershipPolicy) -> Self {
        Self {
            policy,
            records: HashMap::new(),
        }
    }

    pub fn policy(&self) -> OwnershipPolicy {
        self.policy
    }

    pub fn owner(&self, block: &BlockId) -> Option<ParticipantId> {
        self.records.get(block).and_then(|record| record.owner)
    }

    pub fn epoch(&self, block: &BlockId) -> Epoch {
        self.records.get(block).map(|record| record.epoch).unwrap_or(0)
    }

    pub fn request(&mut self, block: BlockId, requester: ParticipantId) -> Arbitration {
        let policy = self.policy;
        let record = self.records.entry(block).or_default();

        match record.owner {
            Some(owner) if owner == requester => Arbitration::AlreadyOwner(record.grant(block)),
            Some(owner) if policy == OwnershipPolicy::Exclusive => {
                debug!("{} denied {}, held by {}", requester, block, owner);
                Arbitration::Denied { owner }
            }
            _ => {
                record.owner = Some(requester);
                record.epoch += 1;
                debug!("{} granted to {} (epoch {})", block, requester, record.epoch);
                Arbitration::Granted(record.grant(block))
            }
        }
    }

    /// Check that `token` still names the current owner and epoch
    pub fn validate(&self, token: &OwnershipToken) -> Result<(), OwnershipError> {
        let block = token.block();
        let record = self
            .records
            .get(&block)
            .ok_or(OwnershipError::BlockNotRegistered {
                block,
                operation: "validate",
            })?;
        token.validate(record.epoch)?;
        if record.owner != Some(token.owner()) {
            return Err(OwnershipError::NotOwner {
                block,
                participant: token.owner(),
            });
        }
        Ok(())
    }

    /// Release `block` if `participant` owns it
    pub fn release(&mut self, block: &BlockId, participant: ParticipantId) -> Option<OwnershipGrant> {
        let record = self.records.get_mut(block)?;
        if record.owner != Some(participant) {
            return None;
        }
        record.owner = None;
        record.epoch += 1;
        Some(record.grant(*block))
    }

    /// Release everything `participant` owns, returning the resulting grants
    pub fn release_all(&mut self, participant: ParticipantId) -> Vec<OwnershipGrant> {
        let mut owned: Vec<BlockId> = self
            .records
            .iter()
            .filter(|(_, record)| record.owner == Some(participant))
            .map(|(block, _)| *block)
            .collect();
        owned.sort();

        owned
            .iter()
            .filter_map(|block| self.release(block, participant))
            .collect()
    }

    /// Clear every owner. Epochs move forward so that tokens issued before
    /// the reset can no longer be used.
    pub fn reset(&mut self) {
        for record in self.records.values_mut() {
            if record.owner.take().is_some() {
                record.epoch += 1;
            }
        }
    }

    /// Current grant of every owned block
    pub fn grants(&self) -> Vec<OwnershipGrant> {
        let mut grants: Vec<OwnershipGrant> = self
            .records
            .iter()
            .filter(|(_, record)| record.owner.is_some())
            .map(|(block, record)| record.grant(*block))
            .collect();
        grants.sort_by_key(|grant| grant.block);
        grants
    }
}
