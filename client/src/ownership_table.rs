use std::collections::HashMap;

use log::debug;

use stacker_shared::{
    BlockId, Epoch, OwnershipError, OwnershipGrant, OwnershipStatus, OwnershipToken,
    ParticipantId,
};

/// How a received grant changed this participant's access to a block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OwnershipTransition {
    Gained,
    Lost,
    /// The block moved between other participants, or was released by one
    Unchanged,
    /// The grant was older than what this table already knows
    Outdated,
}

struct OwnershipRecord {
    status: OwnershipStatus,
    owner: Option<ParticipantId>,
    epoch: Epoch,
    token: Option<OwnershipToken>,
}

impl OwnershipRecord {
    fn new() -> Self {
        Self {
            status: OwnershipStatus::Available,
            owner: None,
            epoch: 0,
            token: None,
        }
    }
}

/// One participant's view of who owns which block, and the tokens it holds
pub struct OwnershipTable {
    local: ParticipantId,
    records: HashMap<BlockId, OwnershipRecord>,
}

impl OwnershipTable {
    pub fn new(local: ParticipantId) -> Self {
        Self {
            local,
            records: HashMap::new(),
        }
    }

    /// Register a block with the table
    ///
    /// # Panics
    ///
    /// Panics if the block is already registered.
    /// Consider using `try_register_block` for non-panicking error handling.
    pub fn register_block(&mut self, block: BlockId) {
        self.try_register_block(block)
            .expect("Block cannot register with the ownership table more than once!")
    }

    /// Register a block with the table
    ///
    /// Returns an error if the block is already registered.
    pub fn try_register_block(&mut self, block: BlockId) -> Result<(), OwnershipError> {
        if self.records.contains_key(&block) {
            return Err(OwnershipError::BlockAlreadyRegistered { block });
        }
        self.records.insert(block, OwnershipRecord::new());
        Ok(())
    }

    pub fn status(&self, block: &BlockId) -> Option<OwnershipStatus> {
        self.records.get(block).map(|record| record.status)
    }

    pub fn owner(&self, block: &BlockId) -> Option<ParticipantId> {
        self.records.get(block).and_then(|record| record.owner)
    }

    pub fn is_local_owner(&self, block: &BlockId) -> bool {
        self.owner(block) == Some(self.local)
    }

    /// The write capability for `block`, if this participant holds it
    pub fn token(&self, block: &BlockId) -> Result<OwnershipToken, OwnershipError> {
        let record = self.record(block, "token")?;
        record.token.ok_or(OwnershipError::NotOwner {
            block: *block,
            participant: self.local,
        })
    }

    /// Note that a request for `block` is in flight
    pub fn mark_requested(&mut self, block: &BlockId) -> Result<(), OwnershipError> {
        let record = self.record_mut(block, "mark_requested")?;
        record.status = OwnershipStatus::Requested;
        Ok(())
    }

    /// Adopt a grant broadcast by the arbiter
    pub fn apply_grant(&mut self, grant: &OwnershipGrant) -> Result<OwnershipTransition, OwnershipError> {
        let local = self.local;
        let record = self.record_mut(&grant.block, "apply_grant")?;

        if grant.epoch < record.epoch {
            debug!(
                "ignoring outdated grant for {} (epoch {} < {})",
                grant.block, grant.epoch, record.epoch
            );
            return Ok(OwnershipTransition::Outdated);
        }

        let had_token = record.token.is_some();
        record.epoch = grant.epoch;
        record.owner = grant.owner;
        record.token = grant.token_for(local);
        record.status = match grant.owner {
            Some(owner) if owner == local => OwnershipStatus::Granted,
            Some(_) => OwnershipStatus::Denied,
            None if record.status.is_requested() => OwnershipStatus::Requested,
            None => OwnershipStatus::Available,
        };

        Ok(match (had_token, record.token.is_some()) {
            (false, true) => OwnershipTransition::Gained,
            (true, false) => OwnershipTransition::Lost,
            _ => OwnershipTransition::Unchanged,
        })
    }

    /// The arbiter refused this participant's request
    pub fn apply_denied(&mut self, block: &BlockId, owner: ParticipantId) -> Result<(), OwnershipError> {
        let record = self.record_mut(block, "apply_denied")?;
        record.status = OwnershipStatus::Denied;
        record.owner = Some(owner);
        record.token = None;
        Ok(())
    }

    /// Forget every owner and token; epochs are kept so that grants from
    /// before the reset stay outdated
    pub fn reset(&mut self) {
        for record in self.records.values_mut() {
            record.status = OwnershipStatus::Available;
            record.owner = None;
            record.token = None;
        }
    }

    fn record(&self, block: &BlockId, operation: &'static str) -> Result<&OwnershipRecord, OwnershipError> {
        self.records
            .get(block)
            .ok_or(OwnershipError::BlockNotRegistered {
                block: *block,
                operation,
            })
    }

    fn record_mut(
        &mut self,
        block: &BlockId,
        operation: &'static str,
    ) -> Result<&mut OwnershipRecord, OwnershipError> {
        self.records
            .get_mut(block)
            .ok_or(OwnershipError::BlockNotRegistered {
                block: *block,
                operation,
            })
    }
}
