use log::info;

use crate::{session::floor, BlockId, Generation};

/// Session-wide bookkeeping every participant derives from the RPCs it
/// applies. Owned by the participant and lent to the interaction controller
/// and boundary trigger, so the single-hover gate has one place of truth.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    dropped_count: u32,
    hovering_block: Option<BlockId>,
    generation: Generation,
}

/// Answer of the hover gate to a block asking to hover
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverAdmission {
    Admitted,
    /// Some block already holds the gate: a consistency violation
    Occupied(BlockId),
}

/// Result of recording a successful drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropRecord {
    pub dropped_count: u32,
    pub floor_completed: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dropped_count(&self) -> u32 {
        self.dropped_count
    }

    pub fn floor_number(&self) -> u32 {
        floor::floor_number(self.dropped_count)
    }

    pub fn is_block_hovering(&self) -> bool {
        self.hovering_block.is_some()
    }

    pub fn hovering_block(&self) -> Option<BlockId> {
        self.hovering_block
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Try to take the hover gate for `block`
    pub fn admit_hover(&mut self, block: BlockId) -> HoverAdmission {
        match self.hovering_block {
            Some(current) => HoverAdmission::Occupied(current),
            None => {
                self.hovering_block = Some(block);
                HoverAdmission::Admitted
            }
        }
    }

    /// Mirror a hover entry applied from the network. Re-asserting the gate
    /// for the block that already holds it is a no-op.
    pub fn mark_hovering(&mut self, block: BlockId) {
        self.hovering_block = Some(block);
    }

    /// Release the gate if `block` holds it
    pub fn release_hover(&mut self, block: BlockId) {
        if self.hovering_block == Some(block) {
            self.hovering_block = None;
        }
    }

    /// Count a block that just transitioned to dropped
    pub fn record_drop(&mut self, block: BlockId) -> DropRecord {
        self.dropped_count += 1;
        self.release_hover(block);
        DropRecord {
            dropped_count: self.dropped_count,
            floor_completed: floor::completes_floor(self.dropped_count),
        }
    }

    /// Start over after a full reset
    pub fn reset(&mut self, generation: Generation) {
        info!(
            "session reset to generation {} after {} drops",
            generation, self.dropped_count
        );
        self.dropped_count = 0;
        self.hovering_block = None;
        self.generation = generation;
    }
}
