use std::mem;

use stacker_shared::{BlockId, Generation, ParticipantId};

/// Something the application may want to react to (sound, UI, analytics)
#[derive(Debug, Clone, PartialEq)]
pub enum ParticipantEvent {
    OwnershipGranted(BlockId),
    OwnershipLost(BlockId),
    OwnershipDenied {
        block: BlockId,
        owner: ParticipantId,
    },
    BlockHovered(BlockId),
    BlockDropped {
        block: BlockId,
        dropped_count: u32,
    },
    FloorCompleted {
        floor: u32,
    },
    SessionReset {
        generation: Generation,
    },
    ParticipantJoined(ParticipantId),
    ParticipantLeft(ParticipantId),
}

#[derive(Debug, Default)]
pub(crate) struct ParticipantEvents {
    events: Vec<ParticipantEvent>,
}

impl ParticipantEvents {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: ParticipantEvent) {
        self.events.push(event);
    }

    pub fn take(&mut self) -> Vec<ParticipantEvent> {
        mem::take(&mut self.events)
    }
}
