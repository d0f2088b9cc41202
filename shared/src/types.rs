use std::fmt;

/// Identifies one participant of a session (assigned by the relay on connect).
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct ParticipantId(u64);

impl ParticipantId {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "participant#{}", self.0)
    }
}

/// Identifies one replicated block. Blocks are created at scene setup with the
/// same id on every participant.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct BlockId(u64);

impl BlockId {
    pub fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block#{}", self.0)
    }
}

/// Ownership generation of a single block, bumped by the arbiter on every grant.
pub type Epoch = u32;

/// Number of full session resets performed in a room.
pub type Generation = u32;
