pub mod error;

use crate::{BlockId, BlockRpc, Generation, Inbound, OwnershipToken, ParticipantId};

use self::error::TransportError;

/// The relayed messaging fabric a participant talks through.
///
/// Every send is fire-and-forget: an `Ok` only means the message was handed
/// to the fabric. Calls reach every member of the room, the sender included,
/// in the order the sender issued them; there is no ordering across senders.
pub trait Transport {
    /// The participant this endpoint speaks for
    fn participant(&self) -> ParticipantId;

    /// Ask the arbiter for exclusive write access to `block`. The answer
    /// arrives later as an `Inbound::OwnershipChanged` or
    /// `Inbound::OwnershipDenied`.
    fn request_ownership(&mut self, block: BlockId) -> Result<(), TransportError>;

    /// Broadcast a block RPC. Only the holder of the block's current token may
    /// emit; calls carrying an outdated token are dropped by the relay.
    fn call(&mut self, token: &OwnershipToken, rpc: BlockRpc) -> Result<(), TransportError>;

    /// Ask for a full session reset of the room, stamped with the
    /// generation the requester currently sees.
    fn request_reset(&mut self, generation: Generation) -> Result<(), TransportError>;

    /// Drain everything delivered to this endpoint since the last call
    fn receive(&mut self) -> Result<Vec<Inbound>, TransportError>;
}
