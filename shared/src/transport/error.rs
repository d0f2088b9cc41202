use thiserror::Error;

use crate::ParticipantId;

/// Errors reported locally by a `Transport` endpoint. Delivery failures are
/// never reported: sends are fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The endpoint is not a member of any room
    #[error("{participant} is not in a room")]
    NotInRoom { participant: ParticipantId },

    /// The endpoint was never connected, or has disconnected
    #[error("{participant} is not connected")]
    NotConnected { participant: ParticipantId },

    /// The shared relay state lock is poisoned
    #[error("Relay lock is poisoned - a panic occurred while holding the lock")]
    LockPoisoned,
}
