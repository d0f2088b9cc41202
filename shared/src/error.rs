use thiserror::Error;

use crate::{BlockId, Epoch, ParticipantId};

/// Errors that can occur while checking or using block ownership
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OwnershipError {
    /// The local participant does not currently own the block
    #[error("{participant} does not own {block}")]
    NotOwner {
        block: BlockId,
        participant: ParticipantId,
    },

    /// A token from an earlier grant was presented after ownership moved on
    #[error("Stale ownership token for {block}: token epoch {token_epoch}, current epoch {current_epoch}")]
    StaleToken {
        block: BlockId,
        token_epoch: Epoch,
        current_epoch: Epoch,
    },

    /// The block was never registered for ownership tracking
    #[error("{block} is not registered - operation '{operation}' requires registration")]
    BlockNotRegistered {
        block: BlockId,
        operation: &'static str,
    },

    /// The block is already registered and cannot be registered again
    #[error("{block} is already registered")]
    BlockAlreadyRegistered { block: BlockId },
}

/// Errors raised while creating or joining a session room
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Room '{name}' already exists")]
    RoomAlreadyExists { name: String },

    #[error("Room '{name}' does not exist")]
    RoomNotFound { name: String },

    #[error("Room '{name}' is full ({max_players} players)")]
    RoomFull { name: String, max_players: usize },

    #[error("{participant} is not connected to the relay")]
    NotConnected { participant: ParticipantId },

    #[error("{participant} is not in a room")]
    NotInRoom { participant: ParticipantId },

    #[error("{participant} has not joined the lobby")]
    NotInLobby { participant: ParticipantId },

    #[error("{participant} is already in room '{name}'")]
    AlreadyInRoom {
        participant: ParticipantId,
        name: String,
    },
}
