use thiserror::Error;

use stacker_shared::{BlockId, OwnershipError, TransportError};

/// Errors returned by the interaction gestures. None of them reach the player;
/// the gesture simply has no effect.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InteractionError {
    /// A gesture was issued with no block selected
    #[error("No block is selected")]
    NothingSelected,

    /// The block is not part of this participant's scene
    #[error("{block} is not part of the scene")]
    UnknownBlock { block: BlockId },

    /// Another block is hovering and must be dropped first
    #[error("{hovering} is hovering - no other block can be selected")]
    HoverInProgress { hovering: BlockId },

    #[error(transparent)]
    Ownership(#[from] OwnershipError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
