use thiserror::Error;

use stacker_shared::{SessionError, TransportError};

/// Errors returned by the relay's session operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}
