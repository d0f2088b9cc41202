//! # Stacker Shared
//! Replicated block state, ownership tokens and the block RPC protocol shared
//! by stacker participants & the relay.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use glam::{Quat, Vec3};

mod block;
mod config;
mod error;
pub mod math;
mod ownership;
mod rpc;
mod session;
mod transition;
mod transport;
mod types;

pub use block::{
    block_state::{BlockLifecycle, BodyMode, HoverChange},
    block_sync::{AppliedRpc, BlockSync},
    replicated_block::ReplicatedBlock,
};
pub use config::{BlendMode, SyncConfig};
pub use error::{OwnershipError, SessionError};
pub use ownership::{
    ownership_status::OwnershipStatus,
    ownership_token::{OwnershipGrant, OwnershipToken},
};
pub use rpc::{
    block_rpc::{BlockCall, BlockRpc},
    inbound::Inbound,
};
pub use session::{
    floor,
    session_state::{DropRecord, HoverAdmission, SessionState},
};
pub use transition::{Interpolate, TimedTransition};
pub use transport::{error::TransportError, Transport};
pub use types::{BlockId, Epoch, Generation, ParticipantId};
