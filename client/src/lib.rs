//! # Stacker Client
//! A participant of a stacker session: keeps a copy of every block in sync
//! with the other players, turns input gestures into block RPCs and watches
//! the tower boundaries.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use stacker_shared::{
        floor, math, BlockId, BlockLifecycle, BlockRpc, BodyMode, Generation, ParticipantId,
        Quat, ReplicatedBlock, SyncConfig, Transport, Vec3,
    };
}

mod camera;
mod config;
mod context;
mod error;
mod events;
mod interaction;
mod ownership_table;
mod participant;
mod scene;

pub use camera::{CameraBasis, CameraRig, ViewFollower};
pub use config::{CameraConfig, InteractionConfig, ParticipantConfig, TowerConfig};
pub use error::InteractionError;
pub use events::ParticipantEvent;
pub use interaction::{
    boundary::{Boundary, BoundaryExit, BoundaryOutcome, BoundaryTrigger, IgnoreReason},
    controller::{InteractionController, PushOutcome},
    hover_slot::HoverSlot,
};
pub use ownership_table::{OwnershipTable, OwnershipTransition};
pub use participant::Participant;
pub use scene::{height_index::HeightIndex, tower_scene::TowerScene};
