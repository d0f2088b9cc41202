//! # Stacker Server
//! The relay that hosts stacker rooms: it arbitrates block ownership, fans
//! block RPCs out to every member and deduplicates session resets.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use stacker_shared as shared;

mod error;
mod link_conditioner;
mod ownership;
mod relay;
mod relay_link;
mod room;

pub use error::RelayError;
pub use link_conditioner::LinkConditionerConfig;
pub use ownership::{Arbitration, OwnershipArbiter};
pub use relay::{OwnershipPolicy, Relay, RelayConfig};
pub use relay_link::{RelayHandle, RelayLink};
pub use room::{Outbound, Room, RoomListing};
