use std::default::Default;

use crate::link_conditioner::LinkConditionerConfig;

/// How the arbiter answers a request for a block someone else owns
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OwnershipPolicy {
    /// The requester always takes the block over
    Takeover,
    /// The request is denied until the current owner releases the block
    Exclusive,
}

/// Contains Config properties which will be used by the Relay
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Maximum number of participants in one room
    pub max_players_per_room: usize,
    /// Used to arbitrate concurrent ownership requests
    pub ownership_policy: OwnershipPolicy,
    /// Simulated loss/duplication of block calls. `None` delivers every call
    /// exactly once.
    pub link_conditioner: Option<LinkConditionerConfig>,
    /// Seed for the generator that interleaves senders and drives the link
    /// conditioner. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            max_players_per_room: 20,
            ownership_policy: OwnershipPolicy::Takeover,
            link_conditioner: None,
            seed: None,
        }
    }
}
