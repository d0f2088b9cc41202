use std::collections::{HashMap, VecDeque};

use stacker_shared::{BlockId, BlockRpc, Generation, OwnershipToken, ParticipantId};

use crate::{ownership::OwnershipArbiter, relay::OwnershipPolicy};

/// A request submitted by a participant, waiting for `Relay::deliver_all`
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outbound {
    Call {
        token: OwnershipToken,
        rpc: BlockRpc,
    },
    RequestOwnership(BlockId),
    RequestReset(Generation),
}

/// A room as advertised in the lobby
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomListing {
    pub name: String,
    pub players: usize,
    pub max_players: usize,
}

/// One play session: its members, the ownership arbiter and the per-sender
/// queues of submitted requests.
pub struct Room {
    name: String,
    members: Vec<ParticipantId>,
    arbiter: OwnershipArbiter,
    generation: Generation,
    pending: HashMap<ParticipantId, VecDeque<Outbound>>,
}

impl Room {
    pub fn new(name: &str, policy: OwnershipPolicy) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
            arbiter: OwnershipArbiter::new(policy),
            generation: 0,
            pending: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[ParticipantId] {
        &self.members
    }

    pub fn has_member(&self, participant: &ParticipantId) -> bool {
        self.members.contains(participant)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn arbiter(&self) -> &OwnershipArbiter {
        &self.arbiter
    }

    pub(crate) fn arbiter_mut(&mut self) -> &mut OwnershipArbiter {
        &mut self.arbiter
    }

    pub(crate) fn add_member(&mut self, participant: ParticipantId) {
        if !self.has_member(&participant) {
            self.members.push(participant);
        }
    }

    /// Remove a member along with anything it submitted but was not yet
    /// delivered
    pub(crate) fn remove_member(&mut self, participant: &ParticipantId) {
        self.members.retain(|member| member != participant);
        self.pending.remove(participant);
    }

    pub(crate) fn enqueue(&mut self, sender: ParticipantId, outbound: Outbound) {
        self.pending.entry(sender).or_default().push_back(outbound);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.values().map(VecDeque::len).sum()
    }

    /// Senders with something queued, in a stable order
    pub(crate) fn ready_senders(&self) -> Vec<ParticipantId> {
        let mut senders: Vec<ParticipantId> = self
            .pending
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(sender, _)| *sender)
            .collect();
        senders.sort();
        senders
    }

    pub(crate) fn pop_from(&mut self, sender: &ParticipantId) -> Option<Outbound> {
        self.pending.get_mut(sender)?.pop_front()
    }

    /// Advance to the next generation, releasing every block
    pub(crate) fn advance_generation(&mut self) -> Generation {
        self.generation += 1;
        self.arbiter.reset();
        self.generation
    }
}
