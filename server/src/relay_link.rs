use std::sync::{Arc, Mutex, MutexGuard};

use stacker_shared::{
    BlockId, BlockRpc, Generation, Inbound, OwnershipToken, ParticipantId, SessionError,
    Transport, TransportError,
};

use crate::{
    error::RelayError,
    relay::{Relay, RelayConfig},
    room::{Outbound, RoomListing},
};

/// Shared handle to an in-process relay. Cloning it shares the same relay.
#[derive(Clone)]
pub struct RelayHandle {
    relay: Arc<Mutex<Relay>>,
}

impl RelayHandle {
    pub fn new(config: RelayConfig) -> Self {
        Self {
            relay: Arc::new(Mutex::new(Relay::new(config))),
        }
    }

    /// Connect a new participant and return its endpoint
    pub fn connect(&self) -> Result<RelayLink, TransportError> {
        let participant = self.lock()?.connect();
        Ok(RelayLink {
            relay: self.clone(),
            participant,
        })
    }

    /// Process every queued request, see `Relay::deliver_all`
    pub fn deliver_all(&self) -> Result<usize, TransportError> {
        Ok(self.lock()?.deliver_all())
    }

    /// Run `f` against the relay while holding its lock
    pub fn with_relay<R>(&self, f: impl FnOnce(&mut Relay) -> R) -> Result<R, TransportError> {
        let mut relay = self.lock()?;
        Ok(f(&mut relay))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Relay>, TransportError> {
        self.relay.lock().map_err(|_| TransportError::LockPoisoned)
    }
}

/// One participant's endpoint on a `RelayHandle`
pub struct RelayLink {
    relay: RelayHandle,
    participant: ParticipantId,
}

impl RelayLink {
    pub fn handle(&self) -> &RelayHandle {
        &self.relay
    }

    pub fn join_lobby(&self) -> Result<(), RelayError> {
        let participant = self.participant;
        self.relay
            .with_relay(|relay| relay.join_lobby(participant))??;
        Ok(())
    }

    /// Rooms open for joining; the endpoint must be in the lobby
    pub fn rooms(&self) -> Result<Vec<RoomListing>, RelayError> {
        let participant = self.participant;
        let rooms = self.relay.with_relay(|relay| relay.rooms(&participant))??;
        Ok(rooms)
    }

    pub fn create_room(&self, name: &str) -> Result<(), RelayError> {
        let participant = self.participant;
        self.relay
            .with_relay(|relay| relay.create_room(participant, name))??;
        Ok(())
    }

    pub fn join_room(&self, name: &str) -> Result<(), RelayError> {
        let participant = self.participant;
        self.relay
            .with_relay(|relay| relay.join_room(participant, name))??;
        Ok(())
    }

    pub fn leave_room(&self) -> Result<(), RelayError> {
        let participant = self.participant;
        self.relay
            .with_relay(|relay| relay.leave_room(&participant))??;
        Ok(())
    }

    /// Members of the room this endpoint is in
    pub fn room_members(&self) -> Result<Vec<ParticipantId>, RelayError> {
        let participant = self.participant;
        let members = self.relay.with_relay(|relay| {
            relay
                .room_of(&participant)
                .map(|room| room.members().to_vec())
                .ok_or(SessionError::NotInRoom { participant })
        })??;
        Ok(members)
    }

    pub fn disconnect(&self) -> Result<(), RelayError> {
        let participant = self.participant;
        self.relay
            .with_relay(|relay| relay.disconnect(&participant))?;
        Ok(())
    }

    fn submit(&self, outbound: Outbound) -> Result<(), TransportError> {
        let participant = self.participant;
        self.relay
            .with_relay(|relay| relay.submit(participant, outbound))?
    }
}

impl Transport for RelayLink {
    fn participant(&self) -> ParticipantId {
        self.participant
    }

    fn request_ownership(&mut self, block: BlockId) -> Result<(), TransportError> {
        self.submit(Outbound::RequestOwnership(block))
    }

    fn call(&mut self, token: &OwnershipToken, rpc: BlockRpc) -> Result<(), TransportError> {
        self.submit(Outbound::Call { token: *token, rpc })
    }

    fn request_reset(&mut self, generation: Generation) -> Result<(), TransportError> {
        self.submit(Outbound::RequestReset(generation))
    }

    fn receive(&mut self) -> Result<Vec<Inbound>, TransportError> {
        let participant = self.participant;
        self.relay
            .with_relay(|relay| relay.take_inbox(&participant))?
    }
}
