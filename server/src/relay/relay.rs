use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};

use stacker_shared::{
    BlockCall, BlockId, Generation, Inbound, OwnershipGrant, ParticipantId, SessionError,
    TransportError,
};

use crate::{
    ownership::Arbitration,
    relay::RelayConfig,
    room::{Outbound, Room, RoomListing},
};

/// Per-participant queues of delivered messages
#[derive(Default)]
struct Mailboxes {
    inboxes: HashMap<ParticipantId, Vec<Inbound>>,
}

impl Mailboxes {
    fn open(&mut self, participant: ParticipantId) {
        self.inboxes.entry(participant).or_default();
    }

    fn close(&mut self, participant: &ParticipantId) {
        self.inboxes.remove(participant);
    }

    fn is_open(&self, participant: &ParticipantId) -> bool {
        self.inboxes.contains_key(participant)
    }

    fn send(&mut self, participant: &ParticipantId, message: Inbound) {
        if let Some(inbox) = self.inboxes.get_mut(participant) {
            inbox.push(message);
        }
    }

    fn broadcast(&mut self, members: &[ParticipantId], message: &Inbound) {
        for member in members {
            self.send(member, message.clone());
        }
    }

    fn take(&mut self, participant: &ParticipantId) -> Option<Vec<Inbound>> {
        self.inboxes.get_mut(participant).map(std::mem::take)
    }
}

/// In-process relay standing in for the hosted room service. Participants
/// submit requests; `deliver_all` processes them, interleaving senders at
/// random while keeping each sender's requests in order.
pub struct Relay {
    config: RelayConfig,
    rng: fastrand::Rng,
    next_participant: u64,
    mailboxes: Mailboxes,
    rooms: HashMap<String, Room>,
    memberships: HashMap<ParticipantId, String>,
    lobby: HashSet<ParticipantId>,
}

impl Relay {
    pub fn new(config: RelayConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            config,
            rng,
            next_participant: 1,
            mailboxes: Mailboxes::default(),
            rooms: HashMap::new(),
            memberships: HashMap::new(),
            lobby: HashSet::new(),
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    // Connections

    pub fn connect(&mut self) -> ParticipantId {
        let participant = ParticipantId::from_u64(self.next_participant);
        self.next_participant += 1;
        self.mailboxes.open(participant);
        info!("{} connected", participant);
        participant
    }

    pub fn disconnect(&mut self, participant: &ParticipantId) {
        if self.memberships.contains_key(participant) {
            if let Err(err) = self.leave_room(participant) {
                warn!("{}", err);
            }
        }
        self.lobby.remove(participant);
        self.mailboxes.close(participant);
        info!("{} disconnected", participant);
    }

    pub fn is_connected(&self, participant: &ParticipantId) -> bool {
        self.mailboxes.is_open(participant)
    }

    // Lobby

    /// Enter the lobby, where open rooms can be listed. Joining or creating a
    /// room leaves the lobby.
    pub fn join_lobby(&mut self, participant: ParticipantId) -> Result<(), SessionError> {
        self.check_can_join(participant)?;
        if self.lobby.insert(participant) {
            info!("{} joined the lobby", participant);
        }
        Ok(())
    }

    pub fn leave_lobby(&mut self, participant: &ParticipantId) -> bool {
        self.lobby.remove(participant)
    }

    pub fn in_lobby(&self, participant: &ParticipantId) -> bool {
        self.lobby.contains(participant)
    }

    /// Open rooms sorted by name, as seen from the lobby
    pub fn rooms(&self, participant: &ParticipantId) -> Result<Vec<RoomListing>, SessionError> {
        if !self.in_lobby(participant) {
            return Err(SessionError::NotInLobby {
                participant: *participant,
            });
        }
        let mut listings: Vec<RoomListing> = self
            .rooms
            .values()
            .map(|room| RoomListing {
                name: room.name().to_string(),
                players: room.member_count(),
                max_players: self.config.max_players_per_room,
            })
            .collect();
        listings.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listings)
    }

    // Rooms

    /// Create a room and join it
    pub fn create_room(&mut self, participant: ParticipantId, name: &str) -> Result<(), SessionError> {
        self.check_can_join(participant)?;
        if self.rooms.contains_key(name) {
            return Err(SessionError::RoomAlreadyExists {
                name: name.to_string(),
            });
        }
        self.rooms
            .insert(name.to_string(), Room::new(name, self.config.ownership_policy));
        info!("room '{}' created", name);
        self.join_room(participant, name)
    }

    pub fn join_room(&mut self, participant: ParticipantId, name: &str) -> Result<(), SessionError> {
        self.check_can_join(participant)?;
        let max_players = self.config.max_players_per_room;
        let room = self
            .rooms
            .get_mut(name)
            .ok_or_else(|| SessionError::RoomNotFound {
                name: name.to_string(),
            })?;
        if room.member_count() >= max_players {
            return Err(SessionError::RoomFull {
                name: name.to_string(),
                max_players,
            });
        }

        let existing = room.members().to_vec();
        room.add_member(participant);
        self.memberships.insert(participant, name.to_string());
        self.lobby.remove(&participant);

        self.mailboxes
            .broadcast(&existing, &Inbound::ParticipantJoined(participant));
        for member in existing.iter() {
            self.mailboxes
                .send(&participant, Inbound::ParticipantJoined(*member));
        }

        // late joiners catch up on the generation and current owners
        if room.generation() > 0 {
            self.mailboxes.send(
                &participant,
                Inbound::SessionReset {
                    generation: room.generation(),
                },
            );
        }
        for grant in room.arbiter().grants() {
            self.mailboxes
                .send(&participant, Inbound::OwnershipChanged(grant));
        }

        info!("{} joined room '{}'", participant, name);
        Ok(())
    }

    /// Leave the current room, releasing every block the participant owns
    pub fn leave_room(&mut self, participant: &ParticipantId) -> Result<(), SessionError> {
        let name = self
            .memberships
            .remove(participant)
            .ok_or(SessionError::NotInRoom {
                participant: *participant,
            })?;
        let Some(room) = self.rooms.get_mut(&name) else {
            return Err(SessionError::RoomNotFound { name });
        };

        room.remove_member(participant);
        let released = room.arbiter_mut().release_all(*participant);
        let members = room.members().to_vec();
        for grant in released {
            self.mailboxes
                .broadcast(&members, &Inbound::OwnershipChanged(grant));
        }
        self.mailboxes
            .broadcast(&members, &Inbound::ParticipantLeft(*participant));
        info!("{} left room '{}'", participant, name);

        if room.is_empty() {
            self.rooms.remove(&name);
            info!("room '{}' closed", name);
        }
        Ok(())
    }

    fn check_can_join(&self, participant: ParticipantId) -> Result<(), SessionError> {
        if !self.is_connected(&participant) {
            return Err(SessionError::NotConnected { participant });
        }
        if let Some(name) = self.memberships.get(&participant) {
            return Err(SessionError::AlreadyInRoom {
                participant,
                name: name.clone(),
            });
        }
        Ok(())
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn room_of(&self, participant: &ParticipantId) -> Option<&Room> {
        self.memberships
            .get(participant)
            .and_then(|name| self.rooms.get(name))
    }

    pub fn room_members(&self, name: &str) -> Option<Vec<ParticipantId>> {
        self.rooms.get(name).map(|room| room.members().to_vec())
    }

    /// Current owner of `block` in the participant's room
    pub fn owner_of(&self, participant: &ParticipantId, block: &BlockId) -> Option<ParticipantId> {
        self.room_of(participant)
            .and_then(|room| room.arbiter().owner(block))
    }

    // Messaging

    /// Queue a request for delivery
    pub fn submit(&mut self, sender: ParticipantId, outbound: Outbound) -> Result<(), TransportError> {
        if !self.is_connected(&sender) {
            return Err(TransportError::NotConnected {
                participant: sender,
            });
        }
        let room = self
            .memberships
            .get(&sender)
            .and_then(|name| self.rooms.get_mut(name))
            .ok_or(TransportError::NotInRoom {
                participant: sender,
            })?;
        room.enqueue(sender, outbound);
        Ok(())
    }

    /// Everything delivered to `participant` since the last call
    pub fn take_inbox(&mut self, participant: &ParticipantId) -> Result<Vec<Inbound>, TransportError> {
        self.mailboxes
            .take(participant)
            .ok_or(TransportError::NotConnected {
                participant: *participant,
            })
    }

    /// Process every queued request. Returns how many were processed.
    pub fn deliver_all(&mut self) -> usize {
        let mut names: Vec<String> = self.rooms.keys().cloned().collect();
        names.sort();

        let mut processed = 0;
        for name in names {
            let Some(room) = self.rooms.get_mut(&name) else {
                continue;
            };
            loop {
                let senders = room.ready_senders();
                if senders.is_empty() {
                    break;
                }
                let sender = senders[self.rng.usize(..senders.len())];
                let Some(outbound) = room.pop_from(&sender) else {
                    continue;
                };
                Self::process(
                    &self.config,
                    &mut self.rng,
                    &mut self.mailboxes,
                    room,
                    sender,
                    outbound,
                );
                processed += 1;
            }
        }
        processed
    }

    fn process(
        config: &RelayConfig,
        rng: &mut fastrand::Rng,
        mailboxes: &mut Mailboxes,
        room: &mut Room,
        sender: ParticipantId,
        outbound: Outbound,
    ) {
        match outbound {
            Outbound::Call { token, rpc } => {
                if token.owner() != sender {
                    warn!("{} presented a token belonging to {}", sender, token.owner());
                    return;
                }
                if let Err(err) = room.arbiter().validate(&token) {
                    debug!("dropping {} from {}: {}", rpc.name(), sender, err);
                    return;
                }
                let call = BlockCall {
                    sender,
                    block: token.block(),
                    rpc,
                };
                for member in room.members() {
                    let copies = match (&config.link_conditioner, *member == sender) {
                        (Some(conditioner), false) => conditioner.copies(rng),
                        _ => 1,
                    };
                    for _ in 0..copies {
                        mailboxes.send(member, Inbound::Call(call));
                    }
                }
            }
            Outbound::RequestOwnership(block) => {
                let arbitration = room.arbiter_mut().request(block, sender);
                match arbitration {
                    Arbitration::Granted(grant) => {
                        mailboxes.broadcast(room.members(), &Inbound::OwnershipChanged(grant));
                    }
                    Arbitration::AlreadyOwner(grant) => {
                        mailboxes.send(&sender, Inbound::OwnershipChanged(grant));
                    }
                    Arbitration::Denied { owner } => {
                        mailboxes.send(&sender, Inbound::OwnershipDenied { block, owner });
                    }
                }
            }
            Outbound::RequestReset(generation) => {
                if generation != room.generation() {
                    debug!(
                        "ignoring reset from {} for generation {}, room '{}' is at {}",
                        sender,
                        generation,
                        room.name(),
                        room.generation()
                    );
                    return;
                }
                let next: Generation = room.advance_generation();
                info!("room '{}' reset by {}, now generation {}", room.name(), sender, next);
                mailboxes.broadcast(room.members(), &Inbound::SessionReset { generation: next });
            }
        }
    }

    /// Grants currently held in the participant's room
    pub fn grants(&self, participant: &ParticipantId) -> Vec<OwnershipGrant> {
        self.room_of(participant)
            .map(|room| room.arbiter().grants())
            .unwrap_or_default()
    }
}
