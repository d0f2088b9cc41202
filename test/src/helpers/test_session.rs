use log::debug;

use stacker_client::{Participant, ParticipantConfig, ParticipantEvent};
use stacker_server::{RelayConfig, RelayHandle, RelayLink};
use stacker_shared::{BlockId, ParticipantId, Transport};

use super::TowerLayout;

pub const ROOM_NAME: &str = "tower";

/// Safety valve for `pump`: a healthy session settles well within this
const MAX_PUMP_ROUNDS: usize = 64;

pub type TestParticipant = Participant<RelayLink>;

/// A relay plus a room full of participants sharing one tower layout
pub struct TestSession {
    relay: RelayHandle,
    layout: TowerLayout,
    participants: Vec<TestParticipant>,
}

impl TestSession {
    /// `players` participants on a seeded, lossless relay
    pub fn new(players: usize, layout: TowerLayout) -> Self {
        let relay_config = RelayConfig {
            seed: Some(0x5eed),
            ..Default::default()
        };
        Self::with_config(players, layout, relay_config, ParticipantConfig::default())
    }

    pub fn with_config(
        players: usize,
        layout: TowerLayout,
        relay_config: RelayConfig,
        participant_config: ParticipantConfig,
    ) -> Self {
        let relay = RelayHandle::new(relay_config);
        let mut session = Self {
            relay,
            layout,
            participants: Vec::new(),
        };
        for _ in 0..players {
            session.add_participant_with(participant_config.clone());
        }
        session.pump();
        session.clear_events();
        session
    }

    /// Connect one more participant and put it in the room
    pub fn add_participant(&mut self) -> usize {
        self.add_participant_with(ParticipantConfig::default())
    }

    fn add_participant_with(&mut self, config: ParticipantConfig) -> usize {
        let link = self.relay.connect().expect("relay lock");
        if self.participants.is_empty() {
            link.create_room(ROOM_NAME).expect("room is created");
        } else {
            link.join_room(ROOM_NAME).expect("room has space");
        }
        self.participants
            .push(Participant::new(config, link, self.layout.blocks()));
        self.participants.len() - 1
    }

    pub fn relay(&self) -> &RelayHandle {
        &self.relay
    }

    pub fn layout(&self) -> &TowerLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn participant(&self, index: usize) -> &TestParticipant {
        &self.participants[index]
    }

    pub fn participant_mut(&mut self, index: usize) -> &mut TestParticipant {
        &mut self.participants[index]
    }

    pub fn participants(&self) -> impl Iterator<Item = &TestParticipant> {
        self.participants.iter()
    }

    /// Deliver and apply messages until nothing is left in flight.
    /// Returns how many messages the participants applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        for round in 0..MAX_PUMP_ROUNDS {
            let delivered = self.relay.deliver_all().expect("relay lock");
            let mut received = 0;
            for participant in self.participants.iter_mut() {
                received += participant.receive_all_messages().expect("participant is connected");
            }
            applied += received;
            if delivered == 0 && received == 0 {
                debug!("session settled after {} rounds", round);
                return applied;
            }
        }
        panic!("session did not settle after {} rounds", MAX_PUMP_ROUNDS);
    }

    /// Advance every participant by `dt`
    pub fn tick(&mut self, dt: f32) {
        for participant in self.participants.iter_mut() {
            participant.tick(dt);
        }
    }

    /// `ticks` rounds of pump then tick
    pub fn run(&mut self, ticks: usize, dt: f32) {
        for _ in 0..ticks {
            self.pump();
            self.tick(dt);
        }
    }

    /// Select `block` on one participant and let the arbiter answer
    pub fn select_and_settle(&mut self, index: usize, block: BlockId) {
        self.participants[index]
            .select(block)
            .expect("block can be selected");
        self.pump();
    }

    /// The relay's view of who owns `block`
    pub fn owner(&self, block: BlockId) -> Option<ParticipantId> {
        let anyone = self.participants.first()?.transport().participant();
        self.relay
            .with_relay(|relay| relay.owner_of(&anyone, &block))
            .expect("relay lock")
    }

    pub fn events(&mut self, index: usize) -> Vec<ParticipantEvent> {
        self.participants[index].take_events()
    }

    pub fn clear_events(&mut self) {
        for participant in self.participants.iter_mut() {
            participant.take_events();
        }
    }
}
