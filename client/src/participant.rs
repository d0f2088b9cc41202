use std::collections::HashSet;

use log::{debug, info, warn};

use stacker_shared::{
    AppliedRpc, BlockCall, BlockId, BlockRpc, BlockSync, Generation, HoverChange, Inbound,
    OwnershipGrant, ParticipantId, Quat, ReplicatedBlock, SessionState, Transport,
    TransportError, Vec3,
};

use crate::{
    camera::{CameraBasis, CameraRig, ViewFollower},
    config::ParticipantConfig,
    context::ParticipantContext,
    error::InteractionError,
    events::{ParticipantEvent, ParticipantEvents},
    interaction::{
        boundary::{BoundaryExit, BoundaryOutcome, BoundaryTrigger},
        controller::{InteractionController, PushOutcome},
        hover_slot::HoverSlot,
    },
    ownership_table::{OwnershipTable, OwnershipTransition},
    scene::tower_scene::TowerScene,
};

macro_rules! context {
    ($participant:ident) => {
        ParticipantContext {
            scene: &mut $participant.scene,
            session: &mut $participant.session,
            ownership: &mut $participant.ownership,
            transport: &mut $participant.transport,
            view: &mut $participant.view,
        }
    };
}

/// One player's end of the session: a copy of every block, the interaction
/// controller, the boundary trigger, and the transport to everyone else.
///
/// Drive it once per frame: `receive_all_messages`, then input gestures and
/// boundary exits as they happen, then `tick`.
pub struct Participant<T: Transport, V: ViewFollower = CameraRig> {
    id: ParticipantId,
    config: ParticipantConfig,
    transport: T,
    view: V,
    scene: TowerScene,
    session: SessionState,
    ownership: OwnershipTable,
    controller: InteractionController,
    boundary: BoundaryTrigger,
    camera: CameraBasis,
    events: ParticipantEvents,
    /// Drops applied locally that the relay has not looped back yet
    unconfirmed_drops: HashSet<BlockId>,
}

impl<T: Transport> Participant<T, CameraRig> {
    /// Create a participant following the tower with the default camera rig
    pub fn new<I>(config: ParticipantConfig, transport: T, layout: I) -> Self
    where
        I: IntoIterator<Item = (BlockId, ReplicatedBlock)>,
    {
        let view = CameraRig::new(config.camera.clone());
        Self::with_view(config, transport, view, layout)
    }
}

impl<T: Transport, V: ViewFollower> Participant<T, V> {
    pub fn with_view<I>(config: ParticipantConfig, transport: T, view: V, layout: I) -> Self
    where
        I: IntoIterator<Item = (BlockId, ReplicatedBlock)>,
    {
        let id = transport.participant();
        let scene = TowerScene::new(layout);

        let mut ownership = OwnershipTable::new(id);
        for block in scene.block_ids() {
            ownership.register_block(block);
        }

        let controller =
            InteractionController::new(config.interaction.clone(), config.tower.clone());
        let boundary = BoundaryTrigger::new(config.tower.clone());

        Self {
            id,
            config,
            transport,
            view,
            scene,
            session: SessionState::new(),
            ownership,
            controller,
            boundary,
            camera: CameraBasis::default(),
            events: ParticipantEvents::new(),
            unconfirmed_drops: HashSet::new(),
        }
    }

    // Accessors

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn config(&self) -> &ParticipantConfig {
        &self.config
    }

    pub fn scene(&self) -> &TowerScene {
        &self.scene
    }

    pub fn block(&self, block: &BlockId) -> Option<&BlockSync> {
        self.scene.get(block)
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn ownership(&self) -> &OwnershipTable {
        &self.ownership
    }

    pub fn selected(&self) -> Option<BlockId> {
        self.controller.selected()
    }

    pub fn hover_slot(&self) -> HoverSlot {
        self.controller.slot()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Update the camera orientation gestures are relative to
    pub fn set_camera_basis(&mut self, camera: CameraBasis) {
        self.camera = camera;
    }

    pub fn take_events(&mut self) -> Vec<ParticipantEvent> {
        self.events.take()
    }

    // Gestures

    pub fn select(&mut self, block: BlockId) -> Result<(), InteractionError> {
        let mut ctx = context!(self);
        self.controller.select(block, &mut ctx)
    }

    pub fn move_left(&mut self) -> Result<Vec3, InteractionError> {
        let mut ctx = context!(self);
        self.controller.move_left(&self.camera, &mut ctx)
    }

    pub fn move_right(&mut self) -> Result<Vec3, InteractionError> {
        let mut ctx = context!(self);
        self.controller.move_right(&self.camera, &mut ctx)
    }

    /// Push the selected block, or drop it if it hovers. A drop is applied
    /// to the local copy right away; the copy looped back by the relay then
    /// finds the block already dropped.
    pub fn push_or_drop(&mut self) -> Result<PushOutcome, InteractionError> {
        let mut ctx = context!(self);
        let outcome = self.controller.push_or_drop(&self.camera, &mut ctx)?;
        if let PushOutcome::Dropped { position, euler } = outcome {
            if let Some(block) = self.controller.selected() {
                self.apply_block_rpc(block, &BlockRpc::DropBlock { position, euler }, self.id);
                self.unconfirmed_drops.insert(block);
            }
        }
        Ok(outcome)
    }

    // Sensors & engine

    /// Report that a block left one of the boundary volumes
    pub fn on_boundary_exit(&mut self, exit: BoundaryExit) -> Result<BoundaryOutcome, TransportError> {
        let local = self.id;
        let mut ctx = context!(self);
        self.boundary.on_exit(exit, local, &mut ctx)
    }

    /// Transform of a simulated block as computed by the physics engine. Only
    /// accepted for blocks this participant owns or that nobody owns; other
    /// copies follow their owner.
    pub fn write_physics_transform(&mut self, block: BlockId, position: Vec3, rotation: Quat) -> bool {
        match self.ownership.owner(&block) {
            Some(owner) if owner != self.id => false,
            _ => self.scene.write_physics_transform(block, position, rotation),
        }
    }

    /// Advance every block copy and the view by `dt` seconds
    pub fn tick(&mut self, dt: f32) {
        self.scene.update_all(self.id, dt, &self.config.sync);
        self.view.tick(dt);
    }

    // Inbound

    /// Apply everything the transport delivered since the last call.
    /// Returns how many messages were processed.
    pub fn receive_all_messages(&mut self) -> Result<usize, TransportError> {
        let messages = self.transport.receive()?;
        let count = messages.len();
        for message in messages {
            self.handle_message(message);
        }
        Ok(count)
    }

    fn handle_message(&mut self, message: Inbound) {
        match message {
            Inbound::Call(call) => self.handle_call(call),
            Inbound::OwnershipChanged(grant) => self.handle_grant(grant),
            Inbound::OwnershipDenied { block, owner } => {
                if let Err(err) = self.ownership.apply_denied(&block, owner) {
                    warn!("{}", err);
                    return;
                }
                self.scene.set_owner(block, Some(owner));
                self.events
                    .push(ParticipantEvent::OwnershipDenied { block, owner });
            }
            Inbound::SessionReset { generation } => self.handle_reset(generation),
            Inbound::ParticipantJoined(participant) => {
                self.events
                    .push(ParticipantEvent::ParticipantJoined(participant));
            }
            Inbound::ParticipantLeft(participant) => {
                self.events.push(ParticipantEvent::ParticipantLeft(participant));
            }
        }
    }

    fn handle_call(&mut self, call: BlockCall) {
        if call.sender == self.id && matches!(call.rpc, BlockRpc::DropBlock { .. }) {
            self.unconfirmed_drops.remove(&call.block);
        }
        self.apply_block_rpc(call.block, &call.rpc, call.sender);
    }

    fn apply_block_rpc(&mut self, block: BlockId, rpc: &BlockRpc, sender: ParticipantId) {
        let Some(applied) = self.scene.apply_rpc(block, rpc, self.id) else {
            warn!("{} sent {} for unknown {}", sender, rpc.name(), block);
            return;
        };

        match applied {
            AppliedRpc::Dropped {
                newly_dropped: true,
            } => {
                let record = self.session.record_drop(block);
                self.view.restore_target();
                if record.floor_completed {
                    let height = self
                        .scene
                        .get(&block)
                        .map(|sync| sync.block().height())
                        .unwrap_or_default();
                    self.view.increase_target_height(height);
                    self.events.push(ParticipantEvent::FloorCompleted {
                        floor: self.session.floor_number(),
                    });
                }
                self.events.push(ParticipantEvent::BlockDropped {
                    block,
                    dropped_count: record.dropped_count,
                });
            }
            AppliedRpc::Dropped {
                newly_dropped: false,
            } => {
                debug!("{} was already dropped", block);
            }
            AppliedRpc::Hover(HoverChange::Entered) => {
                if let Some(current) = self.session.hovering_block() {
                    if current != block {
                        warn!("{} and {} are hovering at once, resetting the session", current, block);
                        if let Err(err) = self.transport.request_reset(self.session.generation()) {
                            warn!("{}", err);
                        }
                    }
                }
                self.session.mark_hovering(block);
                self.events.push(ParticipantEvent::BlockHovered(block));
            }
            AppliedRpc::Hover(HoverChange::Left) => {
                self.session.release_hover(block);
            }
            _ => {}
        }
    }

    fn handle_grant(&mut self, grant: OwnershipGrant) {
        let transition = match self.ownership.apply_grant(&grant) {
            Ok(transition) => transition,
            Err(err) => {
                warn!("{}", err);
                return;
            }
        };
        if transition == OwnershipTransition::Outdated {
            return;
        }

        self.scene.set_owner(grant.block, grant.owner);
        match transition {
            OwnershipTransition::Gained => {
                debug!("{} now owns {}", self.id, grant.block);
                self.events
                    .push(ParticipantEvent::OwnershipGranted(grant.block));
            }
            OwnershipTransition::Lost => {
                debug!("{} lost {}", self.id, grant.block);
                // a lift that never made it through the relay leaves the gate behind
                let hovering = self
                    .scene
                    .get(&grant.block)
                    .map(|sync| sync.block().is_hovering())
                    .unwrap_or(false);
                if !hovering {
                    self.session.release_hover(grant.block);
                }
                // the relay refused our drop, so the copies no longer agree
                if self.unconfirmed_drops.remove(&grant.block) {
                    warn!("drop of {} was refused by the relay, resetting the session", grant.block);
                    if let Err(err) = self.transport.request_reset(self.session.generation()) {
                        warn!("{}", err);
                    }
                }
                self.events.push(ParticipantEvent::OwnershipLost(grant.block));
            }
            _ => {}
        }
    }

    fn handle_reset(&mut self, generation: Generation) {
        if generation <= self.session.generation() {
            debug!("ignoring reset to generation {}, already at {}", generation, self.session.generation());
            return;
        }
        info!("{} reloading the scene (generation {})", self.id, generation);

        if let Some(selected) = self.controller.selected() {
            self.scene.set_selected(selected, false);
        }
        self.controller.clear();
        self.unconfirmed_drops.clear();
        self.scene.reset();
        self.session.reset(generation);
        self.ownership.reset();
        self.view.reset();
        self.events.push(ParticipantEvent::SessionReset { generation });
    }
}
