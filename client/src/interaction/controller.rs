use log::{debug, info};

use stacker_shared::{floor, BlockId, BlockRpc, Transport, Vec3};

use crate::{
    camera::{CameraBasis, ViewFollower},
    config::{InteractionConfig, TowerConfig},
    context::ParticipantContext,
    error::InteractionError,
    interaction::hover_slot::HoverSlot,
};

/// What `push_or_drop` ended up doing
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PushOutcome {
    Pushed { position: Vec3 },
    Dropped { position: Vec3, euler: Vec3 },
}

/// Single selection per participant; turns gestures into block RPCs.
///
/// Selection is local UI state. Ownership is what decides who may move a
/// block, so every gesture needs the selected block's token.
pub struct InteractionController {
    interaction: InteractionConfig,
    tower: TowerConfig,
    selected: Option<BlockId>,
    slot: HoverSlot,
}

impl InteractionController {
    pub fn new(interaction: InteractionConfig, tower: TowerConfig) -> Self {
        Self {
            interaction,
            tower,
            selected: None,
            slot: HoverSlot::center(),
        }
    }

    pub fn selected(&self) -> Option<BlockId> {
        self.selected
    }

    pub fn slot(&self) -> HoverSlot {
        self.slot
    }

    pub(crate) fn select<T: Transport, V: ViewFollower>(
        &mut self,
        block: BlockId,
        ctx: &mut ParticipantContext<'_, T, V>,
    ) -> Result<(), InteractionError> {
        if !ctx.scene.contains(&block) {
            return Err(InteractionError::UnknownBlock { block });
        }
        if let Some(hovering) = ctx.session.hovering_block() {
            if self.selected != Some(block) {
                return Err(InteractionError::HoverInProgress { hovering });
            }
        }

        if let Some(previous) = self.selected {
            if previous != block {
                ctx.scene.set_selected(previous, false);
            }
        }

        let can_request = ctx
            .ownership
            .status(&block)
            .map(|status| status.can_request())
            .unwrap_or(false);
        if can_request {
            ctx.transport.request_ownership(block)?;
            ctx.ownership.mark_requested(&block)?;
        }

        ctx.scene.set_selected(block, true);
        self.selected = Some(block);
        self.slot = HoverSlot::center();
        Ok(())
    }

    /// Drop the selection without touching ownership
    pub(crate) fn clear(&mut self) {
        self.selected = None;
        self.slot = HoverSlot::center();
    }

    pub(crate) fn move_left<T: Transport, V: ViewFollower>(
        &mut self,
        camera: &CameraBasis,
        ctx: &mut ParticipantContext<'_, T, V>,
    ) -> Result<Vec3, InteractionError> {
        self.move_sideways(camera, -1.0, ctx)
    }

    pub(crate) fn move_right<T: Transport, V: ViewFollower>(
        &mut self,
        camera: &CameraBasis,
        ctx: &mut ParticipantContext<'_, T, V>,
    ) -> Result<Vec3, InteractionError> {
        self.move_sideways(camera, 1.0, ctx)
    }

    fn move_sideways<T: Transport, V: ViewFollower>(
        &mut self,
        camera: &CameraBasis,
        direction: f32,
        ctx: &mut ParticipantContext<'_, T, V>,
    ) -> Result<Vec3, InteractionError> {
        let block = self.selected.ok_or(InteractionError::NothingSelected)?;
        let token = ctx.ownership.token(&block)?;
        let sync = ctx
            .scene
            .get(&block)
            .ok_or(InteractionError::UnknownBlock { block })?;
        let current = sync.block().position();
        let flat_right = camera.flat_right();

        let position = if sync.block().is_hovering() {
            if direction < 0.0 {
                self.slot.shift_left();
            } else {
                self.slot.shift_right();
            }
            let mut slotted = self.tower.hover_anchor
                + self.slot.offset(flat_right, self.interaction.slot_distance);
            slotted.y = current.y;
            slotted
        } else {
            current + flat_right * (direction * self.interaction.move_distance)
        };

        ctx.transport.call(&token, BlockRpc::MoveBlock { position })?;
        Ok(position)
    }

    pub(crate) fn push_or_drop<T: Transport, V: ViewFollower>(
        &mut self,
        camera: &CameraBasis,
        ctx: &mut ParticipantContext<'_, T, V>,
    ) -> Result<PushOutcome, InteractionError> {
        let block = self.selected.ok_or(InteractionError::NothingSelected)?;
        let token = ctx.ownership.token(&block)?;
        let sync = ctx
            .scene
            .get(&block)
            .ok_or(InteractionError::UnknownBlock { block })?;
        let current = sync.block().position();
        let half_height = sync.block().half_height();

        if !sync.block().is_hovering() {
            let position = current + camera.flat_forward() * self.interaction.move_distance;
            ctx.transport.call(&token, BlockRpc::MoveBlock { position })?;
            return Ok(PushOutcome::Pushed { position });
        }

        // rest on the highest other block so the drop never starts inside one
        let rest_on = match ctx.scene.tallest_top_excluding(block) {
            Some(top) => top,
            None => {
                debug!("no other block under {}, dropping onto the ground", block);
                self.tower.ground_level
            }
        };
        let position = Vec3::new(current.x, rest_on + half_height, current.z);
        let euler = floor::placement_euler(ctx.session.dropped_count());

        ctx.transport
            .call(&token, BlockRpc::DropBlock { position, euler })?;

        info!("dropping {} at height {}", block, position.y);
        Ok(PushOutcome::Dropped { position, euler })
    }
}
