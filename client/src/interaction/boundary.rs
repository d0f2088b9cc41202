use log::{debug, info, warn};

use stacker_shared::{
    floor, BlockId, BlockRpc, HoverAdmission, ParticipantId, Transport, TransportError, Vec3,
};

use crate::{camera::ViewFollower, config::TowerConfig, context::ParticipantContext};

/// The two sensor volumes around the tower
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Volume enclosing the tower; leaving it through the top lifts a block
    /// into the hovering state
    Tower,
    /// Outer volume of the play area; leaving it means a block fell off
    GameOver,
}

/// A block left one of the boundary volumes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundaryExit {
    pub boundary: Boundary,
    pub block: BlockId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    UnknownBlock,
    /// Placed blocks no longer take part in hover bookkeeping
    Dropped,
    /// Another participant owns the block and evaluates its sensors
    OwnedElsewhere,
    /// Nobody owns the block, so nobody may lift it
    NotOwned,
    /// A block fell off but no block is hovering
    NoHoverInProgress,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryOutcome {
    Ignored(IgnoreReason),
    Hovered { position: Vec3, hover_y: f32 },
    /// Two blocks would be airborne at once; a full reset was requested
    ResetRequested,
}

/// Turns boundary exits into hover entries, or into a full session reset
/// when the single-hover rule would break.
pub struct BoundaryTrigger {
    tower: TowerConfig,
}

impl BoundaryTrigger {
    pub fn new(tower: TowerConfig) -> Self {
        Self { tower }
    }

    pub(crate) fn on_exit<T: Transport, V: ViewFollower>(
        &self,
        exit: BoundaryExit,
        local: ParticipantId,
        ctx: &mut ParticipantContext<'_, T, V>,
    ) -> Result<BoundaryOutcome, TransportError> {
        let block = exit.block;
        let Some(sync) = ctx.scene.get(&block) else {
            return Ok(BoundaryOutcome::Ignored(IgnoreReason::UnknownBlock));
        };
        if sync.block().is_dropped() {
            return Ok(BoundaryOutcome::Ignored(IgnoreReason::Dropped));
        }
        if let Some(owner) = sync.block().owner() {
            if owner != local {
                debug!("{} belongs to {}, leaving its sensors to it", block, owner);
                return Ok(BoundaryOutcome::Ignored(IgnoreReason::OwnedElsewhere));
            }
        }

        if let Some(hovering) = ctx.session.hovering_block() {
            warn!(
                "{} left the {:?} boundary while {} hovers, resetting the session",
                block, exit.boundary, hovering
            );
            ctx.transport.request_reset(ctx.session.generation())?;
            return Ok(BoundaryOutcome::ResetRequested);
        }

        match exit.boundary {
            Boundary::GameOver => Ok(BoundaryOutcome::Ignored(IgnoreReason::NoHoverInProgress)),
            Boundary::Tower => self.lift(block, ctx),
        }
    }

    fn lift<T: Transport, V: ViewFollower>(
        &self,
        block: BlockId,
        ctx: &mut ParticipantContext<'_, T, V>,
    ) -> Result<BoundaryOutcome, TransportError> {
        let Ok(token) = ctx.ownership.token(&block) else {
            debug!("{} left the tower but nobody owns it", block);
            return Ok(BoundaryOutcome::Ignored(IgnoreReason::NotOwned));
        };

        let tallest = ctx.scene.tallest_top().unwrap_or(self.tower.ground_level);
        let hover_y = tallest + self.tower.hover_offset;
        let position = Vec3::new(self.tower.hover_anchor.x, hover_y, self.tower.hover_anchor.z);
        let euler = floor::placement_euler(ctx.session.dropped_count());

        if let HoverAdmission::Occupied(current) = ctx.session.admit_hover(block) {
            warn!("hover gate unexpectedly held by {}", current);
            ctx.transport.request_reset(ctx.session.generation())?;
            return Ok(BoundaryOutcome::ResetRequested);
        }
        ctx.view.move_to_tower_top(tallest);

        ctx.transport
            .call(&token, BlockRpc::UpdateTransform { position, euler })?;
        ctx.transport.call(
            &token,
            BlockRpc::SetHoveringState {
                hovering: true,
                hover_y,
            },
        )?;

        info!("{} lifted to hover at {}", block, hover_y);
        Ok(BoundaryOutcome::Hovered { position, hover_y })
    }
}
