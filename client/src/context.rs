use stacker_shared::{SessionState, Transport};

use crate::{camera::ViewFollower, ownership_table::OwnershipTable, scene::tower_scene::TowerScene};

/// The participant state a gesture or boundary event may touch, lent out for
/// the duration of one call.
pub(crate) struct ParticipantContext<'a, T: Transport, V: ViewFollower> {
    pub scene: &'a mut TowerScene,
    pub session: &'a mut SessionState,
    pub ownership: &'a mut OwnershipTable,
    pub transport: &'a mut T,
    pub view: &'a mut V,
}
