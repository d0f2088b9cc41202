use std::collections::BTreeMap;

use log::warn;

use stacker_shared::{
    AppliedRpc, BlockId, BlockRpc, BlockSync, ParticipantId, Quat, ReplicatedBlock, SyncConfig,
    Vec3,
};

use crate::scene::height_index::HeightIndex;

/// Every block of the session as seen by one participant, plus the layout the
/// scene was created with so a reset can restore it.
#[derive(Debug, Clone)]
pub struct TowerScene {
    blocks: BTreeMap<BlockId, BlockSync>,
    initial: BTreeMap<BlockId, ReplicatedBlock>,
    heights: HeightIndex,
}

impl TowerScene {
    pub fn new<I: IntoIterator<Item = (BlockId, ReplicatedBlock)>>(layout: I) -> Self {
        let mut scene = Self {
            blocks: BTreeMap::new(),
            initial: BTreeMap::new(),
            heights: HeightIndex::new(),
        };
        for (id, block) in layout {
            if scene.initial.insert(id, block.clone()).is_some() {
                warn!("{} appears twice in the scene layout, keeping the last one", id);
            }
            scene.heights.update(id, block.top());
            scene.blocks.insert(id, BlockSync::new(id, block));
        }
        scene
    }

    pub fn contains(&self, block: &BlockId) -> bool {
        self.blocks.contains_key(block)
    }

    pub fn get(&self, block: &BlockId) -> Option<&BlockSync> {
        self.blocks.get(block)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &BlockSync> {
        self.blocks.values()
    }

    pub fn block_ids(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.blocks.keys().copied()
    }

    /// Highest block top in the scene
    pub fn tallest_top(&mut self) -> Option<f32> {
        self.heights.tallest()
    }

    /// Highest top among every block other than `block`
    pub fn tallest_top_excluding(&mut self, block: BlockId) -> Option<f32> {
        self.heights.tallest_excluding(block)
    }

    pub(crate) fn apply_rpc(
        &mut self,
        block: BlockId,
        rpc: &BlockRpc,
        local: ParticipantId,
    ) -> Option<AppliedRpc> {
        self.with_block_mut(block, |sync| sync.apply_rpc(rpc, local))
    }

    pub(crate) fn set_owner(&mut self, block: BlockId, owner: Option<ParticipantId>) -> bool {
        self.with_block_mut(block, |sync| sync.set_owner(owner))
            .is_some()
    }

    pub(crate) fn set_selected(&mut self, block: BlockId, selected: bool) -> bool {
        self.with_block_mut(block, |sync| sync.set_selected(selected))
            .is_some()
    }

    pub(crate) fn write_physics_transform(
        &mut self,
        block: BlockId,
        position: Vec3,
        rotation: Quat,
    ) -> bool {
        self.with_block_mut(block, |sync| sync.write_physics_transform(position, rotation))
            .unwrap_or(false)
    }

    pub(crate) fn update_all(&mut self, local: ParticipantId, dt: f32, config: &SyncConfig) {
        for (id, sync) in self.blocks.iter_mut() {
            sync.update(local, dt, config);
            self.heights.update(*id, sync.block().top());
        }
    }

    /// Put every block back where the scene started
    pub(crate) fn reset(&mut self) {
        self.heights.clear();
        for (id, initial) in self.initial.iter() {
            if let Some(sync) = self.blocks.get_mut(id) {
                sync.reset_to(initial);
            }
            self.heights.update(*id, initial.top());
        }
    }

    fn with_block_mut<R>(&mut self, block: BlockId, f: impl FnOnce(&mut BlockSync) -> R) -> Option<R> {
        let sync = self.blocks.get_mut(&block)?;
        let result = f(sync);
        self.heights.update(block, sync.block().top());
        Some(result)
    }
}
