use stacker_shared::{floor, math::quat_from_euler_degrees, BlockId, ReplicatedBlock, Vec3};

/// Half the height of every block in the test towers
pub const HALF_HEIGHT: f32 = 0.25;
/// Distance between the centres of neighbouring blocks on one floor
pub const BLOCK_SPACING: f32 = 1.0;

/// Fluent builder for the initial arrangement of blocks
#[derive(Clone, Debug)]
pub struct TowerLayout {
    blocks: Vec<(BlockId, ReplicatedBlock)>,
}

impl TowerLayout {
    pub fn empty() -> Self {
        Self { blocks: Vec::new() }
    }

    /// A lone block lying on the ground
    pub fn single() -> Self {
        Self::empty().with_block(1, Vec3::new(0.0, HALF_HEIGHT, 0.0))
    }

    /// A finished tower: `floors` floors of three blocks, alternating
    /// orientation, block ids counting up from 1 at the bottom
    pub fn stack(floors: u32) -> Self {
        let mut layout = Self::empty();
        let mut id = 1;
        for floor_index in 0..floors {
            let euler = floor::placement_euler(floor_index * floor::BLOCKS_PER_FLOOR);
            let y = HALF_HEIGHT + floor_index as f32 * 2.0 * HALF_HEIGHT;
            for slot in -1..=1 {
                let offset = slot as f32 * BLOCK_SPACING;
                let position = if floor_index % 2 == 0 {
                    Vec3::new(offset, y, 0.0)
                } else {
                    Vec3::new(0.0, y, offset)
                };
                layout
                    .blocks
                    .push((BlockId::from_u64(id), Self::block(position, euler)));
                id += 1;
            }
        }
        layout
    }

    /// Add a block with the given id, lying flat at `position`
    pub fn with_block(mut self, id: u64, position: Vec3) -> Self {
        self.blocks.push((
            BlockId::from_u64(id),
            Self::block(position, floor::EVEN_FLOOR_EULER),
        ));
        self
    }

    pub fn block_ids(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|(id, _)| *id).collect()
    }

    pub fn blocks(&self) -> Vec<(BlockId, ReplicatedBlock)> {
        self.blocks.clone()
    }

    pub fn top(&self) -> f32 {
        self.blocks
            .iter()
            .map(|(_, block)| block.top())
            .fold(f32::MIN, f32::max)
    }

    fn block(position: Vec3, euler: Vec3) -> ReplicatedBlock {
        ReplicatedBlock::new(position, quat_from_euler_degrees(euler), HALF_HEIGHT)
    }
}

impl Default for TowerLayout {
    fn default() -> Self {
        Self::stack(3)
    }
}
