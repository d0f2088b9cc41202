use std::collections::HashMap;

use stacker_shared::BlockId;

/// Running maximum of block top surfaces. Writes are O(1); a full rescan only
/// happens when the block holding the maximum moves down.
#[derive(Debug, Default, Clone)]
pub struct HeightIndex {
    tops: HashMap<BlockId, f32>,
    max: Option<(BlockId, f32)>,
    dirty: bool,
}

impl HeightIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tops.is_empty()
    }

    pub fn update(&mut self, block: BlockId, top: f32) {
        self.tops.insert(block, top);
        if self.dirty {
            return;
        }
        match self.max {
            Some((_, max_top)) if top >= max_top => self.max = Some((block, top)),
            Some((max_block, _)) if max_block == block => self.dirty = true,
            Some(_) => {}
            None => self.max = Some((block, top)),
        }
    }

    pub fn remove(&mut self, block: &BlockId) {
        self.tops.remove(block);
        if matches!(self.max, Some((max_block, _)) if max_block == *block) {
            self.dirty = true;
        }
    }

    pub fn clear(&mut self) {
        self.tops.clear();
        self.max = None;
        self.dirty = false;
    }

    /// Highest top surface over every block
    pub fn tallest(&mut self) -> Option<f32> {
        self.refresh();
        self.max.map(|(_, top)| top)
    }

    /// Highest top surface over every block except `excluded`
    pub fn tallest_excluding(&mut self, excluded: BlockId) -> Option<f32> {
        self.refresh();
        match self.max {
            Some((max_block, top)) if max_block != excluded => Some(top),
            _ => self.scan(Some(excluded)).map(|(_, top)| top),
        }
    }

    fn refresh(&mut self) {
        if self.dirty {
            self.max = self.scan(None);
            self.dirty = false;
        }
    }

    fn scan(&self, excluded: Option<BlockId>) -> Option<(BlockId, f32)> {
        self.tops
            .iter()
            .filter(|(block, _)| Some(**block) != excluded)
            .fold(None, |best: Option<(BlockId, f32)>, (block, top)| match best {
                Some((_, best_top)) if best_top >= *top => best,
                _ => Some((*block, *top)),
            })
    }
}
