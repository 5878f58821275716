use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use dagsim_core::{Block, BlockId};

/// Index of all accepted blocks: the records themselves, the
/// parent-to-children adjacency derived from their headers, and the
/// current tip set.
///
/// Tips move monotonically: a block enters the tip set on acceptance
/// and leaves it the first time a child of it is accepted.
pub struct BlockRelations {
    blocks: RwLock<HashMap<BlockId, Block>>,
    children: RwLock<HashMap<BlockId, BTreeSet<BlockId>>>,
    tips: RwLock<BTreeSet<BlockId>>,
}

impl BlockRelations {
    pub fn new() -> Self {
        Self {
            blocks: RwLock::new(HashMap::new()),
            children: RwLock::new(HashMap::new()),
            tips: RwLock::new(BTreeSet::new()),
        }
    }

    /// Indexes an accepted block. The caller guarantees that every
    /// parent is already accepted and that the id is fresh.
    pub fn insert(&self, block: Block) {
        let id = block.id();
        let parents = block.parents().to_vec();

        {
            let mut blocks = self.blocks.write().unwrap();
            blocks.insert(id, block);
        }

        {
            let mut children = self.children.write().unwrap();
            for parent in &parents {
                children.entry(*parent).or_default().insert(id);
            }
        }

        {
            let mut tips = self.tips.write().unwrap();
            for parent in &parents {
                tips.remove(parent);
            }
            tips.insert(id);
        }
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        let blocks = self.blocks.read().unwrap();
        blocks.contains_key(id)
    }

    pub fn get(&self, id: &BlockId) -> Option<Block> {
        let blocks = self.blocks.read().unwrap();
        blocks.get(id).cloned()
    }

    /// Parent ids in header order. Empty for genesis and for ids the
    /// index does not know.
    pub fn parents_of(&self, id: &BlockId) -> Vec<BlockId> {
        let blocks = self.blocks.read().unwrap();
        blocks
            .get(id)
            .map(|block| block.parents().to_vec())
            .unwrap_or_default()
    }

    /// Child ids in ascending order. Empty for tips and unknown ids.
    pub fn children_of(&self, id: &BlockId) -> BTreeSet<BlockId> {
        let children = self.children.read().unwrap();
        children.get(id).cloned().unwrap_or_default()
    }

    pub fn time_created(&self, id: &BlockId) -> Option<f64> {
        let blocks = self.blocks.read().unwrap();
        blocks.get(id).map(|block| block.header.time_created)
    }

    pub fn tips(&self) -> BTreeSet<BlockId> {
        let tips = self.tips.read().unwrap();
        tips.clone()
    }

    pub fn is_tip(&self, id: &BlockId) -> bool {
        let tips = self.tips.read().unwrap();
        tips.contains(id)
    }

    /// Number of current tips, the instantaneous DAG width.
    pub fn tip_count(&self) -> usize {
        let tips = self.tips.read().unwrap();
        tips.len()
    }

    /// All accepted ids in ascending order.
    pub fn all_ids(&self) -> Vec<BlockId> {
        let blocks = self.blocks.read().unwrap();
        let mut ids: Vec<BlockId> = blocks.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn block_count(&self) -> usize {
        let blocks = self.blocks.read().unwrap();
        blocks.len()
    }
}

impl Default for BlockRelations {
    fn default() -> Self {
        Self::new()
    }
}
