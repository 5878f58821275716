use std::collections::HashMap;
use std::sync::RwLock;

use dagsim_core::{Block, BlockId};

use crate::consensus::dag::BlockRelations;

/// Holding pen for blocks that arrived before all of their parents.
///
/// An id is either here or in the accepted index, never both; a block
/// leaves the pool exactly once, on acceptance.
pub struct OrphanPool {
    orphans: RwLock<HashMap<BlockId, Block>>,
}

impl OrphanPool {
    pub fn new() -> Self {
        Self {
            orphans: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, block: Block) {
        let mut orphans = self.orphans.write().unwrap();
        orphans.insert(block.id(), block);
    }

    pub fn remove(&self, id: &BlockId) -> Option<Block> {
        let mut orphans = self.orphans.write().unwrap();
        orphans.remove(id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        let orphans = self.orphans.read().unwrap();
        orphans.contains_key(id)
    }

    pub fn get(&self, id: &BlockId) -> Option<Block> {
        let orphans = self.orphans.read().unwrap();
        orphans.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        let orphans = self.orphans.read().unwrap();
        orphans.len()
    }

    pub fn is_empty(&self) -> bool {
        let orphans = self.orphans.read().unwrap();
        orphans.is_empty()
    }

    /// Ids of pooled blocks whose parents are now all accepted, in
    /// ascending order so replay is deterministic.
    pub fn ready_ids(&self, relations: &BlockRelations) -> Vec<BlockId> {
        let orphans = self.orphans.read().unwrap();
        let mut ready: Vec<BlockId> = orphans
            .iter()
            .filter(|(_, block)| {
                block
                    .parents()
                    .iter()
                    .all(|parent| relations.contains(parent))
            })
            .map(|(id, _)| *id)
            .collect();
        ready.sort();
        ready
    }
}

impl Default for OrphanPool {
    fn default() -> Self {
        Self::new()
    }
}
