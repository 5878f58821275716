use std::collections::HashMap;
use std::sync::RwLock;

use dagsim_core::BlockId;
use serde::{Deserialize, Serialize};

/// GHOSTDAG consensus data for a single block.
///
/// Written once at acceptance and never revised: later colourings
/// read these frozen values instead of re-running the colouring of
/// ancestors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostdagData {
    /// Whether the block was admitted to its own blue set
    pub blue: bool,
    /// Blue blocks in the past, plus one if the block itself is blue
    pub blue_score: u64,
    /// Parent with the highest blue score; `None` for genesis
    pub selected_parent: Option<BlockId>,
}

impl GhostdagData {
    pub fn new(blue: bool, blue_score: u64, selected_parent: Option<BlockId>) -> Self {
        Self {
            blue,
            blue_score,
            selected_parent,
        }
    }

    /// Data recorded for a block with an empty past.
    pub fn genesis() -> Self {
        Self {
            blue: true,
            blue_score: 1,
            selected_parent: None,
        }
    }
}

/// Store of per-block GHOSTDAG data, keyed by block id.
///
/// Holds an entry for exactly the accepted blocks.
pub struct GhostdagStore {
    data: RwLock<HashMap<BlockId, GhostdagData>>,
}

impl GhostdagStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, id: BlockId, data: GhostdagData) {
        let mut store = self.data.write().unwrap();
        store.insert(id, data);
    }

    pub fn get(&self, id: &BlockId) -> Option<GhostdagData> {
        let store = self.data.read().unwrap();
        store.get(id).cloned()
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        let store = self.data.read().unwrap();
        store.contains_key(id)
    }

    /// Frozen blue flag; false for unknown ids.
    pub fn is_blue(&self, id: &BlockId) -> bool {
        let store = self.data.read().unwrap();
        store.get(id).map(|data| data.blue).unwrap_or(false)
    }

    pub fn blue_score(&self, id: &BlockId) -> Option<u64> {
        let store = self.data.read().unwrap();
        store.get(id).map(|data| data.blue_score)
    }
}

impl Default for GhostdagStore {
    fn default() -> Self {
        Self::new()
    }
}
