//! Block ingestion for the simulated node
//!
//! The processor is the sole mutating entry point of the consensus
//! core: it gates duplicates, pools blocks with unknown parents,
//! accepts the rest into the index, runs the colouring, and replays
//! orphans whose parents have just become available. Every query the
//! surrounding node needs is exposed here as well.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;

use tracing::debug;

use dagsim_core::{Block, BlockId, ConsensusError, KType, Params};

use crate::consensus::dag::{BlockRelations, DagTopology};
use crate::consensus::ghostdag::{DagOrdering, GhostdagData, GhostdagProtocol, GhostdagStore};

use super::orphan_pool::OrphanPool;

/// Outcome class of a single `add_block` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    /// Block entered the accepted index and was coloured
    Accepted,
    /// Block is pooled until its parents arrive
    Orphaned,
    /// Id already known (accepted or pooled); the call was a no-op
    Duplicate,
}

/// Result of processing one incoming block
#[derive(Debug, Clone)]
pub struct BlockProcessingResult {
    pub id: BlockId,
    pub status: BlockStatus,
    /// Previously pooled blocks accepted as a consequence of this
    /// one, in acceptance order.
    pub unorphaned: Vec<BlockId>,
}

impl BlockProcessingResult {
    fn accepted(id: BlockId, unorphaned: Vec<BlockId>) -> Self {
        Self {
            id,
            status: BlockStatus::Accepted,
            unorphaned,
        }
    }

    fn orphaned(id: BlockId) -> Self {
        Self {
            id,
            status: BlockStatus::Orphaned,
            unorphaned: Vec::new(),
        }
    }

    fn duplicate(id: BlockId) -> Self {
        Self {
            id,
            status: BlockStatus::Duplicate,
            unorphaned: Vec::new(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.status, BlockStatus::Accepted)
    }

    pub fn is_orphan(&self) -> bool {
        matches!(self.status, BlockStatus::Orphaned)
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self.status, BlockStatus::Duplicate)
    }
}

/// The DAG store of a simulated node.
///
/// Single-threaded with respect to its own state: the surrounding
/// event loop serialises calls, and every operation runs to
/// completion without suspension. Construction creates genesis.
pub struct BlockProcessor {
    relations: Arc<BlockRelations>,
    topology: Arc<DagTopology>,
    ghostdag: Arc<GhostdagStore>,
    protocol: Arc<GhostdagProtocol>,
    ordering: DagOrdering,
    orphans: Arc<OrphanPool>,
    next_block_id: AtomicU64,
}

impl BlockProcessor {
    pub fn new(params: Params) -> Self {
        let relations = Arc::new(BlockRelations::new());
        let topology = Arc::new(DagTopology::new(relations.clone()));
        let ghostdag = Arc::new(GhostdagStore::new());
        let protocol = Arc::new(GhostdagProtocol::new(
            params.ghostdag_k,
            relations.clone(),
            topology.clone(),
            ghostdag.clone(),
        ));
        let ordering = DagOrdering::new(relations.clone(), ghostdag.clone());

        let processor = Self {
            relations,
            topology,
            ghostdag,
            protocol,
            ordering,
            orphans: Arc::new(OrphanPool::new()),
            next_block_id: AtomicU64::new(0),
        };

        let genesis_id = processor.next_block_id();
        processor.relations.insert(Block::genesis(genesis_id));
        processor.ghostdag.insert(genesis_id, GhostdagData::genesis());
        processor
    }

    /// Hands out the next fresh block id. Genesis consumed id 0 at
    /// construction.
    pub fn next_block_id(&self) -> BlockId {
        BlockId(self.next_block_id.fetch_add(1, AtomicOrdering::SeqCst))
    }

    /// Ingests one block.
    ///
    /// Duplicates (accepted or pooled) are rejected as a no-op.
    /// Blocks with unknown parents are pooled; they are not an error.
    /// Acceptance indexes the block, colours it, and replays every
    /// pooled block whose parents are now available. The `Err` arm
    /// only reports internal invariant violations and is never
    /// produced by orphan or duplicate input.
    pub fn add_block(&self, block: Block) -> Result<BlockProcessingResult, ConsensusError> {
        let id = block.id();

        if self.relations.contains(&id) || self.orphans.contains(&id) {
            debug!("ignoring duplicate block {}", id);
            return Ok(BlockProcessingResult::duplicate(id));
        }

        let all_parents_known = block
            .parents()
            .iter()
            .all(|parent| self.relations.contains(parent));
        if !all_parents_known {
            debug!("pooling orphan block {}", id);
            self.orphans.insert(block);
            return Ok(BlockProcessingResult::orphaned(id));
        }

        self.accept_block(block)?;
        let unorphaned = self.replay_orphans()?;
        if !unorphaned.is_empty() {
            debug!("block {} released {} orphans", id, unorphaned.len());
        }
        Ok(BlockProcessingResult::accepted(id, unorphaned))
    }

    fn accept_block(&self, block: Block) -> Result<(), ConsensusError> {
        let id = block.id();
        self.relations.insert(block);
        let data = self.protocol.calculate(id)?;
        debug!(
            "accepted block {} (blue: {}, score: {})",
            id, data.blue, data.blue_score
        );
        self.ghostdag.insert(id, data);
        Ok(())
    }

    /// Accepts pooled blocks whose parents are all available, in
    /// ascending id order, repeating until no orphan is ready. A work
    /// list rather than recursion: orphan cascades can be long.
    fn replay_orphans(&self) -> Result<Vec<BlockId>, ConsensusError> {
        let mut unorphaned = Vec::new();
        loop {
            let ready = self.orphans.ready_ids(&self.relations);
            if ready.is_empty() {
                break;
            }
            for id in ready {
                if let Some(block) = self.orphans.remove(&id) {
                    self.accept_block(block)?;
                    unorphaned.push(id);
                }
            }
        }
        Ok(unorphaned)
    }

    pub fn has_block(&self, id: &BlockId) -> bool {
        self.relations.contains(id)
    }

    pub fn is_orphan(&self, id: &BlockId) -> bool {
        self.orphans.contains(id)
    }

    /// Whether the block was excluded from its own blue set. False
    /// for unknown ids.
    pub fn is_red(&self, id: &BlockId) -> bool {
        self.ghostdag
            .get(id)
            .map(|data| !data.blue)
            .unwrap_or(false)
    }

    pub fn block(&self, id: &BlockId) -> Option<Block> {
        self.relations.get(id)
    }

    pub fn ghostdag_data(&self, id: &BlockId) -> Option<GhostdagData> {
        self.ghostdag.get(id)
    }

    pub fn blue_score(&self, id: &BlockId) -> Option<u64> {
        self.ghostdag.blue_score(id)
    }

    /// The tip with the greatest blue score, ties to the lesser id.
    /// `None` only when the tip set is empty, which a store with
    /// genesis never exhibits.
    pub fn select_tip(&self) -> Option<BlockId> {
        let mut best: Option<(u64, BlockId)> = None;
        for tip in self.relations.tips() {
            let score = self.ghostdag.blue_score(&tip).unwrap_or(0);
            best = match best {
                Some((best_score, best_id))
                    if score < best_score || (score == best_score && tip > best_id) =>
                {
                    Some((best_score, best_id))
                }
                _ => Some((score, tip)),
            };
        }
        best.map(|(_, id)| id)
    }

    /// Deterministic total order over the accepted DAG.
    pub fn compute_ordering(&self) -> Vec<BlockId> {
        self.ordering.compute()
    }

    /// Child block records, ascending by id. Empty for unknown ids.
    pub fn get_children(&self, id: &BlockId) -> Vec<Block> {
        self.relations
            .children_of(id)
            .iter()
            .filter_map(|child| self.relations.get(child))
            .collect()
    }

    /// Parent block records in header order. Empty for unknown ids.
    pub fn get_parents(&self, id: &BlockId) -> Vec<Block> {
        self.relations
            .parents_of(id)
            .iter()
            .filter_map(|parent| self.relations.get(parent))
            .collect()
    }

    /// Number of current tips.
    pub fn dag_width(&self) -> usize {
        self.relations.tip_count()
    }

    pub fn tips(&self) -> Vec<BlockId> {
        self.relations.tips().into_iter().collect()
    }

    pub fn past(&self, id: BlockId) -> BTreeSet<BlockId> {
        self.topology.past(id)
    }

    pub fn future(&self, id: BlockId) -> BTreeSet<BlockId> {
        self.topology.future(id)
    }

    pub fn anticone(&self, a: BlockId, b: BlockId) -> BTreeSet<BlockId> {
        self.topology.anticone(a, b)
    }

    /// Audit predicate over an arbitrary id set; see
    /// [`GhostdagProtocol::is_k_cluster`].
    pub fn is_k_cluster(&self, set: &BTreeSet<BlockId>) -> bool {
        self.protocol.is_k_cluster(set)
    }

    /// The selected-parent chain from `from` back to genesis, genesis
    /// first. Empty for unknown ids.
    pub fn selected_chain(&self, from: BlockId) -> Vec<BlockId> {
        let mut chain = Vec::new();
        let mut current = from;
        while self.relations.contains(&current) {
            chain.push(current);
            match self.ghostdag.get(&current).and_then(|data| data.selected_parent) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        chain.reverse();
        chain
    }

    pub fn k(&self) -> KType {
        self.protocol.k()
    }

    pub fn block_count(&self) -> usize {
        self.relations.block_count()
    }

    pub fn orphan_count(&self) -> usize {
        self.orphans.len()
    }

    /// Shared handle to the accepted-block index.
    pub fn relations(&self) -> Arc<BlockRelations> {
        self.relations.clone()
    }

    /// Shared handle to the colouring engine.
    pub fn protocol(&self) -> Arc<GhostdagProtocol> {
        self.protocol.clone()
    }
}
