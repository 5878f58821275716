use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;

use dagsim_core::BlockId;

use crate::consensus::dag::BlockRelations;

use super::stores::GhostdagStore;

/// Heap key for the ordering: the greatest blue score is emitted
/// first, ties go to the earlier creation time, then the lesser id.
struct OrderKey {
    blue_score: u64,
    time_created: f64,
    id: BlockId,
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.blue_score
            .cmp(&other.blue_score)
            .then_with(|| other.time_created.total_cmp(&self.time_created))
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OrderKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderKey {}

/// Deterministic total order over the accepted DAG.
///
/// Kahn-style emission: a block becomes ready once all its parents
/// are emitted, and the priority queue picks among ready blocks by
/// blue score, creation time and id. Pure and stateless; calling it
/// twice without an intervening acceptance yields the same sequence.
pub struct DagOrdering {
    relations: Arc<BlockRelations>,
    store: Arc<GhostdagStore>,
}

impl DagOrdering {
    pub fn new(relations: Arc<BlockRelations>, store: Arc<GhostdagStore>) -> Self {
        Self { relations, store }
    }

    pub fn compute(&self) -> Vec<BlockId> {
        let ids = self.relations.all_ids();
        let mut ordering = Vec::with_capacity(ids.len());

        let mut pending_parents: HashMap<BlockId, usize> = ids
            .iter()
            .map(|id| (*id, self.relations.parents_of(id).len()))
            .collect();

        let mut ready = BinaryHeap::new();
        for (&id, &pending) in pending_parents.iter() {
            if pending == 0 {
                ready.push(self.key(id));
            }
        }

        while let Some(key) = ready.pop() {
            ordering.push(key.id);
            for child in self.relations.children_of(&key.id) {
                if let Some(pending) = pending_parents.get_mut(&child) {
                    *pending -= 1;
                    if *pending == 0 {
                        ready.push(self.key(child));
                    }
                }
            }
        }

        ordering
    }

    fn key(&self, id: BlockId) -> OrderKey {
        OrderKey {
            blue_score: self.store.blue_score(&id).unwrap_or(0),
            time_created: self.relations.time_created(&id).unwrap_or(0.0),
            id,
        }
    }
}
