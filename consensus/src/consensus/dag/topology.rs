use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;

use dagsim_core::BlockId;

use super::relations::BlockRelations;

/// Read-only graph queries over the accepted set.
///
/// Past, future and anticone are the three regions of the DAG
/// relative to a block; every query here is a pure function of the
/// index and never mutates it.
pub struct DagTopology {
    relations: Arc<BlockRelations>,
}

impl DagTopology {
    pub fn new(relations: Arc<BlockRelations>) -> Self {
        Self { relations }
    }

    /// All ancestors of `id` reachable over parent edges, excluding
    /// `id` itself. Unknown ids yield the empty set.
    pub fn past(&self, id: BlockId) -> BTreeSet<BlockId> {
        let mut past = BTreeSet::new();
        if !self.relations.contains(&id) {
            return past;
        }

        let mut to_visit: VecDeque<BlockId> = self.relations.parents_of(&id).into();
        while let Some(current) = to_visit.pop_front() {
            if !past.insert(current) {
                continue;
            }
            for parent in self.relations.parents_of(&current) {
                if !past.contains(&parent) {
                    to_visit.push_back(parent);
                }
            }
        }

        past
    }

    /// All descendants of `id` reachable over child edges, excluding
    /// `id` itself. Unknown ids yield the empty set.
    pub fn future(&self, id: BlockId) -> BTreeSet<BlockId> {
        let mut future = BTreeSet::new();
        if !self.relations.contains(&id) {
            return future;
        }

        let mut to_visit: VecDeque<BlockId> = self.relations.children_of(&id).into_iter().collect();
        while let Some(current) = to_visit.pop_front() {
            if !future.insert(current) {
                continue;
            }
            for child in self.relations.children_of(&current) {
                if !future.contains(&child) {
                    to_visit.push_back(child);
                }
            }
        }

        future
    }

    /// Accepted ids other than `a` and `b` that are ordered with
    /// neither. An ordered pair has an empty anticone; `anticone(a, a)`
    /// degenerates to the anticone of the single block `a`.
    pub fn anticone(&self, a: BlockId, b: BlockId) -> BTreeSet<BlockId> {
        let mut anticone = BTreeSet::new();
        if !self.relations.contains(&a) || !self.relations.contains(&b) {
            return anticone;
        }

        let past_a = self.past(a);
        let future_a = self.future(a);
        if past_a.contains(&b) || future_a.contains(&b) {
            return anticone;
        }
        let past_b = self.past(b);
        let future_b = self.future(b);

        for id in self.relations.all_ids() {
            if id == a || id == b {
                continue;
            }
            let ordered_with_a = past_a.contains(&id) || future_a.contains(&id);
            let ordered_with_b = past_b.contains(&id) || future_b.contains(&id);
            if !ordered_with_a && !ordered_with_b {
                anticone.insert(id);
            }
        }

        anticone
    }
}
