use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;
use std::sync::Arc;

use dagsim_core::{BlockId, ConsensusError, KType};

use crate::consensus::dag::{BlockRelations, DagTopology};

use super::stores::{GhostdagData, GhostdagStore};

/// Past-set memo shared by the anticone membership tests of a single
/// colouring run. Past sets of accepted blocks are immutable, so the
/// cache never goes stale within a call.
struct PastMemo<'a> {
    topology: &'a DagTopology,
    cache: HashMap<BlockId, Rc<BTreeSet<BlockId>>>,
}

impl<'a> PastMemo<'a> {
    fn new(topology: &'a DagTopology) -> Self {
        Self {
            topology,
            cache: HashMap::new(),
        }
    }

    fn past(&mut self, id: BlockId) -> Rc<BTreeSet<BlockId>> {
        if let Some(past) = self.cache.get(&id) {
            return Rc::clone(past);
        }
        let past = Rc::new(self.topology.past(id));
        self.cache.insert(id, Rc::clone(&past));
        past
    }

    /// Whether `a` and `b` are comparable under the DAG order, i.e.
    /// one lies in the past of the other.
    fn ordered(&mut self, a: BlockId, b: BlockId) -> bool {
        self.past(b).contains(&a) || self.past(a).contains(&b)
    }

    /// Whether `m` lies in the joint anticone of `x` and `y`.
    fn in_joint_anticone(&mut self, m: BlockId, x: BlockId, y: BlockId) -> bool {
        m != x && m != y && !self.ordered(m, x) && !self.ordered(m, y)
    }
}

/// The greedy GHOSTDAG colouring rule.
///
/// For each newly accepted block this computes the blue set inherited
/// through the selected parent, extends it greedily with candidates
/// from the block's past under the k-cluster admission test, and
/// derives the block's own colour and blue score. Ancestor colours
/// are read from their frozen acceptance-time records.
pub struct GhostdagProtocol {
    k: KType,
    relations: Arc<BlockRelations>,
    topology: Arc<DagTopology>,
    store: Arc<GhostdagStore>,
}

impl GhostdagProtocol {
    pub fn new(
        k: KType,
        relations: Arc<BlockRelations>,
        topology: Arc<DagTopology>,
        store: Arc<GhostdagStore>,
    ) -> Self {
        Self {
            k,
            relations,
            topology,
            store,
        }
    }

    pub fn k(&self) -> KType {
        self.k
    }

    /// Computes the colouring of an accepted block: blue flag, blue
    /// score and selected parent.
    pub fn calculate(&self, id: BlockId) -> Result<GhostdagData, ConsensusError> {
        self.colouring(id).map(|(data, _)| data)
    }

    /// Recomputes the blue set of an accepted block. The set contains
    /// the block itself when the block is blue.
    ///
    /// Colouring depends only on the block's past subgraph and the
    /// frozen flags of its ancestors, so the result is stable no
    /// matter how the DAG has grown since acceptance.
    pub fn blue_set(&self, id: BlockId) -> Result<BTreeSet<BlockId>, ConsensusError> {
        self.colouring(id).map(|(_, blue_set)| blue_set)
    }

    fn colouring(&self, id: BlockId) -> Result<(GhostdagData, BTreeSet<BlockId>), ConsensusError> {
        if !self.relations.contains(&id) {
            return Err(ConsensusError::UnknownBlock(id));
        }

        let mut memo = PastMemo::new(&self.topology);
        let past = memo.past(id);

        if past.is_empty() {
            return Ok((GhostdagData::genesis(), BTreeSet::from([id])));
        }

        let parents = self.relations.parents_of(&id);
        let selected_parent = self.select_parent(&parents)?;

        // Inherit the selected parent's frozen-blue past, plus the
        // selected parent itself if it is blue.
        let mut blue_set: BTreeSet<BlockId> = memo
            .past(selected_parent)
            .iter()
            .copied()
            .filter(|ancestor| self.store.is_blue(ancestor))
            .collect();
        if self.store.is_blue(&selected_parent) {
            blue_set.insert(selected_parent);
        }

        // Greedy admission over the remaining past, ascending id.
        for &candidate in past.iter() {
            if blue_set.contains(&candidate) {
                continue;
            }
            let mut trial = blue_set.clone();
            trial.insert(candidate);
            if self.k_cluster_holds(&trial, &mut memo) {
                blue_set = trial;
            }
        }

        // Finally the block itself faces the same test.
        let mut trial = blue_set.clone();
        trial.insert(id);
        let blue = self.k_cluster_holds(&trial, &mut memo);
        if blue {
            blue_set = trial;
        }

        let blues_in_past = past.iter().filter(|b| blue_set.contains(*b)).count() as u64;
        let blue_score = blues_in_past + u64::from(blue);

        let data = GhostdagData::new(blue, blue_score, Some(selected_parent));
        Ok((data, blue_set))
    }

    /// The parent with the highest blue score; ties go to the lesser
    /// id so every node selects the same parent.
    pub fn select_parent(&self, parents: &[BlockId]) -> Result<BlockId, ConsensusError> {
        let mut best: Option<(u64, BlockId)> = None;

        for &parent in parents {
            let score = self
                .store
                .blue_score(&parent)
                .ok_or(ConsensusError::MissingGhostdagData(parent))?;
            best = match best {
                Some((best_score, best_id))
                    if score < best_score || (score == best_score && parent > best_id) =>
                {
                    Some((best_score, best_id))
                }
                _ => Some((score, parent)),
            };
        }

        best.map(|(_, id)| id).ok_or(ConsensusError::EmptyParents)
    }

    /// Audit predicate: every pair of members has at most k other
    /// members in its joint anticone.
    pub fn is_k_cluster(&self, set: &BTreeSet<BlockId>) -> bool {
        let mut memo = PastMemo::new(&self.topology);
        self.k_cluster_holds(set, &mut memo)
    }

    fn k_cluster_holds(&self, set: &BTreeSet<BlockId>, memo: &mut PastMemo<'_>) -> bool {
        for (i, &x) in set.iter().enumerate() {
            for &y in set.iter().skip(i + 1) {
                if memo.ordered(x, y) {
                    continue;
                }
                let mut count: KType = 0;
                for &member in set.iter() {
                    if memo.in_joint_anticone(member, x, y) {
                        count += 1;
                        if count > self.k {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}
