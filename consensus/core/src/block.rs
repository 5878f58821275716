use std::collections::BTreeSet;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::{
    BLOCK_HEADER_BASE_SIZE, GENESIS_MINER_ID, GENESIS_TIME, PARENT_REFERENCE_SIZE,
    TX_REFERENCE_SIZE, VARINT_EXTENDED_SIZE, VARINT_EXTENDED_THRESHOLD, VARINT_SHORT_SIZE,
};
use crate::{BlockId, MinerId, TxId};

/// Block header carrying identity, provenance and parent references
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockHeader {
    /// Block id, unique across the simulation
    pub id: BlockId,
    /// Producing miner; -1 for genesis
    pub miner_id: MinerId,
    /// Monotonic simulation time at which the block was created
    pub time_created: f64,
    /// Parent block ids, in the order the producer listed them.
    /// Empty only for genesis.
    pub parents: Vec<BlockId>,
}

impl BlockHeader {
    pub fn new(id: BlockId, miner_id: MinerId, time_created: f64, parents: Vec<BlockId>) -> Self {
        Self {
            id,
            miner_id,
            time_created,
            parents,
        }
    }

    /// Estimated serialized size of the header: an 80-byte base, a
    /// varint parent count and a 32-byte reference per parent.
    pub fn wire_size(&self) -> usize {
        let varint_size = if self.parents.len() >= VARINT_EXTENDED_THRESHOLD {
            VARINT_EXTENDED_SIZE
        } else {
            VARINT_SHORT_SIZE
        };
        BLOCK_HEADER_BASE_SIZE + varint_size + self.parents.len() * PARENT_REFERENCE_SIZE
    }
}

/// A block as exchanged between simulated nodes.
///
/// Immutable once accepted into a node's DAG; consensus results are
/// recorded separately and never written back into the block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub header: BlockHeader,
    /// Ids of the transactions carried by the block body. Opaque to
    /// consensus.
    pub transactions: BTreeSet<TxId>,
    /// Informational size used by the transport model.
    pub size_in_bytes: usize,
}

impl Block {
    /// Creates a block and stamps it with its estimated wire size.
    pub fn new(header: BlockHeader, transactions: BTreeSet<TxId>) -> Self {
        let mut block = Self {
            header,
            transactions,
            size_in_bytes: 0,
        };
        block.size_in_bytes = block.total_size();
        block
    }

    /// The genesis record every store starts from.
    pub fn genesis(id: BlockId) -> Self {
        Self {
            header: BlockHeader::new(id, GENESIS_MINER_ID, GENESIS_TIME, Vec::new()),
            transactions: BTreeSet::new(),
            size_in_bytes: 0,
        }
    }

    pub fn is_genesis(&self) -> bool {
        self.header.parents.is_empty()
    }

    pub fn id(&self) -> BlockId {
        self.header.id
    }

    pub fn parents(&self) -> &[BlockId] {
        &self.header.parents
    }

    /// Estimated serialized size of header plus body, counting a
    /// fixed-width reference per transaction id.
    pub fn total_size(&self) -> usize {
        self.header.wire_size() + self.transactions.len() * TX_REFERENCE_SIZE
    }
}
