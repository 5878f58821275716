//! Core data model for the dagsim block-DAG consensus core
//!
//! This crate defines the block records exchanged by simulated nodes
//! and the identifier types shared by the consensus algorithms.

pub mod block;
pub mod config;
pub mod constants;
pub mod errors;

use std::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

pub use block::{Block, BlockHeader};
pub use config::Params;
pub use errors::ConsensusError;

/// GHOSTDAG anticone tolerance parameter type
pub type KType = u32;

/// Identifier of a simulated miner node. Genesis carries -1.
pub type MinerId = i64;

/// Identifier of a transaction. Transaction bodies are opaque to the
/// consensus core; blocks only carry the ids.
pub type TxId = u64;

/// Identifier of a block within the simulation.
///
/// Ids are plain integers assigned by the producing node; the store
/// owns the counter (see `constants::GENESIS_BLOCK_ID`).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
#[serde(transparent)]
pub struct BlockId(pub u64);

impl BlockId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for BlockId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
