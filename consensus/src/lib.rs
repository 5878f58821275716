//! GHOSTDAG consensus core for a simulated block-DAG network
//!
//! This library maintains the in-memory block DAG of a simulated
//! node: block indexing and orphan handling, greedy k-cluster blue
//! set selection, blue-score-weighted tip selection and the total
//! ordering derived from blue scores.

pub mod consensus;
pub mod pipeline;

// Re-export key types for easier access
pub use dagsim_core::{Block, BlockHeader, BlockId, ConsensusError, KType, MinerId, Params, TxId};

pub use consensus::dag::{BlockRelations, DagTopology};
pub use consensus::ghostdag::{DagOrdering, GhostdagData, GhostdagProtocol, GhostdagStore};
pub use pipeline::{BlockProcessingResult, BlockProcessor, BlockStatus, OrphanPool};
