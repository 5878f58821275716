//! Block ingestion pipeline
//!
//! This module orchestrates block arrival: duplicate and orphan
//! gating, acceptance into the index, colouring, and deterministic
//! orphan replay once parents become available.

pub mod block_processor;
pub mod orphan_pool;
#[cfg(test)]
mod integration_test;

pub use block_processor::{BlockProcessingResult, BlockProcessor, BlockStatus};
pub use orphan_pool::OrphanPool;
