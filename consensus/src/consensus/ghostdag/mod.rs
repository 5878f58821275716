//! GHOSTDAG colouring and ordering
//!
//! This module implements the greedy k-cluster blue set selection,
//! blue score assignment and the blue-score-driven total ordering.

pub mod ordering;
pub mod protocol;
pub mod stores;

pub use ordering::DagOrdering;
pub use protocol::GhostdagProtocol;
pub use stores::{GhostdagData, GhostdagStore};
