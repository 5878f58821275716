//! Block-DAG index and graph queries
//!
//! This module provides:
//! - Accepted-block tracking (records, parent/child adjacency, tips)
//! - Past/future/anticone queries over the accepted set

pub mod relations;
pub mod topology;

pub use relations::BlockRelations;
pub use topology::DagTopology;
