use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_GHOSTDAG_K;
use crate::KType;

/// Consensus parameters of a simulated node.
///
/// Fixed for the lifetime of a store; every node in a simulation run
/// is expected to use the same values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// GHOSTDAG anticone tolerance: the honest-DAG width the
    /// colouring admits before marking blocks red.
    pub ghostdag_k: KType,
}

impl Params {
    pub fn new(ghostdag_k: KType) -> Self {
        Self { ghostdag_k }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            ghostdag_k: DEFAULT_GHOSTDAG_K,
        }
    }
}
