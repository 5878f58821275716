use thiserror::Error;

use crate::BlockId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsensusError {
    #[error("block {0} is not in the accepted set")]
    UnknownBlock(BlockId),

    #[error("block {0} has no recorded consensus data")]
    MissingGhostdagData(BlockId),

    #[error("block has no parents")]
    EmptyParents,
}
