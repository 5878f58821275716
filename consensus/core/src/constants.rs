use crate::{BlockId, KType, MinerId};

/// Id consumed by genesis; the store's id counter starts here.
pub const GENESIS_BLOCK_ID: BlockId = BlockId(0);

/// Miner id recorded on genesis, which no simulated node produced.
pub const GENESIS_MINER_ID: MinerId = -1;

/// Simulation time at which genesis exists.
pub const GENESIS_TIME: f64 = 0.0;

/// Default GHOSTDAG anticone tolerance for a simulated node.
pub const DEFAULT_GHOSTDAG_K: KType = 10;

/// Serialized size of a block header before parent references.
pub const BLOCK_HEADER_BASE_SIZE: usize = 80;

/// Serialized size of a single parent reference.
pub const PARENT_REFERENCE_SIZE: usize = 32;

/// Serialized size of a single transaction id in a block body.
pub const TX_REFERENCE_SIZE: usize = 4;

/// Parent counts below this fit the one-byte varint encoding.
pub const VARINT_EXTENDED_THRESHOLD: usize = 253;

/// Varint size for parent counts below the threshold.
pub const VARINT_SHORT_SIZE: usize = 1;

/// Varint size for parent counts at or above the threshold.
pub const VARINT_EXTENDED_SIZE: usize = 3;
