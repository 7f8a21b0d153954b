//! Block-level records produced by the header decoder.

use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};

/// A decoded block reference.
///
/// This is the minimal per-block fact set the indexer records: the chain
/// height, the block hash, and the address credited as block author. The
/// same value doubles as the input to the author-pointer writer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Constructor, Serialize, Deserialize)]
pub struct BlockRef {
    /// Chain height of the block.
    pub number: u64,
    /// Hex-encoded block hash.
    pub hash: String,
    /// Address of the block author.
    pub author_addr: String,
}

/// The header a batch of decoded entities was extracted from.
///
/// Batches of validators and staking events are height-stamped with the
/// header's number when they are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Constructor, Display, Serialize, Deserialize)]
#[display("#{number}")]
pub struct ChainHeader {
    /// Chain height of the header.
    pub number: u64,
}
