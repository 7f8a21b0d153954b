//! Rows of the `blocks` and `authors` tables.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored block.
///
/// Keyed by `height`. The hash is immutable once set for a height under
/// normal chain progress; a re-delivered identical block is a no-op.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub(crate) struct StoredBlock {
    #[sqlx(try_from = "i64")]
    pub(crate) height: u64,
    pub(crate) hash: String,
    pub(crate) author_addr: String,
}

/// A stored author pointer.
///
/// Keyed by `author_addr` and fully overwritten on every write, so it
/// reflects the author's most recently delivered block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub(crate) struct StoredAuthor {
    pub(crate) author_addr: String,
    #[sqlx(try_from = "i64")]
    pub(crate) last_block_height: u64,
    pub(crate) last_block_hash: String,
}
