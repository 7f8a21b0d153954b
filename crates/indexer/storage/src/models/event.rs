//! Rows of the `reward_events` and `slash_events` tables.
//!
//! Both are keyed by `(height, idx)`; duplicates are ignored at write time.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored reward distribution event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub(crate) struct StoredRewardEvent {
    #[sqlx(try_from = "i64")]
    pub(crate) height: u64,
    pub(crate) idx: u32,
    pub(crate) validators_amount: String,
    pub(crate) treasury_amount: String,
}

/// A stored slash event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub(crate) struct StoredSlashEvent {
    #[sqlx(try_from = "i64")]
    pub(crate) height: u64,
    pub(crate) idx: u32,
    pub(crate) account_addr: String,
    pub(crate) nickname: String,
    pub(crate) amount: String,
}
