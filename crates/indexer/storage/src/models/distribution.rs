//! Rows of the `token_distributions` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored token-supply snapshot, keyed by `height`.
///
/// Derived data: a re-delivery for the same height fully replaces the row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromRow)]
pub(crate) struct StoredDistribution {
    #[sqlx(try_from = "i64")]
    pub(crate) height: u64,
    pub(crate) current_era: u32,
    pub(crate) current_session: u32,
    pub(crate) total_issuance: String,
    pub(crate) total_bond: String,
    pub(crate) validators_count: u32,
    pub(crate) staking_ratio: f64,
    pub(crate) inflation: f64,
    pub(crate) val_day_rewards: String,
}
