//! Rows of the `validators` table.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored validator snapshot, keyed by `(height, validator_addr)`.
///
/// On key conflict only `height`, `online` and `era_point` are refreshed;
/// the identity, commission and bonding columns keep their stored values
/// since they only change at era boundaries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub(crate) struct StoredValidator {
    #[sqlx(try_from = "i64")]
    pub(crate) height: u64,
    pub(crate) current_era: u32,
    pub(crate) current_session: u32,
    pub(crate) validator_addr: String,
    pub(crate) validator_name: String,
    pub(crate) controller_addr: String,
    pub(crate) controller_name: String,
    pub(crate) online: bool,
    pub(crate) era_point: u32,
    pub(crate) reward_destination: String,
    pub(crate) commission: String,
    pub(crate) total_bonded: String,
    pub(crate) self_bonded: String,
    pub(crate) nominators: u32,
}
