//! Validator-set snapshot records.

use serde::{Deserialize, Serialize};

/// One validator's state as observed at a given block.
///
/// Identity, commission and bonding fields only change at era boundaries and
/// are expensive to re-derive; `online` and `era_point` change every block.
/// The persistence layer relies on this split for its partial-update policy:
/// re-delivery of a snapshot refreshes only the per-block fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidatorSnapshot {
    /// Era the snapshot belongs to.
    pub current_era: u32,
    /// Session the snapshot belongs to.
    pub current_session: u32,
    /// Stash address of the validator.
    pub validator_addr: String,
    /// On-chain display name of the validator, empty when unset.
    pub validator_name: String,
    /// Controller address bonded to the stash.
    pub controller_addr: String,
    /// On-chain display name of the controller, empty when unset.
    pub controller_name: String,
    /// Whether the validator responded to the liveness check for the session.
    pub online: bool,
    /// Era points accumulated so far.
    pub era_point: u32,
    /// Configured destination for staking rewards.
    pub reward_destination: String,
    /// Commission rate as reported by the chain, e.g. `"5.00%"`.
    pub commission: String,
    /// Total stake bonded behind the validator, as a decimal string.
    pub total_bonded: String,
    /// Stake bonded by the validator itself, as a decimal string.
    pub self_bonded: String,
    /// Number of nominators backing the validator.
    pub nominators: u32,
}
