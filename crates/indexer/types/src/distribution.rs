//! Token-supply distribution snapshots.

use serde::{Deserialize, Serialize};

/// Derived token-supply snapshot for a height.
///
/// Unlike the raw chain facts, this record is recomputed from them and is
/// therefore safe to fully overwrite on re-delivery.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenDistribution {
    /// Chain height the snapshot was computed at.
    pub height: u64,
    /// Era at the snapshot height.
    pub current_era: u32,
    /// Session at the snapshot height.
    pub current_session: u32,
    /// Total token issuance, as a decimal string.
    pub total_issuance: String,
    /// Total bonded stake, as a decimal string.
    pub total_bond: String,
    /// Size of the active validator set.
    pub validators_count: u32,
    /// Bonded share of issuance, in `[0, 1]`.
    pub staking_ratio: f64,
    /// Annualized inflation rate, in `[0, 1]`.
    pub inflation: f64,
    /// Estimated daily reward per validator, as a decimal string.
    pub val_day_rewards: String,
}
