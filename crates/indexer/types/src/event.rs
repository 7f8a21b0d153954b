//! Staking event records extracted from block event logs.

use serde::{Deserialize, Serialize};

/// An era reward distribution event.
///
/// Amounts are non-negative integers carried as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RewardEvent {
    /// Index of the event within its block.
    pub index: u32,
    /// Share of the payout minted to validators.
    pub validators_amount: String,
    /// Share of the payout minted to the treasury.
    pub treasury_amount: String,
}

/// A slash applied to an offending account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlashEvent {
    /// Index of the event within its block.
    pub index: u32,
    /// Address of the slashed account.
    pub account_addr: String,
    /// Display name of the slashed account, empty when unset.
    pub nickname: String,
    /// Slashed amount as a decimal string.
    pub amount: String,
}
