use crate::StorageError;
use async_trait::async_trait;
use stakescan_indexer_types::{
    BlockRef, ChainHeader, RewardEvent, SlashEvent, TokenDistribution, ValidatorSnapshot,
};

/// Provides an interface for persisting blocks and resuming the scan.
///
/// Implementations are expected to provide durable, idempotent writes that
/// are safe under at-least-once delivery, and thread-safe access through a
/// shared connection pool.
#[async_trait]
pub trait BlockStorage: Send + Sync {
    /// Persists a batch of blocks in a single statement.
    ///
    /// Heights already stored are left untouched, so writing N blocks is
    /// equivalent to writing them one at a time in any order. An empty batch
    /// issues no statement.
    ///
    /// # Arguments
    /// * `blocks` - The decoded blocks, one [`BlockRef`] per height.
    ///
    /// # Returns
    /// * `Ok(())` if the batch was applied (or was empty).
    /// * `Err(StorageError)` on a store-level failure; the batch applied
    ///   either fully or not at all.
    async fn save_blocks(&self, blocks: &[BlockRef]) -> Result<(), StorageError>;

    /// Overwrites the last-seen pointer for the block's author.
    ///
    /// Last write wins regardless of height ordering. Callers must invoke
    /// this in non-decreasing height order for the stored pointer to mean
    /// "latest"; a resuming scanner naturally does. This precondition is not
    /// checked at runtime.
    async fn save_author(&self, block: &BlockRef) -> Result<(), StorageError>;

    /// Returns the highest durably recorded block height.
    ///
    /// # Returns
    /// * `Ok(Some(height))` once at least one block is stored.
    /// * `Ok(None)` while the store is empty, never a zero sentinel: a real
    ///   chain's genesis height must stay representable.
    async fn last_block_height(&self) -> Result<Option<u64>, StorageError>;
}

/// Provides an interface for persisting validator-set snapshots.
#[async_trait]
pub trait ValidatorStorage: Send + Sync {
    /// Persists a validator-set snapshot stamped with the header's height,
    /// in a single statement.
    ///
    /// On a `(height, validator_addr)` conflict only `height`, `online` and
    /// `era_point` are refreshed; all other columns keep their stored
    /// values, as identity/commission/bonding data only changes at era
    /// boundaries. An empty batch issues no statement.
    async fn save_validators(
        &self,
        header: &ChainHeader,
        validators: &[ValidatorSnapshot],
    ) -> Result<(), StorageError>;
}

/// Provides an interface for persisting staking events and reading the
/// latest reward split.
#[async_trait]
pub trait EventStorage: Send + Sync {
    /// Persists the reward events of a block in a single statement.
    ///
    /// Duplicate `(height, index)` pairs are ignored. An empty batch issues
    /// no statement.
    async fn save_reward_events(
        &self,
        header: &ChainHeader,
        events: &[RewardEvent],
    ) -> Result<(), StorageError>;

    /// Persists the slash events of a block in a single statement.
    ///
    /// Duplicate `(height, index)` pairs are ignored. An empty batch issues
    /// no statement.
    async fn save_slash_events(
        &self,
        header: &ChainHeader,
        events: &[SlashEvent],
    ) -> Result<(), StorageError>;

    /// Computes `validators / (validators + treasury)` from the reward event
    /// with the greatest height.
    ///
    /// Ties among events at the same height are broken arbitrarily; they
    /// describe the same era distribution.
    ///
    /// # Returns
    /// * `Ok(ratio)` in `[0, 1]` when a reward event exists.
    /// * `Err(StorageError::EntryNotFound)` when none is stored; a missing
    ///   event is never reported as a zero ratio.
    async fn last_reward_ratio(&self) -> Result<f64, StorageError>;
}

/// Provides an interface for persisting token-supply snapshots.
#[async_trait]
pub trait DistributionStorage: Send + Sync {
    /// Persists a token-supply snapshot, fully replacing any stored row for
    /// the same height.
    ///
    /// The snapshot is derived data, cheap to recompute; any stored version
    /// for a height is equally valid.
    async fn save_token_distribution(
        &self,
        distribution: &TokenDistribution,
    ) -> Result<(), StorageError>;
}
