//! Main database handle and trait implementations.

use crate::{
    config::DatabaseConfig,
    error::StorageError,
    metrics::Metrics,
    providers::{BlockProvider, DistributionProvider, EventProvider, ValidatorProvider},
    schema,
    traits::{BlockStorage, DistributionStorage, EventStorage, ValidatorStorage},
};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use stakescan_indexer_types::{
    BlockRef, ChainHeader, RewardEvent, SlashEvent, TokenDistribution, ValidatorSnapshot,
};
use std::str::FromStr;
use tracing::info;

/// Long-lived handle over the shared connection pool.
///
/// Constructed once at process start and passed by reference into every
/// component; cloning shares the pool. All storage traits are implemented on
/// it, so the ingestion driver and any backfill pipeline can use the same
/// handle concurrently without external locking.
#[derive(Debug, Clone)]
pub struct IndexerDb {
    pool: SqlitePool,
}

impl IndexerDb {
    /// Connects to the backing store described by the config and prepares
    /// the schema.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StorageError> {
        let options =
            SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;
        Self::new(pool).await
    }

    /// Wraps an existing pool and prepares the schema.
    pub async fn new(pool: SqlitePool) -> Result<Self, StorageError> {
        schema::init_schema(&pool).await?;
        Metrics::init();
        info!(target: "indexer_storage", "Indexer database ready");
        Ok(Self { pool })
    }

    /// The underlying pool handle.
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl BlockStorage for IndexerDb {
    async fn save_blocks(&self, blocks: &[BlockRef]) -> Result<(), StorageError> {
        BlockProvider::new(&self.pool).save_blocks(blocks).await
    }

    async fn save_author(&self, block: &BlockRef) -> Result<(), StorageError> {
        BlockProvider::new(&self.pool).save_author(block).await
    }

    async fn last_block_height(&self) -> Result<Option<u64>, StorageError> {
        BlockProvider::new(&self.pool).last_block_height().await
    }
}

#[async_trait]
impl ValidatorStorage for IndexerDb {
    async fn save_validators(
        &self,
        header: &ChainHeader,
        validators: &[ValidatorSnapshot],
    ) -> Result<(), StorageError> {
        ValidatorProvider::new(&self.pool).save_validators(header, validators).await
    }
}

#[async_trait]
impl EventStorage for IndexerDb {
    async fn save_reward_events(
        &self,
        header: &ChainHeader,
        events: &[RewardEvent],
    ) -> Result<(), StorageError> {
        EventProvider::new(&self.pool).save_reward_events(header, events).await
    }

    async fn save_slash_events(
        &self,
        header: &ChainHeader,
        events: &[SlashEvent],
    ) -> Result<(), StorageError> {
        EventProvider::new(&self.pool).save_slash_events(header, events).await
    }

    async fn last_reward_ratio(&self) -> Result<f64, StorageError> {
        EventProvider::new(&self.pool).last_reward_ratio().await
    }
}

#[async_trait]
impl DistributionStorage for IndexerDb {
    async fn save_token_distribution(
        &self,
        distribution: &TokenDistribution,
    ) -> Result<(), StorageError> {
        DistributionProvider::new(&self.pool).save_token_distribution(distribution).await
    }
}
