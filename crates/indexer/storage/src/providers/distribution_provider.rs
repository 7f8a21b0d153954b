//! Provider for token-supply snapshot persistence.

use crate::{
    error::StorageError, metrics::Metrics, models::StoredDistribution,
    providers::execute_statement, schema,
};
use sqlx::SqlitePool;
use stakescan_indexer_types::TokenDistribution;
use tracing::{error, info, warn};

/// Provides access to token-distribution storage operations on the shared
/// pool.
#[derive(Debug)]
pub(crate) struct DistributionProvider<'db> {
    pool: &'db SqlitePool,
}

impl<'db> DistributionProvider<'db> {
    /// Creates a new [`DistributionProvider`] instance.
    pub(crate) const fn new(pool: &'db SqlitePool) -> Self {
        Self { pool }
    }
}

impl DistributionProvider<'_> {
    /// Persists a token-supply snapshot, fully replacing any stored row for
    /// the same height.
    ///
    /// The snapshot is derived data and cheap to recompute; any stored
    /// version for a height is equally valid, so overwrite is safe.
    pub(crate) async fn save_token_distribution(
        &self,
        distribution: &TokenDistribution,
    ) -> Result<(), StorageError> {
        info!(target: "indexer_storage", height = distribution.height, "Saving token snapshot");

        let query = sqlx::query(
            "INSERT INTO token_distributions (\
                 height, current_era, current_session, total_issuance, total_bond, \
                 validators_count, staking_ratio, inflation, val_day_rewards) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(height) DO UPDATE SET \
                 current_era = excluded.current_era, \
                 current_session = excluded.current_session, \
                 total_issuance = excluded.total_issuance, \
                 total_bond = excluded.total_bond, \
                 validators_count = excluded.validators_count, \
                 staking_ratio = excluded.staking_ratio, \
                 inflation = excluded.inflation, \
                 val_day_rewards = excluded.val_day_rewards",
        )
        .bind(distribution.height as i64)
        .bind(distribution.current_era)
        .bind(distribution.current_session)
        .bind(&distribution.total_issuance)
        .bind(&distribution.total_bond)
        .bind(distribution.validators_count)
        .bind(distribution.staking_ratio)
        .bind(distribution.inflation)
        .bind(&distribution.val_day_rewards);

        execute_statement(self.pool, query).await?;
        Metrics::record_rows_written(schema::TOKEN_DISTRIBUTIONS, 1);
        Ok(())
    }

    /// Gets the stored snapshot at the given height.
    pub(crate) async fn get_distribution(
        &self,
        height: u64,
    ) -> Result<StoredDistribution, StorageError> {
        const SQL: &str =
            "SELECT height, current_era, current_session, total_issuance, total_bond, \
                    validators_count, staking_ratio, inflation, val_day_rewards \
             FROM token_distributions WHERE height = ?";
        let distribution: Option<StoredDistribution> = sqlx::query_as(SQL)
            .bind(height as i64)
            .fetch_optional(self.pool)
            .await
            .inspect_err(|err| {
                error!(target: "indexer_storage", statement = SQL, height, ?err, "Failed to get token snapshot");
            })?;

        distribution.ok_or_else(|| {
            warn!(target: "indexer_storage", height, "Token snapshot not found");
            StorageError::EntryNotFound("token snapshot not found".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("connect in-memory database");
        schema::init_schema(&pool).await.expect("init schema");
        pool
    }

    fn distribution(height: u64) -> TokenDistribution {
        TokenDistribution {
            height,
            current_era: 812,
            current_session: 4870,
            total_issuance: "12000000000000000000".to_string(),
            total_bond: "6000000000000000000".to_string(),
            validators_count: 1000,
            staking_ratio: 0.5,
            inflation: 0.075,
            val_day_rewards: "1230000000000".to_string(),
        }
    }

    #[tokio::test]
    async fn stores_and_reads_back_a_snapshot() {
        let pool = setup_pool().await;
        let provider = DistributionProvider::new(&pool);

        provider.save_token_distribution(&distribution(900)).await.expect("write");

        let stored = provider.get_distribution(900).await.expect("row exists");
        assert_eq!(stored.current_era, 812);
        assert_eq!(stored.total_issuance, "12000000000000000000");
        assert!((stored.staking_ratio - 0.5).abs() < 1e-12);
    }

    #[tokio::test]
    async fn redelivery_fully_replaces_the_row() {
        let pool = setup_pool().await;
        let provider = DistributionProvider::new(&pool);

        provider.save_token_distribution(&distribution(900)).await.expect("first write");

        let mut recomputed = distribution(900);
        recomputed.total_issuance = "13000000000000000000".to_string();
        recomputed.validators_count = 1001;
        recomputed.inflation = 0.08;
        provider.save_token_distribution(&recomputed).await.expect("second write");

        let stored = provider.get_distribution(900).await.expect("row exists");
        assert_eq!(stored.total_issuance, "13000000000000000000");
        assert_eq!(stored.validators_count, 1001);
        assert!((stored.inflation - 0.08).abs() < 1e-12);

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM token_distributions")
            .fetch_one(&pool)
            .await
            .expect("count rows");
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn missing_snapshot_is_not_found() {
        let pool = setup_pool().await;
        let provider = DistributionProvider::new(&pool);

        let result = provider.get_distribution(900).await;
        assert!(matches!(result, Err(StorageError::EntryNotFound(_))));
    }
}
