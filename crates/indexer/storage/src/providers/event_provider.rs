//! Provider for staking-event persistence and the reward-ratio query.

use crate::{
    error::StorageError,
    metrics::Metrics,
    models::{StoredRewardEvent, StoredSlashEvent},
    providers::execute_statement,
    schema,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use stakescan_indexer_types::{ChainHeader, RewardEvent, SlashEvent};
use tracing::{error, info, warn};

/// Provides access to staking-event storage operations on the shared pool.
#[derive(Debug)]
pub(crate) struct EventProvider<'db> {
    pool: &'db SqlitePool,
}

impl<'db> EventProvider<'db> {
    /// Creates a new [`EventProvider`] instance.
    pub(crate) const fn new(pool: &'db SqlitePool) -> Self {
        Self { pool }
    }
}

impl EventProvider<'_> {
    /// Inserts the reward events of a block in one statement.
    ///
    /// Duplicate `(height, idx)` pairs are ignored. An empty batch issues no
    /// statement.
    pub(crate) async fn save_reward_events(
        &self,
        header: &ChainHeader,
        events: &[RewardEvent],
    ) -> Result<(), StorageError> {
        if events.is_empty() {
            return Ok(());
        }
        info!(target: "indexer_storage", header = %header, "Saving reward events");

        let mut query = QueryBuilder::<Sqlite>::new(
            "INSERT INTO reward_events (height, idx, validators_amount, treasury_amount) ",
        );
        query.push_values(events, |mut row, event| {
            row.push_bind(header.number as i64)
                .push_bind(event.index)
                .push_bind(&event.validators_amount)
                .push_bind(&event.treasury_amount);
        });
        query.push(" ON CONFLICT(height, idx) DO NOTHING");

        let result = execute_statement(self.pool, query.build()).await?;
        Metrics::record_rows_written(schema::REWARD_EVENTS, result.rows_affected());
        Ok(())
    }

    /// Inserts the slash events of a block in one statement.
    ///
    /// Duplicate `(height, idx)` pairs are ignored. An empty batch issues no
    /// statement.
    pub(crate) async fn save_slash_events(
        &self,
        header: &ChainHeader,
        events: &[SlashEvent],
    ) -> Result<(), StorageError> {
        if events.is_empty() {
            return Ok(());
        }
        info!(target: "indexer_storage", header = %header, "Saving slash events");

        let mut query = QueryBuilder::<Sqlite>::new(
            "INSERT INTO slash_events (height, idx, account_addr, nickname, amount) ",
        );
        query.push_values(events, |mut row, event| {
            row.push_bind(header.number as i64)
                .push_bind(event.index)
                .push_bind(&event.account_addr)
                .push_bind(&event.nickname)
                .push_bind(&event.amount);
        });
        query.push(" ON CONFLICT(height, idx) DO NOTHING");

        let result = execute_statement(self.pool, query.build()).await?;
        Metrics::record_rows_written(schema::SLASH_EVENTS, result.rows_affected());
        Ok(())
    }

    /// Computes `validators / (validators + treasury)` from the reward event
    /// with the greatest height.
    ///
    /// Ties among events at the same height are broken arbitrarily; they
    /// describe the same era distribution. An empty table is reported as
    /// [`StorageError::EntryNotFound`], never as a zero ratio.
    pub(crate) async fn last_reward_ratio(&self) -> Result<f64, StorageError> {
        let event = self.latest_reward_event().await?;
        let validators = parse_amount(&event.validators_amount, "validators_amount")?;
        let treasury = parse_amount(&event.treasury_amount, "treasury_amount")?;

        let total = validators.checked_add(treasury).ok_or_else(|| {
            StorageError::InvalidData("reward amounts overflow u128".to_string())
        })?;
        if total == 0 {
            return Err(StorageError::InvalidData(
                "reward event with zero total payout".to_string(),
            ));
        }
        Ok(validators as f64 / total as f64)
    }

    /// Gets the stored reward event with the greatest height.
    pub(crate) async fn latest_reward_event(&self) -> Result<StoredRewardEvent, StorageError> {
        const SQL: &str = "SELECT height, idx, validators_amount, treasury_amount \
                           FROM reward_events ORDER BY height DESC LIMIT 1";
        let event: Option<StoredRewardEvent> = sqlx::query_as(SQL)
            .fetch_optional(self.pool)
            .await
            .inspect_err(|err| {
                error!(target: "indexer_storage", statement = SQL, ?err, "Failed to get latest reward event");
            })?;

        event.ok_or_else(|| {
            warn!(target: "indexer_storage", "No reward events recorded");
            StorageError::EntryNotFound("no reward events recorded".to_string())
        })
    }

    /// Gets the stored slash event at `(height, idx)`.
    pub(crate) async fn get_slash_event(
        &self,
        height: u64,
        idx: u32,
    ) -> Result<StoredSlashEvent, StorageError> {
        const SQL: &str = "SELECT height, idx, account_addr, nickname, amount \
                           FROM slash_events WHERE height = ? AND idx = ?";
        let event: Option<StoredSlashEvent> = sqlx::query_as(SQL)
            .bind(height as i64)
            .bind(idx)
            .fetch_optional(self.pool)
            .await
            .inspect_err(|err| {
                error!(target: "indexer_storage", statement = SQL, height, idx, ?err, "Failed to get slash event");
            })?;

        event.ok_or_else(|| {
            warn!(target: "indexer_storage", height, idx, "Slash event not found");
            StorageError::EntryNotFound("slash event not found".to_string())
        })
    }
}

/// Parses a stored TEXT amount as an unsigned integer.
fn parse_amount(value: &str, column: &str) -> Result<u128, StorageError> {
    value.parse::<u128>().map_err(|_| {
        StorageError::InvalidData(format!("{column} is not an unsigned integer: {value:?}"))
    })
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

    fn reward(index: u32, validators: &str, treasury: &str) -> RewardEvent {
        RewardEvent {
            index,
            validators_amount: validators.to_string(),
            treasury_amount: treasury.to_string(),
        }
    }

    fn slash(index: u32, addr: &str) -> SlashEvent {
        SlashEvent {
            index,
            account_addr: addr.to_string(),
            nickname: String::new(),
            amount: "5000000000".to_string(),
        }
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .expect("count rows")
    }

    #[tokio::test]
    async fn reward_events_are_idempotent() {
        let pool = setup_pool().await;
        let provider = EventProvider::new(&pool);
        let header = ChainHeader::new(500);
        let batch = vec![reward(0, "80", "20"), reward(1, "81", "19")];

        provider.save_reward_events(&header, &batch).await.expect("first write");
        provider.save_reward_events(&header, &batch).await.expect("second write");

        assert_eq!(count(&pool, "reward_events").await, 2);
    }

    #[tokio::test]
    async fn duplicate_reward_event_keeps_first_amounts() {
        let pool = setup_pool().await;
        let provider = EventProvider::new(&pool);
        let header = ChainHeader::new(500);

        provider.save_reward_events(&header, &[reward(0, "80", "20")]).await.expect("first");
        provider.save_reward_events(&header, &[reward(0, "1", "99")]).await.expect("duplicate");

        let stored = provider.latest_reward_event().await.expect("event exists");
        assert_eq!(stored.validators_amount, "80");
        assert_eq!(stored.treasury_amount, "20");
    }

    #[tokio::test]
    async fn slash_events_are_idempotent() {
        let pool = setup_pool().await;
        let provider = EventProvider::new(&pool);
        let header = ChainHeader::new(600);
        let batch = vec![slash(0, "acc-a"), slash(1, "acc-b")];

        provider.save_slash_events(&header, &batch).await.expect("first write");
        provider.save_slash_events(&header, &batch).await.expect("second write");

        assert_eq!(count(&pool, "slash_events").await, 2);
        let stored = provider.get_slash_event(600, 1).await.expect("event exists");
        assert_eq!(stored.account_addr, "acc-b");
    }

    #[tokio::test]
    async fn empty_batches_are_noops() {
        let pool = setup_pool().await;
        let provider = EventProvider::new(&pool);
        let header = ChainHeader::new(500);

        provider.save_reward_events(&header, &[]).await.expect("empty rewards");
        provider.save_slash_events(&header, &[]).await.expect("empty slashes");

        assert_eq!(count(&pool, "reward_events").await, 0);
        assert_eq!(count(&pool, "slash_events").await, 0);
    }

    #[tokio::test]
    async fn ratio_from_latest_event() {
        let pool = setup_pool().await;
        let provider = EventProvider::new(&pool);

        provider
            .save_reward_events(&ChainHeader::new(100), &[reward(0, "50", "50")])
            .await
            .expect("older event");
        provider
            .save_reward_events(&ChainHeader::new(200), &[reward(0, "80", "20")])
            .await
            .expect("latest event");

        let ratio = provider.last_reward_ratio().await.expect("ratio");
        assert!((ratio - 0.8).abs() < 1e-12);
    }

    #[tokio::test]
    async fn ratio_on_empty_table_is_not_found() {
        let pool = setup_pool().await;
        let provider = EventProvider::new(&pool);

        let result = provider.last_reward_ratio().await;
        assert!(matches!(result, Err(StorageError::EntryNotFound(_))));
    }

    #[tokio::test]
    async fn zero_total_payout_is_invalid() {
        let pool = setup_pool().await;
        let provider = EventProvider::new(&pool);

        provider
            .save_reward_events(&ChainHeader::new(100), &[reward(0, "0", "0")])
            .await
            .expect("write event");

        let result = provider.last_reward_ratio().await;
        assert!(matches!(result, Err(StorageError::InvalidData(_))));
    }

    #[tokio::test]
    async fn malformed_amount_is_invalid() {
        let pool = setup_pool().await;
        let provider = EventProvider::new(&pool);

        provider
            .save_reward_events(&ChainHeader::new(100), &[reward(0, "not-a-number", "20")])
            .await
            .expect("write event");

        let result = provider.last_reward_ratio().await;
        assert!(matches!(result, Err(StorageError::InvalidData(_))));
    }
}
