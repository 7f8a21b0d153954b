//! Provider for validator-set snapshot persistence.

use crate::{
    error::StorageError, metrics::Metrics, models::StoredValidator, providers::execute_statement,
    schema,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use stakescan_indexer_types::{ChainHeader, ValidatorSnapshot};
use tracing::{error, info, warn};

/// Provides access to validator storage operations on the shared pool.
#[derive(Debug)]
pub(crate) struct ValidatorProvider<'db> {
    pool: &'db SqlitePool,
}

impl<'db> ValidatorProvider<'db> {
    /// Creates a new [`ValidatorProvider`] instance.
    pub(crate) const fn new(pool: &'db SqlitePool) -> Self {
        Self { pool }
    }
}

impl ValidatorProvider<'_> {
    /// Inserts a validator-set snapshot stamped with the header's height, in
    /// one statement.
    ///
    /// On a `(height, validator_addr)` conflict exactly `height`, `online`
    /// and `era_point` are refreshed. Identity, commission and bonding
    /// columns keep their stored values: they only change at era boundaries
    /// and are expensive to re-derive, while `online` and `era_point` must
    /// track the latest observation. An empty batch issues no statement.
    pub(crate) async fn save_validators(
        &self,
        header: &ChainHeader,
        validators: &[ValidatorSnapshot],
    ) -> Result<(), StorageError> {
        if validators.is_empty() {
            return Ok(());
        }
        info!(
            target: "indexer_storage",
            header = %header,
            count = validators.len(),
            "Saving validator snapshot"
        );

        let mut query = QueryBuilder::<Sqlite>::new(
            "INSERT INTO validators (\
                 height, current_era, current_session, validator_addr, validator_name, \
                 controller_addr, controller_name, online, era_point, reward_destination, \
                 commission, total_bonded, self_bonded, nominators) ",
        );
        query.push_values(validators, |mut row, validator| {
            row.push_bind(header.number as i64)
                .push_bind(validator.current_era)
                .push_bind(validator.current_session)
                .push_bind(&validator.validator_addr)
                .push_bind(&validator.validator_name)
                .push_bind(&validator.controller_addr)
                .push_bind(&validator.controller_name)
                .push_bind(validator.online)
                .push_bind(validator.era_point)
                .push_bind(&validator.reward_destination)
                .push_bind(&validator.commission)
                .push_bind(&validator.total_bonded)
                .push_bind(&validator.self_bonded)
                .push_bind(validator.nominators);
        });
        query.push(
            " ON CONFLICT(height, validator_addr) DO UPDATE SET \
                 height = excluded.height, \
                 online = excluded.online, \
                 era_point = excluded.era_point",
        );

        let result = execute_statement(self.pool, query.build()).await?;
        Metrics::record_rows_written(schema::VALIDATORS, result.rows_affected());
        Ok(())
    }

    /// Gets the stored snapshot row for a validator at a height.
    pub(crate) async fn get_validator(
        &self,
        height: u64,
        validator_addr: &str,
    ) -> Result<StoredValidator, StorageError> {
        const SQL: &str =
            "SELECT height, current_era, current_session, validator_addr, validator_name, \
                    controller_addr, controller_name, online, era_point, reward_destination, \
                    commission, total_bonded, self_bonded, nominators \
             FROM validators WHERE height = ? AND validator_addr = ?";
        let validator: Option<StoredValidator> = sqlx::query_as(SQL)
            .bind(height as i64)
            .bind(validator_addr)
            .fetch_optional(self.pool)
            .await
            .inspect_err(|err| {
                error!(
                    target: "indexer_storage",
                    statement = SQL,
                    height,
                    validator_addr,
                    ?err,
                    "Failed to get validator"
                );
            })?;

        validator.ok_or_else(|| {
            warn!(target: "indexer_storage", height, validator_addr, "Validator not found");
            StorageError::EntryNotFound("validator not found".to_string())
        })
    }
}
