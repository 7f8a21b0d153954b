//! Providers for the indexer entity groups.
//!
//! Each provider borrows the shared pool and issues single parameterized
//! statements for one group of tables:
//! - Blocks, author pointers and the resume cursor (via [`BlockProvider`])
//! - Validator-set snapshots (via [`ValidatorProvider`])
//! - Reward/slash events and the reward-ratio query (via [`EventProvider`])
//! - Token-supply snapshots (via [`DistributionProvider`])

mod block_provider;
pub(crate) use block_provider::BlockProvider;
mod validator_provider;
pub(crate) use validator_provider::ValidatorProvider;
mod event_provider;
pub(crate) use event_provider::EventProvider;
mod distribution_provider;
pub(crate) use distribution_provider::DistributionProvider;

use crate::{error::StorageError, metrics::Metrics};
use sqlx::{
    Execute, Sqlite,
    query::Query,
    sqlite::{SqliteArguments, SqlitePool, SqliteQueryResult},
};
use tracing::error;

/// Runs one parameterized statement against the pool.
///
/// Store-level failures are logged together with the failing statement and
/// returned as [`StorageError::Database`]; they are never retried or
/// swallowed here. The statement applies either fully or not at all.
pub(crate) async fn execute_statement<'q>(
    pool: &SqlitePool,
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
) -> Result<SqliteQueryResult, StorageError> {
    let sql = query.sql();
    let result = query.execute(pool).await.inspect_err(|err| {
        Metrics::record_statement_error();
        error!(
            target: "indexer_storage",
            statement = sql,
            ?err,
            "Statement failed"
        );
    })?;
    Ok(result)
}
