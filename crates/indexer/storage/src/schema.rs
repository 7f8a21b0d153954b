//! Table definitions for the indexer store.
//!
//! Six tables, each independently indexed by its stated unique key. There is
//! no foreign-key enforcement: writes are idempotent per table and
//! cross-table consistency at a given height is eventual. No table has a
//! delete path; corrections arrive as future snapshots at higher heights.

use crate::error::StorageError;
use sqlx::SqlitePool;
use tracing::error;

pub(crate) const BLOCKS: &str = "blocks";
pub(crate) const AUTHORS: &str = "authors";
pub(crate) const VALIDATORS: &str = "validators";
pub(crate) const REWARD_EVENTS: &str = "reward_events";
pub(crate) const SLASH_EVENTS: &str = "slash_events";
pub(crate) const TOKEN_DISTRIBUTIONS: &str = "token_distributions";

/// Table schema definition.
pub(crate) struct TableSchema {
    pub(crate) name: &'static str,
    pub(crate) ddl: &'static str,
}

/// Schema definitions for all tables, applied in order by [`init_schema`].
pub(crate) const TABLE_SCHEMAS: &[TableSchema] = &[
    TableSchema {
        name: BLOCKS,
        ddl: "CREATE TABLE IF NOT EXISTS blocks (
                height      INTEGER PRIMARY KEY CHECK (height >= 0),
                hash        TEXT NOT NULL,
                author_addr TEXT NOT NULL
              )",
    },
    TableSchema {
        name: AUTHORS,
        ddl: "CREATE TABLE IF NOT EXISTS authors (
                author_addr       TEXT PRIMARY KEY,
                last_block_height INTEGER NOT NULL CHECK (last_block_height >= 0),
                last_block_hash   TEXT NOT NULL
              )",
    },
    TableSchema {
        name: VALIDATORS,
        ddl: "CREATE TABLE IF NOT EXISTS validators (
                height             INTEGER NOT NULL CHECK (height >= 0),
                current_era        INTEGER NOT NULL,
                current_session    INTEGER NOT NULL,
                validator_addr     TEXT NOT NULL CHECK (validator_addr <> ''),
                validator_name     TEXT NOT NULL,
                controller_addr    TEXT NOT NULL,
                controller_name    TEXT NOT NULL,
                online             INTEGER NOT NULL,
                era_point          INTEGER NOT NULL,
                reward_destination TEXT NOT NULL,
                commission         TEXT NOT NULL,
                total_bonded       TEXT NOT NULL,
                self_bonded        TEXT NOT NULL,
                nominators         INTEGER NOT NULL,
                PRIMARY KEY (height, validator_addr)
              )",
    },
    TableSchema {
        name: REWARD_EVENTS,
        ddl: "CREATE TABLE IF NOT EXISTS reward_events (
                height            INTEGER NOT NULL CHECK (height >= 0),
                idx               INTEGER NOT NULL,
                validators_amount TEXT NOT NULL,
                treasury_amount   TEXT NOT NULL,
                PRIMARY KEY (height, idx)
              )",
    },
    TableSchema {
        name: SLASH_EVENTS,
        ddl: "CREATE TABLE IF NOT EXISTS slash_events (
                height       INTEGER NOT NULL CHECK (height >= 0),
                idx          INTEGER NOT NULL,
                account_addr TEXT NOT NULL,
                nickname     TEXT NOT NULL,
                amount       TEXT NOT NULL,
                PRIMARY KEY (height, idx)
              )",
    },
    TableSchema {
        name: TOKEN_DISTRIBUTIONS,
        ddl: "CREATE TABLE IF NOT EXISTS token_distributions (
                height           INTEGER PRIMARY KEY CHECK (height >= 0),
                current_era      INTEGER NOT NULL,
                current_session  INTEGER NOT NULL,
                total_issuance   TEXT NOT NULL,
                total_bond       TEXT NOT NULL,
                validators_count INTEGER NOT NULL,
                staking_ratio    REAL NOT NULL,
                inflation        REAL NOT NULL,
                val_day_rewards  TEXT NOT NULL
              )",
    },
];

/// Creates any missing tables. Safe to run on every startup.
pub(crate) async fn init_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    for table in TABLE_SCHEMAS {
        sqlx::query(table.ddl).execute(pool).await.inspect_err(|err| {
            error!(
                target: "indexer_storage",
                table = table.name,
                %err,
                "Failed to initialize table"
            );
        })?;
    }
    Ok(())
}
