//! Persistence layer for the stakescan chain indexer.
//!
//! This crate durably records the facts extracted from a live chain (block
//! headers, validator-set snapshots, staking reward/slash events, token
//! distribution snapshots and block-author metadata) and answers the two
//! derived read queries the ingestion driver needs: the resume cursor and
//! the latest reward split ratio.
//!
//! Every write is idempotent under at-least-once delivery: the scanner may
//! re-deliver a height after a crash or reconnect and the stored state stays
//! identical. Each write is a single parameterized statement against the
//! shared connection pool, atomic as a unit; no multi-statement transactions
//! are used and cross-table consistency at a given height is eventual.
mod error;
pub use error::StorageError;

mod config;
pub use config::DatabaseConfig;

mod traits;
pub use traits::{BlockStorage, DistributionStorage, EventStorage, ValidatorStorage};

mod db;
pub use db::IndexerDb;

mod metrics;
mod models;
mod providers;
mod schema;
