use thiserror::Error;

/// Errors that may occur while interacting with indexer storage.
///
/// This enum is used across all implementations of the storage traits.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A store-level failure for a single statement.
    ///
    /// Treated as fatal: the failing statement is logged at the call site and
    /// the error is propagated unmodified. Callers are expected to stop
    /// ingestion and let process supervision restart; re-delivery after a
    /// restart is safe because the writers are idempotent.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// The expected entry was not found in the database.
    ///
    /// Returned where the caller must distinguish "no data yet" from a valid
    /// zero or empty result, e.g. the reward-ratio query on an empty table.
    #[error("entry not found: {0}")]
    EntryNotFound(String),

    /// A stored value cannot be interpreted.
    ///
    /// Raised when a TEXT amount fails to parse as an unsigned integer, or a
    /// reward event carries a zero total payout and no ratio is defined.
    #[error("invalid stored data: {0}")]
    InvalidData(String),
}
