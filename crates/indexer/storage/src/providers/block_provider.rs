//! Provider for block, author-pointer and resume-cursor operations.

use crate::{
    error::StorageError,
    metrics::Metrics,
    models::{StoredAuthor, StoredBlock},
    providers::execute_statement,
    schema,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use stakescan_indexer_types::BlockRef;
use tracing::{error, info, warn};

/// Provides access to block storage operations on the shared pool.
#[derive(Debug)]
pub(crate) struct BlockProvider<'db> {
    pool: &'db SqlitePool,
}

impl<'db> BlockProvider<'db> {
    /// Creates a new [`BlockProvider`] instance.
    pub(crate) const fn new(pool: &'db SqlitePool) -> Self {
        Self { pool }
    }
}

impl BlockProvider<'_> {
    /// Inserts a batch of blocks in one statement.
    ///
    /// Conflicting heights are ignored, which makes the write a set-union
    /// over heights: re-delivery and out-of-order delivery converge to the
    /// same stored state. An empty batch issues no statement.
    pub(crate) async fn save_blocks(&self, blocks: &[BlockRef]) -> Result<(), StorageError> {
        if blocks.is_empty() {
            return Ok(());
        }
        info!(
            target: "indexer_storage",
            first = blocks[0].number,
            last = blocks[blocks.len() - 1].number,
            "Saving blocks"
        );

        let mut query =
            QueryBuilder::<Sqlite>::new("INSERT INTO blocks (height, hash, author_addr) ");
        query.push_values(blocks, |mut row, block| {
            row.push_bind(block.number as i64)
                .push_bind(&block.hash)
                .push_bind(&block.author_addr);
        });
        query.push(" ON CONFLICT(height) DO NOTHING");

        let result = execute_statement(self.pool, query.build()).await?;
        Metrics::record_rows_written(schema::BLOCKS, result.rows_affected());
        Ok(())
    }

    /// Overwrites the last-seen pointer for the block's author.
    ///
    /// Last write wins with no height comparison. Callers must deliver
    /// blocks in non-decreasing height order for the stored pointer to mean
    /// "latest"; this precondition is not checked at runtime.
    pub(crate) async fn save_author(&self, block: &BlockRef) -> Result<(), StorageError> {
        info!(
            target: "indexer_storage",
            height = block.number,
            author = %block.author_addr,
            "Saving block author"
        );

        let query = sqlx::query(
            "INSERT INTO authors (author_addr, last_block_height, last_block_hash) \
             VALUES (?, ?, ?) \
             ON CONFLICT(author_addr) DO UPDATE SET \
                 last_block_height = excluded.last_block_height, \
                 last_block_hash = excluded.last_block_hash",
        )
        .bind(&block.author_addr)
        .bind(block.number as i64)
        .bind(&block.hash);

        execute_statement(self.pool, query).await?;
        Metrics::record_rows_written(schema::AUTHORS, 1);
        Ok(())
    }

    /// Returns the highest stored block height, or `None` while the blocks
    /// table is empty.
    pub(crate) async fn last_block_height(&self) -> Result<Option<u64>, StorageError> {
        const SQL: &str = "SELECT MAX(height) FROM blocks";
        let height: Option<i64> = sqlx::query_scalar(SQL)
            .fetch_one(self.pool)
            .await
            .inspect_err(|err| {
                error!(target: "indexer_storage", statement = SQL, ?err, "Failed to read block cursor");
            })?;
        Ok(height.map(|height| height as u64))
    }

    /// Gets the stored block at the given height.
    pub(crate) async fn get_block(&self, height: u64) -> Result<StoredBlock, StorageError> {
        const SQL: &str = "SELECT height, hash, author_addr FROM blocks WHERE height = ?";
        let block: Option<StoredBlock> = sqlx::query_as(SQL)
            .bind(height as i64)
            .fetch_optional(self.pool)
            .await
            .inspect_err(|err| {
                error!(target: "indexer_storage", statement = SQL, height, ?err, "Failed to get block");
            })?;

        block.ok_or_else(|| {
            warn!(target: "indexer_storage", height, "Block not found");
            StorageError::EntryNotFound("block not found".to_string())
        })
    }

    /// Gets the stored pointer for the given author address.
    pub(crate) async fn get_author(&self, author_addr: &str) -> Result<StoredAuthor, StorageError> {
        const SQL: &str = "SELECT author_addr, last_block_height, last_block_hash \
                           FROM authors WHERE author_addr = ?";
        let author: Option<StoredAuthor> = sqlx::query_as(SQL)
            .bind(author_addr)
            .fetch_optional(self.pool)
            .await
            .inspect_err(|err| {
                error!(target: "indexer_storage", statement = SQL, author_addr, ?err, "Failed to get author");
            })?;

        author.ok_or_else(|| {
            warn!(target: "indexer_storage", author_addr, "Author not found");
            StorageError::EntryNotFound("author not found".to_string())
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

    fn block(number: u64) -> BlockRef {
        BlockRef::new(number, format!("0x{number:064x}"), format!("val-{}", number % 4))
    }

    async fn count_blocks(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM blocks")
            .fetch_one(pool)
            .await
            .expect("count blocks")
    }

    #[tokio::test]
    async fn save_blocks_is_idempotent() {
        let pool = setup_pool().await;
        let provider = BlockProvider::new(&pool);
        let batch: Vec<BlockRef> = (1..=3).map(block).collect();

        provider.save_blocks(&batch).await.expect("first write");
        provider.save_blocks(&batch).await.expect("second write");

        assert_eq!(count_blocks(&pool).await, 3);
        for b in &batch {
            let stored = provider.get_block(b.number).await.expect("block exists");
            assert_eq!(stored.hash, b.hash);
            assert_eq!(stored.author_addr, b.author_addr);
        }
    }

    #[tokio::test]
    async fn redelivery_does_not_overwrite_block_hash() {
        let pool = setup_pool().await;
        let provider = BlockProvider::new(&pool);
        let original = block(7);
        provider.save_blocks(std::slice::from_ref(&original)).await.expect("first write");

        // A conflicting delivery for the same height is ignored entirely.
        let conflicting = BlockRef::new(7, "0xdeadbeef".to_string(), "other".to_string());
        provider.save_blocks(&[conflicting]).await.expect("second write");

        let stored = provider.get_block(7).await.expect("block exists");
        assert_eq!(stored.hash, original.hash);
    }

    #[tokio::test]
    async fn empty_batch_is_a_noop() {
        let pool = setup_pool().await;
        let provider = BlockProvider::new(&pool);

        provider.save_blocks(&[]).await.expect("empty batch");
        assert_eq!(count_blocks(&pool).await, 0);
    }

    #[tokio::test]
    async fn batch_with_invalid_height_applies_nothing() {
        let pool = setup_pool().await;
        let provider = BlockProvider::new(&pool);

        // u64::MAX wraps to a negative INTEGER and violates the height check;
        // the whole statement is rejected, not just the offending row.
        let batch = vec![block(1), block(u64::MAX), block(2)];
        let result = provider.save_blocks(&batch).await;

        assert!(matches!(result, Err(StorageError::Database(_))));
        assert_eq!(count_blocks(&pool).await, 0);
    }

    #[tokio::test]
    async fn author_pointer_last_write_wins() {
        let pool = setup_pool().await;
        let provider = BlockProvider::new(&pool);
        let addr = "val-1".to_string();

        provider
            .save_author(&BlockRef::new(5, "0x05".to_string(), addr.clone()))
            .await
            .expect("write at height 5");
        provider
            .save_author(&BlockRef::new(3, "0x03".to_string(), addr.clone()))
            .await
            .expect("write at height 3");

        // Replace semantics: the chronologically last write wins even though
        // its height is lower. Ordering is the caller's contract.
        let stored = provider.get_author(&addr).await.expect("author exists");
        assert_eq!(stored.last_block_height, 3);
        assert_eq!(stored.last_block_hash, "0x03");
    }

    #[tokio::test]
    async fn cursor_is_none_on_empty_store() {
        let pool = setup_pool().await;
        let provider = BlockProvider::new(&pool);

        let cursor = provider.last_block_height().await.expect("read cursor");
        assert_eq!(cursor, None);
    }

    #[tokio::test]
    async fn cursor_returns_max_height() {
        let pool = setup_pool().await;
        let provider = BlockProvider::new(&pool);

        provider.save_blocks(&[block(100)]).await.expect("write block");
        assert_eq!(provider.last_block_height().await.expect("read cursor"), Some(100));

        provider.save_blocks(&[block(40), block(90)]).await.expect("write blocks");
        assert_eq!(provider.last_block_height().await.expect("read cursor"), Some(100));
    }

    #[tokio::test]
    async fn get_block_not_found() {
        let pool = setup_pool().await;
        let provider = BlockProvider::new(&pool);

        let result = provider.get_block(42).await;
        assert!(matches!(result, Err(StorageError::EntryNotFound(_))));
    }
}
