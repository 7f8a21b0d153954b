use serde::{Deserialize, Serialize};

/// Connection settings for the backing store.
///
/// Consumed once at process start by [`IndexerDb::connect`]; the resulting
/// handle is passed by reference into every component. There is no ambient
/// global pool.
///
/// [`IndexerDb::connect`]: crate::IndexerDb::connect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL, e.g. `sqlite://stakescan.db`.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { database_url: "sqlite://stakescan.db".to_string(), max_connections: 5 }
    }
}
