//! SQLite truncation strategy.

use async_trait::async_trait;

use crate::connection::Connection;
use crate::error::Result;

use super::TruncateTable;

/// SQLite has no TRUNCATE statement; DELETE empties the table instead.
#[derive(Debug, Clone, Default)]
pub struct SqliteTruncation;

impl SqliteTruncation {
    /// Create a new SQLite truncation strategy.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TruncateTable for SqliteTruncation {
    async fn truncate_table(&self, conn: &dyn Connection, table: &str) -> Result<()> {
        conn.execute(&format!("DELETE FROM {};", conn.quote_table_name(table)))
            .await
    }
}
