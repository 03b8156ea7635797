//! SQL Server truncation strategy.

use async_trait::async_trait;

use crate::connection::Connection;
use crate::error::Result;

use super::TruncateTable;

/// SQL Server supports TRUNCATE natively; no fallback needed.
#[derive(Debug, Clone, Default)]
pub struct MssqlTruncation;

impl MssqlTruncation {
    /// Create a new SQL Server truncation strategy.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TruncateTable for MssqlTruncation {
    async fn truncate_table(&self, conn: &dyn Connection, table: &str) -> Result<()> {
        conn.execute(&format!(
            "TRUNCATE TABLE {};",
            conn.quote_table_name(table)
        ))
        .await
    }
}
