//! Oracle truncation strategy.

use async_trait::async_trait;

use crate::connection::Connection;
use crate::error::Result;

use super::TruncateTable;

/// Oracle truncation strategy.
///
/// The statement carries no trailing semicolon - the Oracle driver treats it
/// as part of the statement text and rejects it.
#[derive(Debug, Clone, Default)]
pub struct OracleTruncation;

impl OracleTruncation {
    /// Create a new Oracle truncation strategy.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TruncateTable for OracleTruncation {
    async fn truncate_table(&self, conn: &dyn Connection, table: &str) -> Result<()> {
        conn.execute(&format!("TRUNCATE TABLE {}", conn.quote_table_name(table)))
            .await
    }
}
