//! JDBC-bridged truncation strategy.

use async_trait::async_trait;
use tracing::debug;

use crate::connection::Connection;
use crate::error::{Result, SweepError};

use super::TruncateTable;

/// Strategy for connections bridged through JDBC.
///
/// Whether TRUNCATE works depends on the underlying driver, so a rejected
/// statement falls back to DELETE. Only statement rejections trigger the
/// fallback; transport errors propagate unchanged.
#[derive(Debug, Clone, Default)]
pub struct JdbcTruncation;

impl JdbcTruncation {
    /// Create a new JDBC truncation strategy.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TruncateTable for JdbcTruncation {
    async fn truncate_table(&self, conn: &dyn Connection, table: &str) -> Result<()> {
        let quoted = conn.quote_table_name(table);
        match conn.execute(&format!("TRUNCATE TABLE {quoted};")).await {
            Ok(()) => Ok(()),
            Err(SweepError::StatementInvalid { .. }) => {
                debug!(table, "TRUNCATE rejected by bridged driver, falling back to DELETE");
                conn.execute(&format!("DELETE FROM {quoted};")).await
            }
            Err(other) => Err(other),
        }
    }
}
