//! Per-vendor truncation strategies.
//!
//! Each vendor module implements [`TruncateTable`], the strategy for emptying
//! one table on that vendor's engine. TRUNCATE is preferred where the engine
//! supports it (table-level reset, skips per-row logging); SQLite has no
//! TRUNCATE at all, JDBC bridges may reject it depending on the underlying
//! driver, and PostgreSQL needs CASCADE above a version threshold to clear
//! tables with no defined drop order.
//!
//! # Static dispatch
//!
//! [`TruncationStrategy`] is an enum with one variant per vendor - the same
//! static-dispatch approach as a `Box<dyn Trait>` but without the vtable. A
//! strategy is selected once per connection from its reported vendor
//! identifier.

pub mod jdbc;
pub mod mssql;
pub mod mysql;
pub mod oracle;
pub mod postgres;
pub mod sqlite;

pub use jdbc::JdbcTruncation;
pub use mssql::MssqlTruncation;
pub use mysql::MysqlTruncation;
pub use oracle::OracleTruncation;
pub use postgres::PostgresTruncation;
pub use sqlite::SqliteTruncation;

use async_trait::async_trait;

use crate::connection::Connection;
use crate::error::{Result, SweepError};

/// Strategy for emptying one table on one vendor's engine.
///
/// Must not fail for a valid table that exists on the connection; quoting is
/// delegated to the connection's own dialect.
#[async_trait]
pub trait TruncateTable: Send + Sync {
    /// Empty `table` on `conn`, leaving its schema intact.
    async fn truncate_table(&self, conn: &dyn Connection, table: &str) -> Result<()>;
}

/// Enum-based static dispatch over the vendor strategies.
#[derive(Debug)]
pub enum TruncationStrategy {
    Mysql(MysqlTruncation),
    Sqlite(SqliteTruncation),
    Jdbc(JdbcTruncation),
    Postgres(PostgresTruncation),
    Mssql(MssqlTruncation),
    Oracle(OracleTruncation),
}

impl TruncationStrategy {
    /// Select a strategy from a connection's vendor identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::UnknownVendor`] if the identifier is not
    /// recognized.
    pub fn from_vendor_identifier(vendor: &str) -> Result<Self> {
        match vendor.to_lowercase().as_str() {
            "mysql" | "mysql2" => Ok(Self::Mysql(MysqlTruncation::new())),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite(SqliteTruncation::new())),
            "jdbc" => Ok(Self::Jdbc(JdbcTruncation::new())),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres(PostgresTruncation::new())),
            "mssql" | "sqlserver" | "sql_server" => Ok(Self::Mssql(MssqlTruncation::new())),
            "oracle" | "oracle_enhanced" => Ok(Self::Oracle(OracleTruncation::new())),
            other => Err(SweepError::UnknownVendor(other.to_string())),
        }
    }
}

#[async_trait]
impl TruncateTable for TruncationStrategy {
    async fn truncate_table(&self, conn: &dyn Connection, table: &str) -> Result<()> {
        match self {
            Self::Mysql(s) => s.truncate_table(conn, table).await,
            Self::Sqlite(s) => s.truncate_table(conn, table).await,
            Self::Jdbc(s) => s.truncate_table(conn, table).await,
            Self::Postgres(s) => s.truncate_table(conn, table).await,
            Self::Mssql(s) => s.truncate_table(conn, table).await,
            Self::Oracle(s) => s.truncate_table(conn, table).await,
        }
    }
}
