//! Capability traits for the host database layer.
//!
//! Connection pooling, table introspection, SQL execution, identifier quoting
//! and the referential-integrity toggle are all owned by the host ORM or
//! driver; this crate only consumes them through these traits.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;

/// One live database session, borrowed for the duration of a clean pass.
///
/// # Error contract
///
/// [`execute`](Connection::execute) must report rejected statements as
/// [`SweepError::StatementInvalid`](crate::SweepError::StatementInvalid) and
/// connectivity failures as
/// [`SweepError::Transport`](crate::SweepError::Transport). The JDBC strategy
/// falls back to DELETE only on the former.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Vendor identifier (e.g. "mysql", "postgres", "sqlite").
    fn vendor_identifier(&self) -> &str;

    /// List the live application tables on this connection.
    async fn tables(&self) -> Result<Vec<String>>;

    /// Execute a raw SQL statement.
    async fn execute(&self, sql: &str) -> Result<()>;

    /// Quote a table name per this connection's dialect.
    ///
    /// Quoting and escaping rules are entirely the driver's; strategies never
    /// escape identifiers themselves.
    fn quote_table_name(&self, name: &str) -> String;

    /// Disable referential-integrity enforcement on this connection.
    async fn disable_referential_integrity(&self) -> Result<()>;

    /// Re-enable referential-integrity enforcement on this connection.
    async fn enable_referential_integrity(&self) -> Result<()>;

    /// Server version string, used only by the PostgreSQL strategy to gate
    /// the CASCADE clause. Other vendors keep the default empty string.
    async fn server_version(&self) -> Result<String> {
        Ok(String::new())
    }
}

/// Source of the active connections to clean.
///
/// One handle per distinct database target - a test process may hold
/// connections to several databases at once (e.g. local + remote).
pub trait ConnectionRegistry: Send + Sync {
    /// All currently active connections.
    fn active_connections(&self) -> Vec<Arc<dyn Connection>>;
}

/// Run `body` with referential integrity disabled on `conn`.
///
/// The body future is not polled until integrity is disabled, and integrity
/// is re-enabled on every exit path. A body error takes precedence over a
/// re-enable error; the latter is logged and dropped in that case.
pub async fn with_referential_integrity_disabled<Fut, T>(
    conn: &dyn Connection,
    body: Fut,
) -> Result<T>
where
    Fut: Future<Output = Result<T>>,
{
    conn.disable_referential_integrity().await?;
    let result = body.await;
    match conn.enable_referential_integrity().await {
        Ok(()) => result,
        Err(enable_err) => match result {
            // The truncation failure is the actionable error; the failed
            // re-enable still gets surfaced in the log.
            Err(body_err) => {
                warn!(
                    vendor = conn.vendor_identifier(),
                    error = %enable_err,
                    "failed to re-enable referential integrity after truncation error"
                );
                Err(body_err)
            }
            Ok(_) => Err(enable_err),
        },
    }
}
