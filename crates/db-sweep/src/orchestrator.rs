//! Truncation orchestrator - coordinates table discovery, filtering, and
//! per-connection truncation across every active connection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::config::{CleanOptions, FilterConfig};
use crate::connection::{
    with_referential_integrity_disabled, Connection, ConnectionRegistry,
};
use crate::drivers::{TruncateTable, TruncationStrategy};
use crate::error::Result;

/// Empties application tables on every active connection between test runs.
///
/// Connections are processed sequentially and independently; the first
/// failure aborts the pass. Tables truncated before a failure stay truncated.
pub struct Truncation {
    filter: FilterConfig,
    registry: Arc<dyn ConnectionRegistry>,
    // Strategies are keyed by lowercased vendor identifier and live as long
    // as the orchestrator, so per-strategy state (the PostgreSQL cascade
    // memo) spans every clean pass instead of being rebuilt each time.
    strategies: Mutex<HashMap<String, Arc<TruncationStrategy>>>,
}

impl Truncation {
    /// Create an orchestrator over the registry's connections.
    ///
    /// Options are validated here, before any database interaction: an
    /// unrecognized key or a conflicting `only`/`except` pair fails the
    /// construction, never the later [`clean`](Self::clean) call.
    pub fn new(registry: Arc<dyn ConnectionRegistry>, options: CleanOptions) -> Result<Self> {
        Ok(Self {
            filter: FilterConfig::new(options)?,
            registry,
            strategies: Mutex::new(HashMap::new()),
        })
    }

    /// Strategy for a vendor, created on first use and reused afterwards.
    fn strategy_for(&self, vendor: &str) -> Result<Arc<TruncationStrategy>> {
        let key = vendor.to_lowercase();
        let mut strategies = self.strategies.lock().unwrap();
        if let Some(strategy) = strategies.get(&key) {
            return Ok(strategy.clone());
        }
        let strategy = Arc::new(TruncationStrategy::from_vendor_identifier(vendor)?);
        strategies.insert(key, strategy.clone());
        Ok(strategy)
    }

    /// Truncate every non-excluded table on every active connection.
    ///
    /// Each connection's truncation loop runs with referential integrity
    /// disabled, restored on every exit path. An empty target set for a
    /// connection is a no-op, not an error.
    pub async fn clean(&self) -> Result<()> {
        for conn in self.registry.active_connections() {
            self.clean_connection(conn.as_ref()).await?;
        }
        Ok(())
    }

    async fn clean_connection(&self, conn: &dyn Connection) -> Result<()> {
        let strategy = self.strategy_for(conn.vendor_identifier())?;
        let live_tables = conn.tables().await?;
        let targets = self.filter.tables_to_truncate(&live_tables);

        if targets.is_empty() {
            debug!(
                vendor = conn.vendor_identifier(),
                "no tables to truncate on connection"
            );
            return Ok(());
        }

        info!(
            vendor = conn.vendor_identifier(),
            tables = targets.len(),
            "truncating tables"
        );

        with_referential_integrity_disabled(conn, async {
            for table in &targets {
                debug!(table = table.as_str(), "truncating");
                strategy.truncate_table(conn, table).await?;
            }
            Ok(())
        })
        .await
    }
}
