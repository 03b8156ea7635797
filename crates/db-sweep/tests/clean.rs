//! End-to-end cleaning scenarios against in-memory connections.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use db_sweep::{
    CleanOptions, Connection, ConnectionRegistry, Result, SweepError, Truncation,
};
use tracing_subscriber::EnvFilter;

/// Install a test subscriber once so truncation logs show up under
/// `--nocapture`; later calls are no-ops.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory connection with a fixed vendor and table list.
struct MemoryConnection {
    vendor: &'static str,
    tables: Vec<String>,
    executed: Mutex<Vec<String>>,
    integrity_disabled: AtomicBool,
    reject_truncate: bool,
    version: &'static str,
}

impl MemoryConnection {
    fn new(vendor: &'static str, tables: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            vendor,
            tables: tables.iter().map(|t| t.to_string()).collect(),
            executed: Mutex::new(Vec::new()),
            integrity_disabled: AtomicBool::new(false),
            reject_truncate: false,
            version: "13.3",
        })
    }

    fn jdbc_rejecting_truncate(tables: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            vendor: "jdbc",
            tables: tables.iter().map(|t| t.to_string()).collect(),
            executed: Mutex::new(Vec::new()),
            integrity_disabled: AtomicBool::new(false),
            reject_truncate: true,
            version: "",
        })
    }

    fn statements(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connection for MemoryConnection {
    fn vendor_identifier(&self) -> &str {
        self.vendor
    }

    async fn tables(&self) -> Result<Vec<String>> {
        Ok(self.tables.clone())
    }

    async fn execute(&self, sql: &str) -> Result<()> {
        assert!(
            self.integrity_disabled.load(Ordering::SeqCst),
            "statement executed outside the integrity-disabled scope: {sql}"
        );
        self.executed.lock().unwrap().push(sql.to_string());
        if self.reject_truncate && sql.starts_with("TRUNCATE") {
            return Err(SweepError::statement_invalid(sql, "TRUNCATE not supported"));
        }
        Ok(())
    }

    fn quote_table_name(&self, name: &str) -> String {
        format!("\"{name}\"")
    }

    async fn disable_referential_integrity(&self) -> Result<()> {
        self.integrity_disabled.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn enable_referential_integrity(&self) -> Result<()> {
        self.integrity_disabled.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn server_version(&self) -> Result<String> {
        Ok(self.version.to_string())
    }
}

struct MemoryRegistry {
    connections: Vec<Arc<MemoryConnection>>,
}

impl ConnectionRegistry for MemoryRegistry {
    fn active_connections(&self) -> Vec<Arc<dyn Connection>> {
        self.connections
            .iter()
            .map(|c| c.clone() as Arc<dyn Connection>)
            .collect()
    }
}

fn registry_of(connections: Vec<Arc<MemoryConnection>>) -> Arc<dyn ConnectionRegistry> {
    Arc::new(MemoryRegistry { connections })
}

#[tokio::test]
async fn clean_truncates_everything_but_migration_storage() {
    init_tracing();
    let conn = MemoryConnection::new("mysql", &["schema_migrations", "widgets", "dogs"]);
    let truncation =
        Truncation::new(registry_of(vec![conn.clone()]), CleanOptions::default()).unwrap();
    truncation.clean().await.unwrap();

    assert_eq!(
        conn.statements(),
        vec![
            "TRUNCATE TABLE \"widgets\";",
            "TRUNCATE TABLE \"dogs\";"
        ]
    );
}

#[tokio::test]
async fn clean_processes_local_and_remote_connections() {
    init_tracing();
    let local = MemoryConnection::new("sqlite3", &["table"]);
    let remote = MemoryConnection::new("postgres", &["table"]);
    let truncation = Truncation::new(
        registry_of(vec![local.clone(), remote.clone()]),
        CleanOptions::default(),
    )
    .unwrap();
    truncation.clean().await.unwrap();

    assert_eq!(local.statements(), vec!["DELETE FROM \"table\";"]);
    assert_eq!(remote.statements(), vec!["TRUNCATE TABLE \"table\" CASCADE;"]);
}

#[tokio::test]
async fn clean_with_options_from_yaml() {
    init_tracing();
    let conn = MemoryConnection::new("mysql", &["schema_migrations", "widgets", "dogs"]);
    let opts = CleanOptions::from_yaml("only: [widgets]").unwrap();
    let truncation = Truncation::new(registry_of(vec![conn.clone()]), opts).unwrap();
    truncation.clean().await.unwrap();

    assert_eq!(conn.statements(), vec!["TRUNCATE TABLE \"widgets\";"]);
}

#[tokio::test]
async fn jdbc_connection_falls_back_to_delete() {
    init_tracing();
    let conn = MemoryConnection::jdbc_rejecting_truncate(&["widgets"]);
    let truncation =
        Truncation::new(registry_of(vec![conn.clone()]), CleanOptions::default()).unwrap();
    truncation.clean().await.unwrap();

    assert_eq!(
        conn.statements(),
        vec![
            "TRUNCATE TABLE \"widgets\";",
            "DELETE FROM \"widgets\";"
        ]
    );
}

#[tokio::test]
async fn unknown_option_key_fails_before_cleaning() {
    init_tracing();
    let err = CleanOptions::from_yaml("target: [widgets]").unwrap_err();
    assert!(matches!(err, SweepError::UnknownOption { .. }));
}
