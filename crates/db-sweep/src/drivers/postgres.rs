//! PostgreSQL truncation strategy.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::connection::Connection;
use crate::error::Result;

use super::TruncateTable;

/// Minimum server version with CASCADE support on TRUNCATE.
const CASCADE_MIN_VERSION: (u32, u32) = (8, 2);

/// PostgreSQL truncation strategy.
///
/// Appends CASCADE when the server supports it, so tables linked by foreign
/// keys can be cleared without computing a drop order. The version check runs
/// once per strategy instance; later calls reuse the cached flag.
#[derive(Debug, Default)]
pub struct PostgresTruncation {
    cascade: OnceCell<bool>,
}

impl PostgresTruncation {
    /// Create a new PostgreSQL truncation strategy.
    pub fn new() -> Self {
        Self {
            cascade: OnceCell::new(),
        }
    }

    async fn cascade_supported(&self, conn: &dyn Connection) -> Result<bool> {
        self.cascade
            .get_or_try_init(|| async {
                let version = conn.server_version().await?;
                let supported = supports_cascade(&version);
                debug!(%version, supported, "resolved TRUNCATE CASCADE support");
                Ok(supported)
            })
            .await
            .copied()
    }
}

#[async_trait]
impl TruncateTable for PostgresTruncation {
    async fn truncate_table(&self, conn: &dyn Connection, table: &str) -> Result<()> {
        let quoted = conn.quote_table_name(table);
        let sql = if self.cascade_supported(conn).await? {
            format!("TRUNCATE TABLE {quoted} CASCADE;")
        } else {
            format!("TRUNCATE TABLE {quoted};")
        };
        conn.execute(&sql).await
    }
}

/// Whether the reported server version is at or above the CASCADE threshold.
///
/// Accepts both the INFORMATION_SCHEMA style ("08.02.0014") and the plain
/// style ("9.6", "PostgreSQL 13.3"). An unparsable string disables CASCADE.
fn supports_cascade(version: &str) -> bool {
    match parse_major_minor(version) {
        Some(v) => v >= CASCADE_MIN_VERSION,
        None => false,
    }
}

fn parse_major_minor(version: &str) -> Option<(u32, u32)> {
    let start = version.find(|c: char| c.is_ascii_digit())?;
    let mut parts = version[start..].split('.');
    let major = numeric_prefix(parts.next()?)?;
    let minor = parts.next().and_then(numeric_prefix).unwrap_or(0);
    Some((major, minor))
}

fn numeric_prefix(s: &str) -> Option<u32> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s[..end].parse().ok()
}
