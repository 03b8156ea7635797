//! # db-sweep
//!
//! Test-support library that resets database state between automated test
//! runs by truncating all application tables while preserving the
//! schema-migration bookkeeping table.
//!
//! The crate has two parts:
//!
//! - **Vendor strategies** ([`drivers`]): the correct "empty this table"
//!   statement per database vendor, including the JDBC TRUNCATE→DELETE
//!   fallback and the version-gated PostgreSQL CASCADE clause.
//! - **Orchestrator** ([`Truncation`]): enumerates tables on every active
//!   connection, applies the `only`/`except` filter, and runs the truncation
//!   loop inside a referential-integrity-disabled scope.
//!
//! The host database layer (pooling, introspection, SQL execution, identifier
//! quoting, the integrity toggle) stays external, consumed through the
//! [`Connection`] and [`ConnectionRegistry`] capability traits.
//!
//! ## Example
//!
//! ```rust,ignore
//! use db_sweep::{CleanOptions, Truncation};
//!
//! let truncation = Truncation::new(registry, CleanOptions::except(["audit_log"]))?;
//! truncation.clean().await?;
//! ```

pub mod config;
pub mod connection;
pub mod drivers;
pub mod error;
pub mod orchestrator;

// Re-exports for convenient access
pub use config::{CleanOptions, FilterConfig, MIGRATION_STORAGE_NAME};
pub use connection::{with_referential_integrity_disabled, Connection, ConnectionRegistry};
pub use drivers::{TruncateTable, TruncationStrategy};
pub use error::{Result, SweepError};
pub use orchestrator::Truncation;
