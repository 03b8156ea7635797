//! Filter configuration for the truncation orchestrator.
//!
//! Cleaning accepts exactly two options: `only` restricts the pass to a fixed
//! table set, `except` excludes tables on top of the default exclusion of the
//! migration bookkeeping table. The two are mutually exclusive.

use std::collections::{BTreeMap, HashSet};

use crate::error::{Result, SweepError};

/// Table used by the schema-migration system to record applied migrations.
/// Always excluded from cleaning unless `only` names it explicitly.
pub const MIGRATION_STORAGE_NAME: &str = "schema_migrations";

/// Options accepted by [`Truncation::new`](crate::Truncation::new).
///
/// Deserializable so a larger test-harness config file can embed a
/// `clean:` section; unknown keys are rejected either way.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanOptions {
    /// If set, clean exactly this table set and nothing else.
    pub only: Option<Vec<String>>,
    /// Tables excluded in addition to the migration bookkeeping table.
    pub except: Option<Vec<String>>,
}

impl CleanOptions {
    /// Restrict cleaning to exactly this set of tables.
    pub fn only<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            only: Some(tables.into_iter().map(Into::into).collect()),
            except: None,
        }
    }

    /// Exclude this set of tables in addition to the bookkeeping table.
    pub fn except<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            only: None,
            except: Some(tables.into_iter().map(Into::into).collect()),
        }
    }

    /// Parse options from a YAML document, e.g. `except: [widgets]`.
    ///
    /// Keys other than `only` and `except` fail with
    /// [`SweepError::UnknownOption`] before any database interaction.
    pub fn from_yaml(doc: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> =
            serde_yaml::from_str(doc).map_err(|e| SweepError::Config(e.to_string()))?;
        Self::from_map(raw)
    }

    /// Build options from a key/value bag, rejecting unrecognized keys.
    pub fn from_map(map: BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut opts = Self::default();
        for (key, tables) in map {
            match key.as_str() {
                "only" => opts.only = Some(tables),
                "except" => opts.except = Some(tables),
                _ => return Err(SweepError::UnknownOption { key }),
            }
        }
        Ok(opts)
    }

    /// Check the mutual-exclusion invariant.
    pub fn validate(&self) -> Result<()> {
        let only_set = self.only.as_ref().is_some_and(|t| !t.is_empty());
        let except_set = self.except.as_ref().is_some_and(|t| !t.is_empty());
        if only_set && except_set {
            return Err(SweepError::ConflictingOptions);
        }
        Ok(())
    }
}

/// Resolved, immutable filter applied to every connection's table list.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    only: Option<Vec<String>>,
    exclude: HashSet<String>,
}

impl FilterConfig {
    /// Validate options and resolve them into a filter.
    pub fn new(opts: CleanOptions) -> Result<Self> {
        opts.validate()?;
        let mut exclude: HashSet<String> = opts.except.unwrap_or_default().into_iter().collect();
        exclude.insert(MIGRATION_STORAGE_NAME.to_string());
        Ok(Self {
            only: opts.only,
            exclude,
        })
    }

    /// Resolve the target table set for one connection.
    ///
    /// With `only` configured the result is exactly that set - including the
    /// bookkeeping table if it was named explicitly. Otherwise the live table
    /// list minus the exclusion set, in the order the connection reported it.
    pub fn tables_to_truncate(&self, live_tables: &[String]) -> Vec<String> {
        match &self.only {
            Some(only) => only.clone(),
            None => live_tables
                .iter()
                .filter(|t| !self.exclude.contains(*t))
                .cloned()
                .collect(),
        }
    }
}
