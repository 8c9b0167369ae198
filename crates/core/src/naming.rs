//! Setting-name / environment-variable name translation
//!
//! This module implements the bidirectional mapping between dotted setting
//! names (`server.memory.heap.max_size`) and environment variable names
//! (`NEO4J_server_memory_heap_max__size`):
//!
//! - `.` between segments becomes `_`
//! - a literal `_` or `-` inside a segment is escaped by doubling to `__`
//!
//! The transform is unambiguous and reversible within one naming era. The era
//! itself is a version threshold: 5.0 renamed most settings from the
//! `dbms.*`/`causal_clustering.*` vocabulary to `server.*` and removed a few
//! outright. Callers select the era once at startup from the running version
//! and must not mix eras within one resolution pass.

use semver::Version;
use serde::{Deserialize, Serialize};

/// Prefix that marks an environment variable as a setting candidate
pub const ENV_PREFIX: &str = "NEO4J_";

/// Setting naming convention era, selected once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingEra {
    /// Pre-5.0 vocabulary: `dbms.*` and `causal_clustering.*`
    Legacy,
    /// 5.0+ vocabulary: `server.*`
    Modern,
}

impl NamingEra {
    /// Select the naming era for a server version
    pub fn for_version(version: &Version) -> Self {
        if version.major >= 5 {
            NamingEra::Modern
        } else {
            NamingEra::Legacy
        }
    }

    /// Translate a dotted setting name into its environment variable name
    pub fn to_env_name(&self, setting: &str) -> String {
        let mut env = String::with_capacity(ENV_PREFIX.len() + setting.len());
        env.push_str(ENV_PREFIX);
        for c in setting.chars() {
            match c {
                '.' => env.push('_'),
                '_' | '-' => env.push_str("__"),
                other => env.push(other),
            }
        }
        env
    }

    /// Translate an environment variable name back into a dotted setting name.
    ///
    /// Returns `None` when the name does not carry the recognized prefix or
    /// fails the naming grammar (first character after the prefix is a digit).
    /// The caller is responsible for the rejection diagnostic in the latter
    /// case.
    pub fn to_setting_name(&self, env_name: &str) -> Option<String> {
        let stripped = env_name.strip_prefix(ENV_PREFIX)?;
        if stripped.is_empty() || stripped.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        // Split on the doubled separator first so escaped underscores survive
        // the dot substitution.
        let setting = stripped
            .split("__")
            .map(|segment| segment.replace('_', "."))
            .collect::<Vec<_>>()
            .join("_");
        Some(setting)
    }

    /// Setting name for the logs directory
    pub fn logs_directory(&self) -> &'static str {
        match self {
            NamingEra::Legacy => "dbms.directories.logs",
            NamingEra::Modern => "server.directories.logs",
        }
    }

    /// Setting name for the data directory
    pub fn data_directory(&self) -> &'static str {
        match self {
            NamingEra::Legacy => "dbms.directories.data",
            NamingEra::Modern => "server.directories.data",
        }
    }

    /// Setting name for the metrics directory; removed in the modern era
    pub fn metrics_directory(&self) -> Option<&'static str> {
        match self {
            NamingEra::Legacy => Some("dbms.directories.metrics"),
            NamingEra::Modern => None,
        }
    }

    /// Setting name for the cluster advertised address
    pub fn cluster_advertised_address(&self) -> &'static str {
        match self {
            NamingEra::Legacy => "causal_clustering.transaction_advertised_address",
            NamingEra::Modern => "server.cluster.advertised_address",
        }
    }

    /// Setting name for additional JVM arguments
    pub fn jvm_additional(&self) -> &'static str {
        match self {
            NamingEra::Legacy => "dbms.jvm.additional",
            NamingEra::Modern => "server.jvm.additional",
        }
    }
}
