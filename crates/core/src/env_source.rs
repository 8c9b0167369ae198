//! Environment variable source loading
//!
//! Scans the process environment for `NEO4J_`-prefixed setting candidates and
//! translates them back to dotted setting names. Control variables consumed by
//! the entrypoint itself (auth, license, edition, ...) are reserved and never
//! become settings. Candidates whose name starts with a digit after the prefix
//! fail the naming grammar and are skipped with a warning; everything else is
//! accepted even when the setting name is unknown, so newer server settings
//! can be configured through older images.

use crate::errors::EnvError;
use crate::naming::{NamingEra, ENV_PREFIX};
use indexmap::IndexMap;
use tracing::warn;

/// Environment variables the entrypoint consumes itself; never settings
pub const RESERVED_VARIABLES: &[&str] = &[
    "NEO4J_AUTH",
    "NEO4J_ACCEPT_LICENSE_AGREEMENT",
    "NEO4J_EDITION",
    "NEO4J_HOME",
    "NEO4J_SHA256",
    "NEO4J_TARBALL",
    "NEO4J_DEBUG",
    "NEO4J_PLUGINS",
];

/// Settings loaded from the environment, plus rejected candidate names
#[derive(Debug, Default)]
pub struct EnvSettings {
    /// Accepted settings, dotted name -> literal value
    pub settings: IndexMap<String, String>,
    /// Candidate names (prefix stripped) that failed the naming grammar
    pub rejected: Vec<String>,
}

/// Scan an environment snapshot for setting overrides.
///
/// `env` is passed in rather than read from the process so resolution stays a
/// pure function of its inputs; the CLI hands over `std::env::vars()`.
/// Candidates are processed in sorted name order so the result is
/// deterministic regardless of environment iteration order.
pub fn scan(env: impl IntoIterator<Item = (String, String)>, era: NamingEra) -> EnvSettings {
    let mut candidates: Vec<(String, String)> = env
        .into_iter()
        .filter(|(name, _)| name.starts_with(ENV_PREFIX))
        .filter(|(name, _)| !RESERVED_VARIABLES.contains(&name.as_str()))
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    let mut result = EnvSettings::default();
    for (name, value) in candidates {
        match era.to_setting_name(&name) {
            Some(setting) => {
                result.settings.insert(setting, value);
            }
            None => {
                let stripped = name.trim_start_matches(ENV_PREFIX).to_string();
                let error = EnvError::InvalidSettingName {
                    name: stripped.clone(),
                };
                // Recoverable: record, warn, continue with the rest.
                warn!("WARNING: {}", error);
                result.rejected.push(stripped);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_scan_translates_prefixed_variables() {
        let result = scan(
            env(&[
                ("NEO4J_server_memory_pagecache_size", "1000m"),
                ("NEO4J_server_memory_heap_max__size", "3000m"),
                ("PATH", "/usr/bin"),
            ]),
            NamingEra::Modern,
        );
        assert_eq!(
            result.settings.get("server.memory.pagecache.size").map(String::as_str),
            Some("1000m")
        );
        assert_eq!(
            result.settings.get("server.memory.heap.max_size").map(String::as_str),
            Some("3000m")
        );
        assert_eq!(result.settings.len(), 2);
        assert!(result.rejected.is_empty());
    }

    #[test]
    fn test_scan_rejects_digit_initial_names() {
        let result = scan(env(&[("NEO4J_1a", "1")]), NamingEra::Modern);
        assert!(result.settings.is_empty());
        assert_eq!(result.rejected, vec!["1a".to_string()]);
    }

    #[test]
    fn test_scan_skips_reserved_control_variables() {
        let result = scan(
            env(&[
                ("NEO4J_AUTH", "none"),
                ("NEO4J_ACCEPT_LICENSE_AGREEMENT", "yes"),
                ("NEO4J_EDITION", "enterprise"),
                ("NEO4J_server_directories_logs", "/notdefaultlogs"),
            ]),
            NamingEra::Modern,
        );
        assert_eq!(result.settings.len(), 1);
        assert_eq!(
            result.settings.get("server.directories.logs").map(String::as_str),
            Some("/notdefaultlogs")
        );
    }

    #[test]
    fn test_scan_accepts_unknown_settings() {
        // Forward compatibility: unknown but well-formed settings pass through.
        let result = scan(
            env(&[("NEO4J_some_future_setting", "on")]),
            NamingEra::Modern,
        );
        assert_eq!(
            result.settings.get("some.future.setting").map(String::as_str),
            Some("on")
        );
    }

    #[test]
    fn test_scan_keeps_shell_meaningful_values_literal() {
        let result = scan(
            env(&[("NEO4J_dbms_security_procedures_unrestricted", "*")]),
            NamingEra::Legacy,
        );
        assert_eq!(
            result
                .settings
                .get("dbms.security.procedures.unrestricted")
                .map(String::as_str),
            Some("*")
        );
    }

    #[test]
    fn test_scan_is_deterministic() {
        let forward = scan(
            env(&[("NEO4J_a_b", "1"), ("NEO4J_c_d", "2")]),
            NamingEra::Modern,
        );
        let reversed = scan(
            env(&[("NEO4J_c_d", "2"), ("NEO4J_a_b", "1")]),
            NamingEra::Modern,
        );
        let keys = |s: &EnvSettings| s.settings.keys().cloned().collect::<Vec<_>>();
        assert_eq!(keys(&forward), keys(&reversed));
    }
}
