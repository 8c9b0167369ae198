//! Built-in edition/version defaults
//!
//! Defaults are computed once per process start from the naming era, the
//! product edition, the container's own identity and the mounted directory
//! layout; they are never persisted across runs. Each entry carries an
//! edition gate as data, so the merge engine never needs call-site edition
//! checks: an enterprise-only default simply does not exist under community.

use crate::naming::NamingEra;
use crate::paths::DirectoryLayout;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Port the cluster advertises for transactions
const CLUSTER_TX_PORT: u16 = 6000;

/// Length of the short container identifier
const SHORT_ID_LEN: usize = 12;

/// Product edition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edition {
    Community,
    Enterprise,
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edition::Community => write!(f, "community"),
            Edition::Enterprise => write!(f, "enterprise"),
        }
    }
}

impl FromStr for Edition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "community" => Ok(Edition::Community),
            "enterprise" => Ok(Edition::Enterprise),
            _ => Err(format!(
                "Invalid edition '{}'. Valid options: community, enterprise",
                s
            )),
        }
    }
}

/// Edition predicate attached to each default entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditionGate {
    /// Applies to every edition
    Any,
    /// Applies to the enterprise edition only
    EnterpriseOnly,
}

impl EditionGate {
    pub fn applies_to(&self, edition: Edition) -> bool {
        match self {
            EditionGate::Any => true,
            EditionGate::EnterpriseOnly => edition == Edition::Enterprise,
        }
    }
}

/// A single built-in default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultEntry {
    pub key: String,
    pub value: String,
    pub gate: EditionGate,
}

/// The container's own identity, used to derive advertised addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerIdentity {
    pub hostname: String,
}

impl ContainerIdentity {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
        }
    }

    /// Detect the identity from the runtime environment.
    ///
    /// Container runtimes set the hostname to the container id; `HOSTNAME` is
    /// the authoritative source, `/etc/hostname` the fallback.
    pub fn detect() -> Self {
        let hostname = std::env::var("HOSTNAME")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .or_else(|| {
                std::fs::read_to_string("/etc/hostname")
                    .ok()
                    .map(|h| h.trim().to_string())
                    .filter(|h| !h.is_empty())
            })
            .unwrap_or_else(|| "localhost".to_string());
        Self { hostname }
    }

    /// Short container identifier: the first 12 characters of the hostname
    pub fn short_id(&self) -> &str {
        let end = self
            .hostname
            .char_indices()
            .nth(SHORT_ID_LEN)
            .map(|(i, _)| i)
            .unwrap_or(self.hostname.len());
        &self.hostname[..end]
    }
}

/// The static default set for one resolution pass
#[derive(Debug)]
pub struct EditionDefaults {
    edition: Edition,
    entries: Vec<DefaultEntry>,
}

impl EditionDefaults {
    /// Compute the default set from the startup inputs.
    ///
    /// Directory defaults are only offered when the corresponding mount
    /// actually exists, so an unmounted layout never redirects server
    /// directories.
    pub fn compute(
        era: NamingEra,
        edition: Edition,
        identity: &ContainerIdentity,
        layout: &DirectoryLayout,
    ) -> Self {
        let mut entries = Vec::new();

        if layout.logs.is_dir() {
            entries.push(DefaultEntry {
                key: era.logs_directory().to_string(),
                value: "/logs".to_string(),
                gate: EditionGate::Any,
            });
        }
        if layout.data.is_dir() {
            entries.push(DefaultEntry {
                key: era.data_directory().to_string(),
                value: "/data".to_string(),
                gate: EditionGate::Any,
            });
        }
        if layout.metrics.is_dir() {
            if let Some(key) = era.metrics_directory() {
                entries.push(DefaultEntry {
                    key: key.to_string(),
                    value: "/metrics".to_string(),
                    gate: EditionGate::EnterpriseOnly,
                });
            }
        }

        entries.push(DefaultEntry {
            key: era.cluster_advertised_address().to_string(),
            value: format!("{}:{}", identity.short_id(), CLUSTER_TX_PORT),
            gate: EditionGate::EnterpriseOnly,
        });

        if era == NamingEra::Legacy {
            entries.push(DefaultEntry {
                key: era.jvm_additional().to_string(),
                value: "-Dunsupported.dbms.udc.source=docker".to_string(),
                gate: EditionGate::Any,
            });
        }

        debug!(
            "Computed {} default entries for {} edition",
            entries.len(),
            edition
        );
        Self { edition, entries }
    }

    /// Build a default set from explicit entries (test seam)
    pub fn from_entries(entries: Vec<DefaultEntry>) -> Self {
        Self {
            edition: Edition::Community,
            entries,
        }
    }

    /// Defaults applicable to the running edition
    pub fn entries(&self) -> impl Iterator<Item = &DefaultEntry> {
        let edition = self.edition;
        self.entries
            .iter()
            .filter(move |entry| entry.gate.applies_to(edition))
    }
}
