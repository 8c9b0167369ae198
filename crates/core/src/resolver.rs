//! Configuration resolution orchestration
//!
//! One resolution pass per container start: load the optional mounted file,
//! scan the environment, compute edition defaults, merge under env > file >
//! default precedence, and write the result under the server home. Dump mode
//! additionally writes the result back to the conf mount, emits every
//! effective setting to the log stream and finishes with the `Config Dumped`
//! marker so the orchestration harness can detect completion.
//!
//! The pass is single-threaded and run-to-completion; it performs no network
//! I/O and keeps no state across runs.

use crate::conf::{self, ConfFile};
use crate::defaults::{ContainerIdentity, Edition, EditionDefaults};
use crate::env_source;
use crate::errors::{ConfError, Result};
use crate::merge::{EffectiveConfiguration, MergeEngine};
use crate::naming::NamingEra;
use crate::paths::DirectoryLayout;
use semver::Version;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Marker emitted to the log stream when dump mode completes
pub const DUMP_MARKER: &str = "Config Dumped";

/// Inputs to one resolution pass
#[derive(Debug)]
pub struct ResolveRequest {
    /// Running server version; selects the naming era
    pub version: Version,
    /// Product edition; gates enterprise-only defaults
    pub edition: Edition,
    /// The container's own identity
    pub identity: ContainerIdentity,
    /// Mount paths and server home
    pub layout: DirectoryLayout,
    /// Environment snapshot (name, value); usually `std::env::vars()`
    pub env: Vec<(String, String)>,
    /// Dump mode: emit the effective configuration and stop
    pub dump: bool,
}

/// Outcome of one resolution pass
#[derive(Debug)]
pub struct Resolution {
    /// Naming era selected for this pass
    pub era: NamingEra,
    /// The final resolved mapping
    pub effective: EffectiveConfiguration,
    /// Where the resolved file was written
    pub written_path: PathBuf,
    /// Environment candidate names rejected by the naming grammar
    pub rejected_env_names: Vec<String>,
}

/// Run one resolution pass.
///
/// A missing mounted file is a legitimate non-error (merge proceeds with an
/// empty file source); an unreadable mounted file aborts the pass.
#[instrument(level = "debug", skip(request), fields(edition = %request.edition, version = %request.version))]
pub fn resolve(request: &ResolveRequest) -> Result<Resolution> {
    let era = NamingEra::for_version(&request.version);

    let mounted_path = request.layout.mounted_conf_file();
    let file = match ConfFile::load(&mounted_path) {
        Ok(file) => file,
        Err(ConfError::NotFound { path }) => {
            debug!("No configuration file mounted at {}", path);
            ConfFile::default()
        }
        Err(e) => return Err(e.into()),
    };

    let env = env_source::scan(request.env.iter().cloned(), era);
    let defaults =
        EditionDefaults::compute(era, request.edition, &request.identity, &request.layout);

    let effective = MergeEngine::new(era).merge(&file.settings(), &env.settings, &defaults);
    debug!("Resolved {} settings", effective.len());

    let rendered = file.render(&effective);
    let written_path = request.layout.home_conf_file();
    conf::write_conf(&written_path, &rendered)?;
    info!("Wrote configuration to {}", written_path.display());

    if request.dump {
        // The harness reads the dumped file from the conf mount.
        conf::write_conf(&mounted_path, &rendered)?;
        for (key, resolved) in effective.iter() {
            info!("{}={}", key, resolved.value);
        }
        if let Ok(payload) = serde_json::to_string(&effective) {
            debug!("Effective configuration: {}", payload);
        }
        info!("{}", DUMP_MARKER);
    }

    Ok(Resolution {
        era,
        effective,
        written_path,
        rejected_env_names: env.rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::Provenance;
    use std::fs;

    fn request(dir: &tempfile::TempDir, edition: Edition, dump: bool) -> ResolveRequest {
        ResolveRequest {
            version: Version::new(5, 12, 0),
            edition,
            identity: ContainerIdentity::new("abc123def456789"),
            layout: DirectoryLayout::rooted_at(dir.path(), dir.path().join("home")),
            env: Vec::new(),
            dump,
        }
    }

    #[test]
    fn test_resolve_without_mounted_file() {
        let dir = tempfile::tempdir().unwrap();
        let resolution = resolve(&request(&dir, Edition::Community, false)).unwrap();
        assert!(resolution.written_path.exists());
        assert_eq!(resolution.era, NamingEra::Modern);
    }

    #[test]
    fn test_resolve_merges_env_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(&dir, Edition::Community, false);
        fs::create_dir_all(dir.path().join("conf")).unwrap();
        fs::write(
            dir.path().join("conf/neo4j.conf"),
            "server.memory.pagecache.size=1024M\n",
        )
        .unwrap();
        req.env.push((
            "NEO4J_server_memory_pagecache_size".to_string(),
            "1000m".to_string(),
        ));

        let resolution = resolve(&req).unwrap();
        let resolved = resolution
            .effective
            .get("server.memory.pagecache.size")
            .unwrap();
        assert_eq!(resolved.value, "1000m");
        assert_eq!(resolved.provenance, Provenance::Environment);
    }

    #[test]
    fn test_dump_writes_back_to_conf_mount() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(&dir, Edition::Community, true);
        req.env
            .push(("NEO4J_server_memory_heap_max__size".to_string(), "3000m".to_string()));

        let resolution = resolve(&req).unwrap();
        assert!(resolution.effective.contains("server.memory.heap.max_size"));

        let dumped = fs::read_to_string(dir.path().join("conf/neo4j.conf")).unwrap();
        assert!(dumped.contains("server.memory.heap.max_size=3000m"));
    }

    #[test]
    fn test_unreadable_mounted_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let req = request(&dir, Edition::Community, false);
        // A directory at the file path makes the read fail with a non-NotFound error.
        fs::create_dir_all(dir.path().join("conf/neo4j.conf")).unwrap();
        assert!(resolve(&req).is_err());
    }
}
