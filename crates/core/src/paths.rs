//! Fixed directory layout inside the container
//!
//! The image mounts user data at well-known paths: `/conf` for an optional
//! configuration file, `/logs`, `/data` and (enterprise) `/metrics`. The
//! resolved configuration is written under the server home. All paths are
//! carried in one struct so tests can relocate the whole layout under a
//! temporary root.

use std::path::{Path, PathBuf};

/// Name of the configuration file, both in the mount and under home
pub const CONF_FILE_NAME: &str = "neo4j.conf";

/// Default server home when `NEO4J_HOME` is unset
pub const DEFAULT_HOME: &str = "/var/lib/neo4j";

/// Well-known mount paths plus the server home
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLayout {
    /// Server installation home; the resolved file goes to `<home>/conf/`
    pub home: PathBuf,
    /// Mount directory for a user-supplied configuration file
    pub conf_mount: PathBuf,
    /// Logs mount
    pub logs: PathBuf,
    /// Data mount
    pub data: PathBuf,
    /// Metrics mount (only meaningful for the legacy era, enterprise edition)
    pub metrics: PathBuf,
}

impl DirectoryLayout {
    /// Standard container layout with mounts at the filesystem root
    pub fn standard(home: impl Into<PathBuf>) -> Self {
        Self::rooted_at(Path::new("/"), home)
    }

    /// Layout with every mount under `root`; used by the CLI's hidden
    /// `--mount-root` flag and by tests
    pub fn rooted_at(root: &Path, home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            conf_mount: root.join("conf"),
            logs: root.join("logs"),
            data: root.join("data"),
            metrics: root.join("metrics"),
        }
    }

    /// Path of the optional user-mounted configuration file
    pub fn mounted_conf_file(&self) -> PathBuf {
        self.conf_mount.join(CONF_FILE_NAME)
    }

    /// Path the resolved configuration is written to
    pub fn home_conf_file(&self) -> PathBuf {
        self.home.join("conf").join(CONF_FILE_NAME)
    }
}
