//! Command-line interface for the container entrypoint
//!
//! The entrypoint runs the license gate, resolves the server configuration,
//! then hands off to the server command. The `dump-config` command resolves,
//! emits the effective configuration with the completion marker, and exits 0
//! without ever starting the server.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use neo4j_entrypoint_core::defaults::{ContainerIdentity, Edition};
use neo4j_entrypoint_core::errors::EntrypointError;
use neo4j_entrypoint_core::license;
use neo4j_entrypoint_core::logging;
use neo4j_entrypoint_core::paths::{DirectoryLayout, DEFAULT_HOME};
use neo4j_entrypoint_core::resolver::{resolve, ResolveRequest};
use neo4j_entrypoint_core::version::parse_server_version;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Command argument that selects dump mode
const DUMP_COMMAND: &str = "dump-config";

/// CLI-facing edition enum (value_enum for clap) mapping into the core edition
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EditionOption {
    Community,
    Enterprise,
}

impl From<EditionOption> for Edition {
    fn from(edition: EditionOption) -> Self {
        match edition {
            EditionOption::Community => Edition::Community,
            EditionOption::Enterprise => Edition::Enterprise,
        }
    }
}

/// Log format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    Text,
    /// JSON structured format
    Json,
}

impl LogFormat {
    fn as_str(self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }
}

/// Container entrypoint: resolve the server configuration, then hand off
#[derive(Debug, Parser)]
#[command(name = "neo4j-entrypoint", version)]
pub struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Product edition; baked into the image
    #[arg(long, value_enum, env = "NEO4J_EDITION", default_value = "community")]
    pub edition: EditionOption,

    /// Server version; baked into the image
    #[arg(long = "server-version", env = "NEO4J_VERSION")]
    pub server_version: String,

    /// Server installation home
    #[arg(long, env = "NEO4J_HOME", default_value = DEFAULT_HOME)]
    pub home: PathBuf,

    /// Root under which /conf, /logs, /data and /metrics are mounted (testing hook)
    #[arg(long, default_value = "/", hide = true)]
    pub mount_root: PathBuf,

    /// Command to hand off to after resolution; `dump-config` resolves and exits
    #[arg(trailing_var_arg = true, default_values_t = vec!["neo4j".to_string()])]
    pub command: Vec<String>,
}

impl Cli {
    /// Run the entrypoint
    pub fn dispatch(self) -> Result<()> {
        logging::init(Some(self.log_format.as_str()))?;

        let edition = Edition::from(self.edition);

        // License gate runs before any configuration work.
        let acceptance = std::env::var(license::LICENSE_ENV).ok();
        license::check(edition, acceptance.as_deref()).map_err(EntrypointError::from)?;

        let version = parse_server_version(&self.server_version)?;
        let dump = self.command.first().map(String::as_str) == Some(DUMP_COMMAND);

        let request = ResolveRequest {
            version,
            edition,
            identity: ContainerIdentity::detect(),
            layout: DirectoryLayout::rooted_at(&self.mount_root, &self.home),
            env: std::env::vars().collect(),
            dump,
        };
        let resolution = resolve(&request)?;
        debug!(
            "Resolution complete: {} settings written to {}",
            resolution.effective.len(),
            resolution.written_path.display()
        );

        if dump {
            // Dump mode never starts the server.
            return Ok(());
        }

        info!("Starting server: {}", self.command.join(" "));
        hand_off(&self.command)
    }
}

/// Replace this process with the server command.
///
/// On unix the entrypoint execs so the server receives signals directly; on
/// other platforms it spawns, waits, and forwards the exit status.
#[cfg(unix)]
fn hand_off(command: &[String]) -> Result<()> {
    use std::os::unix::process::CommandExt;

    let (program, args) = command
        .split_first()
        .context("no server command to hand off to")?;
    let err = Command::new(program).args(args).exec();
    // exec only returns on failure
    Err(anyhow::Error::from(err)).with_context(|| format!("failed to exec '{}'", program))
}

#[cfg(not(unix))]
fn hand_off(command: &[String]) -> Result<()> {
    let (program, args) = command
        .split_first()
        .context("no server command to hand off to")?;
    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("failed to run '{}'", program))?;
    std::process::exit(status.code().unwrap_or(1));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dump_config_command() {
        let cli = Cli::try_parse_from([
            "neo4j-entrypoint",
            "--server-version",
            "5.12.0",
            "dump-config",
        ])
        .unwrap();
        assert_eq!(cli.command, vec!["dump-config".to_string()]);
        assert!(matches!(cli.edition, EditionOption::Community));
    }

    #[test]
    fn test_parse_defaults_to_server_command() {
        let cli =
            Cli::try_parse_from(["neo4j-entrypoint", "--server-version", "5.12.0"]).unwrap();
        assert_eq!(cli.command, vec!["neo4j".to_string()]);
        assert_eq!(cli.home, PathBuf::from(DEFAULT_HOME));
    }

    #[test]
    fn test_parse_edition_flag() {
        let cli = Cli::try_parse_from([
            "neo4j-entrypoint",
            "--server-version",
            "4.4.28",
            "--edition",
            "enterprise",
        ])
        .unwrap();
        assert!(matches!(cli.edition, EditionOption::Enterprise));
    }
}
