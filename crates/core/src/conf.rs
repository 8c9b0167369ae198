//! Configuration file parsing and serialization
//!
//! The configuration file is plain text: one `key=value` per line, comments
//! prefixed with `#`, no quoting. Parsing splits each non-comment line on the
//! first `=` and takes the value verbatim — values legitimately contain `=`,
//! `$`, `*` and backticks and must round-trip byte-for-byte. Lines without a
//! separator carry no setting but are preserved for write-through, as are
//! comments and blank lines.
//!
//! Serialization works from the original line sequence so a user's comments
//! and layout survive re-resolution; settings that gained a value during the
//! merge are appended at the end.

use crate::errors::ConfError;
use crate::merge::EffectiveConfiguration;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One line of a configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfLine {
    /// `#`-prefixed comment, stored verbatim
    Comment(String),
    /// Empty or whitespace-only line
    Blank,
    /// `key=value` pair; value is everything after the first `=`, unmodified
    Setting { key: String, value: String },
    /// Line with no `=` separator: not a setting, passed through on write
    Passthrough(String),
}

/// An ordered, comment-preserving view of a configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfFile {
    pub lines: Vec<ConfLine>,
}

impl ConfFile {
    /// Parse configuration file text
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .map(|line| {
                if line.trim().is_empty() {
                    ConfLine::Blank
                } else if line.trim_start().starts_with('#') {
                    ConfLine::Comment(line.to_string())
                } else if let Some((key, value)) = line.split_once('=') {
                    ConfLine::Setting {
                        key: key.trim().to_string(),
                        value: value.to_string(),
                    }
                } else {
                    ConfLine::Passthrough(line.to_string())
                }
            })
            .collect();
        Self { lines }
    }

    /// Load a configuration file from disk.
    ///
    /// A missing file is reported as `ConfError::NotFound` so callers can
    /// treat an unmounted configuration as the empty source; any other I/O
    /// failure is `ConfError::Unreadable` and fatal.
    pub fn load(path: &Path) -> Result<Self, ConfError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                debug!("Loaded configuration file from {}", path.display());
                Ok(Self::parse(&text))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ConfError::NotFound {
                path: path.display().to_string(),
            }),
            Err(e) => Err(ConfError::Unreadable {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Project the file into an ordered setting map.
    ///
    /// Duplicate keys resolve to the last occurrence; the entry keeps the
    /// position of the first occurrence.
    pub fn settings(&self) -> IndexMap<String, String> {
        let mut map = IndexMap::new();
        for line in &self.lines {
            if let ConfLine::Setting { key, value } = line {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }

    /// Render the effective configuration using this file's line layout.
    ///
    /// Comments, blanks and passthrough lines are emitted verbatim in their
    /// original positions. Each setting key is emitted once, at its first
    /// occurrence, with the merged value; effective settings with no line in
    /// the original file are appended at the end. Values are written exactly
    /// as merged — no quoting, no expansion.
    pub fn render(&self, effective: &EffectiveConfiguration) -> String {
        let mut out = String::new();
        let mut emitted: HashSet<&str> = HashSet::new();

        for line in &self.lines {
            match line {
                ConfLine::Comment(text) | ConfLine::Passthrough(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                ConfLine::Blank => out.push('\n'),
                ConfLine::Setting { key, .. } => {
                    if emitted.contains(key.as_str()) {
                        continue; // duplicate occurrence, already resolved
                    }
                    if let Some(resolved) = effective.get(key) {
                        out.push_str(key);
                        out.push('=');
                        out.push_str(&resolved.value);
                        out.push('\n');
                        emitted.insert(key.as_str());
                    }
                }
            }
        }

        for (key, resolved) in effective.iter() {
            if !emitted.contains(key.as_str()) {
                out.push_str(key);
                out.push('=');
                out.push_str(&resolved.value);
                out.push('\n');
            }
        }

        out
    }
}

/// Write rendered configuration text to disk, creating parent directories.
///
/// Writes go through `std::fs` only; no shell sits between the merge and the
/// disk write, so values containing `$`, `*` or backticks land verbatim.
pub fn write_conf(path: &Path, text: &str) -> Result<(), ConfError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfError::WriteFailed {
            path: path.display().to_string(),
            source: e,
        })?;
    }
    fs::write(path, text).map_err(|e| ConfError::WriteFailed {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::{EffectiveConfiguration, Provenance};

    fn effective(entries: &[(&str, &str, Provenance)]) -> EffectiveConfiguration {
        let mut eff = EffectiveConfiguration::default();
        for (key, value, provenance) in entries {
            eff.insert(key.to_string(), value.to_string(), *provenance);
        }
        eff
    }

    #[test]
    fn test_parse_classifies_lines() {
        let conf = ConfFile::parse(
            "# a comment\n\nserver.memory.heap.max_size=512M\nnot a setting\n",
        );
        assert_eq!(
            conf.lines,
            vec![
                ConfLine::Comment("# a comment".to_string()),
                ConfLine::Blank,
                ConfLine::Setting {
                    key: "server.memory.heap.max_size".to_string(),
                    value: "512M".to_string(),
                },
                ConfLine::Passthrough("not a setting".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_splits_on_first_equals_only() {
        let conf = ConfFile::parse("dbms.jvm.additional=-Dkey=value$1\n");
        assert_eq!(
            conf.settings().get("dbms.jvm.additional").map(String::as_str),
            Some("-Dkey=value$1")
        );
    }

    #[test]
    fn test_duplicate_keys_last_occurrence_wins() {
        let conf = ConfFile::parse("a.b=1\nc.d=x\na.b=2\n");
        let settings = conf.settings();
        assert_eq!(settings.get("a.b").map(String::as_str), Some("2"));
        // position of first occurrence is kept
        assert_eq!(settings.get_index_of("a.b"), Some(0));
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfFile::load(&dir.path().join("neo4j.conf")).unwrap_err();
        assert!(matches!(err, ConfError::NotFound { .. }));
    }

    #[test]
    fn test_render_preserves_comments_and_appends_new_settings() {
        let conf = ConfFile::parse("# heap\nserver.memory.heap.max_size=512M\n");
        let eff = effective(&[
            ("server.memory.heap.max_size", "1000m", Provenance::Environment),
            ("server.directories.logs", "/logs", Provenance::Default),
        ]);
        let rendered = conf.render(&eff);
        assert_eq!(
            rendered,
            "# heap\nserver.memory.heap.max_size=1000m\nserver.directories.logs=/logs\n"
        );
    }

    #[test]
    fn test_render_emits_duplicate_keys_once() {
        let conf = ConfFile::parse("a.b=1\na.b=2\n");
        let eff = effective(&[("a.b", "2", Provenance::File)]);
        assert_eq!(conf.render(&eff), "a.b=2\n");
    }

    #[test]
    fn test_special_characters_round_trip() {
        let value = "-Djavax.net.ssl.trustStorePassword=beepbeep$boop1boop2";
        let text = format!("dbms.jvm.additional={}\n", value);
        let conf = ConfFile::parse(&text);
        let eff = effective(&[("dbms.jvm.additional", value, Provenance::File)]);
        assert_eq!(conf.render(&eff), text);

        let conf = ConfFile::parse("dbms.security.procedures.unrestricted=*\n");
        assert_eq!(
            conf.settings()
                .get("dbms.security.procedures.unrestricted")
                .map(String::as_str),
            Some("*")
        );
    }

    #[test]
    fn test_write_then_parse_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("neo4j.conf");
        let text = "a.b=beepbeep$boop1boop2\nc.d=*\n";
        write_conf(&path, text).unwrap();
        let reloaded = ConfFile::load(&path).unwrap();
        let settings = reloaded.settings();
        assert_eq!(settings.get("a.b").map(String::as_str), Some("beepbeep$boop1boop2"));
        assert_eq!(settings.get("c.d").map(String::as_str), Some("*"));
    }
}
