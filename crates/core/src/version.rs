//! Server version parsing
//!
//! Image builds bake the server version into the environment as strings like
//! `5.12.0`, `4.4.28` or `5.12.0-enterprise`. These are not always strict
//! semver (a bare `4.4` appears in older images), so parsing pads missing
//! components and strips any edition suffix before handing off to `semver`.

use crate::errors::{EntrypointError, Result};
use semver::Version;

/// Parse a server version string into a `semver::Version`.
///
/// Accepts `MAJOR`, `MAJOR.MINOR` and `MAJOR.MINOR.PATCH` forms; anything
/// after a `-` or `+` is ignored (edition or build suffix).
pub fn parse_server_version(raw: &str) -> Result<Version> {
    let base = raw
        .split(['-', '+'])
        .next()
        .unwrap_or(raw)
        .trim();

    let mut parts = base.split('.');
    let major = parse_component(raw, parts.next())?;
    let minor = match parts.next() {
        Some(p) => parse_component(raw, Some(p))?,
        None => 0,
    };
    let patch = match parts.next() {
        Some(p) => parse_component(raw, Some(p))?,
        None => 0,
    };
    if parts.next().is_some() {
        return Err(EntrypointError::InvalidVersion {
            version: raw.to_string(),
            message: "too many version components".to_string(),
        });
    }

    Ok(Version::new(major, minor, patch))
}

fn parse_component(raw: &str, part: Option<&str>) -> Result<u64> {
    let part = part.filter(|p| !p.is_empty()).ok_or_else(|| {
        EntrypointError::InvalidVersion {
            version: raw.to_string(),
            message: "empty version component".to_string(),
        }
    })?;
    part.parse::<u64>().map_err(|e| EntrypointError::InvalidVersion {
        version: raw.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_version() {
        assert_eq!(parse_server_version("5.12.0").unwrap(), Version::new(5, 12, 0));
        assert_eq!(parse_server_version("4.4.28").unwrap(), Version::new(4, 4, 28));
    }

    #[test]
    fn test_partial_versions_are_padded() {
        assert_eq!(parse_server_version("4.4").unwrap(), Version::new(4, 4, 0));
        assert_eq!(parse_server_version("5").unwrap(), Version::new(5, 0, 0));
    }

    #[test]
    fn test_edition_suffix_is_ignored() {
        assert_eq!(
            parse_server_version("5.12.0-enterprise").unwrap(),
            Version::new(5, 12, 0)
        );
    }

    #[test]
    fn test_invalid_versions_are_rejected() {
        assert!(parse_server_version("").is_err());
        assert!(parse_server_version("five").is_err());
        assert!(parse_server_version("5.1.2.3").is_err());
    }
}
