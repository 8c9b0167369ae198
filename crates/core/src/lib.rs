//! Core library for the Neo4j container entrypoint
//!
//! This crate contains the configuration resolver: setting-name translation,
//! configuration file loading and serialization, environment scanning, the
//! merge engine with env > file > default precedence, edition-gated built-in
//! defaults, the license gate, logging, and error handling.

pub mod conf;
pub mod defaults;
pub mod env_source;
pub mod errors;
pub mod license;
pub mod logging;
pub mod merge;
pub mod naming;
pub mod paths;
pub mod resolver;
pub mod version;

// Re-export IndexMap for use by dependent crates (preserves insertion order for ordered maps)
pub use indexmap::IndexMap;

/// Get the version of the core library
pub fn crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_version() {
        let version = crate_version();
        assert!(!version.is_empty());
        assert!(version.contains('.'));
    }
}
