//! Merge engine: combine file, environment and default sources
//!
//! Precedence is fixed: environment variable > mounted file entry > built-in
//! default. The engine consults the sources in priority order per setting
//! instead of overwriting sequentially, which keeps the "never clobber an
//! explicit user value with a default" rule auditable. Each setting records
//! the provenance that won.
//!
//! List-like settings (additional JVM arguments) carry an `Append` combination
//! policy as part of their static definition: values from lower-precedence
//! sources are kept and the higher-precedence fragment is concatenated instead
//! of replacing them.

use crate::defaults::EditionDefaults;
use crate::naming::NamingEra;
use indexmap::IndexMap;
use serde::Serialize;

/// Source that determined a setting's final value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Built-in edition/version default
    Default,
    /// Entry in the user-mounted configuration file
    File,
    /// Environment variable override
    Environment,
}

/// Combination policy when a setting is present in more than one source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinePolicy {
    /// Higher-precedence source replaces the value (the common case)
    Override,
    /// Fragments concatenate, lower-precedence source first
    Append,
}

/// Combination policy for a setting; part of the setting's static definition
pub fn combine_policy(era: NamingEra, key: &str) -> CombinePolicy {
    if key == era.jvm_additional() {
        CombinePolicy::Append
    } else {
        CombinePolicy::Override
    }
}

/// A resolved setting value with its winning provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSetting {
    pub value: String,
    pub provenance: Provenance,
}

/// The final resolved mapping for one resolution pass
#[derive(Debug, Default, Serialize)]
pub struct EffectiveConfiguration {
    settings: IndexMap<String, ResolvedSetting>,
}

impl EffectiveConfiguration {
    pub fn insert(&mut self, key: String, value: String, provenance: Provenance) {
        self.settings.insert(key, ResolvedSetting { value, provenance });
    }

    pub fn get(&self, key: &str) -> Option<&ResolvedSetting> {
        self.settings.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ResolvedSetting)> {
        self.settings.iter()
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

/// Concatenate list fragments, skipping a fragment the list already carries.
///
/// Re-running the resolver over its own output must not duplicate fragments.
fn append_fragment(existing: &str, fragment: &str) -> String {
    if existing.split(',').any(|part| part == fragment) {
        return existing.to_string();
    }
    format!("{},{}", existing, fragment)
}

/// Merge engine for one resolution pass
#[derive(Debug)]
pub struct MergeEngine {
    era: NamingEra,
}

impl MergeEngine {
    pub fn new(era: NamingEra) -> Self {
        Self { era }
    }

    /// Combine the three sources under env > file > default precedence.
    ///
    /// `file` must already be projected last-occurrence-wins; `defaults` must
    /// already be filtered to the running edition by its predicate.
    pub fn merge(
        &self,
        file: &IndexMap<String, String>,
        env: &IndexMap<String, String>,
        defaults: &EditionDefaults,
    ) -> EffectiveConfiguration {
        let mut effective = EffectiveConfiguration::default();

        // File entries first: they anchor ordering and are never re-injected
        // over by defaults.
        for (key, value) in file {
            effective.insert(key.clone(), value.clone(), Provenance::File);
        }

        // Environment overrides, applied literally (no evaluation).
        for (key, value) in env {
            let combined = match (combine_policy(self.era, key), effective.get(key)) {
                (CombinePolicy::Append, Some(existing)) => append_fragment(&existing.value, value),
                _ => value.clone(),
            };
            effective.insert(key.clone(), combined, Provenance::Environment);
        }

        // Defaults fill the remaining gaps only.
        for entry in defaults.entries() {
            let update = match (combine_policy(self.era, &entry.key), effective.get(&entry.key)) {
                (_, None) => Some((entry.value.clone(), Provenance::Default)),
                (CombinePolicy::Append, Some(existing)) => {
                    // Default fragment leads, explicit values follow.
                    if existing.value.split(',').any(|part| part == entry.value) {
                        None
                    } else {
                        Some((
                            format!("{},{}", entry.value, existing.value),
                            existing.provenance,
                        ))
                    }
                }
                (CombinePolicy::Override, Some(_)) => None, // explicit value stands
            };
            if let Some((value, provenance)) = update {
                effective.insert(entry.key.clone(), value, provenance);
            }
        }

        effective
    }
}
