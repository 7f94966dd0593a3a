//! Advertised device capabilities, captured once at discovery time.

use std::collections::HashSet;

/// Options whose boolean flips at runtime (setting a PIN, enrolling a
/// fingerprint), so only their presence in the advertisement matters.
const MUTABLE_OPTIONS: [&str; 2] = ["clientPin", "bioEnroll"];

/// Versions, extensions and options a device advertised in its GetInfo
/// response. Immutable after construction.
#[derive(Debug, Clone, Default)]
pub struct CapabilitySet {
    versions: HashSet<String>,
    extensions: HashSet<String>,
    options: HashSet<String>,
}

impl CapabilitySet {
    /// Build the set from a discovery response.
    ///
    /// An option counts as present when its advertised value is true, or
    /// unconditionally when it is one of the runtime-mutable options.
    #[must_use]
    pub fn new<V, E>(versions: V, extensions: E, options: &[(String, bool)]) -> Self
    where
        V: IntoIterator<Item = String>,
        E: IntoIterator<Item = String>,
    {
        let options = options
            .iter()
            .filter(|(name, value)| *value || MUTABLE_OPTIONS.contains(&name.as_str()))
            .map(|(name, _)| name.clone())
            .collect();
        Self {
            versions: versions.into_iter().collect(),
            extensions: extensions.into_iter().collect(),
            options,
        }
    }

    #[must_use]
    pub fn has_version(&self, name: &str) -> bool {
        self.versions.contains(name)
    }

    #[must_use]
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    #[must_use]
    pub fn has_option(&self, name: &str) -> bool {
        self.options.contains(name)
    }
}
