//! Build-time feature selection threaded through a reflection pass.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Read-only configuration visible to every declaration during a pass.
///
/// The builder hands it to declarations by reference; it is never copied
/// into the symbol table or the produced descriptors.
pub trait BuildConfig {
    /// Check whether a named build feature is enabled.
    fn is_enabled(&self, _feature: &str) -> bool {
        false
    }
}

/// The empty configuration: no features enabled.
impl BuildConfig for () {}

/// A set of enabled feature names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    #[serde(default)]
    enabled: BTreeSet<String>,
}

impl FeatureFlags {
    /// Create an empty flag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a feature, builder style.
    pub fn with(mut self, feature: impl Into<String>) -> Self {
        self.enable(feature);
        self
    }

    /// Enable a feature.
    pub fn enable(&mut self, feature: impl Into<String>) {
        self.enabled.insert(feature.into());
    }

    /// Iterate over enabled features in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

impl BuildConfig for FeatureFlags {
    fn is_enabled(&self, feature: &str) -> bool {
        self.enabled.contains(feature)
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureFlags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_config_enables_nothing() {
        assert!(!().is_enabled("anything"));
    }

    #[test]
    fn test_feature_flags() {
        let flags = FeatureFlags::new().with("streams").with("sockets");
        assert!(flags.is_enabled("streams"));
        assert!(!flags.is_enabled("webgpu"));
        assert_eq!(flags.iter().collect::<Vec<_>>(), vec!["sockets", "streams"]);

        let collected: FeatureFlags = ["a", "b"].into_iter().collect();
        assert!(collected.is_enabled("b"));
    }
}
