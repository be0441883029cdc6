//! Loading the build configuration from `rtti.toml`.

use std::path::Path;

use anyhow::{Context, Result};
use rtti_builder::FeatureFlags;
use serde::Deserialize;

/// On-disk configuration file.
///
/// ```toml
/// [features]
/// enabled = ["python-snapshot-upload"]
/// ```
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    features: FeatureFlags,
}

fn parse(text: &str) -> Result<FeatureFlags> {
    let file: ConfigFile = toml::from_str(text)?;
    Ok(file.features)
}

/// Read the feature flags from `path`, or start with none enabled.
pub fn load(path: Option<&Path>) -> Result<FeatureFlags> {
    let Some(path) = path else {
        return Ok(FeatureFlags::new());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
}
