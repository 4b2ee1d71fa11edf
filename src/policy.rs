use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Organizational compliance policy, deserialized from a YAML file.
///
/// Every key is optional; an absent (or empty/false) key disables the
/// corresponding check. Immutable once loaded.
#[derive(Debug, Default, Deserialize)]
pub struct PolicyConfig {
    /// License identifiers that fail compliance, canonical or raw.
    #[serde(rename = "disallowed-licenses", default)]
    pub disallowed_licenses: HashSet<String>,
    /// Package field names (snake_case) that must not be NOASSERTION.
    #[serde(rename = "no-assertion-values", default)]
    pub no_assertion_fields: Vec<String>,
    /// Require a non-blank copyright text on every package.
    #[serde(rename = "required-copyright", default)]
    pub required_copyright: bool,
    /// Supplier names considered approved (after `"Organization: "` stripping).
    #[serde(rename = "approved-suppliers", default)]
    pub approved_suppliers: HashSet<String>,
}

/// Load and deserialize the YAML policy file.
pub fn load_policy(path: &Path) -> Result<PolicyConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to load policy file: {}", path.display()))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse policy file: {}", path.display()))
}
