use std::path::Path;

use anyhow::{Context, Result};

use crate::models::SbomDocument;

/// Load an SPDX 2.3 JSON SBOM from disk.
///
/// Unknown package fields are preserved in [`Package::extra`] so the
/// no-assertion check can address them by name. A document without a
/// `packages` array yields an empty package list, not an error.
///
/// [`Package::extra`]: crate::models::Package::extra
pub fn load_sbom(path: &Path) -> Result<SbomDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to load SBOM file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse SBOM file: {}", path.display()))
}
