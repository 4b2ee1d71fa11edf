use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A parsed SPDX SBOM document: display name, declared SPDX version, and the
/// ordered package list the compliance checks scan.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SbomDocument {
    #[serde(default)]
    pub spdx_version: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub packages: Vec<Package>,
}

/// A single package entry from an SPDX 2.3 JSON SBOM.
///
/// Only the fields the checks consume are modeled explicitly; everything else
/// lands in `extra` and stays addressable by name through [`Package::field`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub name: String,
    #[serde(default)]
    pub license_concluded: Option<String>,
    #[serde(default)]
    pub license_declared: Option<String>,
    #[serde(default)]
    pub copyright_text: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub originator: Option<String>,
    #[serde(default)]
    pub version_info: Option<String>,
    #[serde(default)]
    pub download_location: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Package {
    /// Resolve a field by its snake_case name, as policy files reference them.
    ///
    /// Names not modeled as struct fields fall through to the `extra` map
    /// (keyed by the original JSON key). Returns `None` for absent fields —
    /// absence means "no data", never an error.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "license_concluded" => self.license_concluded.as_deref(),
            "license_declared" => self.license_declared.as_deref(),
            "copyright_text" => self.copyright_text.as_deref(),
            "supplier" => self.supplier.as_deref(),
            "originator" => self.originator.as_deref(),
            "version_info" => self.version_info.as_deref(),
            "download_location" => self.download_location.as_deref(),
            other => self.extra.get(other).and_then(|v| v.as_str()),
        }
    }
}

/// Outcome of one compliance run: append-only violation and pass messages
/// plus run metadata. A fresh instance is created per run and never reused.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub violations: Vec<String>,
    pub passed_checks: Vec<String>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compliant iff no violations were recorded.
    pub fn is_compliant(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn add_violation(&mut self, message: impl Into<String>) {
        self.violations.push(message.into());
    }

    pub fn add_passed(&mut self, message: impl Into<String>) {
        self.passed_checks.push(message.into());
    }

    pub fn set_metadata(&mut self, key: &str, value: impl Into<serde_json::Value>) {
        self.metadata.insert(key.to_string(), value.into());
    }
}
