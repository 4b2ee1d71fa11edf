use std::time::Instant;

use crate::license::expr::is_disallowed;
use crate::models::{CheckResult, Package, SbomDocument};
use crate::policy::PolicyConfig;

/// A policy check: scans the package list once and appends violations (or a
/// single all-clear message) to the result. Skips itself when its governing
/// policy field is empty/false.
type CheckFn = fn(&[Package], &PolicyConfig, &mut CheckResult);

/// Policy-key → handler dispatch table. Checks are independent and
/// order-insensitive; the order here only fixes message ordering. The keys
/// record each handler's governing policy field; they are documentation, not
/// lookups — gating on the field happens inside the handler itself.
const POLICY_HANDLERS: &[(&str, CheckFn)] = &[
    ("disallowed-licenses", check_licenses),
    ("no-assertion-values", check_assertions),
    ("required-copyright", check_copyright),
    ("approved-suppliers", check_suppliers),
];

/// SPDX SBOM compliance checker.
pub struct ComplianceChecker;

impl ComplianceChecker {
    pub fn new() -> Self {
        Self
    }

    /// Run every enabled policy check over the document's packages.
    ///
    /// Returns a fresh [`CheckResult`] per call; metadata is written once
    /// before dispatch, plus the elapsed-time field at the end. Pure and
    /// single-threaded — callers holding their own document and policy may
    /// invoke this from parallel threads without synchronization.
    pub fn check_compliance(&self, document: &SbomDocument, policy: &PolicyConfig) -> CheckResult {
        let start = Instant::now();
        let mut result = CheckResult::new();

        result.set_metadata("total_packages", document.packages.len());
        result.set_metadata(
            "spdx_version",
            document.spdx_version.as_deref().unwrap_or("SPDX-2.3"),
        );
        result.set_metadata(
            "document_name",
            document.name.as_deref().unwrap_or("SBOM Document"),
        );

        for (_, handler) in POLICY_HANDLERS {
            handler(&document.packages, policy, &mut result);
        }

        result.set_metadata("processing_time", start.elapsed().as_secs_f64());
        result
    }
}

impl Default for ComplianceChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Flag packages whose concluded license expression violates the disallow-set.
fn check_licenses(packages: &[Package], policy: &PolicyConfig, result: &mut CheckResult) {
    if policy.disallowed_licenses.is_empty() {
        return;
    }
    let mut violations = 0;
    for pkg in packages {
        if let Some(license) = pkg.license_concluded.as_deref() {
            if is_disallowed(license, &policy.disallowed_licenses) {
                result.add_violation(format!(
                    "Package '{}' uses disallowed license: {}",
                    pkg.name, license
                ));
                violations += 1;
            }
        }
    }
    if violations == 0 {
        result.add_passed("disallowed-licenses: All packages use approved licenses");
    }
}

/// Flag NOASSERTION values in the policy's monitored fields.
fn check_assertions(packages: &[Package], policy: &PolicyConfig, result: &mut CheckResult) {
    if policy.no_assertion_fields.is_empty() {
        return;
    }
    let mut violations = 0;
    for pkg in packages {
        for field in &policy.no_assertion_fields {
            if let Some(value) = pkg.field(field) {
                if value.to_uppercase() == "NOASSERTION" {
                    result.add_violation(format!(
                        "Package '{}' has NOASSERTION for field: {}",
                        pkg.name, field
                    ));
                    violations += 1;
                }
            }
        }
    }
    if violations == 0 {
        result.add_passed("no-assertion-values: All critical fields have proper values");
    }
}

/// Flag packages with missing or blank copyright text.
fn check_copyright(packages: &[Package], policy: &PolicyConfig, result: &mut CheckResult) {
    if !policy.required_copyright {
        return;
    }
    let mut violations = 0;
    for pkg in packages {
        let blank = pkg
            .copyright_text
            .as_deref()
            .map_or(true, |text| text.trim().is_empty());
        if blank {
            result.add_violation(format!(
                "Package '{}' missing required copyright text",
                pkg.name
            ));
            violations += 1;
        }
    }
    if violations == 0 {
        result.add_passed("required-copyright: All packages have copyright text");
    }
}

/// Flag packages from suppliers outside the approved set. A leading
/// `"Organization: "` prefix is stripped before the membership test.
fn check_suppliers(packages: &[Package], policy: &PolicyConfig, result: &mut CheckResult) {
    if policy.approved_suppliers.is_empty() {
        return;
    }
    let mut violations = 0;
    for pkg in packages {
        let Some(supplier) = pkg.supplier.as_deref().filter(|s| !s.is_empty()) else {
            continue;
        };
        let supplier_name = supplier.strip_prefix("Organization: ").unwrap_or(supplier);
        if !policy.approved_suppliers.contains(supplier_name) {
            result.add_violation(format!(
                "Package '{}' has unapproved supplier: {}",
                pkg.name, supplier_name
            ));
            violations += 1;
        }
    }
    if violations == 0 {
        result.add_passed("approved-suppliers: All suppliers are approved");
    }
}
