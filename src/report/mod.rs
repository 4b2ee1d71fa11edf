//! Report renderers for compliance check results.
//!
//! - [`terminal`] — colored output with violation/pass listings and a final
//!   COMPLIANT / NON-COMPLIANT banner; respects `--verbose` / `--quiet`.
//!
//! JSON output is handled inline in `main` via `serde_json::to_string_pretty`.

pub mod terminal;
