use std::sync::OnceLock;

use regex::Regex;

/// Alias table mapping cleaned (uppercased, "LICENSE"/"THE "-stripped) phrases
/// to canonical SPDX identifiers. Extend by adding rows; the lookup logic does
/// not change.
///
/// Note: the "MIT LICENSE" and "APACHE LICENSE 2.0" keys can never match a
/// cleaned string (cleaning removes "LICENSE" first), but they are kept so the
/// table reads as the full set of recognized spellings.
const ALIAS_MAP: &[(&str, &str)] = &[
    ("GPL V3", "GPL-3.0-only"),
    ("GPL V2", "GPL-2.0-only"),
    ("APACHE LICENSE 2.0", "Apache-2.0"),
    ("APACHE 2.0", "Apache-2.0"),
    ("MIT LICENSE", "MIT"),
    ("BSD 3-CLAUSE", "BSD-3-Clause"),
    ("MPL 2.0", "MPL-2.0"),
];

fn alias(phrase: &str) -> Option<&'static str> {
    ALIAS_MAP
        .iter()
        .find(|(key, _)| *key == phrase)
        .map(|(_, canonical)| *canonical)
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Normalize a free-form license label to a best-effort canonical identifier.
///
/// Cleaning uppercases the input, blanket-removes the substrings `"LICENSE"`
/// and `"THE "`, and collapses whitespace. The cleaned string is matched
/// against the alias table whole-string first, then token-by-token with greedy
/// longest-phrase substitution (4 tokens down to 1); unmatched tokens pass
/// through unchanged.
///
/// This is a heuristic, not a lossless canonicalizer: the blanket substring
/// removal can corrupt names that legitimately contain "the" (e.g. a
/// hypothetical "Weather License"). Disallow-lists may be authored against
/// these cleaned forms, so the behavior is intentional and must not change.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return raw.to_string();
    }

    let cleaned = raw
        .trim()
        .to_uppercase()
        .replace("LICENSE", "")
        .replace("THE ", "");
    let cleaned = whitespace_re().replace_all(&cleaned, " ");
    let cleaned = cleaned.trim();

    // Whole-string alias match takes priority over phrase substitution.
    if let Some(canonical) = alias(cleaned) {
        return canonical.to_string();
    }

    let tokens: Vec<&str> = cleaned.split(' ').collect();
    let mut parts: Vec<&str> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let mut matched = false;
        let max_len = (tokens.len() - i).min(4);
        for len in (1..=max_len).rev() {
            let phrase = tokens[i..i + len].join(" ");
            if let Some(canonical) = alias(&phrase) {
                parts.push(canonical);
                i += len;
                matched = true;
                break;
            }
        }
        if !matched {
            parts.push(tokens[i]);
            i += 1;
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_aliases() {
        assert_eq!(normalize("GPL V3"), "GPL-3.0-only");
        assert_eq!(normalize("GPL V2"), "GPL-2.0-only");
        assert_eq!(normalize("Apache License 2.0"), "Apache-2.0");
        assert_eq!(normalize("Apache 2.0"), "Apache-2.0");
        assert_eq!(normalize("MIT License"), "MIT");
        assert_eq!(normalize("BSD 3-Clause"), "BSD-3-Clause");
        assert_eq!(normalize("MPL 2.0"), "MPL-2.0");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(normalize("gpl v3"), "GPL-3.0-only");
        assert_eq!(normalize("apache license 2.0"), "Apache-2.0");
        assert_eq!(normalize("mit license"), "MIT");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize("  GPL   V3  "), "GPL-3.0-only");
        assert_eq!(normalize("GPL\tV3"), "GPL-3.0-only");
    }

    #[test]
    fn test_empty_passthrough() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_phrase_substitution_inside_expression() {
        let normalized = normalize("GPL V3 OR MIT License");
        assert!(normalized.contains("GPL-3.0-only"));
        assert!(normalized.contains("MIT"));
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        assert_eq!(normalize("GPL-3.0"), "GPL-3.0");
        assert_eq!(normalize("Weather-Special-1.0"), "WEATHER-SPECIAL-1.0");
    }

    #[test]
    fn test_the_removal_quirk() {
        // "THE " is blanket-removed from the uppercased string, by contract.
        assert_eq!(normalize("The MIT License"), "MIT");
    }

    #[test]
    fn test_idempotent_on_stable_inputs() {
        for input in ["MIT", "GPL-3.0", "APACHE-2.0", "  foo   bar ", ""] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input:?}");
        }
    }
}
