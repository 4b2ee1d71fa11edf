use std::collections::HashSet;
use std::fmt;

use crate::license::normalize::normalize;

/// SPDX sentinel values meaning "no license information asserted". These are
/// exempt from the disallow check even when the disallow-set literally
/// contains one of them; the separate no-assertion check covers that ground.
const IGNORED_LICENSES: &[&str] = &[
    "NOASSERTION",
    "NONE",
    "",
    "UNKNOWN",
    "PROPRIETARY",
    "NO-LICENSE",
    "UNLICENSED",
    "COMMERCIAL",
    "CUSTOM",
];

fn is_ignored(value: &str) -> bool {
    let upper = value.to_uppercase();
    IGNORED_LICENSES.contains(&upper.as_str())
}

/// True if the license key, raw or normalized, appears in the disallow-set.
fn key_disallowed(key: &str, disallowed: &HashSet<String>) -> bool {
    disallowed.contains(key) || disallowed.contains(&normalize(key))
}

/// Decide whether a (possibly compound) license expression violates the
/// disallow-set.
///
/// Cheap paths first: sentinel values and direct raw/normalized membership.
/// Compound expressions go through the structured parser ([`parse`]); if the
/// string is not a well-formed expression, a split-based fallback applies the
/// same OR/AND/WITH semantics to the raw substrings. Never panics; malformed
/// input at worst yields an imprecise boolean.
pub fn is_disallowed(expression: &str, disallowed: &HashSet<String>) -> bool {
    if disallowed.is_empty() {
        return false;
    }
    let expr_str = expression.trim();
    if is_ignored(expr_str) {
        return false;
    }
    if disallowed.contains(expr_str) {
        return true;
    }
    let normalized = normalize(expr_str);
    if is_ignored(&normalized) {
        return false;
    }
    if disallowed.contains(&normalized) {
        return true;
    }
    match parse(expr_str) {
        Ok(expr) => expr.is_disallowed(disallowed),
        Err(_) => fallback_check(expr_str, disallowed),
    }
}

/// Split-based evaluation for strings the parser rejects.
///
/// Separators are tried in priority order: `" OR "`, then `" AND "`, then
/// `" WITH "`. Split parts are checked as plain keys without further
/// recursion, so nested malformed input is only partially evaluated.
fn fallback_check(expr_str: &str, disallowed: &HashSet<String>) -> bool {
    if expr_str.contains(" OR ") {
        return expr_str
            .split(" OR ")
            .all(|part| key_disallowed(part.trim(), disallowed));
    }
    if expr_str.contains(" AND ") {
        return expr_str
            .split(" AND ")
            .any(|part| key_disallowed(part.trim(), disallowed));
    }
    if expr_str.contains(" WITH ") {
        let base = expr_str.split(" WITH ").next().unwrap_or(expr_str).trim();
        return key_disallowed(base, disallowed);
    }
    key_disallowed(expr_str, disallowed)
}

// ---------------------------------------------------------------------------
// Structured expression parser
// ---------------------------------------------------------------------------

/// Parsed form of an SPDX license expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LicenseExpr {
    Literal(String),
    With { license: String, exception: String },
    And(Vec<LicenseExpr>),
    Or(Vec<LicenseExpr>),
}

impl LicenseExpr {
    /// Recursive disallow evaluation:
    /// - a literal is disallowed if its raw or normalized key is in the set;
    /// - `WITH` follows its base license, the exception clause carries no
    ///   compliance weight;
    /// - `OR` is disallowed only if every alternative is (the consumer may
    ///   legally adopt any acceptable branch);
    /// - `AND` is disallowed if any conjunct is (all conjuncts apply at once).
    fn is_disallowed(&self, disallowed: &HashSet<String>) -> bool {
        match self {
            LicenseExpr::Literal(key) => key_disallowed(key, disallowed),
            LicenseExpr::With { license, .. } => key_disallowed(license, disallowed),
            LicenseExpr::Or(operands) => operands.iter().all(|o| o.is_disallowed(disallowed)),
            LicenseExpr::And(operands) => operands.iter().any(|o| o.is_disallowed(disallowed)),
        }
    }
}

/// Error from [`parse`]. Recovered locally via [`fallback_check`]; never
/// propagates out of this module.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid license expression: {}", self.0)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, PartialEq, Clone)]
enum Token {
    Id(String),
    And,
    Or,
    With,
    LParen,
    RParen,
}

/// Tokenize a license expression into a flat [`Vec<Token>`].
fn tokenize(expr: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '(' {
            tokens.push(Token::LParen);
            chars.next();
        } else if c == ')' {
            tokens.push(Token::RParen);
            chars.next();
        } else {
            let mut s = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() || c == '(' || c == ')' {
                    break;
                }
                s.push(c);
                chars.next();
            }
            let token = match s.as_str() {
                "AND" => Token::And,
                "OR" => Token::Or,
                "WITH" => Token::With,
                _ => Token::Id(s),
            };
            tokens.push(token);
        }
    }
    tokens
}

/// Recursive descent parser producing a [`LicenseExpr`] tree.
///
/// Grammar (AND binds tighter than OR):
/// ```text
/// expr     := or_expr
/// or_expr  := and_expr ( "OR" and_expr )*
/// and_expr := atom ( "AND" atom )*
/// atom     := "(" expr ")" | symbol ( "WITH" symbol )?
/// symbol   := id+
/// ```
///
/// Contiguous identifier words merge into a single space-joined symbol, so
/// multi-word alias spellings like `"GPL V3"` stay one literal and ride the
/// structured path even inside parentheses.
///
/// Unlike a lenient evaluator, this parser rejects malformed input —
/// unbalanced parentheses, dangling operators, trailing tokens — so the
/// caller can fall back to string splitting.
struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn parse_or(&mut self) -> Result<LicenseExpr, ParseError> {
        let mut operands = vec![self.parse_and()?];
        while matches!(self.peek(), Some(Token::Or)) {
            self.consume();
            operands.push(self.parse_and()?);
        }
        if operands.len() == 1 {
            Ok(operands.pop().unwrap())
        } else {
            Ok(LicenseExpr::Or(operands))
        }
    }

    fn parse_and(&mut self) -> Result<LicenseExpr, ParseError> {
        let mut operands = vec![self.parse_atom()?];
        while matches!(self.peek(), Some(Token::And)) {
            self.consume();
            operands.push(self.parse_atom()?);
        }
        if operands.len() == 1 {
            Ok(operands.pop().unwrap())
        } else {
            Ok(LicenseExpr::And(operands))
        }
    }

    /// Merge contiguous identifier words into one space-joined symbol.
    fn parse_symbol(&mut self, first: String) -> String {
        let mut symbol = first;
        while matches!(self.peek(), Some(Token::Id(_))) {
            if let Some(Token::Id(word)) = self.consume() {
                symbol.push(' ');
                symbol.push_str(&word);
            }
        }
        symbol
    }

    fn parse_atom(&mut self) -> Result<LicenseExpr, ParseError> {
        match self.consume() {
            Some(Token::LParen) => {
                let expr = self.parse_or()?;
                match self.consume() {
                    Some(Token::RParen) => Ok(expr),
                    _ => Err(ParseError("unbalanced parentheses".to_string())),
                }
            }
            Some(Token::Id(id)) => {
                let license = self.parse_symbol(id);
                if matches!(self.peek(), Some(Token::With)) {
                    self.consume();
                    match self.consume() {
                        Some(Token::Id(id)) => Ok(LicenseExpr::With {
                            license,
                            exception: self.parse_symbol(id),
                        }),
                        _ => Err(ParseError("WITH missing exception identifier".to_string())),
                    }
                } else {
                    Ok(LicenseExpr::Literal(license))
                }
            }
            Some(token) => Err(ParseError(format!("unexpected token {token:?}"))),
            None => Err(ParseError("unexpected end of expression".to_string())),
        }
    }
}

/// Parse a license expression string into a [`LicenseExpr`] tree.
pub fn parse(expr: &str) -> Result<LicenseExpr, ParseError> {
    let tokens = tokenize(expr);
    if tokens.is_empty() {
        return Err(ParseError("empty expression".to_string()));
    }
    let mut parser = ExprParser { tokens, pos: 0 };
    let parsed = parser.parse_or()?;
    if parser.pos != parser.tokens.len() {
        return Err(ParseError("trailing tokens after expression".to_string()));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_disallow_set() {
        assert!(!is_disallowed("GPL-3.0", &set(&[])));
        assert!(!is_disallowed("anything at all", &set(&[])));
    }

    #[test]
    fn test_exact_membership() {
        let disallowed = set(&["GPL-3.0-only", "AGPL-3.0-only"]);
        assert!(is_disallowed("GPL-3.0-only", &disallowed));
        assert!(!is_disallowed("MIT", &disallowed));
        assert!(!is_disallowed("Apache-2.0", &disallowed));
    }

    #[test]
    fn test_sentinels_never_disallowed() {
        // Even when the disallow-set literally contains the sentinel.
        let disallowed = set(&[
            "NOASSERTION",
            "NONE",
            "UNKNOWN",
            "PROPRIETARY",
            "GPL-3.0-only",
        ]);
        for sentinel in [
            "NOASSERTION",
            "noassertion",
            "None",
            "",
            "UNKNOWN",
            "Proprietary",
            "NO-LICENSE",
            "unlicensed",
            "COMMERCIAL",
            "Custom",
        ] {
            assert!(
                !is_disallowed(sentinel, &disallowed),
                "sentinel {sentinel:?} must never be disallowed"
            );
        }
    }

    #[test]
    fn test_alias_equivalence() {
        let disallowed = set(&["GPL-3.0-only"]);
        assert!(is_disallowed("GPL V3", &disallowed));
        assert!(is_disallowed("gpl v3", &disallowed));
    }

    #[test]
    fn test_or_semantics() {
        let disallowed = set(&["A", "B"]);
        assert!(is_disallowed("A OR B", &disallowed));
        assert!(!is_disallowed("A OR B", &set(&["A"])));
        assert!(!is_disallowed("MIT OR Apache-2.0 OR BSD-3-Clause", &disallowed));
        assert!(is_disallowed("A OR B", &set(&["A", "B", "C"])));
    }

    #[test]
    fn test_and_semantics() {
        assert!(is_disallowed("A AND B", &set(&["A"])));
        assert!(is_disallowed("MIT AND A AND Apache-2.0", &set(&["A"])));
        assert!(!is_disallowed("MIT AND Apache-2.0 AND BSD-3-Clause", &set(&["A"])));
    }

    #[test]
    fn test_with_semantics() {
        let disallowed = set(&["GPL-2.0-only"]);
        assert!(is_disallowed(
            "GPL-2.0-only WITH Classpath-exception-2.0",
            &disallowed
        ));
        assert!(!is_disallowed("MIT WITH Custom-exception", &disallowed));
    }

    #[test]
    fn test_nested_expressions() {
        let disallowed = set(&["GPL-3.0-only", "AGPL-3.0-only"]);
        // One acceptable OR branch clears the package.
        assert!(!is_disallowed(
            "(GPL-3.0-only OR MIT) AND Apache-2.0",
            &disallowed
        ));
        // Both OR branches are disallowed, tainting the AND.
        assert!(is_disallowed(
            "(GPL-3.0-only OR AGPL-3.0-only) AND Apache-2.0",
            &disallowed
        ));
        assert!(!is_disallowed(
            "(MIT OR Apache-2.0) AND (GPL-3.0-only OR BSD-3-Clause)",
            &disallowed
        ));
        assert!(is_disallowed(
            "(GPL-3.0-only WITH GCC-exception-3.1) AND MIT",
            &disallowed
        ));
        assert!(!is_disallowed(
            "(GPL-3.0-only WITH GCC-exception-3.1) OR MIT",
            &disallowed
        ));
    }

    #[test]
    fn test_aliases_inside_expressions() {
        let disallowed = set(&["GPL-3.0-only", "GPL-2.0-only", "MPL-2.0"]);
        assert!(!is_disallowed("GPL V3 OR MIT", &disallowed));
        assert!(is_disallowed("GPL V2 OR MPL 2.0", &disallowed));
        assert!(is_disallowed("Apache License 2.0 AND MIT", &set(&["Apache-2.0"])));
    }

    #[test]
    fn test_malformed_never_panics() {
        let disallowed = set(&["GPL-3.0-only"]);
        for expr in [
            "GPL-3.0-only AND OR MIT",
            "((GPL-3.0-only OR MIT)",
            "GPL-3.0-only MAYBE MIT",
            "AND AND AND",
            ")(",
            "MIT WITH",
        ] {
            // Result may be imprecise, but evaluation must complete.
            let _ = is_disallowed(expr, &disallowed);
        }
    }

    #[test]
    fn test_fallback_or_split_on_malformed() {
        // Trailing "(" defeats the parser; the OR split still sees that one
        // branch is not disallowed.
        let disallowed = set(&["GPL-3.0-only"]);
        assert!(!is_disallowed("GPL-3.0-only OR MIT (", &disallowed));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse("").is_err());
        assert!(parse("(MIT").is_err());
        assert!(parse("MIT OR").is_err());
        assert!(parse("MIT WITH").is_err());
        assert!(parse("OR MIT").is_err());
        assert!(parse("MIT) OR GPL-3.0").is_err());
    }

    #[test]
    fn test_parse_merges_contiguous_words() {
        assert_eq!(
            parse("GPL V3").unwrap(),
            LicenseExpr::Literal("GPL V3".to_string())
        );
        assert_eq!(
            parse("GPL V3 OR Apache License 2.0").unwrap(),
            LicenseExpr::Or(vec![
                LicenseExpr::Literal("GPL V3".to_string()),
                LicenseExpr::Literal("Apache License 2.0".to_string()),
            ])
        );
    }

    #[test]
    fn test_multiword_alias_inside_parentheses() {
        // Multi-word literals must survive grouping; a split-based check
        // would cut through the parenthesis and miss both branches.
        let disallowed = set(&["GPL-3.0-only", "GPL V3"]);
        assert!(is_disallowed(
            "(GPL-3.0-only OR GPL V3) AND MIT",
            &disallowed
        ));
        assert!(!is_disallowed(
            "(GPL-3.0-only OR Apache License 2.0) AND MIT",
            &disallowed
        ));
        assert!(is_disallowed(
            "(MIT OR BSD-3-Clause) AND (GPL V3 WITH GCC-exception-3.1)",
            &set(&["GPL-3.0-only"])
        ));
    }

    #[test]
    fn test_parse_tree_shape() {
        assert_eq!(
            parse("MIT").unwrap(),
            LicenseExpr::Literal("MIT".to_string())
        );
        // AND binds tighter than OR.
        assert_eq!(
            parse("A OR B AND C").unwrap(),
            LicenseExpr::Or(vec![
                LicenseExpr::Literal("A".to_string()),
                LicenseExpr::And(vec![
                    LicenseExpr::Literal("B".to_string()),
                    LicenseExpr::Literal("C".to_string()),
                ]),
            ])
        );
        assert_eq!(
            parse("(A OR B) AND C").unwrap(),
            LicenseExpr::And(vec![
                LicenseExpr::Or(vec![
                    LicenseExpr::Literal("A".to_string()),
                    LicenseExpr::Literal("B".to_string()),
                ]),
                LicenseExpr::Literal("C".to_string()),
            ])
        );
    }
}
