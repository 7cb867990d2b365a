//! Channel enablement filter.
//!
//! A filter expression is a comma-separated list of patterns, read from the
//! `DEBUG` environment variable by default:
//!
//! ```text
//! DEBUG=*                  every channel
//! DEBUG=api,db:*           "api" and everything under "db:"
//! DEBUG=*,-verbose*        everything except channels starting "verbose"
//! ```
//!
//! Tokens are evaluated left to right and the last matching token decides,
//! so `api*,-api:db` enables `api:http` but not `api:db`. Malformed tokens
//! never fail; they simply match nothing.

/// Wildcard marker used both in patterns and in channel names.
pub const WILDCARD: char = '*';

/// Prefix marking a token as a disabling pattern.
pub const NEGATION: char = '-';

/// One pattern of a filter expression, with its negation marker stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// The bare wildcard, matches every name
    Any,
    /// Matches exactly one name
    Exact(String),
    /// A name ending in the wildcard, matches by prefix
    Prefix(String),
    /// Empty pattern, matches nothing
    Never,
}

impl Pattern {
    /// Parse a single pattern (without negation marker).
    pub fn parse(pattern: &str) -> Self {
        if pattern.is_empty() {
            return Pattern::Never;
        }
        if pattern.len() == 1 && pattern.starts_with(WILDCARD) {
            return Pattern::Any;
        }
        match pattern.strip_suffix(WILDCARD) {
            Some(prefix) => Pattern::Prefix(prefix.to_string()),
            None => Pattern::Exact(pattern.to_string()),
        }
    }

    /// Whether this pattern matches the given channel name.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Exact(exact) => exact == name,
            Pattern::Prefix(prefix) => name.starts_with(prefix.as_str()),
            Pattern::Never => false,
        }
    }
}

/// A single token of a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRule {
    pub pattern: Pattern,
    pub negated: bool,
}

impl FilterRule {
    fn parse(token: &str) -> Self {
        match token.strip_prefix(NEGATION) {
            Some(rest) => Self {
                pattern: Pattern::parse(rest),
                negated: true,
            },
            None => Self {
                pattern: Pattern::parse(token),
                negated: false,
            },
        }
    }
}

/// A parsed filter expression.
///
/// Parsing never fails. An empty expression enables nothing except
/// wildcard-suffixed channel names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpr {
    rules: Vec<FilterRule>,
}

impl FilterExpr {
    /// Parse a comma-separated filter expression.
    pub fn parse(expr: &str) -> Self {
        if expr.is_empty() {
            return Self::default();
        }
        Self {
            rules: expr.split(',').map(FilterRule::parse).collect(),
        }
    }

    /// The parsed rules in evaluation order.
    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    /// Decide whether a channel with this name starts out enabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        if name.ends_with(WILDCARD) {
            return true;
        }

        let mut enabled = false;
        for rule in &self.rules {
            if rule.pattern.matches(name) {
                enabled = !rule.negated;
            }
        }
        enabled
    }
}

/// Evaluate an optional raw filter expression against a channel name.
pub fn is_enabled(filter: Option<&str>, name: &str) -> bool {
    match filter {
        Some(expr) => FilterExpr::parse(expr).is_enabled(name),
        None => name.ends_with(WILDCARD),
    }
}
