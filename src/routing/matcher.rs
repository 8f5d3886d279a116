//! Route matching logic.
//!
//! # Responsibilities
//! - Match request method (case-insensitive)
//! - Match path against a regex pattern (unanchored)
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Method matching is case-insensitive
//! - Path patterns are substring searches: `/json` matches `/api/v2/json`.
//!   Callers that need anchoring write `^`/`$` themselves.
//! - Patterns are compiled once at registration

use axum::body::Body;
use axum::http::Request;
use regex::Regex;

use crate::routing::RoutingError;

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, req: &Request<Body>) -> bool;
}

/// Matches the request method.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    method: String,
}

impl MethodMatcher {
    /// Create a new method matcher.
    /// The method is normalized to uppercase.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into().to_ascii_uppercase(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        req.method().as_str().eq_ignore_ascii_case(&self.method)
    }
}

/// Matches the request path against a regular expression.
#[derive(Debug, Clone)]
pub struct PathPatternMatcher {
    pattern: Regex,
}

impl PathPatternMatcher {
    /// Compile a new path pattern matcher.
    pub fn new(pattern: &str) -> Result<Self, RoutingError> {
        let pattern = Regex::new(pattern).map_err(|source| RoutingError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Matcher for PathPatternMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.pattern.is_match(req.uri().path())
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, req: &Request<Body>) -> bool {
        self.matchers.iter().all(|m| m.matches(req))
    }
}
