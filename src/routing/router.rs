//! Rewrite table lookup.
//!
//! # Responsibilities
//! - Store compiled rewrite rules
//! - Find the rule for an unmatched `/api` request
//! - Compute the target URI (`<target>/<rest>?<query>`)
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) path prefix scan (acceptable for typical rule counts)
//! - Longest prefix wins, so rule order in config does not matter
//! - Rules without a target are dropped at build time

use axum::body::Body;
use axum::http::{Request, Uri};

use crate::config::RewriteConfig;
use crate::routing::matcher::PathPrefixMatcher;

/// A compiled prefix rewrite.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    pub name: String,
    matcher: PathPrefixMatcher,
    target: String,
}

impl RewriteRule {
    pub fn prefix(&self) -> &str {
        self.matcher.prefix()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Target URI for `uri`, or `None` when the prefix does not match.
    pub fn rewrite(&self, uri: &Uri) -> Option<Result<Uri, axum::http::uri::InvalidUri>> {
        let rest = self.matcher.strip(uri.path())?;
        let mut target = format!("{}/{}", self.target, rest);
        if let Some(query) = uri.query() {
            target.push('?');
            target.push_str(query);
        }
        Some(target.parse())
    }
}

/// Ordered set of rewrite rules.
#[derive(Debug, Default, Clone)]
pub struct RewriteTable {
    rules: Vec<RewriteRule>,
}

impl RewriteTable {
    pub fn from_config(configs: &[RewriteConfig]) -> Self {
        let mut rules: Vec<RewriteRule> = configs
            .iter()
            .filter(|c| !c.target.is_empty())
            .map(|c| RewriteRule {
                name: c.name.clone(),
                matcher: PathPrefixMatcher::new(c.path_prefix.clone()),
                target: c.target.trim_end_matches('/').to_string(),
            })
            .collect();

        rules.sort_by(|a, b| b.prefix().len().cmp(&a.prefix().len()));
        Self { rules }
    }

    /// Find the rule matching the request path.
    pub fn match_request(&self, req: &Request<Body>) -> Option<&RewriteRule> {
        self.rules.iter().find(|rule| rule.matcher.matches(req.uri().path()))
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }
}
