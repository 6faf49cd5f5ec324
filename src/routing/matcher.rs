//! Route matching logic.
//!
//! # Responsibilities
//! - Match path prefix (case-sensitive)
//! - Hand back the remainder after the prefix for rewriting
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex to guarantee O(n) matching
//! - A prefix ending in `/` also matches the bare path without it, so
//!   `/api/guest/` covers `/api/guest` with an empty remainder

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a new path prefix matcher.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns true if `path` falls under this prefix.
    pub fn matches(&self, path: &str) -> bool {
        self.strip(path).is_some()
    }

    /// The part of `path` after the prefix, if it matches.
    pub fn strip<'p>(&self, path: &'p str) -> Option<&'p str> {
        if let Some(rest) = path.strip_prefix(self.prefix.as_str()) {
            return Some(rest);
        }
        match self.prefix.strip_suffix('/') {
            Some(bare) if !bare.is_empty() && path == bare => Some(""),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_matcher() {
        let matcher = PathPrefixMatcher::new("/api/guest/");

        assert!(matcher.matches("/api/guest/appointments/3"));
        assert!(!matcher.matches("/api/guests/1"));
        assert!(!matcher.matches("/API/guest/1")); // Case sensitive
    }

    #[test]
    fn test_bare_path_matches_with_empty_rest() {
        let matcher = PathPrefixMatcher::new("/api/guest/");
        assert!(matcher.matches("/api/guest"));
        assert_eq!(matcher.strip("/api/guest"), Some(""));
        assert!(!matcher.matches("/api/guestbook"));
    }

    #[test]
    fn test_strip() {
        let matcher = PathPrefixMatcher::new("/api/users/");
        assert_eq!(matcher.strip("/api/users/u1/profile"), Some("u1/profile"));
        assert_eq!(matcher.strip("/api/users/"), Some(""));
        assert_eq!(matcher.strip("/api/user"), None);
    }
}
