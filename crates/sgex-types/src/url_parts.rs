//! Decomposed browser location.

use serde::{Deserialize, Serialize};

/// The `pathname`/`search`/`hash` triple of a browser location.
///
/// Follows browser conventions: `search` includes its leading `?` and
/// `hash` its leading `#` whenever non-empty, and both are empty strings
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlParts {
    /// Path portion, always starting with `/`.
    pub pathname: String,
    /// Raw query string (`?...` or empty).
    pub search: String,
    /// Raw fragment (`#...` or empty).
    pub hash: String,
}

impl UrlParts {
    /// Creates parts from pre-split values.
    pub fn new(
        pathname: impl Into<String>,
        search: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            pathname: pathname.into(),
            search: search.into(),
            hash: hash.into(),
        }
    }

    /// Splits a URL string into parts.
    ///
    /// Accepts both absolute URLs (`https://host/path?q#h`) and
    /// origin-relative references (`/path?q#h`). Never fails: input that
    /// carries no path at all yields pathname `/`.
    pub fn parse(input: &str) -> Self {
        // Absolute only when a scheme precedes the "://"; a relative path
        // that merely contains "://" stays relative.
        let rest = match input.find("://") {
            Some(pos) if !input[..pos].contains(['/', '?', '#']) => {
                let after_scheme = &input[pos + 3..];
                match after_scheme.find(['/', '?', '#']) {
                    Some(i) => &after_scheme[i..],
                    None => "/",
                }
            }
            _ => input,
        };

        let (before_hash, hash) = match rest.find('#') {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };
        let (pathname, search) = match before_hash.find('?') {
            Some(i) => (&before_hash[..i], &before_hash[i..]),
            None => (before_hash, ""),
        };
        let pathname = if pathname.is_empty() { "/" } else { pathname };

        Self::new(pathname, search, hash)
    }

    /// Reassembles the parts into a single origin-relative string.
    pub fn to_relative(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }

    /// Returns the non-empty path segments.
    pub fn segments(&self) -> Vec<&str> {
        self.pathname.split('/').filter(|s| !s.is_empty()).collect()
    }
}

impl std::fmt::Display for UrlParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_relative())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative() {
        let parts = UrlParts::parse("/sgex/dashboard/who/anc-dak?debug=true#section2");
        assert_eq!(parts.pathname, "/sgex/dashboard/who/anc-dak");
        assert_eq!(parts.search, "?debug=true");
        assert_eq!(parts.hash, "#section2");
    }

    #[test]
    fn test_parse_absolute() {
        let parts = UrlParts::parse("https://who.github.io/sgex/dashboard?x=1");
        assert_eq!(parts.pathname, "/sgex/dashboard");
        assert_eq!(parts.search, "?x=1");
        assert_eq!(parts.hash, "");
    }

    #[test]
    fn test_parse_bare_host() {
        let parts = UrlParts::parse("https://who.github.io");
        assert_eq!(parts.pathname, "/");
        assert_eq!(parts.search, "");
        assert_eq!(parts.hash, "");
    }

    #[test]
    fn test_parse_hash_containing_question_mark() {
        // '?' after '#' belongs to the fragment.
        let parts = UrlParts::parse("/sgex/#frag?not-a-query");
        assert_eq!(parts.pathname, "/sgex/");
        assert_eq!(parts.search, "");
        assert_eq!(parts.hash, "#frag?not-a-query");
    }

    #[test]
    fn test_relative_path_containing_scheme_separator() {
        let parts = UrlParts::parse("/sgex/docs/https:%2F%2Fexample?x=a://b");
        assert_eq!(parts.pathname, "/sgex/docs/https:%2F%2Fexample");
        assert_eq!(parts.search, "?x=a://b");
    }

    #[test]
    fn test_segments() {
        let parts = UrlParts::parse("/sgex//dashboard/");
        assert_eq!(parts.segments(), vec!["sgex", "dashboard"]);
    }

    #[test]
    fn test_roundtrip() {
        let input = "/sgex/feature-123/dashboard?a=1&b=2#x";
        assert_eq!(UrlParts::parse(input).to_relative(), input);
    }
}
