//! Path pattern matching.

use regex::Regex;
use std::collections::HashMap;

use crate::request::PathParams;

/// A segment in a path pattern.
#[derive(Debug, Clone)]
pub enum PathSegment {
    /// A literal string segment.
    Literal(String),
    /// A named parameter segment (e.g., `:id`).
    Param(String),
    /// A wildcard segment (matches the remainder of the path).
    Wildcard(String),
}

impl PathSegment {
    /// Returns the capture name for parameter segments.
    fn capture_name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Param(name) | Self::Wildcard(name) => Some(name),
        }
    }
}

/// A compiled path pattern for matching request paths.
///
/// Compiled once per declared route; matching a concrete path either fails
/// (`None`) or yields the extracted parameters, so a parameterless match is
/// still distinguishable from a non-match.
#[derive(Debug, Clone)]
pub struct PathPattern {
    /// The original pattern string.
    pattern: String,
    /// Parsed segments.
    segments: Vec<PathSegment>,
    /// Compiled regex, one capture group per parameter segment.
    regex: Regex,
}

impl PathPattern {
    /// Parses a path pattern string.
    ///
    /// Pattern syntax:
    /// - `/users` - Literal path
    /// - `/users/:id` - Path with a named parameter
    /// - `/files/*path` - Wildcard parameter (matches rest of path)
    ///
    /// # Example
    ///
    /// ```
    /// use waymark_router::PathPattern;
    ///
    /// let pattern = PathPattern::parse("/posts/:id/comments/:comment_id");
    /// let params = pattern.match_path("/posts/123/comments/456").unwrap();
    /// assert_eq!(params.get("id"), Some("123"));
    /// assert_eq!(params.get("comment_id"), Some("456"));
    /// ```
    pub fn parse(pattern: &str) -> Self {
        let segments: Vec<PathSegment> = pattern
            .split('/')
            .filter(|part| !part.is_empty())
            .map(|part| {
                if let Some(name) = part.strip_prefix(':') {
                    PathSegment::Param(name.to_string())
                } else if let Some(name) = part.strip_prefix('*') {
                    PathSegment::Wildcard(name.to_string())
                } else {
                    PathSegment::Literal(part.to_string())
                }
            })
            .collect();

        let mut regex_str = String::from("^");
        for segment in &segments {
            regex_str.push('/');
            match segment {
                PathSegment::Literal(part) => regex_str.push_str(&regex::escape(part)),
                PathSegment::Param(_) => regex_str.push_str("([^/]+)"),
                PathSegment::Wildcard(_) => regex_str.push_str("(.+)"),
            }
        }
        // A trailing slash on the concrete path is tolerated.
        regex_str.push_str("/?$");

        let regex = Regex::new(&regex_str).expect("Invalid path pattern regex");

        Self {
            pattern: pattern.to_string(),
            segments,
            regex,
        }
    }

    /// Attempts to match a concrete path against this pattern.
    ///
    /// Returns the extracted parameters if the path matches.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;

        let mut params = PathParams::new();
        let names = self.segments.iter().filter_map(PathSegment::capture_name);

        for (i, name) in names.enumerate() {
            if let Some(value) = caps.get(i + 1) {
                params.insert(name, value.as_str());
            }
        }

        Some(params)
    }

    /// Returns the original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the parameter names in pattern order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(PathSegment::capture_name)
    }

    /// Generates a concrete path from parameters.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use waymark_router::PathPattern;
    ///
    /// let pattern = PathPattern::parse("/posts/:id");
    /// let params: HashMap<String, String> =
    ///     [("id".to_string(), "123".to_string())]
    ///     .into_iter()
    ///     .collect();
    /// let path = pattern.reverse(&params).unwrap();
    /// assert_eq!(path, "/posts/123");
    /// ```
    pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
        if self.segments.is_empty() {
            return Some("/".to_string());
        }

        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                PathSegment::Literal(part) => path.push_str(part),
                PathSegment::Param(name) | PathSegment::Wildcard(name) => {
                    path.push_str(params.get(name)?);
                }
            }
        }

        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_path() {
        let pattern = PathPattern::parse("/users");
        assert!(pattern.match_path("/users").is_some());
        assert!(pattern.match_path("/users/").is_some());
        assert!(pattern.match_path("/posts").is_none());
    }

    #[test]
    fn test_match_without_params_is_empty() {
        let pattern = PathPattern::parse("/health");
        let params = pattern.match_path("/health").unwrap();
        assert!(params.iter().next().is_none());
    }

    #[test]
    fn test_single_param() {
        let pattern = PathPattern::parse("/users/:id");
        let params = pattern.match_path("/users/123").unwrap();
        assert_eq!(params.get("id"), Some("123"));
    }

    #[test]
    fn test_multiple_params() {
        let pattern = PathPattern::parse("/posts/:post_id/comments/:comment_id");
        let params = pattern.match_path("/posts/42/comments/7").unwrap();
        assert_eq!(params.get("post_id"), Some("42"));
        assert_eq!(params.get("comment_id"), Some("7"));
    }

    #[test]
    fn test_param_does_not_span_segments() {
        let pattern = PathPattern::parse("/users/:id");
        assert!(pattern.match_path("/users/1/posts").is_none());
    }

    #[test]
    fn test_param_names_in_pattern_order() {
        let pattern = PathPattern::parse("/posts/:post_id/comments/:comment_id");
        let names: Vec<&str> = pattern.param_names().collect();
        assert_eq!(names, vec!["post_id", "comment_id"]);
    }

    #[test]
    fn test_wildcard_param() {
        let pattern = PathPattern::parse("/files/*path");
        let params = pattern.match_path("/files/docs/readme.md").unwrap();
        assert_eq!(params.get("path"), Some("docs/readme.md"));
    }

    #[test]
    fn test_root_path() {
        let pattern = PathPattern::parse("/");
        assert!(pattern.match_path("/").is_some());
        assert!(pattern.match_path("/anything").is_none());
    }

    #[test]
    fn test_reverse() {
        let pattern = PathPattern::parse("/posts/:id");
        let params: HashMap<String, String> = [("id".to_string(), "123".to_string())]
            .into_iter()
            .collect();
        assert_eq!(pattern.reverse(&params), Some("/posts/123".to_string()));
    }

    #[test]
    fn test_reverse_root() {
        let pattern = PathPattern::parse("/");
        assert_eq!(pattern.reverse(&HashMap::new()), Some("/".to_string()));
    }

    #[test]
    fn test_reverse_missing_param() {
        let pattern = PathPattern::parse("/posts/:id");
        let params: HashMap<String, String> = HashMap::new();
        assert!(pattern.reverse(&params).is_none());
    }
}
