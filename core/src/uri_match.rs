//! URI matcher — request path → request type name + wildcard parameters
//!
//! # Algorithm
//!
//! 1. Trim one trailing `/` from the path.
//! 2. Exact lookup of the trimmed path among the registered templates. A hit
//!    returns immediately with no parameters, even if wildcard templates would
//!    also match.
//! 3. Otherwise walk the wildcard templates in registration order, compile
//!    each one and test it against the trimmed path. The first match wins.
//!
//! Patterns are compiled per attempt and dropped afterwards; nothing is cached
//! between calls, so matching is a pure function of `(path, table)`.

use crate::{CompiledPattern, TemplateTable};
use std::collections::HashMap;

/// Result of matching a request path against a [`TemplateTable`].
///
/// Example: template `foo/bar/{baz}` and path `foo/bar/qux` give
/// `type_name` of the template's request type and params `{baz: qux}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriMatch {
    type_name: String,
    params: HashMap<String, String>,
}

impl UriMatch {
    /// Create a match result.
    pub fn new(type_name: impl Into<String>, params: HashMap<String, String>) -> Self {
        Self {
            type_name: type_name.into(),
            params,
        }
    }

    /// Fully-qualified name of the request message type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Wildcard parameters extracted from the path.
    #[must_use]
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// A single parameter by wildcard name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Reports whether any wildcard parameters were extracted.
    #[must_use]
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// Split into `(type_name, params)`.
    #[must_use]
    pub fn into_parts(self) -> (String, HashMap<String, String>) {
        (self.type_name, self.params)
    }
}

/// Strip a single trailing `/`.
///
/// ```
/// use rpcgate::trim_trailing_separator;
///
/// assert_eq!(trim_trailing_separator("/a/b/"), "/a/b");
/// assert_eq!(trim_trailing_separator("/a/b"), "/a/b");
/// assert_eq!(trim_trailing_separator("/a/b//"), "/a/b/");
/// ```
#[must_use]
pub fn trim_trailing_separator(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Find the template matching `path`.
///
/// Returns `None` when nothing matches; the HTTP layer turns that into a
/// not-found response.
///
/// # Example
///
/// ```
/// use rpcgate::{match_uri, TemplateTable};
///
/// let table = TemplateTable::from_pairs([
///     ("a/b", "T1"),
///     ("a/{x}", "T2"),
/// ]).unwrap();
///
/// assert_eq!(match_uri("a/b", &table).unwrap().type_name(), "T1");
/// let m = match_uri("a/c/", &table).unwrap();
/// assert_eq!(m.type_name(), "T2");
/// assert_eq!(m.param("x"), Some("c"));
/// assert!(match_uri("a/c/d", &table).is_none());
/// ```
#[must_use]
pub fn match_uri(path: &str, table: &TemplateTable) -> Option<UriMatch> {
    let path = trim_trailing_separator(path);

    if let Some(type_name) = table.get(path) {
        tracing::trace!(path, type_name, "exact template match");
        return Some(UriMatch::new(type_name, HashMap::new()));
    }

    for entry in table.iter().filter(|e| e.has_wildcards()) {
        let pattern = match CompiledPattern::compile(entry.template()) {
            Ok(pattern) => pattern,
            Err(error) => {
                tracing::warn!(template = entry.template(), %error, "skipping template");
                continue;
            }
        };

        if let Some(params) = pattern.captures(path) {
            tracing::trace!(
                path,
                template = entry.template(),
                type_name = entry.type_name(),
                "wildcard template match"
            );
            return Some(UriMatch::new(entry.type_name(), params));
        }
    }

    tracing::debug!(path, templates = table.len(), "no template matched");
    None
}
