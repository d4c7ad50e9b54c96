//! Pattern compiler — URI template → anchored regex + ordered wildcard names
//!
//! A template mixes literal text with two wildcard forms:
//!
//! - `{name}` (or `{name=*}`) — exactly one path segment, never crosses `/`
//! - `{name=**}` — one or more characters, greedy, crosses `/`
//!
//! Literal text is escaped before it reaches the regex engine, so `.`, `+`, `(`
//! and friends in a template only ever match themselves.
//!
//! # INV: capture order
//!
//! `wildcard_names()[i]` names capture group `i + 1`. Names are collected in a
//! single left-to-right scan, so mixed templates such as `{a}/{b=**}` keep the
//! same order as their groups.

use crate::{PatternError, MAX_TEMPLATE_LENGTH};
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Capture group for a single path segment.
const SINGLE_SEGMENT: &str = "([^/]+)";

/// Capture group for one or more segments, separators included.
const MULTI_SEGMENT: &str = "(.+)";

/// A compiled URI template.
///
/// # Example
///
/// ```
/// use rpcgate::CompiledPattern;
///
/// let pattern = CompiledPattern::compile("/bank/balances/{address}/by_denom").unwrap();
/// assert_eq!(pattern.wildcard_names(), ["address"]);
///
/// let params = pattern.captures("/bank/balances/cosmos1xyz/by_denom").unwrap();
/// assert_eq!(params["address"], "cosmos1xyz");
/// assert!(pattern.captures("/bank/balances/a/b/by_denom").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    wildcard_names: Vec<String>,
}

impl CompiledPattern {
    /// Compile a template into an anchored pattern.
    ///
    /// # Errors
    ///
    /// - [`PatternError::TooLong`] — template exceeds [`MAX_TEMPLATE_LENGTH`]
    /// - [`PatternError::Unterminated`] — a `{` without its closing `}`
    /// - [`PatternError::InvalidName`] — empty name or characters outside `[A-Za-z0-9_.]`
    /// - [`PatternError::UnsupportedWildcard`] — `{name=...}` other than `*` / `**`
    /// - [`PatternError::InvalidRegex`] — the generated pattern was rejected by the regex engine
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        if template.len() > MAX_TEMPLATE_LENGTH {
            return Err(PatternError::TooLong {
                len: template.len(),
                max: MAX_TEMPLATE_LENGTH,
            });
        }

        let mut source = String::with_capacity(template.len() * 2 + 2);
        let mut wildcard_names = Vec::new();
        source.push('^');

        let mut rest = template;
        while let Some(open) = rest.find('{') {
            source.push_str(&regex::escape(&rest[..open]));

            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| PatternError::Unterminated {
                template: template.to_owned(),
            })?;

            let (name, group) = parse_wildcard(template, &after[..close])?;
            wildcard_names.push(name.to_owned());
            source.push_str(group);

            rest = &after[close + 1..];
        }
        source.push_str(&regex::escape(rest));
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| PatternError::InvalidRegex {
            template: template.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            regex,
            wildcard_names,
        })
    }

    /// The generated regex source, anchors included.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// The compiled regex.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Wildcard names in capture-group order.
    #[must_use]
    pub fn wildcard_names(&self) -> &[String] {
        &self.wildcard_names
    }

    /// Returns `true` if the template contained at least one wildcard.
    #[must_use]
    pub fn has_wildcards(&self) -> bool {
        !self.wildcard_names.is_empty()
    }

    /// Returns `true` if `path` matches the whole pattern.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and pair each wildcard name with its captured value.
    ///
    /// Returns `None` when the path does not match. A wildcard-free pattern
    /// that matches yields an empty map. When a name repeats, the rightmost
    /// capture wins.
    #[must_use]
    pub fn captures(&self, path: &str) -> Option<HashMap<String, String>> {
        let caps = self.regex.captures(path)?;
        let params = self
            .wildcard_names
            .iter()
            .zip(caps.iter().skip(1))
            .filter_map(|(name, group)| group.map(|m| (name.clone(), m.as_str().to_owned())))
            .collect();
        Some(params)
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.regex.as_str())
    }
}

/// Compile a template. Shorthand for [`CompiledPattern::compile`].
///
/// # Errors
///
/// See [`CompiledPattern::compile`].
pub fn compile(template: &str) -> Result<CompiledPattern, PatternError> {
    CompiledPattern::compile(template)
}

/// Split the text between `{` and `}` into a name and its capture group.
fn parse_wildcard<'t>(
    template: &str,
    wildcard: &'t str,
) -> Result<(&'t str, &'static str), PatternError> {
    let (name, group) = match wildcard.split_once('=') {
        None => (wildcard, SINGLE_SEGMENT),
        Some((name, "*")) => (name, SINGLE_SEGMENT),
        Some((name, "**")) => (name, MULTI_SEGMENT),
        Some(_) => {
            return Err(PatternError::UnsupportedWildcard {
                template: template.to_owned(),
                wildcard: wildcard.to_owned(),
            })
        }
    };

    if !is_valid_name(name) {
        return Err(PatternError::InvalidName {
            template: template.to_owned(),
            name: name.to_owned(),
        });
    }

    Ok((name, group))
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.')
}
