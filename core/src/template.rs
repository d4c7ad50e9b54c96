//! Template table — URI template → fully-qualified request type name
//!
//! Templates are stored trimmed of one trailing `/` and kept in registration
//! order. Registration order is the tie-break when several wildcard templates
//! match the same path: the first one registered wins.
//!
//! The table is built once and then only read, so it can be shared across
//! request handlers behind an `Arc` without locking.

use crate::{trim_trailing_separator, CompiledPattern, TableError};
use std::collections::HashMap;

/// One registered template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    template: String,
    type_name: String,
    has_wildcards: bool,
}

impl TemplateEntry {
    /// The template, trimmed of its trailing separator.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Fully-qualified name of the request message type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns `true` if the template contains at least one wildcard.
    #[must_use]
    pub fn has_wildcards(&self) -> bool {
        self.has_wildcards
    }
}

/// Ordered, validated set of URI templates.
///
/// # Example
///
/// ```
/// use rpcgate::TemplateTable;
///
/// let table = TemplateTable::new()
///     .with("/cosmos/bank/v1beta1/params", "cosmos.bank.v1beta1.QueryParamsRequest")
///     .unwrap()
///     .with("/cosmos/bank/v1beta1/balances/{address}", "cosmos.bank.v1beta1.QueryAllBalancesRequest")
///     .unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(
///     table.get("/cosmos/bank/v1beta1/params"),
///     Some("cosmos.bank.v1beta1.QueryParamsRequest")
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateTable {
    entries: Vec<TemplateEntry>,
    index: HashMap<String, usize>,
}

impl TemplateTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(template, type_name)` pairs, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first pair rejected by [`insert`](Self::insert).
    pub fn from_pairs<I, T, N>(pairs: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (T, N)>,
        T: AsRef<str>,
        N: Into<String>,
    {
        let mut table = Self::new();
        for (template, type_name) in pairs {
            table.insert(template.as_ref(), type_name)?;
        }
        Ok(table)
    }

    /// Add a template (builder form of [`insert`](Self::insert)).
    ///
    /// # Errors
    ///
    /// See [`insert`](Self::insert).
    pub fn with(mut self, template: &str, type_name: impl Into<String>) -> Result<Self, TableError> {
        self.insert(template, type_name)?;
        Ok(self)
    }

    /// Register a template for a request type.
    ///
    /// The template is compiled once here so that malformed templates are
    /// reported at registration instead of being skipped at match time.
    ///
    /// # Errors
    ///
    /// - [`TableError::Pattern`] — the template does not compile
    /// - [`TableError::Duplicate`] — the trimmed template is already registered
    pub fn insert(&mut self, template: &str, type_name: impl Into<String>) -> Result<(), TableError> {
        let trimmed = trim_trailing_separator(template);
        let pattern = CompiledPattern::compile(trimmed)?;

        if let Some(&existing) = self.index.get(trimmed) {
            return Err(TableError::Duplicate {
                template: trimmed.to_owned(),
                existing: self.entries[existing].type_name.clone(),
            });
        }

        self.index.insert(trimmed.to_owned(), self.entries.len());
        self.entries.push(TemplateEntry {
            template: trimmed.to_owned(),
            type_name: type_name.into(),
            has_wildcards: pattern.has_wildcards(),
        });
        Ok(())
    }

    /// Exact lookup of a (trimmed) template.
    #[must_use]
    pub fn get(&self, template: &str) -> Option<&str> {
        self.index
            .get(template)
            .map(|&i| self.entries[i].type_name.as_str())
    }

    /// Returns `true` if the trimmed template is registered.
    #[must_use]
    pub fn contains(&self, template: &str) -> bool {
        self.index.contains_key(trim_trailing_separator(template))
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TemplateEntry> {
        self.entries.iter()
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no templates are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a TemplateTable {
    type Item = &'a TemplateEntry;
    type IntoIter = std::slice::Iter<'a, TemplateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
