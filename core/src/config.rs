//! Gateway configuration — body limit and route table
//!
//! ```yaml
//! max_body_bytes: 1048576
//! routes:
//!   - template: /cosmos/bank/v1beta1/balances/{address}
//!     request_type: cosmos.bank.v1beta1.QueryAllBalancesRequest
//!   - template: /cosmos/bank/v1beta1/denoms_metadata/{denom=**}
//!     request_type: cosmos.bank.v1beta1.QueryDenomMetadataRequest
//! ```
//!
//! Route order is significant: it is the tie-break between wildcard templates
//! that match the same path.

use crate::{ConfigError, TemplateTable, TypeResolver, DEFAULT_MAX_BODY_BYTES};
use serde::{Deserialize, Serialize};

/// Deployment configuration for request translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Largest request body accepted for decoding, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Routes in registration order.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// A single template → request type route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// URI template, e.g. `/cosmos/bank/v1beta1/balances/{address}`.
    pub template: String,
    /// Fully-qualified request message type name.
    pub request_type: String,
}

impl RouteConfig {
    /// Create a route.
    pub fn new(template: impl Into<String>, request_type: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            request_type: request_type.into(),
        }
    }
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            routes: Vec::new(),
        }
    }
}

impl GatewayConfig {
    /// Parse from JSON.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the document does not deserialize.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Append a route (builder pattern).
    #[must_use]
    pub fn with_route(mut self, template: impl Into<String>, request_type: impl Into<String>) -> Self {
        self.routes.push(RouteConfig::new(template, request_type));
        self
    }

    /// Set the body limit (builder pattern).
    #[must_use]
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Build the template table, validating the limit and every template.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroBodyLimit`] — `max_body_bytes` is 0
    /// - [`ConfigError::Table`] — a template is malformed or duplicated
    pub fn template_table(&self) -> Result<TemplateTable, ConfigError> {
        if self.max_body_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }

        let table = TemplateTable::from_pairs(
            self.routes
                .iter()
                .map(|r| (r.template.as_str(), r.request_type.as_str())),
        )?;
        Ok(table)
    }

    /// Check that every route's request type resolves.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownRequestType`] for the first route that does not resolve.
    pub fn validate_types<R: TypeResolver + ?Sized>(&self, resolver: &R) -> Result<(), ConfigError> {
        for route in &self.routes {
            if resolver.resolve(&route.request_type).is_none() {
                return Err(ConfigError::UnknownRequestType {
                    template: route.template.clone(),
                    type_name: route.request_type.clone(),
                    available: resolver.type_names().into_iter().map(str::to_owned).collect(),
                });
            }
        }
        Ok(())
    }
}
