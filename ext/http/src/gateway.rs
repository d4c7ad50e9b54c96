//! Gateway: HTTP request → typed query message
//!
//! The gateway owns a validated [`TemplateTable`] and a [`TypeResolver`] and
//! applies the method policy:
//!
//! | Method | Message source |
//! |--------|----------------|
//! | `GET`  | path parameters ([`build_from_params`]) |
//! | `POST` | JSON body ([`build_from_body`]) |
//! | other  | rejected with [`GatewayError::MethodNotAllowed`] |
//!
//! A message is populated from exactly one source. Path parameters captured
//! for a `POST` are reported on the [`Translation`] but not applied.

use crate::GatewayError;
use rpcgate::{
    build_from_body, build_from_params, match_uri, ConfigError, GatewayConfig, Message,
    TemplateTable, TypeResolver, DEFAULT_MAX_BODY_BYTES,
};
use std::collections::HashMap;
use std::fmt;
use std::io::Read;

/// Where a request's message is populated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeSource {
    /// Wildcard parameters captured from the path.
    Params,
    /// The JSON request body.
    Body,
}

impl DecodeSource {
    /// The source for an HTTP method, or `None` if the method is not allowed.
    ///
    /// Method names are case-sensitive.
    #[must_use]
    pub fn for_method(method: &str) -> Option<Self> {
        match method {
            "GET" => Some(Self::Params),
            "POST" => Some(Self::Body),
            _ => None,
        }
    }
}

impl fmt::Display for DecodeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Params => "params",
            Self::Body => "body",
        })
    }
}

/// A translated request.
#[derive(Debug)]
pub struct Translation {
    type_name: String,
    params: HashMap<String, String>,
    source: DecodeSource,
    message: Box<dyn Message>,
}

impl Translation {
    /// Fully-qualified name of the request type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Wildcard parameters captured from the path.
    #[must_use]
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Where the message was populated from.
    #[must_use]
    pub fn source(&self) -> DecodeSource {
        self.source
    }

    /// The built message.
    #[must_use]
    pub fn message(&self) -> &dyn Message {
        self.message.as_ref()
    }

    /// Take the built message.
    #[must_use]
    pub fn into_message(self) -> Box<dyn Message> {
        self.message
    }
}

/// Translates HTTP requests into typed query messages.
///
/// Immutable once built; share it across handlers behind an `Arc`.
///
/// # Example
///
/// ```ignore
/// let registry = rpcgate_test::registry();
/// let config = GatewayConfig::default()
///     .with_route("/cosmos/bank/v1beta1/balances/{address}", "cosmos.bank.v1beta1.QueryAllBalancesRequest");
/// let gateway = Gateway::from_config(&config, registry)?;
///
/// let translation = gateway.translate(&HttpRequest::get("/cosmos/bank/v1beta1/balances/cosmos1xyz"))?;
/// assert_eq!(translation.type_name(), "cosmos.bank.v1beta1.QueryAllBalancesRequest");
/// ```
pub struct Gateway<R> {
    table: TemplateTable,
    resolver: R,
    max_body_bytes: usize,
}

impl<R: TypeResolver> Gateway<R> {
    /// Create a gateway over an already-built table with the default body limit.
    pub fn new(table: TemplateTable, resolver: R) -> Self {
        Self {
            table,
            resolver,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Build a gateway from configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroBodyLimit`] / [`ConfigError::Table`] — invalid config
    /// - [`ConfigError::UnknownRequestType`] — a route names a type `resolver` does not know
    pub fn from_config(config: &GatewayConfig, resolver: R) -> Result<Self, ConfigError> {
        let table = config.template_table()?;
        config.validate_types(&resolver)?;

        tracing::debug!(
            routes = table.len(),
            max_body_bytes = config.max_body_bytes,
            "gateway configured"
        );
        Ok(Self {
            table,
            resolver,
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Set the body limit (builder pattern).
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroBodyLimit`] if `max_body_bytes` is 0.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Result<Self, ConfigError> {
        if max_body_bytes == 0 {
            return Err(ConfigError::ZeroBodyLimit);
        }
        self.max_body_bytes = max_body_bytes;
        Ok(self)
    }

    /// The template table.
    #[must_use]
    pub fn table(&self) -> &TemplateTable {
        &self.table
    }

    /// The type resolver.
    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Largest body accepted, in bytes.
    #[must_use]
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }

    /// Translate a [`HttpRequest`](crate::HttpRequest).
    ///
    /// # Errors
    ///
    /// See [`translate_parts`](Self::translate_parts).
    pub fn translate(&self, request: &crate::HttpRequest) -> Result<Translation, GatewayError> {
        self.translate_parts(request.method(), request.path(), request.body())
    }

    /// Translate a request given as method, path and body reader.
    ///
    /// The path is matched first, so an unknown path is `NotFound` whatever
    /// the method. The body is only read for `POST`; it is dropped before
    /// this returns either way.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::NotFound`] — no template matches `path`
    /// - [`GatewayError::MethodNotAllowed`] — `method` is neither `GET` nor `POST`
    /// - [`GatewayError::Build`] — the message could not be built
    pub fn translate_parts<B: Read>(
        &self,
        method: &str,
        path: &str,
        body: B,
    ) -> Result<Translation, GatewayError> {
        let uri_match = match_uri(path, &self.table).ok_or_else(|| GatewayError::NotFound {
            path: path.to_owned(),
        })?;

        let source = DecodeSource::for_method(method).ok_or_else(|| {
            GatewayError::MethodNotAllowed {
                method: method.to_owned(),
            }
        })?;

        let message = match source {
            DecodeSource::Params => {
                build_from_params(&self.resolver, uri_match.type_name(), uri_match.params())?
            }
            DecodeSource::Body => build_from_body(
                &self.resolver,
                uri_match.type_name(),
                body,
                self.max_body_bytes,
            )?,
        };

        let (type_name, params) = uri_match.into_parts();
        tracing::debug!(method, path, type_name = type_name.as_str(), %source, "translated request");
        Ok(Translation {
            type_name,
            params,
            source,
            message,
        })
    }
}

impl<R: TypeResolver> fmt::Debug for Gateway<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gateway")
            .field("routes", &self.table.len())
            .field("types", &self.resolver.type_names())
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}
