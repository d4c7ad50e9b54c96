//! rpcgate — pattern-based REST-to-RPC request translation
//!
//! Given a table of URI templates, each bound to a query request type, and an
//! incoming HTTP-style request, rpcgate:
//!
//! 1. finds the template matching the request path,
//! 2. extracts the template's wildcard segments as named parameters,
//! 3. builds a typed request message from either the JSON body or the parameters.
//!
//! # Architecture
//!
//! ```text
//! "/bank/balances/{address}"        CompiledPattern::compile
//!         ↓                          (anchored regex + wildcard names)
//! TemplateTable  ──  match_uri(path) ──→ UriMatch { type_name, params }
//!                                            ↓
//! TypeResolver   ──  build_from_body / build_from_params ──→ Box<dyn Message>
//! ```
//!
//! - [`CompiledPattern`] — template → regex; `{name}` is one segment, `{name=**}` is greedy
//! - [`TemplateTable`] — ordered templates; registration order breaks ties
//! - [`match_uri`] — exact lookup first, then wildcard templates in order
//! - [`QueryRequest`] / [`FieldDescriptor`] — per-type field table, serialization name → typed setter
//! - [`TypeRegistry`] — name → [`MessageType`], immutable after build
//! - [`build_from_body`] / [`build_from_params`] — message construction
//!
//! # Key invariants
//!
//! 1. **Trailing separator**: one trailing `/` on template or path never affects matching.
//! 2. **Exact first**: a literal template equal to the path wins over any wildcard template.
//! 3. **Capture order**: `wildcard_names()[i]` names capture group `i + 1`.
//! 4. **Body or params**: a message is populated from one source, never both.
//!
//! # Example
//!
//! ```
//! use rpcgate::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! #[serde(default)]
//! struct QueryBalanceRequest {
//!     address: String,
//!     denom: String,
//! }
//!
//! impl QueryRequest for QueryBalanceRequest {
//!     const TYPE_NAME: &'static str = "cosmos.bank.v1beta1.QueryBalanceRequest";
//!
//!     fn fields() -> Vec<FieldDescriptor<Self>> {
//!         vec![
//!             FieldDescriptor::string("address", "address", |m: &mut Self, v| m.address = v),
//!             FieldDescriptor::string("denom", "denom", |m: &mut Self, v| m.denom = v),
//!         ]
//!     }
//! }
//!
//! let registry = TypeRegistry::builder().message::<QueryBalanceRequest>().build();
//! let table = TemplateTable::new()
//!     .with(
//!         "/cosmos/bank/v1beta1/balances/{address}/by_denom/{denom=**}",
//!         "cosmos.bank.v1beta1.QueryBalanceRequest",
//!     )
//!     .unwrap();
//!
//! let uri_match = match_uri("/cosmos/bank/v1beta1/balances/cosmos1xyz/by_denom/ibc/ABC", &table).unwrap();
//! let message = build_from_match(&registry, &uri_match).unwrap();
//!
//! let request = message.downcast_ref::<QueryBalanceRequest>().unwrap();
//! assert_eq!(request.address, "cosmos1xyz");
//! assert_eq!(request.denom, "ibc/ABC");
//! ```

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod builder;
mod coerce;
mod config;
mod field;
mod message;
mod pattern;
mod registry;
mod template;
mod uri_match;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

pub use builder::{build_from_body, build_from_match, build_from_params};
pub use config::{GatewayConfig, RouteConfig};
pub use field::{FieldDescriptor, FieldKind, FieldTable};
pub use message::{Message, QueryRequest};
pub use pattern::{compile, CompiledPattern};
pub use registry::{MessageType, TypeRegistry, TypeRegistryBuilder, TypeResolver, TypedMessage};
pub use template::{TemplateEntry, TemplateTable};
pub use uri_match::{match_uri, trim_trailing_separator, UriMatch};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use rpcgate::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Matching
        build_from_body,
        build_from_match,
        build_from_params,
        match_uri,
        // Errors
        BuildError,
        CompiledPattern,
        // Message types
        FieldDescriptor,
        GatewayConfig,
        Message,
        MessageType,
        QueryRequest,
        TemplateTable,
        TypeRegistry,
        TypeResolver,
        UriMatch,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Default largest request body accepted for decoding (1 MiB).
///
/// Deployments override it through [`GatewayConfig::max_body_bytes`].
pub const DEFAULT_MAX_BODY_BYTES: usize = 1 << 20;

/// Maximum length of a URI template.
///
/// Templates become regexes; the cap keeps compilation cost bounded.
pub const MAX_TEMPLATE_LENGTH: usize = 4096;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// A URI template could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// Template exceeds [`MAX_TEMPLATE_LENGTH`].
    #[error("template length is {len}, but maximum allowed is {max}")]
    TooLong {
        /// Actual length.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
    /// A `{` has no matching `}`.
    #[error("unterminated wildcard in template \"{template}\"")]
    Unterminated {
        /// The offending template.
        template: String,
    },
    /// A wildcard name is empty or contains characters outside `[A-Za-z0-9_.]`.
    #[error("invalid wildcard name \"{name}\" in template \"{template}\"")]
    InvalidName {
        /// The offending template.
        template: String,
        /// The rejected name.
        name: String,
    },
    /// A `{name=...}` wildcard other than `{name=*}` or `{name=**}`.
    #[error(
        "unsupported wildcard \"{{{wildcard}}}\" in template \"{template}\" \
         (use {{name}}, {{name=*}} or {{name=**}})"
    )]
    UnsupportedWildcard {
        /// The offending template.
        template: String,
        /// Text between the braces.
        wildcard: String,
    },
    /// The generated regex was rejected.
    #[error("invalid pattern for template \"{template}\": {reason}")]
    InvalidRegex {
        /// The offending template.
        template: String,
        /// The regex engine's message.
        reason: String,
    },
}

/// A template could not be registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The template does not compile.
    #[error(transparent)]
    Pattern(#[from] PatternError),
    /// The template (after trimming its trailing `/`) is already registered.
    #[error("template \"{template}\" is already registered for \"{existing}\"")]
    Duplicate {
        /// The trimmed template.
        template: String,
        /// Type name already bound to it.
        existing: String,
    },
}

/// A path parameter could not be applied to its field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoerceError {
    /// The value does not parse as the field's kind.
    #[error("field \"{field}\": cannot parse \"{value}\" as {kind}")]
    InvalidValue {
        /// Serialization name of the field.
        field: String,
        /// The raw parameter value.
        value: String,
        /// The field's kind.
        kind: &'static str,
    },
    /// The field is a message, repeated or map field.
    #[error("field \"{field}\" is a {kind} field and cannot be set from a path parameter")]
    UnsupportedKind {
        /// Serialization name of the field.
        field: String,
        /// The field's kind.
        kind: FieldKind,
    },
    /// The message handed to a [`MessageType`] is not an instance of it.
    #[error("expected a \"{expected}\" message, got \"{found}\"")]
    TypeMismatch {
        /// The type doing the populating.
        expected: &'static str,
        /// The message's actual type.
        found: &'static str,
    },
}

/// A request body could not be turned into a message.
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    /// Reading the body failed.
    #[error("failed to read body: {0}")]
    Io(#[from] std::io::Error),
    /// The body is larger than the configured limit.
    #[error("body exceeds the {limit} byte limit")]
    TooLarge {
        /// The configured limit in bytes.
        limit: usize,
    },
    /// The body is not valid JSON for the target type.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors from message construction.
///
/// All of them map to a client-facing 4xx/5xx response; none is retried.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The type name is not registered.
    #[error("unknown request type \"{type_name}\"{}", registered(.available))]
    UnknownType {
        /// The unresolved type name.
        type_name: String,
        /// Registered type names (for self-correcting error messages).
        available: Vec<String>,
    },
    /// The type resolved but produced no instance.
    #[error("failed to create \"{type_name}\" message instance: {reason}")]
    ConstructionFailed {
        /// The resolved type name.
        type_name: String,
        /// Why construction failed.
        reason: String,
    },
    /// The JSON body could not be decoded.
    #[error("error parsing body for \"{type_name}\": {source}")]
    BodyDecode {
        /// The target type name.
        type_name: String,
        /// The underlying failure.
        #[source]
        source: BodyError,
    },
    /// A path parameter could not be coerced.
    #[error("failed to decode params for \"{type_name}\": {source}")]
    ParameterDecode {
        /// The target type name.
        type_name: String,
        /// The underlying failure.
        #[source]
        source: CoerceError,
    },
}

/// Errors from loading a [`GatewayConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The document could not be deserialized.
    #[error("invalid config: {message}")]
    Parse {
        /// The underlying error message.
        message: String,
    },
    /// `max_body_bytes` is 0.
    #[error("max_body_bytes must be greater than 0")]
    ZeroBodyLimit,
    /// A route template is malformed or duplicated.
    #[error(transparent)]
    Table(#[from] TableError),
    /// A route names a type the resolver does not know.
    #[error("route \"{template}\" names unknown request type \"{type_name}\"{}", registered(.available))]
    UnknownRequestType {
        /// The route's template.
        template: String,
        /// The unresolved type name.
        type_name: String,
        /// Registered type names.
        available: Vec<String>,
    },
}

fn registered(available: &[String]) -> String {
    if available.is_empty() {
        " (no request types are registered)".to_owned()
    } else {
        format!(" (registered: {})", available.join(", "))
    }
}
