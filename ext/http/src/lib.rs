//! rpcgate-http: HTTP adapter for request translation
//!
//! Puts an HTTP face on the core matcher and builder:
//!
//! 1. **Method policy**: `GET` decodes path parameters, `POST` decodes the body
//! 2. **Gateway**: config → validated table + resolver → [`Translation`]
//! 3. **Status mapping**: every [`GatewayError`] carries its HTTP status
//!
//! # Architecture
//!
//! ```text
//! HttpRequest (method, path, body)
//!         ↓ match_uri(path)
//! UriMatch { type_name, params }
//!         ↓ DecodeSource::for_method(method)
//! build_from_params | build_from_body
//!         ↓
//! Translation { type_name, params, source, message }
//! ```

mod error;
mod gateway;
mod request;

pub use error::GatewayError;
pub use gateway::{DecodeSource, Gateway, Translation};
pub use request::{HttpRequest, HttpRequestBuilder};

/// Prelude for convenient imports.
pub mod prelude {
    pub use super::{
        DecodeSource, Gateway, GatewayError, HttpRequest, HttpRequestBuilder, Translation,
    };
    pub use rpcgate::prelude::*;
}
