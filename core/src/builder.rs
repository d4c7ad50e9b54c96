//! Message builder — request type name + body or path parameters → message
//!
//! Exactly one of the two entry points runs per request; which one is the HTTP
//! layer's decision.
//!
//! - [`build_from_body`] decodes a size-bounded JSON body into a fresh instance.
//! - [`build_from_params`] applies path parameters to a fresh instance.
//!
//! Bodies larger than the limit are rejected with [`BodyError::TooLarge`]
//! rather than truncated and decoded.

use crate::{BodyError, BuildError, Message, MessageType, TypeResolver, UriMatch};
use std::collections::HashMap;
use std::io::Read;

/// Decode a JSON request body into a new instance of `type_name`.
///
/// At most `max_bytes` are accepted. The body reader is consumed by this call
/// and dropped before it returns, on success and on every error path.
///
/// # Errors
///
/// - [`BuildError::UnknownType`] — `type_name` is not registered
/// - [`BuildError::ConstructionFailed`] — the type could not produce an instance
/// - [`BuildError::BodyDecode`] — read failure, body over `max_bytes`, or invalid JSON
pub fn build_from_body<R, B>(
    resolver: &R,
    type_name: &str,
    body: B,
    max_bytes: usize,
) -> Result<Box<dyn Message>, BuildError>
where
    R: TypeResolver + ?Sized,
    B: Read,
{
    let message_type = resolve(resolver, type_name)?;
    let mut message = construct(message_type)?;

    let bytes = read_limited(body, max_bytes).map_err(|source| BuildError::BodyDecode {
        type_name: type_name.to_owned(),
        source,
    })?;

    message
        .merge_json(&bytes)
        .map_err(|e| BuildError::BodyDecode {
            type_name: type_name.to_owned(),
            source: BodyError::Json(e),
        })?;

    tracing::trace!(type_name, len = bytes.len(), "built message from body");
    Ok(message)
}

/// Build a new instance of `type_name` from path parameters.
///
/// Empty `params` yield the zero-valued instance. Parameters are matched to
/// fields by serialization name; names with no field are ignored.
///
/// # Errors
///
/// - [`BuildError::UnknownType`] — `type_name` is not registered
/// - [`BuildError::ConstructionFailed`] — the type could not produce an instance
/// - [`BuildError::ParameterDecode`] — a value could not be coerced to its field
pub fn build_from_params<R>(
    resolver: &R,
    type_name: &str,
    params: &HashMap<String, String>,
) -> Result<Box<dyn Message>, BuildError>
where
    R: TypeResolver + ?Sized,
{
    let message_type = resolve(resolver, type_name)?;
    let mut message = construct(message_type)?;

    if params.is_empty() {
        return Ok(message);
    }

    message_type
        .populate(message.as_mut(), params)
        .map_err(|source| BuildError::ParameterDecode {
            type_name: type_name.to_owned(),
            source,
        })?;

    tracing::trace!(type_name, params = params.len(), "built message from params");
    Ok(message)
}

/// [`build_from_params`] for a [`UriMatch`].
///
/// # Errors
///
/// See [`build_from_params`].
pub fn build_from_match<R>(resolver: &R, uri_match: &UriMatch) -> Result<Box<dyn Message>, BuildError>
where
    R: TypeResolver + ?Sized,
{
    build_from_params(resolver, uri_match.type_name(), uri_match.params())
}

fn resolve<'r, R>(resolver: &'r R, type_name: &str) -> Result<&'r dyn MessageType, BuildError>
where
    R: TypeResolver + ?Sized,
{
    resolver
        .resolve(type_name)
        .ok_or_else(|| BuildError::UnknownType {
            type_name: type_name.to_owned(),
            available: resolver.type_names().into_iter().map(str::to_owned).collect(),
        })
}

fn construct(message_type: &dyn MessageType) -> Result<Box<dyn Message>, BuildError> {
    message_type
        .construct()
        .map_err(|reason| BuildError::ConstructionFailed {
            type_name: message_type.full_name().to_owned(),
            reason,
        })
}

/// Read the whole body, failing once it exceeds `max_bytes`.
///
/// Reads at most `max_bytes + 1` bytes: one past the limit is enough to know
/// the body is too large.
fn read_limited<B: Read>(body: B, max_bytes: usize) -> Result<Vec<u8>, BodyError> {
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX).saturating_add(1);
    let mut bytes = Vec::new();
    body.take(limit).read_to_end(&mut bytes)?;

    if bytes.len() > max_bytes {
        return Err(BodyError::TooLarge { limit: max_bytes });
    }
    Ok(bytes)
}
