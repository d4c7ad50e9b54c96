//! Request messages — typed declaration and erased handle
//!
//! - [`QueryRequest`] is what a request type implements: its fully-qualified
//!   name, its serde JSON mapping and its field table.
//! - [`Message`] is the object-safe view the builder hands back. Every
//!   `QueryRequest` is a `Message` through a blanket impl, and a
//!   `Box<dyn Message>` can be downcast back to the concrete type.

use crate::FieldDescriptor;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::fmt::Debug;

/// A query request type that can be built from a REST request.
///
/// The serde impls are the type's canonical JSON mapping; request bodies are
/// decoded with them. `Default` is the zero-valued instance that path
/// parameters are applied to.
///
/// # Example
///
/// ```
/// use rpcgate::{FieldDescriptor, QueryRequest};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Default, Serialize, Deserialize)]
/// #[serde(default, deny_unknown_fields)]
/// struct QueryAccountRequest {
///     address: String,
/// }
///
/// impl QueryRequest for QueryAccountRequest {
///     const TYPE_NAME: &'static str = "cosmos.auth.v1beta1.QueryAccountRequest";
///
///     fn fields() -> Vec<FieldDescriptor<Self>> {
///         vec![FieldDescriptor::string("address", "address", |m: &mut Self, v| m.address = v)]
///     }
/// }
/// ```
pub trait QueryRequest:
    Default + Serialize + DeserializeOwned + Debug + Send + Sync + 'static
{
    /// Fully-qualified type name, e.g. `cosmos.bank.v1beta1.QueryBalanceRequest`.
    const TYPE_NAME: &'static str;

    /// Fields that can be populated from path parameters.
    ///
    /// Called once, when the type is registered.
    fn fields() -> Vec<FieldDescriptor<Self>>;
}

/// Type-erased request message.
pub trait Message: Any + Debug + Send + Sync + 'static {
    /// Fully-qualified type name.
    fn type_name(&self) -> &'static str;

    /// Replace the contents with `json` decoded through the canonical mapping.
    ///
    /// # Errors
    ///
    /// Returns the decode error if `json` does not conform to the type. The
    /// message is left unchanged in that case.
    fn merge_json(&mut self, json: &[u8]) -> Result<(), serde_json::Error>;

    /// Encode through the canonical JSON mapping.
    ///
    /// # Errors
    ///
    /// Returns the encode error from the type's `Serialize` impl.
    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error>;

    /// Upcast for downcasting by reference.
    fn as_any(&self) -> &dyn Any;

    /// Upcast for downcasting by mutable reference.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Upcast for downcasting by value.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
}

impl<T: QueryRequest> Message for T {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn merge_json(&mut self, json: &[u8]) -> Result<(), serde_json::Error> {
        *self = serde_json::from_slice(json)?;
        Ok(())
    }

    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
}

impl dyn Message {
    /// Returns `true` if the message is a `T`.
    #[must_use]
    pub fn is<T: Message>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow as `T`.
    #[must_use]
    pub fn downcast_ref<T: Message>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Borrow mutably as `T`.
    #[must_use]
    pub fn downcast_mut<T: Message>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// Take ownership as `T`. Check with [`is`](Self::is) first if the
    /// message must survive a mismatch.
    #[must_use]
    pub fn downcast<T: Message>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast().ok()
    }
}
