//! Type registry — fully-qualified name → constructible request type
//!
//! The builder resolves a [`TypeResolver`] to a [`MessageType`] and asks it for
//! an empty instance. Both are traits so that hosts with their own type system
//! can plug in; [`TypeRegistry`] is the in-crate implementation for types that
//! implement [`QueryRequest`].
//!
//! # Architecture (axum `BoxedIntoRoute` pattern)
//!
//! `TypeRegistryBuilder::message::<T>()` monomorphizes `T` into a
//! [`TypedMessage<T>`] holding the field table built from `T::fields()`, then
//! erases it behind `Box<dyn MessageType>`. The field table is therefore built
//! once per type, at registration, and never rediscovered per request.
//!
//! # Example
//!
//! ```ignore
//! let registry = TypeRegistryBuilder::new()
//!     .message::<QueryBalanceRequest>()
//!     .message::<QueryParamsRequest>()
//!     .build();
//!
//! let message = build_from_params(&registry, "cosmos.bank.v1beta1.QueryBalanceRequest", &params)?;
//! ```

use crate::{CoerceError, FieldTable, Message, QueryRequest};
use std::collections::HashMap;
use std::marker::PhantomData;

// ═══════════════════════════════════════════════════════════════════════════════
// Traits
// ═══════════════════════════════════════════════════════════════════════════════

/// A resolved request type.
pub trait MessageType: Send + Sync {
    /// Fully-qualified type name.
    fn full_name(&self) -> &str;

    /// Construct a zero-valued instance.
    ///
    /// # Errors
    ///
    /// A human-readable reason when no instance can be produced.
    fn construct(&self) -> Result<Box<dyn Message>, String>;

    /// Serialization names of the fields path parameters can target.
    fn field_names(&self) -> Vec<&'static str>;

    /// Populate `message` from path parameters by serialization name.
    ///
    /// Parameters naming no field are ignored.
    ///
    /// # Errors
    ///
    /// - [`CoerceError::TypeMismatch`] — `message` is not an instance of this type
    /// - [`CoerceError::InvalidValue`] / [`CoerceError::UnsupportedKind`] — a value could not be applied
    fn populate(
        &self,
        message: &mut dyn Message,
        params: &HashMap<String, String>,
    ) -> Result<(), CoerceError>;
}

/// Resolves fully-qualified type names.
pub trait TypeResolver: Send + Sync {
    /// Look up a type by its fully-qualified name.
    fn resolve(&self, type_name: &str) -> Option<&dyn MessageType>;

    /// Registered type names, sorted. Used in error messages.
    fn type_names(&self) -> Vec<&str> {
        Vec::new()
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for &R {
    fn resolve(&self, type_name: &str) -> Option<&dyn MessageType> {
        (**self).resolve(type_name)
    }

    fn type_names(&self) -> Vec<&str> {
        (**self).type_names()
    }
}

impl<R: TypeResolver + ?Sized> TypeResolver for std::sync::Arc<R> {
    fn resolve(&self, type_name: &str) -> Option<&dyn MessageType> {
        (**self).resolve(type_name)
    }

    fn type_names(&self) -> Vec<&str> {
        (**self).type_names()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TypedMessage
// ═══════════════════════════════════════════════════════════════════════════════

/// [`MessageType`] for a concrete [`QueryRequest`] type.
pub struct TypedMessage<T: QueryRequest> {
    fields: FieldTable<T>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: QueryRequest> TypedMessage<T> {
    /// Build the field table for `T`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: FieldTable::new(T::fields()),
            _phantom: PhantomData,
        }
    }

    /// The field table.
    #[must_use]
    pub fn fields(&self) -> &FieldTable<T> {
        &self.fields
    }
}

impl<T: QueryRequest> Default for TypedMessage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: QueryRequest> std::fmt::Debug for TypedMessage<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedMessage")
            .field("type_name", &T::TYPE_NAME)
            .field("fields", &self.fields)
            .finish()
    }
}

impl<T: QueryRequest> MessageType for TypedMessage<T> {
    fn full_name(&self) -> &str {
        T::TYPE_NAME
    }

    fn construct(&self) -> Result<Box<dyn Message>, String> {
        Ok(Box::new(T::default()))
    }

    fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.serialized_name()).collect()
    }

    fn populate(
        &self,
        message: &mut dyn Message,
        params: &HashMap<String, String>,
    ) -> Result<(), CoerceError> {
        let found = message.type_name();
        let typed = message
            .downcast_mut::<T>()
            .ok_or_else(|| CoerceError::TypeMismatch {
                expected: T::TYPE_NAME,
                found,
            })?;
        self.fields.apply(typed, params)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builder
// ═══════════════════════════════════════════════════════════════════════════════

/// Builder for a [`TypeRegistry`].
///
/// Registering the same name twice keeps the last registration.
#[derive(Default)]
pub struct TypeRegistryBuilder {
    types: HashMap<String, Box<dyn MessageType>>,
}

impl TypeRegistryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a [`QueryRequest`] type under its `TYPE_NAME`.
    #[must_use]
    pub fn message<T: QueryRequest>(self) -> Self {
        self.message_type(TypedMessage::<T>::new())
    }

    /// Register a hand-written [`MessageType`] under its `full_name()`.
    #[must_use]
    pub fn message_type<M: MessageType + 'static>(mut self, message_type: M) -> Self {
        self.types
            .insert(message_type.full_name().to_owned(), Box::new(message_type));
        self
    }

    /// Freeze the registry. No further registration is possible.
    #[must_use]
    pub fn build(self) -> TypeRegistry {
        TypeRegistry { types: self.types }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════════════

/// Immutable set of request types, keyed by fully-qualified name.
pub struct TypeRegistry {
    types: HashMap<String, Box<dyn MessageType>>,
}

impl TypeRegistry {
    /// Start a [`TypeRegistryBuilder`].
    #[must_use]
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns `true` if `type_name` is registered.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, type_name: &str) -> Option<&dyn MessageType> {
        self.types.get(type_name).map(|t| &**t)
    }

    fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
