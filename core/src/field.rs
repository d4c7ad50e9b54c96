//! Field descriptors — serialization name → typed setter
//!
//! A request type declares its settable fields once, as a list of
//! [`FieldDescriptor`]s. Each descriptor pairs the field's in-memory
//! identifier with its serialization name (the name used on the wire and in
//! JSON) and a setter typed to the field's scalar kind. The registry turns the
//! list into a [`FieldTable`] when the type is registered, so populating a
//! message from path parameters is a hash lookup plus a function call.
//!
//! Nested messages, repeated fields and maps can be declared so that a path
//! parameter naming them fails with a clear error instead of vanishing.

use crate::coerce;
use crate::CoerceError;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The declared kind of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// UTF-8 string.
    String,
    /// Boolean.
    Bool,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit unsigned integer.
    Uint32,
    /// 64-bit unsigned integer.
    Uint64,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Raw bytes (the parameter's UTF-8 bytes).
    Bytes,
    /// Enumeration, by variant name or number.
    Enum,
    /// Nested message.
    Message,
    /// Repeated field.
    Repeated,
    /// Map field.
    Map,
}

impl FieldKind {
    /// Lowercase name used in error messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bytes => "bytes",
            Self::Enum => "enum",
            Self::Message => "message",
            Self::Repeated => "repeated",
            Self::Map => "map",
        }
    }

    /// Returns `true` if a path parameter can be coerced into this kind.
    #[must_use]
    pub fn is_scalar(self) -> bool {
        !matches!(self, Self::Message | Self::Repeated | Self::Map)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

enum Setter<M> {
    String(fn(&mut M, String)),
    Bool(fn(&mut M, bool)),
    Int32(fn(&mut M, i32)),
    Int64(fn(&mut M, i64)),
    Uint32(fn(&mut M, u32)),
    Uint64(fn(&mut M, u64)),
    Float(fn(&mut M, f32)),
    Double(fn(&mut M, f64)),
    Bytes(fn(&mut M, Vec<u8>)),
    Enum {
        values: &'static [(&'static str, i32)],
        set: fn(&mut M, i32),
    },
    Unsupported(FieldKind),
}

// fn pointers are Copy for every M; derive would demand M: Copy.
impl<M> Clone for Setter<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Setter<M> {}

impl<M> Setter<M> {
    fn kind(&self) -> FieldKind {
        match self {
            Self::String(_) => FieldKind::String,
            Self::Bool(_) => FieldKind::Bool,
            Self::Int32(_) => FieldKind::Int32,
            Self::Int64(_) => FieldKind::Int64,
            Self::Uint32(_) => FieldKind::Uint32,
            Self::Uint64(_) => FieldKind::Uint64,
            Self::Float(_) => FieldKind::Float,
            Self::Double(_) => FieldKind::Double,
            Self::Bytes(_) => FieldKind::Bytes,
            Self::Enum { .. } => FieldKind::Enum,
            Self::Unsupported(kind) => *kind,
        }
    }
}

/// One settable field of request type `M`.
///
/// # Example
///
/// ```
/// use rpcgate::{FieldDescriptor, FieldKind};
///
/// #[derive(Default)]
/// struct QueryProposalRequest {
///     proposal_id: u64,
/// }
///
/// let field = FieldDescriptor::uint64("proposal_id", "proposal_id", |m: &mut QueryProposalRequest, v| {
///     m.proposal_id = v;
/// });
/// assert_eq!(field.kind(), FieldKind::Uint64);
///
/// let mut msg = QueryProposalRequest::default();
/// field.apply(&mut msg, "42").unwrap();
/// assert_eq!(msg.proposal_id, 42);
/// ```
pub struct FieldDescriptor<M> {
    ident: &'static str,
    serialized_name: &'static str,
    setter: Setter<M>,
}

impl<M> Clone for FieldDescriptor<M> {
    fn clone(&self) -> Self {
        Self {
            ident: self.ident,
            serialized_name: self.serialized_name,
            setter: self.setter,
        }
    }
}

impl<M> fmt::Debug for FieldDescriptor<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("ident", &self.ident)
            .field("serialized_name", &self.serialized_name)
            .field("kind", &self.kind())
            .finish()
    }
}

impl<M> FieldDescriptor<M> {
    fn new(ident: &'static str, serialized_name: &'static str, setter: Setter<M>) -> Self {
        Self {
            ident,
            serialized_name,
            setter,
        }
    }

    /// A string field.
    #[must_use]
    pub fn string(ident: &'static str, name: &'static str, set: fn(&mut M, String)) -> Self {
        Self::new(ident, name, Setter::String(set))
    }

    /// A boolean field.
    #[must_use]
    pub fn bool(ident: &'static str, name: &'static str, set: fn(&mut M, bool)) -> Self {
        Self::new(ident, name, Setter::Bool(set))
    }

    /// A 32-bit signed integer field.
    #[must_use]
    pub fn int32(ident: &'static str, name: &'static str, set: fn(&mut M, i32)) -> Self {
        Self::new(ident, name, Setter::Int32(set))
    }

    /// A 64-bit signed integer field.
    #[must_use]
    pub fn int64(ident: &'static str, name: &'static str, set: fn(&mut M, i64)) -> Self {
        Self::new(ident, name, Setter::Int64(set))
    }

    /// A 32-bit unsigned integer field.
    #[must_use]
    pub fn uint32(ident: &'static str, name: &'static str, set: fn(&mut M, u32)) -> Self {
        Self::new(ident, name, Setter::Uint32(set))
    }

    /// A 64-bit unsigned integer field.
    #[must_use]
    pub fn uint64(ident: &'static str, name: &'static str, set: fn(&mut M, u64)) -> Self {
        Self::new(ident, name, Setter::Uint64(set))
    }

    /// A 32-bit float field.
    #[must_use]
    pub fn float(ident: &'static str, name: &'static str, set: fn(&mut M, f32)) -> Self {
        Self::new(ident, name, Setter::Float(set))
    }

    /// A 64-bit float field.
    #[must_use]
    pub fn double(ident: &'static str, name: &'static str, set: fn(&mut M, f64)) -> Self {
        Self::new(ident, name, Setter::Double(set))
    }

    /// A bytes field. The parameter's UTF-8 bytes are stored as-is.
    #[must_use]
    pub fn bytes(ident: &'static str, name: &'static str, set: fn(&mut M, Vec<u8>)) -> Self {
        Self::new(ident, name, Setter::Bytes(set))
    }

    /// An enum field with its `(variant name, number)` pairs.
    #[must_use]
    pub fn enumeration(
        ident: &'static str,
        name: &'static str,
        values: &'static [(&'static str, i32)],
        set: fn(&mut M, i32),
    ) -> Self {
        Self::new(ident, name, Setter::Enum { values, set })
    }

    /// A nested message field. Cannot be set from a path parameter.
    #[must_use]
    pub fn message(ident: &'static str, name: &'static str) -> Self {
        Self::new(ident, name, Setter::Unsupported(FieldKind::Message))
    }

    /// A repeated field. Cannot be set from a path parameter.
    #[must_use]
    pub fn repeated(ident: &'static str, name: &'static str) -> Self {
        Self::new(ident, name, Setter::Unsupported(FieldKind::Repeated))
    }

    /// A map field. Cannot be set from a path parameter.
    #[must_use]
    pub fn map(ident: &'static str, name: &'static str) -> Self {
        Self::new(ident, name, Setter::Unsupported(FieldKind::Map))
    }

    /// In-memory field identifier.
    #[must_use]
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// Name used in the wire/JSON encoding; path parameters are matched on it.
    #[must_use]
    pub fn serialized_name(&self) -> &'static str {
        self.serialized_name
    }

    /// Declared kind.
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        self.setter.kind()
    }

    /// Coerce `raw` to the field's kind and store it in `message`.
    ///
    /// # Errors
    ///
    /// - [`CoerceError::InvalidValue`] — `raw` does not parse as the field's kind
    /// - [`CoerceError::UnsupportedKind`] — message, repeated or map field
    pub fn apply(&self, message: &mut M, raw: &str) -> Result<(), CoerceError> {
        let field = self.serialized_name;
        match self.setter {
            Setter::String(set) => set(message, raw.to_owned()),
            Setter::Bool(set) => set(message, coerce::parse_bool(field, raw)?),
            Setter::Int32(set) => set(message, coerce::parse_i32(field, raw)?),
            Setter::Int64(set) => set(message, coerce::parse_i64(field, raw)?),
            Setter::Uint32(set) => set(message, coerce::parse_u32(field, raw)?),
            Setter::Uint64(set) => set(message, coerce::parse_u64(field, raw)?),
            Setter::Float(set) => set(message, coerce::parse_f32(field, raw)?),
            Setter::Double(set) => set(message, coerce::parse_f64(field, raw)?),
            Setter::Bytes(set) => set(message, raw.as_bytes().to_vec()),
            Setter::Enum { values, set } => set(message, coerce::parse_enum(field, raw, values)?),
            Setter::Unsupported(kind) => {
                return Err(CoerceError::UnsupportedKind {
                    field: field.to_owned(),
                    kind,
                })
            }
        }
        Ok(())
    }
}

/// A request type's fields, indexed by serialization name.
///
/// Built once per type by the registry.
pub struct FieldTable<M> {
    fields: Vec<FieldDescriptor<M>>,
    by_name: HashMap<&'static str, usize>,
}

impl<M> fmt::Debug for FieldTable<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.fields).finish()
    }
}

impl<M> FieldTable<M> {
    /// Index `fields` by serialization name.
    ///
    /// If two descriptors share a serialization name, the first one wins.
    #[must_use]
    pub fn new(fields: Vec<FieldDescriptor<M>>) -> Self {
        let mut by_name = HashMap::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            by_name.entry(field.serialized_name).or_insert(i);
        }
        Self { fields, by_name }
    }

    /// Look up a field by its serialization name.
    #[must_use]
    pub fn get(&self, serialized_name: &str) -> Option<&FieldDescriptor<M>> {
        self.by_name.get(serialized_name).map(|&i| &self.fields[i])
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor<M>> {
        self.fields.iter()
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the type declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Populate `message` from path parameters.
    ///
    /// Parameters are first resolved to fields by serialization name; names
    /// with no matching field are dropped. The resolved values are then
    /// coerced and applied in field-identifier order.
    ///
    /// # Errors
    ///
    /// The first [`CoerceError`] encountered. Fields applied before the
    /// failure keep their new values; callers discard the message on error.
    pub fn apply(&self, message: &mut M, params: &HashMap<String, String>) -> Result<(), CoerceError> {
        let mut assignments: BTreeMap<&'static str, (&FieldDescriptor<M>, &str)> = BTreeMap::new();

        for (key, value) in params {
            match self.get(key) {
                Some(field) => {
                    assignments.insert(field.ident, (field, value.as_str()));
                }
                None => tracing::debug!(param = key.as_str(), "no field with this name, dropping"),
            }
        }

        for (field, value) in assignments.into_values() {
            field.apply(message, value)?;
        }
        Ok(())
    }
}

impl<M> FromIterator<FieldDescriptor<M>> for FieldTable<M> {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor<M>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
