use crate::key::{RawType, TypeKey};

// -----------------------------------------------------------------------------
// FieldInfo

/// A named struct field and the key of its declared type.
///
/// The key carries the qualifiers attached at the field, and each of its
/// arguments carries the qualifiers attached at that argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldInfo {
    name: &'static str,
    key: TypeKey,
}

impl FieldInfo {
    #[inline]
    pub fn new(name: &'static str, key: TypeKey) -> Self {
        Self { name, key }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn key(&self) -> &TypeKey {
        &self.key
    }
}

// -----------------------------------------------------------------------------
// StructInfo

/// Metadata of a non-generic record type, as read by the built-in record
/// factory.
///
/// Fields keep their declaration order, which is the order they are
/// encoded in.
///
/// # Examples
///
/// ```
/// use qc_codec::{Qualifier, RawType, StructInfo, TypeKey};
///
/// const REVERSED: Qualifier = Qualifier::new("Reversed");
///
/// let info = StructInfo::new(RawType::new("my_app::Foo"))
///     .with_field("id", TypeKey::of(RawType::I64))
///     .with_field(
///         "list",
///         TypeKey::generic(RawType::LIST, [TypeKey::of(RawType::STRING)]).qualified(REVERSED),
///     );
///
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.index_of("list"), Some(1));
/// assert!(info.field("list").unwrap().key().qualifiers().contains(REVERSED));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructInfo {
    raw: RawType,
    fields: Vec<FieldInfo>,
}

impl StructInfo {
    /// Creates metadata without fields.
    #[inline]
    pub fn new(raw: RawType) -> Self {
        Self {
            raw,
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    ///
    /// A field with the same name is replaced in place.
    pub fn with_field(mut self, name: &'static str, key: TypeKey) -> Self {
        let field = FieldInfo::new(name, key);
        match self.index_of(name) {
            Some(index) => self.fields[index] = field,
            None => self.fields.push(field),
        }
        self
    }

    #[inline]
    pub fn raw(&self) -> RawType {
        self.raw
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Returns the [`FieldInfo`] for the given `name`, if present.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns the index for the given field `name`, if present.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }
}
