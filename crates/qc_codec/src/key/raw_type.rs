use core::fmt::{self, Debug, Display, Formatter};

// -----------------------------------------------------------------------------
// RawType

/// The nominal identity of a type, without generic arguments or qualifiers.
///
/// A raw type is identified by a stable path string. The path does not need
/// to match [`core::any::type_name`]; it only needs to be unique, and it
/// should not change when the definition moves.
///
/// We guarantee that the built-in paths do not have the prefix `::`.
/// Users should also ensure this for their own paths.
///
/// # Examples
///
/// ```
/// use qc_codec::RawType;
///
/// const FOO: RawType = RawType::new("my_app::model::Foo");
///
/// assert_eq!(FOO.path(), "my_app::model::Foo");
/// assert_eq!(FOO.ident(), "Foo");
/// assert_eq!(FOO.module_path(), Some("my_app::model"));
///
/// assert_eq!(RawType::STRING.ident(), "String");
/// assert_eq!(RawType::BOOL.module_path(), None);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawType {
    path: &'static str,
}

impl RawType {
    pub const BOOL: Self = Self::new("bool");
    pub const I32: Self = Self::new("i32");
    pub const I64: Self = Self::new("i64");
    pub const U32: Self = Self::new("u32");
    pub const F64: Self = Self::new("f64");
    pub const STRING: Self = Self::new("alloc::string::String");
    /// Ordered sequence, one type argument.
    pub const LIST: Self = Self::new("alloc::vec::Vec");
    /// String-keyed map, two type arguments.
    pub const MAP: Self = Self::new("std::collections::HashMap");
    /// Nullable value, one type argument.
    pub const OPTION: Self = Self::new("core::option::Option");

    /// Creates a raw type from its full path.
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self { path }
    }

    /// Returns the full path, such as `"alloc::vec::Vec"`.
    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Returns the last path segment, such as `"Vec"`.
    pub fn ident(&self) -> &'static str {
        match self.path.rsplit_once("::") {
            Some((_, ident)) => ident,
            None => self.path,
        }
    }

    /// Returns the module path, or `None` for primitives.
    pub fn module_path(&self) -> Option<&'static str> {
        self.path.rsplit_once("::").map(|(module, _)| module)
    }
}

impl Display for RawType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.ident())
    }
}

impl Debug for RawType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}
