use core::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use crate::key::{Qualifier, QualifierError, QualifierSet, RawType};

// -----------------------------------------------------------------------------
// TypeKey

/// The lookup and cache key of the engine: a raw type, its generic arguments
/// and the qualifiers attached at the use site.
///
/// Each generic argument is itself a `TypeKey` carrying its own qualifiers,
/// independently of the outer key. Equality and hashing are structural and
/// recursive; qualifier order never matters.
///
/// Keys are immutable. Argument lists are shared, so cloning is cheap.
///
/// # Examples
///
/// ```
/// use qc_codec::{Qualifier, RawType, TypeKey};
///
/// const REVERSED: Qualifier = Qualifier::new("Reversed");
/// const LOWERCASE: Qualifier = Qualifier::new("Lowercase");
/// const BAR_POSTFIX: Qualifier = Qualifier::new("BarPostFix");
///
/// let element = TypeKey::of(RawType::STRING)
///     .qualified(LOWERCASE)
///     .qualified(BAR_POSTFIX);
/// let key = TypeKey::generic(RawType::LIST, [element]).qualified(REVERSED);
///
/// assert!(key.raw_type_matches(RawType::LIST));
/// assert_eq!(key.to_string(), "@Reversed Vec<@BarPostFix @Lowercase String>");
///
/// let inner = key.without(REVERSED).unwrap();
/// assert!(inner.is_unqualified());
/// assert!(!inner.arg(0).unwrap().is_unqualified());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeKey {
    raw: RawType,
    args: Arc<[TypeKey]>,
    qualifiers: QualifierSet,
}

impl TypeKey {
    /// Creates an unqualified key for a non-generic type.
    #[inline]
    pub fn of(raw: RawType) -> Self {
        Self::generic(raw, [])
    }

    /// Creates an unqualified key for a parameterized type.
    pub fn generic(raw: RawType, args: impl IntoIterator<Item = TypeKey>) -> Self {
        Self {
            raw,
            args: args.into_iter().collect(),
            qualifiers: QualifierSet::empty(),
        }
    }

    /// Returns the same type with its qualifiers replaced by `qualifiers`.
    ///
    /// Nested arguments keep their own qualifiers.
    pub fn with_qualifiers(&self, qualifiers: QualifierSet) -> Self {
        Self {
            raw: self.raw,
            args: self.args.clone(),
            qualifiers,
        }
    }

    /// Adds `tag` to the qualifiers of this key.
    pub fn qualified(self, tag: Qualifier) -> Self {
        let qualifiers = self.qualifiers.with(tag);
        Self { qualifiers, ..self }
    }

    /// Returns the same type with one qualifier consumed.
    ///
    /// This is the "remainder" a qualifier factory delegates to. It fails if
    /// the key does not hold `tag`.
    pub fn without(&self, tag: Qualifier) -> Result<Self, QualifierError> {
        Ok(self.with_qualifiers(self.qualifiers.without(tag)?))
    }

    /// Returns the same type without any qualifier.
    pub fn unqualified(&self) -> Self {
        self.with_qualifiers(QualifierSet::empty())
    }

    #[inline]
    pub fn raw(&self) -> RawType {
        self.raw
    }

    /// Returns the generic arguments, empty for non-generic types.
    #[inline]
    pub fn args(&self) -> &[TypeKey] {
        &self.args
    }

    /// Returns the generic argument at `index`, if present.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&TypeKey> {
        self.args.get(index)
    }

    #[inline]
    pub fn qualifiers(&self) -> &QualifierSet {
        &self.qualifiers
    }

    /// Returns `true` if no qualifier is attached at this level.
    #[inline]
    pub fn is_unqualified(&self) -> bool {
        self.qualifiers.is_empty()
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }

    /// Returns `true` if the raw type is `candidate`, whatever the arguments
    /// and qualifiers are.
    #[inline]
    pub fn raw_type_matches(&self, candidate: RawType) -> bool {
        self.raw == candidate
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for tag in self.qualifiers.iter() {
            write!(f, "{tag} ")?;
        }
        Display::fmt(&self.raw, f)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl Debug for TypeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "`{self}`")
    }
}

// -----------------------------------------------------------------------------
// Tests
