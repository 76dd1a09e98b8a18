use core::fmt::{self, Debug, Display, Formatter};

use thiserror::Error;

// -----------------------------------------------------------------------------
// Qualifier

/// A nominal tag attached to a type use site.
///
/// A qualifier narrows which codec is selected without changing the
/// underlying type. It carries no data; two qualifiers are equal iff their
/// names are equal.
///
/// # Examples
///
/// ```
/// use qc_codec::Qualifier;
///
/// const LOWERCASE: Qualifier = Qualifier::new("Lowercase");
///
/// assert_eq!(LOWERCASE.name(), "Lowercase");
/// assert_eq!(LOWERCASE.to_string(), "@Lowercase");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Qualifier {
    name: &'static str,
}

impl Qualifier {
    /// Creates a qualifier from its name.
    #[inline]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Returns the qualifier name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl Display for Qualifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)
    }
}

impl Debug for Qualifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

// -----------------------------------------------------------------------------
// QualifierError

/// A factory tried to consume a qualifier the key does not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualifierError {
    #[error("qualifier {qualifier} is not present in [{set}]")]
    Missing {
        qualifier: Qualifier,
        set: QualifierSet,
    },
}

// -----------------------------------------------------------------------------
// QualifierSet

/// An immutable set of [`Qualifier`]s.
///
/// Qualifiers are kept sorted and deduplicated, so equality and hashing
/// ignore insertion order and repeats. The empty set is the one canonical
/// "no qualifiers" value.
///
/// # Examples
///
/// ```
/// use qc_codec::{Qualifier, QualifierSet};
///
/// const A: Qualifier = Qualifier::new("A");
/// const B: Qualifier = Qualifier::new("B");
///
/// let ab = QualifierSet::from([A, B]);
/// let ba = QualifierSet::from([B, A, B]);
/// assert_eq!(ab, ba);
/// assert_eq!(ab.len(), 2);
///
/// assert!(ab.contains_exactly(&[B, A]));
/// assert!(!ab.contains_exactly(&[A]));
///
/// let b = ab.without(A).unwrap();
/// assert_eq!(b, QualifierSet::from([B]));
/// assert!(b.without(A).is_err());
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifierSet {
    // Sorted, no duplicates.
    tags: Vec<Qualifier>,
}

impl QualifierSet {
    /// The empty set.
    #[inline]
    pub const fn empty() -> Self {
        Self { tags: Vec::new() }
    }

    /// Returns the number of qualifiers.
    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns `true` if there are no qualifiers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns `true` if `tag` is a member.
    #[inline]
    pub fn contains(&self, tag: Qualifier) -> bool {
        self.tags.binary_search(&tag).is_ok()
    }

    /// Returns `true` if the membership equals `tags` exactly.
    ///
    /// Order and duplicates in `tags` are irrelevant.
    pub fn contains_exactly(&self, tags: &[Qualifier]) -> bool {
        tags.iter().all(|tag| self.contains(*tag))
            && self.tags.iter().all(|tag| tags.contains(tag))
    }

    /// Returns a new set without `tag`.
    ///
    /// Fails if `tag` is not a member: a factory must only consume a
    /// qualifier the key actually holds.
    pub fn without(&self, tag: Qualifier) -> Result<Self, QualifierError> {
        match self.tags.binary_search(&tag) {
            Ok(index) => {
                let mut tags = self.tags.clone();
                tags.remove(index);
                Ok(Self { tags })
            }
            Err(_) => Err(QualifierError::Missing {
                qualifier: tag,
                set: self.clone(),
            }),
        }
    }

    /// Returns a new set that also holds `tag`.
    pub fn with(&self, tag: Qualifier) -> Self {
        match self.tags.binary_search(&tag) {
            Ok(_) => self.clone(),
            Err(index) => {
                let mut tags = self.tags.clone();
                tags.insert(index, tag);
                Self { tags }
            }
        }
    }

    /// Iterates the qualifiers in name order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Qualifier> + '_ {
        self.tags.iter().copied()
    }
}

impl FromIterator<Qualifier> for QualifierSet {
    fn from_iter<I: IntoIterator<Item = Qualifier>>(iter: I) -> Self {
        let mut tags: Vec<Qualifier> = iter.into_iter().collect();
        tags.sort_unstable();
        tags.dedup();
        Self { tags }
    }
}

impl<const N: usize> From<[Qualifier; N]> for QualifierSet {
    #[inline]
    fn from(tags: [Qualifier; N]) -> Self {
        tags.into_iter().collect()
    }
}

impl Display for QualifierSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut iter = self.tags.iter();
        if let Some(first) = iter.next() {
            write!(f, "{first}")?;
        }
        for tag in iter {
            write!(f, " {tag}")?;
        }
        Ok(())
    }
}

impl Debug for QualifierSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.tags.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
