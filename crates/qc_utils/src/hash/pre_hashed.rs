use core::fmt::Debug;
use core::hash::{BuildHasher, Hash, Hasher};
use core::ops::Deref;

use hashbrown::hash_map::RawEntryMut;

use crate::hash::{FixedHashState, NoOpHashMap};

// -----------------------------------------------------------------------------
// Hashed

/// A value paired with its pre-computed hash.
///
/// Recursive keys (a type key holds its generic arguments, which hold theirs)
/// are expensive to hash; `Hashed` computes the hash once and lets lookups in
/// a [`PreHashMap`] reuse it. Equality short-circuits on hash mismatch.
pub struct Hashed<V> {
    hash: u64,
    value: V,
}

impl<V: Hash> Hashed<V> {
    /// Pre-hashes the given value using the [`FixedHashState`].
    ///
    /// # Examples
    ///
    /// ```
    /// use qc_utils::hash::Hashed;
    ///
    /// let a = Hashed::new("Vec<String>");
    /// let b = Hashed::new("Vec<String>");
    /// assert_eq!(a.hash(), b.hash());
    /// assert!(a == b);
    /// ```
    #[inline]
    pub fn new(value: V) -> Self {
        Self {
            hash: FixedHashState.hash_one(&value),
            value,
        }
    }
}

impl<V> Hashed<V> {
    /// Return the pre-computed hash.
    #[inline(always)]
    pub const fn hash(&self) -> u64 {
        self.hash
    }

    /// Extract the inner value.
    #[inline(always)]
    pub fn into_inner(self) -> V {
        self.value
    }
}

impl<V> Hash for Hashed<V> {
    #[inline]
    fn hash<R: Hasher>(&self, state: &mut R) {
        state.write_u64(self.hash);
    }
}

impl<V> Deref for Hashed<V> {
    type Target = V;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<V: PartialEq> PartialEq for Hashed<V> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.value.eq(&other.value)
    }
}

impl<V: Eq> Eq for Hashed<V> {}

impl<V: Debug> Debug for Hashed<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hashed")
            .field("hash", &self.hash)
            .field("value", &self.value)
            .finish()
    }
}

impl<V: Clone> Clone for Hashed<V> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            hash: self.hash,
            value: self.value.clone(),
        }
    }
}

// -----------------------------------------------------------------------------
// PreHashMap

/// A [`NoOpHashMap`] keyed by [`Hashed`] values.
///
/// # Examples
///
/// ```
/// use qc_utils::hash::{Hashed, PreHashMap};
///
/// let mut map = PreHashMap::<&str, u32>::new();
/// let key = Hashed::new("Vec<String>");
///
/// assert_eq!(*map.get_or_insert_with(&key, || 1), 1);
/// // The first inserted value is kept.
/// assert_eq!(*map.get_or_insert_with(&key, || 2), 1);
/// assert_eq!(map.get_hashed(&key), Some(&1));
/// assert_eq!(map.len(), 1);
/// ```
pub struct PreHashMap<K, V>(NoOpHashMap<Hashed<K>, V>);

impl<K, V> Default for PreHashMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> PreHashMap<K, V> {
    /// Creates an empty map.
    #[inline]
    pub fn new() -> Self {
        Self(NoOpHashMap::default())
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the entries in arbitrary order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.0.iter().map(|(key, value)| (&**key, value))
    }
}

impl<K: Eq + Clone, V> PreHashMap<K, V> {
    /// Returns the value stored for the hashed `key`, if any.
    #[inline]
    pub fn get_hashed(&self, key: &Hashed<K>) -> Option<&V> {
        self.0
            .raw_entry()
            .from_key_hashed_nocheck(key.hash(), key)
            .map(|(_, value)| value)
    }

    /// Try to get or insert the value for the given hashed `key`.
    ///
    /// If the map does not already contain the `key`,
    /// it will clone it and insert the value returned by `func`.
    #[inline]
    pub fn get_or_insert_with(&mut self, key: &Hashed<K>, func: impl FnOnce() -> V) -> &mut V {
        let entry = self
            .0
            .raw_entry_mut()
            .from_key_hashed_nocheck(key.hash(), key);

        match entry {
            RawEntryMut::Occupied(entry) => entry.into_mut(),
            RawEntryMut::Vacant(entry) => {
                let (_, value) = entry.insert_hashed_nocheck(key.hash(), key.clone(), func());
                value
            }
        }
    }
}
