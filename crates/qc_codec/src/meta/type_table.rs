use qc_utils::hash::HashMap;

use crate::key::RawType;
use crate::meta::StructInfo;

/// Struct metadata keyed by raw type.
///
/// Built on an [`EngineBuilder`](crate::EngineBuilder) and read-only once
/// the engine exists.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    structs: HashMap<RawType, StructInfo>,
}

impl TypeTable {
    /// Create a empty [`TypeTable`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `info`, returning the metadata it replaces.
    pub fn insert(&mut self, info: StructInfo) -> Option<StructInfo> {
        self.structs.insert(info.raw(), info)
    }

    #[inline]
    pub fn get(&self, raw: RawType) -> Option<&StructInfo> {
        self.structs.get(&raw)
    }

    #[inline]
    pub fn contains(&self, raw: RawType) -> bool {
        self.structs.contains_key(&raw)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Iterates the registered metadata in arbitrary order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &StructInfo> {
        self.structs.values()
    }
}
