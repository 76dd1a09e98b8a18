use std::collections::{BTreeMap, HashMap};

use crate::key::{RawType, TypeKey};

/// Rust types with a known, unqualified [`TypeKey`].
///
/// This is the bridge from static types to keys: container keys are built
/// from the keys of their parameters. Qualifiers are attached at use sites,
/// so they never appear here.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
///
/// use qc_codec::{Described, RawType, TypeKey};
///
/// assert_eq!(
///     <Vec<Option<String>>>::type_key(),
///     TypeKey::generic(RawType::LIST, [
///         TypeKey::generic(RawType::OPTION, [TypeKey::of(RawType::STRING)]),
///     ]),
/// );
/// assert_eq!(
///     <HashMap<String, i32>>::type_key().to_string(),
///     "HashMap<String, i32>",
/// );
/// ```
pub trait Described {
    fn type_key() -> TypeKey;
}

macro_rules! impl_described_scalar {
    ($($ty:ty => $raw:expr),* $(,)?) => {
        $(
            impl Described for $ty {
                #[inline]
                fn type_key() -> TypeKey {
                    TypeKey::of($raw)
                }
            }
        )*
    };
}

impl_described_scalar! {
    bool => RawType::BOOL,
    i32 => RawType::I32,
    i64 => RawType::I64,
    u32 => RawType::U32,
    f64 => RawType::F64,
    String => RawType::STRING,
}

impl<T: Described> Described for Vec<T> {
    fn type_key() -> TypeKey {
        TypeKey::generic(RawType::LIST, [T::type_key()])
    }
}

impl<T: Described> Described for Option<T> {
    fn type_key() -> TypeKey {
        TypeKey::generic(RawType::OPTION, [T::type_key()])
    }
}

impl<V: Described, S> Described for HashMap<String, V, S> {
    fn type_key() -> TypeKey {
        TypeKey::generic(RawType::MAP, [String::type_key(), V::type_key()])
    }
}

impl<V: Described> Described for BTreeMap<String, V> {
    fn type_key() -> TypeKey {
        TypeKey::generic(RawType::MAP, [String::type_key(), V::type_key()])
    }
}
