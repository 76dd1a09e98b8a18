//! Type keys: raw type identity, generic arguments and qualifier sets.

// -----------------------------------------------------------------------------
// Modules

mod qualifier;
mod raw_type;
mod type_key;

// -----------------------------------------------------------------------------
// Exports

pub use qualifier::{Qualifier, QualifierError, QualifierSet};
pub use raw_type::RawType;
pub use type_key::TypeKey;
