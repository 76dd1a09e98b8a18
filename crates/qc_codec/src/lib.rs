#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Modules

mod value;

pub mod builtin;
pub mod codec;
pub mod engine;
pub mod factory;
pub mod key;
pub mod meta;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports {
    #[cfg(feature = "auto_register")]
    pub use inventory;
}

pub use codec::{Codec, CodecExt, CodecRef, DecodeError, EncodeError, NullSafe};
pub use engine::{CodecEngine, EngineBuilder, ResolutionChain, ResolveError, Resolver};
pub use factory::{CodecFactory, ExactFactory, QualifierFactory};
pub use key::{Qualifier, QualifierError, QualifierSet, RawType, TypeKey};
pub use meta::{Described, FieldInfo, StructInfo, TypeTable};
pub use value::Value;
