//! The resolution engine.
//!
//! - [`CodecEngine`]: the factory list, the struct metadata and the cache.
//! - [`EngineBuilder`]: registration before the engine is frozen.
//! - [`Resolver`]: what factories use to resolve nested keys.
//! - [`ResolveError`]: why a key has no codec.

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod chain;
mod engine;
mod error;
mod resolver;

// -----------------------------------------------------------------------------
// Exports

pub use builder::EngineBuilder;
pub use chain::ResolutionChain;
pub use engine::CodecEngine;
pub use error::ResolveError;
pub use resolver::Resolver;
