//! Codec factories: the strategies the engine asks in order.
//!
//! - [`CodecFactory`]: the capability every factory implements.
//! - [`from_fn`]: a factory from a closure.
//! - [`ExactFactory`]: one fixed codec for one exact key.
//! - [`QualifierFactory`]: consumes one qualifier and wraps the rest.
//!
//! The built-in scalar, container and record factories live in
//! [`builtin`](crate::builtin).

// -----------------------------------------------------------------------------
// Modules

mod exact;
mod fn_factory;
mod qualified;
mod traits;

// -----------------------------------------------------------------------------
// Exports

pub use exact::ExactFactory;
pub use fn_factory::{FnFactory, from_fn};
pub use qualified::QualifierFactory;
pub use traits::CodecFactory;
