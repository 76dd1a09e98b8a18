//! The [`Codec`] capability and its errors.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod null_safe;
mod traits;

// -----------------------------------------------------------------------------
// Exports

pub use error::{DecodeError, EncodeError};
pub use null_safe::NullSafe;
pub use traits::{Codec, CodecExt, CodecRef};
