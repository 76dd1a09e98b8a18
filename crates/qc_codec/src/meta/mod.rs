//! Type metadata: how Rust types and records map to [`TypeKey`]s.
//!
//! The engine never inspects Rust types itself. It reads keys built by
//! callers (or by [`Described`]) and the [`StructInfo`] registered on the
//! builder, explicitly or through [`submit_struct!`].
//!
//! [`TypeKey`]: crate::TypeKey
//! [`submit_struct!`]: crate::submit_struct

// -----------------------------------------------------------------------------
// Modules

mod described;
mod struct_info;
mod type_table;

#[cfg(feature = "auto_register")]
mod auto_register;

// -----------------------------------------------------------------------------
// Exports

pub use described::Described;
pub use struct_info::{FieldInfo, StructInfo};
pub use type_table::TypeTable;

#[cfg(feature = "auto_register")]
pub use auto_register::StructRegistration;

#[cfg(feature = "auto_register")]
pub(crate) use auto_register::registered_structs;
