#![doc = include_str!("../README.md")]

// -----------------------------------------------------------------------------
// Modules

mod error;
mod path;
mod reader;
mod token;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use error::StreamError;
pub use path::PathStack;
pub use reader::JsonReader;
pub use token::{Token, TokenReader, TokenWriter};
pub use writer::JsonWriter;
