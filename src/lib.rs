#![doc = include_str!("../README.md")]

pub use qc_codec as codec;
pub use qc_stream as stream;
pub use qc_utils as utils;
