//! Byte-level I/O (component C1).

pub mod source;

pub use source::ByteSource;
