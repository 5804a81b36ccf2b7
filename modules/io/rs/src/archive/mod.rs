//! Framed binary container for alignment records.
//!
//! Layout: a 6-byte header (`RKAR` magic, format version, compression
//! algorithm tag) followed by frames of `u32-LE payload length` + payload,
//! where each payload is a bitcode-encoded batch of [`Alignment`] records,
//! optionally deflate-compressed.

pub use algorithm::Algorithm;
pub use reader::Reader;
pub use record::Alignment;
pub use writer::Writer;

mod algorithm;
mod reader;
mod record;
mod writer;

pub(crate) const MAGIC: &[u8; 4] = b"RKAR";
pub(crate) const VERSION: u8 = 1;
pub(crate) const HEADER_LEN: usize = 6;
