//! A DEFLATE-like compressor: LZ77 back-references over a 32 KiB window,
//! canonical Huffman coding for literals/lengths and distances, and a third
//! canonical tree describing the other two trees' code lengths, RLE-packed.
//!
//! The container format is its own: a `DEFc` header followed by an
//! MSB-first bitstream. It is not wire-compatible with RFC-1951/standard
//! DEFLATE, though the algorithms it builds on are the same ones RFC-1951
//! describes.

pub mod bitio;
pub mod code_lengths;
mod decoder;
mod encoder;
pub mod error;
pub mod header;
pub mod huffman;
pub mod lz77;
pub mod tables;

pub use decoder::decode;
pub use encoder::encode;
pub use error::{DecodeError, EncodeError};
