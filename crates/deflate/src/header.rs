//! The container header: four magic bytes, a little-endian size, the
//! code-length alphabet size, and the bit-packed description of the
//! code-length Huffman tree that everything else hangs off of.

use error_derive::Error;

use crate::bitio::{self, BitReader, BitWriter};

pub const MAGIC: [u8; 4] = *b"DEFc";

/// Bytes before the bitstream proper begins.
pub const PREFIX_LEN: usize = 9;

#[derive(Clone, Copy, Debug, Error)]
pub enum Error {
    #[msg = "input shorter than the fixed header prefix"]
    TruncatedHeader,
    #[msg = "magic bytes did not match 'DEFc'"]
    WrongMagic,
    #[msg = "bit reader error while reading the header's bit-packed fields"]
    BitReader(bitio::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prefix {
    pub uncompressed_size: u32,
    pub codes_n: u8,
}

/// Writes the fixed, byte-aligned prefix: magic, size, alphabet size.
pub fn write_prefix(out: &mut Vec<u8>, uncompressed_size: u32, codes_n: u8) {
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&uncompressed_size.to_le_bytes());
    out.push(codes_n);
}

/// Reads and validates the fixed prefix, returning it along with the byte
/// offset the bitstream starts at (always [`PREFIX_LEN`]).
pub fn read_prefix(bytes: &[u8]) -> Result<(Prefix, usize), Error> {
    if bytes.len() < PREFIX_LEN {
        return Err(Error::TruncatedHeader);
    }
    if bytes[0..4] != MAGIC {
        return Err(Error::WrongMagic);
    }

    let uncompressed_size = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let codes_n = bytes[8];

    Ok((
        Prefix {
            uncompressed_size,
            codes_n,
        },
        PREFIX_LEN,
    ))
}

/// The smallest `k` in `2..=7` such that `max_length` fits in `k` bits.
pub fn bits_per_code_length(max_length: u8) -> u8 {
    for k in 2..=7u8 {
        if (max_length as u32) < (1u32 << k) {
            return k;
        }
    }
    7
}

/// Writes `k` (3 bits) followed by `lengths.len()` fields of `k` bits each:
/// the code-length Huffman tree's own code lengths.
pub fn write_code_length_tree(writer: &mut BitWriter, lengths: &[u8]) {
    let max_length = lengths.iter().copied().max().unwrap_or(0);
    let k = bits_per_code_length(max_length);

    writer.write_bits(k as u32, 3);
    for &length in lengths {
        writer.write_bits(length as u32, k);
    }
}

/// Inverse of [`write_code_length_tree`]; `codes_n` is read from the fixed
/// prefix and tells the reader how many entries to expect.
pub fn read_code_length_tree(reader: &mut BitReader<'_>, codes_n: usize) -> Result<Vec<u8>, Error> {
    let k = reader.read_bits(3)? as u8;

    let mut lengths = Vec::with_capacity(codes_n);
    for _ in 0..codes_n {
        lengths.push(reader.read_bits(k)? as u8);
    }

    Ok(lengths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_roundtrip() {
        let mut bytes = Vec::new();
        write_prefix(&mut bytes, 1234, 42);

        let (prefix, offset) = read_prefix(&bytes).unwrap();
        assert_eq!(prefix.uncompressed_size, 1234);
        assert_eq!(prefix.codes_n, 42);
        assert_eq!(offset, PREFIX_LEN);
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let bytes = [b'X', b'Y', b'Z', b'c', 0, 0, 0, 0, 0];
        assert!(matches!(read_prefix(&bytes), Err(Error::WrongMagic)));
    }

    #[test]
    fn truncated_prefix_is_rejected() {
        assert!(matches!(read_prefix(b"DEFc"), Err(Error::TruncatedHeader)));
    }

    #[test]
    fn bits_per_code_length_picks_smallest_fit() {
        assert_eq!(bits_per_code_length(0), 2);
        assert_eq!(bits_per_code_length(3), 2);
        assert_eq!(bits_per_code_length(4), 3);
        assert_eq!(bits_per_code_length(115), 7);
    }

    #[test]
    fn code_length_tree_roundtrip() {
        let lengths = vec![1u8, 2, 3, 0, 5, 7];
        let mut writer = BitWriter::new();
        write_code_length_tree(&mut writer, &lengths);
        let bytes = writer.finish();

        let mut reader = BitReader::new(&bytes);
        let decoded = read_code_length_tree(&mut reader, lengths.len()).unwrap();
        assert_eq!(decoded, lengths);
    }
}
