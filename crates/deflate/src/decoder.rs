//! Parses the container header, rebuilds the three Huffman trees, and
//! replays literal/length/distance tokens into the output buffer.

use crate::bitio::BitReader;
use crate::error::DecodeError;
use crate::{code_lengths, header, huffman, tables};

/// Decompresses a buffer produced by [`crate::encoder::encode`].
pub fn decode(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let (prefix, prefix_len) = header::read_prefix(input)?;
    let mut reader = BitReader::new(&input[prefix_len..]);

    let codes_n = prefix.codes_n as usize;
    let cl_max = codes_n.checked_sub(4).ok_or_else(|| {
        log::warn!("codes_n ({codes_n}) is too small to carry the three special RLE symbols");
        DecodeError::BadCodeLengths
    })? as u8;

    let code_length_lengths = header::read_code_length_tree(&mut reader, codes_n)?;
    let code_length_tree = huffman::HuffmanTree::from_code_lengths(&code_length_lengths);

    let combined = decode_combined_lengths(&mut reader, &code_length_tree, cl_max)?;

    if combined.len() != code_lengths::COMBINED_LENGTH {
        log::warn!(
            "combined code-length vector has {} entries, expected {}",
            combined.len(),
            code_lengths::COMBINED_LENGTH
        );
        return Err(DecodeError::BadCodeLengths);
    }
    let (literal_lengths, distance_lengths) =
        combined.split_at(tables::NUM_LITERAL_LENGTH_SYMBOLS);

    let literal_tree = huffman::HuffmanTree::from_code_lengths(literal_lengths);
    let distance_tree = huffman::HuffmanTree::from_code_lengths(distance_lengths);

    let output = decode_tokens(&mut reader, &literal_tree, &distance_tree, &prefix)?;

    log::debug!("decoded {} bytes from {} input bytes", output.len(), input.len());

    Ok(output)
}

fn decode_combined_lengths(
    reader: &mut BitReader<'_>,
    code_length_tree: &huffman::HuffmanTree,
    cl_max: u8,
) -> Result<Vec<u8>, DecodeError> {
    let mut decoder = code_lengths::Decoder::new(cl_max);

    while !decoder.is_complete() {
        let symbol = code_length_tree.decode_symbol(reader)?;
        let extra_bits = code_lengths::extra_bits_for_symbol(symbol, cl_max)?;
        let extra_value = if extra_bits > 0 {
            reader.read_bits(extra_bits)?
        } else {
            0
        };
        decoder.push(symbol, extra_value)?;
    }

    Ok(decoder.finish()?)
}

fn decode_tokens(
    reader: &mut BitReader<'_>,
    literal_tree: &huffman::HuffmanTree,
    distance_tree: &huffman::HuffmanTree,
    prefix: &header::Prefix,
) -> Result<Vec<u8>, DecodeError> {
    let declared_size = prefix.uncompressed_size as usize;
    let mut output = Vec::with_capacity(declared_size);

    loop {
        let symbol = literal_tree.decode_symbol(reader)?;

        if symbol == tables::END_OF_STREAM_SYMBOL {
            break;
        }

        if symbol < tables::END_OF_STREAM_SYMBOL {
            output.push(symbol as u8);
        } else {
            let index = (symbol - tables::LENGTH_SYMBOL_BASE) as usize;
            let length_extra_bits = *tables::EXTRA_BITS_LENGTH.get(index).ok_or_else(|| {
                log::warn!("length symbol {symbol} is outside the literal/length alphabet");
                DecodeError::UnexpectedSymbol
            })?;
            let length_extra_value = if length_extra_bits > 0 {
                reader.read_bits(length_extra_bits)?
            } else {
                0
            };
            let length = tables::BASE_VALUE_LENGTH[index] + length_extra_value as u16;

            let distance_symbol = distance_tree.decode_symbol(reader)?;
            let distance_extra_bits = *tables::EXTRA_BITS_DISTANCE
                .get(distance_symbol as usize)
                .ok_or_else(|| {
                    log::warn!("distance symbol {distance_symbol} is outside the distance alphabet");
                    DecodeError::UnexpectedSymbol
                })?;
            let distance_extra_value = if distance_extra_bits > 0 {
                reader.read_bits(distance_extra_bits)?
            } else {
                0
            };
            let distance =
                tables::BASE_VALUE_DISTANCE[distance_symbol as usize] + distance_extra_value as u16;

            if distance as usize > output.len() {
                log::warn!(
                    "back-reference distance {distance} exceeds the {} bytes decoded so far",
                    output.len()
                );
                return Err(DecodeError::TruncatedInput);
            }

            // Self-overlapping copies (distance < length) must proceed one
            // byte at a time: a byte written earlier in this same copy can
            // be read again before the copy finishes.
            let start = output.len() - distance as usize;
            for i in 0..length as usize {
                let byte = output[start + i];
                output.push(byte);
            }
        }

        if output.len() > declared_size {
            log::warn!(
                "decoded {} bytes, exceeding the {declared_size} bytes the header declared",
                output.len()
            );
            return Err(DecodeError::OutputOverflow);
        }
    }

    if output.len() != declared_size {
        log::warn!(
            "stream ended after {} bytes, expected {declared_size}",
            output.len()
        );
        return Err(DecodeError::OutputOverflow);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;

    #[test]
    fn wrong_magic_is_reported() {
        let mut compressed = encode(b"hello").unwrap();
        compressed[0] = b'X';
        assert!(matches!(decode(&compressed), Err(DecodeError::WrongHeader)));
    }

    #[test]
    fn truncated_stream_is_reported() {
        let compressed = encode(b"hello world, hello world").unwrap();
        let truncated = &compressed[..compressed.len() - 2];
        assert!(matches!(
            decode(truncated),
            Err(DecodeError::TruncatedInput) | Err(DecodeError::OutputOverflow)
        ));
    }

    #[test]
    fn tampered_size_field_overflows() {
        let mut compressed = encode(b"hello").unwrap();
        // claim there are fewer bytes than actually encoded
        compressed[4..8].copy_from_slice(&1u32.to_le_bytes());
        assert!(matches!(
            decode(&compressed),
            Err(DecodeError::OutputOverflow)
        ));
    }
}
