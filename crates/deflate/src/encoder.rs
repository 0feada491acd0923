//! Orchestrates tokenization, the three Huffman builds, and header emission
//! into a single compressed buffer.

use crate::bitio::BitWriter;
use crate::error::EncodeError;
use crate::{code_lengths, header, huffman, lz77, tables};

/// Compresses `input` into this format's container.
pub fn encode(input: &[u8]) -> Result<Vec<u8>, EncodeError> {
    if input.len() > u32::MAX as usize {
        log::warn!(
            "input is {} bytes, longer than this format's 32-bit size field can express",
            input.len()
        );
        return Err(EncodeError::InputTooLarge);
    }

    let tokens = lz77::tokenize(input);

    let mut literal_freq = [0u32; tables::NUM_LITERAL_LENGTH_SYMBOLS];
    let mut distance_freq = [0u32; tables::NUM_DISTANCE_SYMBOLS];
    let mut match_count = 0usize;

    for token in &tokens {
        match *token {
            lz77::Token::Literal(byte) => literal_freq[byte as usize] += 1,
            lz77::Token::Match { length, distance } => {
                let (length_symbol, _) = tables::length_to_symbol(length);
                literal_freq[length_symbol as usize] += 1;
                let (distance_symbol, _) = tables::distance_to_symbol(distance);
                distance_freq[distance_symbol as usize] += 1;
                match_count += 1;
            },
            lz77::Token::EndOfStream => {
                literal_freq[tables::END_OF_STREAM_SYMBOL as usize] += 1;
            },
        }
    }

    let literal_lengths = huffman::build_code_lengths(&literal_freq);
    let distance_lengths = huffman::build_code_lengths(&distance_freq);
    check_length_cap(&literal_lengths)?;
    check_length_cap(&distance_lengths)?;

    let mut combined = literal_lengths.clone();
    combined.extend_from_slice(&distance_lengths);

    let (cl_max, rle_symbols) = code_lengths::encode(&combined);
    let codes_n = cl_max as usize + 4;

    let mut code_length_freq = vec![0u32; codes_n];
    for emitted in &rle_symbols {
        code_length_freq[emitted.symbol as usize] += 1;
    }

    let code_length_lengths = huffman::build_code_lengths(&code_length_freq);
    check_length_cap(&code_length_lengths)?;

    let literal_codes = huffman::recreate_codes(&literal_lengths);
    let distance_codes = huffman::recreate_codes(&distance_lengths);
    let code_length_codes = huffman::recreate_codes(&code_length_lengths);

    let mut out = Vec::new();
    header::write_prefix(&mut out, input.len() as u32, codes_n as u8);

    let mut writer = BitWriter::new();
    header::write_code_length_tree(&mut writer, &code_length_lengths);

    for emitted in &rle_symbols {
        let symbol = emitted.symbol as usize;
        writer.write_bits(code_length_codes[symbol], code_length_lengths[symbol]);
        if emitted.extra_bits > 0 {
            writer.write_bits(emitted.extra_value, emitted.extra_bits);
        }
    }

    for token in &tokens {
        write_token(
            &mut writer,
            token,
            &literal_codes,
            &literal_lengths,
            &distance_codes,
            &distance_lengths,
        );
    }

    out.extend(writer.finish());

    log::debug!(
        "encoded {} bytes into {} bytes ({} tokens, {} back-references)",
        input.len(),
        out.len(),
        tokens.len(),
        match_count,
    );

    Ok(out)
}

fn write_token(
    writer: &mut BitWriter,
    token: &lz77::Token,
    literal_codes: &[u32],
    literal_lengths: &[u8],
    distance_codes: &[u32],
    distance_lengths: &[u8],
) {
    match *token {
        lz77::Token::Literal(byte) => {
            let symbol = byte as usize;
            writer.write_bits(literal_codes[symbol], literal_lengths[symbol]);
        },
        lz77::Token::Match { length, distance } => {
            let (length_symbol, length_extra_value) = tables::length_to_symbol(length);
            writer.write_bits(
                literal_codes[length_symbol as usize],
                literal_lengths[length_symbol as usize],
            );

            let length_extra_bits =
                tables::EXTRA_BITS_LENGTH[(length_symbol - tables::LENGTH_SYMBOL_BASE) as usize];
            if length_extra_bits > 0 {
                writer.write_bits(length_extra_value, length_extra_bits);
            }

            let (distance_symbol, distance_extra_value) = tables::distance_to_symbol(distance);
            writer.write_bits(
                distance_codes[distance_symbol as usize],
                distance_lengths[distance_symbol as usize],
            );

            let distance_extra_bits = tables::EXTRA_BITS_DISTANCE[distance_symbol as usize];
            if distance_extra_bits > 0 {
                writer.write_bits(distance_extra_value, distance_extra_bits);
            }
        },
        lz77::Token::EndOfStream => {
            let symbol = tables::END_OF_STREAM_SYMBOL as usize;
            writer.write_bits(literal_codes[symbol], literal_lengths[symbol]);
        },
    }
}

fn check_length_cap(lengths: &[u8]) -> Result<(), EncodeError> {
    if let Some(&worst) = lengths.iter().max() {
        if worst as usize > huffman::CODE_MAX_BITS {
            log::error!(
                "a huffman code length of {worst} exceeds this format's {}-bit cap",
                huffman::CODE_MAX_BITS
            );
            return Err(EncodeError::CodeLengthOverflow);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    #[test]
    fn empty_input_has_zero_size_header() {
        let compressed = encode(b"").unwrap();
        assert_eq!(&compressed[0..4], b"DEFc");
        assert_eq!(&compressed[4..8], &[0, 0, 0, 0]);
        assert_eq!(decode(&compressed).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn single_literal_roundtrips() {
        // S1
        let compressed = encode(&[0x41]).unwrap();
        assert_eq!(&compressed[4..8], &1u32.to_le_bytes());
        assert_eq!(decode(&compressed).unwrap(), vec![0x41]);
    }

    #[test]
    fn short_run_roundtrips() {
        // S2
        let compressed = encode(b"AAAA").unwrap();
        assert_eq!(decode(&compressed).unwrap(), b"AAAA");
    }

    #[test]
    fn self_overlapping_run_roundtrips() {
        // S3 / S6 property 6
        let compressed = encode(b"ABABABAB").unwrap();
        assert_eq!(decode(&compressed).unwrap(), b"ABABABAB");
    }

    #[test]
    fn skewed_frequencies_roundtrip() {
        // S5: large absent range of literal symbols.
        let mut input = Vec::new();
        for byte in 0..50u8 {
            input.extend(std::iter::repeat(byte).take(20));
        }
        let compressed = encode(&input).unwrap();
        assert_eq!(decode(&compressed).unwrap(), input);
    }
}
