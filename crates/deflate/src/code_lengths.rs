//! Run-length compression of the combined literal/distance code-length
//! vector: the third Huffman alphabet this format transmits, used only to
//! shrink the description of the other two trees.

use error_derive::Error;

/// Number of entries in the combined code-length vector: 286 literal/length
/// entries followed by 30 distance entries.
pub const COMBINED_LENGTH: usize = 286 + 30;

const MAX_LITERAL_REPEAT: usize = 6;
const MIN_LITERAL_REPEAT: usize = 3;
const MAX_SHORT_ZERO_RUN: usize = 10;
const MIN_SHORT_ZERO_RUN: usize = 3;
const MAX_LONG_ZERO_RUN: usize = 138;
const MIN_LONG_ZERO_RUN: usize = 11;

#[derive(Clone, Copy, Debug, Error)]
pub enum Error {
    #[msg = "repeat-previous-length symbol appeared before any non-zero length"]
    RepeatBeforeAnyLength,
    #[msg = "RLE-decoded code-length vector has the wrong length"]
    WrongLength,
    #[msg = "symbol outside the code-length alphabet"]
    SymbolOutOfRange,
}

/// One emitted symbol of the code-length alphabet, together with whatever
/// extra bits accompany it (zero-width when the symbol is a plain literal).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Emitted {
    pub symbol: u16,
    pub extra_value: u32,
    pub extra_bits: u8,
}

/// Returns the special symbols for a given `cl_max`, in the order
/// `(repeat_previous, short_zero_run, long_zero_run)`.
pub fn special_symbols(cl_max: u8) -> (u16, u16, u16) {
    let base = cl_max as u16;
    (base + 1, base + 2, base + 3)
}

/// The width, in bits, of the extra-bits field that follows `symbol`.
pub fn extra_bits_for_symbol(symbol: u16, cl_max: u8) -> Result<u8, Error> {
    let (repeat, short_zero, long_zero) = special_symbols(cl_max);
    if symbol <= cl_max as u16 {
        Ok(0)
    } else if symbol == repeat {
        Ok(2)
    } else if symbol == short_zero {
        Ok(3)
    } else if symbol == long_zero {
        Ok(7)
    } else {
        Err(Error::SymbolOutOfRange)
    }
}

/// Compresses the 316-entry combined code-length vector.
///
/// Returns `(cl_max, symbols)`; `cl_max` is the largest length in `combined`
/// and determines where the three special symbols fall in the alphabet
/// (`codesN = cl_max + 4`).
pub fn encode(combined: &[u8]) -> (u8, Vec<Emitted>) {
    debug_assert_eq!(combined.len(), COMBINED_LENGTH);

    let cl_max = combined.iter().copied().max().unwrap_or(0);
    let (repeat, short_zero, long_zero) = special_symbols(cl_max);

    let mut symbols = Vec::new();
    let mut i = 0;

    while i < combined.len() {
        let value = combined[i];

        if value == 0 {
            let mut run = 1;
            while i + run < combined.len() && combined[i + run] == 0 && run < MAX_LONG_ZERO_RUN {
                run += 1;
            }

            if run < MIN_SHORT_ZERO_RUN {
                for _ in 0..run {
                    symbols.push(Emitted {
                        symbol: 0,
                        extra_value: 0,
                        extra_bits: 0,
                    });
                }
            } else if run <= MAX_SHORT_ZERO_RUN {
                symbols.push(Emitted {
                    symbol: short_zero,
                    extra_value: (run - MIN_SHORT_ZERO_RUN) as u32,
                    extra_bits: 3,
                });
            } else {
                symbols.push(Emitted {
                    symbol: long_zero,
                    extra_value: (run - MIN_LONG_ZERO_RUN) as u32,
                    extra_bits: 7,
                });
            }

            i += run;
        } else {
            symbols.push(Emitted {
                symbol: value as u16,
                extra_value: 0,
                extra_bits: 0,
            });
            i += 1;

            let mut repeat_count = 0;
            while i + repeat_count < combined.len()
                && combined[i + repeat_count] == value
                && repeat_count < MAX_LITERAL_REPEAT
            {
                repeat_count += 1;
            }

            if repeat_count >= MIN_LITERAL_REPEAT {
                symbols.push(Emitted {
                    symbol: repeat,
                    extra_value: (repeat_count - MIN_LITERAL_REPEAT) as u32,
                    extra_bits: 2,
                });
                i += repeat_count;
            }
        }
    }

    (cl_max, symbols)
}

/// Incremental decoder for the RLE stream: the caller reads one code-length
/// symbol (and its extra bits, if any) at a time from the bitstream via a
/// Huffman tree lookup, and feeds each `(symbol, extra_value)` pair here.
pub struct Decoder {
    cl_max: u8,
    prev_nonzero: Option<u8>,
    output: Vec<u8>,
}

impl Decoder {
    pub fn new(cl_max: u8) -> Self {
        Self {
            cl_max,
            prev_nonzero: None,
            output: Vec::with_capacity(COMBINED_LENGTH),
        }
    }

    pub fn push(&mut self, symbol: u16, extra_value: u32) -> Result<(), Error> {
        let (repeat, short_zero, long_zero) = special_symbols(self.cl_max);

        if symbol <= self.cl_max as u16 {
            let value = symbol as u8;
            self.output.push(value);
            if value != 0 {
                self.prev_nonzero = Some(value);
            }
        } else if symbol == repeat {
            let value = self.prev_nonzero.ok_or(Error::RepeatBeforeAnyLength)?;
            let count = extra_value as usize + MIN_LITERAL_REPEAT;
            self.output.extend(std::iter::repeat(value).take(count));
        } else if symbol == short_zero {
            let count = extra_value as usize + MIN_SHORT_ZERO_RUN;
            self.output.extend(std::iter::repeat(0).take(count));
        } else if symbol == long_zero {
            let count = extra_value as usize + MIN_LONG_ZERO_RUN;
            self.output.extend(std::iter::repeat(0).take(count));
        } else {
            return Err(Error::SymbolOutOfRange);
        }

        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.output.len() >= COMBINED_LENGTH
    }

    pub fn finish(self) -> Result<Vec<u8>, Error> {
        if self.output.len() != COMBINED_LENGTH {
            return Err(Error::WrongLength);
        }
        Ok(self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(combined: &[u8]) -> Vec<u8> {
        let (cl_max, symbols) = encode(combined);
        let mut decoder = Decoder::new(cl_max);
        for emitted in symbols {
            decoder.push(emitted.symbol, emitted.extra_value).unwrap();
        }
        decoder.finish().unwrap()
    }

    #[test]
    fn all_zero_roundtrips() {
        let combined = vec![0u8; COMBINED_LENGTH];
        assert_eq!(roundtrip(&combined), combined);
    }

    #[test]
    fn long_zero_run_is_collapsed() {
        // S5: a gap of 51 zero lengths should become one long-zero-run symbol.
        let mut combined = vec![4u8; COMBINED_LENGTH];
        for entry in combined.iter_mut().skip(50).take(51) {
            *entry = 0;
        }

        let (cl_max, symbols) = encode(&combined);
        let (_, _, long_zero) = special_symbols(cl_max);
        assert!(symbols.iter().any(|e| e.symbol == long_zero));

        let mut decoder = Decoder::new(cl_max);
        for emitted in symbols {
            decoder.push(emitted.symbol, emitted.extra_value).unwrap();
        }
        assert_eq!(decoder.finish().unwrap(), combined);
    }

    #[test]
    fn literal_repeat_is_collapsed() {
        let mut combined = vec![0u8; COMBINED_LENGTH];
        for entry in combined.iter_mut().take(5) {
            *entry = 7;
        }

        assert_eq!(roundtrip(&combined), combined);
    }

    #[test]
    fn repeat_before_any_length_is_rejected() {
        let cl_max = 5;
        let (repeat, _, _) = special_symbols(cl_max);
        let mut decoder = Decoder::new(cl_max);
        assert!(matches!(
            decoder.push(repeat, 0),
            Err(Error::RepeatBeforeAnyLength)
        ));
    }

    #[test]
    fn short_incomplete_stream_is_rejected() {
        let decoder = Decoder::new(5);
        assert!(matches!(decoder.finish(), Err(Error::WrongLength)));
    }
}
