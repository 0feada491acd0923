//! Top-level error types returned by [`crate::encode`] and [`crate::decode`].
//! Each variant corresponds to one row of the format's error taxonomy;
//! lower-level errors are folded in via `From` rather than re-stated.

use error_derive::Error;

use crate::{bitio, code_lengths, header, huffman};

#[derive(Clone, Copy, Debug, Error)]
pub enum EncodeError {
    #[msg = "input is longer than this format's 32-bit size field can express"]
    InputTooLarge,
    #[msg = "a huffman code length exceeded this format's 115-bit cap"]
    CodeLengthOverflow,
}

#[derive(Clone, Copy, Debug, Error)]
pub enum DecodeError {
    #[msg = "header magic bytes did not match 'DEFc'"]
    WrongHeader,
    #[msg = "bitstream ended before decoding finished"]
    TruncatedInput,
    #[msg = "combined code-length vector was malformed"]
    BadCodeLengths,
    #[msg = "decoded symbol fell outside its alphabet"]
    UnexpectedSymbol,
    #[msg = "decoder produced more bytes than the header declared"]
    OutputOverflow,
}

impl From<header::Error> for DecodeError {
    fn from(value: header::Error) -> Self {
        match value {
            header::Error::WrongMagic => {
                log::warn!("header magic bytes did not match 'DEFc'");
                Self::WrongHeader
            },
            header::Error::TruncatedHeader => {
                log::warn!("input shorter than the fixed header prefix");
                Self::TruncatedInput
            },
            header::Error::BitReader(_) => {
                log::warn!("bit reader ran out of input while reading the header");
                Self::TruncatedInput
            },
        }
    }
}

impl From<bitio::Error> for DecodeError {
    fn from(error: bitio::Error) -> Self {
        log::warn!("bit reader ran out of input: {error}");
        Self::TruncatedInput
    }
}

impl From<huffman::Error> for DecodeError {
    fn from(error: huffman::Error) -> Self {
        log::warn!("huffman decode failed: {error}");
        Self::TruncatedInput
    }
}

impl From<code_lengths::Error> for DecodeError {
    fn from(error: code_lengths::Error) -> Self {
        log::warn!("code-length RLE stream was malformed: {error}");
        Self::BadCodeLengths
    }
}
