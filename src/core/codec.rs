//! Purpose: Decode and re-encode one code point at a time for the quoted-field scanner.
//! Exports: `CodePoint`, `CodePointCodec`, `Utf8Codec`.
//! Role: Keeps the decoder byte-oriented; text encoding lives only here.
//! Invariants: `encode(decode(bytes))` reproduces the consumed bytes exactly, valid or not.
//! Invariants: `decode` consumes at least one byte of non-empty input.
use bstr::decode_utf8;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CodePoint<'a> {
    Scalar(char),
    /// Bytes that do not form a valid sequence, carried through untouched.
    Invalid(&'a [u8]),
}

pub trait CodePointCodec {
    /// Decodes the code point at the front of `bytes` and its width in bytes.
    /// Returns `None` for empty input.
    fn decode<'a>(&self, bytes: &'a [u8]) -> Option<(CodePoint<'a>, usize)>;

    fn encode(&self, code_point: CodePoint<'_>, out: &mut Vec<u8>);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Utf8Codec;

impl CodePointCodec for Utf8Codec {
    fn decode<'a>(&self, bytes: &'a [u8]) -> Option<(CodePoint<'a>, usize)> {
        if bytes.is_empty() {
            return None;
        }
        match decode_utf8(bytes) {
            (Some(ch), width) => Some((CodePoint::Scalar(ch), width)),
            (None, width) => {
                let width = width.max(1);
                Some((CodePoint::Invalid(&bytes[..width]), width))
            }
        }
    }

    fn encode(&self, code_point: CodePoint<'_>, out: &mut Vec<u8>) {
        match code_point {
            CodePoint::Scalar(ch) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
            }
            CodePoint::Invalid(raw) => out.extend_from_slice(raw),
        }
    }
}
