//! Purpose: Encode single fields for delimited output.
//! Exports: `QUOTE`, `needs_escape`, `escape`, `encode_field`, `write_field`.
//! Role: Join-direction half of the field codec; inverse of `core::line`.
//! Invariants: A field holding the separator or a quote is always quoted.
//! Invariants: Quotes are escaped by doubling; no other byte is ever rewritten.
use std::borrow::Cow;
use std::io;

use crate::core::separator::Separator;
use crate::core::sink::Sink;

pub const QUOTE: u8 = b'"';

pub fn needs_escape(field: &[u8], separator: &Separator) -> bool {
    field.contains(&QUOTE) || separator.find_in(field).is_some()
}

/// Wraps `field` in quotes, doubling every embedded quote.
pub fn escape(field: &[u8]) -> Vec<u8> {
    let quotes = field.iter().filter(|&&byte| byte == QUOTE).count();
    let mut out = Vec::with_capacity(field.len() + quotes + 2);
    out.push(QUOTE);
    for &byte in field {
        if byte == QUOTE {
            out.push(QUOTE);
        }
        out.push(byte);
    }
    out.push(QUOTE);
    out
}

pub fn encode_field<'a>(field: &'a [u8], separator: &Separator) -> Cow<'a, [u8]> {
    if needs_escape(field, separator) {
        Cow::Owned(escape(field))
    } else {
        Cow::Borrowed(field)
    }
}

pub fn write_field<S: Sink + ?Sized>(
    sink: &mut S,
    field: &[u8],
    separator: &Separator,
) -> io::Result<()> {
    sink.write_bytes(&encode_field(field, separator))
}
