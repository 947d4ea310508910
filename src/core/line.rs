//! Purpose: Tokenize one delimited line into fields, undoing quote escaping.
//! Exports: `head`, `head_with`, `split_line`, `decode_row`, `Head`, `Decoded`, `Fields`, `Row`, `DecodeIssue`.
//! Role: Split-direction half of the field codec; inverse of `core::field`.
//! Invariants: Unquoted fields borrow from the line; only quoted fields allocate.
//! Invariants: Quoted content is scanned one code point at a time through `CodePointCodec`.
//! Invariants: Malformed quoting yields a `DecodeIssue` alongside a best-effort field, never a panic.
//! Invariants: An empty line has zero fields; a trailing separator adds no empty field.
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

use crate::core::codec::{CodePoint, CodePointCodec, Utf8Codec};
use crate::core::field::QUOTE;
use crate::core::separator::Separator;

pub type Row<'a> = Vec<Cow<'a, [u8]>>;

/// Recoverable quoting problem found while decoding a line.
/// Offsets are byte positions within the decoded line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodeIssue {
    /// A closing quote was followed by bytes other than the separator.
    /// The stray bytes are kept at the end of the field.
    TrailingBytes { offset: usize, len: usize },
    /// The line ended inside a quoted field opened at `offset`.
    UnterminatedQuote { offset: usize },
}

impl DecodeIssue {
    pub fn offset(&self) -> usize {
        match self {
            DecodeIssue::TrailingBytes { offset, .. } => *offset,
            DecodeIssue::UnterminatedQuote { offset } => *offset,
        }
    }

    /// Short stable label used in notices.
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeIssue::TrailingBytes { .. } => "trailing_bytes",
            DecodeIssue::UnterminatedQuote { .. } => "unterminated_quote",
        }
    }

    fn shifted(self, base: usize) -> Self {
        match self {
            DecodeIssue::TrailingBytes { offset, len } => DecodeIssue::TrailingBytes {
                offset: offset + base,
                len,
            },
            DecodeIssue::UnterminatedQuote { offset } => DecodeIssue::UnterminatedQuote {
                offset: offset + base,
            },
        }
    }
}

impl fmt::Display for DecodeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeIssue::TrailingBytes { offset, len } => write!(
                f,
                "closing quote is followed by {len} byte(s) before the separator (byte {offset})"
            ),
            DecodeIssue::UnterminatedQuote { offset } => {
                write!(f, "quoted field opened at byte {offset} is never closed")
            }
        }
    }
}

impl StdError for DecodeIssue {}

/// Result of consuming the first field of a line.
#[derive(Debug)]
pub struct Head<'a> {
    pub field: Cow<'a, [u8]>,
    /// Unconsumed input after the field and its separator.
    pub rest: &'a [u8],
    pub issue: Option<DecodeIssue>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    Unquoted,
    InQuotedField,
}

pub fn head<'a>(line: &'a [u8], separator: &Separator) -> Head<'a> {
    head_with(line, separator, &Utf8Codec)
}

pub fn head_with<'a, C>(line: &'a [u8], separator: &Separator, codec: &C) -> Head<'a>
where
    C: CodePointCodec + ?Sized,
{
    if line.first() == Some(&QUOTE) {
        return quoted_head(line, separator, codec);
    }

    match separator.find_in(line) {
        Some(idx) => Head {
            field: Cow::Borrowed(&line[..idx]),
            rest: &line[idx + separator.len()..],
            issue: None,
        },
        None => Head {
            field: Cow::Borrowed(line),
            rest: &[],
            issue: None,
        },
    }
}

fn quoted_head<'a, C>(line: &'a [u8], separator: &Separator, codec: &C) -> Head<'a>
where
    C: CodePointCodec + ?Sized,
{
    // line[0] is the opening quote.
    let mut pos = 1;
    let mut field = Vec::new();
    let mut state = State::InQuotedField;

    while state == State::InQuotedField {
        let Some((code_point, width)) = codec.decode(&line[pos..]) else {
            field.shrink_to_fit();
            return Head {
                field: Cow::Owned(field),
                rest: &[],
                issue: Some(DecodeIssue::UnterminatedQuote { offset: 0 }),
            };
        };
        pos += width;

        if code_point == CodePoint::Scalar(QUOTE as char) {
            if line.get(pos) == Some(&QUOTE) {
                field.push(QUOTE);
                pos += 1;
            } else {
                state = State::Unquoted;
            }
        } else {
            codec.encode(code_point, &mut field);
        }
    }

    let rest = &line[pos..];
    if rest.is_empty() || separator.is_prefix_of(rest) {
        field.shrink_to_fit();
    }
    if rest.is_empty() {
        return Head {
            field: Cow::Owned(field),
            rest,
            issue: None,
        };
    }
    if separator.is_prefix_of(rest) {
        return Head {
            field: Cow::Owned(field),
            rest: &rest[separator.len()..],
            issue: None,
        };
    }

    let (stray, after) = match separator.find_in(rest) {
        Some(idx) => (&rest[..idx], &rest[idx + separator.len()..]),
        None => (rest, &rest[rest.len()..]),
    };
    field.extend_from_slice(stray);
    field.shrink_to_fit();
    Head {
        field: Cow::Owned(field),
        rest: after,
        issue: Some(DecodeIssue::TrailingBytes {
            offset: pos,
            len: stray.len(),
        }),
    }
}

/// One decoded field plus any quoting problem met while reading it.
#[derive(Debug)]
pub struct Decoded<'a> {
    pub field: Cow<'a, [u8]>,
    pub issue: Option<DecodeIssue>,
}

/// Lazy field iterator over a single line.
#[derive(Clone, Debug)]
pub struct Fields<'a, 's> {
    rest: &'a [u8],
    offset: usize,
    separator: &'s Separator,
}

impl<'a> Iterator for Fields<'a, '_> {
    type Item = Decoded<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let head = head(self.rest, self.separator);
        let consumed = self.rest.len() - head.rest.len();
        let issue = head.issue.map(|issue| issue.shifted(self.offset));
        self.offset += consumed;
        self.rest = head.rest;
        Some(Decoded {
            field: head.field,
            issue,
        })
    }
}

pub fn split_line<'a, 's>(line: &'a [u8], separator: &'s Separator) -> Fields<'a, 's> {
    Fields {
        rest: line,
        offset: 0,
        separator,
    }
}

/// Decodes a full line, handing each issue to `on_issue` with its 0-based column.
pub fn decode_row<'a, F>(line: &'a [u8], separator: &Separator, mut on_issue: F) -> Row<'a>
where
    F: FnMut(usize, DecodeIssue),
{
    let mut row = Vec::new();
    for (column, decoded) in split_line(line, separator).enumerate() {
        if let Some(issue) = decoded.issue {
            on_issue(column, issue);
        }
        row.push(decoded.field);
    }
    row
}
