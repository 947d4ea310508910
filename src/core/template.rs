//! Purpose: Parse and instantiate printf-style output path templates for column files.
//! Exports: `OutputTemplate`.
//! Role: Turns `cols/%03d.txt` into one path per column index.
//! Invariants: A template holds exactly one integer placeholder (`%d`, `%Nd`, `%0Nd`).
//! Invariants: `%%` is a literal percent; any other directive is rejected up front.
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use bstr::{BStr, ByteSlice, ByteVec};

use crate::core::error::{Error, ErrorKind};

const PERCENT: u8 = b'%';

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
struct IndexFormat {
    width: usize,
    zero_pad: bool,
}

impl IndexFormat {
    fn render(&self, index: usize, out: &mut Vec<u8>) {
        let text = if self.zero_pad {
            format!("{index:0width$}", width = self.width)
        } else {
            format!("{index:>width$}", width = self.width)
        };
        out.extend_from_slice(text.as_bytes());
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputTemplate {
    prefix: Vec<u8>,
    index: IndexFormat,
    suffix: Vec<u8>,
}

impl OutputTemplate {
    pub fn parse(template: &[u8]) -> Result<Self, Error> {
        let mut prefix = Vec::new();
        let mut suffix = Vec::new();
        let mut index = None;
        let mut pos = 0;

        while pos < template.len() {
            let byte = template[pos];
            pos += 1;
            let out = if index.is_some() { &mut suffix } else { &mut prefix };
            if byte != PERCENT {
                out.push(byte);
                continue;
            }
            if template.get(pos) == Some(&PERCENT) {
                out.push(PERCENT);
                pos += 1;
                continue;
            }

            let (format, next) = parse_directive(template, pos)?;
            if index.is_some() {
                return Err(template_error(template, "more than one column placeholder"));
            }
            index = Some(format);
            pos = next;
        }

        let Some(index) = index else {
            return Err(template_error(template, "missing column placeholder"));
        };
        Ok(Self {
            prefix,
            index,
            suffix,
        })
    }

    pub fn from_os_string(template: OsString) -> Result<Self, Error> {
        let bytes = Vec::<u8>::from_os_string(template).map_err(|raw| {
            Error::new(ErrorKind::Usage)
                .with_message(format!(
                    "output template is not valid text: {}",
                    raw.to_string_lossy()
                ))
        })?;
        Self::parse(&bytes)
    }

    pub fn render(&self, column: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.prefix.len() + self.suffix.len() + 8);
        out.extend_from_slice(&self.prefix);
        self.index.render(column, &mut out);
        out.extend_from_slice(&self.suffix);
        out
    }

    pub fn path_for(&self, column: usize) -> Result<PathBuf, Error> {
        let raw = self.render(column);
        raw.to_path().map(Path::to_path_buf).map_err(|_| {
            Error::new(ErrorKind::Usage).with_message(format!(
                "output path for column {column} is not representable: {}",
                BStr::new(&raw)
            ))
        })
    }
}

/// Parses the directive after a `%` at `pos`; returns the format and the next position.
fn parse_directive(template: &[u8], mut pos: usize) -> Result<(IndexFormat, usize), Error> {
    let mut format = IndexFormat::default();
    if template.get(pos) == Some(&b'0') {
        format.zero_pad = true;
        pos += 1;
    }
    while let Some(digit) = template.get(pos).filter(|byte| byte.is_ascii_digit()) {
        format.width = format
            .width
            .checked_mul(10)
            .and_then(|width| width.checked_add(usize::from(digit - b'0')))
            .filter(|width| *width <= 64)
            .ok_or_else(|| template_error(template, "placeholder width is too large"))?;
        pos += 1;
    }
    match template.get(pos) {
        Some(b'd') => Ok((format, pos + 1)),
        Some(other) => Err(template_error(
            template,
            &format!("unsupported directive '%{}'", char::from(*other)),
        )),
        None => Err(template_error(template, "template ends inside a directive")),
    }
}

fn template_error(template: &[u8], reason: &str) -> Error {
    Error::new(ErrorKind::Usage)
        .with_message(format!("invalid output template '{}': {reason}", BStr::new(template)))
        .with_hint("Use exactly one integer placeholder such as %d or %03d (write %% for '%').")
}
