// Field separator: a non-empty byte sequence matched exactly.
use std::fmt;

use bstr::{BStr, ByteSlice};

use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Separator(Vec<u8>);

impl Separator {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, Error> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(Error::new(ErrorKind::Usage)
                .with_message("separator must not be empty")
                .with_hint("Pass at least one byte, e.g. ',' or '::'."));
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Byte offset of the first occurrence of the separator in `haystack`.
    pub fn find_in(&self, haystack: &[u8]) -> Option<usize> {
        haystack.find(&self.0)
    }

    pub fn is_prefix_of(&self, haystack: &[u8]) -> bool {
        haystack.starts_with(&self.0)
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", BStr::new(&self.0))
    }
}
