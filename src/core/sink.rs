// Output sink seam shared by the join and split assemblers.
use std::io::{self, Write};

pub const LINE_FEED: u8 = b'\n';

/// Destination for encoded rows and column values.
pub trait Sink {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Writes `bytes` followed by a line feed.
    fn write_line(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_bytes(bytes)?;
        self.write_bytes(&[LINE_FEED])
    }

    /// Flushes buffered output; called once after the last write.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<W: Write + ?Sized> Sink for W {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::Sink;

    #[test]
    fn write_line_appends_terminator() {
        let mut out = Vec::new();
        out.write_bytes(b"a,").unwrap();
        out.write_line(b"b").unwrap();
        out.write_line(b"").unwrap();
        assert_eq!(out, b"a,b\n\n");
    }
}
