//! Purpose: Row assembly for both directions: transpose column files into rows, and rows back into columns.
//! Exports: `split_lines`, `ColumnSource`, `JoinStats`, `join_columns`, `SplitTable`, `LineIssue`.
//! Role: Pure table logic over in-memory buffers; file handling lives in `command`.
//! Invariants: Lines are `\n`-terminated; a final empty element is not a line.
//! Invariants: Joined rows carry exactly one field per source, empty where a source ran out.
//! Invariants: Every column output has exactly one line per input line.
use std::io;

use tracing::debug;

use crate::core::field::{needs_escape, write_field};
use crate::core::line::{DecodeIssue, Row, decode_row};
use crate::core::separator::Separator;
use crate::core::sink::{LINE_FEED, Sink};

/// Splits a buffer on line feeds, treating the line feed as a terminator.
pub fn split_lines(contents: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = contents.split(|byte| *byte == LINE_FEED).collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines
}

/// One single-column input for the join direction.
#[derive(Clone, Copy, Debug)]
pub struct ColumnSource<'a> {
    pub name: &'a str,
    pub contents: &'a [u8],
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct JoinStats {
    pub rows: usize,
    pub columns: usize,
    pub quoted_fields: usize,
}

/// Writes the transposed table of `sources` to `sink`, one encoded row per line.
pub fn join_columns<S>(
    sources: &[ColumnSource<'_>],
    separator: &Separator,
    sink: &mut S,
) -> io::Result<JoinStats>
where
    S: Sink + ?Sized,
{
    let columns: Vec<Vec<&[u8]>> = sources
        .iter()
        .map(|source| {
            let lines = split_lines(source.contents);
            debug!(source = source.name, lines = lines.len(), "loaded column");
            lines
        })
        .collect();
    let rows = columns.iter().map(Vec::len).max().unwrap_or(0);

    let mut stats = JoinStats {
        rows,
        columns: columns.len(),
        quoted_fields: 0,
    };
    for index in 0..rows {
        for (column, lines) in columns.iter().enumerate() {
            if column > 0 {
                sink.write_bytes(separator.as_bytes())?;
            }
            let field = lines.get(index).copied().unwrap_or_default();
            if needs_escape(field, separator) {
                stats.quoted_fields += 1;
            }
            write_field(sink, field, separator)?;
        }
        sink.write_bytes(&[LINE_FEED])?;
    }
    sink.finish()?;
    Ok(stats)
}

/// Quoting problem tied to its position in the input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LineIssue {
    /// 1-based line number.
    pub line: u64,
    /// 1-based column number.
    pub column: usize,
    pub issue: DecodeIssue,
}

/// Decoded rows of the split direction.
#[derive(Debug)]
pub struct SplitTable<'a> {
    rows: Vec<Row<'a>>,
    columns: usize,
}

impl<'a> SplitTable<'a> {
    /// Decodes every line of `contents`; quoting problems go to `on_issue` and decoding continues.
    pub fn decode<F>(contents: &'a [u8], separator: &Separator, mut on_issue: F) -> Self
    where
        F: FnMut(LineIssue),
    {
        let mut rows = Vec::new();
        let mut columns = 0;
        for (index, line) in split_lines(contents).into_iter().enumerate() {
            let row = decode_row(line, separator, |column, issue| {
                on_issue(LineIssue {
                    line: index as u64 + 1,
                    column: column + 1,
                    issue,
                })
            });
            columns = columns.max(row.len());
            rows.push(row);
        }
        Self { rows, columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Writes column `column` to `sink`: one line per row, empty where the row is short.
    pub fn write_column<S>(&self, column: usize, sink: &mut S) -> io::Result<()>
    where
        S: Sink + ?Sized,
    {
        for row in &self.rows {
            match row.get(column) {
                Some(field) => sink.write_line(field)?,
                None => sink.write_line(&[])?,
            }
        }
        sink.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnSource, JoinStats, SplitTable, join_columns, split_lines};
    use crate::core::line::DecodeIssue;
    use crate::core::separator::Separator;

    fn sep(value: &str) -> Separator {
        Separator::new(value).unwrap()
    }

    fn join(sources: &[(&str, &str)], separator: &str) -> (Vec<u8>, JoinStats) {
        let sources: Vec<ColumnSource<'_>> = sources
            .iter()
            .map(|&(name, contents)| ColumnSource {
                name,
                contents: contents.as_bytes(),
            })
            .collect();
        let mut out = Vec::new();
        let stats = join_columns(&sources, &sep(separator), &mut out).unwrap();
        (out, stats)
    }

    fn column(table: &SplitTable<'_>, index: usize) -> Vec<u8> {
        let mut out = Vec::new();
        table.write_column(index, &mut out).unwrap();
        out
    }

    #[test]
    fn split_lines_treats_line_feed_as_terminator() {
        assert_eq!(split_lines(b"a\nb\n"), vec![&b"a"[..], &b"b"[..]]);
        assert_eq!(split_lines(b"a\nb"), vec![&b"a"[..], &b"b"[..]]);
        assert_eq!(split_lines(b"a\n\n"), vec![&b"a"[..], &b""[..]]);
        assert!(split_lines(b"").is_empty());
    }

    #[test]
    fn join_pads_shorter_leading_columns() {
        let (out, stats) = join(&[("a", "1\n2\n"), ("b", "a\nb\nc\n")], ",");
        assert_eq!(out, b"1,a\n2,b\n,c\n");
        assert_eq!(
            stats,
            JoinStats {
                rows: 3,
                columns: 2,
                quoted_fields: 0
            }
        );
    }

    #[test]
    fn join_pads_shorter_trailing_columns() {
        let (out, _) = join(&[("a", "1\n2\n3\n"), ("b", "a\n")], ",");
        assert_eq!(out, b"1,a\n2,\n3,\n");
    }

    #[test]
    fn join_quotes_ambiguous_fields() {
        let (out, stats) = join(&[("a", "x::y\nplain\n"), ("b", "say \"hi\"\nz\n")], "::");
        assert_eq!(out, b"\"x::y\"::\"say \"\"hi\"\"\"\nplain::z\n");
        assert_eq!(stats.quoted_fields, 2);
    }

    #[test]
    fn join_of_empty_inputs_writes_nothing() {
        let (out, stats) = join(&[("a", ""), ("b", "")], ",");
        assert!(out.is_empty());
        assert_eq!(stats.rows, 0);
    }

    #[test]
    fn split_writes_one_line_per_row_per_column() {
        let table = SplitTable::decode(b"1,a\n2,b\n,c\n", &sep(","), |issue| {
            panic!("unexpected issue {issue:?}")
        });
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 3);
        assert_eq!(column(&table, 0), b"1\n2\n\n");
        assert_eq!(column(&table, 1), b"a\nb\nc\n");
    }

    #[test]
    fn split_pads_short_rows_with_empty_lines() {
        let table = SplitTable::decode(b"a,b,c\n\nd\n", &sep(","), |_| {});
        assert_eq!(table.column_count(), 3);
        assert_eq!(column(&table, 0), b"a\n\nd\n");
        assert_eq!(column(&table, 2), b"c\n\n\n");
    }

    #[test]
    fn split_reports_issues_with_position_and_continues() {
        let mut issues = Vec::new();
        let table = SplitTable::decode(b"ok,fine\n\"bad\"x,y\nz,\"open\n", &sep(","), |issue| {
            issues.push(issue)
        });
        assert_eq!(issues.len(), 2);
        assert_eq!((issues[0].line, issues[0].column), (2, 1));
        assert_eq!(issues[0].issue, DecodeIssue::TrailingBytes { offset: 5, len: 1 });
        assert_eq!((issues[1].line, issues[1].column), (3, 2));
        assert_eq!(issues[1].issue, DecodeIssue::UnterminatedQuote { offset: 2 });
        assert_eq!(column(&table, 0), b"ok\nbadx\nz\n");
        assert_eq!(column(&table, 1), b"fine\ny\nopen\n");
    }

    #[test]
    fn join_then_split_restores_columns() {
        let a = "1\n\"quoted\"\nx,y\n";
        let b = "alpha\nbeta\ngamma\n";
        let (joined, _) = join(&[("a", a), ("b", b)], ",");
        let table = SplitTable::decode(&joined, &sep(","), |issue| {
            panic!("unexpected issue {issue:?}")
        });
        assert_eq!(column(&table, 0), a.as_bytes());
        assert_eq!(column(&table, 1), b.as_bytes());
    }
}
