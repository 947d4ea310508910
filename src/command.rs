//! Purpose: File-level drivers for `coljoin` and `colsplit`.
//! Exports: `parse_separator`, `read_input`, `run_join`, `run_split`, `SplitSummary`.
//! Role: Connects argument values to the core assemblers; keeps the binaries to parse/bootstrap.
//! Invariants: All inputs are fully read before any output is written.
//! Invariants: Every I/O error names the file it concerns; created column files are not removed on failure.
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use bstr::ByteVec;
use tracing::{debug, info};

use crate::core::error::{Error, ErrorKind};
use crate::core::separator::Separator;
use crate::core::sink::Sink;
use crate::core::table::{ColumnSource, JoinStats, LineIssue, SplitTable, join_columns};
use crate::core::template::OutputTemplate;

pub fn parse_separator(raw: OsString) -> Result<Separator, Error> {
    let bytes = Vec::<u8>::from_os_string(raw).map_err(|raw| {
        Error::new(ErrorKind::Usage).with_message(format!(
            "separator is not valid text: {}",
            raw.to_string_lossy()
        ))
    })?;
    Separator::new(bytes)
}

pub fn read_input(path: &Path) -> Result<Vec<u8>, Error> {
    let contents = fs::read(path).map_err(|err| {
        Error::from_io(err)
            .with_message("failed to read input")
            .with_path(path)
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "read input");
    Ok(contents)
}

/// Joins `inputs` column-wise and writes the delimited rows to `sink`.
pub fn run_join<S>(separator: &Separator, inputs: &[PathBuf], sink: &mut S) -> Result<JoinStats, Error>
where
    S: Sink + ?Sized,
{
    if inputs.is_empty() {
        return Err(Error::new(ErrorKind::Usage).with_message("at least one input file is required"));
    }

    let mut loaded = Vec::with_capacity(inputs.len());
    for path in inputs {
        loaded.push((path.display().to_string(), read_input(path)?));
    }
    let sources: Vec<ColumnSource<'_>> = loaded
        .iter()
        .map(|(name, contents)| ColumnSource {
            name,
            contents,
        })
        .collect();

    let stats = join_columns(&sources, separator, sink).map_err(|err| {
        Error::from_io(err).with_message("failed to write joined output")
    })?;
    info!(
        rows = stats.rows,
        columns = stats.columns,
        quoted = stats.quoted_fields,
        "joined columns"
    );
    Ok(stats)
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SplitSummary {
    pub rows: usize,
    pub outputs: Vec<PathBuf>,
    pub issues: usize,
}

/// Splits `input` into one file per column named by `template`.
/// Quoting problems go to `on_issue` and do not stop the run.
pub fn run_split<N>(
    separator: &Separator,
    input: &Path,
    template: &OutputTemplate,
    mut on_issue: N,
) -> Result<SplitSummary, Error>
where
    N: FnMut(&LineIssue),
{
    let contents = read_input(input)?;
    let mut issues = 0;
    let table = SplitTable::decode(&contents, separator, |issue| {
        issues += 1;
        debug!(
            path = %input.display(),
            line = issue.line,
            column = issue.column,
            "{}",
            issue.issue
        );
        on_issue(&issue);
    });

    let mut outputs = Vec::with_capacity(table.column_count());
    for column in 0..table.column_count() {
        let path = template.path_for(column)?;
        let file = File::create(&path).map_err(|err| {
            Error::from_io(err)
                .with_message("failed to create column file")
                .with_path(&path)
        })?;
        let mut writer = BufWriter::new(file);
        table.write_column(column, &mut writer).map_err(|err| {
            Error::from_io(err)
                .with_message("failed to write column file")
                .with_path(&path)
        })?;
        debug!(column, path = %path.display(), "wrote column");
        outputs.push(path);
    }

    info!(
        rows = table.row_count(),
        columns = outputs.len(),
        issues,
        "split columns"
    );
    Ok(SplitSummary {
        rows: table.row_count(),
        outputs,
        issues,
    })
}
