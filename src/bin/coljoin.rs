//! Purpose: `coljoin` CLI entry point: zip single-column files into one delimited stream.
//! Role: Binary crate root; parses args, runs `command::run_join`, writes rows to stdout.
//! Invariants: stdout carries only joined rows; errors go to stderr.
//! Invariants: Process exit code is derived from `to_exit_code` (1 for every fatal error).
use std::ffi::OsString;
use std::io::{self, BufWriter};
use std::path::PathBuf;

use clap::{Parser, ValueHint};
use coltools::args::normalize_args;
use coltools::command::{parse_separator, run_join};
use coltools::core::error::{Error, ErrorKind, to_exit_code};
use coltools::report::{ColorMode, emit_error, init_tracing, is_informational, usage_error};

#[derive(Parser)]
#[command(
    name = "coljoin",
    version,
    about = "Join single-column files into one delimited file",
    long_about = None,
    after_help = r#"Line N of every input becomes field N of output row N. Inputs with fewer
lines contribute empty fields. Fields containing the separator or a double
quote are quoted, with embedded quotes doubled.

Options go before SEPARATOR; everything from SEPARATOR on is taken literally,
so `coljoin -- a.txt b.txt` joins with the separator `--`.

EXAMPLES
  $ coljoin , ids.txt names.txt > table.csv
  $ coljoin '::' a.txt b.txt c.txt"#
)]
struct Cli {
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, help = "Color stderr diagnostics")]
    color: ColorMode,
    #[arg(
        value_name = "SEPARATOR",
        help = "Field separator (any non-empty string, e.g. ',' or '::')"
    )]
    separator: OsString,
    #[arg(
        value_name = "INPUT",
        required = true,
        num_args = 1..,
        value_hint = ValueHint::FilePath,
        help = "Input files, one column each, in output order"
    )]
    inputs: Vec<PathBuf>,
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<i32, (Error, ColorMode)> {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) if is_informational(&err) => {
            err.print().map_err(|io_err| {
                (
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err),
                    ColorMode::Auto,
                )
            })?;
            return Ok(0);
        }
        Err(err) => return Err((usage_error(&err, "coljoin"), ColorMode::Auto)),
    };
    init_tracing();

    let color_mode = cli.color;
    let separator = parse_separator(cli.separator).map_err(|err| (err, color_mode))?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run_join(&separator, &cli.inputs, &mut out).map_err(|err| (err, color_mode))?;
    Ok(0)
}
