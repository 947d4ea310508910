//! Purpose: `colsplit` CLI entry point: split one delimited file into per-column files.
//! Role: Binary crate root; parses args, runs `command::run_split`, reports notices on stderr.
//! Invariants: Malformed quoting is reported per occurrence and never changes the exit code.
//! Invariants: Process exit code is derived from `to_exit_code` (1 for every fatal error).
use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueHint};
use coltools::args::normalize_args;
use coltools::command::{parse_separator, run_split};
use coltools::core::error::{Error, ErrorKind, to_exit_code};
use coltools::core::template::OutputTemplate;
use coltools::notice::decode_notice;
use coltools::report::{
    ColorMode, emit_error, emit_notice, init_tracing, is_informational, usage_error,
};

#[derive(Parser)]
#[command(
    name = "colsplit",
    version,
    about = "Split a delimited file into one file per column",
    long_about = None,
    after_help = r#"TEMPLATE must hold exactly one integer placeholder for the 0-based column
index: %d, %3d (space padded) or %03d (zero padded). Write %% for a literal %.
Every column file has one line per input line; short rows give empty lines.
Options go before SEPARATOR; everything from SEPARATOR on is taken literally.

EXAMPLES
  $ colsplit , table.csv 'col%d.txt'
  $ colsplit '::' table.txt 'out/%02d.txt'"#
)]
struct Cli {
    #[arg(long, value_enum, default_value_t = ColorMode::Auto, help = "Color stderr diagnostics")]
    color: ColorMode,
    #[arg(
        value_name = "SEPARATOR",
        help = "Field separator (any non-empty string, e.g. ',' or '::')"
    )]
    separator: OsString,
    #[arg(value_name = "INPUT", value_hint = ValueHint::FilePath, help = "Delimited input file")]
    input: PathBuf,
    #[arg(
        value_name = "TEMPLATE",
        value_hint = ValueHint::FilePath,
        help = "Output path template, e.g. 'col%d.txt'"
    )]
    template: OsString,
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
        Err(err) => return Err((usage_error(&err, "colsplit"), ColorMode::Auto)),
    };
    init_tracing();

    let color_mode = cli.color;
    let separator = parse_separator(cli.separator).map_err(|err| (err, color_mode))?;
    let template = OutputTemplate::from_os_string(cli.template).map_err(|err| (err, color_mode))?;
    let input_label = cli.input.display().to_string();

    run_split(&separator, &cli.input, &template, |issue| {
        emit_notice(&decode_notice("colsplit", &input_label, issue), color_mode);
    })
    .map_err(|err| (err, color_mode))?;
    Ok(0)
}
