//! Purpose: Pre-process raw argv so the separator position accepts any string, `--` included.
//! Exports: `normalize_args`.
//! Role: Runs before clap in both binaries.
//! Invariants: Options are only recognized before the separator.
//! Invariants: From the separator on, every argument is positional (an explicit `--` is inserted).
//! Invariants: `-- --` at the separator position is left alone; clap reads it as separator `--`.
use std::ffi::{OsStr, OsString};

const END_OF_OPTIONS: &str = "--";
const FLAGS: [&str; 4] = ["-h", "--help", "-V", "--version"];
const VALUE_OPTIONS: [&str; 1] = ["--color"];

fn is_flag(arg: &OsStr) -> bool {
    FLAGS.iter().any(|flag| arg == *flag)
}

fn is_value_option(arg: &OsStr) -> bool {
    VALUE_OPTIONS.iter().any(|option| arg == *option)
}

fn is_inline_value_option(arg: &OsStr) -> bool {
    arg.to_str().is_some_and(|text| {
        VALUE_OPTIONS
            .iter()
            .any(|option| text.strip_prefix(option).is_some_and(|rest| rest.starts_with('=')))
    })
}

pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().collect();
    let mut pos = 1;
    while pos < args.len() {
        let arg = args[pos].as_os_str();
        if is_value_option(arg) {
            pos += 2;
        } else if is_flag(arg) || is_inline_value_option(arg) {
            pos += 1;
        } else {
            break;
        }
    }
    if pos >= args.len() {
        return args;
    }

    let escaped = args[pos] == END_OF_OPTIONS
        && args.get(pos + 1).is_some_and(|next| next == END_OF_OPTIONS);
    if !escaped {
        args.insert(pos, OsString::from(END_OF_OPTIONS));
    }
    args
}
