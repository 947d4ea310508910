//! Purpose: Shared library crate behind the `coljoin` and `colsplit` binaries.
//! Exports: `core` (field codec, row assembly, templates, errors), `args`, `command`, `notice`, `report`.
//! Role: Keeps the codec and assemblers testable without a process environment.
//! Invariants: Core modules take explicit separators, inputs, and sinks; no hidden global state.
//! Invariants: Only the binaries touch process exit codes.
pub mod args;
pub mod command;
pub mod core;
pub mod notice;
pub mod report;
