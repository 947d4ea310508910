//! Purpose: Define a stable, structured schema for non-fatal stderr notices.
//! Exports: `Notice`, `notice_json`, `decode_notice`, `notice_time_now`.
//! Role: Shared contract helper for CLI diagnostics (malformed quoting and other non-error events).
//! Invariants: Notices are non-fatal and never alter stdout payloads or output files.
//! Invariants: JSON schema is stable once published; fields are additive-only.
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value, json};

use crate::core::table::LineIssue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: String,
    pub time: String,
    pub cmd: String,
    pub path: String,
    pub line: Option<u64>,
    pub column: Option<usize>,
    pub message: String,
    pub details: Map<String, Value>,
}

pub fn notice_json(notice: &Notice) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(notice.kind));
    inner.insert("time".to_string(), json!(notice.time));
    inner.insert("cmd".to_string(), json!(notice.cmd));
    inner.insert("path".to_string(), json!(notice.path));
    if let Some(line) = notice.line {
        inner.insert("line".to_string(), json!(line));
    }
    if let Some(column) = notice.column {
        inner.insert("column".to_string(), json!(column));
    }
    inner.insert("message".to_string(), json!(notice.message));
    inner.insert("details".to_string(), Value::Object(notice.details.clone()));

    let mut outer = Map::new();
    outer.insert("notice".to_string(), Value::Object(inner));
    Value::Object(outer)
}

/// Builds the notice reported for a quoting problem found by the decoder.
pub fn decode_notice(cmd: &str, path: &str, issue: &LineIssue) -> Notice {
    let mut details = Map::new();
    details.insert("offset".to_string(), json!(issue.issue.offset()));
    Notice {
        kind: issue.issue.kind().to_string(),
        time: notice_time_now().unwrap_or_default(),
        cmd: cmd.to_string(),
        path: path.to_string(),
        line: Some(issue.line),
        column: Some(issue.column),
        message: issue.issue.to_string(),
        details,
    }
}

pub fn notice_time_now() -> Option<String> {
    use time::format_description::well_known::Rfc3339;
    let duration = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
    let ts = time::OffsetDateTime::from_unix_timestamp_nanos(duration.as_nanos() as i128).ok()?;
    ts.format(&Rfc3339).ok()
}
