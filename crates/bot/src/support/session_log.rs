#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

/// Bounded per-process session record, written to the storage dir.
///
/// Stdout carries the wire protocol, so diagnostics go to a small file that
/// is rewritten in place instead of a growing log. Unauthorized admin
/// attempts and swallowed storage errors all land here.
#[derive(Clone, Debug)]
pub(crate) struct SessionLog {
    path: PathBuf,
    start_rfc3339: String,
    pid: u32,
    actions_handled: u64,
    last_action: Option<String>,
    last_error: Option<String>,
    exit: Option<String>,
}

impl SessionLog {
    pub(crate) fn new(storage_dir: &Path) -> Self {
        let this = Self {
            path: storage_dir.join("starshop_last_session.txt"),
            start_rfc3339: crate::ts_ms_to_rfc3339(crate::now_ms_i64()),
            pid: std::process::id(),
            actions_handled: 0,
            last_action: None,
            last_error: None,
            exit: None,
        };
        this.flush();
        this
    }

    pub(crate) fn note_action(&mut self, action: &str) {
        let action = action.trim();
        if action.is_empty() {
            return;
        }
        self.actions_handled += 1;
        self.last_action = Some(truncate(action, 96));
        self.flush();
    }

    pub(crate) fn note_error(&mut self, error: &str) {
        let error = error.trim();
        if error.is_empty() {
            return;
        }
        self.last_error = Some(truncate(error, 300));
        self.flush();
    }

    pub(crate) fn note_exit(&mut self, reason: &str) {
        self.exit = Some(truncate(reason.trim(), 120));
        self.flush();
    }

    fn flush(&self) {
        let Some(dir) = self.path.parent() else {
            return;
        };
        let _ = std::fs::create_dir_all(dir);

        let mut out = String::new();
        push_kv(&mut out, "ts_start", &self.start_rfc3339);
        push_kv(&mut out, "pid", &self.pid.to_string());
        push_kv(&mut out, "actions_handled", &self.actions_handled.to_string());
        if let Some(action) = &self.last_action {
            push_kv(&mut out, "last_action", action);
        }
        if let Some(err) = &self.last_error {
            push_kv(&mut out, "last_error", err);
        }
        if let Some(exit) = &self.exit {
            push_kv(&mut out, "exit", exit);
        }

        let _ = std::fs::write(&self.path, out);
    }
}

fn push_kv(out: &mut String, key: &str, value: &str) {
    use std::fmt::Write as _;
    let _ = writeln!(out, "{key}={value}");
}

fn truncate(value: &str, max_chars: usize) -> String {
    let mut out = String::new();
    for (idx, ch) in value.chars().enumerate() {
        if idx >= max_chars {
            break;
        }
        out.push(ch);
    }
    out
}
