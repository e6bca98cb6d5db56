#![forbid(unsafe_code)]
#![allow(dead_code)]

use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

pub(crate) struct Bot {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    storage_dir: PathBuf,
}

impl Bot {
    pub(crate) fn start(test_name: &str) -> Self {
        Self::start_with_args(test_name, &[])
    }

    pub(crate) fn start_with_args(test_name: &str, extra_args: &[&str]) -> Self {
        let storage_dir = temp_dir(test_name);
        std::fs::create_dir_all(&storage_dir).expect("create storage dir");
        let mut child = Command::new(env!("CARGO_BIN_EXE_sb_bot"))
            .arg("--storage-dir")
            .arg(&storage_dir)
            .args(["--bot-username", "starshop_bot"])
            .args(extra_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .expect("spawn sb_bot");

        let stdin = child.stdin.take().expect("stdin");
        let stdout = BufReader::new(child.stdout.take().expect("stdout"));

        Self {
            child,
            stdin,
            stdout,
            storage_dir,
        }
    }

    pub(crate) fn storage_dir(&self) -> &PathBuf {
        &self.storage_dir
    }

    pub(crate) fn request(&mut self, req: Value) -> Value {
        self.send_raw(&serde_json::to_string(&req).expect("serialize request"))
    }

    pub(crate) fn send_raw(&mut self, line: &str) -> Value {
        writeln!(self.stdin, "{line}").expect("write request");
        self.stdin.flush().expect("flush request");
        let mut resp = String::new();
        self.stdout.read_line(&mut resp).expect("read response");
        serde_json::from_str(&resp).expect("parse response")
    }

    pub(crate) fn start_cmd(&mut self, user_id: i64, referrer: Option<&str>) -> Value {
        let mut req = json!({ "user_id": user_id, "action": "start" });
        if let Some(referrer) = referrer {
            req["referrer"] = Value::String(referrer.to_string());
        }
        self.request(req)
    }

    pub(crate) fn text(&mut self, user_id: i64, text: &str) -> Value {
        self.request(json!({ "user_id": user_id, "action": "text", "text": text }))
    }

    pub(crate) fn callback(&mut self, user_id: i64, data: &str) -> Value {
        self.request(json!({ "user_id": user_id, "action": "callback", "data": data }))
    }

    pub(crate) fn stats(&mut self, user_id: i64) -> Value {
        self.request(json!({ "user_id": user_id, "action": "stats" }))
    }

    pub(crate) fn session_log(&self) -> String {
        std::fs::read_to_string(self.storage_dir.join("starshop_last_session.txt"))
            .unwrap_or_default()
    }
}

impl Drop for Bot {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = std::fs::remove_dir_all(&self.storage_dir);
    }
}

pub(crate) fn temp_dir(test_name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    std::env::temp_dir().join(format!("sb_bot_{test_name}_{nanos}"))
}

pub(crate) fn replies(resp: &Value) -> Vec<Value> {
    assert_eq!(resp["ok"], true, "response not ok: {resp}");
    resp["replies"].as_array().expect("replies array").clone()
}

pub(crate) fn single_reply(resp: &Value) -> Value {
    let all = replies(resp);
    assert_eq!(all.len(), 1, "expected exactly one reply: {resp}");
    all[0].clone()
}

pub(crate) fn reply_text(reply: &Value) -> String {
    reply["text"].as_str().expect("reply text").to_string()
}

/// Callback `data` strings per keyboard row.
pub(crate) fn button_grid(reply: &Value) -> Vec<Vec<String>> {
    reply["buttons"]
        .as_array()
        .expect("buttons array")
        .iter()
        .map(|row| {
            row.as_array()
                .expect("button row")
                .iter()
                .map(|b| b["data"].as_str().expect("button data").to_string())
                .collect()
        })
        .collect()
}
