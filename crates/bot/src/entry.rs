#![forbid(unsafe_code)]

use crate::engine::Engine;
use crate::protocol::{self, InboundRequest};
use sb_core::ids::UserId;
use serde_json::Value;
use std::io::{BufRead, Write};

/// Newline-JSON loop: one request per stdin line, one response per stdout
/// line. A malformed line gets an error envelope; nothing short of stdin
/// closing stops the loop.
pub(crate) fn run_stdio(engine: &mut Engine) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let mut stdout = std::io::stdout().lock();
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader.read_line(&mut line)?;
        if read == 0 {
            engine.log_mut().note_exit("stdin closed");
            return Ok(());
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let resp = handle_line(engine, trimmed);
        writeln!(stdout, "{}", serde_json::to_string(&resp)?)?;
        stdout.flush()?;
    }
}

fn handle_line(engine: &mut Engine, line: &str) -> Value {
    let request = match serde_json::from_str::<InboundRequest>(line) {
        Ok(request) => request,
        Err(err) => {
            engine.log_mut().note_error(&format!("malformed request: {err}"));
            return protocol::response_error("malformed request");
        }
    };
    engine.log_mut().note_action(request.action.name());
    let replies = engine.handle(UserId::new(request.user_id), request.action);
    protocol::response_ok(&replies)
}
