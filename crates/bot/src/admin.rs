#![forbid(unsafe_code)]

//! Admin-only usage reporting. Everyone else gets silence and a log line.

use crate::engine::messages;
use crate::protocol::Reply;
use crate::{BotConfig, SessionLog, stats};
use sb_core::ids::UserId;
use sb_storage::LedgerStore;

pub(crate) fn render_stats(
    store: &LedgerStore,
    config: &BotConfig,
    log: &mut SessionLog,
    caller: UserId,
) -> Vec<Reply> {
    if config.admin_id != Some(caller) {
        log.note_error(&format!("unauthorized stats request from {caller}"));
        return Vec::new();
    }

    let usage = stats::usage_stats(store, log);
    match store.count_distinct_users() {
        Ok(unique_users) => vec![messages::stats_report(&usage, unique_users)],
        Err(err) => {
            // Generic failure message; raw storage detail stays in the log.
            log.note_error(&format!("distinct users: {err}"));
            vec![messages::stats_unavailable()]
        }
    }
}
