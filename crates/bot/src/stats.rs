#![forbid(unsafe_code)]

//! Windowed usage metrics over the ledger's raw samples.

use crate::{SessionLog, now_ms_i64};
use sb_core::model::STATS_WINDOW;
use sb_storage::{LedgerStore, StoreError};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct UsageStats {
    /// Samples recorded within the last hour. This counts sessions started
    /// in the window, not live connections; the upstream behavior is kept
    /// as-is.
    pub(crate) current_connections: i64,
    pub(crate) peak_last_hour: i64,
    pub(crate) avg_last_hour: f64,
    pub(crate) all_time_max: i64,
}

/// Aggregate the last-hour window plus the retained all-time max. Storage
/// errors degrade every field to zero; this never propagates a failure.
pub(crate) fn usage_stats(store: &LedgerStore, log: &mut SessionLog) -> UsageStats {
    match compute(store) {
        Ok(stats) => stats,
        Err(err) => {
            log.note_error(&format!("usage stats: {err}"));
            UsageStats::default()
        }
    }
}

fn compute(store: &LedgerStore) -> Result<UsageStats, StoreError> {
    let window_ms = i64::try_from(STATS_WINDOW.as_millis()).unwrap_or(i64::MAX);
    let since = now_ms_i64().saturating_sub(window_ms);
    let samples = store.usage_samples_since(since)?;

    let current_connections = samples.len() as i64;
    let peak_last_hour = samples.iter().map(|s| s.connections).max().unwrap_or(0);
    let avg_last_hour = if samples.is_empty() {
        0.0
    } else {
        let total: i64 = samples.iter().map(|s| s.connections).sum();
        total as f64 / samples.len() as f64
    };
    let all_time_max = store.all_time_max_connections()?;

    Ok(UsageStats {
        current_connections,
        peak_last_hour,
        avg_last_hour,
        all_time_max,
    })
}
