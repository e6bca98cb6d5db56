#![forbid(unsafe_code)]

//! Referral attribution on top of the ledger. Counting is monotone and
//! idempotence-free by design: every accepted `start` with a foreign
//! referrer credits one referral.

use crate::SessionLog;
use sb_core::ids::UserId;
use sb_storage::LedgerStore;

/// Credit one referral to `referrer`. Storage errors are logged and
/// swallowed so the caller's conversation flow is never disturbed.
pub(crate) fn record(store: &mut LedgerStore, log: &mut SessionLog, referrer: UserId) {
    if let Err(err) = store.upsert_increment_referral(referrer) {
        log.note_error(&format!("referral increment {referrer}: {err}"));
    }
}

/// Referral count for `user`. Never fails the caller: an unknown referrer
/// and a storage failure both read as zero (the failure is logged).
pub(crate) fn count(store: &LedgerStore, log: &mut SessionLog, user: UserId) -> i64 {
    match store.referral_count(user) {
        Ok(count) => count,
        Err(err) => {
            log.note_error(&format!("referral count {user}: {err}"));
            0
        }
    }
}
