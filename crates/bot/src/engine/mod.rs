#![forbid(unsafe_code)]

pub(crate) mod messages;
mod sessions;

pub(crate) use sessions::SessionMap;

use crate::protocol::{InboundAction, Reply};
use crate::{BotConfig, SessionLog, admin, referral, token};
use sb_core::buttons::CallbackId;
use sb_core::convo::ConversationState;
use sb_core::ids::{self, UserId};
use sb_core::model;
use sb_core::quote::{self, AmountError};
use sb_storage::LedgerStore;

/// The conversation engine. One instance serves every user; per-user state
/// lives in the session map, everything durable goes through the ledger.
pub(crate) struct Engine {
    store: LedgerStore,
    sessions: SessionMap,
    config: BotConfig,
    log: SessionLog,
}

impl Engine {
    pub(crate) fn new(store: LedgerStore, config: BotConfig, log: SessionLog) -> Self {
        Self {
            store,
            sessions: SessionMap::default(),
            config,
            log,
        }
    }

    pub(crate) fn log_mut(&mut self) -> &mut SessionLog {
        &mut self.log
    }

    /// Handle one inbound action to completion. Storage trouble degrades to
    /// safe defaults; this surface never returns an error.
    pub(crate) fn handle(&mut self, user: UserId, action: InboundAction) -> Vec<Reply> {
        match action {
            InboundAction::Start { referrer } => self.handle_start(user, referrer.as_deref()),
            InboundAction::Text { text } => self.handle_text(user, &text),
            InboundAction::Callback { data } => self.handle_callback(user, &data),
            InboundAction::Stats => {
                admin::render_stats(&self.store, &self.config, &mut self.log, user)
            }
        }
    }

    fn handle_start(&mut self, user: UserId, referrer: Option<&str>) -> Vec<Reply> {
        if let Err(err) = self.store.add_user_if_absent(user) {
            self.log.note_error(&format!("add user {user}: {err}"));
        }
        // One usage sample per session start feeds the traffic metrics.
        if let Err(err) = self.store.record_usage_sample() {
            self.log.note_error(&format!("usage sample: {err}"));
        }

        if let Some(arg) = referrer {
            // Malformed referrer arguments are dropped without any
            // user-visible effect; self-referrals never count.
            if let Ok(referrer_id) = ids::parse_user_id(arg) {
                if referrer_id != user {
                    referral::record(&mut self.store, &mut self.log, referrer_id);
                }
            }
        }

        self.sessions.set(user, ConversationState::MenuShown);
        vec![messages::welcome_menu()]
    }

    fn handle_callback(&mut self, user: UserId, data: &str) -> Vec<Reply> {
        let Some(callback) = CallbackId::parse(data) else {
            self.log.note_error(&format!("unknown callback: {data}"));
            return Vec::new();
        };
        match callback {
            CallbackId::Buy => {
                self.sessions.set(user, ConversationState::ExpectingAmount);
                vec![messages::amount_prompt()]
            }
            CallbackId::Earn => {
                let count = referral::count(&self.store, &mut self.log, user);
                self.sessions.clear(user);
                vec![messages::affiliate_summary(
                    user,
                    count,
                    &self.config.bot_username,
                )]
            }
            CallbackId::Withdraw => {
                let count = referral::count(&self.store, &mut self.log, user);
                self.sessions.clear(user);
                if count >= model::WITHDRAW_MIN_REFERRALS {
                    let reference = token::alphanumeric(model::WITHDRAW_REF_LEN);
                    vec![messages::withdraw_ready(&reference)]
                } else {
                    vec![messages::withdraw_short(count)]
                }
            }
            CallbackId::Home => {
                self.sessions.set(user, ConversationState::MenuShown);
                vec![messages::welcome_menu().editing()]
            }
        }
    }

    fn handle_text(&mut self, user: UserId, text: &str) -> Vec<Reply> {
        if self.sessions.get(user) != ConversationState::ExpectingAmount {
            // The transport's conversation routing would not deliver free
            // text outside amount entry; dropping it mirrors that.
            return Vec::new();
        }
        match quote::parse_amount(text) {
            Err(AmountError::NotANumber) => vec![messages::not_a_number()],
            Err(AmountError::BelowMinimum) => vec![messages::too_low()],
            Ok(amount) => {
                self.sessions.clear(user);
                let order_id = token::alphanumeric(model::ORDER_ID_LEN);
                vec![
                    messages::invoice(user, amount, &order_id),
                    messages::invoice_caution(),
                ]
            }
        }
    }
}
