#![forbid(unsafe_code)]

use crate::protocol::{Button, Reply};
use crate::stats::UsageStats;
use sb_core::buttons::CallbackId;
use sb_core::ids::UserId;
use sb_core::model;
use sb_core::quote;

const BUY: Button = Button {
    label: "Buy ⭐️",
    callback: CallbackId::Buy,
};
const EARN: Button = Button {
    label: "Earn ⭐️",
    callback: CallbackId::Earn,
};
const WITHDRAW: Button = Button {
    label: "🏦 Withdraw Stars",
    callback: CallbackId::Withdraw,
};
const HOME: Button = Button {
    label: "🏠 Home",
    callback: CallbackId::Home,
};

fn menu_rows() -> Vec<Vec<Button>> {
    vec![vec![BUY, EARN]]
}

fn home_row() -> Vec<Vec<Button>> {
    vec![vec![HOME]]
}

pub(crate) fn welcome_menu() -> Reply {
    let text = format!(
        "💫 Welcome!\n\n\
         Using Star Shop bot, you can purchase Telegram stars ⭐️ without KYC verification.\n\n\
         ❗️ Tap \"Buy ⭐️\" and enter the amount of stars you wish to buy (minimum: {} stars).",
        quote::format_amount(quote::MIN_ORDER_STARS)
    );
    Reply::with_buttons(text, menu_rows())
}

pub(crate) fn amount_prompt() -> Reply {
    Reply::text(format!(
        "Please enter the amount of stars ⭐️ you wish to buy (minimum: {} ⭐️):",
        quote::format_amount(quote::MIN_ORDER_STARS)
    ))
}

pub(crate) fn affiliate_summary(user: UserId, count: i64, bot_username: &str) -> Reply {
    let text = format!(
        "👥 Affiliate program\n\n\
         Invite friends and get rewarded: 1 Telegram star ⭐️ per successful referral + 5% of your friend's first buy.\n\n\
         Your info:\n\
         🆔 User ID: {user}\n\
         🌿 Successful referrals: {count}\n\n\
         🔗 Your referral link (tap to copy):\n\
         https://t.me/{bot_username}?start={user}\n\n\
         Minimum withdraw amount: {} Telegram stars ⭐️",
        model::WITHDRAW_MIN_REFERRALS
    );
    Reply::with_buttons(text, vec![vec![WITHDRAW], vec![HOME]])
}

pub(crate) fn withdraw_ready(reference: &str) -> Reply {
    let text = format!(
        "✅ Withdrawal available!\n\n\
         Please contact admin.\n\
         Reference: WD-{reference}"
    );
    Reply::with_buttons(text, home_row())
}

pub(crate) fn withdraw_short(count: i64) -> Reply {
    let remaining = model::WITHDRAW_MIN_REFERRALS - count;
    let text = format!(
        "❌ Insufficient referrals\n\n\
         You need {remaining} more referrals to withdraw.\n\
         Current referrals: {count}/{}",
        model::WITHDRAW_MIN_REFERRALS
    );
    Reply::with_buttons(text, home_row())
}

pub(crate) fn not_a_number() -> Reply {
    Reply::text("Error: not a number.")
}

pub(crate) fn too_low() -> Reply {
    Reply::text(format!(
        "Too low! The amount must be at least {}.",
        quote::format_amount(quote::MIN_ORDER_STARS)
    ))
}

pub(crate) fn invoice(buyer: UserId, amount: f64, order_id: &str) -> Reply {
    let price = quote::format_price(quote::price_for(amount));
    let text = format!(
        "This invoice is valid for the next {} minutes.\n\n\
         Order details\n\n\
         Buyer: {buyer}\n\
         Amount: {} ⭐️\n\n\
         Payment details\n\n\
         Network: TON\n\
         Price: {price} TON\n\n\
         Address: {}\n\
         Order ID: {order_id}",
        model::INVOICE_VALID_MINUTES,
        quote::format_amount(amount),
        model::RECEIVING_ADDRESS
    );
    Reply::text(text)
}

pub(crate) fn invoice_caution() -> Reply {
    let text = "⚠️ Attention ⚠️\n\n\
         You MUST send the EXACT amount. Nothing more, nothing less.\n\
         Leave a comment on the transaction with the Order ID from the invoice above.\n\
         Tap the wallet address to copy it. Sending to a wrong address leads to permanent loss of funds.\n\
         After making the transaction, please share a screenshot with support.";
    Reply::with_buttons(text, home_row())
}

pub(crate) fn stats_report(usage: &UsageStats, unique_users: i64) -> Reply {
    let all_time_peak = usage
        .peak_last_hour
        .max(usage.current_connections)
        .max(usage.all_time_max);
    let text = format!(
        "Bot usage statistics\n\n\
         Current status:\n\
         • Active connections: {}\n\
         • Total unique users: {unique_users}\n\n\
         Traffic analysis:\n\
         • Peak (last hour): {}\n\
         • Average (last hour): {:.1}\n\
         • All-time peak: {all_time_peak}",
        usage.current_connections, usage.peak_last_hour, usage.avg_last_hour
    );
    Reply::with_buttons(text, home_row())
}

pub(crate) fn stats_unavailable() -> Reply {
    Reply::text("Error: storage unavailable. Try again later.")
}
