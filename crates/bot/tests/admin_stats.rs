#![forbid(unsafe_code)]

mod support;

use support::*;

#[test]
fn stats_are_silent_for_everyone_but_the_admin() {
    let mut bot = Bot::start_with_args("stats_non_admin", &["--admin-id", "42"]);

    bot.start_cmd(7, None);
    let resp = bot.stats(7);
    assert_eq!(resp["ok"], true);
    assert!(replies(&resp).is_empty(), "non-admin must get no message");

    // The attempt leaves a trace in the session log.
    assert!(bot.session_log().contains("unauthorized stats request from 7"));
}

#[test]
fn stats_are_silent_when_no_admin_is_configured() {
    let mut bot = Bot::start("stats_no_admin");

    bot.start_cmd(7, None);
    assert!(replies(&bot.stats(7)).is_empty());
}

#[test]
fn admin_report_aggregates_the_window() {
    let mut bot = Bot::start_with_args("stats_admin_report", &["--admin-id", "42"]);

    for user_id in [1, 2, 3] {
        bot.start_cmd(user_id, None);
    }

    let reply = single_reply(&bot.stats(42));
    let text = reply_text(&reply);
    assert!(text.contains("Active connections: 3"));
    assert!(text.contains("Total unique users: 3"));
    assert!(text.contains("Peak (last hour): 1"));
    assert!(text.contains("Average (last hour): 1.0"));
    // Three session starts in the window beat the per-sample peak of 1.
    assert!(text.contains("All-time peak: 3"));
    assert_eq!(button_grid(&reply), vec![vec!["home"]]);
}

#[test]
fn admin_report_is_zeroed_on_an_empty_ledger() {
    let mut bot = Bot::start_with_args("stats_empty_ledger", &["--admin-id", "42"]);

    let reply = single_reply(&bot.stats(42));
    let text = reply_text(&reply);
    assert!(text.contains("Active connections: 0"));
    assert!(text.contains("Total unique users: 0"));
    assert!(text.contains("Average (last hour): 0.0"));
    assert!(text.contains("All-time peak: 0"));
}
