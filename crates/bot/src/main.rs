#![forbid(unsafe_code)]

mod admin;
mod engine;
mod entry;
mod protocol;
mod referral;
mod stats;
mod support;
mod token;

pub(crate) use support::*;

use engine::Engine;
use sb_storage::LedgerStore;

const BOT_NAME: &str = "starshop-bot";
const BOT_VERSION: &str = "0.1.0";

fn usage() -> &'static str {
    "sb_bot — star-shop chatbot core (stdio, newline-JSON)\n\n\
USAGE:\n\
  sb_bot [--storage-dir DIR] [--admin-id ID] [--bot-username NAME]\n\
\n\
FLAGS:\n\
  -h, --help       Print this help and exit\n\
  -V, --version    Print version and exit\n\
\n\
NOTES:\n\
  - One JSON request per stdin line, one JSON response per stdout line.\n\
  - Env fallbacks: STARSHOP_STORAGE_DIR, STARSHOP_ADMIN_ID, STARSHOP_BOT_USERNAME.\n"
}

fn version_line() -> String {
    format!("{BOT_NAME} {BOT_VERSION}")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().collect::<Vec<_>>();
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print!("{}", usage());
        return Ok(());
    }
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-V" | "--version"))
    {
        println!("{}", version_line());
        return Ok(());
    }

    let config = BotConfig::parse(&args)?;
    let mut log = SessionLog::new(&config.storage_dir);
    let mut store = LedgerStore::open(&config.storage_dir)?;

    // Retention is an explicit operation; this host triggers it at startup
    // and leaves any further cadence to whoever embeds the engine.
    if let Err(err) = store.purge_samples_older_than(sb_core::model::SAMPLE_RETENTION) {
        log.note_error(&format!("retention purge: {err}"));
    }

    let mut engine = Engine::new(store, config, log);
    entry::run_stdio(&mut engine)
}
