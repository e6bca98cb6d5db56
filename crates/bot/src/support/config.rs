#![forbid(unsafe_code)]

use sb_core::ids::UserId;
use std::path::PathBuf;

/// Process configuration, resolved once at startup. Flags win over env vars.
///
/// The platform auth token stays with the external transport; nothing in the
/// core consumes it, so it is not parsed here.
#[derive(Clone, Debug)]
pub(crate) struct BotConfig {
    pub(crate) storage_dir: PathBuf,
    pub(crate) admin_id: Option<UserId>,
    pub(crate) bot_username: String,
}

impl BotConfig {
    pub(crate) fn parse(args: &[String]) -> Result<Self, String> {
        let storage_dir = flag_value(args, "--storage-dir")
            .or_else(|| std::env::var("STARSHOP_STORAGE_DIR").ok())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".starshop"));

        let admin_id = match flag_value(args, "--admin-id")
            .or_else(|| std::env::var("STARSHOP_ADMIN_ID").ok())
        {
            None => None,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(id) => Some(UserId::new(id)),
                Err(_) => return Err(format!("invalid admin id: {raw:?}")),
            },
        };

        let bot_username = flag_value(args, "--bot-username")
            .or_else(|| std::env::var("STARSHOP_BOT_USERNAME").ok())
            .unwrap_or_else(|| "starshop_bot".to_string());

        Ok(Self {
            storage_dir,
            admin_id,
            bot_username,
        })
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == flag {
            return iter.next().cloned();
        }
    }
    None
}
