#![forbid(unsafe_code)]

mod config;
mod session_log;
mod time;

pub(crate) use config::*;
pub(crate) use session_log::*;
pub(crate) use time::*;
