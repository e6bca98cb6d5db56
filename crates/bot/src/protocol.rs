#![forbid(unsafe_code)]

use sb_core::buttons::CallbackId;
use serde::Deserialize;
use serde_json::{Value, json};

/// One inbound transport update. The transport collaborator translates
/// platform webhooks/polling into these lines.
#[derive(Debug, Deserialize)]
pub(crate) struct InboundRequest {
    pub(crate) user_id: i64,
    #[serde(flatten)]
    pub(crate) action: InboundAction,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub(crate) enum InboundAction {
    /// `start [referrer]` command; always a valid re-entry point.
    Start {
        #[serde(default)]
        referrer: Option<String>,
    },
    /// Free text; only consumed while an amount is expected.
    Text { text: String },
    /// Inline-button press carrying one of the stable callback ids.
    Callback { data: String },
    /// Admin-only usage report.
    Stats,
}

impl InboundAction {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Text { .. } => "text",
            Self::Callback { .. } => "callback",
            Self::Stats => "stats",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Button {
    pub(crate) label: &'static str,
    pub(crate) callback: CallbackId,
}

/// One outbound message: formatted text plus inline-button rows. The
/// `data` strings inside `buttons` are the stable contract with the
/// transport; everything else is presentation.
#[derive(Clone, Debug)]
pub(crate) struct Reply {
    pub(crate) text: String,
    pub(crate) buttons: Vec<Vec<Button>>,
    pub(crate) edit_message: bool,
}

impl Reply {
    pub(crate) fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
            edit_message: false,
        }
    }

    pub(crate) fn with_buttons(text: impl Into<String>, buttons: Vec<Vec<Button>>) -> Self {
        Self {
            text: text.into(),
            buttons,
            edit_message: false,
        }
    }

    /// Ask the transport to edit the triggering message in place instead of
    /// sending a new one.
    pub(crate) fn editing(mut self) -> Self {
        self.edit_message = true;
        self
    }

    pub(crate) fn to_json(&self) -> Value {
        let rows = self
            .buttons
            .iter()
            .map(|row| {
                row.iter()
                    .map(|button| {
                        json!({ "label": button.label, "data": button.callback.as_str() })
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        json!({
            "text": self.text,
            "buttons": rows,
            "edit_message": self.edit_message,
        })
    }
}

pub(crate) fn response_ok(replies: &[Reply]) -> Value {
    json!({
        "ok": true,
        "replies": replies.iter().map(Reply::to_json).collect::<Vec<_>>(),
    })
}

pub(crate) fn response_error(message: &str) -> Value {
    json!({ "ok": false, "error": message })
}
