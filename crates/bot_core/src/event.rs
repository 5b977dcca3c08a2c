//! Abstract inbound/outbound event shapes. The platform-specific binding
//! (webhooks, real keyboards) lives outside this workspace.

use serde::{Deserialize, Serialize};

use crate::listing::GeoPoint;

/// A free-text (or location) message from a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub platform_user_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

/// A button-click event carrying an encoded action payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundCallback {
    pub platform_user_id: String,
    pub payload: String,
}

/// What a button does when pressed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Send the encoded payload back as a callback event.
    Callback(String),
    /// Open an external link.
    Url(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: ButtonAction,
}

impl Button {
    pub fn callback(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Callback(payload.into()),
        }
    }

    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }
}

/// Rows of buttons rendered under a message.
pub type Keyboard = Vec<Vec<Button>>;

/// One outbound message: prompt text plus an optional button layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<Keyboard>,
}

impl Response {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}
