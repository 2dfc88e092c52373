//! JSON messages exchanged with the Stream Deck application.
//!
//! Inbound events are tagged by their `event` field; anything the plugin does
//! not handle decodes to [`InboundEvent::Other`]. Outbound messages are
//! serialized the same way.

use serde::{Deserialize, Serialize};

use crate::core::widget::WidgetSettings;

/// Render on both the hardware key and the software preview
pub const TARGET_BOTH: u8 = 0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum InboundEvent {
    WillAppear(ActionEvent),
    WillDisappear(ActionEvent),
    DidReceiveSettings(ActionEvent),
    #[serde(other)]
    Other,
}

/// Event addressed to one action instance (one button).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionEvent {
    #[serde(default)]
    pub action: String,
    /// Opaque identifier of the button instance
    pub context: String,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub payload: ActionPayload,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActionPayload {
    #[serde(default)]
    pub settings: WidgetSettings,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default, rename = "isInMultiAction")]
    pub is_in_multi_action: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Coordinates {
    pub column: u32,
    pub row: u32,
}

/// First frame sent after connecting.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub event: String,
    pub uuid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum OutboundMessage {
    SetImage {
        context: String,
        payload: ImagePayload,
    },
    SetTitle {
        context: String,
        payload: TitlePayload,
    },
    LogMessage {
        payload: LogPayload,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagePayload {
    pub image: String,
    pub target: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitlePayload {
    pub title: String,
    pub target: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogPayload {
    pub message: String,
}

impl OutboundMessage {
    pub fn set_image(context: &str, image: String) -> Self {
        OutboundMessage::SetImage {
            context: context.to_string(),
            payload: ImagePayload {
                image,
                target: TARGET_BOTH,
            },
        }
    }

    pub fn set_title(context: &str, title: String) -> Self {
        OutboundMessage::SetTitle {
            context: context.to_string(),
            payload: TitlePayload {
                title,
                target: TARGET_BOTH,
            },
        }
    }

    pub fn log_message(message: impl Into<String>) -> Self {
        OutboundMessage::LogMessage {
            payload: LogPayload {
                message: message.into(),
            },
        }
    }
}
