use tokio::sync::mpsc;

use super::protocol::OutboundMessage;
use crate::error::{PluginError, Result};

/// Rendering side of the host, as seen by the widget controller.
pub trait ButtonSurface: Send + Sync {
    /// Replace the button face with an encoded image
    fn set_image(&self, context: &str, image: String) -> Result<()>;

    /// Replace the button title text
    fn set_title(&self, context: &str, title: String) -> Result<()>;
}

/// Queues outbound messages for the WebSocket writer task.
///
/// Sending never waits on the socket, so a slow host cannot stall a tick.
#[derive(Debug, Clone)]
pub struct HostSender {
    tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl HostSender {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn send(&self, message: OutboundMessage) -> Result<()> {
        self.tx
            .send(message)
            .map_err(|_| PluginError::host("connection to the Stream Deck application is closed"))
    }

    /// Write a line to the host's own plugin log
    pub fn log_message(&self, message: impl Into<String>) -> Result<()> {
        self.send(OutboundMessage::log_message(message))
    }
}

impl ButtonSurface for HostSender {
    fn set_image(&self, context: &str, image: String) -> Result<()> {
        self.send(OutboundMessage::set_image(context, image))
    }

    fn set_title(&self, context: &str, title: String) -> Result<()> {
        self.send(OutboundMessage::set_title(context, title))
    }
}
