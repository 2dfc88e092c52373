//! WebSocket session with the Stream Deck application.

use std::sync::Arc;

use futures_util::{SinkExt, Stream, StreamExt};
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::connect_async;

use super::args::LaunchArgs;
use super::protocol::{InboundEvent, Registration};
use super::surface::HostSender;
use crate::core::config::PluginConfig;
use crate::core::system_monitor::MetricsSource;
use crate::core::widget::WidgetController;
use crate::error::Result;

/// Connect, register and serve host events until the host disconnects.
pub async fn run_plugin(
    args: LaunchArgs,
    config: &PluginConfig,
    source: Arc<dyn MetricsSource>,
) -> Result<()> {
    let url = args.websocket_url();
    log::info!("Connecting to Stream Deck at {}", url);

    let (ws, _) = connect_async(url.as_str()).await?;
    let (mut write, read) = ws.split();

    let registration = Registration {
        event: args.register_event.clone(),
        uuid: args.plugin_uuid.clone(),
    };
    write
        .send(Message::Text(serde_json::to_string(&registration)?.into()))
        .await?;

    log::info!(
        "Registered with Stream Deck {} on {}",
        args.info.application.version,
        args.info.application.platform
    );

    let (sender, mut outbound_rx) = HostSender::channel();

    let writer = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    log::error!("Failed to encode outbound message: {}", e);
                    continue;
                }
            };

            log::trace!("-> {}", text);
            if let Err(e) = write.send(Message::Text(text.into())).await {
                log::warn!("Failed to send to Stream Deck: {}", e);
                break;
            }
        }
    });

    sender.log_message(format!(
        "easy-sysinfo {} connected",
        env!("CARGO_PKG_VERSION")
    ))?;

    let mut controller =
        WidgetController::new(source, Arc::new(sender), config.poll_interval());

    let result = read_events(read, &mut controller).await;

    controller.shutdown();
    writer.abort();

    match &result {
        Ok(()) => log::info!("Stream Deck closed the connection"),
        Err(e) => log::error!("Connection to Stream Deck failed: {}", e),
    }

    result
}

/// Feed decoded host events to the controller.
///
/// Frames that do not decode are logged and skipped. Returns when the host
/// closes the stream; transport errors end the session with an error.
pub async fn read_events<S>(mut stream: S, controller: &mut WidgetController) -> Result<()>
where
    S: Stream<Item = std::result::Result<Message, tungstenite::Error>> + Unpin,
{
    while let Some(message) = stream.next().await {
        match message? {
            Message::Text(text) => {
                log::trace!("<- {}", text.as_str());

                match serde_json::from_str::<InboundEvent>(&text) {
                    Ok(event) => controller.handle_event(event),
                    Err(e) => log::warn!("Ignoring malformed host message: {}", e),
                }
            }
            Message::Close(frame) => {
                log::debug!("Close frame received: {:?}", frame);
                break;
            }
            _ => {}
        }
    }

    Ok(())
}
