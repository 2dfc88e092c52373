use std::sync::Arc;
use std::time::Duration;

use easy_sysinfo::core::widget::WidgetController;
use easy_sysinfo::deck::{read_events, run_plugin, LaunchArgs, RegistrationInfo};
use easy_sysinfo::{PluginConfig, PluginError};
use futures_util::{stream, SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::{self, Message};

use super::support::{decode_image, MockSource, RecordingSurface};

fn text(value: Value) -> Result<Message, tungstenite::Error> {
    Ok(Message::Text(value.to_string().into()))
}

fn controller() -> (WidgetController, Arc<RecordingSurface>) {
    let surface = Arc::new(RecordingSurface::default());
    let controller = WidgetController::new(
        Arc::new(MockSource::new()),
        surface.clone(),
        Duration::from_millis(2000),
    );
    (controller, surface)
}

#[tokio::test(start_paused = true)]
async fn test_read_events_dispatches_and_skips_garbage() {
    let (mut controller, surface) = controller();

    let frames = vec![
        text(json!({
            "event": "willAppear",
            "context": "ctx",
            "payload": { "settings": { "stat": "net-upload" } }
        })),
        Ok(Message::Text("{not json".into())),
        text(json!({ "event": "keyUp", "context": "ctx", "payload": {} })),
        Ok(Message::Ping(Vec::new().into())),
        Ok(Message::Close(None)),
        text(json!({ "event": "willDisappear", "context": "ctx", "payload": {} })),
    ];

    read_events(stream::iter(frames), &mut controller).await.unwrap();

    // Frames after the close are not processed
    assert_eq!(controller.active_buttons(), 1);

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(surface.titles_for("ctx"), vec!["UP"]);
}

#[tokio::test(start_paused = true)]
async fn test_read_events_ends_when_stream_ends() {
    let (mut controller, _surface) = controller();
    let frames: Vec<Result<Message, tungstenite::Error>> = Vec::new();

    read_events(stream::iter(frames), &mut controller).await.unwrap();
    assert_eq!(controller.active_buttons(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_transport_error_is_reported() {
    let (mut controller, _surface) = controller();
    let frames = vec![Err(tungstenite::Error::ConnectionClosed)];

    let result = read_events(stream::iter(frames), &mut controller).await;
    assert!(matches!(result, Err(PluginError::WebSocket(_))));
}

async fn next_json<S>(ws: &mut S) -> Value
where
    S: futures_util::Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    loop {
        match ws.next().await {
            Some(Ok(Message::Text(text))) => return serde_json::from_str(&text).unwrap(),
            Some(Ok(_)) => continue,
            other => panic!("unexpected frame: {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_plugin_registers_and_renders_over_websocket() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let host = tokio::spawn(async move {
        let (tcp, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(tcp).await.unwrap();

        let registration = next_json(&mut ws).await;

        let appear = json!({
            "event": "willAppear",
            "action": "com.tautvydas-fosron-tijunaitis.easy-sysinfo.widget",
            "context": "ctx",
            "payload": { "settings": { "stat": "mem-usage" } }
        });
        ws.send(Message::Text(appear.to_string().into())).await.unwrap();

        let mut received = Vec::new();
        while received.len() < 3 {
            received.push(next_json(&mut ws).await);
        }

        ws.close(None).await.unwrap();
        (registration, received)
    });

    let args = LaunchArgs {
        port,
        plugin_uuid: "PLUGIN-UUID".to_string(),
        register_event: "registerPlugin".to_string(),
        info: RegistrationInfo::default(),
    };

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        run_plugin(args, &PluginConfig::default(), Arc::new(MockSource::new())),
    )
    .await
    .expect("plugin did not stop after the host closed the socket");
    assert!(result.is_ok());

    let (registration, received) = host.await.unwrap();
    assert_eq!(registration, json!({ "event": "registerPlugin", "uuid": "PLUGIN-UUID" }));

    assert_eq!(received[0]["event"], "logMessage");
    assert_eq!(received[1]["event"], "setImage");
    assert_eq!(received[1]["context"], "ctx");
    assert_eq!(received[2], json!({
        "event": "setTitle",
        "context": "ctx",
        "payload": { "title": "MEM", "target": 0 }
    }));

    let image = received[1]["payload"]["image"].as_str().unwrap();
    assert!(decode_image(image).contains(">60.0%</text>"));
}
