use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::core::system_monitor::MetricsSource;
use crate::deck::{ActionEvent, ButtonSurface, InboundEvent};

use super::settings::{Selection, WidgetSettings};
use super::tick::run_tick;

/// Live state of one visible button.
struct ButtonSession {
    settings: WidgetSettings,
    poller: JoinHandle<()>,
}

/// Owns one polling task per visible button.
///
/// The registry is only touched from the host event loop, so it needs no
/// lock. Replacing a session aborts the task it displaces, which keeps at
/// most one poller alive per button.
pub struct WidgetController {
    sessions: HashMap<String, ButtonSession>,
    source: Arc<dyn MetricsSource>,
    surface: Arc<dyn ButtonSurface>,
    poll_interval: Duration,
}

impl WidgetController {
    pub fn new(
        source: Arc<dyn MetricsSource>,
        surface: Arc<dyn ButtonSurface>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            sessions: HashMap::new(),
            source,
            surface,
            poll_interval,
        }
    }

    /// Button became visible: remember its settings and start polling.
    pub fn on_activate(&mut self, context: &str, settings: WidgetSettings) {
        log::info!("Button {} appeared with {:?}", context, settings.stat);
        self.start_polling(context, settings);
    }

    /// Button was hidden: stop polling. Unknown buttons are ignored.
    pub fn on_deactivate(&mut self, context: &str) {
        match self.sessions.remove(context) {
            Some(session) => {
                session.poller.abort();
                log::info!("Button {} disappeared, polling stopped", context);
            }
            None => log::debug!("Button {} disappeared without an active poller", context),
        }
    }

    /// Settings changed: restart so the next tick shows the new statistic.
    pub fn on_settings_changed(&mut self, context: &str, settings: WidgetSettings) {
        log::info!("Button {} settings changed to {:?}", context, settings.stat);
        self.start_polling(context, settings);
    }

    pub fn handle_event(&mut self, event: InboundEvent) {
        match event {
            InboundEvent::WillAppear(ActionEvent { context, payload, .. }) => {
                self.on_activate(&context, payload.settings)
            }
            InboundEvent::WillDisappear(ActionEvent { context, .. }) => {
                self.on_deactivate(&context)
            }
            InboundEvent::DidReceiveSettings(ActionEvent { context, payload, .. }) => {
                self.on_settings_changed(&context, payload.settings)
            }
            InboundEvent::Other => log::trace!("Ignoring unhandled host event"),
        }
    }

    /// Stop every poller.
    pub fn shutdown(&mut self) {
        for (context, session) in self.sessions.drain() {
            session.poller.abort();
            log::debug!("Stopped polling {}", context);
        }
    }

    /// Number of buttons with a live poller
    pub fn active_buttons(&self) -> usize {
        self.sessions.len()
    }

    pub fn settings_for(&self, context: &str) -> Option<&WidgetSettings> {
        self.sessions.get(context).map(|session| &session.settings)
    }

    fn start_polling(&mut self, context: &str, settings: WidgetSettings) {
        let poller = tokio::spawn(poll_button(
            context.to_string(),
            settings.selection(),
            Arc::clone(&self.source),
            Arc::clone(&self.surface),
            self.poll_interval,
        ));

        let session = ButtonSession { settings, poller };
        if let Some(previous) = self.sessions.insert(context.to_string(), session) {
            previous.poller.abort();
            log::debug!("Replaced poller for {}", context);
        }
    }
}

impl Drop for WidgetController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Render immediately, then once per interval until aborted.
async fn poll_button(
    context: String,
    selection: Selection,
    source: Arc<dyn MetricsSource>,
    surface: Arc<dyn ButtonSurface>,
    period: Duration,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        run_tick(&context, &selection, &source, surface.as_ref()).await;
    }
}
