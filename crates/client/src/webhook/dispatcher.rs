//! Webhook batch processing and listener fan-out

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, warn};
use whise_domain::constants::WEBHOOK_CATCH_ALL;
use whise_domain::{Result, WebhookEvent, WebhookEventType, WhiseError};

use crate::clock::{Clock, SystemClock};

/// Callback invoked for each matching event.
pub type Listener = Arc<dyn Fn(&WebhookEvent) + Send + Sync>;

/// Parses webhook batches and hands each event to its registered listeners.
///
/// Listeners run synchronously on the calling thread, in registration order:
/// first those registered for the event's name, then the catch-all ones.
pub struct WebhookDispatcher {
    listeners: RwLock<HashMap<String, Vec<Listener>>>,
    clock: Arc<dyn Clock>,
}

impl WebhookDispatcher {
    pub fn new() -> Self {
        Self { listeners: RwLock::new(HashMap::new()), clock: Arc::new(SystemClock) }
    }

    /// Use `clock` for the processing timestamp stamped on each event.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register a listener for events named `event`.
    pub fn on<F>(&self, event: impl Into<String>, listener: F)
    where
        F: Fn(&WebhookEvent) + Send + Sync + 'static,
    {
        self.listeners.write().entry(event.into()).or_default().push(Arc::new(listener));
    }

    /// Register a listener that receives every event.
    pub fn on_all<F>(&self, listener: F)
    where
        F: Fn(&WebhookEvent) + Send + Sync + 'static,
    {
        self.on(WEBHOOK_CATCH_ALL, listener);
    }

    /// Drop every listener registered under `event`.
    pub fn remove_listeners(&self, event: &str) {
        self.listeners.write().remove(event);
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners.read().get(event).map_or(0, Vec::len)
    }

    /// Process one webhook batch.
    ///
    /// The payload must be an object with an `events` array; otherwise
    /// nothing is emitted. Events without a name are skipped.
    ///
    /// # Errors
    ///
    /// [`WhiseError::Validation`] when the payload shape is wrong.
    pub fn process(&self, payload: &Value) -> Result<Vec<WebhookEvent>> {
        let Some((envelope, events)) = payload
            .as_object()
            .and_then(|body| Some((body, body.get("events")?.as_array()?)))
        else {
            warn!("rejected webhook payload without an events array");
            return Err(WhiseError::Validation("Invalid webhook payload".into()));
        };

        let now = self.clock.now();
        let mut processed = Vec::with_capacity(events.len());

        for raw in events {
            let Some(event) = WebhookEvent::from_raw(raw, envelope, now) else {
                debug!("skipping webhook event without a name");
                continue;
            };

            self.emit(&event.name, &event);
            self.emit(WEBHOOK_CATCH_ALL, &event);
            processed.push(event);
        }

        debug!(count = processed.len(), "webhook batch processed");
        Ok(processed)
    }

    /// The fourteen event names Whise documents.
    pub fn supported_events() -> Vec<&'static str> {
        WebhookEventType::ALL.iter().map(WebhookEventType::as_str).collect()
    }

    /// Exact, case-sensitive membership in [`supported_events`](Self::supported_events).
    pub fn is_event_supported(event: &str) -> bool {
        WebhookEventType::ALL.iter().any(|known| known.as_str() == event)
    }

    fn emit(&self, name: &str, event: &WebhookEvent) {
        // Snapshot so listeners may register or remove listeners themselves.
        let listeners = match self.listeners.read().get(name) {
            Some(listeners) => listeners.clone(),
            None => return,
        };

        for listener in listeners {
            listener(event);
        }
    }
}

impl Default for WebhookDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WebhookDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.read();
        let counts: HashMap<&str, usize> =
            listeners.iter().map(|(name, list)| (name.as_str(), list.len())).collect();
        f.debug_struct("WebhookDispatcher").field("listeners", &counts).finish()
    }
}
