//! Activation lifecycle
//!
//! A `RealtimeView` holds at most one activation. Every activation gets a
//! fresh `ActivationId`; envelopes carrying any other id are dropped, so a
//! late event from a superseded connection can never touch current state.

use chrono::Utc;
use tokio::sync::mpsc;

use super::connection::{ActivationId, Connection, Connector, Envelope, EventSink};
use super::state::ViewState;

struct Activation<T> {
    id: ActivationId,
    url: String,
    sink: EventSink,
    connection: T,
}

/// Live view over the stats stream
pub struct RealtimeView<C: Connector> {
    connector: C,
    events_tx: mpsc::UnboundedSender<Envelope>,
    next_activation: ActivationId,
    active: Option<Activation<C::Connection>>,
    state: ViewState,
}

impl<C: Connector> RealtimeView<C> {
    /// Create an inactive view. Connection events are delivered to the
    /// receiving half of `events_tx` and must be fed back through
    /// [`RealtimeView::handle`].
    pub fn new(connector: C, events_tx: mpsc::UnboundedSender<Envelope>) -> Self {
        Self {
            connector,
            events_tx,
            next_activation: 1,
            active: None,
            state: ViewState::default(),
        }
    }

    /// Open a connection to `url`, replacing any current activation
    pub fn activate(&mut self, url: &str) -> ActivationId {
        self.deactivate();

        let id = self.next_activation;
        self.next_activation += 1;

        tracing::info!(activation = id, url = %url, "Opening stats connection");

        let sink = EventSink::new(id, self.events_tx.clone());
        let connection = self.connector.open(url, sink.clone());

        self.active = Some(Activation {
            id,
            url: url.to_string(),
            sink,
            connection,
        });
        self.state = ViewState::default();

        id
    }

    /// Close the current connection and discard its state
    pub fn deactivate(&mut self) {
        if let Some(mut activation) = self.active.take() {
            activation.sink.detach();
            activation.connection.close();
            tracing::info!(activation = activation.id, "Closed stats connection");
        }
        self.state = ViewState::default();
    }

    /// Point the view at a new endpoint. Reactivates only when the URL
    /// actually changes.
    pub fn set_url(&mut self, url: &str) -> ActivationId {
        if let Some(activation) = &self.active {
            if activation.url == url {
                return activation.id;
            }
        }
        self.activate(url)
    }

    /// Apply one connection event.
    ///
    /// Returns true if the observable state changed.
    pub fn handle(&mut self, envelope: Envelope) -> bool {
        let current = self.active.as_ref().map(|a| a.id);
        if current != Some(envelope.activation) {
            tracing::debug!(
                activation = envelope.activation,
                current = ?current,
                "Dropping event from stale connection"
            );
            return false;
        }

        let next = self.state.apply(&envelope.event, Utc::now());
        if next.status != self.state.status {
            tracing::info!(status = %next.status, "Connection status changed");
        }

        let changed = next != self.state;
        self.state = next;
        changed
    }

    /// Current observable state
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

impl<C: Connector> Drop for RealtimeView<C> {
    fn drop(&mut self) {
        self.deactivate();
    }
}
