//! Connection seam
//!
//! Transports push events into an `EventSink`; the view consumes the tagged
//! `Envelope`s from a single channel. A sink is bound to one activation and
//! can be detached, after which it silently drops everything it is given.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Identifies one activation of the view (one connection)
pub type ActivationId = u64;

/// Raw message payload as delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

/// Lifecycle events reported by a connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Connection established
    Open,
    /// A message arrived
    Message(Payload),
    /// Connection closed, normally or not. Terminal.
    Close {
        /// Close code, when the peer sent one
        code: Option<u16>,
        /// Close reason or failure description
        reason: String,
    },
}

impl ConnectionEvent {
    pub fn text(payload: impl Into<String>) -> Self {
        ConnectionEvent::Message(Payload::Text(payload.into()))
    }

    pub fn closed(reason: impl Into<String>) -> Self {
        ConnectionEvent::Close {
            code: None,
            reason: reason.into(),
        }
    }
}

/// A connection event tagged with the activation it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub activation: ActivationId,
    pub event: ConnectionEvent,
}

/// Event slot handed to a connection when it is opened
#[derive(Debug, Clone)]
pub struct EventSink {
    activation: ActivationId,
    tx: mpsc::UnboundedSender<Envelope>,
    detached: Arc<AtomicBool>,
}

impl EventSink {
    pub(crate) fn new(activation: ActivationId, tx: mpsc::UnboundedSender<Envelope>) -> Self {
        Self {
            activation,
            tx,
            detached: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Activation this sink reports for
    pub fn activation(&self) -> ActivationId {
        self.activation
    }

    /// Deliver an event to the view.
    ///
    /// Returns false once the sink is detached or the view is gone; the
    /// caller should stop reading from its connection.
    pub fn emit(&self, event: ConnectionEvent) -> bool {
        if self.is_detached() {
            return false;
        }

        self.tx
            .send(Envelope {
                activation: self.activation,
                event,
            })
            .is_ok()
    }

    pub fn is_detached(&self) -> bool {
        self.detached.load(Ordering::Acquire)
    }

    pub(crate) fn detach(&self) {
        self.detached.store(true, Ordering::Release);
    }
}

/// A live connection owned by one activation
pub trait Connection {
    /// Close the connection. Must be idempotent and must not block.
    fn close(&mut self);
}

/// Opens connections on behalf of the view
pub trait Connector {
    type Connection: Connection;

    /// Start connecting to `url`. Establishment, messages and closure are
    /// reported later through `sink`; this call never blocks.
    fn open(&self, url: &str, sink: EventSink) -> Self::Connection;
}
