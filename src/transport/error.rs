//! Transport error types

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Errors raised by the websocket transport.
///
/// These never reach the view as errors; they are logged and then surface
/// as a close event.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Handshake or TCP connect failed, including unparseable URLs
    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tungstenite::Error,
    },

    /// Reading from an established connection failed
    #[error("WebSocket receive error: {0}")]
    Receive(#[from] tungstenite::Error),
}
