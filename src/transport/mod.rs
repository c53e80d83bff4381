//! WebSocket Transport
//!
//! `tokio-tungstenite` implementation of the view's `Connector` seam.

mod error;
mod ws;

pub use error::TransportError;
pub use ws::{WsConnection, WsConnector};
