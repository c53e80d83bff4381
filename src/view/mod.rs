//! Realtime Connection View
//!
//! Owns a single live connection to the stats stream per activation and
//! exposes connection status and the latest snapshot for rendering.
//!
//! ## Architecture
//!
//! - **Connection**: event types, the tagged `EventSink` and the
//!   `Connector` seam that transports implement
//! - **State**: pure transitions from `(ViewState, ConnectionEvent)`
//! - **Realtime**: activation lifecycle and stale-event isolation
//! - **Render**: text frame for the terminal

mod connection;
pub mod render;
mod realtime;
mod state;

#[cfg(test)]
pub(crate) mod fake;

pub use connection::{
    ActivationId, Connection, ConnectionEvent, Connector, Envelope, EventSink, Payload,
};
pub use realtime::RealtimeView;
pub use render::render;
pub use state::ViewState;
