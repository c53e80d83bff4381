//! Punctuality Statistics
//!
//! Data model for the national punctuality feed and the defensive decoder
//! that turns raw websocket payloads into snapshots.

mod decode;
mod error;
mod types;

pub use decode::{decode_snapshot, decode_snapshot_bytes};
pub use error::{DecodeError, DecodeResult};
pub use types::{ConnectionStatus, StatsSnapshot};
