//! View state transitions
//!
//! Each connection event maps the current state to the next one. Messages
//! only count while the connection is open. The only side effect is the
//! diagnostic log entry emitted for undecodable payloads.

use chrono::{DateTime, Utc};

use super::connection::{ConnectionEvent, Payload};
use crate::stats::{decode_snapshot, decode_snapshot_bytes, ConnectionStatus, StatsSnapshot};

/// Observable state of one activation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Status of the current activation's connection
    pub status: ConnectionStatus,
    /// Latest decoded snapshot, `None` until data arrives
    pub snapshot: Option<StatsSnapshot>,
    /// When the snapshot was last replaced
    pub updated_at: Option<DateTime<Utc>>,
}

impl ViewState {
    /// Compute the state that follows `event`, received at `at`.
    pub fn apply(&self, event: &ConnectionEvent, at: DateTime<Utc>) -> ViewState {
        match event {
            ConnectionEvent::Open => ViewState {
                status: ConnectionStatus::Connected,
                ..self.clone()
            },
            ConnectionEvent::Message(payload) => self.apply_message(payload, at),
            ConnectionEvent::Close { .. } => ViewState {
                status: ConnectionStatus::Disconnected,
                ..self.clone()
            },
        }
    }

    fn apply_message(&self, payload: &Payload, at: DateTime<Utc>) -> ViewState {
        if !self.status.is_connected() {
            tracing::debug!(status = %self.status, "Ignoring message outside an open connection");
            return self.clone();
        }

        let decoded = match payload {
            Payload::Text(text) => decode_snapshot(text),
            Payload::Binary(bytes) => decode_snapshot_bytes(bytes.clone()),
        };

        match decoded {
            Ok(snapshot) => ViewState {
                snapshot,
                updated_at: Some(at),
                ..self.clone()
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decode stats message");
                self.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::fake::count_warnings;

    const VALID: &str = r#"{"on_time":120,"cancelled_or_very_late":3,"late":10,"total":133}"#;

    #[test]
    fn test_initial_state() {
        let state = ViewState::default();
        assert_eq!(state.status, ConnectionStatus::Disconnected);
        assert!(state.snapshot.is_none());
        assert!(state.updated_at.is_none());
    }

    #[test]
    fn test_open_sets_connected() {
        let state = ViewState::default().apply(&ConnectionEvent::Open, Utc::now());
        assert_eq!(state.status, ConnectionStatus::Connected);
        assert!(state.snapshot.is_none());
    }

    #[test]
    fn test_message_replaces_snapshot() {
        let now = Utc::now();
        let state = ViewState::default()
            .apply(&ConnectionEvent::Open, now)
            .apply(&ConnectionEvent::text(r#"{"on_time":1,"late":2}"#), now)
            .apply(&ConnectionEvent::text(VALID), now);

        assert_eq!(state.snapshot, Some(StatsSnapshot::new(120, 3, 10, 133)));
        assert_eq!(state.updated_at, Some(now));
        assert_eq!(state.status, ConnectionStatus::Connected);
    }

    #[test]
    fn test_partial_message_does_not_merge() {
        let now = Utc::now();
        let state = ViewState::default()
            .apply(&ConnectionEvent::Open, now)
            .apply(&ConnectionEvent::text(VALID), now)
            .apply(&ConnectionEvent::text(r#"{"late":11}"#), now);

        let snapshot = state.snapshot.unwrap();
        assert_eq!(snapshot.late, Some(11));
        assert_eq!(snapshot.on_time, None);
        assert_eq!(snapshot.total, None);
    }

    #[test]
    fn test_malformed_message_is_noop() {
        let now = Utc::now();
        let before = ViewState::default()
            .apply(&ConnectionEvent::Open, now)
            .apply(&ConnectionEvent::text(VALID), now);

        let (after, warnings) = count_warnings(|| {
            before.apply(&ConnectionEvent::text("not json"), Utc::now())
        });

        assert_eq!(after, before);
        assert_eq!(warnings, 1);
    }

    #[test]
    fn test_binary_message_decoded_as_text() {
        let state = ViewState::default()
            .apply(&ConnectionEvent::Open, Utc::now())
            .apply(
                &ConnectionEvent::Message(Payload::Binary(VALID.as_bytes().to_vec())),
                Utc::now(),
            );
        assert_eq!(state.snapshot, Some(StatsSnapshot::new(120, 3, 10, 133)));
    }

    #[test]
    fn test_message_outside_open_is_ignored() {
        let now = Utc::now();
        let before_open = ViewState::default().apply(&ConnectionEvent::text(r#"{"total":1}"#), now);
        assert_eq!(before_open, ViewState::default());

        let after_close = before_open
            .apply(&ConnectionEvent::Open, now)
            .apply(&ConnectionEvent::text(VALID), now)
            .apply(&ConnectionEvent::closed("done"), now);
        let (late, warnings) =
            count_warnings(|| after_close.apply(&ConnectionEvent::text(r#"{"total":99}"#), now));

        assert_eq!(late, after_close);
        assert_eq!(late.snapshot, Some(StatsSnapshot::new(120, 3, 10, 133)));
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_close_keeps_snapshot() {
        let now = Utc::now();
        let state = ViewState::default()
            .apply(&ConnectionEvent::Open, now)
            .apply(&ConnectionEvent::text(VALID), now)
            .apply(&ConnectionEvent::closed("going away"), now);

        assert_eq!(state.status, ConnectionStatus::Disconnected);
        assert_eq!(state.snapshot, Some(StatsSnapshot::new(120, 3, 10, 133)));
    }
}
