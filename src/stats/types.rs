//! Core stats types
//!
//! `StatsSnapshot` mirrors the wire message field-for-field. Every count is
//! optional so a producer that drops or mistypes a field still yields a
//! renderable snapshot.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// State of the live connection backing the current activation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connected,
}

impl ConnectionStatus {
    /// Label shown by the status indicator
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "Disconnected",
            ConnectionStatus::Connected => "Connected",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Most recently decoded national punctuality figures
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatsSnapshot {
    /// Services running on time
    #[serde(default, deserialize_with = "lenient_count")]
    pub on_time: Option<u64>,
    /// Services cancelled or running very late
    #[serde(default, deserialize_with = "lenient_count")]
    pub cancelled_or_very_late: Option<u64>,
    /// Services running late
    #[serde(default, deserialize_with = "lenient_count")]
    pub late: Option<u64>,
    /// Total services counted
    #[serde(default, deserialize_with = "lenient_count")]
    pub total: Option<u64>,
}

/// Accept any JSON value, keeping it only if it is a non-negative integer
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_u64())
}

impl StatsSnapshot {
    /// Snapshot with every field present
    pub fn new(on_time: u64, cancelled_or_very_late: u64, late: u64, total: u64) -> Self {
        Self {
            on_time: Some(on_time),
            cancelled_or_very_late: Some(cancelled_or_very_late),
            late: Some(late),
            total: Some(total),
        }
    }

    /// Labelled fields in display order
    pub fn fields(&self) -> [(&'static str, Option<u64>); 4] {
        [
            ("On Time", self.on_time),
            ("Cancelled or Very Late", self.cancelled_or_very_late),
            ("Late", self.late),
            ("Total", self.total),
        ]
    }
}
