//! Payload decoding
//!
//! The only structural requirement on a payload is that it parses as one
//! JSON value. Field mapping is lenient: anything that is not a
//! non-negative integer under the expected key becomes `None`.

use serde::Deserialize;
use serde_json::Value;

use super::error::DecodeResult;
use super::types::StatsSnapshot;

/// Decode a text payload into the snapshot it carries.
///
/// Falsy JSON values (`null`, `false`, `0`, `""`) decode to `None`, which
/// puts the dashboard back to waiting for data. An object decodes to a
/// snapshot of its known fields. Any other value decodes to a snapshot with
/// every field empty.
pub fn decode_snapshot(payload: &str) -> DecodeResult<Option<StatsSnapshot>> {
    let value: Value = serde_json::from_str(payload)?;
    snapshot_from_value(&value)
}

/// Decode a binary payload, which must be UTF-8 text.
pub fn decode_snapshot_bytes(payload: Vec<u8>) -> DecodeResult<Option<StatsSnapshot>> {
    let text = String::from_utf8(payload)?;
    decode_snapshot(&text)
}

fn snapshot_from_value(value: &Value) -> DecodeResult<Option<StatsSnapshot>> {
    if is_falsy(value) {
        return Ok(None);
    }

    match value {
        Value::Object(_) => Ok(Some(StatsSnapshot::deserialize(value)?)),
        _ => Ok(Some(StatsSnapshot::default())),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
