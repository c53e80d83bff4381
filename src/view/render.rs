//! Text rendering
//!
//! Produces the full dashboard frame for a `ViewState`. Pure: equal states
//! always render to equal frames.

use std::fmt::Write;

use super::state::ViewState;

pub const TITLE: &str = "Current Realtime National Rail Stats";
pub const WAITING: &str = "Waiting for data...";

/// Render the dashboard frame
pub fn render(state: &ViewState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", TITLE);
    let _ = writeln!(out);
    let _ = writeln!(out, "Connection status: {}", state.status);
    let _ = writeln!(out);

    match &state.snapshot {
        Some(snapshot) => {
            let fields = snapshot.fields();
            let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

            for (label, value) in fields {
                let value = value.map(|v| v.to_string()).unwrap_or_default();
                let _ = writeln!(out, "  {:<width$}  {}", label, value, width = width);
            }

            if let Some(at) = state.updated_at {
                let _ = writeln!(out);
                let _ = writeln!(out, "Last update: {}", at.format("%H:%M:%S UTC"));
            }
        }
        None => {
            let _ = writeln!(out, "{}", WAITING);
        }
    }

    out
}
