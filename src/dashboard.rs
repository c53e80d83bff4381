//! Dashboard Runtime
//!
//! Single-threaded event loop around a `RealtimeView`: every connection
//! event is applied here, and a new frame is written only when its content
//! changes.

use std::future::Future;
use std::io::{self, Write};
use tokio::sync::mpsc;

use crate::view::{render, Connector, Envelope, RealtimeView};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Drives a view and writes its frames to `out`
pub struct Dashboard<C: Connector, W: Write> {
    view: RealtimeView<C>,
    events_rx: mpsc::UnboundedReceiver<Envelope>,
    out: W,
    clear_screen: bool,
    last_frame: Option<String>,
}

impl<C: Connector, W: Write> Dashboard<C, W> {
    pub fn new(connector: C, out: W) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            view: RealtimeView::new(connector, events_tx),
            events_rx,
            out,
            clear_screen: false,
            last_frame: None,
        }
    }

    /// Clear the terminal before each frame
    pub fn clear_screen(mut self, enabled: bool) -> Self {
        self.clear_screen = enabled;
        self
    }

    /// Activate the view against `url` and draw the initial frame
    pub fn start(&mut self, url: &str) -> io::Result<()> {
        self.view.activate(url);
        self.redraw()
    }

    /// Apply every event already queued. Returns how many changed the state.
    pub fn pump(&mut self) -> io::Result<usize> {
        let mut changed = 0;
        while let Ok(envelope) = self.events_rx.try_recv() {
            if self.view.handle(envelope) {
                changed += 1;
            }
        }

        if changed > 0 {
            self.redraw()?;
        }
        Ok(changed)
    }

    /// Run until `shutdown` completes, then close the connection.
    pub async fn run<F>(&mut self, url: &str, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        self.start(url)?;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down dashboard");
                    break;
                }
                envelope = self.events_rx.recv() => {
                    // The view holds a sender, so the channel never closes here.
                    let Some(envelope) = envelope else { break };
                    if self.view.handle(envelope) {
                        self.redraw()?;
                    }
                }
            }
        }

        self.view.deactivate();
        Ok(())
    }

    pub fn view(&self) -> &RealtimeView<C> {
        &self.view
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    fn redraw(&mut self) -> io::Result<()> {
        let frame = render(self.view.state());
        if self.last_frame.as_deref() == Some(frame.as_str()) {
            return Ok(());
        }

        if self.clear_screen {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()?;

        self.last_frame = Some(frame);
        Ok(())
    }
}
