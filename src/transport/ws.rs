//! WebSocket connector
//!
//! Each connection runs as its own reader task. The task reports `Open`
//! after the handshake, forwards every data frame, and reports exactly one
//! `Close` when the stream ends for any reason other than a local close.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;

use super::error::TransportError;
use crate::view::{Connection, ConnectionEvent, Connector, EventSink, Payload};

/// Opens real websocket connections. Must be used from within a tokio
/// runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct WsConnector;

/// Handle to a running connection task
pub struct WsConnection {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl Connection for WsConnection {
    fn close(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            if self.task.is_finished() {
                return;
            }
            // Err means the task exited between the check and the send.
            let _ = shutdown.send(());
        }
    }
}

impl Drop for WsConnection {
    fn drop(&mut self) {
        self.close();
    }
}

impl Connector for WsConnector {
    type Connection = WsConnection;

    fn open(&self, url: &str, sink: EventSink) -> WsConnection {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(run_connection(url.to_string(), sink, shutdown_rx));

        WsConnection {
            shutdown: Some(shutdown_tx),
            task,
        }
    }
}

async fn run_connection(url: String, sink: EventSink, mut shutdown: oneshot::Receiver<()>) {
    let activation = sink.activation();

    let connected = tokio::select! {
        result = tokio_tungstenite::connect_async(url.as_str()) => result,
        _ = &mut shutdown => {
            tracing::debug!(activation = activation, "Connection closed before handshake completed");
            return;
        }
    };

    let stream = match connected {
        Ok((stream, _response)) => stream,
        Err(source) => {
            let err = TransportError::Connect {
                url: url.clone(),
                source,
            };
            tracing::warn!(activation = activation, error = %err, "WebSocket connection failed");
            sink.emit(ConnectionEvent::closed(err.to_string()));
            return;
        }
    };

    tracing::debug!(activation = activation, url = %url, "WebSocket handshake complete");

    let (mut write, mut read) = stream.split();
    if !sink.emit(ConnectionEvent::Open) {
        let _ = write.send(Message::Close(None)).await;
        return;
    }

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                let _ = write.send(Message::Close(None)).await;
                break;
            }
            frame = read.next() => {
                let event = match frame {
                    Some(Ok(Message::Text(text))) => ConnectionEvent::Message(Payload::Text(text)),
                    Some(Ok(Message::Binary(data))) => ConnectionEvent::Message(Payload::Binary(data)),
                    Some(Ok(Message::Close(frame))) => {
                        let (code, reason) = frame
                            .map(|f| (Some(u16::from(f.code)), f.reason.into_owned()))
                            .unwrap_or((None, String::new()));
                        sink.emit(ConnectionEvent::Close { code, reason });
                        break;
                    }
                    // Ping/Pong are answered by tungstenite
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        let err = TransportError::from(e);
                        tracing::warn!(activation = activation, error = %err, "WebSocket connection lost");
                        sink.emit(ConnectionEvent::closed(err.to_string()));
                        break;
                    }
                    None => {
                        sink.emit(ConnectionEvent::closed("stream ended"));
                        break;
                    }
                };

                if !sink.emit(event) {
                    let _ = write.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    }

    tracing::debug!(activation = activation, "WebSocket reader task finished");
}
