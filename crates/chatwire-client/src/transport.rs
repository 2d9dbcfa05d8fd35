//! WebSocket transport for the session.
//!
//! Thin I/O layer that opens the socket, forwards outbound text, and streams
//! lifecycle events back to the caller as [`SessionEvent`]s tagged with the
//! connection generation. Protocol logic stays in the Sans-IO
//! [`Session`](crate::Session): the state machine's generation guard decides
//! what is stale, so this layer never has to detach handlers in a hurry.
//!
//! A failed connect surfaces [`SessionEvent::TransportErrored`] followed by
//! [`SessionEvent::Closed`], the same sequence a browser socket produces, so
//! the state machine schedules its reconnect either way.

use futures::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};

use crate::event::SessionEvent;

/// Outbound channel capacity. Sends are only issued while the session is
/// open, so the buffer never holds more than a burst of user input.
const OUTBOUND_BUFFER: usize = 32;

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The socket task has terminated; the text was not sent.
    #[error("connection closed: {0}")]
    ChannelClosed(String),
}

/// Handle to a live socket bound to one connection generation.
///
/// Dropping the handle closes the socket gracefully (close frame, then a
/// final [`SessionEvent::Closed`] which the session discards as stale after
/// a deliberate teardown). [`ConnectedSocket::stop`] aborts the task outright.
#[derive(Debug)]
pub struct ConnectedSocket {
    to_server: mpsc::Sender<String>,
    generation: u64,
    abort_handle: tokio::task::AbortHandle,
}

impl ConnectedSocket {
    /// Generation of the connection this handle belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Queue text for sending on the socket.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ChannelClosed`] if the socket task has
    /// terminated; the caller should feed [`SessionEvent::SendFailed`] back
    /// into the session.
    pub async fn send(&self, text: String) -> Result<(), TransportError> {
        self.to_server
            .send(text)
            .await
            .map_err(|e| TransportError::ChannelClosed(e.to_string()))
    }

    /// Abort the socket task without a close handshake.
    pub fn stop(&self) {
        self.abort_handle.abort();
    }
}

/// Open a socket to `url` and stream its lifecycle into `events`.
///
/// Returns immediately; the handshake runs on a spawned task and reports
/// through `events`, mirroring the deferred-open semantics the session
/// expects. Must be called from within a tokio runtime.
pub fn connect(
    url: String,
    generation: u64,
    events: mpsc::Sender<SessionEvent>,
) -> ConnectedSocket {
    let (to_server_tx, to_server_rx) = mpsc::channel::<String>(OUTBOUND_BUFFER);

    let handle = tokio::spawn(run_connection(url, generation, to_server_rx, events));

    ConnectedSocket { to_server: to_server_tx, generation, abort_handle: handle.abort_handle() }
}

/// Run the connection, bridging between the channels and the socket.
async fn run_connection(
    url: String,
    generation: u64,
    mut outgoing: mpsc::Receiver<String>,
    events: mpsc::Sender<SessionEvent>,
) {
    let (stream, _response) = match connect_async(&url).await {
        Ok(pair) => pair,
        Err(e) => {
            tracing::warn!(error = %e, "websocket connect failed");
            let _ = events
                .send(SessionEvent::TransportErrored { generation, detail: e.to_string() })
                .await;
            let _ =
                events.send(SessionEvent::Closed { generation, code: None, reason: None }).await;
            return;
        },
    };

    let (mut ws_tx, mut ws_rx) = stream.split();
    let _ = events.send(SessionEvent::Opened { generation }).await;

    loop {
        tokio::select! {
            outbound = outgoing.recv() => match outbound {
                Some(text) => {
                    if let Err(e) = ws_tx.send(WsMessage::Text(text)).await {
                        tracing::warn!(error = %e, "websocket send failed");
                        let _ = events.send(SessionEvent::SendFailed { generation }).await;
                    }
                },
                None => {
                    // Handle dropped: deliberate teardown, close gracefully.
                    let _ = ws_tx.send(WsMessage::Close(None)).await;
                    let _ = events
                        .send(SessionEvent::Closed { generation, code: None, reason: None })
                        .await;
                    return;
                },
            },

            inbound = ws_rx.next() => match inbound {
                Some(Ok(WsMessage::Text(payload))) => {
                    let _ = events
                        .send(SessionEvent::FrameReceived { generation, payload })
                        .await;
                },
                Some(Ok(WsMessage::Ping(data))) => {
                    let _ = ws_tx.send(WsMessage::Pong(data)).await;
                },
                Some(Ok(WsMessage::Close(frame))) => {
                    let (code, reason) = frame
                        .map(|f| {
                            let reason = f.reason.to_string();
                            (
                                Some(u16::from(f.code)),
                                if reason.is_empty() { None } else { Some(reason) },
                            )
                        })
                        .unwrap_or((None, None));
                    let _ = events
                        .send(SessionEvent::Closed { generation, code, reason })
                        .await;
                    return;
                },
                Some(Ok(_)) => {
                    // Binary and pong frames are not part of the protocol.
                },
                Some(Err(e)) => {
                    tracing::warn!(error = %e, "websocket stream error");
                    let _ = events
                        .send(SessionEvent::TransportErrored { generation, detail: e.to_string() })
                        .await;
                    let _ = events
                        .send(SessionEvent::Closed { generation, code: None, reason: None })
                        .await;
                    return;
                },
                None => {
                    let _ = events
                        .send(SessionEvent::Closed { generation, code: None, reason: None })
                        .await;
                    return;
                },
            },
        }
    }
}
