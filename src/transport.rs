//! Assistant session socket.
//!
//! One tokio task owns the WebSocket. The UI talks to it through a cloneable
//! [`SocketHandle`] and hears back through a channel of [`SocketEvent`]s.
//! There is no reconnect: once `Closed` is emitted the task is gone.

use crate::chat::{FrameSink, SocketEvent};
use crate::error::{ChatError, ChatResult};
use crate::types::{InboundFrame, OutboundFrame};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use url::Url;

#[derive(Debug)]
enum Command {
    Send(OutboundFrame),
    Close,
}

#[derive(Clone, Debug)]
pub struct SocketHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl SocketHandle {
    /// Send a close frame and stop the socket task.
    pub fn close(&self) {
        let _ = self.commands.send(Command::Close);
    }
}

impl FrameSink for SocketHandle {
    fn send_frame(&self, frame: OutboundFrame) -> ChatResult<()> {
        self.commands
            .send(Command::Send(frame))
            .map_err(|_| ChatError::SocketClosed)
    }
}

/// Open the session socket. Must be called inside a tokio runtime.
///
/// The handle is usable immediately; frames queued before the handshake
/// finishes are written once it does.
pub fn open(url: Url) -> (SocketHandle, mpsc::UnboundedReceiver<SocketEvent>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    tokio::spawn(run_socket(url, command_rx, event_tx));
    (
        SocketHandle {
            commands: command_tx,
        },
        event_rx,
    )
}

async fn run_socket(
    url: Url,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<SocketEvent>,
) {
    tracing::debug!(%url, "opening assistant socket");
    let stream = match connect_async(url.as_str()).await {
        Ok((stream, _)) => stream,
        Err(err) => {
            let err = ChatError::Connect(err.to_string());
            let _ = events.send(SocketEvent::Error(err.to_string()));
            let _ = events.send(SocketEvent::Closed);
            return;
        }
    };
    let _ = events.send(SocketEvent::Opened);

    let (mut write, mut read) = stream.split();
    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Send(frame)) => {
                    let payload = match serde_json::to_string(&frame) {
                        Ok(payload) => payload,
                        Err(err) => {
                            tracing::error!(error = %err, "could not encode frame");
                            continue;
                        }
                    };
                    if let Err(err) = write.send(WsMessage::Text(payload)).await {
                        let _ = events.send(SocketEvent::Error(err.to_string()));
                        break;
                    }
                }
                Some(Command::Close) | None => {
                    let _ = write.send(WsMessage::Close(None)).await;
                    break;
                }
            },
            incoming = read.next() => match incoming {
                Some(Ok(WsMessage::Text(text))) => match decode_frame(&text) {
                    Ok(frame) => {
                        let _ = events.send(SocketEvent::Frame(frame));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "dropping undecodable frame");
                    }
                },
                Some(Ok(WsMessage::Ping(data))) => {
                    let _ = write.send(WsMessage::Pong(data)).await;
                }
                Some(Ok(WsMessage::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    let _ = events.send(SocketEvent::Error(err.to_string()));
                    break;
                }
            },
        }
    }

    tracing::debug!(%url, "assistant socket closed");
    let _ = events.send(SocketEvent::Closed);
}

fn decode_frame(text: &str) -> ChatResult<InboundFrame> {
    Ok(InboundFrame::from_json(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_reports_malformed_json() {
        assert!(matches!(decode_frame("not json"), Err(ChatError::Decode(_))));
        assert!(matches!(decode_frame(r#"{"timestamp":"x"}"#), Err(ChatError::Decode(_))));
        assert_eq!(decode_frame(r#"{"content":"ok"}"#).unwrap().content, "ok");
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_error_then_closed() {
        // Port 9 (discard) is not expected to accept WebSocket handshakes.
        let url = Url::parse("ws://127.0.0.1:9/ws/s1").unwrap();
        let (handle, mut events) = open(url);

        assert!(matches!(events.recv().await, Some(SocketEvent::Error(_))));
        assert_eq!(events.recv().await, Some(SocketEvent::Closed));
        assert_eq!(events.recv().await, None);
        assert!(matches!(
            handle.send_frame(OutboundFrame {
                content: "hi".into(),
                sender: crate::types::Sender::User,
                timestamp: String::new(),
            }),
            Err(ChatError::SocketClosed)
        ));
    }
}
