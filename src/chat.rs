//! Conversation state for one page lifetime.
//!
//! Owns the append-only message list and the flags the views render from.
//! Nothing here touches the network directly: outbound frames go through a
//! [`FrameSink`], inbound frames are handed in by whoever reads the socket.

use crate::error::{ChatResult, SendRejected};
use crate::session::SessionId;
use crate::timestamp::now_rfc3339;
use crate::types::{ChatMessage, InboundFrame, MessageMetadata, OutboundFrame, Sender};

/// Token that asks the assistant to open the conversation.
pub const START_TOKEN: &str = "start";

/// Anything that can carry an outbound frame to the assistant.
pub trait FrameSink {
    fn send_frame(&self, frame: OutboundFrame) -> ChatResult<()>;
}

/// Socket lifecycle as seen by the conversation.
#[derive(Clone, Debug, PartialEq)]
pub enum SocketEvent {
    Opened,
    Frame(InboundFrame),
    Closed,
    Error(String),
}

/// Last-known socket lifecycle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No lifecycle event seen yet.
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }

    pub fn as_class(self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Connecting | ConnectionStatus::Disconnected => "disconnected",
        }
    }
}

pub fn upload_echo(file_name: &str) -> String {
    format!("📎 Salary slip uploaded: {file_name}")
}

#[derive(Debug)]
pub struct Conversation {
    session: SessionId,
    messages: Vec<ChatMessage>,
    next_id: u64,
    status: ConnectionStatus,
    typing: bool,
    upload_visible: bool,
    start_requested: bool,
    start_sent: bool,
}

impl Conversation {
    pub fn new(session: SessionId) -> Self {
        Self {
            session,
            messages: Vec::new(),
            next_id: 1,
            status: ConnectionStatus::Connecting,
            typing: false,
            upload_visible: false,
            start_requested: false,
            start_sent: false,
        }
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn upload_visible(&self) -> bool {
        self.upload_visible
    }

    /// Mark that the chat was opened and the assistant should greet.
    pub fn request_start(&mut self) {
        self.start_requested = true;
    }

    /// True once per conversation: the chat was opened, the socket is up and
    /// nothing has been said yet.
    pub fn should_start(&self) -> bool {
        self.start_requested && !self.start_sent && self.is_connected() && self.is_empty()
    }

    pub fn apply(&mut self, event: SocketEvent) {
        match event {
            SocketEvent::Opened => self.on_open(),
            SocketEvent::Frame(frame) => {
                self.receive(frame);
            }
            SocketEvent::Closed => self.on_close(),
            SocketEvent::Error(reason) => self.on_error(&reason),
        }
    }

    pub fn on_open(&mut self) {
        tracing::info!(session = %self.session, "connected to assistant");
        self.status = ConnectionStatus::Connected;
    }

    pub fn on_close(&mut self) {
        tracing::info!(session = %self.session, "disconnected from assistant");
        self.status = ConnectionStatus::Disconnected;
    }

    pub fn on_error(&self, reason: &str) {
        tracing::error!(session = %self.session, reason, "assistant socket error");
    }

    /// Send user text. On success exactly one user message is appended and
    /// exactly one frame is handed to `sink`.
    pub fn send<S: FrameSink + ?Sized>(
        &mut self,
        text: &str,
        sink: Option<&S>,
    ) -> Result<(), SendRejected> {
        let content = text.trim();
        if content.is_empty() {
            return Err(SendRejected::Empty);
        }
        let frame = OutboundFrame {
            content: content.to_string(),
            sender: Sender::User,
            timestamp: now_rfc3339(),
        };
        self.dispatch(frame.clone(), sink)?;
        self.push(frame.content, Sender::User, frame.timestamp, None);
        Ok(())
    }

    /// Ask the assistant to open the conversation. The token is not shown
    /// locally.
    pub fn send_start<S: FrameSink + ?Sized>(
        &mut self,
        sink: Option<&S>,
    ) -> Result<(), SendRejected> {
        let frame = OutboundFrame {
            content: START_TOKEN.to_string(),
            sender: Sender::User,
            timestamp: now_rfc3339(),
        };
        self.dispatch(frame, sink)?;
        self.start_sent = true;
        Ok(())
    }

    fn dispatch<S: FrameSink + ?Sized>(
        &mut self,
        frame: OutboundFrame,
        sink: Option<&S>,
    ) -> Result<(), SendRejected> {
        let sink = sink.ok_or(SendRejected::NoSocket)?;
        if !self.is_connected() {
            return Err(SendRejected::Disconnected);
        }
        if let Err(err) = sink.send_frame(frame) {
            tracing::warn!(session = %self.session, error = %err, "frame not sent");
            self.status = ConnectionStatus::Disconnected;
            return Err(SendRejected::Disconnected);
        }
        self.typing = true;
        Ok(())
    }

    /// Apply an inbound assistant frame.
    pub fn receive(&mut self, frame: InboundFrame) -> &ChatMessage {
        self.typing = false;
        let metadata = frame.merged_metadata();
        if metadata.requires_salary_slip() {
            self.upload_visible = true;
        }
        let timestamp = frame.timestamp.unwrap_or_else(now_rfc3339);
        self.push(frame.content, Sender::Bot, timestamp, Some(metadata))
    }

    /// Record a finished salary slip upload: the local echo, then the
    /// assistant's reply.
    pub fn record_upload(&mut self, file_name: &str, reply: String) {
        self.push(upload_echo(file_name), Sender::User, now_rfc3339(), None);
        self.push(reply, Sender::Bot, now_rfc3339(), None);
        self.upload_visible = false;
    }

    fn push(
        &mut self,
        content: String,
        sender: Sender,
        timestamp: String,
        metadata: Option<MessageMetadata>,
    ) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            content,
            sender,
            timestamp,
            metadata,
        });
        &self.messages[self.messages.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatError;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        frames: RefCell<Vec<OutboundFrame>>,
        closed: bool,
    }

    impl FrameSink for RecordingSink {
        fn send_frame(&self, frame: OutboundFrame) -> ChatResult<()> {
            if self.closed {
                return Err(ChatError::SocketClosed);
            }
            self.frames.borrow_mut().push(frame);
            Ok(())
        }
    }

    fn connected() -> Conversation {
        let mut convo = Conversation::new(SessionId::from("abc123"));
        convo.on_open();
        convo
    }

    fn bot_frame(json: &str) -> InboundFrame {
        InboundFrame::from_json(json).unwrap()
    }

    #[test]
    fn send_appends_one_message_and_one_frame() {
        let sink = RecordingSink::default();
        let mut convo = connected();
        convo.send("  hello there  ", Some(&sink)).unwrap();

        assert_eq!(convo.messages().len(), 1);
        let msg = &convo.messages()[0];
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.content, "hello there");

        let frames = sink.frames.borrow();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].content, "hello there");
        assert_eq!(frames[0].sender, Sender::User);
        assert!(convo.is_typing());
    }

    #[test]
    fn blank_input_is_rejected() {
        let sink = RecordingSink::default();
        let mut convo = connected();
        for blank in ["", "   ", "\n\t "] {
            assert_eq!(convo.send(blank, Some(&sink)), Err(SendRejected::Empty));
        }
        assert!(convo.is_empty());
        assert!(sink.frames.borrow().is_empty());
        assert!(!convo.is_typing());
    }

    #[test]
    fn send_requires_socket_and_connection() {
        let sink = RecordingSink::default();
        let mut convo = Conversation::new(SessionId::from("abc123"));
        assert_eq!(
            convo.send("hi", None::<&RecordingSink>),
            Err(SendRejected::NoSocket)
        );
        assert_eq!(
            convo.send("hi", Some(&sink)),
            Err(SendRejected::Disconnected)
        );
        convo.on_open();
        convo.on_close();
        assert_eq!(
            convo.send("hi", Some(&sink)),
            Err(SendRejected::Disconnected)
        );
        assert!(convo.is_empty());
        assert!(sink.frames.borrow().is_empty());
    }

    #[test]
    fn failed_write_marks_disconnected() {
        let sink = RecordingSink {
            closed: true,
            ..Default::default()
        };
        let mut convo = connected();
        assert_eq!(
            convo.send("hi", Some(&sink)),
            Err(SendRejected::Disconnected)
        );
        assert!(!convo.is_connected());
        assert!(convo.is_empty());
    }

    #[test]
    fn start_token_is_sent_but_not_shown() {
        let sink = RecordingSink::default();
        let mut convo = connected();
        convo.send_start(Some(&sink)).unwrap();
        assert!(convo.is_empty());
        assert!(convo.is_typing());
        assert_eq!(sink.frames.borrow()[0].content, START_TOKEN);
    }

    #[test]
    fn start_waits_for_request_and_connection() {
        let mut convo = Conversation::new(SessionId::from("abc123"));
        assert!(!convo.should_start());
        convo.request_start();
        assert!(!convo.should_start());
        convo.apply(SocketEvent::Opened);
        assert!(convo.should_start());

        let sink = RecordingSink::default();
        convo.send_start(Some(&sink)).unwrap();
        assert!(!convo.should_start());
        assert_eq!(sink.frames.borrow().len(), 1);
    }

    #[test]
    fn start_is_skipped_once_messages_exist() {
        let mut convo = connected();
        convo.receive(bot_frame(r#"{"content":"Welcome back"}"#));
        convo.request_start();
        assert!(!convo.should_start());
    }

    #[test]
    fn rejected_start_can_be_retried() {
        let mut convo = connected();
        convo.request_start();
        let closed = RecordingSink {
            closed: true,
            ..Default::default()
        };
        assert!(convo.send_start(Some(&closed)).is_err());
        convo.on_open();
        assert!(convo.should_start());
    }

    #[test]
    fn inbound_frame_clears_typing_and_appends() {
        let sink = RecordingSink::default();
        let mut convo = connected();
        convo.send("hi", Some(&sink)).unwrap();
        let msg = convo.receive(bot_frame(
            r#"{"content":"Welcome","timestamp":"2024-01-01T10:00:00"}"#,
        ));
        assert_eq!(msg.sender, Sender::Bot);
        assert_eq!(msg.timestamp, "2024-01-01T10:00:00");
        assert!(!convo.is_typing());
        assert_eq!(convo.messages().len(), 2);
        assert!(convo.messages()[0].id < convo.messages()[1].id);
    }

    #[test]
    fn salary_flag_reveals_upload_and_absence_keeps_it() {
        let mut convo = connected();
        convo.receive(bot_frame(r#"{"content":"Need details"}"#));
        assert!(!convo.upload_visible());

        convo.receive(bot_frame(
            r#"{"content":"Upload please","metadata":{"salary_required":true}}"#,
        ));
        assert!(convo.upload_visible());

        convo.receive(bot_frame(r#"{"content":"Still waiting","metadata":{}}"#));
        assert!(convo.upload_visible());
    }

    #[test]
    fn suggestions_drive_the_same_send_path() {
        let sink = RecordingSink::default();
        let mut convo = connected();
        let labels = convo
            .receive(bot_frame(
                r#"{"content":"Choose","metadata":{"suggestions":["A","B"]}}"#,
            ))
            .suggestions()
            .to_vec();
        assert_eq!(labels, vec!["A", "B"]);

        convo.send(&labels[0], Some(&sink)).unwrap();
        assert_eq!(sink.frames.borrow()[0].content, "A");
        assert_eq!(convo.messages().last().unwrap().content, "A");
    }

    #[test]
    fn lifecycle_events_drive_connected_flag() {
        let mut convo = Conversation::new(SessionId::from("abc123"));
        assert_eq!(convo.status(), ConnectionStatus::Connecting);
        convo.apply(SocketEvent::Opened);
        assert!(convo.is_connected());
        convo.apply(SocketEvent::Error("reset".into()));
        assert!(convo.is_connected());
        convo.apply(SocketEvent::Frame(bot_frame(r#"{"content":"Hi"}"#)));
        assert_eq!(convo.messages().len(), 1);
        convo.apply(SocketEvent::Closed);
        assert_eq!(convo.status(), ConnectionStatus::Disconnected);
        assert_eq!(convo.status().label(), "Disconnected");
    }

    #[test]
    fn upload_appends_echo_then_reply() {
        let mut convo = connected();
        convo.receive(bot_frame(
            r#"{"content":"Upload","metadata":{"salary_required":true}}"#,
        ));
        convo.record_upload("payslip.pdf", "Received".into());

        let tail: Vec<_> = convo
            .messages()
            .iter()
            .skip(1)
            .map(|m| (m.sender, m.content.as_str()))
            .collect();
        assert_eq!(
            tail,
            vec![
                (Sender::User, "📎 Salary slip uploaded: payslip.pdf"),
                (Sender::Bot, "Received"),
            ]
        );
        assert!(!convo.upload_visible());
    }
}
