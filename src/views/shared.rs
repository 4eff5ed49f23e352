use crate::chat::{Conversation, SocketEvent};
use crate::config::WidgetConfig;
use crate::error::{ChatError, SendRejected};
use crate::session::{Endpoints, SessionId};
use crate::transport::{self, SocketHandle};
use crate::upload::UploadClient;
use dioxus::prelude::*;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

const START_DELAY: Duration = Duration::from_millis(500);
pub const UPLOAD_FAILED_ALERT: &str = "Failed to upload file. Please try again.";

/// Everything a chat surface needs, as copyable signal handles.
#[derive(Clone, Copy, PartialEq)]
pub struct ChatController {
    pub conversation: Signal<Conversation>,
    pub alert: Signal<Option<String>>,
    socket: Signal<Option<SocketHandle>>,
    endpoints: Signal<Option<Endpoints>>,
}

/// Create the session, open its socket and close it again when the owning
/// component unmounts.
pub fn use_chat_session(config: &WidgetConfig) -> ChatController {
    let session = use_hook(SessionId::generate);
    let conversation = use_signal(|| Conversation::new(session.clone()));
    let alert = use_signal(|| Option::<String>::None);
    let endpoints = use_signal(|| match Endpoints::resolve(config, &session) {
        Ok(endpoints) => Some(endpoints),
        Err(err) => {
            tracing::error!(error = %err, "assistant endpoint is not usable");
            None
        }
    });
    let socket = use_signal(|| {
        let url = endpoints.peek().as_ref()?.socket.clone();
        let (handle, events) = transport::open(url);
        spawn(pump_events(events, conversation, handle.clone()));
        Some(handle)
    });

    let teardown = socket.peek().clone();
    use_drop(move || {
        if let Some(handle) = &teardown {
            handle.close();
        }
    });

    ChatController {
        conversation,
        alert,
        socket,
        endpoints,
    }
}

async fn pump_events(
    mut events: UnboundedReceiver<SocketEvent>,
    mut conversation: Signal<Conversation>,
    socket: SocketHandle,
) {
    while let Some(event) = events.recv().await {
        let opened = event == SocketEvent::Opened;
        conversation.write().apply(event);
        // A start requested before the handshake finished goes out now.
        if opened && conversation.peek().should_start() {
            spawn(delayed_start(conversation, socket.clone()));
        }
    }
}

async fn delayed_start(mut conversation: Signal<Conversation>, socket: SocketHandle) {
    tokio::time::sleep(START_DELAY).await;
    if !conversation.peek().should_start() {
        return;
    }
    if let Err(reason) = conversation.write().send_start(Some(&socket)) {
        tracing::warn!(%reason, "start token not sent");
    }
}

impl ChatController {
    /// Returns true when the text went out and the input can be cleared.
    pub fn send(&self, text: &str) -> bool {
        let mut conversation = self.conversation;
        let socket = self.socket.peek();
        match conversation.write().send(text, socket.as_ref()) {
            Ok(()) => true,
            Err(SendRejected::Empty) => false,
            Err(reason) => {
                tracing::debug!(%reason, "message not sent");
                false
            }
        }
    }

    /// Kick off the conversation if nothing has been said yet. Before the
    /// socket opens the request is parked until `Opened` arrives.
    pub fn start_conversation(&self) {
        let mut conversation = self.conversation;
        conversation.write().request_start();
        if !conversation.peek().should_start() {
            return;
        }
        if let Some(socket) = self.socket.peek().clone() {
            spawn(delayed_start(conversation, socket));
        }
    }

    pub fn upload(&self, file_name: String, bytes: Vec<u8>) {
        let endpoint = self
            .endpoints
            .peek()
            .as_ref()
            .map(|endpoints| endpoints.upload.clone());
        let Some(endpoint) = endpoint else {
            self.fail_upload("no upload endpoint configured");
            return;
        };

        let controller = *self;
        spawn(async move {
            match UploadClient::new()
                .upload_salary_slip(&endpoint, &file_name, bytes)
                .await
            {
                Ok(reply) => {
                    let mut conversation = controller.conversation;
                    conversation
                        .write()
                        .record_upload(&file_name, reply.message);
                }
                Err(err) => controller.fail_upload(&err.to_string()),
            }
        });
    }

    pub fn fail_upload(&self, reason: &str) {
        tracing::error!(reason, "salary slip upload failed");
        let mut alert = self.alert;
        alert.set(Some(UPLOAD_FAILED_ALERT.to_string()));
    }

    pub fn download_link(&self, download_url: &str) -> Option<String> {
        let endpoints = self.endpoints.peek();
        match endpoints.as_ref()?.download(download_url) {
            Ok(url) => Some(url.to_string()),
            Err(err) => {
                tracing::warn!(download_url, error = %err, "bad download link");
                None
            }
        }
    }
}

/// Open a URL in the system browser, logging failures.
pub fn open_external(url: &str) {
    if let Err(source) = open::that(url) {
        let err = ChatError::Browser {
            url: url.to_string(),
            source,
        };
        tracing::error!(error = %err, "could not open browser");
    }
}

pub fn display_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::display_file_name;

    #[test]
    fn file_names_drop_directories() {
        assert_eq!(display_file_name("/home/me/payslip.pdf"), "payslip.pdf");
        assert_eq!(display_file_name("payslip.pdf"), "payslip.pdf");
    }
}
