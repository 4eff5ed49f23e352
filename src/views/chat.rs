use crate::markdown::format_message;
use crate::timestamp::format_message_timestamp;
use crate::types::ChatMessage;
use crate::upload::ACCEPTED_EXTENSIONS;
use crate::views::shared::{ChatController, display_file_name, open_external};
use dioxus::events::Key;
use dioxus::prelude::*;

const CUSTOMER_CARE: &str = "1800-209-8800";

/// Full-page chat: header, conversation, composer and footer.
#[component]
pub fn ChatView(controller: ChatController, company_name: String) -> Element {
    rsx! {
        div { class: "chat-header",
            div { class: "header-content",
                div { class: "logo",
                    span { class: "logo-text", "{company_name.to_uppercase()}" }
                }
                ConnectionBadge { controller }
            }
        }
        div { class: "chat-container",
            MessageList { controller }
            div { class: "input-container",
                UploadSection { controller }
                Composer { controller, placeholder: "Type your message..." }
            }
        }
        div { class: "chat-footer",
            p { "🔒 Your data is secure with {company_name} | Customer Care: {CUSTOMER_CARE}" }
        }
        UploadAlert { controller }
    }
}

#[component]
pub fn ConnectionBadge(controller: ChatController) -> Element {
    let status = controller.conversation.read().status();
    rsx! {
        div { class: "connection-status",
            span { class: format_args!("status-indicator {}", status.as_class()) }
            "{status.label()}"
        }
    }
}

#[component]
pub fn MessageList(controller: ChatController) -> Element {
    let (messages, typing) = {
        let conversation = controller.conversation.read();
        (conversation.messages().to_vec(), conversation.is_typing())
    };

    rsx! {
        div { class: "messages-container",
            for message in messages {
                MessageBubble { key: "{message.id}", message, controller }
            }
            if typing {
                div { class: "message bot",
                    div { class: "message-content",
                        div { class: "typing-indicator",
                            span {}
                            span {}
                            span {}
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageBubble(message: ChatMessage, controller: ChatController) -> Element {
    let html = format_message(&message.content);
    let time = format_message_timestamp(&message.timestamp);
    let download = message
        .download_url()
        .and_then(|path| controller.download_link(path));
    let suggestions = message.suggestions().to_vec();

    rsx! {
        div { class: format_args!("message {}", message.sender.as_class()),
            div { class: "message-content",
                div { class: "message-text", dangerous_inner_html: "{html}" }
                if let Some(ts) = time {
                    div { class: "message-time", "{ts}" }
                }
                if let Some(link) = download {
                    div { class: "download-section",
                        button {
                            class: "download-btn",
                            r#type: "button",
                            onclick: move |_| open_external(&link),
                            "📄 Download Sanction Letter"
                        }
                    }
                }
                if !suggestions.is_empty() {
                    div { class: "suggestions-container",
                        for suggestion in suggestions {
                            SuggestionButton { label: suggestion, controller }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SuggestionButton(label: String, controller: ChatController) -> Element {
    let reply = label.clone();
    rsx! {
        button {
            class: "suggestion-btn",
            r#type: "button",
            onclick: move |_| {
                controller.send(&reply);
            },
            "{label}"
        }
    }
}

#[component]
pub fn UploadSection(controller: ChatController) -> Element {
    if !controller.conversation.read().upload_visible() {
        return rsx! {};
    }

    rsx! {
        div { class: "upload-section",
            label { class: "upload-btn",
                input {
                    r#type: "file",
                    accept: ACCEPTED_EXTENSIONS,
                    multiple: false,
                    style: "display: none;",
                    onchange: move |evt: FormEvent| async move {
                        let Some(engine) = evt.files() else {
                            return;
                        };
                        let Some(path) = engine.files().into_iter().next() else {
                            return;
                        };
                        match engine.read_file(&path).await {
                            Some(bytes) => controller.upload(display_file_name(&path), bytes),
                            None => controller.fail_upload("selected file could not be read"),
                        }
                    },
                }
                "📎 Upload Salary Slip"
            }
        }
    }
}

#[component]
pub fn Composer(controller: ChatController, placeholder: &'static str) -> Element {
    let mut input = use_signal(String::new);
    let connected = controller.conversation.read().is_connected();

    let mut submit = move || {
        let text = input();
        if controller.send(&text) {
            input.set(String::new());
        }
    };

    rsx! {
        div { class: "input-row",
            textarea {
                class: "message-input",
                rows: "1",
                placeholder,
                value: "{input}",
                disabled: !connected,
                oninput: move |ev| input.set(ev.value()),
                onkeydown: move |ev| {
                    if ev.key() == Key::Enter && !ev.modifiers().shift() {
                        ev.prevent_default();
                        submit();
                    }
                },
            }
            button {
                class: "send-btn",
                r#type: "button",
                disabled: !connected || input().trim().is_empty(),
                onclick: move |_| submit(),
                "Send"
            }
        }
    }
}

/// Modal stand-in for a blocking alert; must be acknowledged.
#[component]
pub fn UploadAlert(controller: ChatController) -> Element {
    let mut alert = controller.alert;
    let Some(message) = alert() else {
        return rsx! {};
    };

    rsx! {
        div { class: "alert-overlay", role: "alertdialog", aria_modal: "true",
            div { class: "alert-box",
                p { "{message}" }
                button {
                    class: "alert-ok",
                    r#type: "button",
                    autofocus: true,
                    onclick: move |_| alert.set(None),
                    "OK"
                }
            }
        }
    }
}
