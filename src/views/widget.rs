use crate::config::WidgetConfig;
use crate::views::chat::{Composer, ConnectionBadge, MessageList, UploadAlert, UploadSection};
use crate::views::shared::use_chat_session;
use dioxus::prelude::*;

/// Standalone widget: a floating button that opens a compact chat panel
/// with its own session.
#[component]
pub fn WidgetView(config: WidgetConfig) -> Element {
    let controller = use_chat_session(&config);
    let mut open = use_signal(|| config.auto_open);

    let auto_open = config.auto_open;
    use_effect(move || {
        if auto_open {
            controller.start_conversation();
        }
    });

    let show_welcome = controller.conversation.read().is_empty();
    let panel_class = if open() { "sunny-chat-window open" } else { "sunny-chat-window" };

    rsx! {
        div { class: format_args!("sunny-widget {}", config.position.as_class()),
            div { class: panel_class,
                div { class: "sunny-chat-header",
                    div { class: "sunny-chat-title",
                        h4 { "{config.bot_name}" }
                        span { class: "sunny-chat-company", "{config.company_name}" }
                    }
                    ConnectionBadge { controller }
                    button {
                        class: "close-btn",
                        aria_label: "Close Chat",
                        onclick: move |_| open.set(false),
                        "×"
                    }
                }
                if show_welcome {
                    div { class: "sunny-welcome", "{config.welcome_message}" }
                }
                MessageList { controller }
                div { class: "input-container",
                    UploadSection { controller }
                    Composer { controller, placeholder: "Type your message..." }
                }
            }
            button {
                class: "sunny-chat-button",
                aria_label: "Open {config.bot_name}",
                onclick: move |_| {
                    let opening = !open();
                    open.set(opening);
                    if opening {
                        controller.start_conversation();
                    }
                },
                "💬"
            }
            UploadAlert { controller }
        }
    }
}
