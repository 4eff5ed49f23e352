use crate::config::WidgetConfig;
use crate::views::shared::open_external;
use dioxus::prelude::*;
use std::time::Duration;

/// Floating launcher: shows up after a delay, expands into an info card and
/// either hands off to `on_open_chat` or opens the hosted chat page.
#[component]
pub fn FloatingLauncher(config: WidgetConfig, on_open_chat: Option<EventHandler<()>>) -> Element {
    let mut visible = use_signal(|| config.auto_open);
    let mut expanded = use_signal(|| config.auto_open);
    use_launcher_reveal(visible, config.launcher_delay);

    if !visible() {
        return rsx! {};
    }

    let fallback_url = config.fallback_chat_url.clone();
    let button_class = if expanded() { "chat-button hidden" } else { "chat-button visible" };
    let widget_class = if expanded() { "chat-widget visible" } else { "chat-widget hidden" };

    rsx! {
        div { class: format_args!("floating-chatbot {}", config.position.as_class()),
            div { class: button_class,
                button {
                    class: "chat-btn animated-btn",
                    aria_label: "Open {config.bot_name}",
                    onclick: move |_| expanded.set(!expanded()),
                    span { class: "chat-icon", "💬" }
                    span { class: "chat-text", "{config.bot_name}" }
                }
            }
            div { class: widget_class,
                div { class: "chat-widget-content",
                    button {
                        class: "close-btn",
                        aria_label: "Close Chat",
                        onclick: move |_| visible.set(false),
                        "×"
                    }
                    div { class: "chat-avatar",
                        div { class: "avatar-image",
                            span { class: "avatar-icon", "🤖" }
                        }
                    }
                    div { class: "chat-info",
                        h3 { "Hi! I'm {config.bot_name}" }
                        p { "Your AI Loan Assistant" }
                        p { class: "chat-description",
                            "Get instant loan approval in minutes! I can help you with personal loans, home loans, and more."
                        }
                    }
                    button {
                        class: "start-chat-btn",
                        onclick: move |_| activate(on_open_chat, &fallback_url),
                        span { class: "btn-icon", "💰" }
                        "Start Loan Application"
                    }
                    div { class: "chat-features",
                        Feature { icon: "⚡", label: "Instant Approval" }
                        Feature { icon: "📱", label: "Minimal Documents" }
                        Feature { icon: "🏦", label: "Trusted by Millions" }
                    }
                }
            }
        }
    }
}

#[component]
fn Feature(icon: &'static str, label: &'static str) -> Element {
    rsx! {
        div { class: "feature",
            span { class: "feature-icon", "{icon}" }
            span { "{label}" }
        }
    }
}

fn activate(on_open_chat: Option<EventHandler<()>>, fallback_url: &str) {
    match on_open_chat {
        Some(handler) => handler.call(()),
        None => open_external(fallback_url),
    }
}

/// Reveal once after `delay`; a later close is not undone.
pub fn use_launcher_reveal(visible: Signal<bool>, delay: Duration) {
    use_hook(move || {
        if *visible.peek() {
            return;
        }
        let mut control = visible;
        spawn(async move {
            tokio::time::sleep(delay).await;
            control.set(true);
        });
    });
}
