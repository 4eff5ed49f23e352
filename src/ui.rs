use crate::config::{Mode, WidgetConfig};
use crate::theme::{BASE_THEME, theme_definition};
use crate::views::shared::use_chat_session;
use crate::views::{ChatView, LandingView, WidgetView};
use dioxus::prelude::*;

#[component]
pub fn App() -> Element {
    let config = use_hook(WidgetConfig::from_env);
    let definition = theme_definition(config.mode);

    rsx! {
        style { dangerous_inner_html: "{BASE_THEME}" }
        style { dangerous_inner_html: "{definition.css}" }
        div { class: definition.body_class,
            if config.mode == Mode::Widget {
                WidgetView { config: config.clone() }
            } else {
                ChatShell { config: config.clone() }
            }
        }
    }
}

/// Landing page until the launcher is activated, then the full chat. The
/// socket is opened on mount either way.
#[component]
fn ChatShell(config: WidgetConfig) -> Element {
    let controller = use_chat_session(&config);
    let mut show_main_chat = use_signal(|| false);

    let open_chat = move |_: ()| {
        show_main_chat.set(true);
        controller.start_conversation();
    };

    rsx! {
        if show_main_chat() {
            ChatView { controller, company_name: config.company_name.clone() }
        } else {
            LandingView { config: config.clone(), on_open_chat: open_chat }
        }
    }
}
