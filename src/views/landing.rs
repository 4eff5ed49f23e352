use crate::config::WidgetConfig;
use crate::views::launcher::FloatingLauncher;
use dioxus::prelude::*;

#[component]
pub fn LandingView(config: WidgetConfig, on_open_chat: EventHandler<()>) -> Element {
    let company = config.company_name.clone();
    rsx! {
        div { class: "landing-page",
            div { class: "landing-content",
                div { class: "brand-header",
                    h1 { "{company.to_uppercase()}" }
                    p { "India's Leading Financial Services Company" }
                }
                div { class: "hero-section",
                    h2 { "Get Personal Loans Starting from 10.99%*" }
                    p { "Quick approval • Minimal documentation • Instant disbursal" }
                }
            }
            FloatingLauncher { config, on_open_chat }
        }
    }
}
