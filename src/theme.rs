use crate::config::Mode;

pub struct ThemeDefinition {
    pub css: &'static str,
    pub body_class: &'static str,
}

pub fn theme_definition(mode: Mode) -> ThemeDefinition {
    match mode {
        Mode::App => ThemeDefinition {
            css: APP_LAYOUT,
            body_class: "App",
        },
        Mode::Widget => ThemeDefinition {
            css: WIDGET_LAYOUT,
            body_class: "sunny-host",
        },
    }
}

/// Shared palette, bubbles, composer and dialog.
pub const BASE_THEME: &str = r#"
:root {
    --color-brand: #004c8f;
    --color-brand-dark: #00335f;
    --color-accent: #f7a600;
    --color-bg: #f4f7fb;
    --color-surface: #ffffff;
    --color-text: #1b1f24;
    --color-muted: #6b7280;
    --color-user-bg: #004c8f;
    --color-user-text: #ffffff;
    --color-bot-bg: #ffffff;
    --color-online: #22c55e;
    --color-offline: #ef4444;
}
body { margin: 0; font-family: system-ui, sans-serif; background: var(--color-bg); color: var(--color-text); }
.messages-container { flex: 1; overflow-y: auto; padding: 1rem; display: flex; flex-direction: column; gap: 0.75rem; }
.message { display: flex; }
.message.user { justify-content: flex-end; }
.message-content { max-width: 75%; padding: 0.6rem 0.9rem; border-radius: 12px; background: var(--color-bot-bg); box-shadow: 0 1px 2px rgba(0, 0, 0, 0.08); }
.message.user .message-content { background: var(--color-user-bg); color: var(--color-user-text); }
.message-text { white-space: pre-wrap; }
.message-time { font-size: 0.7rem; color: var(--color-muted); margin-top: 0.25rem; }
.message.user .message-time { color: rgba(255, 255, 255, 0.75); }
.suggestions-container { display: flex; flex-wrap: wrap; gap: 0.4rem; margin-top: 0.5rem; }
.suggestion-btn { border: 1px solid var(--color-brand); background: transparent; color: var(--color-brand); border-radius: 999px; padding: 0.3rem 0.8rem; cursor: pointer; }
.download-btn { background: var(--color-accent); border: none; border-radius: 6px; padding: 0.4rem 0.8rem; cursor: pointer; margin-top: 0.5rem; }
.typing-indicator span { display: inline-block; width: 6px; height: 6px; margin: 0 2px; border-radius: 50%; background: var(--color-muted); animation: blink 1.2s infinite; }
.typing-indicator span:nth-child(2) { animation-delay: 0.2s; }
.typing-indicator span:nth-child(3) { animation-delay: 0.4s; }
@keyframes blink { 0%, 80%, 100% { opacity: 0.2; } 40% { opacity: 1; } }
.input-container { border-top: 1px solid #e5e7eb; padding: 0.75rem; background: var(--color-surface); }
.input-row { display: flex; gap: 0.5rem; align-items: flex-end; }
.message-input { flex: 1; resize: none; padding: 0.6rem; border-radius: 8px; border: 1px solid #d1d5db; font: inherit; }
.send-btn { background: var(--color-brand); color: #fff; border: none; border-radius: 8px; padding: 0.6rem 1rem; cursor: pointer; }
.send-btn:disabled, .message-input:disabled { opacity: 0.5; cursor: not-allowed; }
.upload-section { margin-bottom: 0.5rem; }
.upload-btn { display: inline-block; background: var(--color-bg); border: 1px dashed var(--color-brand); border-radius: 8px; padding: 0.4rem 0.8rem; cursor: pointer; }
.connection-status { display: flex; align-items: center; gap: 0.4rem; font-size: 0.85rem; }
.status-indicator { width: 8px; height: 8px; border-radius: 50%; }
.status-indicator.connected { background: var(--color-online); }
.status-indicator.disconnected { background: var(--color-offline); }
.alert-overlay { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.45); display: flex; align-items: center; justify-content: center; z-index: 1000; }
.alert-box { background: var(--color-surface); padding: 1.25rem 1.5rem; border-radius: 10px; max-width: 320px; text-align: center; }
.alert-ok { background: var(--color-brand); color: #fff; border: none; border-radius: 6px; padding: 0.4rem 1.2rem; cursor: pointer; }
.checkmark { color: var(--color-online); }
.cross { color: var(--color-offline); }
"#;

const APP_LAYOUT: &str = r#"
.App { display: flex; flex-direction: column; height: 100vh; }
.landing-page { min-height: 100vh; background: linear-gradient(135deg, var(--color-brand), var(--color-brand-dark)); color: #fff; }
.landing-content { padding: 3rem 2rem; }
.hero-section h2 { font-size: 2rem; margin-bottom: 0.5rem; }
.chat-header { background: var(--color-brand); color: #fff; padding: 0.75rem 1rem; }
.header-content { display: flex; justify-content: space-between; align-items: center; }
.logo-text { font-weight: 700; letter-spacing: 0.05em; }
.chat-container { flex: 1; display: flex; flex-direction: column; min-height: 0; }
.chat-footer { text-align: center; font-size: 0.75rem; color: var(--color-muted); padding: 0.5rem; }
.floating-chatbot { position: fixed; bottom: 24px; z-index: 999; color: var(--color-text); }
.floating-chatbot.bottom-right { right: 24px; }
.floating-chatbot.bottom-left { left: 24px; }
.chat-button.hidden, .chat-widget.hidden { display: none; }
.chat-btn { display: flex; align-items: center; gap: 0.4rem; background: var(--color-accent); border: none; border-radius: 999px; padding: 0.75rem 1.2rem; font-weight: 600; cursor: pointer; }
.chat-widget-content { position: relative; width: 300px; background: var(--color-surface); border-radius: 16px; padding: 1.25rem; box-shadow: 0 10px 30px rgba(0, 0, 0, 0.2); text-align: center; }
.close-btn { position: absolute; top: 8px; right: 12px; border: none; background: transparent; font-size: 1.4rem; cursor: pointer; }
.avatar-image { font-size: 2.5rem; }
.start-chat-btn { width: 100%; background: var(--color-brand); color: #fff; border: none; border-radius: 8px; padding: 0.7rem; font-weight: 600; cursor: pointer; }
.chat-features { display: flex; justify-content: space-between; margin-top: 0.75rem; font-size: 0.75rem; }
.feature { display: flex; flex-direction: column; align-items: center; gap: 0.2rem; }
"#;

const WIDGET_LAYOUT: &str = r#"
.sunny-widget { position: fixed; bottom: 20px; z-index: 999; }
.sunny-widget.bottom-right { right: 20px; }
.sunny-widget.bottom-left { left: 20px; }
.sunny-chat-button { width: 60px; height: 60px; border-radius: 50%; border: none; background: var(--color-brand); color: #fff; font-size: 1.6rem; cursor: pointer; box-shadow: 0 4px 12px rgba(0, 0, 0, 0.25); }
.sunny-chat-window { display: none; flex-direction: column; width: 360px; height: 520px; margin-bottom: 12px; background: var(--color-bg); border-radius: 14px; overflow: hidden; box-shadow: 0 10px 30px rgba(0, 0, 0, 0.25); }
.sunny-chat-window.open { display: flex; }
.sunny-chat-header { display: flex; align-items: center; gap: 0.75rem; background: var(--color-brand); color: #fff; padding: 0.75rem 1rem; }
.sunny-chat-title { flex: 1; }
.sunny-chat-title h4 { margin: 0; }
.sunny-chat-company { font-size: 0.75rem; opacity: 0.8; }
.sunny-chat-header .close-btn { background: transparent; border: none; color: #fff; font-size: 1.3rem; cursor: pointer; }
.sunny-welcome { padding: 1rem; color: var(--color-muted); }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_mode_styles_its_root() {
        let app = theme_definition(Mode::App);
        assert!(app.css.contains(".floating-chatbot"));
        let widget = theme_definition(Mode::Widget);
        assert!(widget.css.contains(".sunny-chat-window"));
        assert_ne!(app.body_class, widget.body_class);
    }
}
