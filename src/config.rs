//! Runtime configuration.
//!
//! Values come from the process environment, a `.env` file in the working
//! directory, or the bundled `assets/config.env`, in that order of precedence.

use std::time::Duration;

/// Bundled defaults for builds that ship without a `.env` (mobile)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_FALLBACK_CHAT_URL: &str = "http://localhost:3001";
pub const DEFAULT_LAUNCHER_DELAY: Duration = Duration::from_millis(3000);
pub const DEFAULT_BOT_NAME: &str = "Sunny AI";
pub const DEFAULT_COMPANY_NAME: &str = "Tata Capital";
pub const DEFAULT_WELCOME_MESSAGE: &str =
    "Hi! I'm Sunny AI. How can I help you with your loan needs today?";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Landing page plus full chat view.
    #[default]
    App,
    /// Floating button with a compact chat panel.
    Widget,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
}

impl Position {
    pub fn as_class(self) -> &'static str {
        match self {
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WidgetConfig {
    pub mode: Mode,
    /// HTTP base for uploads and downloads.
    pub api_url: String,
    /// Explicit WebSocket base; derived from `api_url` when unset.
    pub ws_url: Option<String>,
    pub bot_name: String,
    pub company_name: String,
    pub welcome_message: String,
    pub auto_open: bool,
    pub position: Position,
    pub launcher_delay: Duration,
    pub fallback_chat_url: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            mode: Mode::App,
            api_url: DEFAULT_API_URL.to_string(),
            ws_url: None,
            bot_name: DEFAULT_BOT_NAME.to_string(),
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            auto_open: false,
            position: Position::BottomRight,
            launcher_delay: DEFAULT_LAUNCHER_DELAY,
            fallback_chat_url: DEFAULT_FALLBACK_CHAT_URL.to_string(),
        }
    }
}

impl WidgetConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unknown or malformed values fall
    /// back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mode = match get("SUNNY_MODE").map(|m| m.to_ascii_lowercase()).as_deref() {
            Some("widget") => Mode::Widget,
            Some("app") | None => Mode::App,
            Some(other) => {
                tracing::warn!(mode = other, "unknown SUNNY_MODE, using app");
                Mode::App
            }
        };

        let position = match get("SUNNY_POSITION").as_deref() {
            Some("bottom-left") => Position::BottomLeft,
            _ => Position::BottomRight,
        };

        let launcher_delay = get("SUNNY_LAUNCHER_DELAY_MS")
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.launcher_delay);

        Self {
            mode,
            api_url: get("SUNNY_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            ws_url: get("SUNNY_WS_URL").map(|url| url.trim_end_matches('/').to_string()),
            bot_name: get("SUNNY_BOT_NAME").unwrap_or(defaults.bot_name),
            company_name: get("SUNNY_COMPANY_NAME").unwrap_or(defaults.company_name),
            welcome_message: get("SUNNY_WELCOME_MESSAGE").unwrap_or(defaults.welcome_message),
            auto_open: get("SUNNY_AUTO_OPEN").is_some_and(|flag| is_truthy(&flag)),
            position,
            launcher_delay,
            fallback_chat_url: get("SUNNY_FALLBACK_CHAT_URL").unwrap_or(defaults.fallback_chat_url),
        }
    }
}

fn is_truthy(flag: &str) -> bool {
    matches!(
        flag.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Load `.env` if present, otherwise the bundled defaults. Variables already
/// in the process environment are never overwritten.
pub fn load_env() {
    if dotenvy::dotenv().is_err() {
        load_bundled_config();
    }
}

fn load_bundled_config() {
    for (key, value) in parse_env_lines(BUNDLED_CONFIG) {
        if std::env::var(key).is_err() {
            // SAFETY: called from main before the runtime spawns any threads
            unsafe {
                std::env::set_var(key, value);
            }
        }
    }
}

fn parse_env_lines(raw: &str) -> impl Iterator<Item = (&str, &str)> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim()))
}
