pub mod chat;
pub mod config;
pub mod error;
pub mod markdown;
pub mod session;
pub mod theme;
pub mod timestamp;
pub mod transport;
pub mod types;
pub mod upload;

#[cfg(feature = "dioxus")]
pub mod ui;
#[cfg(feature = "dioxus")]
pub mod views;
