pub mod chat;
pub mod landing;
pub mod launcher;
pub mod shared;
pub mod widget;

pub use chat::ChatView;
pub use landing::LandingView;
pub use launcher::FloatingLauncher;
pub use widget::WidgetView;
