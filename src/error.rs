/// Errors raised by the socket, upload and launcher plumbing.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported endpoint scheme: {0}")]
    UnsupportedScheme(String),

    #[error("WebSocket connect failed: {0}")]
    Connect(String),

    #[error("Socket is closed")]
    SocketClosed,

    #[error("Could not decode frame: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Upload request failed: {0}")]
    Upload(#[from] reqwest::Error),

    #[error("Upload rejected with status {status}: {body}")]
    UploadStatus { status: u16, body: String },

    #[error("Could not open {url}: {source}")]
    Browser {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ChatResult<T> = Result<T, ChatError>;

/// Why a composed message was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SendRejected {
    #[error("Message is empty")]
    Empty,

    #[error("No socket is open")]
    NoSocket,

    #[error("Not connected")]
    Disconnected,
}
