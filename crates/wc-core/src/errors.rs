use thiserror::Error;

/// Failure talking to the relay. Never fatal: the current cycle is treated
/// as "no update available".
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid relay address: {0}")]
    InvalidAddress(String),

    #[error("relay unreachable: {0}")]
    Connect(String),

    #[error("request to relay timed out")]
    Timeout,

    #[error("relay responded with status {0}")]
    Status(u16),

    #[error("failed to decode relay response: {0}")]
    Decode(#[from] DecodeError),

    #[error("transport failure: {0}")]
    Other(String),
}

/// Malformed payload: bad JSON, bad base64, an unreadable image or an
/// unsupported content kind.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unreadable image: {0}")]
    Image(String),

    #[error("unsupported mime type: {0:?}")]
    UnknownMime(String),

    #[error("unsupported platform tag: {0:?}")]
    UnknownPlatform(String),
}

/// The OS refused clipboard access. Fatal while starting the engine,
/// logged and skipped afterwards.
#[derive(Debug, Error)]
pub enum ClipboardAccessError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read clipboard: {0}")]
    Read(String),

    #[error("failed to write clipboard: {0}")]
    Write(String),

    #[error("failed to watch clipboard: {0}")]
    Watch(String),
}
