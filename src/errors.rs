use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeserializationError {
    #[error("Error while deserializing")]
    SerdeError(#[from] serde_json::Error),
}

/// Failures of a single exchange with the debugger channel.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error")]
    IoError(#[from] std::io::Error),

    #[error("Parse error")]
    ParseError(#[from] DeserializationError),

    #[error("Protocol error {code}: {message}")]
    ProtocolError { code: i64, message: String },

    #[error("Unexpected response to `{method}`")]
    UnexpectedResponse { method: &'static str },

    #[error("The debugger session was closed")]
    Closed,

    #[error("The pause listener was replaced by a newer registration")]
    ListenerReplaced,
}

impl From<serde_json::Error> for SessionError {
    fn from(error: serde_json::Error) -> Self {
        Self::ParseError(DeserializationError::SerdeError(error))
    }
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Session error")]
    Session(#[from] SessionError),

    #[error("No pause event arrived within {timeout_ms} ms")]
    PauseTimeout { timeout_ms: u64 },
}

#[derive(Debug, Error)]
pub enum SourceMapError {
    #[error("Invalid base64 payload")]
    Base64(#[from] base64::DecodeError),

    #[error("Decoded payload is not UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Decoded payload is not a source map")]
    Json(#[from] serde_json::Error),
}
