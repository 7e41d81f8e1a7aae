use std::fmt;

use thiserror::Error;

/// Structured error body returned by the API alongside a non-2xx status.
///
/// `result` and `message` are taken from the JSON body when present; either may be
/// missing (or the body may not be JSON at all), in which case they are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    pub result: Option<String>,
    pub message: Option<String>,
    pub status_code: u16,
}

impl fmt::Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "result={}, message={}, status_code={}",
            self.result.as_deref().unwrap_or("None"),
            self.message.as_deref().unwrap_or("None"),
            self.status_code
        )
    }
}

/// Coarse classification of a [`VinterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The credential was not supplied as a string.
    TypeMismatch,
    /// A caller-supplied value was rejected before any network call.
    InvalidArgument,
    /// The API answered with a failure status or with no matching data.
    DataFetch,
    /// The HTTP or WebSocket transport failed.
    Transport,
    /// The API answered successfully but the body could not be understood.
    Decode,
    /// A WebSocket session was driven through an illegal state transition.
    Session,
}

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum VinterError {
    /// The credential was absent or not a string.
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// An unknown asset type, frequency or symbol suffix, a malformed date, a missing symbol,
    /// or an operation invoked on a client of the wrong asset type.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The API returned a non-2xx status.
    #[error("API request failed: {0}")]
    Api(ErrorPayload),

    /// The request succeeded but returned no matching records (or an empty required field).
    #[error("no data: {0}")]
    NoData(String),

    /// The response body was not in the expected shape.
    #[error("unexpected response format: {0}")]
    Decode(String),

    /// A WebSocket session was opened twice or opened after being closed.
    #[error("websocket session: {0}")]
    Session(String),

    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An error occurred with the WebSocket connection.
    #[error("WebSocket error: {0}")]
    Websocket(Box<tokio_tungstenite::tungstenite::Error>),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The runtime backing a blocking WebSocket session could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VinterError {
    /// Maps this error onto the crate's error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TypeMismatch(_) => ErrorKind::TypeMismatch,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Api(_) | Self::NoData(_) => ErrorKind::DataFetch,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Session(_) => ErrorKind::Session,
            Self::Http(_) | Self::Websocket(_) | Self::Url(_) | Self::Io(_) => {
                ErrorKind::Transport
            }
        }
    }

    /// The error payload carried by a failed-status response, if this is one.
    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Api(p) => Some(p),
            _ => None,
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for VinterError {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        VinterError::Websocket(Box::new(e))
    }
}
