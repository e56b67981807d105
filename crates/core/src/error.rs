/// Result alias that carries the custom [`PhonographError`] type.
pub type Result<T> = std::result::Result<T, PhonographError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum PhonographError {
    /// Free-form error used by the command line driver and simulated
    /// collaborators.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON configuration or record descriptor.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// A record or side was described with values that cannot be played.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    /// The tonearm cannot reach one of the record's zone boundaries.
    #[error("unsolvable tonearm geometry: {0}")]
    Geometry(String),
    /// The visual surface layout is missing or degenerate.
    #[error("invalid layout: {0}")]
    Layout(String),
    /// The caller violated an engine invariant.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Audio could not be loaded or decoded. Recoverable.
    #[error("media error: {0}")]
    Media(String),
}

impl PhonographError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    /// Returns `true` for errors the engine recovers from by stopping.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Media(_) | Self::Io(_))
    }
}

impl From<&str> for PhonographError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for PhonographError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
