/// Failure reported by the image generator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("{0}")]
    Message(String),
    #[error("unknown generation failure")]
    Unknown,
}

impl GenerationError {
    pub fn message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return GenerationError::Unknown;
        }
        GenerationError::Message(message)
    }

    /// Banner text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Message(message) => format!("An error occurred: {message}"),
            GenerationError::Unknown => "An unknown error occurred.".to_string(),
        }
    }
}

/// The stored gallery could not be parsed as a list of image references.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored gallery is corrupt: {reason}")]
pub struct CorruptState {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
    #[error("storage encode failed: {0}")]
    Encode(String),
}
