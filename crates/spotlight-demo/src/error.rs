use thiserror::Error;

pub type Result<T> = std::result::Result<T, DemoError>;

/// Exit code for bad command-line input.
pub const EXIT_USAGE: i32 = 2;
/// Exit code when the showcase itself rejects the scenario.
pub const EXIT_SHOWCASE: i32 = 3;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("showcase error: {0}")]
    Showcase(#[from] spotlight::Error),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("scenario error: {0}")]
    Scenario(String),
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => EXIT_USAGE,
            Self::Showcase(spotlight::Error::Config(_)) => EXIT_USAGE,
            Self::Showcase(_) => EXIT_SHOWCASE,
            Self::Io(_) | Self::Json(_) | Self::Scenario(_) => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
