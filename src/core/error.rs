use std::fmt;

use thiserror::Error;

/// Bounded collections on the log form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Crew,
    Photos,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Crew => write!(f, "crew"),
            Collection::Photos => write!(f, "photos"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Capacity exceeded: {collection} is limited to {limit} entries")]
    CapacityExceeded { collection: Collection, limit: usize },

    #[error("Duplicate entry: {0} is already on the crew")]
    DuplicateEntry(String),

    #[error("No employee selected")]
    NoSelection,

    #[error("Unknown employee: {0}")]
    UnknownEmployee(String),

    #[error("Photo library permission denied")]
    PermissionDenied,

    #[error("Submission failed: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("A submission is already in flight")]
    AlreadyInFlight,

    #[error("Failed to read photo {uri}: {message}")]
    Photo { uri: String, message: String },

    #[error("Failed to encode log: {0}")]
    Encoding(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Endpoint rejected log: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Failed to parse endpoint response: {0}")]
    InvalidResponse(String),
}

impl AppError {
    /// Message shown to the person filling in the form
    pub fn user_message(&self) -> String {
        match self {
            AppError::CapacityExceeded { collection, limit } => match collection {
                Collection::Crew => format!("Maximum {} employees allowed.", limit),
                Collection::Photos => format!("Maximum {} photos allowed.", limit),
            },
            AppError::DuplicateEntry(name) => format!("{} is already on the crew.", name),
            AppError::NoSelection => "Select an employee first.".to_string(),
            AppError::UnknownEmployee(name) => format!("{} is not in the directory.", name),
            AppError::PermissionDenied => "Permission required to access photos.".to_string(),
            AppError::Submission(SubmissionError::AlreadyInFlight) => {
                "A log is already being submitted.".to_string()
            }
            AppError::Submission(e) => {
                tracing::error!("Submission error: {}", e);
                "Failed to submit log.".to_string()
            }
            AppError::Config(msg) => {
                tracing::error!("Configuration error: {}", msg);
                "Configuration error.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
