use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to retrieve collection '{collection}': {message}")]
    RetrievalError { collection: String, message: String },

    #[error("Record '{id}' not found in collection '{collection}'")]
    NotFoundError { collection: String, id: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Retrieval,
    NotFound,
    Configuration,
    Data,
}

impl ContentError {
    pub fn retrieval(collection: &str, message: impl Into<String>) -> Self {
        Self::RetrievalError {
            collection: collection.to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFoundError {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RetrievalError { .. } | Self::ApiError(_) => ErrorCategory::Retrieval,
            Self::NotFoundError { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.category() == ErrorCategory::NotFound
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Retrieval => {
                "The content store could not be reached. Showing no results.".to_string()
            }
            ErrorCategory::NotFound => {
                "The article you're looking for doesn't exist or has been removed.".to_string()
            }
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Data => format!("Could not read data: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Retrieval => "Check the store endpoint and your network, then try again",
            ErrorCategory::NotFound => "Check the identifier or go back to the listing",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Data => "Check that the file exists and contains valid JSON",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
