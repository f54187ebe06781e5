/// Errors surfaced by the case-management core.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("I/O error: {0}")]
    TransientIo(String),

    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    /// Whether a manual retry has a chance of succeeding
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientIo(_))
    }

    /// Message shown to the user in place of the raw error
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { entity, .. } => format!("The requested {} could not be found.", entity),
            Self::ValidationFailed(reason) => reason.clone(),
            Self::Unauthorized(_) => "You do not have permission to view this page.".to_string(),
            Self::TransientIo(_) | Self::Corrupt(_) => {
                "Failed to load data. Please try again.".to_string()
            }
        }
    }
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        Self::TransientIo(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Corrupt(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_io_is_retryable() {
        assert!(CoreError::TransientIo("disk".into()).is_retryable());
        assert!(!CoreError::validation("empty").is_retryable());
        assert!(!CoreError::not_found("thread", "t-1").is_retryable());
        assert!(!CoreError::Corrupt("eof".into()).is_retryable());
    }

    #[test]
    fn test_display_and_user_message() {
        let err = CoreError::not_found("thread", "thread-404");
        assert_eq!(err.to_string(), "thread not found: thread-404");
        assert_eq!(err.user_message(), "The requested thread could not be found.");

        let err = CoreError::TransientIo("permission denied".into());
        assert_eq!(err.user_message(), "Failed to load data. Please try again.");
    }
}
