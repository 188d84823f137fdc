use formz_core::FormzError;
use formz_designer::ValidationError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level errors with user-friendly messages
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("Form has no identifier; save it first")]
    MissingFormId,

    #[error("Form is not published")]
    NotPublished,

    #[error("Form not found: {0}")]
    FormNotFound(String),

    #[error("Connection not found: {0}")]
    ConnectionNotFound(String),

    #[error("Persistence failed: {0}")]
    PersistenceFailed(String),

    #[error("Table creation failed: {0}")]
    ExecutionFailed(String),

    #[error("Stored data is invalid: {0}")]
    InvalidData(String),
}

impl ServiceError {
    /// Fold schema validation errors into one message
    pub fn from_validation(errors: &[ValidationError]) -> Self {
        ServiceError::ValidationFailed(
            errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

impl From<FormzError> for ServiceError {
    fn from(err: FormzError) -> Self {
        match err {
            FormzError::Persistence(msg) => ServiceError::PersistenceFailed(msg),
            FormzError::Serialization(e) => ServiceError::InvalidData(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::InvalidData(err.to_string())
    }
}
