use thiserror::Error;

use crate::schema::ValidationErrors;

pub const GENERIC_PREDICTION_ERROR: &str = "An error occurred during prediction.";
pub const SERVER_UNREACHABLE_ERROR: &str =
    "Cannot reach the prediction server. Please make sure it is running.";

/// Coarse failure category, used to tell transport problems from semantic ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Semantic,
    Config,
}

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Invalid patient data: {0}")]
    Validation(ValidationErrors),

    #[error("Request failed: {0}")]
    Transport(Box<reqwest::Error>),

    #[error("Server responded with {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Server { status: u16, message: Option<String> },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PredictError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PredictError::Validation(_) => ErrorKind::Validation,
            PredictError::Transport(_) => ErrorKind::Transport,
            PredictError::Server { status, .. } if !(200..300).contains(status) => {
                ErrorKind::Transport
            }
            PredictError::Server { .. } | PredictError::MalformedResponse(_) => ErrorKind::Semantic,
            PredictError::Config(_) | PredictError::Io(_) | PredictError::Json(_) => {
                ErrorKind::Config
            }
        }
    }

    /// The single message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            PredictError::Validation(errors) => {
                format!("Please correct the following fields: {}", errors)
            }
            PredictError::Transport(_) => SERVER_UNREACHABLE_ERROR.to_string(),
            PredictError::Server { message: Some(message), .. } => message.clone(),
            PredictError::Server { message: None, .. } => GENERIC_PREDICTION_ERROR.to_string(),
            PredictError::MalformedResponse(detail) => {
                format!("Unexpected response from prediction server: {}", detail)
            }
            other => other.to_string(),
        }
    }
}

impl From<ValidationErrors> for PredictError {
    fn from(errors: ValidationErrors) -> Self {
        PredictError::Validation(errors)
    }
}

impl From<reqwest::Error> for PredictError {
    fn from(error: reqwest::Error) -> Self {
        PredictError::Transport(Box::new(error))
    }
}

impl From<std::io::Error> for PredictError {
    fn from(error: std::io::Error) -> Self {
        PredictError::Io(Box::new(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_preferred() {
        let error =
            PredictError::Server { status: 500, message: Some("model unavailable".to_string()) };
        assert_eq!(error.user_message(), "model unavailable");
        assert_eq!(error.kind(), ErrorKind::Transport);

        let error = PredictError::Server { status: 502, message: None };
        assert_eq!(error.user_message(), GENERIC_PREDICTION_ERROR);
    }

    #[test]
    fn test_error_field_on_success_status_is_semantic() {
        let error = PredictError::Server { status: 200, message: Some("bad input".to_string()) };
        assert_eq!(error.kind(), ErrorKind::Semantic);
        assert_eq!(PredictError::MalformedResponse("x".into()).kind(), ErrorKind::Semantic);
    }

    #[test]
    fn test_validation_message_lists_fields() {
        let error = PredictError::from(ValidationErrors::single("age", "is required"));
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.user_message(), "Please correct the following fields: age is required");
    }
}
