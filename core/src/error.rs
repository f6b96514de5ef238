use giftwise_backend::BackendError;
use giftwise_common::PreferenceField;
use thiserror::Error;

fn field_list(fields: &[PreferenceField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

/// Failures of a single suggestion round trip. None of them are fatal.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Required answers are missing; nothing was sent.
    #[error("missing required preferences: {}", field_list(.missing))]
    Validation { missing: Vec<PreferenceField> },

    /// The call failed or the backend answered with a non-success status.
    #[error("transport failed{}: {message}", status_suffix(.status))]
    Transport { status: Option<u16>, message: String },

    /// The backend answered, but not with the expected shape.
    #[error("malformed backend response: {reason}")]
    MalformedResponse { reason: String },
}

impl RequestError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        RequestError::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Whether pressing the button again could help.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, RequestError::Validation { .. })
    }
}

impl From<BackendError> for RequestError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Decode(reason) => RequestError::MalformedResponse { reason },
            other => RequestError::Transport {
                status: other.status(),
                message: other.to_string(),
            },
        }
    }
}

/// Error reporting utilities
pub struct ErrorReporter;

impl ErrorReporter {
    /// Format error for user display
    pub fn format_user_error(error: &RequestError) -> String {
        match error {
            RequestError::Validation { missing } => {
                let fields = field_list(missing);
                format!(
                    "📝 Please answer: {fields}\n💡 Occasion, recipient and gift style are required"
                )
            }
            RequestError::Transport {
                status: Some(status),
                ..
            } => {
                format!("🌐 The gift service answered with status {status}\n💡 Please try again in a moment")
            }
            RequestError::Transport { status: None, message } => {
                format!("🌐 Could not reach the gift service: {message}\n💡 Check your connection and try again")
            }
            RequestError::MalformedResponse { .. } => {
                "🤔 The gift service sent an answer we could not read\n💡 Please try again".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_fields() {
        let err = RequestError::Validation {
            missing: vec![PreferenceField::Occasion, PreferenceField::Style],
        };
        assert_eq!(err.to_string(), "missing required preferences: occasion, style");
        assert!(!err.is_retryable());
        assert!(ErrorReporter::format_user_error(&err).contains("occasion, style"));
    }

    #[test]
    fn test_backend_http_error_keeps_status() {
        let err: RequestError = BackendError::Http {
            status: 502,
            body: "bad gateway".to_string(),
        }
        .into();
        match &err {
            RequestError::Transport { status, .. } => assert_eq!(*status, Some(502)),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_retryable());
        assert!(err.to_string().contains("(502)"));
        assert!(ErrorReporter::format_user_error(&err).contains("502"));
    }

    #[test]
    fn test_backend_decode_error_is_malformed() {
        let err: RequestError = BackendError::Decode("expected value".to_string()).into();
        assert!(matches!(err, RequestError::MalformedResponse { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_network_error_without_status() {
        let err: RequestError = BackendError::Network {
            status: None,
            message: "connection refused".to_string(),
        }
        .into();
        assert!(matches!(err, RequestError::Transport { status: None, .. }));
        assert!(ErrorReporter::format_user_error(&err).contains("connection refused"));
    }
}
