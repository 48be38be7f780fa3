#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Api { message: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for a transient user-facing notification: the
    /// backend-provided text when there is one, a generic line otherwise.
    pub fn notification(&self) -> String {
        match self {
            ApiError::Api { message } if !message.trim().is_empty() => message.clone(),
            ApiError::Http { status, .. } => format!("Request failed (HTTP {status})"),
            ApiError::Network(_) => "Could not reach the server".to_string(),
            _ => "Request failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_wins() {
        let err = ApiError::Api {
            message: "account already exists".into(),
        };
        assert_eq!(err.notification(), "account already exists");
    }

    #[test]
    fn blank_backend_message_falls_back() {
        let err = ApiError::Api {
            message: "  ".into(),
        };
        assert_eq!(err.notification(), "Request failed");
    }

    #[test]
    fn http_errors_report_status() {
        let err = ApiError::Http {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(err.notification(), "Request failed (HTTP 403)");
    }
}
