use std::fmt;

/// Everything that can stop a dispatch
#[derive(Debug)]
pub enum TfeError {
    /// Transport failure, or the HTTP client could not be built
    Http(reqwest::Error),
    /// Non-success status from the API
    Api { status: u16, message: String },
    /// A success response whose body does not decode
    Json {
        context: String,
        source: serde_json::Error,
    },
    /// Missing or malformed settings
    Config(String),
}

impl TfeError {
    /// Attach the request a decoding failure belongs to
    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        TfeError::Json {
            context: context.into(),
            source,
        }
    }
}

impl fmt::Display for TfeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TfeError::Http(e) => write!(f, "HTTP request failed: {}", e),
            TfeError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            TfeError::Json { context, source } => {
                write!(f, "Malformed response for {}: {}", context, source)
            }
            TfeError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for TfeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TfeError::Http(e) => Some(e),
            TfeError::Json { source, .. } => Some(source),
            TfeError::Api { .. } | TfeError::Config(_) => None,
        }
    }
}

impl From<reqwest::Error> for TfeError {
    fn from(err: reqwest::Error) -> Self {
        TfeError::Http(err)
    }
}

pub type Result<T> = std::result::Result<T, TfeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn decode_failure() -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>("{\"data\": [").unwrap_err()
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TfeError>();
    }

    #[test]
    fn test_api_error_names_status() {
        let err = TfeError::Api {
            status: 409,
            message: "workspace is locked".to_string(),
        };
        assert_eq!(err.to_string(), "API error (status 409): workspace is locked");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_json_error_keeps_context_and_source() {
        let err = TfeError::json("run for workspace 'ws-1'", decode_failure());

        let text = err.to_string();
        assert!(text.starts_with("Malformed response for run for workspace 'ws-1'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_prefix() {
        let err = TfeError::Config("TOKEN is not set".to_string());
        assert_eq!(err.to_string(), "Configuration error: TOKEN is not set");
    }
}
