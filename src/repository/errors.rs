use serde_json::Value;
use thiserror::Error;

/// Failure of a listing fetch.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ListingFetchError {
    /// Backend answered with a non-success status.
    #[error("listing endpoint responded with status {status}")]
    Server {
        status: u16,
        /// Error body returned by the backend, when there was one.
        payload: Option<Value>,
    },

    #[error("network failure: {0}")]
    Network(String),

    #[error("malformed listing response: {0}")]
    Malformed(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

pub type FetchResult<T> = Result<T, ListingFetchError>;

impl ListingFetchError {
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ListingFetchError::Server { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Message suitable for a banner: the backend's own `error`/`message`
    /// text when it sent one, a generic failure notice otherwise.
    pub fn user_message(&self) -> String {
        let from_payload = self.payload().and_then(|payload| match payload {
            Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            Value::Object(fields) => ["error", "message"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        });

        match (from_payload, self) {
            (Some(message), _) => message,
            (None, ListingFetchError::Server { status, .. }) => {
                format!("Server error ({status}), please try again")
            }
            (None, _) => "Network failure, please try again".to_string(),
        }
    }
}

impl From<reqwest::Error> for ListingFetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ListingFetchError::Network(format!("request timed out: {err}"))
        } else if err.is_decode() {
            ListingFetchError::Malformed(err.to_string())
        } else if err.is_builder() {
            ListingFetchError::InvalidEndpoint(err.to_string())
        } else {
            ListingFetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ListingFetchError {
    fn from(err: serde_json::Error) -> Self {
        ListingFetchError::Malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn user_message_prefers_server_payload() {
        let err = ListingFetchError::Server {
            status: 500,
            payload: Some(json!({"error": "Internal Server Error"})),
        };
        assert_eq!(err.user_message(), "Internal Server Error");

        let err = ListingFetchError::Server {
            status: 404,
            payload: Some(json!({"message": "Not found"})),
        };
        assert_eq!(err.user_message(), "Not found");
    }

    #[test]
    fn user_message_falls_back_to_generic_text() {
        let err = ListingFetchError::Server {
            status: 502,
            payload: None,
        };
        assert_eq!(err.user_message(), "Server error (502), please try again");

        let err = ListingFetchError::Network("connection refused".to_string());
        assert_eq!(err.user_message(), "Network failure, please try again");
        assert!(err.payload().is_none());
    }

    #[test]
    fn json_errors_are_malformed_responses() {
        let err: ListingFetchError = serde_json::from_str::<Value>("{").unwrap_err().into();
        assert!(matches!(err, ListingFetchError::Malformed(_)));
    }
}
