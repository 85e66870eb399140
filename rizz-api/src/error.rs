use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network unreachable, connection reset or request timeout.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Http { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Transport(e) if e.is_timeout())
    }

    /// Parsed error body, if the server sent one in the usual shape.
    pub fn body(&self) -> Option<ErrorBody> {
        match self {
            ApiError::Http { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// Daily quota exhausted: either a 429 or an error body flagging `limit_reached`.
    pub fn is_limit_reached(&self) -> bool {
        if self.status() == Some(StatusCode::TOO_MANY_REQUESTS) {
            return true;
        }
        self.body().and_then(|b| b.limit_reached).unwrap_or(false)
    }

    /// Human readable message from the error body, falling back to the status text.
    pub fn message(&self) -> String {
        match self.body() {
            Some(ErrorBody {
                error: Some(msg), ..
            })
            | Some(ErrorBody {
                detail: Some(msg), ..
            }) => msg,
            _ => self.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub limit_reached: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, body: &str) -> ApiError {
        ApiError::Http {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_limit_reached_from_status() {
        assert!(http(429, "").is_limit_reached());
        assert!(!http(400, "").is_limit_reached());
    }

    #[test]
    fn test_limit_reached_from_body() {
        let err = http(403, r#"{"error":"Daily limit reached","limit_reached":true}"#);
        assert!(err.is_limit_reached());
        assert_eq!(err.message(), "Daily limit reached");
    }

    #[test]
    fn test_message_falls_back_to_display() {
        let err = http(502, "<html>bad gateway</html>");
        assert!(err.body().is_none());
        assert_eq!(err.message(), "HTTP 502 Bad Gateway: <html>bad gateway</html>");
    }

    #[test]
    fn test_unauthorized() {
        assert!(http(401, "").is_unauthorized());
        assert!(!http(403, "").is_unauthorized());
    }
}
