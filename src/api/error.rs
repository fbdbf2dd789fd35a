use thiserror::Error;

/// Maximum number of error body characters kept for display.
pub(crate) const MAX_ERROR_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL {url}: {message}")]
    Config { url: String, message: String },
    /// Non-2xx response (`status` set) or a request that never got one.
    #[error("request failed ({}): {body}", status_label(.status))]
    Transport { status: Option<u16>, body: String },
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl ClientError {
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "no response".to_string(), |status| status.to_string())
}

/// Trims and truncates an error body; an empty body gets a generic message.
pub(crate) fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

pub(crate) fn map_request_error(err: &reqwest::Error) -> ClientError {
    let body = if err.is_timeout() {
        "Request timed out.".to_string()
    } else {
        format!("Unable to reach the server: {err}")
    };

    ClientError::Transport {
        status: err.status().map(|status| status.as_u16()),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_body_trims_and_truncates() {
        assert_eq!(sanitize_body("  "), "Request failed.");
        assert_eq!(sanitize_body(" {\"detail\":\"x\"} "), "{\"detail\":\"x\"}");
        assert_eq!(sanitize_body(&"a".repeat(500)).len(), MAX_ERROR_CHARS);
    }

    #[test]
    fn transport_display_includes_status() {
        let err = ClientError::Transport {
            status: Some(404),
            body: "Usuario no encontrado".to_string(),
        };
        assert_eq!(err.to_string(), "request failed (404): Usuario no encontrado");
        assert!(err.is_not_found());

        let err = ClientError::Transport {
            status: None,
            body: "Request timed out.".to_string(),
        };
        assert_eq!(err.to_string(), "request failed (no response): Request timed out.");
        assert_eq!(err.status(), None);
    }
}
