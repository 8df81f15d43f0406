//! Error types for provider requests.
//!
//! Every failure a user can hit while talking to the provider ends up as a
//! `ClientError`, and every `ClientError` can be turned into exactly one line
//! of display text with [`ClientError::display_message`].

use thiserror::Error;

pub const NETWORK_FALLBACK: &str = "Network error. Please check your connection and try again.";

/// Errors raised by the provider client
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response received (connection refused, DNS, TLS, ...)
    #[error("Request failed: {0}")]
    Transport(String),

    /// No response within the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Non-success response from the provider
    #[error("Provider returned {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Provider { status: u16, message: Option<String> },

    /// Success response whose body is not the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Required input missing, caught before any request
    #[error("{field} is required")]
    Validation { field: &'static str },

    /// Input present but unusable (e.g. not a URL)
    #[error("{0}")]
    Input(#[from] InputError),

    /// Client could not be constructed
    #[error("Client setup failed: {0}")]
    Setup(String),
}

impl ClientError {
    pub fn provider(status: u16, message: Option<String>) -> Self {
        Self::Provider { status, message }
    }

    /// Map a reqwest failure onto the transport taxonomy
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_secs)
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// True for failures where no response was received
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// Single line shown to the user: the provider's message when there is
    /// one, otherwise `fallback` (or the network notice for transport errors).
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            Self::Provider {
                message: Some(m), ..
            } if !m.trim().is_empty() => m.clone(),
            Self::Transport(_) | Self::Timeout(_) => NETWORK_FALLBACK.to_string(),
            Self::Validation { .. } | Self::Input(_) => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Problems with user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_wins_over_fallback() {
        let err = ClientError::provider(400, Some("Could not fetch page".to_string()));
        assert_eq!(err.display_message("Failed to analyze URL."), "Could not fetch page");
    }

    #[test]
    fn blank_provider_message_uses_fallback() {
        let err = ClientError::provider(500, Some("  ".to_string()));
        assert_eq!(err.display_message("Failed to analyze URL."), "Failed to analyze URL.");
        let err = ClientError::provider(502, None);
        assert_eq!(err.display_message("Failed to analyze URL."), "Failed to analyze URL.");
    }

    #[test]
    fn network_failures_use_network_notice() {
        assert_eq!(ClientError::Timeout(30).display_message("x"), NETWORK_FALLBACK);
        assert_eq!(
            ClientError::Transport("connection refused".into()).display_message("x"),
            NETWORK_FALLBACK
        );
        assert!(ClientError::Timeout(30).is_network());
    }

    #[test]
    fn validation_message_names_the_field() {
        let err = ClientError::Validation { field: "url" };
        assert_eq!(err.display_message("x"), "url is required");
    }

    #[test]
    fn provider_display_includes_status() {
        let err = ClientError::provider(404, Some("Not found".to_string()));
        assert_eq!(err.to_string(), "Provider returned 404: Not found");
        assert_eq!(ClientError::provider(500, None).to_string(), "Provider returned 500");
    }
}
