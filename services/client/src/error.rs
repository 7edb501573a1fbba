//! services/client/src/error.rs
//!
//! Defines the primary error type for the client.
//!
//! Every failure the user can see is normalised into a single notification
//! string by `ClientError::user_message`, while the variant keeps the cause
//! (transport, decode, rejection) apart for logging.

use crate::config::ConfigError;
use tracker_core::ports::TransportError;

/// The primary error type for the `client` service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The request never produced a usable response.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The payload did not match the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered `success: false`; carries the message to show.
    #[error("Rejected by server: {0}")]
    Rejected(String),

    /// The call was abandoned through `TrackerClient::cancel_in_flight`.
    #[error("Request cancelled")]
    Cancelled,

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// The text shown in a toast for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Rejected(message) => message.clone(),
            ClientError::Transport(TransportError::Timeout(_)) => {
                "The request timed out.".to_string()
            }
            ClientError::Transport(TransportError::Status { status, .. }) => {
                format!("Server error ({}). Please try again.", status)
            }
            ClientError::Transport(_) | ClientError::Http(_) => {
                "Could not connect to the server.".to_string()
            }
            ClientError::Decode(_) => {
                "The data couldn't be read because it isn't in the correct format.".to_string()
            }
            ClientError::Cancelled => "Request cancelled".to_string(),
            ClientError::Config(err) => err.to_string(),
        }
    }

    /// Short tag for the failure category, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Config(_) => "config",
            ClientError::Transport(_) | ClientError::Http(_) => "transport",
            ClientError::Decode(_) => "decode",
            ClientError::Rejected(_) => "application",
            ClientError::Cancelled => "cancelled",
        }
    }
}
