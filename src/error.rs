use thiserror::Error;

/// Everything that can go wrong between a store operation and the backend.
///
/// None of these reach the view layer: stores turn them into a single error
/// notification and apply their own degradation policy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// The request never produced a response (DNS, connection, body read).
    #[error("transport failure: {0}")]
    Transport(String),

    /// A response arrived but with a status outside the expected success code.
    #[error("unexpected status {actual} (expected {expected})")]
    UnexpectedStatus { expected: u16, actual: u16 },

    /// Status was fine but the payload was missing or did not match the model.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Rejected on the client before any request was sent.
    #[error("invalid input: {0}")]
    Invalid(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::MalformedPayload(err.to_string())
    }
}
