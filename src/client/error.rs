use thiserror::Error;

/// Message shown to the user when the server rate limits the client.
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded";
/// Message shown to the user for every other failure.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("server responded with {status}: {message}")]
    Status { status: u16, message: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Decode(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Text surfaced in the UI for this failure.
    pub fn user_message(&self) -> &'static str {
        if self.is_rate_limited() {
            RATE_LIMIT_MESSAGE
        } else {
            GENERIC_ERROR_MESSAGE
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}
