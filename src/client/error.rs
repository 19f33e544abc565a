use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The API answered with a non-success status and an `{error}` body
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
