pub type Result<T> = std::result::Result<T, TrackerError>;

/// Error conditions raised by tracker operations. Mapped into semantic
/// variants so the CLI boundary can attach the right hint (VPN, credentials,
/// missing issue) instead of echoing transport noise.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Invalid credentials")]
    Auth,

    #[error("Cannot connect. Check VPN connection")]
    Network(String),

    #[error("http {status}: {message}")]
    Http { status: u16, message: String },

    #[error("invalid worklog entry: {0}")]
    InvalidEntry(String),

    #[error("unexpected error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            TrackerError::Network(err.to_string())
        } else if let Some(status) = err.status() {
            if status.as_u16() == 401 {
                TrackerError::Auth
            } else {
                TrackerError::Http {
                    status: status.as_u16(),
                    message: err.to_string(),
                }
            }
        } else {
            TrackerError::Other(err.to_string())
        }
    }
}
