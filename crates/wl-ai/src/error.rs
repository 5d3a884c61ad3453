/// Failures of the extraction pipeline, from transport up to semantics.
///
/// `Transport` is distinguishable from decode failures so the caller can
/// point at credentials/network instead of phrasing. `EmptyExtraction`
/// means the model understood but found nothing to log, which earns a
/// different hint than malformed output.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("AI response contains no JSON array")]
    MalformedResponse,

    #[error("invalid activity: missing or empty")]
    InvalidActivity,

    #[error("invalid task key: {0}")]
    InvalidTask(String),

    #[error("invalid hours: {0}")]
    InvalidHours(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("no entries extracted from input")]
    EmptyExtraction,

    #[error("AI request failed{}: {message}", status.map(|s| format!(" (status {s})")).unwrap_or_default())]
    Transport { status: Option<u16>, message: String },
}

impl ParseError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            status,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_transport_with_status() {
        let err = ParseError::transport(Some(401), "unauthorized");
        assert_eq!(err.to_string(), "AI request failed (status 401): unauthorized");
    }

    #[test]
    fn test_display_transport_without_status() {
        let err = ParseError::transport(None, "connection refused");
        assert_eq!(err.to_string(), "AI request failed: connection refused");
    }
}
