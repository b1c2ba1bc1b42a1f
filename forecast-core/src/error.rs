use thiserror::Error;

/// Why a single lookup did not produce a report. Nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Upstream answered 404 for the requested city.
    #[error("city not found")]
    NotFound,

    /// Any other non-200 status.
    #[error("weather API returned status {0}")]
    Api(u16),

    /// No usable HTTP answer: DNS, connect, TLS, timeout, or an undecodable body.
    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries `appid`, so it never reaches the message.
        Self::Transport(error_chain(&err.without_url()))
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(format!("invalid response body: {err}"))
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown units '{0}'. Supported units: metric, imperial.")]
pub struct ParseUnitsError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_are_transport_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err();
        match FetchError::from(err) {
            FetchError::Transport(msg) => assert!(msg.starts_with("invalid response body: ")),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[test]
    fn api_error_names_status() {
        assert_eq!(
            FetchError::Api(503).to_string(),
            "weather API returned status 503"
        );
    }
}
