use thiserror::Error;

/// Network failure, non-2xx response or malformed body.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct RemoteCallError {
    pub endpoint: &'static str,
    #[source]
    pub source: reqwest::Error,
}

impl RemoteCallError {
    pub fn new(endpoint: &'static str, source: reqwest::Error) -> Self {
        Self { endpoint, source }
    }

    pub fn display_message(&self) -> String {
        format!("Failed to connect to backend: {}", self.source)
    }
}
