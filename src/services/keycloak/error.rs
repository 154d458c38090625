use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the identity provider.
///
/// The authentication outcome never depends on which variant occurred (any
/// provider failure collapses to "unauthenticated"), but unreachability must
/// stay distinguishable from an inactive token in logs, so timeouts and
/// transport errors get their own variants instead of folding into one.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider request timed out")]
    Timeout,

    #[error("provider transport error: {0}")]
    Transport(reqwest::Error),

    #[error("provider returned status {0}")]
    Status(StatusCode),

    #[error("failed to decode provider response: {0}")]
    Decode(String),
}

impl ProviderError {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Transport(err)
        }
    }

    /// True when the provider could not be reached at all (as opposed to a
    /// reachable provider answering with an error or garbage).
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ProviderError::Timeout | ProviderError::Transport(_))
    }
}
