use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Executing request for new token: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Token endpoint rejected credentials with status {status}: {body}")]
    Authentication { status: StatusCode, body: String },

    #[error("Decoding token: {0}")]
    Decode(#[source] serde_json::Error),
}

impl AuthError {
    /// Status code returned by the token endpoint, if the exchange got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AuthError::Authentication { status, .. } => Some(*status),
            AuthError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}

impl From<url::ParseError> for AuthError {
    fn from(err: url::ParseError) -> Self {
        AuthError::Configuration(format!("Invalid URL: {}", err))
    }
}
