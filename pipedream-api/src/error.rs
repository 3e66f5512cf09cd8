use pipedream_auth::AuthError;
use reqwest::StatusCode;
use thiserror::Error;

use crate::decode::ResponseError;

#[derive(Debug, Error)]
pub enum PipedreamError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("acquiring access token: {0}")]
    Auth(#[from] AuthError),

    #[error("request to pipedream api failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Any of the above, annotated with the operation that was attempted
    #[error("{operation}: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: Box<PipedreamError>,
    },
}

impl PipedreamError {
    pub(crate) fn context(self, operation: &'static str) -> Self {
        PipedreamError::Request {
            operation,
            source: Box::new(self),
        }
    }

    /// The error without any operation context
    pub fn root(&self) -> &PipedreamError {
        match self {
            PipedreamError::Request { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status behind the failure, when the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self.root() {
            PipedreamError::Auth(e) => e.status(),
            PipedreamError::Transport(e) => e.status(),
            PipedreamError::Response(e) => e.status(),
            _ => None,
        }
    }

    pub fn response_error(&self) -> Option<&ResponseError> {
        match self.root() {
            PipedreamError::Response(e) => Some(e),
            _ => None,
        }
    }

    pub fn auth_error(&self) -> Option<&AuthError> {
        match self.root() {
            PipedreamError::Auth(e) => Some(e),
            _ => None,
        }
    }
}

impl From<url::ParseError> for PipedreamError {
    fn from(err: url::ParseError) -> Self {
        PipedreamError::Configuration(format!("Invalid URL: {}", err))
    }
}
