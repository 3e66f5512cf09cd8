// Types shared between the token gate and the API client
pub mod common;

mod client;
mod error;

pub use client::{build_http_client, Environment, Settings, TokenCache, TokenClient, EXPIRY_BUFFER};
pub use common::{join_url, Credential, TokenResponse};
pub use error::AuthError;
