mod config;
mod token_cache;
mod token_client;

pub use self::config::{Environment, Settings};
pub use token_cache::{TokenCache, EXPIRY_BUFFER};
pub use token_client::{build_http_client, TokenClient};
