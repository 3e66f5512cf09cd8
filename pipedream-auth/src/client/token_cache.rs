use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::client::token_client::TokenClient;
use crate::common::Credential;
use crate::error::AuthError;

/// Tokens are refreshed once they are this close to expiring
pub const EXPIRY_BUFFER: Duration = Duration::seconds(60);

/// Holds the current bearer credential and refreshes it on demand.
///
/// The check-and-refresh sequence runs under one async mutex per cache, so
/// concurrent callers never exchange credentials twice: whoever waits on the
/// lock observes the credential stored by the caller that held it.
pub struct TokenCache {
    client: TokenClient,
    credential: Mutex<Option<Arc<Credential>>>,
}

impl TokenCache {
    pub fn new(client: TokenClient) -> Self {
        Self {
            client,
            credential: Mutex::new(None),
        }
    }

    /// Seed the cache with a credential obtained earlier.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Mutex::new(Some(Arc::new(credential)));
        self
    }

    /// The cached credential, whether or not it is still valid.
    pub async fn credential(&self) -> Option<Arc<Credential>> {
        self.credential.lock().await.clone()
    }

    /// Return a credential valid for at least [`EXPIRY_BUFFER`], exchanging
    /// client credentials only when the cached one is missing or stale.
    ///
    /// A failed exchange leaves the previous credential untouched. Dropping
    /// the returned future mid-exchange does the same.
    pub async fn ensure_valid_token(&self) -> Result<Arc<Credential>, AuthError> {
        let mut cached = self.credential.lock().await;

        if let Some(credential) = cached.as_ref() {
            if credential.is_valid_at(Utc::now(), EXPIRY_BUFFER) {
                tracing::debug!(
                    expires_at = %credential.expires_at(),
                    "Using cached access token"
                );
                return Ok(Arc::clone(credential));
            }
        }

        let fresh = Arc::new(self.client.exchange().await?);
        tracing::info!(
            expires_at = %fresh.expires_at(),
            "Acquired access token"
        );

        *cached = Some(Arc::clone(&fresh));
        Ok(fresh)
    }
}
