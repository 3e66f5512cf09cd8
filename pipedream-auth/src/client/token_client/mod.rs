mod models;

use chrono::Utc;
use models::*;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::client::config::Settings;
use crate::common::{join_url, Credential, TokenResponse};
use crate::error::AuthError;

/// Build the HTTP client shared by the token exchange and the API calls.
pub fn build_http_client(timeout: Duration) -> Result<Client, AuthError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Performs the OAuth client-credentials exchange against `<base>/oauth/token`
pub struct TokenClient {
    http_client: Client,
    token_url: Url,
    client_id: String,
    client_secret: SecretString,
}

impl TokenClient {
    pub fn new(
        http_client: Client,
        base_url: &Url,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> Result<Self, AuthError> {
        let token_url = join_url(base_url, "oauth/token")?;

        Ok(Self {
            http_client,
            token_url,
            client_id: client_id.into(),
            client_secret,
        })
    }

    pub fn from_settings(settings: &Settings, http_client: Client) -> Result<Self, AuthError> {
        Self::new(
            http_client,
            &settings.rest_base()?,
            settings.client_id.clone(),
            SecretString::from(settings.client_secret.expose_secret().to_owned()),
        )
    }

    pub fn token_url(&self) -> &Url {
        &self.token_url
    }

    /// Exchange the client id and secret for a new credential.
    ///
    /// Exactly one POST is issued. Nothing is retried.
    pub async fn exchange(&self) -> Result<Credential, AuthError> {
        let req = TokenRequest {
            grant_type: GRANT_TYPE,
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
        };

        let resp = self
            .http_client
            .post(self.token_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = match resp.text().await {
                Ok(body) => body,
                Err(e) => format!("[unreadable body: {}]", e),
            };
            tracing::warn!(status = %status, "Token endpoint rejected client credentials");
            return Err(AuthError::Authentication { status, body });
        }

        let issued_at = Utc::now();
        let body = resp.bytes().await?;
        let token: TokenResponse = serde_json::from_slice(&body).map_err(AuthError::Decode)?;

        Ok(Credential::from_response(token, issued_at))
    }
}
