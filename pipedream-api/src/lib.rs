pub mod decode;
pub mod endpoints;
mod error;
mod macros;
pub mod repositories;
pub mod request;

pub use crate::decode::{RawResponse, ResponseError, decode_response};
pub use crate::error::PipedreamError;
pub use crate::request::{Api, AuthMode, FromResponse, NoContent, RequestData};
pub use pipedream_auth::{Credential, Environment, Settings, TokenCache};

use endpoints::tokens::CreateUserToken;
use pipedream_auth::{TokenClient, build_http_client, join_url};
use repositories::*;
use request::Request as ApiRequest;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

const ENVIRONMENT_HEADER: HeaderName = HeaderName::from_static("x-pd-environment");

pub struct Client {
    http_client: reqwest::Client,
    connect_url: Url,
    rest_url: Url,
    project_id: String,
    environment: Environment,
    api_key: SecretString,
    allowed_origins: Vec<String>,
    tokens: TokenCache,
}

impl Client {
    pub fn new(settings: Settings) -> Result<Self, PipedreamError> {
        let http_client = build_http_client(Duration::from_secs(settings.timeout_seconds))?;
        Self::with_http_client(settings, http_client)
    }

    /// Build a client around an existing connection pool.
    pub fn with_http_client(
        settings: Settings,
        http_client: reqwest::Client,
    ) -> Result<Self, PipedreamError> {
        settings.validate().map_err(PipedreamError::Configuration)?;

        let token_client = TokenClient::from_settings(&settings, http_client.clone())?;

        Ok(Self {
            connect_url: settings.connect_base()?,
            rest_url: settings.rest_base()?,
            http_client,
            project_id: settings.project_id,
            environment: settings.environment,
            api_key: settings.api_key,
            allowed_origins: settings.allowed_origins,
            tokens: TokenCache::new(token_client),
        })
    }

    /// Seed the token cache, e.g. with a credential persisted by a previous run.
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.tokens = self.tokens.with_credential(credential);
        self
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    pub fn token_cache(&self) -> &TokenCache {
        &self.tokens
    }

    /// Token request for `external_user_id`, limited to the configured origins.
    pub fn user_token(&self, external_user_id: impl Into<String>) -> CreateUserToken {
        CreateUserToken::new(external_user_id).allowed_origins(self.allowed_origins.clone())
    }

    /// Send `request` with the endpoint's default authentication.
    pub async fn send<R>(&self, request: R) -> Result<R::Response, PipedreamError>
    where
        R: ApiRequest,
    {
        self.send_with_auth(request, R::AUTH).await
    }

    /// Send `request`, overriding how it is authenticated.
    pub async fn send_with_auth<R>(
        &self,
        request: R,
        auth: AuthMode,
    ) -> Result<R::Response, PipedreamError>
    where
        R: ApiRequest,
    {
        self.dispatch(&request, auth)
            .await
            .map_err(|e| e.context(request.operation()))
    }

    fn base_url(&self, api: Api) -> &Url {
        match api {
            Api::Connect => &self.connect_url,
            Api::Rest => &self.rest_url,
        }
    }

    async fn bearer(&self, auth: AuthMode) -> Result<String, PipedreamError> {
        match auth {
            AuthMode::OAuth => {
                let credential = self.tokens.ensure_valid_token().await?;
                Ok(credential.access_token().to_owned())
            }
            AuthMode::ApiKey => Ok(self.api_key.expose_secret().to_owned()),
        }
    }

    async fn dispatch<R>(&self, request: &R, auth: AuthMode) -> Result<R::Response, PipedreamError>
    where
        R: ApiRequest,
    {
        request.validate().map_err(PipedreamError::InvalidRequest)?;

        let url = join_url(self.base_url(R::API), &request.endpoint(&self.project_id))?;
        let method = request.method();
        let bearer = self.bearer(auth).await?;

        let mut headers = request.headers();
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", bearer))
            .map_err(|_| PipedreamError::Configuration("credential is not a valid header value".into()))?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(
            ENVIRONMENT_HEADER,
            HeaderValue::from_static(self.environment.as_str()),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(
            method = %method,
            url = %url,
            environment = %self.environment,
            auth = ?auth,
            "Executing request"
        );

        let mut builder = self.http_client.request(method, url).headers(headers);
        builder = match request.data() {
            RequestData::Empty => builder,
            RequestData::Query(query) => builder.query(query),
            RequestData::Json(body) => builder.json(body),
        };
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let raw = RawResponse::read(response)
            .await
            .map_err(ResponseError::Body)?;

        tracing::debug!(status = %raw.status, "Received response");

        Ok(R::Response::from_response(
            raw,
            request.acceptable_statuses(),
        )?)
    }
}

/// Entry point for building requests grouped by resource
pub struct Request;

impl Request {
    pub fn accounts() -> AccountRepository {
        AccountRepository::new()
    }

    pub fn components() -> ComponentRepository {
        ComponentRepository::new()
    }

    pub fn triggers() -> TriggerRepository {
        TriggerRepository::new()
    }

    pub fn sources() -> SourceRepository {
        SourceRepository::new()
    }

    pub fn webhooks() -> WebhookRepository {
        WebhookRepository::new()
    }
}
