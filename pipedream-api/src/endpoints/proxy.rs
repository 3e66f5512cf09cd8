use crate::decode::{RawResponse, ResponseError};
use crate::macros::setter;
use crate::request::{FromResponse, Request, RequestData};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use bytes::Bytes;
use reqwest::{Method, StatusCode, header::HeaderMap};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::borrow::Cow;
use url::Url;

const ALLOWED_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
];

// Common

#[derive(Debug, Clone, Serialize)]
pub struct ProxyQuery {
    pub external_user_id: String,
    pub account_id: String,
}

// Requests

/// Forward a request to a third-party API using an end user's connected account.
///
/// The target URL travels base64url-encoded in the path; the upstream status,
/// headers and body come back untouched in a [`ProxyResponse`].
#[derive(Debug, Clone)]
pub struct Proxy {
    method: Method,
    url: String,
    query: ProxyQuery,
    headers: HeaderMap,
    body: Option<Value>,
}

impl Proxy {
    pub fn new(
        method: Method,
        url: impl Into<String>,
        external_user_id: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            method,
            url: url.into(),
            query: ProxyQuery {
                external_user_id: external_user_id.into(),
                account_id: account_id.into(),
            },
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(
        url: impl Into<String>,
        external_user_id: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self::new(Method::GET, url, external_user_id, account_id)
    }

    setter!(headers: HeaderMap);
    setter!(opt body: Value);

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Request for Proxy {
    type Data = ProxyQuery;
    type Response = ProxyResponse;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!(
            "/{}/proxy/{}",
            project_id,
            URL_SAFE_NO_PAD.encode(self.url.as_bytes())
        )
        .into()
    }

    fn operation(&self) -> &'static str {
        "proxying request"
    }

    fn method(&self) -> Method {
        self.method.clone()
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }

    fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    fn headers(&self) -> HeaderMap {
        self.headers.clone()
    }

    fn validate(&self) -> Result<(), String> {
        if self.query.external_user_id.trim().is_empty() {
            return Err("external_user_id is required".to_string());
        }
        if self.query.account_id.trim().is_empty() {
            return Err("account_id is required".to_string());
        }
        if self.url.trim().is_empty() {
            return Err("url is required".to_string());
        }
        Url::parse(&self.url).map_err(|e| format!("invalid url: {}", e))?;
        if !ALLOWED_METHODS.contains(&self.method) {
            return Err(format!("invalid method: {}", self.method));
        }
        Ok(())
    }
}

// Responses

/// Whatever the upstream API answered, whatever its status.
#[derive(Debug, Clone)]
pub struct ProxyResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ProxyResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

impl FromResponse for ProxyResponse {
    fn from_response(response: RawResponse, _: &[StatusCode]) -> Result<Self, ResponseError> {
        Ok(Self {
            status: response.status,
            headers: response.headers,
            body: response.body,
        })
    }
}
