use crate::decode::{self, RawResponse, ResponseError};
use reqwest::{Method, StatusCode, header::HeaderMap};
use serde::{Serialize, de::DeserializeOwned};
use std::borrow::Cow;

/// Which of the two Pipedream APIs an endpoint lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Api {
    /// `https://api.pipedream.com/v1/connect`
    Connect,
    /// `https://api.pipedream.com/v1`
    Rest,
}

/// How the `Authorization` header is filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Bearer token from the client-credentials exchange
    OAuth,
    /// Static API key from the settings
    ApiKey,
}

pub enum RequestData<T> {
    Empty,
    Query(T),
    Json(T),
}

/// One remote endpoint.
///
/// Implementors describe the URL, method and payload; the [`Client`](crate::Client)
/// takes care of authentication, headers and decoding.
pub trait Request {
    type Data: Serialize;
    type Response: FromResponse;

    const METHOD: Method = Method::GET;
    const API: Api = Api::Connect;
    const AUTH: AuthMode = AuthMode::OAuth;

    /// Path relative to the API base URL
    fn endpoint(&self, project_id: &str) -> Cow<'_, str>;

    /// Short description used as context when the call fails
    fn operation(&self) -> &'static str;

    fn method(&self) -> Method {
        Self::METHOD
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Empty
    }

    /// JSON body sent in addition to query data
    fn body(&self) -> Option<&serde_json::Value> {
        None
    }

    /// Extra headers; authentication and environment headers always win
    fn headers(&self) -> HeaderMap {
        HeaderMap::new()
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        decode::DEFAULT_ACCEPTABLE
    }

    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Turns a fully read response into the endpoint's result type.
pub trait FromResponse: Sized {
    fn from_response(
        response: RawResponse,
        acceptable: &[StatusCode],
    ) -> Result<Self, ResponseError>;
}

impl<T> FromResponse for T
where
    T: DeserializeOwned,
{
    fn from_response(
        response: RawResponse,
        acceptable: &[StatusCode],
    ) -> Result<Self, ResponseError> {
        decode::classify(response.status, &response.body, acceptable)
    }
}

/// Result of delete-style endpoints, which answer `204 No Content`.
///
/// The status is checked directly and the body is never decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoContent;

impl FromResponse for NoContent {
    fn from_response(response: RawResponse, _: &[StatusCode]) -> Result<Self, ResponseError> {
        if response.status == StatusCode::NO_CONTENT {
            return Ok(NoContent);
        }
        Err(ResponseError::UnexpectedStatus {
            status: response.status,
            body: decode::compact(&response.body),
            parse_error: None,
        })
    }
}
