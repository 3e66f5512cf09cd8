use super::components::ConfigurableProp;
use crate::decode::ANY_SUCCESS;
use crate::macros::setter;
use crate::request::{Api, AuthMode, Request, RequestData};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

/// A component saved to the workspace or published in the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryComponent {
    pub id: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub code_hash: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub configurable_props: Vec<ConfigurableProp>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct RegistrySearchQuery {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similarity_threshold: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub debug: bool,
}

// Requests

/// Save component code to the workspace, from source or from a URL
#[derive(Default, Debug, Clone, Serialize)]
pub struct CreateComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    component_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    component_url: Option<String>,
}

impl CreateComponent {
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            component_code: Some(code.into()),
            component_url: None,
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            component_code: None,
            component_url: Some(url.into()),
        }
    }
}

impl Request for CreateComponent {
    type Data = Self;
    type Response = RegistryComponentResponse;

    const METHOD: Method = Method::POST;
    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        "/components".into()
    }

    fn operation(&self) -> &'static str {
        "creating component"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        let given = [&self.component_code, &self.component_url]
            .iter()
            .any(|value| value.as_deref().is_some_and(|v| !v.is_empty()));
        if given {
            Ok(())
        } else {
            Err("either component_code or component_url is required".to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct GetRegistryComponent {
    key: String,
}

impl GetRegistryComponent {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Request for GetRegistryComponent {
    type Data = ();
    type Response = RegistryComponentResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/components/registry/{}", self.key).into()
    }

    fn operation(&self) -> &'static str {
        "getting registry component"
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        if self.key.is_empty() {
            return Err("component key is required".to_string());
        }
        Ok(())
    }
}

/// Find registry components matching a natural-language description
#[derive(Debug, Clone)]
pub struct SearchRegistryComponents {
    query: RegistrySearchQuery,
}

impl SearchRegistryComponents {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: RegistrySearchQuery {
                query: query.into(),
                ..Default::default()
            },
        }
    }

    setter!(opt query.app: String);
    setter!(opt query.similarity_threshold: u32);
    setter!(query.debug: bool);
}

impl Request for SearchRegistryComponents {
    type Data = RegistrySearchQuery;
    type Response = RegistrySearchResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        "/components/search".into()
    }

    fn operation(&self) -> &'static str {
        "searching registry components"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        if self.query.query.is_empty() {
            return Err("query is required".to_string());
        }
        Ok(())
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryComponentResponse {
    #[serde(default)]
    pub data: Option<RegistryComponent>,
}

/// Keys of the matching components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrySearchResponse {
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
}
