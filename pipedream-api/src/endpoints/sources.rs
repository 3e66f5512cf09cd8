use crate::macros::setter;
use crate::request::{Api, AuthMode, NoContent, Request, RequestData};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

/// An event source running in the workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub component_id: Option<String>,
    #[serde(default)]
    pub configured_props: SourceProps,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_slug: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceProps {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub timer: Option<TimerSchedule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerSchedule {
    #[serde(default)]
    pub cron: Option<String>,
    #[serde(default)]
    pub interval_seconds: Option<u64>,
}

/// Where the component code comes from; the API needs exactly one of these
#[derive(Default, Debug, Clone, Serialize)]
pub struct ComponentRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_url: Option<String>,
}

impl ComponentRef {
    fn validate(&self) -> Result<(), String> {
        let given = [&self.component_id, &self.component_code, &self.component_url]
            .iter()
            .any(|value| value.as_deref().is_some_and(|v| !v.is_empty()));
        if given {
            Ok(())
        } else {
            Err("one of component_id, component_code or component_url is required".to_string())
        }
    }
}

// Requests

#[derive(Default, Debug, Clone, Serialize)]
pub struct CreateSource {
    #[serde(flatten)]
    component: ComponentRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl CreateSource {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt component.component_id: String);
    setter!(opt component.component_code: String);
    setter!(opt component.component_url: String);
    setter!(opt name: String);
}

impl Request for CreateSource {
    type Data = Self;
    type Response = SourceResponse;

    const METHOD: Method = Method::POST;
    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        "/sources".into()
    }

    fn operation(&self) -> &'static str {
        "creating source"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }

    fn validate(&self) -> Result<(), String> {
        self.component.validate()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateSource {
    #[serde(skip)]
    source_id: String,
    #[serde(flatten)]
    component: ComponentRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    active: bool,
}

impl UpdateSource {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            component: ComponentRef::default(),
            name: None,
            active: true,
        }
    }

    setter!(opt component.component_id: String);
    setter!(opt component.component_code: String);
    setter!(opt component.component_url: String);
    setter!(opt name: String);
    setter!(active: bool);
}

impl Request for UpdateSource {
    type Data = Self;
    type Response = SourceResponse;

    const METHOD: Method = Method::PUT;
    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/sources/{}", self.source_id).into()
    }

    fn operation(&self) -> &'static str {
        "updating source"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }

    fn validate(&self) -> Result<(), String> {
        self.component.validate()
    }
}

#[derive(Debug, Clone)]
pub struct DeleteSource {
    source_id: String,
}

impl DeleteSource {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
        }
    }
}

impl Request for DeleteSource {
    type Data = ();
    type Response = NoContent;

    const METHOD: Method = Method::DELETE;
    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/sources/{}", self.source_id).into()
    }

    fn operation(&self) -> &'static str {
        "deleting source"
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceResponse {
    pub data: Source,
}
