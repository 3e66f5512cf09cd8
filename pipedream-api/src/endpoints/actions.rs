use super::ConfiguredProps;
use crate::macros::setter;
use crate::request::{Request, RequestData};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct RunAction {
    /// Component key of the action, e.g. `gitlab-list-commits`
    id: String,
    external_user_id: String,
    configured_props: ConfiguredProps,
    #[serde(skip_serializing_if = "Option::is_none")]
    dynamic_props_id: Option<String>,
}

impl RunAction {
    pub fn new(component_key: impl Into<String>, external_user_id: impl Into<String>) -> Self {
        Self {
            id: component_key.into(),
            external_user_id: external_user_id.into(),
            configured_props: ConfiguredProps::new(),
            dynamic_props_id: None,
        }
    }

    setter!(configured_props: ConfiguredProps);
    setter!(opt dynamic_props_id: String);

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.configured_props.insert(name.into(), value.into());
        self
    }
}

impl Request for RunAction {
    type Data = Self;
    type Response = ActionResult;

    const METHOD: Method = Method::POST;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/actions/run", project_id).into()
    }

    fn operation(&self) -> &'static str {
        "running action"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

// Responses

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionResult {
    /// Named exports set by the action
    #[serde(default)]
    pub exports: Option<Value>,
    /// Console output captured while running
    #[serde(default)]
    pub os: Option<Value>,
    /// Return value of the action
    #[serde(default)]
    pub ret: Option<Value>,
    #[serde(default)]
    pub stash_id: Option<String>,
}
