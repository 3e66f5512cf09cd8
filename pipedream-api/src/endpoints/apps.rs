use super::{App, PageInfo, flag};
use crate::macros::setter;
use crate::request::{Api, AuthMode, Request, RequestData};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Default, Debug, Clone, Serialize)]
pub struct AppsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(serialize_with = "flag::serialize", skip_serializing_if = "flag::is_unset")]
    pub has_components: bool,
    #[serde(serialize_with = "flag::serialize", skip_serializing_if = "flag::is_unset")]
    pub has_actions: bool,
    #[serde(serialize_with = "flag::serialize", skip_serializing_if = "flag::is_unset")]
    pub has_triggers: bool,
}

// Requests

/// Search the app catalog
#[derive(Default, Debug, Clone)]
pub struct ListApps {
    query: AppsQuery,
}

impl ListApps {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt query.q: String);
    setter!(query.has_components: bool);
    setter!(query.has_actions: bool);
    setter!(query.has_triggers: bool);
}

impl Request for ListApps {
    type Data = AppsQuery;
    type Response = AppsResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        "/apps".into()
    }

    fn operation(&self) -> &'static str {
        "listing apps"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct GetApp {
    app_id: String,
}

impl GetApp {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
        }
    }
}

impl Request for GetApp {
    type Data = ();
    type Response = AppResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/apps/{}", self.app_id).into()
    }

    fn operation(&self) -> &'static str {
        "getting app"
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppsResponse {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub data: Vec<App>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppResponse {
    pub data: App,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_serialize_as_one_or_not_at_all() {
        let req = ListApps::new().q("slack").has_actions(true);
        assert_eq!(
            serde_json::to_value(&req.query).unwrap(),
            serde_json::json!({ "q": "slack", "has_actions": 1 })
        );
    }

    #[test]
    fn test_paths_ignore_project() {
        assert_eq!(ListApps::new().endpoint("proj"), "/apps");
        assert_eq!(GetApp::new("app_1").endpoint("proj"), "/apps/app_1");
    }
}
