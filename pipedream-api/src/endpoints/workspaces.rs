use super::{ConfiguredProps, PageInfo};
use crate::macros::setter;
use crate::request::{Api, AuthMode, Request, RequestData};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    #[serde(rename = "orgname", default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub daily_credits_quota: Option<i64>,
    #[serde(default)]
    pub daily_credits_used: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceAccount {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub emitter_id: String,
    pub listener_id: String,
    #[serde(default)]
    pub event_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSource {
    pub id: String,
    #[serde(default)]
    pub component_id: Option<String>,
    #[serde(default)]
    pub configured_props: ConfiguredProps,
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

#[derive(Default, Debug, Clone, Serialize)]
pub struct WorkspaceAccountsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

fn require_org(org_id: &str) -> Result<(), String> {
    if org_id.is_empty() {
        return Err("org_id is required".to_string());
    }
    Ok(())
}

// Requests

#[derive(Debug, Clone)]
pub struct GetWorkspace {
    org_id: String,
}

impl GetWorkspace {
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
        }
    }
}

impl Request for GetWorkspace {
    type Data = ();
    type Response = WorkspaceResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/workspaces/{}", self.org_id).into()
    }

    fn operation(&self) -> &'static str {
        "getting workspace"
    }

    fn validate(&self) -> Result<(), String> {
        require_org(&self.org_id)
    }
}

/// Accounts connected in the workspace itself, not by end users
#[derive(Debug, Clone)]
pub struct ListWorkspaceAccounts {
    org_id: String,
    query: WorkspaceAccountsQuery,
}

impl ListWorkspaceAccounts {
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            query: WorkspaceAccountsQuery::default(),
        }
    }

    setter!(opt query.query: String);
}

impl Request for ListWorkspaceAccounts {
    type Data = WorkspaceAccountsQuery;
    type Response = WorkspaceAccountsResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/workspaces/{}/accounts", self.org_id).into()
    }

    fn operation(&self) -> &'static str {
        "listing workspace accounts"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }

    fn validate(&self) -> Result<(), String> {
        require_org(&self.org_id)
    }
}

#[derive(Debug, Clone)]
pub struct ListWorkspaceSubscriptions {
    org_id: String,
}

impl ListWorkspaceSubscriptions {
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
        }
    }
}

impl Request for ListWorkspaceSubscriptions {
    type Data = ();
    type Response = SubscriptionsResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/workspaces/{}/subscriptions", self.org_id).into()
    }

    fn operation(&self) -> &'static str {
        "listing workspace subscriptions"
    }

    fn validate(&self) -> Result<(), String> {
        require_org(&self.org_id)
    }
}

#[derive(Debug, Clone)]
pub struct ListWorkspaceSources {
    org_id: String,
}

impl ListWorkspaceSources {
    pub fn new(org_id: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
        }
    }
}

impl Request for ListWorkspaceSources {
    type Data = ();
    type Response = WorkspaceSourcesResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/workspaces/{}/sources", self.org_id).into()
    }

    fn operation(&self) -> &'static str {
        "listing workspace sources"
    }

    fn validate(&self) -> Result<(), String> {
        require_org(&self.org_id)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceResponse {
    pub data: Workspace,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceAccountsResponse {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub data: Vec<WorkspaceAccount>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionsResponse {
    #[serde(default)]
    pub data: Vec<Subscription>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceSourcesResponse {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub data: Vec<WorkspaceSource>,
}
