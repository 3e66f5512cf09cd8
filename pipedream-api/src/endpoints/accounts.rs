use super::{App, PageInfo};
use crate::macros::setter;
use crate::request::{Api, AuthMode, NoContent, Request, RequestData};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

/// An end user's connected account for one app
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub healthy: bool,
    #[serde(default)]
    pub dead: bool,
    #[serde(default)]
    pub app: Option<App>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Only present when requested with `include_credentials`
    #[serde(default)]
    pub credentials: Option<serde_json::Value>,
    #[serde(default)]
    pub last_refreshed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_refresh_at: Option<DateTime<Utc>>,
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct AccountsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_app_id: Option<String>,
    pub include_credentials: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// Filters for accounts read through the REST API with the workspace API key
#[derive(Default, Debug, Clone, Serialize)]
pub struct RestAccountsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_app_id: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub include_credentials: bool,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListAccounts {
    query: AccountsQuery,
}

impl ListAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt query.external_user_id: String);
    setter!(opt query.app: String);
    setter!(opt query.oauth_app_id: String);
    setter!(query.include_credentials: bool);
    setter!(opt query.limit: u32);
    setter!(opt query.after: String);
}

impl Request for ListAccounts {
    type Data = AccountsQuery;
    type Response = AccountsResponse;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/accounts", project_id).into()
    }

    fn operation(&self) -> &'static str {
        "listing accounts"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct GetAccount {
    account_id: String,
    query: AccountsQuery,
}

impl GetAccount {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            query: AccountsQuery::default(),
        }
    }

    setter!(opt query.external_user_id: String);
    setter!(opt query.app: String);
    setter!(query.include_credentials: bool);
}

impl Request for GetAccount {
    type Data = AccountsQuery;
    type Response = AccountResponse;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/accounts/{}", project_id, self.account_id).into()
    }

    fn operation(&self) -> &'static str {
        "getting account"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

/// Delete one connected account and any triggers deployed with it
#[derive(Debug, Clone)]
pub struct DeleteAccount {
    account_id: String,
}

impl DeleteAccount {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
        }
    }
}

impl Request for DeleteAccount {
    type Data = ();
    type Response = NoContent;

    const METHOD: Method = Method::DELETE;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/accounts/{}", project_id, self.account_id).into()
    }

    fn operation(&self) -> &'static str {
        "deleting account"
    }
}

/// Delete every connected account of one app
#[derive(Debug, Clone)]
pub struct DeleteAppAccounts {
    app_id: String,
}

impl DeleteAppAccounts {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
        }
    }
}

impl Request for DeleteAppAccounts {
    type Data = ();
    type Response = NoContent;

    const METHOD: Method = Method::DELETE;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/apps/{}/accounts", project_id, self.app_id).into()
    }

    fn operation(&self) -> &'static str {
        "deleting app accounts"
    }
}

/// Delete an end user together with their accounts and deployed triggers
#[derive(Debug, Clone)]
pub struct DeleteEndUser {
    external_user_id: String,
}

impl DeleteEndUser {
    pub fn new(external_user_id: impl Into<String>) -> Self {
        Self {
            external_user_id: external_user_id.into(),
        }
    }
}

impl Request for DeleteEndUser {
    type Data = ();
    type Response = NoContent;

    const METHOD: Method = Method::DELETE;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/users/{}", project_id, self.external_user_id).into()
    }

    fn operation(&self) -> &'static str {
        "deleting end user"
    }
}

/// Accounts connected to the workspace that owns the API key
#[derive(Default, Debug, Clone)]
pub struct ListRestAccounts {
    query: RestAccountsQuery,
}

impl ListRestAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    setter!(opt query.app: String);
    setter!(opt query.oauth_app_id: String);
    setter!(query.include_credentials: bool);
}

impl Request for ListRestAccounts {
    type Data = RestAccountsQuery;
    type Response = AccountsResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        "/accounts".into()
    }

    fn operation(&self) -> &'static str {
        "listing workspace-owned accounts"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct GetRestAccount {
    account_id: String,
    query: RestAccountsQuery,
}

impl GetRestAccount {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            query: RestAccountsQuery::default(),
        }
    }

    setter!(query.include_credentials: bool);
}

impl Request for GetRestAccount {
    type Data = RestAccountsQuery;
    type Response = AccountResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/accounts/{}", self.account_id).into()
    }

    fn operation(&self) -> &'static str {
        "getting workspace-owned account"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }

    fn validate(&self) -> Result<(), String> {
        if self.account_id.is_empty() {
            return Err("account id is required".to_string());
        }
        Ok(())
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsResponse {
    #[serde(default)]
    pub page_info: PageInfo,
    pub data: Vec<Account>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub data: Account,
}
