use crate::request::{Api, AuthMode, Request};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Requests

/// The workspace user the API key belongs to
#[derive(Default, Debug, Clone, Copy)]
pub struct GetCurrentUser;

impl Request for GetCurrentUser {
    type Data = ();
    type Response = CurrentUserResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        "/users/me".into()
    }

    fn operation(&self) -> &'static str {
        "getting current user"
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub data: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub daily_compute_time_quota: Option<i64>,
    #[serde(default)]
    pub daily_compute_time_used: Option<i64>,
    #[serde(default)]
    pub daily_invocations_quota: Option<i64>,
    #[serde(default)]
    pub daily_invocations_used: Option<i64>,
    #[serde(default)]
    pub billing_period_start_ts: Option<i64>,
    #[serde(default)]
    pub billing_period_end_ts: Option<i64>,
    #[serde(default)]
    pub billing_period_credits: Option<i64>,
    #[serde(default)]
    pub orgs: Vec<Org>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Org {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "orgname", default)]
    pub org_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub daily_credits_quota: Option<i64>,
    #[serde(default)]
    pub daily_credits_used: Option<i64>,
}
