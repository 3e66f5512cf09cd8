use crate::macros::setter;
use crate::request::{Request, RequestData};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Requests

/// Short-lived token an end user presents to connect their accounts
#[derive(Debug, Clone, Serialize)]
pub struct CreateUserToken {
    external_user_id: String,
    allowed_origins: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    success_redirect_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_redirect_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_uri: Option<String>,
}

impl CreateUserToken {
    pub fn new(external_user_id: impl Into<String>) -> Self {
        Self {
            external_user_id: external_user_id.into(),
            allowed_origins: Vec::new(),
            success_redirect_uri: None,
            error_redirect_uri: None,
            webhook_uri: None,
        }
    }

    setter!(allowed_origins: Vec<String>);
    setter!(opt success_redirect_uri: String);
    setter!(opt error_redirect_uri: String);
    setter!(opt webhook_uri: String);
}

impl Request for CreateUserToken {
    type Data = Self;
    type Response = UserToken;

    const METHOD: Method = Method::POST;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/tokens", project_id).into()
    }

    fn operation(&self) -> &'static str {
        "creating user token"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }

    fn validate(&self) -> Result<(), String> {
        if self.external_user_id.trim().is_empty() {
            return Err("external_user_id is required".to_string());
        }
        Ok(())
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserToken {
    pub token: String,
    #[serde(default)]
    pub connect_link_url: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}
