use crate::decode::ANY_SUCCESS;
use crate::macros::setter;
use crate::request::{Api, AuthMode, NoContent, Request, RequestData};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookQuery {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// Requests

/// Register a URL that subscriptions can deliver events to
#[derive(Debug, Clone)]
pub struct CreateWebhook {
    query: WebhookQuery,
}

impl CreateWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            query: WebhookQuery {
                url: url.into(),
                name: None,
                description: None,
            },
        }
    }

    setter!(opt query.name: String);
    setter!(opt query.description: String);
}

impl Request for CreateWebhook {
    type Data = WebhookQuery;
    type Response = WebhookResponse;

    const METHOD: Method = Method::POST;
    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        "/webhooks".into()
    }

    fn operation(&self) -> &'static str {
        "creating webhook"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        if self.query.url.trim().is_empty() {
            return Err("url is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteWebhook {
    webhook_id: String,
}

impl DeleteWebhook {
    pub fn new(webhook_id: impl Into<String>) -> Self {
        Self {
            webhook_id: webhook_id.into(),
        }
    }
}

impl Request for DeleteWebhook {
    type Data = ();
    type Response = NoContent;

    const METHOD: Method = Method::DELETE;
    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/webhooks/{}", self.webhook_id).into()
    }

    fn operation(&self) -> &'static str {
        "deleting webhook"
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub data: Webhook,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sends_fields_as_query() {
        let req = CreateWebhook::new("https://hooks.example/in").name("inbox");
        assert_eq!(
            serde_json::to_value(&req.query).unwrap(),
            serde_json::json!({ "url": "https://hooks.example/in", "name": "inbox" })
        );
        assert!(CreateWebhook::new(" ").validate().is_err());
    }

    #[test]
    fn test_webhook_decodes_null_name() {
        let webhook: Webhook =
            serde_json::from_str(r#"{"id":"wh_1","url":"https://a.example","name":null}"#).unwrap();
        assert_eq!(webhook.name, None);
        assert!(!webhook.active);
    }
}
