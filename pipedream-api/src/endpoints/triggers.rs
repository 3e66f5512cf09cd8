use super::{ConfiguredProps, ExternalUserQuery, PageInfo, components::ConfigurableProp};
use crate::macros::setter;
use crate::request::{NoContent, Request, RequestData};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

// Common

/// A trigger component deployed on behalf of an end user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployedTrigger {
    pub id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub component_id: Option<String>,
    #[serde(default)]
    pub configurable_props: Vec<ConfigurableProp>,
    #[serde(default)]
    pub configured_props: ConfiguredProps,
    #[serde(default)]
    pub active: bool,
    /// Unix seconds
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_slug: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerEvent {
    #[serde(default)]
    pub id: Option<String>,
    /// Event key
    #[serde(default)]
    pub k: Option<String>,
    #[serde(default)]
    pub ts: Option<i64>,
    #[serde(default)]
    pub e: Option<EmittedEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmittedEvent {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub query: Value,
    #[serde(default)]
    pub client_ip: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn user_query(external_user_id: impl Into<String>) -> ExternalUserQuery {
    ExternalUserQuery {
        external_user_id: external_user_id.into(),
    }
}

// Requests

#[derive(Debug, Clone, Serialize)]
pub struct DeployTrigger {
    #[serde(rename = "id")]
    component_key: String,
    external_user_id: String,
    configured_props: ConfiguredProps,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    workflow_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dynamic_props_id: Option<String>,
}

impl DeployTrigger {
    pub fn new(component_key: impl Into<String>, external_user_id: impl Into<String>) -> Self {
        Self {
            component_key: component_key.into(),
            external_user_id: external_user_id.into(),
            configured_props: ConfiguredProps::new(),
            webhook_url: None,
            workflow_id: None,
            dynamic_props_id: None,
        }
    }

    setter!(configured_props: ConfiguredProps);
    setter!(opt webhook_url: String);
    setter!(opt workflow_id: String);
    setter!(opt dynamic_props_id: String);

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.configured_props.insert(name.into(), value.into());
        self
    }
}

impl Request for DeployTrigger {
    type Data = Self;
    type Response = DeployedTriggerResponse;

    const METHOD: Method = Method::POST;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/triggers/deploy", project_id).into()
    }

    fn operation(&self) -> &'static str {
        "deploying trigger"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct ListDeployedTriggers {
    query: ExternalUserQuery,
}

impl ListDeployedTriggers {
    pub fn new(external_user_id: impl Into<String>) -> Self {
        Self {
            query: user_query(external_user_id),
        }
    }
}

impl Request for ListDeployedTriggers {
    type Data = ExternalUserQuery;
    type Response = DeployedTriggersResponse;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/deployed-triggers", project_id).into()
    }

    fn operation(&self) -> &'static str {
        "listing deployed triggers"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct GetDeployedTrigger {
    trigger_id: String,
    query: ExternalUserQuery,
}

impl GetDeployedTrigger {
    pub fn new(trigger_id: impl Into<String>, external_user_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            query: user_query(external_user_id),
        }
    }
}

impl Request for GetDeployedTrigger {
    type Data = ExternalUserQuery;
    type Response = DeployedTriggerResponse;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/deployed-triggers/{}", project_id, self.trigger_id).into()
    }

    fn operation(&self) -> &'static str {
        "getting deployed trigger"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteDeployedTrigger {
    trigger_id: String,
    query: ExternalUserQuery,
}

impl DeleteDeployedTrigger {
    pub fn new(trigger_id: impl Into<String>, external_user_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            query: user_query(external_user_id),
        }
    }
}

impl Request for DeleteDeployedTrigger {
    type Data = ExternalUserQuery;
    type Response = NoContent;

    const METHOD: Method = Method::DELETE;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/deployed-triggers/{}", project_id, self.trigger_id).into()
    }

    fn operation(&self) -> &'static str {
        "deleting deployed trigger"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

/// Most recent events emitted by a deployed trigger
#[derive(Debug, Clone)]
pub struct ListTriggerEvents {
    trigger_id: String,
    query: TriggerEventsQuery,
}

#[derive(Debug, Clone, Serialize)]
pub struct TriggerEventsQuery {
    pub external_user_id: String,
    #[serde(rename = "n", skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListTriggerEvents {
    pub fn new(trigger_id: impl Into<String>, external_user_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            query: TriggerEventsQuery {
                external_user_id: external_user_id.into(),
                limit: None,
            },
        }
    }

    setter!(opt query.limit: u32);
}

impl Request for ListTriggerEvents {
    type Data = TriggerEventsQuery;
    type Response = TriggerEventsResponse;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/deployed-triggers/{}/events", project_id, self.trigger_id).into()
    }

    fn operation(&self) -> &'static str {
        "listing trigger events"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct ListTriggerWebhooks {
    trigger_id: String,
    query: ExternalUserQuery,
}

impl ListTriggerWebhooks {
    pub fn new(trigger_id: impl Into<String>, external_user_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            query: user_query(external_user_id),
        }
    }
}

impl Request for ListTriggerWebhooks {
    type Data = ExternalUserQuery;
    type Response = TriggerWebhooks;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/deployed-triggers/{}/webhooks", project_id, self.trigger_id).into()
    }

    fn operation(&self) -> &'static str {
        "listing trigger webhooks"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

/// Replace the webhook URLs notified by a deployed trigger
#[derive(Debug, Clone, Serialize)]
pub struct UpdateTriggerWebhooks {
    #[serde(skip)]
    trigger_id: String,
    external_user_id: String,
    webhook_urls: Vec<String>,
}

impl UpdateTriggerWebhooks {
    pub fn new(
        trigger_id: impl Into<String>,
        external_user_id: impl Into<String>,
        webhook_urls: Vec<String>,
    ) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            external_user_id: external_user_id.into(),
            webhook_urls,
        }
    }
}

impl Request for UpdateTriggerWebhooks {
    type Data = Self;
    type Response = TriggerWebhooks;

    const METHOD: Method = Method::PUT;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/deployed-triggers/{}/webhooks", project_id, self.trigger_id).into()
    }

    fn operation(&self) -> &'static str {
        "updating trigger webhooks"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

#[derive(Debug, Clone)]
pub struct ListTriggerWorkflows {
    trigger_id: String,
    query: ExternalUserQuery,
}

impl ListTriggerWorkflows {
    pub fn new(trigger_id: impl Into<String>, external_user_id: impl Into<String>) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            query: user_query(external_user_id),
        }
    }
}

impl Request for ListTriggerWorkflows {
    type Data = ExternalUserQuery;
    type Response = TriggerWorkflows;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/deployed-triggers/{}/workflows", project_id, self.trigger_id).into()
    }

    fn operation(&self) -> &'static str {
        "listing trigger workflows"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateTriggerWorkflows {
    #[serde(skip)]
    trigger_id: String,
    external_user_id: String,
    workflow_ids: Vec<String>,
}

impl UpdateTriggerWorkflows {
    pub fn new(
        trigger_id: impl Into<String>,
        external_user_id: impl Into<String>,
        workflow_ids: Vec<String>,
    ) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            external_user_id: external_user_id.into(),
            workflow_ids,
        }
    }
}

impl Request for UpdateTriggerWorkflows {
    type Data = Self;
    type Response = TriggerWorkflows;

    const METHOD: Method = Method::PUT;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/deployed-triggers/{}/workflows", project_id, self.trigger_id).into()
    }

    fn operation(&self) -> &'static str {
        "updating trigger workflows"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployedTriggerResponse {
    pub data: DeployedTrigger,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployedTriggersResponse {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub data: Vec<DeployedTrigger>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerEventsResponse {
    #[serde(default)]
    pub data: Vec<TriggerEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerWebhooks {
    #[serde(default)]
    pub webhook_urls: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerWorkflows {
    #[serde(default)]
    pub workflow_ids: Vec<String>,
}
