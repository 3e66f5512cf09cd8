use super::events::{EventMetadata, SourceEvent};
use super::{ConfiguredProps, PageInfo};
use crate::decode::ANY_SUCCESS;
use crate::macros::setter;
use crate::request::{Api, AuthMode, Request, RequestData};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub steps: Vec<WorkflowStepInfo>,
    #[serde(default)]
    pub triggers: Vec<WorkflowTriggerInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowStepInfo {
    pub id: String,
    #[serde(rename = "type", default)]
    pub step_type: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub component: bool,
    #[serde(default)]
    pub component_key: Option<String>,
    /// Prop values as the API stores them, a JSON document in a string
    #[serde(default)]
    pub configured_props_json: Option<String>,
    #[serde(rename = "savedComponent", default)]
    pub saved_component: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTriggerInfo {
    pub id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
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
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// A step to add to the template, configured by namespace
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowStep {
    pub namespace: String,
    pub props: ConfiguredProps,
}

impl WorkflowStep {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            props: ConfiguredProps::new(),
        }
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct WorkflowTrigger {
    pub props: ConfiguredProps,
}

impl WorkflowTrigger {
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct WorkflowSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub auto_deploy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowError {
    pub id: String,
    #[serde(default)]
    pub indexed_at_ms: i64,
    #[serde(default)]
    pub event: Option<Value>,
    #[serde(default)]
    pub original_context: ErrorContext,
    #[serde(default)]
    pub error: ExecutionError,
    #[serde(default)]
    pub metadata: EventMetadata,
}

/// The execution that failed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub deployment_id: Option<String>,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub platform_version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(rename = "cellId", default)]
    pub cell_id: Option<String>,
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrgQuery {
    pub org_id: String,
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct WorkflowEventsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

fn require(name: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{} is required", name));
    }
    Ok(())
}

// Requests

/// Create a workflow from a template in one project
#[derive(Debug, Clone, Serialize)]
pub struct CreateWorkflow {
    org_id: String,
    project_id: String,
    template_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    steps: Vec<WorkflowStep>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    triggers: Vec<WorkflowTrigger>,
    #[serde(skip_serializing_if = "Option::is_none")]
    settings: Option<WorkflowSettings>,
}

impl CreateWorkflow {
    pub fn new(
        org_id: impl Into<String>,
        project_id: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            org_id: org_id.into(),
            project_id: project_id.into(),
            template_id: template_id.into(),
            steps: Vec::new(),
            triggers: Vec::new(),
            settings: None,
        }
    }

    setter!(steps: Vec<WorkflowStep>);
    setter!(triggers: Vec<WorkflowTrigger>);
    setter!(opt settings: WorkflowSettings);
}

impl Request for CreateWorkflow {
    type Data = Self;
    type Response = WorkflowResponse;

    const METHOD: Method = Method::POST;
    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        "/workflows".into()
    }

    fn operation(&self) -> &'static str {
        "creating workflow"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        require("org_id", &self.org_id)?;
        require("project_id", &self.project_id)
    }
}

/// Turn a workflow on or off
#[derive(Debug, Clone, Serialize)]
pub struct UpdateWorkflow {
    #[serde(skip)]
    workflow_id: String,
    active: bool,
    org_id: String,
}

impl UpdateWorkflow {
    pub fn new(workflow_id: impl Into<String>, org_id: impl Into<String>, active: bool) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            active,
            org_id: org_id.into(),
        }
    }
}

impl Request for UpdateWorkflow {
    type Data = Self;
    type Response = Value;

    const METHOD: Method = Method::PUT;
    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/workflows/{}", self.workflow_id).into()
    }

    fn operation(&self) -> &'static str {
        "updating workflow"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        require("workflow id", &self.workflow_id)?;
        require("org_id", &self.org_id)
    }
}

#[derive(Debug, Clone)]
pub struct GetWorkflowDetails {
    workflow_id: String,
    query: OrgQuery,
}

impl GetWorkflowDetails {
    pub fn new(workflow_id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            query: OrgQuery {
                org_id: org_id.into(),
            },
        }
    }
}

impl Request for GetWorkflowDetails {
    type Data = OrgQuery;
    type Response = WorkflowDetailsResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/workflows/{}", self.workflow_id).into()
    }

    fn operation(&self) -> &'static str {
        "getting workflow details"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        require("workflow id", &self.workflow_id)?;
        require("org_id", &self.query.org_id)
    }
}

/// Events the workflow emitted with `$.send.emit()`
#[derive(Debug, Clone)]
pub struct GetWorkflowEmits {
    workflow_id: String,
    query: WorkflowEventsQuery,
}

impl GetWorkflowEmits {
    pub fn new(workflow_id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            query: WorkflowEventsQuery {
                org_id: Some(org_id.into()),
                ..Default::default()
            },
        }
    }

    setter!(opt query.limit: u32);

    /// Include each event's full payload rather than just its summary
    pub fn expand(mut self, expand: bool) -> Self {
        self.query.expand = expand.then_some("event");
        self
    }
}

impl Request for GetWorkflowEmits {
    type Data = WorkflowEventsQuery;
    type Response = WorkflowEmitsResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/workflows/{}/event_summaries", self.workflow_id).into()
    }

    fn operation(&self) -> &'static str {
        "listing workflow emits"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        require("workflow id", &self.workflow_id)?;
        require("org_id", self.query.org_id.as_deref().unwrap_or_default())
    }
}

/// Errors raised by recent executions of the workflow
#[derive(Debug, Clone)]
pub struct GetWorkflowErrors {
    workflow_id: String,
    query: WorkflowEventsQuery,
}

impl GetWorkflowErrors {
    pub fn new(workflow_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            query: WorkflowEventsQuery::default(),
        }
    }

    setter!(opt query.limit: u32);

    pub fn expand(mut self, expand: bool) -> Self {
        self.query.expand = expand.then_some("event");
        self
    }
}

impl Request for GetWorkflowErrors {
    type Data = WorkflowEventsQuery;
    type Response = WorkflowErrorsResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/workflows/{}/$errors/event_summaries", self.workflow_id).into()
    }

    fn operation(&self) -> &'static str {
        "listing workflow errors"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        require("workflow id", &self.workflow_id)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResponse {
    pub data: Workflow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowDetailsResponse {
    #[serde(default)]
    pub triggers: Vec<WorkflowTriggerInfo>,
    #[serde(default)]
    pub steps: Vec<WorkflowStepInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowEmitsResponse {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub data: Vec<SourceEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowErrorsResponse {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub data: Vec<WorkflowError>,
}
