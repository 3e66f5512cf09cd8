use super::{ComponentType, ConfiguredProps, PageInfo};
use crate::macros::setter;
use crate::request::{Request, RequestData};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub configurable_props: Vec<ConfigurableProp>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurableProp {
    pub name: String,
    #[serde(rename = "type")]
    pub prop_type: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub app: Option<String>,
    #[serde(default)]
    pub optional: bool,
    /// Options must be fetched with [`ConfigureComponent`]
    #[serde(default, alias = "remoteOptions")]
    pub remote_options: bool,
    /// Changing this prop requires [`ReloadComponentProps`]
    #[serde(default, alias = "reloadProps")]
    pub reload_props: bool,
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct ComponentsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

// Requests

#[derive(Default, Debug, Clone)]
pub struct ListComponents {
    component_type: ComponentType,
    query: ComponentsQuery,
}

impl ListComponents {
    pub fn new(component_type: ComponentType) -> Self {
        Self {
            component_type,
            query: ComponentsQuery::default(),
        }
    }

    setter!(opt query.app: String);
    setter!(opt query.q: String);
    setter!(opt query.limit: u32);
    setter!(opt query.after: String);
}

impl Request for ListComponents {
    type Data = ComponentsQuery;
    type Response = ComponentsResponse;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/{}", project_id, self.component_type).into()
    }

    fn operation(&self) -> &'static str {
        "listing components"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

#[derive(Debug, Clone)]
pub struct GetComponent {
    component_type: ComponentType,
    key: String,
}

impl GetComponent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            component_type: ComponentType::Components,
            key: key.into(),
        }
    }

    setter!(component_type: ComponentType);
}

impl Request for GetComponent {
    type Data = ();
    type Response = ComponentResponse;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/{}/{}", project_id, self.component_type, self.key).into()
    }

    fn operation(&self) -> &'static str {
        "getting component"
    }
}

/// Fetch the options of a prop whose values come from the connected app
#[derive(Debug, Clone, Serialize)]
pub struct ConfigureComponent {
    #[serde(rename = "id")]
    component_key: String,
    prop_name: String,
    external_user_id: String,
    configured_props: ConfiguredProps,
    #[serde(skip_serializing_if = "Option::is_none")]
    dynamic_props_id: Option<String>,
}

impl ConfigureComponent {
    pub fn new(
        component_key: impl Into<String>,
        prop_name: impl Into<String>,
        external_user_id: impl Into<String>,
    ) -> Self {
        Self {
            component_key: component_key.into(),
            prop_name: prop_name.into(),
            external_user_id: external_user_id.into(),
            configured_props: ConfiguredProps::new(),
            dynamic_props_id: None,
        }
    }

    setter!(configured_props: ConfiguredProps);
    setter!(opt dynamic_props_id: String);
}

impl Request for ConfigureComponent {
    type Data = Self;
    type Response = PropOptions;

    const METHOD: Method = Method::POST;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/components/configure", project_id).into()
    }

    fn operation(&self) -> &'static str {
        "configuring component"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

/// Recompute a component's props after a `reload_props` prop was set
#[derive(Debug, Clone, Serialize)]
pub struct ReloadComponentProps {
    #[serde(skip)]
    component_type: ComponentType,
    #[serde(rename = "id")]
    component_key: String,
    external_user_id: String,
    configured_props: ConfiguredProps,
    #[serde(skip_serializing_if = "Option::is_none")]
    dynamic_props_id: Option<String>,
}

impl ReloadComponentProps {
    pub fn new(component_key: impl Into<String>, external_user_id: impl Into<String>) -> Self {
        Self {
            component_type: ComponentType::Components,
            component_key: component_key.into(),
            external_user_id: external_user_id.into(),
            configured_props: ConfiguredProps::new(),
            dynamic_props_id: None,
        }
    }

    setter!(component_type: ComponentType);
    setter!(configured_props: ConfiguredProps);
    setter!(opt dynamic_props_id: String);
}

impl Request for ReloadComponentProps {
    type Data = Self;
    type Response = ReloadPropsResponse;

    const METHOD: Method = Method::POST;

    fn endpoint(&self, project_id: &str) -> Cow<'_, str> {
        format!("/{}/{}/props", project_id, self.component_type).into()
    }

    fn operation(&self) -> &'static str {
        "reloading component props"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Json(self)
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentsResponse {
    #[serde(default)]
    pub page_info: PageInfo,
    pub data: Vec<Component>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentResponse {
    pub data: Component,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropOptions {
    #[serde(default)]
    pub options: Vec<Value>,
    #[serde(default)]
    pub string_options: Option<Vec<String>>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub observations: Vec<Value>,
    /// Opaque cursor for fetching the next page of options
    #[serde(default)]
    pub context: Option<Value>,
}

impl PropOptions {
    /// Errors reported by the component itself arrive with a `200`.
    pub fn check(self) -> Result<Self, String> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(self.errors.join("."))
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadPropsResponse {
    #[serde(default)]
    pub observations: Vec<Value>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(rename = "dynamicProps", default)]
    pub dynamic_props: Option<DynamicProps>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicProps {
    pub id: String,
    #[serde(rename = "configurableProps", default)]
    pub configurable_props: Vec<ConfigurableProp>,
}
