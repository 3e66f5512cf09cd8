use super::PageInfo;
use crate::decode::ANY_SUCCESS;
use crate::macros::setter;
use crate::request::{Api, AuthMode, Request, RequestData};
use reqwest::{Method, StatusCode};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEvent {
    pub id: String,
    #[serde(default)]
    pub indexed_at_ms: i64,
    /// Full payload, only present when listed with `expand`
    #[serde(default)]
    pub event: Option<Value>,
    #[serde(default)]
    pub metadata: EventMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventMetadata {
    #[serde(default)]
    pub emitter_id: Option<String>,
    #[serde(default)]
    pub emit_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub ts: Option<i64>,
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct SourceEventsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventRangeQuery {
    pub start_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_id: Option<String>,
}

// Requests

#[derive(Debug, Clone)]
pub struct ListSourceEvents {
    source_id: String,
    query: SourceEventsQuery,
}

impl ListSourceEvents {
    pub fn new(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            query: SourceEventsQuery::default(),
        }
    }

    setter!(opt query.limit: u32);

    /// Include each event's full payload rather than just its summary
    pub fn expand(mut self, expand: bool) -> Self {
        self.query.expand = expand.then_some("event");
        self
    }
}

impl Request for ListSourceEvents {
    type Data = SourceEventsQuery;
    type Response = SourceEventsResponse;

    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/sources/{}/event_summaries", self.source_id).into()
    }

    fn operation(&self) -> &'static str {
        "listing source events"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }
}

/// Delete the events from `start_id` up to `end_id`, or just `start_id`
#[derive(Debug, Clone)]
pub struct DeleteSourceEvents {
    source_id: String,
    query: EventRangeQuery,
}

impl DeleteSourceEvents {
    pub fn new(source_id: impl Into<String>, start_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            query: EventRangeQuery {
                start_id: start_id.into(),
                end_id: None,
            },
        }
    }

    setter!(opt query.end_id: String);
}

impl Request for DeleteSourceEvents {
    type Data = EventRangeQuery;
    type Response = IgnoredAny;

    const METHOD: Method = Method::DELETE;
    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        format!("/sources/{}/events", self.source_id).into()
    }

    fn operation(&self) -> &'static str {
        "deleting source events"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        if self.source_id.is_empty() || self.query.start_id.is_empty() {
            return Err("source_id and start_id are required".to_string());
        }
        Ok(())
    }
}

// Responses

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEventsResponse {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default)]
    pub data: Vec<SourceEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_adds_event_parameter() {
        let req = ListSourceEvents::new("dc_1").limit(5u32).expand(true);
        assert_eq!(
            serde_json::to_value(&req.query).unwrap(),
            serde_json::json!({ "limit": 5, "expand": "event" })
        );

        let plain = ListSourceEvents::new("dc_1").expand(false);
        assert_eq!(serde_json::to_value(&plain.query).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_delete_requires_start_id() {
        assert!(DeleteSourceEvents::new("dc_1", "").validate().is_err());

        let req = DeleteSourceEvents::new("dc_1", "e_1").end_id("e_9");
        assert!(req.validate().is_ok());
        assert_eq!(req.endpoint(""), "/sources/dc_1/events");
    }
}
