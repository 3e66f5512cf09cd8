use crate::decode::ANY_SUCCESS;
use crate::macros::setter;
use crate::request::{Api, AuthMode, Request, RequestData};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::IgnoredAny;
use std::borrow::Cow;

// Common

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionQuery {
    pub emitter_id: String,
    pub listener_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
}

impl SubscriptionQuery {
    fn validate(&self) -> Result<(), String> {
        if self.emitter_id.is_empty() || self.listener_id.is_empty() {
            return Err("emitter_id and listener_id are required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AutoSubscriptionQuery {
    pub event_name: String,
    pub listener_id: String,
}

// Requests

/// Deliver events emitted by `emitter_id` to `listener_id`
#[derive(Debug, Clone)]
pub struct SubscribeToEmitter {
    query: SubscriptionQuery,
}

impl SubscribeToEmitter {
    pub fn new(emitter_id: impl Into<String>, listener_id: impl Into<String>) -> Self {
        Self {
            query: SubscriptionQuery {
                emitter_id: emitter_id.into(),
                listener_id: listener_id.into(),
                event_name: None,
            },
        }
    }

    setter!(opt query.event_name: String);
}

impl Request for SubscribeToEmitter {
    type Data = SubscriptionQuery;
    type Response = IgnoredAny;

    const METHOD: Method = Method::POST;
    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        "/subscriptions".into()
    }

    fn operation(&self) -> &'static str {
        "subscribing to emitter"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        self.query.validate()
    }
}

/// Subscribe `listener_id` to every emitter of `event_name`, including future ones
#[derive(Debug, Clone)]
pub struct AutoSubscribe {
    query: AutoSubscriptionQuery,
}

impl AutoSubscribe {
    pub fn new(event_name: impl Into<String>, listener_id: impl Into<String>) -> Self {
        Self {
            query: AutoSubscriptionQuery {
                event_name: event_name.into(),
                listener_id: listener_id.into(),
            },
        }
    }
}

impl Request for AutoSubscribe {
    type Data = AutoSubscriptionQuery;
    type Response = IgnoredAny;

    const METHOD: Method = Method::POST;
    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        "/auto_subscriptions".into()
    }

    fn operation(&self) -> &'static str {
        "auto-subscribing to event"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        if self.query.event_name.is_empty() || self.query.listener_id.is_empty() {
            return Err("event_name and listener_id are required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteSubscription {
    query: SubscriptionQuery,
}

impl DeleteSubscription {
    pub fn new(emitter_id: impl Into<String>, listener_id: impl Into<String>) -> Self {
        Self {
            query: SubscriptionQuery {
                emitter_id: emitter_id.into(),
                listener_id: listener_id.into(),
                event_name: None,
            },
        }
    }

    setter!(opt query.event_name: String);
}

impl Request for DeleteSubscription {
    type Data = SubscriptionQuery;
    type Response = IgnoredAny;

    const METHOD: Method = Method::DELETE;
    const API: Api = Api::Rest;
    const AUTH: AuthMode = AuthMode::ApiKey;

    fn endpoint(&self, _: &str) -> Cow<'_, str> {
        "/subscriptions".into()
    }

    fn operation(&self) -> &'static str {
        "deleting subscription"
    }

    fn data(&self) -> RequestData<&Self::Data> {
        RequestData::Query(&self.query)
    }

    fn acceptable_statuses(&self) -> &'static [StatusCode] {
        ANY_SUCCESS
    }

    fn validate(&self) -> Result<(), String> {
        self.query.validate()
    }
}
