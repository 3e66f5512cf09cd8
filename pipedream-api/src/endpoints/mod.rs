pub mod accounts;
pub mod actions;
pub mod apps;
pub mod components;
pub mod events;
pub mod proxy;
pub mod registry;
pub mod sources;
pub mod subscriptions;
pub mod tokens;
pub mod triggers;
pub mod users;
pub mod webhooks;
pub mod workflows;
pub mod workspaces;

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Prop values keyed by prop name, passed through untouched
pub type ConfiguredProps = serde_json::Map<String, serde_json::Value>;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    #[default]
    Components,
    Actions,
    Triggers,
}

impl Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Components => f.write_str("components"),
            Self::Actions => f.write_str("actions"),
            Self::Triggers => f.write_str("triggers"),
        }
    }
}

/// Pagination cursors, passed back to the API as-is
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_slug: Option<String>,
    #[serde(default)]
    pub auth_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub img_src: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Query carrying only the end user the call is made on behalf of
#[derive(Debug, Clone, Serialize)]
pub struct ExternalUserQuery {
    pub external_user_id: String,
}

/// Serializes `true` as `1` and leaves `false` out of the query string
pub(crate) mod flag {
    use serde::Serializer;

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn is_unset(value: &bool) -> bool {
        !*value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_matches_path_segment() {
        assert_eq!(ComponentType::Actions.to_string(), "actions");
        assert_eq!(
            serde_json::to_string(&ComponentType::Triggers).unwrap(),
            "\"triggers\""
        );
    }

    #[test]
    fn test_page_info_tolerates_missing_fields() {
        let info: PageInfo = serde_json::from_str(r#"{"count": 2, "end_cursor": "abc"}"#).unwrap();
        assert_eq!(info.count, Some(2));
        assert_eq!(info.end_cursor.as_deref(), Some("abc"));
        assert_eq!(info.total_count, None);
    }
}
