//! Estate request models and classification

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::impl_wire_name_conversions;

/// Page window for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Page {
    pub limit: u32,
    pub offset: u32,
}

/// Body of `/v1/estates/list` and the helpers built on it.
///
/// `filter` is left open because the API accepts dozens of filter keys;
/// the typed helpers only ever add to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EstateQuery {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub filter: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Value>,
}

impl EstateQuery {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn page(mut self, limit: u32, offset: u32) -> Self {
        self.page = Some(Page { limit, offset });
        self
    }

    /// Set one filter key, replacing any previous value.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: Value) -> Self {
        self.sort.push(sort);
        self
    }

    #[must_use]
    pub fn field(mut self, field: Value) -> Self {
        self.field = Some(field);
        self
    }
}

/// Structural role of an estate within a project hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstateKind {
    Project,
    SubProject,
    Unit,
    Standalone,
}

impl_wire_name_conversions!(EstateKind {
    Project => "project",
    SubProject => "sub-project",
    Unit => "unit",
    Standalone => "standalone",
});

impl EstateKind {
    /// Classify an estate record from its `canHaveChildren` and `parentId`
    /// fields.
    ///
    /// Only a literal `true` marks a container. A truthy non-boolean flag
    /// with a parent is neither a container nor a unit and falls back to
    /// [`EstateKind::Standalone`].
    pub fn identify(estate: &Value) -> Self {
        let flag = estate.get("canHaveChildren");
        let container = flag.and_then(Value::as_bool) == Some(true);
        let leaf = !flag.is_some_and(is_truthy);
        let has_parent = estate.get("parentId").is_some_and(is_truthy);

        match (container, leaf, has_parent) {
            (true, _, false) => Self::Project,
            (true, _, true) => Self::SubProject,
            (false, true, true) => Self::Unit,
            _ => Self::Standalone,
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn query_serializes_pascal_case_and_skips_empty() {
        let query = EstateQuery::new().page(10, 0).filter("ShowDetails", true);
        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(
            body,
            json!({ "Filter": { "ShowDetails": true }, "Page": { "Limit": 10, "Offset": 0 } })
        );

        assert_eq!(serde_json::to_value(EstateQuery::new()).unwrap(), json!({}));
    }

    #[test]
    fn identifies_estate_kinds() {
        assert_eq!(EstateKind::identify(&json!({ "canHaveChildren": true })), EstateKind::Project);
        assert_eq!(
            EstateKind::identify(&json!({ "canHaveChildren": true, "parentId": 4 })),
            EstateKind::SubProject
        );
        assert_eq!(
            EstateKind::identify(&json!({ "canHaveChildren": false, "parentId": 4 })),
            EstateKind::Unit
        );
        assert_eq!(EstateKind::identify(&json!({ "id": 1 })), EstateKind::Standalone);
        assert_eq!(
            EstateKind::identify(&json!({ "canHaveChildren": true, "parentId": null })),
            EstateKind::Project
        );
    }

    #[test]
    fn truthy_non_boolean_flag_is_standalone() {
        assert_eq!(
            EstateKind::identify(&json!({ "canHaveChildren": 1, "parentId": 4 })),
            EstateKind::Standalone
        );
        assert_eq!(
            EstateKind::identify(&json!({ "canHaveChildren": "yes", "parentId": 4 })),
            EstateKind::Standalone
        );
        assert_eq!(
            EstateKind::identify(&json!({ "canHaveChildren": 0, "parentId": 4 })),
            EstateKind::Unit
        );
        assert_eq!(EstateKind::identify(&json!({ "parentId": "7" })), EstateKind::Unit);
    }

    #[test]
    fn kind_wire_names() {
        assert_eq!(EstateKind::SubProject.to_string(), "sub-project");
        assert_eq!("unit".parse::<EstateKind>().unwrap(), EstateKind::Unit);
    }
}
