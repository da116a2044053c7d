//! Webhook event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::impl_wire_name_conversions;

/// Event names Whise is known to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookEventType {
    CalendarUpdate,
    CalendarCreated,
    EstateUpdate,
    EstateCreated,
    ContactUpdate,
    ContactCreated,
    UserUpdate,
    OfficeUpdate,
    ContactTypeUpdate,
    ContactTitleUpdate,
    ContactOriginUpdate,
    RegionUpdate,
    GroupEstateShared,
    GroupEstateUnshared,
}

impl_wire_name_conversions!(WebhookEventType {
    CalendarUpdate => "calendar_update",
    CalendarCreated => "calendar_created",
    EstateUpdate => "estate_update",
    EstateCreated => "estate_created",
    ContactUpdate => "contact_update",
    ContactCreated => "contact_created",
    UserUpdate => "user_update",
    OfficeUpdate => "office_update",
    ContactTypeUpdate => "contact_type_update",
    ContactTitleUpdate => "contact_title_update",
    ContactOriginUpdate => "contact_origin_update",
    RegionUpdate => "region_update",
    GroupEstateShared => "group_estate_shared",
    GroupEstateUnshared => "group_estate_unshared",
});

/// Keys owned by [`WebhookEvent`] itself rather than its `data` map.
const RESERVED_KEYS: [&str; 5] = ["name", "clientId", "officeId", "userId", "timestamp"];

/// A single processed webhook event.
///
/// Carries every field of the inbound event (`objectId` and friends live in
/// `data`) enriched with the batch-level client, office and user ids and the
/// moment it was processed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    pub name: String,
    #[serde(flatten)]
    pub data: Map<String, Value>,
    pub client_id: Option<Value>,
    pub office_id: Option<Value>,
    pub user_id: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

impl WebhookEvent {
    /// Build an event from a raw event object and its batch envelope.
    ///
    /// Returns `None` when the event has no usable `name`. Non-zero numbers
    /// and `true` are accepted in their string form; objects and arrays are
    /// not.
    pub fn from_raw(
        raw: &Value,
        envelope: &Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let fields = raw.as_object()?;
        let name = fields.get("name").and_then(event_name)?;

        let data = fields
            .iter()
            .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let envelope_field = |key: &str| envelope.get(key).filter(|v| !v.is_null()).cloned();

        Some(Self {
            name,
            data,
            client_id: envelope_field("clientId"),
            office_id: envelope_field("officeId"),
            user_id: envelope_field("userId"),
            timestamp: now,
        })
    }

    /// Id of the object the event is about.
    pub fn object_id(&self) -> Option<&Value> {
        self.data.get("objectId")
    }

    /// Known event type, if the name is one Whise documents.
    pub fn event_type(&self) -> Option<WebhookEventType> {
        self.name.parse().ok()
    }
}

fn event_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
