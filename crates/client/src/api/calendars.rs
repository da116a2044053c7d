//! Calendar (agenda) endpoints, authorized with the client token

use reqwest::Method;
use serde_json::Value;
use whise_domain::{Result, WhiseError};

use super::client::{ApiClient, AuthScope};

#[derive(Clone)]
pub struct CalendarsClient {
    api: ApiClient,
}

impl CalendarsClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, options: &Value) -> Result<Value> {
        self.api
            .post(
                AuthScope::Client,
                "/v1/calendars/list",
                options,
                "Error fetching calendar events",
            )
            .await
    }

    pub async fn create(&self, event: &Value) -> Result<Value> {
        self.api
            .post(AuthScope::Client, "/v1/calendars/create", event, "Error creating calendar event")
            .await
    }

    /// Update an existing event; `event` must carry its `Id`.
    pub async fn update(&self, event: &Value) -> Result<Value> {
        if event.get("Id").map_or(true, is_blank_id) {
            return Err(WhiseError::Configuration("Calendar event ID is required".into()));
        }

        self.api
            .call(
                AuthScope::Client,
                Method::PATCH,
                "/v1/calendars/update",
                Some(event),
                "Error updating calendar event",
            )
            .await
    }

    pub async fn delete(&self, event_id: u64) -> Result<Value> {
        if event_id == 0 {
            return Err(WhiseError::Configuration("Calendar event ID is required".into()));
        }

        self.api
            .call(
                AuthScope::Client,
                Method::DELETE,
                &format!("/v1/calendars/delete/{event_id}"),
                None,
                "Error deleting calendar event",
            )
            .await
    }
}

fn is_blank_id(id: &Value) -> bool {
    match id {
        Value::Null => true,
        Value::Number(n) => n.as_u64() == Some(0),
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::client::test_support::api;

    #[tokio::test]
    async fn delete_targets_event_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/calendars/delete/314"))
            .and(header("authorization", "Bearer client"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "isValid": true })))
            .expect(1)
            .mount(&server)
            .await;

        let value = CalendarsClient::new(api(&server)).delete(314).await.expect("deleted");

        assert_eq!(value["isValid"], true);
    }

    #[tokio::test]
    async fn update_patches_event() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/calendars/update"))
            .and(body_json(json!({ "Id": 314, "Subject": "Visit" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        CalendarsClient::new(api(&server))
            .update(&json!({ "Id": 314, "Subject": "Visit" }))
            .await
            .expect("updated");
    }

    #[tokio::test]
    async fn missing_event_id_fails_locally() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let calendars = CalendarsClient::new(api(&server));
        let expected = WhiseError::Configuration("Calendar event ID is required".into());

        assert_eq!(calendars.update(&json!({ "Subject": "Visit" })).await.unwrap_err(), expected);
        assert_eq!(calendars.update(&json!({ "Id": 0 })).await.unwrap_err(), expected);
        assert_eq!(calendars.delete(0).await.unwrap_err(), expected);
    }

    #[tokio::test]
    async fn list_posts_options() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/calendars/list"))
            .and(body_json(json!({ "Filter": { "UserIds": [4] } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "calendarEvents": [] })))
            .expect(1)
            .mount(&server)
            .await;

        CalendarsClient::new(api(&server))
            .list(&json!({ "Filter": { "UserIds": [4] } }))
            .await
            .expect("events");
    }
}
